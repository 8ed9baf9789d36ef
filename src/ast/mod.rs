use crate::functions::Function;
use std::fmt;

mod compiler;
mod cursor;
mod evaluator;
mod normalizer;
mod parser;

pub use compiler::*;
pub use cursor::{Cursor, MAX_DEPTH};
pub use evaluator::*;
pub use normalizer::{normalize_input, NTH_ROOT, ROOT_OPERATOR};
pub use parser::MathParser as Parser;

/// Parsed expression. Built once per input string, never mutated, and
/// evaluated as often as needed against a caller-owned variable map.
#[derive(Debug, Clone, PartialEq)]
pub enum ASTNode {
    Number(f64),
    /// Variable looked up by name at evaluation time.
    Identifier(String),
    Negate(Box<ASTNode>),
    FunctionCall {
        function: Function,
        argument: Box<ASTNode>,
    },
    BinaryOperation {
        left: Box<ASTNode>,
        operator: Operator,
        right: Box<ASTNode>,
    },
}

impl ASTNode {
    pub fn binary(left: ASTNode, operator: Operator, right: ASTNode) -> Self {
        ASTNode::BinaryOperation {
            left: Box::new(left),
            operator,
            right: Box::new(right),
        }
    }

    pub fn call(function: Function, argument: ASTNode) -> Self {
        ASTNode::FunctionCall {
            function,
            argument: Box::new(argument),
        }
    }

    pub fn negate(inner: ASTNode) -> Self {
        ASTNode::Negate(Box::new(inner))
    }

    /// Distinct variable names in order of first appearance.
    pub fn variables(&self) -> Vec<String> {
        let mut names = Vec::new();
        self.collect_variables(&mut names);
        names
    }

    fn collect_variables(&self, names: &mut Vec<String>) {
        match self {
            ASTNode::Number(_) => {}
            ASTNode::Identifier(name) => {
                if !names.contains(name) {
                    names.push(name.clone());
                }
            }
            ASTNode::Negate(inner) => inner.collect_variables(names),
            ASTNode::FunctionCall { argument, .. } => argument.collect_variables(names),
            ASTNode::BinaryOperation { left, right, .. } => {
                left.collect_variables(names);
                right.collect_variables(names);
            }
        }
    }
}

impl fmt::Display for ASTNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ASTNode::Number(value) => write!(f, "{}", value),
            ASTNode::Identifier(name) => f.write_str(name),
            ASTNode::Negate(inner) => write!(f, "(-{})", inner),
            ASTNode::FunctionCall { function, argument } => {
                write!(f, "{}({})", function, argument)
            }
            ASTNode::BinaryOperation {
                left,
                operator,
                right,
            } => write!(f, "({} {} {})", left, operator.symbol(), right),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    Power,
    /// `left ^ (1 / right)`.
    Root,
}

impl Operator {
    /// IEEE semantics throughout: division by zero gives an infinity or NaN,
    /// `%` is the truncated floating-point remainder.
    pub fn apply(&self, left: f64, right: f64) -> f64 {
        match self {
            Operator::Add => left + right,
            Operator::Subtract => left - right,
            Operator::Multiply => left * right,
            Operator::Divide => left / right,
            Operator::Modulo => left % right,
            Operator::Power => left.powf(right),
            Operator::Root => left.powf(1.0 / right),
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Subtract => '-',
            Operator::Multiply => '*',
            Operator::Divide => '/',
            Operator::Modulo => '%',
            Operator::Power => '^',
            Operator::Root => ROOT_OPERATOR,
        }
    }
}

impl TryFrom<char> for Operator {
    type Error = String;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        match value {
            '+' => Ok(Operator::Add),
            '-' => Ok(Operator::Subtract),
            '*' => Ok(Operator::Multiply),
            '/' => Ok(Operator::Divide),
            '%' => Ok(Operator::Modulo),
            '^' => Ok(Operator::Power),
            ROOT_OPERATOR => Ok(Operator::Root),
            _ => Err(format!("Unknown operator: {}", value)),
        }
    }
}
