use crate::ast::{ASTNode, Parser};
use crate::error::{EvalError, ParseError};
use std::collections::HashMap;

/// Caller-owned variable values, read at evaluation time.
pub type Variables = HashMap<String, f64>;

impl ASTNode {
    /// Evaluates the tree against `variables`. Every operand is evaluated on
    /// every call; nothing is cached between calls.
    pub fn evaluate(&self, variables: &Variables) -> Result<f64, EvalError> {
        self.evaluate_with(&|name| variables.get(name).copied())
    }

    fn evaluate_with<F>(&self, lookup: &F) -> Result<f64, EvalError>
    where
        F: Fn(&str) -> Option<f64>,
    {
        match self {
            ASTNode::Number(value) => Ok(*value),
            ASTNode::Identifier(name) => {
                lookup(name).ok_or_else(|| EvalError::UnresolvedVariable(name.clone()))
            }
            ASTNode::Negate(inner) => Ok(-1.0 * inner.evaluate_with(lookup)?),
            ASTNode::FunctionCall { function, argument } => {
                Ok(function.apply(argument.evaluate_with(lookup)?))
            }
            ASTNode::BinaryOperation {
                left,
                operator,
                right,
            } => {
                let left_value = left.evaluate_with(lookup)?;
                let right_value = right.evaluate_with(lookup)?;
                Ok(operator.apply(left_value, right_value))
            }
        }
    }

    /// Pairs the tree with a variable map so it can be evaluated without
    /// arguments.
    pub fn bind(self, variables: &Variables) -> Expression<'_> {
        Expression {
            ast: self,
            variables: Some(variables),
        }
    }
}

/// A parsed tree, optionally bound to a borrowed variable map.
///
/// The map is borrowed, not copied: to evaluate with new values, update the
/// map and `rebind` (the borrow checker rules out mutating it while bound).
#[derive(Debug, Clone)]
pub struct Expression<'v> {
    ast: ASTNode,
    variables: Option<&'v Variables>,
}

impl Expression<'static> {
    /// Parses `input` with no variable map. Any variable fails at evaluation.
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        Ok(Expression {
            ast: Parser::parse_expression(input)?,
            variables: None,
        })
    }
}

impl<'v> Expression<'v> {
    /// Parses `input`, binding later lookups to `variables`.
    pub fn parse_with(input: &str, variables: &'v Variables) -> Result<Self, ParseError> {
        Ok(Expression {
            ast: Parser::parse_expression(input)?,
            variables: Some(variables),
        })
    }

    pub fn evaluate(&self) -> Result<f64, EvalError> {
        match self.variables {
            Some(variables) => self.ast.evaluate(variables),
            None => self.ast.evaluate_with(&|_| None),
        }
    }

    pub fn rebind<'w>(self, variables: &'w Variables) -> Expression<'w> {
        Expression {
            ast: self.ast,
            variables: Some(variables),
        }
    }

    pub fn ast(&self) -> &ASTNode {
        &self.ast
    }

    pub fn into_ast(self) -> ASTNode {
        self.ast
    }
}
