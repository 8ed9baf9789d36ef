use crate::ast::{ASTNode, Operator, Parser, Variables};
use crate::error::{EvalError, ParseError};
use crate::functions::Function;
use log::trace;

/// Enum representing instructions of a compiled program, in postfix order.
#[derive(Debug, Clone, PartialEq)]
pub enum Instruction {
    PushNumber(f64),
    LoadVariable(String),
    Negate,
    Call(Function),
    Binary(Operator),
}

impl From<Operator> for Instruction {
    fn from(value: Operator) -> Self {
        Instruction::Binary(value)
    }
}

/// Flattened form of an `ASTNode`, cheaper to run at many sample points.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    instructions: Vec<Instruction>,
    max_stack: usize,
}

impl Program {
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Deepest the value stack gets while running this program.
    pub fn max_stack(&self) -> usize {
        self.max_stack
    }

    /// Distinct variable names in order of first load.
    pub fn variables(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for instruction in &self.instructions {
            if let Instruction::LoadVariable(name) = instruction {
                if !names.contains(name) {
                    names.push(name.clone());
                }
            }
        }
        names
    }
}

pub struct Compiler;

impl Compiler {
    pub fn compile(ast: &ASTNode) -> Program {
        let mut instructions = Vec::new();
        let max_stack = Self::compile_node(ast, &mut instructions);
        Program {
            instructions,
            max_stack,
        }
    }

    pub fn compile_expression(expression: &str) -> Result<Program, ParseError> {
        let ast = Parser::parse_expression(expression)?;
        Ok(Self::compile(&ast))
    }

    /// Emits `node` and returns the stack depth needed to evaluate it.
    fn compile_node(node: &ASTNode, instructions: &mut Vec<Instruction>) -> usize {
        match node {
            ASTNode::Number(n) => {
                instructions.push(Instruction::PushNumber(*n));
                1
            }
            ASTNode::Identifier(name) => {
                instructions.push(Instruction::LoadVariable(name.clone()));
                1
            }
            ASTNode::Negate(inner) => {
                let depth = Self::compile_node(inner, instructions);
                instructions.push(Instruction::Negate);
                depth
            }
            ASTNode::FunctionCall { function, argument } => {
                let depth = Self::compile_node(argument, instructions);
                instructions.push(Instruction::Call(*function));
                depth
            }
            ASTNode::BinaryOperation {
                left,
                operator,
                right,
            } => {
                let left_depth = Self::compile_node(left, instructions);
                let right_depth = Self::compile_node(right, instructions);
                instructions.push(Instruction::from(*operator));
                left_depth.max(right_depth + 1)
            }
        }
    }
}

/// Runs compiled programs on a reusable value stack. Keep one per thread.
#[derive(Debug, Default)]
pub struct Executor {
    stack: Vec<f64>,
}

impl Executor {
    pub fn new() -> Self {
        Self { stack: Vec::new() }
    }

    pub fn execute(&mut self, program: &Program, context: &Variables) -> Result<f64, EvalError> {
        self.stack.clear();
        self.stack.reserve(program.max_stack);

        for instr in &program.instructions {
            trace!("execute {:?}", instr);
            match instr {
                Instruction::PushNumber(value) => self.stack.push(*value),
                Instruction::LoadVariable(name) => {
                    let value = context
                        .get(name)
                        .copied()
                        .ok_or_else(|| EvalError::UnresolvedVariable(name.clone()))?;
                    self.stack.push(value);
                }
                Instruction::Negate => {
                    let value = self.pop_value()?;
                    self.stack.push(-1.0 * value);
                }
                Instruction::Call(function) => {
                    let value = self.pop_value()?;
                    self.stack.push(function.apply(value));
                }
                Instruction::Binary(operator) => {
                    let right = self.pop_value()?;
                    let left = self.pop_value()?;
                    self.stack.push(operator.apply(left, right));
                }
            }
        }

        let result = self.pop_value()?;
        if !self.stack.is_empty() {
            return Err(EvalError::MalformedProgram(self.stack.len() + 1));
        }
        Ok(result)
    }

    fn pop_value(&mut self) -> Result<f64, EvalError> {
        self.stack.pop().ok_or(EvalError::StackUnderflow)
    }
}
