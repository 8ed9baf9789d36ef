use thiserror::Error;

/// Failure while turning input text into a tree. Positions are character
/// indices into the normalized input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unexpected char '{ch}' at position {position}")]
    UnexpectedChar { ch: char, position: usize },

    #[error("unexpected end of input at position {position}")]
    UnexpectedEnd { position: usize },

    #[error("invalid number '{literal}' at position {position}")]
    InvalidNumber { literal: String, position: usize },

    #[error("function '{function}' is missing its argument at position {position}")]
    MissingArgument { function: String, position: usize },

    #[error("expression nested deeper than {limit} levels at position {position}")]
    TooDeep { limit: usize, position: usize },
}

impl ParseError {
    pub fn position(&self) -> usize {
        match self {
            ParseError::UnexpectedChar { position, .. }
            | ParseError::UnexpectedEnd { position }
            | ParseError::InvalidNumber { position, .. }
            | ParseError::MissingArgument { position, .. }
            | ParseError::TooDeep { position, .. } => *position,
        }
    }
}

/// Failure while evaluating an already parsed tree or compiled program.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    #[error("Identifier '{0}' not found in context")]
    UnresolvedVariable(String),

    #[error("Stack underflow while executing program")]
    StackUnderflow,

    #[error("Program finished with {0} values on the stack")]
    MalformedProgram(usize),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Evaluation error: {0}")]
    Eval(#[from] EvalError),
}
