pub mod ast;
pub mod error;
pub mod functions;
pub mod plot;

pub use ast::{ASTNode, Expression, Variables};
pub use error::{Error, EvalError, ParseError};

/// Parses `expression` with no variable map attached.
pub fn evaluate(expression: &str) -> Result<Expression<'static>, ParseError> {
    Expression::parse(expression)
}

/// Parses `expression`; the result reads `variables` each time it is evaluated.
pub fn evaluate_with<'v>(
    expression: &str,
    variables: &'v Variables,
) -> Result<Expression<'v>, ParseError> {
    Expression::parse_with(expression, variables)
}

/// Parses and evaluates once.
pub fn evaluate_expression(expression: &str, context: &Variables) -> Result<f64, Error> {
    let ast = ast::Parser::parse_expression(expression)?;
    Ok(ast.evaluate(context)?)
}
