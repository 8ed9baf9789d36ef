mod sampling;

pub use sampling::{sample_program, SampleOptions};

use crate::ast::{ASTNode, Compiler, Parser, Program, Variables};
use crate::error::{EvalError, ParseError};
use log::debug;

pub const DEFAULT_VARIABLE: &str = "x";

/// One function entered for plotting: the text the user typed, the variable
/// it is plotted against, and the parsed tree once the text is valid.
#[derive(Debug, Clone)]
pub struct PlotFunction {
    index: usize,
    variable: String,
    raw_input: String,
    enabled: bool,
    compiled: Option<(ASTNode, Program)>,
}

impl PlotFunction {
    pub fn new(index: usize) -> Self {
        Self::with_variable(index, DEFAULT_VARIABLE)
    }

    pub fn with_variable(index: usize, variable: &str) -> Self {
        Self {
            index,
            variable: variable.to_string(),
            raw_input: String::new(),
            enabled: true,
            compiled: None,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn variable(&self) -> &str {
        &self.variable
    }

    pub fn raw_input(&self) -> &str {
        &self.raw_input
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn expression(&self) -> Option<&ASTNode> {
        self.compiled.as_ref().map(|(ast, _)| ast)
    }

    /// Parses `input` and replaces the current expression. On a parse error
    /// the previous expression and input are kept.
    pub fn set_input(&mut self, input: &str) -> Result<(), ParseError> {
        let ast = Parser::parse_expression(input)?;
        let program = Compiler::compile(&ast);
        debug!("Function {} now plots {}", self.index, ast);
        self.raw_input = input.to_string();
        self.compiled = Some((ast, program));
        Ok(())
    }

    pub fn clear(&mut self) {
        self.raw_input.clear();
        self.compiled = None;
    }

    /// Value at a single abscissa; `None` if no expression is set.
    pub fn value_at(&self, x: f64, base: &Variables) -> Option<Result<f64, EvalError>> {
        let (ast, _) = self.compiled.as_ref()?;
        let mut context = base.clone();
        context.insert(self.variable.clone(), x);
        Some(ast.evaluate(&context))
    }

    /// Points to draw. Disabled or empty functions produce none.
    pub fn sample(
        &self,
        options: &SampleOptions,
        base: &Variables,
    ) -> Result<Vec<(f64, f64)>, EvalError> {
        match &self.compiled {
            Some((_, program)) if self.enabled => {
                sample_program(program, &self.variable, options, base)
            }
            _ => Ok(Vec::new()),
        }
    }
}
