pub mod exponential;
pub mod trigonometric;

use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

/// Built-in unary functions, resolved from their name once at parse time.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Function {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Sec,
    Csc,
    Cot,
    Sqrt,
    Log,
    Exp,
}

impl Function {
    pub const ALL: [Function; 12] = [
        Function::Sin,
        Function::Cos,
        Function::Tan,
        Function::Asin,
        Function::Acos,
        Function::Atan,
        Function::Sec,
        Function::Csc,
        Function::Cot,
        Function::Sqrt,
        Function::Log,
        Function::Exp,
    ];

    /// Canonical name as accepted by the parser.
    pub fn name(&self) -> &'static str {
        match self {
            Function::Sin => "sin",
            Function::Cos => "cos",
            Function::Tan => "tan",
            Function::Asin => "asin",
            Function::Acos => "acos",
            Function::Atan => "atan",
            Function::Sec => "sec",
            Function::Csc => "csc",
            Function::Cot => "cot",
            Function::Sqrt => "sqrt",
            Function::Log => "log",
            Function::Exp => "exp",
        }
    }

    pub fn operation(&self) -> fn(f64) -> f64 {
        match self {
            Function::Sin => f64::sin,
            Function::Cos => f64::cos,
            Function::Tan => f64::tan,
            Function::Asin => f64::asin,
            Function::Acos => f64::acos,
            Function::Atan => f64::atan,
            Function::Sec => trigonometric::sec,
            Function::Csc => trigonometric::csc,
            Function::Cot => trigonometric::cot,
            Function::Sqrt => f64::sqrt,
            Function::Log => f64::ln,
            Function::Exp => f64::exp,
        }
    }

    pub fn apply(&self, value: f64) -> f64 {
        (self.operation())(value)
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

static FUNCTIONS: OnceLock<HashMap<&'static str, Function>> = OnceLock::new();

fn register_functions() -> HashMap<&'static str, Function> {
    let mut table = HashMap::with_capacity(Function::ALL.len() + 1);
    trigonometric::register(&mut table);
    exponential::register(&mut table);
    table
}

/// Exact, case-sensitive lookup of a function name.
pub fn lookup(name: &str) -> Option<Function> {
    FUNCTIONS.get_or_init(register_functions).get(name).copied()
}
