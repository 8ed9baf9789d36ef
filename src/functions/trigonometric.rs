use super::Function;
use std::collections::HashMap;

pub fn register(table: &mut HashMap<&'static str, Function>) {
    for function in [
        Function::Sin,
        Function::Cos,
        Function::Tan,
        Function::Asin,
        Function::Acos,
        Function::Atan,
        Function::Sec,
        Function::Csc,
        Function::Cot,
    ] {
        table.insert(function.name(), function);
    }
}

pub fn sec(x: f64) -> f64 {
    1.0 / x.cos()
}

pub fn csc(x: f64) -> f64 {
    1.0 / x.sin()
}

pub fn cot(x: f64) -> f64 {
    1.0 / x.tan()
}
