use super::Function;
use std::collections::HashMap;

/// Radical glyph accepted as an alias for `sqrt`.
pub const RADICAL: &str = "√";

pub fn register(table: &mut HashMap<&'static str, Function>) {
    table.insert(Function::Sqrt.name(), Function::Sqrt);
    table.insert(RADICAL, Function::Sqrt);
    table.insert(Function::Log.name(), Function::Log);
    table.insert(Function::Exp.name(), Function::Exp);
}
