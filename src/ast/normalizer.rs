use crate::functions::exponential::RADICAL;

/// Glyph inserted by calculator keypads for an n-th root, e.g. `27ⁿ√x3`.
pub const NTH_ROOT: &str = "ⁿ√x";

/// Operator character the grammar uses for `left ^ (1 / right)`.
pub const ROOT_OPERATOR: char = '@';

/// Rewrites keypad glyphs into the plain operators the grammar understands.
///
/// Spaces are stripped, then the n-th root glyph, the bare radical and the
/// multiplication/division signs are replaced, in that order. Nothing else is
/// touched.
pub fn normalize_input(input: &str) -> String {
    input
        .replace(' ', "")
        .replace(NTH_ROOT, "@")
        .replace(RADICAL, "sqrt")
        .replace('×', "*")
        .replace('÷', "/")
}
