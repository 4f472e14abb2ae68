//! Depth classification of outline lines.

/// Number of leading spaces per nesting level.
pub const INDENT_WIDTH: usize = 2;

/// Counts the leading space characters of `line`.
///
/// Only `' '` counts; a tab or any other character ends the run.
pub fn leading_spaces(line: &str) -> usize {
    line.bytes().take_while(|&b| b == b' ').count()
}

/// Nesting depth of a raw line: leading spaces halved, rounded down.
///
/// Lines with 0 or 1 leading spaces have depth 0.
pub fn depth(line: &str) -> usize {
    leading_spaces(line) / INDENT_WIDTH
}
