/// Numeric conversion and formatting helpers.
///
/// The language has a single number type backed by `f64`. This module holds
/// the conversions between that representation and Rust integer types (array
/// indices, lengths) and the canonical way a number is rendered as text.
pub mod num;
/// Source positions.
///
/// Defines the 1-based [`position::Position`] carried by tokens, AST nodes and
/// errors, and the [`position::LineIndex`] used by the lexer to translate byte
/// offsets into line/column pairs.
pub mod position;
/// Stack growth for the recursive parser and evaluator.
pub mod stack;
