/// Arithmetic: `+`, `-`, `*`, `/` and `%`.
pub mod arithmetic;
/// Equality and ordering comparisons.
pub mod comparison;
/// Binary expression dispatch.
pub mod core;
/// The short-circuiting `aur` and `ya`.
pub mod logic;
