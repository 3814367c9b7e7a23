/// Binary operator evaluation logic.
///
/// Handles arithmetic, string concatenation, comparisons and the
/// short-circuiting logical operators.
pub mod binary;

/// Block evaluation.
///
/// Runs statement lists in a given scope and restores the previous scope on
/// every exit path.
pub mod block;

/// Class declarations, `naya` and `upar`.
pub mod class;

/// Core evaluation logic and interpreter state.
///
/// Contains the `Interpreter` struct, the runtime limits, the expression
/// dispatcher and name resolution.
pub mod core;

/// The call protocol for functions, methods and constructors.
pub mod function;

/// Module imports and the export table.
pub mod import;

/// Member access, index access and assignment.
pub mod member;

/// Statement execution and `jabtak` loops.
pub mod statement;

/// Unary operator evaluation logic.
pub mod unary;
