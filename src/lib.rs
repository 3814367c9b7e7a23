//! # desiscript
//!
//! desiscript is a small scripting language with Hindi keyword spellings
//! (`rakho`, `chaap`, `agar`, `jabtak`, `kaksha`, ...) and English aliases for
//! each of them. This crate contains its lexer, recursive-descent parser and
//! tree-walking interpreter, with closures, classes with single inheritance,
//! `upar`/`yeh`, static and access-controlled methods, loop and recursion
//! ceilings, and modules.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

/// Defines the structure of parsed code.
///
/// This module declares the `Statement` and `Expr` enums that represent the
/// syntactic structure of a program as a tree. The AST is built by the parser
/// and traversed by the evaluator.
///
/// # Responsibilities
/// - Defines statement and expression types for all language constructs.
/// - Attaches source positions to AST nodes for error reporting.
/// - Prints any tree back as canonical source text.
pub mod ast;
/// Provides unified error types for parsing and evaluation.
///
/// This module defines all errors that can be raised while lexing, parsing or
/// evaluating code. Every error carries a kind and, where known, the position
/// of the construct that caused it.
///
/// # Responsibilities
/// - Defines error enums for all failure modes (lexer, parser, evaluator).
/// - Formats errors as `<Kind>: <message> at line L, column C`.
/// - Keeps the output printed before a runtime failure.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together lexing, parsing, evaluation, value
/// representations and module loading.
///
/// # Responsibilities
/// - Coordinates all core components: lexer, parser, evaluator and value
///   types.
/// - Provides entry points for parsing and evaluating user code.
pub mod interpreter;
/// Running programs with a chosen configuration.
pub mod session;
/// General utilities for positions and numbers.
///
/// # Responsibilities
/// - Maps byte offsets to lines and columns.
/// - Safely converts between `usize` and `f64` and formats numbers the way
///   programs print them.
pub mod util;

pub use error::Error;
pub use interpreter::evaluator::core::Limits;
pub use session::Session;

/// Runs a program with the default configuration and returns what it printed.
///
/// Each print statement contributes exactly one line. Imports resolve against
/// the current directory.
///
/// # Errors
/// Returns [`Error::Compile`] if the source does not parse, or
/// [`Error::Runtime`] if evaluation fails. A runtime error keeps the lines
/// printed before it.
///
/// # Examples
/// ```
/// use desiscript::interpret;
///
/// let output = interpret("shuru\nrakho x = 10\nchaap \"Value: \" + x\nkhatam").unwrap();
/// assert_eq!(output, ["Value: 10"]);
///
/// // Output printed before a runtime error is kept.
/// let error = interpret("chaap 1;\nchaap y;").unwrap_err();
/// assert_eq!(error.output(), ["1"]);
/// assert_eq!(error.to_string(), "RuntimeError: 'y' is not defined at line 2, column 7");
/// ```
pub fn interpret(source: &str) -> Result<Vec<String>, Error> {
    Session::new().run(source)
}
