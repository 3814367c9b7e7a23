use thiserror::Error;

use crate::util::position::Position;

/// Compile-time errors.
///
/// Defines the errors raised while turning source text into a syntax tree:
/// unexpected characters, unterminated literals, unexpected or missing tokens
/// and malformed program markers. [`Diagnostics`] groups every error a single
/// parse produced.
pub mod compile_error;
/// Runtime errors.
///
/// Contains all error types that can be raised while a program runs, such as
/// undefined names, reassigned constants, division by zero, calling a value
/// that is not callable, or exceeding the loop and recursion ceilings.
pub mod runtime_error;

pub use compile_error::{CompileError, CompileErrorKind, Diagnostics};
pub use runtime_error::{RuntimeError, RuntimeErrorKind};

/// The error returned by the embedding entry points.
///
/// A compile failure means nothing ran. A runtime failure keeps the output
/// lines printed before the failing statement, so hosts can show them next
/// to the error.
#[derive(Debug, Error)]
pub enum Error {
    /// Lexing or parsing failed.
    #[error(transparent)]
    Compile(#[from] Diagnostics),
    /// Evaluation failed after `output` had been printed.
    #[error("{error}")]
    Runtime {
        /// The error that aborted evaluation.
        error:  RuntimeError,
        /// Lines printed before the error.
        output: Vec<String>,
    },
}

impl Error {
    /// Returns the lines printed before the failure (empty for compile
    /// errors).
    #[must_use]
    pub fn output(&self) -> &[String] {
        match self {
            Self::Compile(_) => &[],
            Self::Runtime { output, .. } => output,
        }
    }
}

impl From<CompileError> for Error {
    fn from(error: CompileError) -> Self {
        Self::Compile(error.into())
    }
}

/// Formats the ` at line L, column C` suffix shared by both error kinds.
pub(crate) fn position_suffix(position: &Option<Position>) -> String {
    position.map(|position| format!(" at {position}")).unwrap_or_default()
}
