use std::fmt;

use thiserror::Error;

use crate::{error::position_suffix, util::position::Position};

/// Describes what went wrong while lexing or parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileErrorKind {
    /// A character that cannot start any token.
    #[error("Unexpected character '{0}'")]
    UnexpectedCharacter(char),
    /// A string literal without its closing quote.
    #[error("Unterminated string")]
    UnterminatedString,
    /// A block comment without its closing `*/`.
    #[error("Unterminated comment")]
    UnterminatedComment,
    /// A numeric literal that does not fit the number type.
    #[error("Invalid number literal '{0}'")]
    InvalidNumber(String),
    /// A token that cannot start or continue the construct being parsed.
    #[error("Unexpected token {0}")]
    UnexpectedToken(String),
    /// A required token was not found.
    #[error("{expected}, found {found}")]
    Expected {
        /// What the parser needed, e.g. `Expected ')' after arguments`.
        expected: String,
        /// Description of the token that was found instead.
        found:    String,
    },
    /// `import`/`export` used inside a block or function body.
    #[error("'{0}' is only allowed at the top level")]
    TopLevelOnly(String),
    /// The program-end marker appeared without a program-start marker.
    #[error("Found 'khatam' without a matching 'shuru'")]
    MissingProgramStart,
    /// The program-start marker was never closed.
    #[error("Expected 'khatam' to end the program")]
    MissingProgramEnd,
    /// A second program-start marker.
    #[error("Program already started with 'shuru'")]
    DuplicateProgramStart,
    /// Tokens after the program-end marker.
    #[error("Unexpected {0} after 'khatam'")]
    TrailingTokens(String),
}

/// A lexical or syntactic error, with the position it was detected at.
///
/// Displays as `CompileError: <message>` followed by ` at line L, column C`
/// when the position is known.
///
/// # Example
/// ```
/// use desiscript::{
///     error::{CompileError, CompileErrorKind},
///     util::position::Position,
/// };
///
/// let error = CompileError::new(CompileErrorKind::UnterminatedString, Position::new(2, 5));
/// assert_eq!(error.to_string(), "CompileError: Unterminated string at line 2, column 5");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("CompileError: {kind}{}", position_suffix(.position))]
pub struct CompileError {
    /// What went wrong.
    pub kind:     CompileErrorKind,
    /// Where it went wrong, if known.
    pub position: Option<Position>,
}

impl CompileError {
    /// Creates an error at a known position.
    #[must_use]
    pub const fn new(kind: CompileErrorKind, position: Position) -> Self {
        Self { kind,
               position: Some(position) }
    }

    /// Returns the message without the kind prefix or position.
    #[must_use]
    pub fn message(&self) -> String {
        self.kind.to_string()
    }

    /// Whether the error aborts the whole parse instead of a single
    /// statement.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(self.kind,
                 CompileErrorKind::MissingProgramStart
                 | CompileErrorKind::MissingProgramEnd
                 | CompileErrorKind::DuplicateProgramStart
                 | CompileErrorKind::TrailingTokens(_))
    }
}

/// Every compile error produced by one parse, in source order.
///
/// The parser recovers after a malformed statement, so a single run can report
/// several independent problems. Displays one error per line.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Diagnostics(pub Vec<CompileError>);

impl Diagnostics {
    /// The first error, which is the one a caller usually reports.
    #[must_use]
    pub fn first(&self) -> Option<&CompileError> {
        self.0.first()
    }

    /// Iterates over all errors.
    pub fn iter(&self) -> std::slice::Iter<'_, CompileError> {
        self.0.iter()
    }

    /// Number of errors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no error was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<CompileError> for Diagnostics {
    fn from(error: CompileError) -> Self {
        Self(vec![error])
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type IntoIter = std::slice::Iter<'a, CompileError>;
    type Item = &'a CompileError;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for Diagnostics {}
