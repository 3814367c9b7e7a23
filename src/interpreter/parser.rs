use tracing::debug;

use crate::{
    ast::Program,
    error::{CompileError, CompileErrorKind, Diagnostics},
    interpreter::{
        lexer::{Token, TokenKind},
        parser::{statement::parse_declaration, utils::TokenStream},
    },
};

/// Binary operator parsing.
///
/// Implements the left-associative precedence levels from logical OR down to
/// multiplication.
pub mod binary;

/// Block parsing with per-statement recovery.
pub mod block;

/// Class declarations and their methods.
pub mod class;

/// Expression entry points and assignment.
pub mod core;

/// Statement and declaration parsing.
pub mod statement;

/// Unary operators, postfix chains and primary expressions.
pub mod unary;

/// The token cursor and shared parsing helpers.
pub mod utils;

/// Parses a token list into a [`Program`].
///
/// The whole token stream may be wrapped in one `shuru` ... `khatam` pair.
/// Statements that fail to parse are recorded and skipped, so one call reports
/// every recoverable error. Marker errors (an unmatched or repeated marker, or
/// tokens after `khatam`) stop the parse immediately.
///
/// # Parameters
/// - `tokens`: Tokens from [`tokenize`](crate::interpreter::lexer::tokenize),
///   ending with `Eof`.
///
/// # Returns
/// The parsed program.
///
/// # Errors
/// Returns all recorded `CompileError`s, in source order, as [`Diagnostics`].
///
/// # Example
/// ```
/// use desiscript::interpreter::{lexer::tokenize, parser::parse};
///
/// let tokens = tokenize("rakho = 1;\nchaap 2;\nrakho y 3;").unwrap();
/// let diagnostics = parse(&tokens).unwrap_err();
///
/// assert_eq!(diagnostics.len(), 2);
/// ```
pub fn parse(tokens: &[Token]) -> Result<Program, Diagnostics> {
    let mut stream = TokenStream::new(tokens);
    let markers = stream.matches(&TokenKind::ProgramStart);
    let mut body = Vec::new();

    loop {
        let token = stream.peek();
        let fatal = match token.kind {
            TokenKind::Eof if markers => CompileErrorKind::MissingProgramEnd,
            TokenKind::Eof => break,
            TokenKind::ProgramEnd if !markers => CompileErrorKind::MissingProgramStart,
            TokenKind::ProgramEnd => {
                stream.advance();
                if stream.is_at_end() {
                    break;
                }
                CompileErrorKind::TrailingTokens(stream.peek().describe())
            },
            _ => match parse_declaration(&mut stream, true) {
                Ok(statement) => {
                    body.push(statement);
                    continue;
                },
                Err(error) if error.is_fatal() => {
                    stream.errors.push(error);
                    return Err(Diagnostics(stream.errors));
                },
                Err(error) => {
                    debug!(%error, "recovering from parse error");
                    stream.errors.push(error);
                    stream.synchronize(false);
                    continue;
                },
            },
        };
        stream.errors.push(CompileError::new(fatal, stream.position()));
        return Err(Diagnostics(stream.errors));
    }

    if stream.errors.is_empty() {
        Ok(Program { body, markers })
    } else {
        Err(Diagnostics(stream.errors))
    }
}
