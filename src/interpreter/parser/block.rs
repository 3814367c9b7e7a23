use crate::{
    ast::{Span, Statement},
    interpreter::{
        lexer::TokenKind,
        parser::{core::ParseResult, statement::parse_declaration, utils::TokenStream},
    },
};

/// Parses a block delimited by braces.
///
/// Statements inside the block recover independently: an error is recorded on
/// the stream, the parser synchronizes, and parsing continues with the next
/// statement or the closing `}`. Only irrecoverable errors and a missing `}`
/// propagate.
///
/// Grammar: `block := "{" declaration* "}"`
///
/// # Parameters
/// - `tokens`: Token stream positioned at the opening brace.
/// - `context`: What the block belongs to, e.g. `function body`, used in
///   error messages.
///
/// # Returns
/// The span of `{` and the statements of the block.
pub fn parse_block(tokens: &mut TokenStream<'_>,
                   context: &str)
                   -> ParseResult<(Span, Vec<Statement>)> {
    let open = tokens.consume(&TokenKind::LBrace, &format!("Expected '{{' before {context}"))?;
    let span = Span(open.position);
    let mut statements = Vec::new();

    while !matches!(tokens.peek_kind(),
                    TokenKind::RBrace | TokenKind::Eof | TokenKind::ProgramEnd)
    {
        match parse_declaration(tokens, false) {
            Ok(statement) => statements.push(statement),
            Err(error) if error.is_fatal() => return Err(error),
            Err(error) => {
                tokens.errors.push(error);
                tokens.synchronize(true);
            },
        }
    }

    tokens.consume(&TokenKind::RBrace, &format!("Expected '}}' after {context}"))?;
    Ok((span, statements))
}
