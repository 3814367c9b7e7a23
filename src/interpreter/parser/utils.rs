use crate::{
    error::{CompileError, CompileErrorKind},
    interpreter::{
        lexer::{Token, TokenKind},
        parser::core::ParseResult,
    },
    util::position::Position,
};

/// A cursor over the token list produced by the lexer.
///
/// Besides `peek`/`advance` the stream remembers the previously consumed token,
/// which the statement-boundary rule needs, and collects the errors recorded
/// while recovering.
pub struct TokenStream<'a> {
    tokens:     &'a [Token],
    current:    usize,
    /// Errors recorded so far; the parse fails if any are present at the end.
    pub errors: Vec<CompileError>,
}

impl<'a> TokenStream<'a> {
    /// Wraps a token list. The list is expected to end with
    /// [`TokenKind::Eof`], as [`tokenize`](crate::interpreter::lexer::tokenize)
    /// guarantees.
    #[must_use]
    pub const fn new(tokens: &'a [Token]) -> Self {
        Self { tokens,
               current: 0,
               errors: Vec::new() }
    }

    /// Returns the current token without consuming it.
    ///
    /// Past the end the stream keeps returning its last token, so a list
    /// without a trailing `Eof` cannot index out of bounds.
    #[must_use]
    pub fn peek(&self) -> &'a Token {
        let tokens: &'a [Token] = self.tokens;
        tokens.get(self.current)
              .or_else(|| tokens.last())
              .unwrap_or(&EOF)
    }

    /// Returns the kind of the current token.
    #[must_use]
    pub fn peek_kind(&self) -> &'a TokenKind {
        &self.peek().kind
    }

    /// Returns the token after the current one.
    #[must_use]
    pub fn peek_next(&self) -> &'a TokenKind {
        let tokens: &'a [Token] = self.tokens;
        tokens.get(self.current + 1)
              .map_or(&TokenKind::Eof, |token| &token.kind)
    }

    /// Returns the most recently consumed token, if any.
    #[must_use]
    pub fn previous(&self) -> Option<&'a Token> {
        let tokens: &'a [Token] = self.tokens;
        self.current.checked_sub(1).and_then(|i| tokens.get(i))
    }

    /// Consumes and returns the current token. `Eof` is never consumed.
    pub fn advance(&mut self) -> &'a Token {
        let token = self.peek();
        if !self.is_at_end() {
            self.current += 1;
        }
        token
    }

    /// Whether the current token has the given kind.
    #[must_use]
    pub fn check(&self, kind: &TokenKind) -> bool {
        self.peek_kind() == kind
    }

    /// Consumes the current token if it has the given kind.
    pub fn matches(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            return true;
        }
        false
    }

    /// Consumes a token of the given kind or fails with `message`.
    ///
    /// # Errors
    /// Returns `Expected { expected: message, found }` positioned at the
    /// offending token.
    pub fn consume(&mut self, kind: &TokenKind, message: &str) -> ParseResult<&'a Token> {
        if self.check(kind) {
            return Ok(self.advance());
        }
        Err(self.expected(message))
    }

    /// Builds an `Expected` error for the current token.
    #[must_use]
    pub fn expected(&self, message: &str) -> CompileError {
        let token = self.peek();
        CompileError::new(CompileErrorKind::Expected { expected: message.to_string(),
                                                       found:    token.describe(), },
                          token.position)
    }

    /// Builds an `UnexpectedToken` error for the current token.
    #[must_use]
    pub fn unexpected(&self) -> CompileError {
        let token = self.peek();
        CompileError::new(CompileErrorKind::UnexpectedToken(token.describe()), token.position)
    }

    /// Whether the stream is at `Eof`.
    #[must_use]
    pub fn is_at_end(&self) -> bool {
        matches!(self.peek_kind(), TokenKind::Eof)
    }

    /// Position of the current token.
    #[must_use]
    pub fn position(&self) -> Position {
        self.peek().position
    }

    /// Whether the current token starts on a later line than the one the
    /// previous token ended on.
    #[must_use]
    pub fn at_line_break(&self) -> bool {
        self.previous()
            .is_some_and(|previous| self.peek().position.line > end_line(previous))
    }

    /// Skips tokens after an error until a likely statement start.
    ///
    /// At least one token is discarded, then tokens are skipped until just
    /// after a `;` or just before a statement keyword, `}`, `khatam` or `Eof`.
    /// Nothing is discarded at `Eof` or `khatam`, nor at a `}` when
    /// `inside_block` is set, since that brace closes the enclosing block.
    pub fn synchronize(&mut self, inside_block: bool) {
        let keep = match self.peek_kind() {
            TokenKind::Eof | TokenKind::ProgramEnd => true,
            TokenKind::RBrace => inside_block,
            _ => false,
        };
        if !keep {
            self.advance();
        }
        loop {
            if matches!(self.previous(), Some(Token { kind: TokenKind::Semicolon, .. })) {
                return;
            }
            let kind = self.peek_kind();
            if kind.starts_statement()
               || matches!(kind, TokenKind::RBrace | TokenKind::ProgramEnd | TokenKind::Eof)
            {
                return;
            }
            self.advance();
        }
    }
}

static EOF: Token = Token { kind:     TokenKind::Eof,
                            lexeme:   String::new(),
                            position: Position { line: 1, column: 1 }, };

/// Line on which a token ends; string literals may span several lines.
fn end_line(token: &Token) -> usize {
    token.position.line + token.lexeme.matches('\n').count()
}

/// Ends a simple statement.
///
/// A `;` is consumed if present. Without one the statement still ends when the
/// next token is `}`, `khatam` or `Eof`, or starts on a later line than the
/// last consumed token.
///
/// # Parameters
/// - `tokens`: Token stream positioned after the statement's last token.
/// - `what`: Description of the statement for the error message.
///
/// # Errors
/// Returns `Expected ';' after <what>` when another token follows on the same
/// line.
pub(in crate::interpreter::parser) fn expect_boundary(tokens: &mut TokenStream<'_>,
                                                      what: &str)
                                                      -> ParseResult<()> {
    if tokens.matches(&TokenKind::Semicolon) || at_boundary(tokens) {
        return Ok(());
    }
    Err(tokens.expected(&format!("Expected ';' after {what}")))
}

/// Whether the current token ends a statement without consuming anything.
pub(in crate::interpreter::parser) fn at_boundary(tokens: &TokenStream<'_>) -> bool {
    matches!(tokens.peek_kind(),
             TokenKind::Semicolon | TokenKind::RBrace | TokenKind::ProgramEnd | TokenKind::Eof)
    || tokens.at_line_break()
}

/// Parses a comma-separated list of items until a closing token.
///
/// This utility is shared by array literals, argument lists, parameter lists
/// and import/export name lists. An immediately encountered closing token
/// produces an empty list.
///
/// Grammar (simplified): `list := item ("," item)*`
///
/// # Parameters
/// - `tokens`: Token stream positioned at the first item or closing token.
/// - `parse_item`: Function used to parse each list element.
/// - `closing`: The token that terminates the list (e.g., `]` or `)`).
/// - `context`: What the list belongs to, for error messages.
///
/// # Returns
/// A vector of parsed items.
///
/// # Errors
/// Returns a `CompileError` if an item fails to parse or neither `,` nor the
/// closing token follows an item.
pub(in crate::interpreter::parser) fn parse_comma_separated<T>(
    tokens: &mut TokenStream<'_>,
    parse_item: impl Fn(&mut TokenStream<'_>) -> ParseResult<T>,
    closing: &TokenKind,
    context: &str)
    -> ParseResult<Vec<T>> {
    let mut items = Vec::new();
    if tokens.matches(closing) {
        return Ok(items);
    }
    loop {
        items.push(parse_item(tokens)?);
        if tokens.matches(&TokenKind::Comma) {
            continue;
        }
        tokens.consume(closing, &format!("Expected ',' or {closing} after {context}"))?;
        return Ok(items);
    }
}

/// Parses a plain identifier and returns its name.
///
/// # Parameters
/// - `tokens`: Token stream positioned at an identifier.
/// - `message`: Error message used when something else is found.
///
/// # Errors
/// Returns a `CompileError` if the next token is not an identifier.
pub(in crate::interpreter::parser) fn parse_identifier(tokens: &mut TokenStream<'_>,
                                                       message: &str)
                                                       -> ParseResult<String> {
    if let TokenKind::Identifier(name) = tokens.peek_kind() {
        tokens.advance();
        return Ok(name.clone());
    }
    Err(tokens.expected(message))
}

/// Parses a property or method name.
///
/// Unlike variable names, property names may be spelled like keywords, so
/// `obj.print` or a method called `new` parse.
///
/// # Errors
/// Returns a `CompileError` if the next token is not a word.
pub(in crate::interpreter::parser) fn parse_property_name(tokens: &mut TokenStream<'_>,
                                                          message: &str)
                                                          -> ParseResult<String> {
    let token = tokens.peek();
    let is_word = match &token.kind {
        TokenKind::Identifier(_) => true,
        TokenKind::Number(_) | TokenKind::String(_) | TokenKind::Eof => false,
        _ => token.lexeme.chars().all(|c| c.is_ascii_alphabetic()),
    };
    if is_word {
        tokens.advance();
        return Ok(token.lexeme.clone());
    }
    Err(tokens.expected(message))
}
