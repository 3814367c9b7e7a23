use crate::{
    ast::{BinaryOperator, Expr, Span},
    interpreter::{
        lexer::TokenKind,
        parser::{core::ParseResult, unary::parse_unary, utils::TokenStream},
    },
};

/// Maps a token to the binary operator it spells, if any.
///
/// # Example
/// ```
/// use desiscript::{
///     ast::BinaryOperator,
///     interpreter::{lexer::TokenKind, parser::binary::token_to_binary_operator},
/// };
///
/// assert_eq!(token_to_binary_operator(&TokenKind::Plus), Some(BinaryOperator::Add));
/// assert_eq!(token_to_binary_operator(&TokenKind::And), Some(BinaryOperator::And));
/// assert_eq!(token_to_binary_operator(&TokenKind::Equal), None);
/// ```
#[must_use]
pub const fn token_to_binary_operator(token: &TokenKind) -> Option<BinaryOperator> {
    match token {
        TokenKind::Plus => Some(BinaryOperator::Add),
        TokenKind::Minus => Some(BinaryOperator::Sub),
        TokenKind::Star => Some(BinaryOperator::Mul),
        TokenKind::Slash => Some(BinaryOperator::Div),
        TokenKind::Percent => Some(BinaryOperator::Mod),
        TokenKind::Less => Some(BinaryOperator::Less),
        TokenKind::Greater => Some(BinaryOperator::Greater),
        TokenKind::LessEqual => Some(BinaryOperator::LessEqual),
        TokenKind::GreaterEqual => Some(BinaryOperator::GreaterEqual),
        TokenKind::EqualEqual => Some(BinaryOperator::Equal),
        TokenKind::BangEqual => Some(BinaryOperator::NotEqual),
        TokenKind::And => Some(BinaryOperator::And),
        TokenKind::Or => Some(BinaryOperator::Or),
        _ => None,
    }
}

/// Parses one left-associative precedence level.
///
/// Operands are parsed with `next`; the loop continues while the current
/// token spells one of `operators`.
fn parse_level(tokens: &mut TokenStream<'_>,
               operators: &[BinaryOperator],
               next: fn(&mut TokenStream<'_>) -> ParseResult<Expr>)
               -> ParseResult<Expr> {
    let mut left = next(tokens)?;
    while let Some(op) = token_to_binary_operator(tokens.peek_kind())
          && operators.contains(&op)
    {
        let span = Span(tokens.advance().position);
        let right = next(tokens)?;
        left = Expr::Binary { left: Box::new(left),
                              op,
                              right: Box::new(right),
                              span };
    }
    Ok(left)
}

/// Parses logical OR expressions.
///
/// The rule is: `logical_or := logical_and ("ya" logical_and)*`
///
/// # Parameters
/// - `tokens`: Token stream.
///
/// # Returns
/// A left-associative chain of `Or` nodes.
pub fn parse_logical_or(tokens: &mut TokenStream<'_>) -> ParseResult<Expr> {
    parse_level(tokens, &[BinaryOperator::Or], parse_logical_and)
}

/// Parses logical AND expressions.
///
/// The rule is: `logical_and := equality ("aur" equality)*`
pub fn parse_logical_and(tokens: &mut TokenStream<'_>) -> ParseResult<Expr> {
    parse_level(tokens, &[BinaryOperator::And], parse_equality)
}

/// Parses `==` and `!=`.
///
/// The rule is: `equality := comparison (("==" | "!=") comparison)*`
pub fn parse_equality(tokens: &mut TokenStream<'_>) -> ParseResult<Expr> {
    parse_level(tokens,
                &[BinaryOperator::Equal, BinaryOperator::NotEqual],
                parse_comparison)
}

/// Parses relational operators.
///
/// The rule is: `comparison := additive (("<" | "<=" | ">" | ">=") additive)*`
pub fn parse_comparison(tokens: &mut TokenStream<'_>) -> ParseResult<Expr> {
    parse_level(tokens,
                &[BinaryOperator::Less,
                  BinaryOperator::LessEqual,
                  BinaryOperator::Greater,
                  BinaryOperator::GreaterEqual],
                parse_additive)
}

/// Parses addition and subtraction expressions.
///
/// The rule is: `additive := multiplicative (("+" | "-") multiplicative)*`
///
/// # Parameters
/// - `tokens`: Token stream.
///
/// # Returns
/// An `Expr::Binary` tree representing the parsed expression.
pub fn parse_additive(tokens: &mut TokenStream<'_>) -> ParseResult<Expr> {
    parse_level(tokens,
                &[BinaryOperator::Add, BinaryOperator::Sub],
                parse_multiplicative)
}

/// Parses multiplication-level expressions.
///
/// The rule is: `multiplicative := unary (("*" | "/" | "%") unary)*`
pub fn parse_multiplicative(tokens: &mut TokenStream<'_>) -> ParseResult<Expr> {
    parse_level(tokens,
                &[BinaryOperator::Mul, BinaryOperator::Div, BinaryOperator::Mod],
                parse_unary)
}
