use crate::{
    ast::{Expr, Span},
    error::CompileError,
    interpreter::{
        lexer::TokenKind,
        parser::{binary::parse_logical_or, utils::TokenStream},
    },
    util::stack::ensure_sufficient_stack,
};

pub type ParseResult<T> = Result<T, CompileError>;

/// Parses a full expression.
///
/// This is the entry point for expression parsing. It begins at the
/// lowest-precedence level, assignment, and recursively descends through the
/// precedence hierarchy.
///
/// Grammar: `expression := assignment`
///
/// # Parameters
/// - `tokens`: Token stream positioned at the first token of the expression.
///
/// # Returns
/// The parsed expression node.
pub fn parse_expression(tokens: &mut TokenStream<'_>) -> ParseResult<Expr> {
    ensure_sufficient_stack(|| parse_assignment(tokens))
}

/// Parses an assignment, which is right-associative.
///
/// Any expression is accepted as the target here; whether it can actually be
/// assigned to is decided when the assignment runs.
///
/// Grammar: `assignment := logical_or ("=" assignment)?`
///
/// # Parameters
/// - `tokens`: Token stream.
///
/// # Returns
/// An `Expr::Assign`, or the plain `logical_or` expression when no `=`
/// follows.
pub fn parse_assignment(tokens: &mut TokenStream<'_>) -> ParseResult<Expr> {
    let target = parse_logical_or(tokens)?;

    if tokens.check(&TokenKind::Equal) {
        let span = Span(tokens.advance().position);
        let value = parse_assignment(tokens)?;
        return Ok(Expr::Assign { target: Box::new(target),
                                 value: Box::new(value),
                                 span });
    }

    Ok(target)
}

/// Parses the condition of `agar` and `jabtak`.
///
/// Conditions may be written bare or in parentheses. A single outer pair of
/// parentheses is not kept in the tree, so `agar (x)` and `agar x` parse alike.
pub fn parse_condition(tokens: &mut TokenStream<'_>) -> ParseResult<Expr> {
    match parse_expression(tokens)? {
        Expr::Grouping { expr, .. } => Ok(*expr),
        condition => Ok(condition),
    }
}
