use crate::{
    ast::{Expr, LiteralValue, Property, Span, UnaryOperator},
    interpreter::{
        lexer::TokenKind,
        parser::{
            core::{ParseResult, parse_expression},
            utils::{TokenStream, parse_comma_separated, parse_identifier, parse_property_name},
        },
    },
    util::stack::ensure_sufficient_stack,
};

/// Parses a unary expression.
///
/// Supports prefix operators:
/// - `-`  (numeric negation)
/// - `!` or `nahi` (logical not)
///
/// Unary operators are right-associative, so an input like `!-x` is parsed as
/// `!( -x )`.
///
/// Grammar:
/// ```text
///     unary := ("-" | "!" | "nahi") unary
///            | primary postfix*
/// ```
/// # Parameters
/// - `tokens`: Token stream with lookahead.
///
/// # Returns
/// An [`Expr::Unary`] or a primary expression possibly followed by postfixes.
pub(crate) fn parse_unary(tokens: &mut TokenStream<'_>) -> ParseResult<Expr> {
    let op = match tokens.peek_kind() {
        TokenKind::Minus => UnaryOperator::Negate,
        TokenKind::Bang | TokenKind::Not => UnaryOperator::Not,
        _ => {
            let primary = parse_primary(tokens)?;
            return parse_postfix(tokens, primary);
        },
    };
    let span = Span(tokens.advance().position);
    let operand = ensure_sufficient_stack(|| parse_unary(tokens))?;
    Ok(Expr::Unary { op,
                     operand: Box::new(operand),
                     span })
}

/// Parses a primary (atomic) expression.
///
/// Grammar (simplified):
/// ```text
///     primary := NUMBER | STRING | "sahi" | "galat" | "khali"
///              | IDENTIFIER | "yeh" | "upar"
///              | "naya" IDENTIFIER ("(" arguments ")")?
///              | "[" elements "]"
///              | "(" expression ")"
/// ```
/// # Parameters
/// - `tokens`: Token stream positioned at the start of a primary expression.
///
/// # Returns
/// The parsed primary [`Expr`] or a `CompileError` on failure.
pub(crate) fn parse_primary(tokens: &mut TokenStream<'_>) -> ParseResult<Expr> {
    let token = tokens.peek();
    let span = Span(token.position);

    let value = match &token.kind {
        TokenKind::Number(n) => LiteralValue::Number(*n),
        TokenKind::String(s) => LiteralValue::String(s.clone()),
        TokenKind::True => LiteralValue::Bool(true),
        TokenKind::False => LiteralValue::Bool(false),
        TokenKind::Null => LiteralValue::Null,
        TokenKind::Identifier(name) => {
            tokens.advance();
            return Ok(Expr::Identifier { name: name.clone(),
                                         span });
        },
        TokenKind::This => {
            tokens.advance();
            return Ok(Expr::This { span });
        },
        TokenKind::Super => {
            tokens.advance();
            return Ok(Expr::Super { span });
        },
        TokenKind::New => return parse_new(tokens),
        TokenKind::LBracket => return parse_array_literal(tokens),
        TokenKind::LParen => return parse_grouping(tokens),
        _ => return Err(tokens.unexpected()),
    };

    tokens.advance();
    Ok(Expr::Literal { value, span })
}

/// Parses calls, member accesses and index accesses applied to an
/// expression.
///
/// Postfixes chain freely, so `naya B().greet()` and `grid[0][1]` parse. A
/// `.` may continue the chain on the next line; a `(` or `[` there does not.
///
/// Grammar:
/// ```text
///     postfix := primary
///              | postfix "(" arguments ")"
///              | postfix "." NAME
///              | postfix "[" expression "]"
/// ```
/// # Parameters
/// - `tokens`: Token stream after a primary expression.
/// - `node`: The expression the postfixes apply to.
///
/// # Returns
/// An updated [`Expr`] with all postfix operators folded in.
///
/// # Errors
/// Returns a `CompileError` if a bracket is not closed or a `.` is not
/// followed by a name.
fn parse_postfix(tokens: &mut TokenStream<'_>, mut node: Expr) -> ParseResult<Expr> {
    loop {
        let span = Span(tokens.position());
        match tokens.peek_kind() {
            // On a new line, `(` and `[` start the next statement.
            TokenKind::LParen | TokenKind::LBracket if tokens.at_line_break() => return Ok(node),
            TokenKind::LParen => {
                tokens.advance();
                let arguments =
                    parse_comma_separated(tokens, parse_expression, &TokenKind::RParen, "arguments")?;
                node = Expr::Call { callee: Box::new(node),
                                    arguments,
                                    span };
            },
            TokenKind::Dot => {
                tokens.advance();
                let name = parse_property_name(tokens, "Expected property name after '.'")?;
                node = Expr::Member { object: Box::new(node),
                                      property: Property::Named(name),
                                      span };
            },
            TokenKind::LBracket => {
                tokens.advance();
                let index = parse_expression(tokens)?;
                tokens.consume(&TokenKind::RBracket, "Expected ']' after index")?;
                node = Expr::Member { object: Box::new(node),
                                      property: Property::Computed(Box::new(index)),
                                      span };
            },
            _ => return Ok(node),
        }
    }
}

/// Parses `naya Class(arguments)`; the argument list may be left out.
fn parse_new(tokens: &mut TokenStream<'_>) -> ParseResult<Expr> {
    let span = Span(tokens.advance().position);
    let class = parse_identifier(tokens, "Expected class name after 'naya'")?;
    let arguments = if tokens.matches(&TokenKind::LParen) {
        parse_comma_separated(tokens, parse_expression, &TokenKind::RParen, "arguments")?
    } else {
        Vec::new()
    };
    Ok(Expr::New { class,
                   arguments,
                   span })
}

/// Parses a parenthesized expression.
///
/// Grammar: `grouping := "(" expression ")"`
///
/// # Errors
/// Returns a `CompileError` if the closing `)` is missing.
fn parse_grouping(tokens: &mut TokenStream<'_>) -> ParseResult<Expr> {
    let span = Span(tokens.advance().position);
    let expr = parse_expression(tokens)?;
    tokens.consume(&TokenKind::RParen, "Expected ')' after expression")?;
    Ok(Expr::Grouping { expr: Box::new(expr),
                        span })
}

/// Parses an array literal of the form `[ expr1, expr2, ..., exprN ]`.
///
/// An empty array `[]` is accepted.
fn parse_array_literal(tokens: &mut TokenStream<'_>) -> ParseResult<Expr> {
    let span = Span(tokens.advance().position);
    let elements =
        parse_comma_separated(tokens, parse_expression, &TokenKind::RBracket, "array element")?;
    Ok(Expr::Array { elements, span })
}
