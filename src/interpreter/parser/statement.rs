use std::rc::Rc;

use crate::{
    ast::{Export, FunctionDecl, Span, Statement},
    error::{CompileError, CompileErrorKind},
    interpreter::{
        lexer::TokenKind,
        parser::{
            block::parse_block,
            class::parse_class,
            core::{ParseResult, parse_condition, parse_expression},
            utils::{
                TokenStream, at_boundary, expect_boundary, parse_comma_separated, parse_identifier,
            },
        },
    },
    util::stack::ensure_sufficient_stack,
};

/// Parses a single statement or declaration.
///
/// The leading token decides the construct:
/// - `rakho` / `pakka`: variable declaration.
/// - `kaam`: function declaration.
/// - `kaksha`: class declaration.
/// - `lao` / `bhejo`: import and export, only at the top level.
/// - `agar`, `jabtak`, `wapas`, `chaap`, `{`, `;`: the matching statement.
///
/// Anything else is parsed as an expression statement.
///
/// # Parameters
/// - `tokens`: Token stream positioned at the first token of the statement.
/// - `top_level`: Whether the statement sits directly in the program body.
///
/// # Returns
/// A parsed [`Statement`] node.
///
/// # Errors
/// Returns the first `CompileError` met inside the statement. A second `shuru`
/// is reported as an irrecoverable error.
pub fn parse_declaration(tokens: &mut TokenStream<'_>, top_level: bool) -> ParseResult<Statement> {
    ensure_sufficient_stack(|| parse_statement(tokens, top_level))
}

fn parse_statement(tokens: &mut TokenStream<'_>, top_level: bool) -> ParseResult<Statement> {
    let token = tokens.peek();
    let span = Span(token.position);

    match &token.kind {
        TokenKind::Let | TokenKind::Const => parse_variable_declaration(tokens),
        TokenKind::Function => {
            tokens.advance();
            Ok(Statement::Function(parse_function(tokens, "function")?))
        },
        TokenKind::Class => Ok(Statement::Class(parse_class(tokens)?)),
        TokenKind::Import | TokenKind::Export if !top_level => {
            Err(CompileError::new(CompileErrorKind::TopLevelOnly(token.lexeme.clone()),
                                  token.position))
        },
        TokenKind::Import => parse_import(tokens),
        TokenKind::Export => parse_export(tokens),
        TokenKind::ProgramStart => {
            Err(CompileError::new(CompileErrorKind::DuplicateProgramStart, token.position))
        },
        TokenKind::If => parse_if(tokens),
        TokenKind::While => parse_while(tokens),
        TokenKind::Return => parse_return(tokens),
        TokenKind::Print => {
            tokens.advance();
            let value = parse_expression(tokens)?;
            expect_boundary(tokens, "print statement")?;
            Ok(Statement::Print { value, span })
        },
        TokenKind::LBrace => {
            let (span, statements) = parse_block(tokens, "block")?;
            Ok(Statement::Block { statements, span })
        },
        TokenKind::Semicolon => {
            tokens.advance();
            Ok(Statement::Empty { span })
        },
        _ => {
            let expr = parse_expression(tokens)?;
            expect_boundary(tokens, "expression")?;
            Ok(Statement::Expression { expr, span })
        },
    }
}

/// Parses `rakho NAME = expr` or `pakka NAME = expr`.
///
/// The initializer is required for both forms.
fn parse_variable_declaration(tokens: &mut TokenStream<'_>) -> ParseResult<Statement> {
    let keyword = tokens.advance();
    let constant = keyword.kind == TokenKind::Const;
    let name = parse_identifier(tokens, "Expected variable name")?;
    tokens.consume(&TokenKind::Equal, "Expected '=' after variable name")?;
    let initializer = parse_expression(tokens)?;
    expect_boundary(tokens, "variable declaration")?;

    Ok(Statement::VariableDeclaration { name,
                                        constant,
                                        initializer,
                                        span: Span(keyword.position) })
}

/// Parses the part of a function after `kaam`: `NAME(params) { body }`.
///
/// Shared with class methods, which reuse the same shape.
///
/// # Parameters
/// - `tokens`: Token stream positioned at the function name.
/// - `kind`: `function` or `method`, used in error messages.
pub(in crate::interpreter::parser) fn parse_function(tokens: &mut TokenStream<'_>,
                                                     kind: &str)
                                                     -> ParseResult<Rc<FunctionDecl>> {
    let span = Span(tokens.position());
    let name = parse_identifier(tokens, &format!("Expected {kind} name"))?;
    parse_function_rest(tokens, name, span, kind)
}

/// Parses `(params) { body }` for an already-named function or method.
pub(in crate::interpreter::parser) fn parse_function_rest(tokens: &mut TokenStream<'_>,
                                                          name: String,
                                                          span: Span,
                                                          kind: &str)
                                                          -> ParseResult<Rc<FunctionDecl>> {
    tokens.consume(&TokenKind::LParen, &format!("Expected '(' after {kind} name"))?;
    let parameters = parse_comma_separated(tokens,
                                           |tokens| {
                                               parse_identifier(tokens, "Expected parameter name")
                                           },
                                           &TokenKind::RParen,
                                           "parameters")?;
    let (_, body) = parse_block(tokens, &format!("{kind} body"))?;

    Ok(Rc::new(FunctionDecl { name,
                              parameters,
                              body,
                              span }))
}

/// Parses `agar cond then (warna else)?`.
///
/// `warna agar ...` chains by nesting another `If` in the else branch.
fn parse_if(tokens: &mut TokenStream<'_>) -> ParseResult<Statement> {
    let span = Span(tokens.advance().position);
    let condition = parse_condition(tokens)?;
    let then_branch = Box::new(parse_declaration(tokens, false)?);
    let else_branch = if tokens.matches(&TokenKind::Else) {
        Some(Box::new(parse_declaration(tokens, false)?))
    } else {
        None
    };

    Ok(Statement::If { condition,
                       then_branch,
                       else_branch,
                       span })
}

/// Parses `jabtak cond body`.
fn parse_while(tokens: &mut TokenStream<'_>) -> ParseResult<Statement> {
    let span = Span(tokens.advance().position);
    let condition = parse_condition(tokens)?;
    let body = Box::new(parse_declaration(tokens, false)?);

    Ok(Statement::While { condition,
                          body,
                          span })
}

/// Parses `wapas` with an optional value.
///
/// The value is absent when a statement boundary follows the keyword
/// directly.
fn parse_return(tokens: &mut TokenStream<'_>) -> ParseResult<Statement> {
    let span = Span(tokens.advance().position);
    let value = if at_boundary(tokens) {
        None
    } else {
        Some(parse_expression(tokens)?)
    };
    expect_boundary(tokens, "return value")?;

    Ok(Statement::Return { value, span })
}

/// Parses `lao { a, b } se "path"`.
fn parse_import(tokens: &mut TokenStream<'_>) -> ParseResult<Statement> {
    let span = Span(tokens.advance().position);
    tokens.consume(&TokenKind::LBrace, "Expected '{' after 'lao'")?;
    let names = parse_comma_separated(tokens,
                                      |tokens| parse_identifier(tokens, "Expected imported name"),
                                      &TokenKind::RBrace,
                                      "imported name")?;
    tokens.consume(&TokenKind::From, "Expected 'se' after import list")?;
    let TokenKind::String(source) = tokens.peek_kind() else {
        return Err(tokens.expected("Expected module path string after 'se'"));
    };
    tokens.advance();
    expect_boundary(tokens, "import")?;

    Ok(Statement::Import { names,
                           source: source.clone(),
                           span })
}

/// Parses `bhejo <declaration>` or `bhejo { a, b }`.
fn parse_export(tokens: &mut TokenStream<'_>) -> ParseResult<Statement> {
    let span = Span(tokens.advance().position);

    let export = match tokens.peek_kind() {
        TokenKind::LBrace => {
            tokens.advance();
            let names =
                parse_comma_separated(tokens,
                                      |tokens| parse_identifier(tokens, "Expected exported name"),
                                      &TokenKind::RBrace,
                                      "exported name")?;
            expect_boundary(tokens, "export list")?;
            Export::Names(names)
        },
        TokenKind::Let | TokenKind::Const | TokenKind::Function | TokenKind::Class => {
            Export::Declaration(Box::new(parse_declaration(tokens, true)?))
        },
        _ => return Err(tokens.expected("Expected declaration or '{' after 'bhejo'")),
    };

    Ok(Statement::Export { export, span })
}
