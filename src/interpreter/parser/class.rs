use std::rc::Rc;

use crate::{
    ast::{Access, ClassDecl, MethodDecl, Span},
    interpreter::{
        lexer::TokenKind,
        parser::{
            core::ParseResult,
            statement::parse_function_rest,
            utils::{TokenStream, parse_identifier, parse_property_name},
        },
    },
};

/// Parses a class declaration.
///
/// Grammar:
/// ```text
///     class  := "kaksha" IDENTIFIER ("virasat" IDENTIFIER)? "{" method* "}"
///     method := modifier* "kaam"? (NAME | "nirmaan") "(" params ")" block
///     modifier := "sabka" | "niji" | "surakshit" | "sthir"
/// ```
/// Stray `;` between methods are skipped.
///
/// # Parameters
/// - `tokens`: Token stream positioned at `kaksha`.
///
/// # Returns
/// The shared class declaration.
///
/// # Errors
/// Returns a `CompileError` on a missing name, brace or malformed method.
pub fn parse_class(tokens: &mut TokenStream<'_>) -> ParseResult<Rc<ClassDecl>> {
    let span = Span(tokens.advance().position);
    let name = parse_identifier(tokens, "Expected class name")?;
    let superclass = if tokens.matches(&TokenKind::Extends) {
        Some(parse_identifier(tokens, "Expected superclass name after 'virasat'")?)
    } else {
        None
    };

    tokens.consume(&TokenKind::LBrace, "Expected '{' before class body")?;
    let mut methods = Vec::new();
    loop {
        match tokens.peek_kind() {
            TokenKind::RBrace | TokenKind::Eof | TokenKind::ProgramEnd => break,
            TokenKind::Semicolon => {
                tokens.advance();
            },
            _ => methods.push(parse_method(tokens)?),
        }
    }
    tokens.consume(&TokenKind::RBrace, "Expected '}' after class body")?;

    Ok(Rc::new(ClassDecl { name,
                           superclass,
                           methods,
                           span }))
}

/// Parses one method with its modifiers.
fn parse_method(tokens: &mut TokenStream<'_>) -> ParseResult<MethodDecl> {
    let span = Span(tokens.position());
    let mut access = Access::Public;
    let mut is_static = false;

    // A modifier keyword directly followed by `(` is a method named like the
    // keyword, e.g. `public() { ... }`.
    while tokens.peek_next() != &TokenKind::LParen {
        match tokens.peek_kind() {
            TokenKind::Public => access = Access::Public,
            TokenKind::Private => access = Access::Private,
            TokenKind::Protected => access = Access::Protected,
            TokenKind::Static => is_static = true,
            _ => break,
        }
        tokens.advance();
    }

    if tokens.peek_kind() == &TokenKind::Function && tokens.peek_next() != &TokenKind::LParen {
        tokens.advance();
    }

    let is_constructor = tokens.matches(&TokenKind::Constructor);
    let name = if is_constructor {
        "constructor".to_string()
    } else {
        parse_property_name(tokens, "Expected method name")?
    };
    let function = parse_function_rest(tokens, name, span, "method")?;

    Ok(MethodDecl { function,
                    access,
                    is_static,
                    is_constructor })
}
