use desiscript::{
    error::CompileErrorKind,
    interpreter::lexer::{Token, TokenKind, tokenize},
    util::position::Position,
};
use pretty_assertions::assert_eq;

fn kinds(source: &str) -> Vec<TokenKind> {
    tokenize(source).unwrap()
                    .into_iter()
                    .map(|token| token.kind)
                    .collect()
}

fn ident(name: &str) -> TokenKind {
    TokenKind::Identifier(name.to_string())
}

#[test]
fn hindi_and_english_keywords_share_kinds() {
    assert_eq!(kinds("rakho pakka chaap agar warna jabtak kaam wapas"),
               kinds("let const print if else while function return"));
    assert_eq!(kinds("sahi galat khali aur ya nahi"),
               kinds("true false null and or not"));
    assert_eq!(kinds("kaksha virasat nirmaan yeh upar naya"),
               kinds("class extends constructor this super new"));
    assert_eq!(kinds("sabka niji surakshit sthir lao se bhejo"),
               kinds("public private protected static import from export"));
}

#[test]
fn program_markers_have_no_english_alias() {
    assert_eq!(kinds("shuru khatam start end"),
               vec![TokenKind::ProgramStart,
                    TokenKind::ProgramEnd,
                    ident("start"),
                    ident("end"),
                    TokenKind::Eof]);
}

#[test]
fn keyword_prefixes_stay_identifiers() {
    assert_eq!(kinds("rakhoo agarwal _kaam kaam2"),
               vec![ident("rakhoo"), ident("agarwal"), ident("_kaam"), ident("kaam2"), TokenKind::Eof]);
}

#[test]
fn two_character_operators_win() {
    assert_eq!(kinds("a<=b==c!=d>=e<f>g=h!i"),
               vec![ident("a"),
                    TokenKind::LessEqual,
                    ident("b"),
                    TokenKind::EqualEqual,
                    ident("c"),
                    TokenKind::BangEqual,
                    ident("d"),
                    TokenKind::GreaterEqual,
                    ident("e"),
                    TokenKind::Less,
                    ident("f"),
                    TokenKind::Greater,
                    ident("g"),
                    TokenKind::Equal,
                    ident("h"),
                    TokenKind::Bang,
                    ident("i"),
                    TokenKind::Eof]);
}

#[test]
fn numbers_have_no_exponent_or_trailing_dot() {
    assert_eq!(kinds("3.14 42 1.x"),
               vec![TokenKind::Number(3.14),
                    TokenKind::Number(42.0),
                    TokenKind::Number(1.0),
                    TokenKind::Dot,
                    ident("x"),
                    TokenKind::Eof]);
    assert_eq!(kinds("1e5"), vec![TokenKind::Number(1.0), ident("e5"), TokenKind::Eof]);
}

#[test]
fn string_escapes_are_decoded() {
    assert_eq!(kinds(r#""a\nb" "tab\there" "say \"hi\"" "back\\slash" "keep\q""#),
               vec![TokenKind::String("a\nb".into()),
                    TokenKind::String("tab\there".into()),
                    TokenKind::String("say \"hi\"".into()),
                    TokenKind::String("back\\slash".into()),
                    TokenKind::String("keep\\q".into()),
                    TokenKind::Eof]);
}

#[test]
fn comments_are_skipped() {
    let source = "rakho x = 1; // trailing\n/* block\n   comment */ chaap x;";
    assert_eq!(kinds(source),
               vec![TokenKind::Let,
                    ident("x"),
                    TokenKind::Equal,
                    TokenKind::Number(1.0),
                    TokenKind::Semicolon,
                    TokenKind::Print,
                    ident("x"),
                    TokenKind::Semicolon,
                    TokenKind::Eof]);
}

#[test]
fn positions_track_lines_and_columns() {
    let tokens = tokenize("rakho x = 1\n  chaap x\n/* a\nb */ x").unwrap();
    let positions: Vec<_> = tokens.iter()
                                  .map(|token| (token.lexeme.as_str(), token.position))
                                  .collect();

    assert_eq!(positions,
               vec![("rakho", Position::new(1, 1)),
                    ("x", Position::new(1, 7)),
                    ("=", Position::new(1, 9)),
                    ("1", Position::new(1, 11)),
                    ("chaap", Position::new(2, 3)),
                    ("x", Position::new(2, 9)),
                    ("x", Position::new(4, 6)),
                    ("", Position::new(4, 7))]);
}

#[test]
fn newlines_inside_strings_advance_the_line() {
    let tokens = tokenize("chaap \"one\ntwo\"\nchaap 3").unwrap();
    let Token { kind, position, .. } = &tokens[3];

    assert_eq!(kind, &TokenKind::Number(3.0));
    assert_eq!(*position, Position::new(3, 7));
}

#[test]
fn unexpected_character_is_reported_with_position() {
    let error = tokenize("rakho x = 1;\nrakho y = @;").unwrap_err();

    assert_eq!(error.kind, CompileErrorKind::UnexpectedCharacter('@'));
    assert_eq!(error.position, Some(Position::new(2, 11)));
    assert_eq!(error.to_string(),
               "CompileError: Unexpected character '@' at line 2, column 11");
}

#[test]
fn unterminated_string_is_reported_at_the_quote() {
    let error = tokenize("rakho s = \"abc").unwrap_err();

    assert_eq!(error.kind, CompileErrorKind::UnterminatedString);
    assert_eq!(error.position, Some(Position::new(1, 11)));
}

#[test]
fn unterminated_comment_is_reported() {
    let error = tokenize("chaap 1; /* never closed").unwrap_err();

    assert_eq!(error.kind, CompileErrorKind::UnterminatedComment);
    assert_eq!(error.position, Some(Position::new(1, 10)));
}

#[test]
fn token_order_and_positions_never_go_backwards() {
    let source = "kaksha A {\n  nirmaan(x) { yeh.x = x; }\n}\nchaap naya A(1).x;";
    let tokens = tokenize(source).unwrap();

    assert!(tokens.windows(2)
                  .all(|pair| pair[0].position <= pair[1].position));
    assert_eq!(tokens.last().map(|token| &token.kind), Some(&TokenKind::Eof));
}

#[test]
fn token_kinds_display_their_hindi_spelling() {
    assert_eq!(TokenKind::Let.to_string(), "'rakho'");
    assert_eq!(TokenKind::LessEqual.to_string(), "'<='");
    assert_eq!(TokenKind::Eof.to_string(), "end of input");
}
