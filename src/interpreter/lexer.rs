use std::fmt;

use logos::Logos;

use crate::{
    error::{CompileError, CompileErrorKind},
    util::position::{LineIndex, Position},
};

/// The raw lexical grammar, matched by `logos`.
///
/// Words are not split into keywords here; [`keyword`] classifies them
/// afterwards so every spelling lives in one table.
#[derive(Logos, Debug, PartialEq, Clone)]
enum RawToken {
    #[regex(r"[ \t\r\n\f]+", logos::skip)]
    Whitespace,
    /// `// Comments.`
    #[regex(r"//[^\n]*", logos::skip, allow_greedy = true)]
    LineComment,
    /// `/* Block comments. */`
    #[regex(r"/\*([^*]|\*+[^*/])*\*+/", logos::skip, allow_greedy = true)]
    BlockComment,
    /// A `/*` that never finds its `*/`.
    #[token("/*")]
    UnterminatedComment,
    #[regex(r"[0-9]+(\.[0-9]+)?")]
    Number,
    #[regex(r#""([^"\\]|\\(.|\n))*""#, allow_greedy = true)]
    String,
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Word,
    #[token("==")]
    EqualEqual,
    #[token("!=")]
    BangEqual,
    #[token("<=")]
    LessEqual,
    #[token(">=")]
    GreaterEqual,
    #[token("=")]
    Equal,
    #[token("!")]
    Bang,
    #[token("<")]
    Less,
    #[token(">")]
    Greater,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
    #[token(";")]
    Semicolon,
}

/// The kind of a lexical token.
///
/// Keyword kinds are semantic: the Hindi spelling and its English alias (for
/// example `rakho` and `let`) both produce [`TokenKind::Let`].
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    /// Numeric literal such as `42` or `3.14`.
    Number(f64),
    /// String literal with escapes already applied.
    String(String),
    /// A name that is not a keyword.
    Identifier(String),

    /// `shuru`
    ProgramStart,
    /// `khatam`
    ProgramEnd,
    /// `rakho` / `let`
    Let,
    /// `pakka` / `const`
    Const,
    /// `chaap` / `print`
    Print,
    /// `agar` / `if`
    If,
    /// `warna` / `else`
    Else,
    /// `jabtak` / `while`
    While,
    /// `kaam` / `function`
    Function,
    /// `wapas` / `return`
    Return,
    /// `sahi` / `true`
    True,
    /// `galat` / `false`
    False,
    /// `khali` / `null`
    Null,
    /// `aur` / `and`
    And,
    /// `ya` / `or`
    Or,
    /// `nahi` / `not`
    Not,
    /// `kaksha` / `class`
    Class,
    /// `virasat` / `extends`
    Extends,
    /// `nirmaan` / `constructor`
    Constructor,
    /// `yeh` / `this`
    This,
    /// `upar` / `super`
    Super,
    /// `naya` / `new`
    New,
    /// `sabka` / `public`
    Public,
    /// `niji` / `private`
    Private,
    /// `surakshit` / `protected`
    Protected,
    /// `sthir` / `static`
    Static,
    /// `lao` / `import`
    Import,
    /// `se` / `from`
    From,
    /// `bhejo` / `export`
    Export,

    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Star,
    /// `/`
    Slash,
    /// `%`
    Percent,
    /// `=`
    Equal,
    /// `==`
    EqualEqual,
    /// `!=`
    BangEqual,
    /// `!`
    Bang,
    /// `<`
    Less,
    /// `<=`
    LessEqual,
    /// `>`
    Greater,
    /// `>=`
    GreaterEqual,
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `{`
    LBrace,
    /// `}`
    RBrace,
    /// `[`
    LBracket,
    /// `]`
    RBracket,
    /// `,`
    Comma,
    /// `.`
    Dot,
    /// `;`
    Semicolon,
    /// End of input.
    Eof,
}

/// The keyword table: every accepted spelling and the kind it produces.
const KEYWORDS: &[(&str, TokenKind)] = &[("shuru", TokenKind::ProgramStart),
                                         ("khatam", TokenKind::ProgramEnd),
                                         ("rakho", TokenKind::Let),
                                         ("let", TokenKind::Let),
                                         ("pakka", TokenKind::Const),
                                         ("const", TokenKind::Const),
                                         ("chaap", TokenKind::Print),
                                         ("print", TokenKind::Print),
                                         ("agar", TokenKind::If),
                                         ("if", TokenKind::If),
                                         ("warna", TokenKind::Else),
                                         ("else", TokenKind::Else),
                                         ("jabtak", TokenKind::While),
                                         ("while", TokenKind::While),
                                         ("kaam", TokenKind::Function),
                                         ("function", TokenKind::Function),
                                         ("wapas", TokenKind::Return),
                                         ("return", TokenKind::Return),
                                         ("sahi", TokenKind::True),
                                         ("true", TokenKind::True),
                                         ("galat", TokenKind::False),
                                         ("false", TokenKind::False),
                                         ("khali", TokenKind::Null),
                                         ("null", TokenKind::Null),
                                         ("aur", TokenKind::And),
                                         ("and", TokenKind::And),
                                         ("ya", TokenKind::Or),
                                         ("or", TokenKind::Or),
                                         ("nahi", TokenKind::Not),
                                         ("not", TokenKind::Not),
                                         ("kaksha", TokenKind::Class),
                                         ("class", TokenKind::Class),
                                         ("virasat", TokenKind::Extends),
                                         ("extends", TokenKind::Extends),
                                         ("nirmaan", TokenKind::Constructor),
                                         ("constructor", TokenKind::Constructor),
                                         ("yeh", TokenKind::This),
                                         ("this", TokenKind::This),
                                         ("upar", TokenKind::Super),
                                         ("super", TokenKind::Super),
                                         ("naya", TokenKind::New),
                                         ("new", TokenKind::New),
                                         ("sabka", TokenKind::Public),
                                         ("public", TokenKind::Public),
                                         ("niji", TokenKind::Private),
                                         ("private", TokenKind::Private),
                                         ("surakshit", TokenKind::Protected),
                                         ("protected", TokenKind::Protected),
                                         ("sthir", TokenKind::Static),
                                         ("static", TokenKind::Static),
                                         ("lao", TokenKind::Import),
                                         ("import", TokenKind::Import),
                                         ("se", TokenKind::From),
                                         ("from", TokenKind::From),
                                         ("bhejo", TokenKind::Export),
                                         ("export", TokenKind::Export)];

/// Looks a word up in the keyword table.
///
/// # Example
/// ```
/// use desiscript::interpreter::lexer::{TokenKind, keyword};
///
/// assert_eq!(keyword("rakho"), Some(TokenKind::Let));
/// assert_eq!(keyword("let"), Some(TokenKind::Let));
/// assert_eq!(keyword("rakhoo"), None);
/// ```
#[must_use]
pub fn keyword(word: &str) -> Option<TokenKind> {
    KEYWORDS.iter()
            .find(|(spelling, _)| *spelling == word)
            .map(|(_, kind)| kind.clone())
}

impl TokenKind {
    /// Whether this kind can begin a statement; the parser resynchronizes on
    /// these after an error.
    #[must_use]
    pub const fn starts_statement(&self) -> bool {
        matches!(self,
                 Self::Let
                 | Self::Const
                 | Self::Print
                 | Self::If
                 | Self::While
                 | Self::Function
                 | Self::Return
                 | Self::Class
                 | Self::Import
                 | Self::Export)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            Self::Number(n) => return write!(f, "number {n}"),
            Self::String(s) => return write!(f, "string {s:?}"),
            Self::Identifier(name) => return write!(f, "identifier '{name}'"),
            Self::Eof => return write!(f, "end of input"),
            Self::ProgramStart => "shuru",
            Self::ProgramEnd => "khatam",
            Self::Let => "rakho",
            Self::Const => "pakka",
            Self::Print => "chaap",
            Self::If => "agar",
            Self::Else => "warna",
            Self::While => "jabtak",
            Self::Function => "kaam",
            Self::Return => "wapas",
            Self::True => "sahi",
            Self::False => "galat",
            Self::Null => "khali",
            Self::And => "aur",
            Self::Or => "ya",
            Self::Not => "nahi",
            Self::Class => "kaksha",
            Self::Extends => "virasat",
            Self::Constructor => "nirmaan",
            Self::This => "yeh",
            Self::Super => "upar",
            Self::New => "naya",
            Self::Public => "sabka",
            Self::Private => "niji",
            Self::Protected => "surakshit",
            Self::Static => "sthir",
            Self::Import => "lao",
            Self::From => "se",
            Self::Export => "bhejo",
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Star => "*",
            Self::Slash => "/",
            Self::Percent => "%",
            Self::Equal => "=",
            Self::EqualEqual => "==",
            Self::BangEqual => "!=",
            Self::Bang => "!",
            Self::Less => "<",
            Self::LessEqual => "<=",
            Self::Greater => ">",
            Self::GreaterEqual => ">=",
            Self::LParen => "(",
            Self::RParen => ")",
            Self::LBrace => "{",
            Self::RBrace => "}",
            Self::LBracket => "[",
            Self::RBracket => "]",
            Self::Comma => ",",
            Self::Dot => ".",
            Self::Semicolon => ";",
        };
        write!(f, "'{symbol}'")
    }
}

/// A lexical token: its kind, the exact source text, and where it starts.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// The token kind, including literal payloads.
    pub kind:     TokenKind,
    /// The source text the token was read from (empty for [`TokenKind::Eof`]).
    pub lexeme:   String,
    /// Position of the first character.
    pub position: Position,
}

impl Token {
    /// Describes the token for error messages, e.g. `'rakho'` or
    /// `end of input`.
    #[must_use]
    pub fn describe(&self) -> String {
        match self.kind {
            TokenKind::Eof => "end of input".to_string(),
            TokenKind::String(_) => format!("string {:?}", self.lexeme),
            _ => format!("'{}'", self.lexeme),
        }
    }
}

/// Converts source text into a flat list of tokens ending with
/// [`TokenKind::Eof`].
///
/// Whitespace and comments are skipped. Words are classified through the
/// keyword table, two-character operators win over their one-character
/// prefixes, and string escapes (`\n`, `\t`, `\r`, `\0`, `\"`, `\\`) are
/// decoded.
///
/// # Errors
/// Returns a `CompileError` for a character that cannot start a token, an
/// unterminated string or an unterminated block comment.
///
/// # Example
/// ```
/// use desiscript::interpreter::lexer::{TokenKind, tokenize};
///
/// let tokens = tokenize("rakho x = 10;").unwrap();
/// let kinds: Vec<_> = tokens.into_iter().map(|t| t.kind).collect();
///
/// assert_eq!(kinds,
///            vec![TokenKind::Let,
///                 TokenKind::Identifier("x".into()),
///                 TokenKind::Equal,
///                 TokenKind::Number(10.0),
///                 TokenKind::Semicolon,
///                 TokenKind::Eof]);
/// ```
pub fn tokenize(source: &str) -> Result<Vec<Token>, CompileError> {
    let index = LineIndex::new(source);
    let mut lexer = RawToken::lexer(source);
    let mut tokens = Vec::new();

    while let Some(raw) = lexer.next() {
        let slice = lexer.slice();
        let position = index.position(lexer.span().start);

        let Ok(raw) = raw else {
            return Err(lex_error(&source[lexer.span().start..], position));
        };

        let kind = match raw {
            RawToken::Whitespace | RawToken::LineComment | RawToken::BlockComment => continue,
            RawToken::UnterminatedComment => {
                return Err(CompileError::new(CompileErrorKind::UnterminatedComment, position));
            },
            RawToken::Number => {
                let value = slice.parse::<f64>().ok().filter(|n| n.is_finite()).ok_or_else(|| {
                    CompileError::new(CompileErrorKind::InvalidNumber(slice.to_string()), position)
                })?;
                TokenKind::Number(value)
            },
            RawToken::String => TokenKind::String(unescape(&slice[1..slice.len() - 1])),
            RawToken::Word => {
                keyword(slice).unwrap_or_else(|| TokenKind::Identifier(slice.to_string()))
            },
            RawToken::EqualEqual => TokenKind::EqualEqual,
            RawToken::BangEqual => TokenKind::BangEqual,
            RawToken::LessEqual => TokenKind::LessEqual,
            RawToken::GreaterEqual => TokenKind::GreaterEqual,
            RawToken::Equal => TokenKind::Equal,
            RawToken::Bang => TokenKind::Bang,
            RawToken::Less => TokenKind::Less,
            RawToken::Greater => TokenKind::Greater,
            RawToken::Plus => TokenKind::Plus,
            RawToken::Minus => TokenKind::Minus,
            RawToken::Star => TokenKind::Star,
            RawToken::Slash => TokenKind::Slash,
            RawToken::Percent => TokenKind::Percent,
            RawToken::LParen => TokenKind::LParen,
            RawToken::RParen => TokenKind::RParen,
            RawToken::LBrace => TokenKind::LBrace,
            RawToken::RBrace => TokenKind::RBrace,
            RawToken::LBracket => TokenKind::LBracket,
            RawToken::RBracket => TokenKind::RBracket,
            RawToken::Comma => TokenKind::Comma,
            RawToken::Dot => TokenKind::Dot,
            RawToken::Semicolon => TokenKind::Semicolon,
        };

        tokens.push(Token { kind,
                            lexeme: slice.to_string(),
                            position });
    }

    tokens.push(Token { kind:     TokenKind::Eof,
                        lexeme:   String::new(),
                        position: index.position(source.len()), });
    Ok(tokens)
}

/// Classifies the input `logos` could not match, given the rest of the source
/// from the failing offset.
fn lex_error(rest: &str, position: Position) -> CompileError {
    if rest.starts_with("/*") {
        return CompileError::new(CompileErrorKind::UnterminatedComment, position);
    }
    let kind = match rest.chars().next() {
        Some('"') => CompileErrorKind::UnterminatedString,
        Some(c) => CompileErrorKind::UnexpectedCharacter(c),
        None => CompileErrorKind::UnexpectedToken("end of input".to_string()),
    };
    CompileError::new(kind, position)
}

/// Decodes the escape sequences of a string literal body.
///
/// Unknown escapes are kept verbatim, backslash included.
fn unescape(body: &str) -> String {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('0') => out.push('\0'),
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            },
            None => out.push('\\'),
        }
    }

    out
}
