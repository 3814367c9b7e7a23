use crate::{ast::Program, error::Diagnostics};

/// Scopes and bindings.
///
/// A chain of reference-counted environments, one per global scope, call and
/// block. Closures keep the environment they were created in alive.
///
/// # Responsibilities
/// - Declares, looks up and rebinds names along the chain.
/// - Rejects rebinding of constants.
pub mod environment;
/// The evaluator module executes AST nodes and computes results.
///
/// The evaluator walks the tree against the current environment, performs
/// arithmetic and logical operations, runs functions and methods, and collects
/// printed output. It is the core execution engine of the interpreter.
///
/// # Responsibilities
/// - Evaluates expressions and executes statements.
/// - Implements the call protocol, classes, inheritance and `upar`.
/// - Enforces the loop and recursion ceilings.
/// - Reports runtime errors such as division by zero or undefined names.
pub mod evaluator;
/// The lexer module tokenizes source code for further parsing.
///
/// The lexer reads the raw source text and produces a list of tokens, each
/// corresponding to a keyword, identifier, literal, operator or delimiter.
/// This is the first stage of interpretation.
///
/// # Responsibilities
/// - Converts the input into tokens with line and column.
/// - Maps the Hindi keywords and their English aliases to token kinds.
/// - Reports lexical errors for invalid or malformed input.
pub mod lexer;
/// Module loading for `lao` / `bhejo`.
///
/// Defines the [`ModuleLoader`](module::ModuleLoader) seam hosts implement,
/// a file-system and an in-memory loader, and the per-run module cache.
pub mod module;
/// The parser module builds the abstract syntax tree (AST) from tokens.
///
/// The parser processes the token list produced by the lexer and constructs
/// the tree of statements and expressions the evaluator runs.
///
/// # Responsibilities
/// - Converts tokens into AST nodes by recursive descent.
/// - Applies the statement-boundary and program-marker rules.
/// - Recovers after a malformed statement and reports every error it finds.
pub mod parser;
/// The value module defines the runtime data types for evaluation.
///
/// # Responsibilities
/// - Defines the `Value` enum with truthiness, equality and printing.
/// - Defines functions, classes, instances and bound methods.
pub mod value;

/// Tokenizes and parses source text.
///
/// # Errors
/// Returns the lexical error, or every parse error, as [`Diagnostics`].
///
/// # Example
/// ```
/// use desiscript::interpreter::parse_source;
///
/// let program = parse_source("shuru\nrakho x = 1\nkhatam").unwrap();
/// assert!(program.markers);
/// assert_eq!(program.body.len(), 1);
///
/// assert!(parse_source("rakho x = \"oops").is_err());
/// ```
pub fn parse_source(source: &str) -> Result<Program, Diagnostics> {
    let tokens = lexer::tokenize(source)?;
    parser::parse(&tokens)
}
