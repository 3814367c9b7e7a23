use std::rc::Rc;

use crate::util::position::Position;

/// Canonical source rendering of the tree.
pub mod display;

/// The source location a node was parsed from.
///
/// Spans are carried for error reporting only: two spans always compare equal,
/// so trees that differ only in positions are structurally equal.
#[derive(Debug, Clone, Copy, Default)]
pub struct Span(pub Position);

impl Span {
    /// Returns the start position of the node.
    #[must_use]
    pub const fn position(self) -> Position {
        self.0
    }
}

impl From<Position> for Span {
    fn from(position: Position) -> Self {
        Self(position)
    }
}

impl PartialEq for Span {
    fn eq(&self, _: &Self) -> bool {
        true
    }
}

/// Represents a literal value in the language.
///
/// `LiteralValue` covers the raw, constant values that can appear directly in
/// source code. `undefined` has no literal spelling and so never appears here.
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    /// A number literal; all numbers are 64-bit floats.
    Number(f64),
    /// A string literal with escapes already decoded.
    String(String),
    /// `sahi` or `galat`.
    Bool(bool),
    /// `khali`.
    Null,
}

impl From<f64> for LiteralValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<bool> for LiteralValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for LiteralValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

/// The root of a parsed script.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    /// Top-level statements in source order.
    pub body:    Vec<Statement>,
    /// Whether the script was wrapped in `shuru` ... `khatam`.
    pub markers: bool,
}

/// A named function: its parameters and body.
///
/// Declarations are shared behind an `Rc` so that every closure created from
/// one declaration points at the same body.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDecl {
    /// The name of the function.
    pub name:       String,
    /// Parameter names in declaration order.
    pub parameters: Vec<String>,
    /// The statements of the body.
    pub body:       Vec<Statement>,
    /// Where the declaration starts.
    pub span:       Span,
}

/// Visibility of a method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Access {
    /// `sabka`; callable from anywhere.
    #[default]
    Public,
    /// `niji`; callable only from methods of the declaring class hierarchy.
    Private,
    /// `surakshit`; same rule as `Private` for outside callers.
    Protected,
}

/// A method inside a class body.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodDecl {
    /// The method's function part. The constructor is named `constructor`.
    pub function:       Rc<FunctionDecl>,
    /// Declared visibility.
    pub access:         Access,
    /// Whether the method was marked `sthir`.
    pub is_static:      bool,
    /// Whether this is the `nirmaan` method.
    pub is_constructor: bool,
}

impl MethodDecl {
    /// The method name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.function.name
    }
}

/// A class declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassDecl {
    /// The name of the class.
    pub name:       String,
    /// Name of the parent class given after `virasat`.
    pub superclass: Option<String>,
    /// Methods in declaration order.
    pub methods:    Vec<MethodDecl>,
    /// Where the declaration starts.
    pub span:       Span,
}

/// What an `export` statement exposes.
#[derive(Debug, Clone, PartialEq)]
pub enum Export {
    /// `bhejo <declaration>`; the declared name is exported.
    Declaration(Box<Statement>),
    /// `bhejo { a, b };`
    Names(Vec<String>),
}

/// Represents a statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// `rakho x = ...;` or `pakka X = ...;`
    VariableDeclaration {
        /// The name of the variable.
        name:        String,
        /// Whether the binding was declared with `pakka`.
        constant:    bool,
        /// The initial value.
        initializer: Expr,
        /// Line and column of the keyword.
        span:        Span,
    },
    /// A function declaration.
    Function(Rc<FunctionDecl>),
    /// A class declaration.
    Class(Rc<ClassDecl>),
    /// `agar (...) ... warna ...`
    If {
        /// The condition.
        condition:   Expr,
        /// Statement run when the condition is truthy.
        then_branch: Box<Self>,
        /// Optional statement run otherwise.
        else_branch: Option<Box<Self>>,
        /// Line and column of the keyword.
        span:        Span,
    },
    /// `jabtak (...) ...`
    While {
        /// The loop condition, checked before every iteration.
        condition: Expr,
        /// The loop body.
        body:      Box<Self>,
        /// Line and column of the keyword.
        span:      Span,
    },
    /// `wapas` with an optional value.
    Return {
        /// The returned expression, if any.
        value: Option<Expr>,
        /// Line and column of the keyword.
        span:  Span,
    },
    /// `chaap <expr>`
    Print {
        /// The printed expression.
        value: Expr,
        /// Line and column of the keyword.
        span:  Span,
    },
    /// A braced block with its own scope.
    Block {
        /// Statements inside the block.
        statements: Vec<Self>,
        /// Line and column of `{`.
        span:       Span,
    },
    /// An expression evaluated for its side effects.
    Expression {
        /// The expression.
        expr: Expr,
        /// Where the expression starts.
        span: Span,
    },
    /// A lone `;`.
    Empty {
        /// Line and column of the `;`.
        span: Span,
    },
    /// `lao { a, b } se "path";`
    Import {
        /// Imported names.
        names:  Vec<String>,
        /// The module specifier.
        source: String,
        /// Line and column of the keyword.
        span:   Span,
    },
    /// `bhejo ...`
    Export {
        /// What is exported.
        export: Export,
        /// Line and column of the keyword.
        span:   Span,
    },
}

impl Statement {
    /// Gets the source position the statement starts at.
    #[must_use]
    pub fn position(&self) -> Position {
        match self {
            Self::Function(decl) => decl.span.position(),
            Self::Class(decl) => decl.span.position(),
            Self::VariableDeclaration { span, .. }
            | Self::If { span, .. }
            | Self::While { span, .. }
            | Self::Return { span, .. }
            | Self::Print { span, .. }
            | Self::Block { span, .. }
            | Self::Expression { span, .. }
            | Self::Empty { span }
            | Self::Import { span, .. }
            | Self::Export { span, .. } => span.position(),
        }
    }

    /// Returns the name a declaration introduces, used by `bhejo`.
    #[must_use]
    pub fn declared_name(&self) -> Option<&str> {
        match self {
            Self::VariableDeclaration { name, .. } => Some(name),
            Self::Function(decl) => Some(&decl.name),
            Self::Class(decl) => Some(&decl.name),
            _ => None,
        }
    }
}

/// The right-hand side of a member access.
#[derive(Debug, Clone, PartialEq)]
pub enum Property {
    /// `object.name`
    Named(String),
    /// `object[expr]`
    Computed(Box<Expr>),
}

/// An abstract syntax tree (AST) node representing an expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A literal value.
    Literal {
        /// The constant value.
        value: LiteralValue,
        /// Source location.
        span:  Span,
    },
    /// Reference to a variable by name.
    Identifier {
        /// Name of the variable.
        name: String,
        /// Source location.
        span: Span,
    },
    /// A unary operation.
    Unary {
        /// The unary operator to apply.
        op:      UnaryOperator,
        /// The operand expression.
        operand: Box<Self>,
        /// Source location of the operator.
        span:    Span,
    },
    /// A binary operation, including the short-circuiting `aur` and `ya`.
    Binary {
        /// Left operand.
        left:  Box<Self>,
        /// The operator.
        op:    BinaryOperator,
        /// Right operand.
        right: Box<Self>,
        /// Source location of the operator.
        span:  Span,
    },
    /// `target = value`
    Assign {
        /// The assignment target, validated at runtime.
        target: Box<Self>,
        /// The assigned value.
        value:  Box<Self>,
        /// Source location of `=`.
        span:   Span,
    },
    /// `callee(arguments)`
    Call {
        /// The called expression.
        callee:    Box<Self>,
        /// Arguments in source order.
        arguments: Vec<Self>,
        /// Source location of `(`.
        span:      Span,
    },
    /// `object.name` or `object[index]`
    Member {
        /// The accessed object.
        object:   Box<Self>,
        /// The property.
        property: Property,
        /// Source location of `.` or `[`.
        span:     Span,
    },
    /// `[a, b, c]`
    Array {
        /// Elements of the array.
        elements: Vec<Self>,
        /// Source location of `[`.
        span:     Span,
    },
    /// `yeh`
    This {
        /// Source location.
        span: Span,
    },
    /// `upar`, either called directly or followed by `.name`.
    Super {
        /// Source location.
        span: Span,
    },
    /// `naya Class(arguments)`
    New {
        /// Name of the instantiated class.
        class:     String,
        /// Constructor arguments.
        arguments: Vec<Self>,
        /// Source location of the keyword.
        span:      Span,
    },
    /// A parenthesized expression.
    Grouping {
        /// The inner expression.
        expr: Box<Self>,
        /// Source location of `(`.
        span: Span,
    },
}

impl Expr {
    /// Gets the source position from `self`.
    /// ## Example
    /// ```
    /// use desiscript::{
    ///     ast::{Expr, Span},
    ///     util::position::Position,
    /// };
    ///
    /// let expr = Expr::Identifier { name: "x".to_string(),
    ///                               span: Span(Position::new(5, 3)), };
    ///
    /// assert_eq!(expr.position(), Position::new(5, 3));
    /// ```
    #[must_use]
    pub const fn position(&self) -> Position {
        match self {
            Self::Literal { span, .. }
            | Self::Identifier { span, .. }
            | Self::Unary { span, .. }
            | Self::Binary { span, .. }
            | Self::Assign { span, .. }
            | Self::Call { span, .. }
            | Self::Member { span, .. }
            | Self::Array { span, .. }
            | Self::This { span }
            | Self::Super { span }
            | Self::New { span, .. }
            | Self::Grouping { span, .. } => span.0,
        }
    }
}

/// Represents a binary operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BinaryOperator {
    /// Addition or string concatenation (`+`)
    Add,
    /// Subtraction (`-`)
    Sub,
    /// Multiplication (`*`)
    Mul,
    /// Division (`/`)
    Div,
    /// Modulo (`%`)
    Mod,
    /// Less than (`<`)
    Less,
    /// Greater than (`>`)
    Greater,
    /// Less than or equal (`<=`)
    LessEqual,
    /// Greater than or equal (`>=`)
    GreaterEqual,
    /// Equal to (`==`)
    Equal,
    /// Not equal to (`!=`)
    NotEqual,
    /// Logical and (`aur`)
    And,
    /// Logical or (`ya`)
    Or,
}

/// Represents a unary operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum UnaryOperator {
    /// Arithmetic negation (e.g. `-x`).
    Negate,
    /// Logical NOT (e.g. `!x` or `nahi x`).
    Not,
}

impl std::fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use BinaryOperator::{
            Add, And, Div, Equal, Greater, GreaterEqual, Less, LessEqual, Mod, Mul, NotEqual, Or,
            Sub,
        };
        let operator = match self {
            Add => "+",
            Sub => "-",
            Mul => "*",
            Div => "/",
            Mod => "%",
            Less => "<",
            Greater => ">",
            LessEqual => "<=",
            GreaterEqual => ">=",
            Equal => "==",
            NotEqual => "!=",
            And => "aur",
            Or => "ya",
        };
        write!(f, "{operator}")
    }
}

impl std::fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Negate => write!(f, "-"),
            Self::Not => write!(f, "!"),
        }
    }
}
