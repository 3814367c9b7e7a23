use thiserror::Error;

use crate::{error::position_suffix, util::position::Position};

/// Describes what went wrong while a program was running.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeErrorKind {
    /// A name that no enclosing scope defines.
    #[error("'{0}' is not defined")]
    UndefinedVariable(String),
    /// A member that the target value does not have.
    #[error("Property '{name}' is not defined on {target}")]
    UndefinedProperty {
        /// The member name.
        name:   String,
        /// Description of the value that was accessed.
        target: String,
    },
    /// Assigning to, or re-declaring, a constant binding.
    #[error("Cannot reassign constant '{0}'")]
    ConstantReassignment(String),
    /// Division by zero.
    #[error("division by zero")]
    DivisionByZero,
    /// Modulo by zero.
    #[error("modulo by zero")]
    ModuloByZero,
    /// A binary operator applied to operands of the wrong type.
    #[error("Operands of '{operator}' must be numbers, got {left} and {right}")]
    InvalidOperands {
        /// The operator symbol.
        operator: String,
        /// Type name of the left operand.
        left:     &'static str,
        /// Type name of the right operand.
        right:    &'static str,
    },
    /// A unary operator applied to an operand of the wrong type.
    #[error("Operand of '{operator}' must be a number, got {operand}")]
    InvalidOperand {
        /// The operator symbol.
        operator: String,
        /// Type name of the operand.
        operand:  &'static str,
    },
    /// Calling a value that is not a function or method.
    #[error("{0} is not callable")]
    NotCallable(String),
    /// Calling a class like a function.
    #[error("Class '{0}' cannot be invoked without 'naya'")]
    ClassCalledWithoutNew(String),
    /// `new` or `extends` naming something that is not a class.
    #[error("'{0}' is not a class")]
    NotAClass(String),
    /// The left side of `=` cannot be assigned to.
    #[error("Invalid assignment target")]
    InvalidAssignmentTarget,
    /// An array write with a negative or fractional index.
    #[error("Invalid array index {0}")]
    InvalidIndex(String),
    /// Reading or writing a member of `null` or `undefined`.
    #[error("Cannot {action} property '{name}' of {target}")]
    NullAccess {
        /// `read` or `set`.
        action: &'static str,
        /// The member name.
        name:   String,
        /// `null` or `undefined`.
        target: &'static str,
    },
    /// `this` outside a constructor or method body.
    #[error("'this' can only be used inside a method")]
    ThisOutsideMethod,
    /// `super` outside a constructor or method body.
    #[error("'super' can only be used inside a method")]
    SuperOutsideMethod,
    /// `super` used without a call or member access.
    #[error("'super' must be followed by a call or a property access")]
    InvalidSuper,
    /// `super` inside a class that extends nothing.
    #[error("Class '{0}' has no superclass")]
    NoSuperclass(String),
    /// Invoking a private or protected method from outside its class.
    #[error("Method '{method}' of class '{class}' is {access}")]
    InaccessibleMethod {
        /// Method name.
        method: String,
        /// Declaring class name.
        class:  String,
        /// `private` or `protected`.
        access: &'static str,
    },
    /// A `while` loop ran past the iteration ceiling.
    #[error("possible infinite loop: exceeded {0} iterations")]
    LoopLimit(usize),
    /// Calls nested deeper than the recursion ceiling.
    #[error("maximum recursion depth exceeded ({0} frames)")]
    RecursionLimit(usize),
    /// `return` at the top level of a program.
    #[error("Cannot return outside of a function")]
    ReturnOutsideFunction,
    /// A module could not be loaded, parsed or run.
    #[error("Cannot load module \"{path}\": {message}")]
    ModuleLoad {
        /// The specifier that was imported.
        path:    String,
        /// Why loading failed.
        message: String,
    },
    /// Importing a name the module does not export.
    #[error("Module \"{path}\" does not export '{name}'")]
    MissingExport {
        /// The specifier that was imported.
        path: String,
        /// The missing name.
        name: String,
    },
    /// A module that (transitively) imports itself.
    #[error("Circular import of module \"{0}\"")]
    CircularImport(String),
}

impl RuntimeErrorKind {
    /// Attaches a position, producing a [`RuntimeError`].
    #[must_use]
    pub const fn at(self, position: Position) -> RuntimeError {
        RuntimeError { kind:     self,
                       position: Some(position), }
    }
}

/// An evaluation-time error, with the position of the offending node.
///
/// Displays as `RuntimeError: <message>` followed by
/// ` at line L, column C` when the position is known.
///
/// # Example
/// ```
/// use desiscript::{error::RuntimeErrorKind, util::position::Position};
///
/// let error = RuntimeErrorKind::DivisionByZero.at(Position::new(1, 11));
/// assert_eq!(error.to_string(), "RuntimeError: division by zero at line 1, column 11");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("RuntimeError: {kind}{}", position_suffix(.position))]
pub struct RuntimeError {
    /// What went wrong.
    pub kind:     RuntimeErrorKind,
    /// Where it went wrong, if known.
    pub position: Option<Position>,
}

impl RuntimeError {
    /// Returns the message without the kind prefix or position.
    #[must_use]
    pub fn message(&self) -> String {
        self.kind.to_string()
    }
}

impl From<RuntimeErrorKind> for RuntimeError {
    fn from(kind: RuntimeErrorKind) -> Self {
        Self { kind,
               position: None }
    }
}
