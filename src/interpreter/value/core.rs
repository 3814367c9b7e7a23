use std::{cell::RefCell, fmt, rc::Rc};

use crate::{
    ast::LiteralValue,
    interpreter::value::object::{BoundMethod, Class, Function, Instance},
    util::num::format_number,
};

/// Represents a runtime value in the interpreter.
///
/// Primitives are compared by value; arrays, functions, classes and instances
/// are shared and compared by identity.
#[derive(Clone)]
pub enum Value {
    /// A number (double precision floating-point).
    Number(f64),
    /// A string.
    String(Rc<str>),
    /// A boolean value, `sahi` or `galat`.
    Bool(bool),
    /// `khali`.
    Null,
    /// The value of missing array elements and out-of-range reads.
    Undefined,
    /// A mutable, shared array.
    Array(Rc<RefCell<Vec<Self>>>),
    /// A user function with its captured environment.
    Function(Rc<Function>),
    /// A method bound to its receiver (or to its class, for static methods).
    BoundMethod(Rc<BoundMethod>),
    /// A class.
    Class(Rc<Class>),
    /// An instance of a class.
    Instance(Rc<RefCell<Instance>>),
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(Rc::from(v))
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(Rc::from(v))
    }
}

impl From<Vec<Self>> for Value {
    fn from(v: Vec<Self>) -> Self {
        Self::Array(Rc::new(RefCell::new(v)))
    }
}

impl From<&LiteralValue> for Value {
    fn from(literal: &LiteralValue) -> Self {
        match literal {
            LiteralValue::Number(n) => Self::Number(*n),
            LiteralValue::String(s) => Self::from(s.as_str()),
            LiteralValue::Bool(b) => Self::Bool(*b),
            LiteralValue::Null => Self::Null,
        }
    }
}

impl Value {
    /// Returns the truthiness of the value.
    ///
    /// `galat`, `khali`, `undefined`, `0`, `NaN` and the empty string are
    /// falsy; everything else is truthy.
    ///
    /// # Example
    /// ```
    /// use desiscript::interpreter::value::core::Value;
    ///
    /// assert!(!Value::Number(0.0).is_truthy());
    /// assert!(!Value::from("").is_truthy());
    /// assert!(Value::from(vec![]).is_truthy());
    /// ```
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Bool(b) => *b,
            Self::Null | Self::Undefined => false,
            Self::Number(n) => *n != 0.0 && !n.is_nan(),
            Self::String(s) => !s.is_empty(),
            _ => true,
        }
    }

    /// Returns the name of the value's type, used in error messages.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::Bool(_) => "boolean",
            Self::Null => "null",
            Self::Undefined => "undefined",
            Self::Array(_) => "array",
            Self::Function(_) | Self::BoundMethod(_) => "function",
            Self::Class(_) => "class",
            Self::Instance(_) => "instance",
        }
    }

    /// Structural equality for primitives, identity for everything shared.
    ///
    /// Values of different types are never equal, and `NaN` is not equal to
    /// itself.
    #[must_use]
    pub fn equals(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Number(a), Self::Number(b)) => a == b,
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Null, Self::Null) | (Self::Undefined, Self::Undefined) => true,
            (Self::Array(a), Self::Array(b)) => Rc::ptr_eq(a, b),
            (Self::Function(a), Self::Function(b)) => Rc::ptr_eq(a, b),
            (Self::BoundMethod(a), Self::BoundMethod(b)) => {
                Rc::ptr_eq(&a.method, &b.method)
                && match (&a.receiver, &b.receiver) {
                    (Some(x), Some(y)) => Rc::ptr_eq(x, y),
                    (None, None) => true,
                    _ => false,
                }
            },
            (Self::Class(a), Self::Class(b)) => Rc::ptr_eq(a, b),
            (Self::Instance(a), Self::Instance(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Writes the value the way it appears inside an array: like
    /// [`Display`](fmt::Display), except strings are quoted.
    fn write_nested(&self, f: &mut fmt::Formatter<'_>, open: &mut Vec<*const ()>) -> fmt::Result {
        match self {
            Self::String(s) => write!(f, "\"{s}\""),
            Self::Array(items) => write_array(items, f, open),
            other => write!(f, "{other}"),
        }
    }
}

/// Writes `[a, b, c]`; an array that contains itself prints as `[...]` at the
/// point of recursion.
fn write_array(items: &Rc<RefCell<Vec<Value>>>,
               f: &mut fmt::Formatter<'_>,
               open: &mut Vec<*const ()>)
               -> fmt::Result {
    let id = Rc::as_ptr(items).cast::<()>();
    if open.contains(&id) {
        return f.write_str("[...]");
    }
    open.push(id);
    f.write_str("[")?;
    for (i, item) in items.borrow().iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        item.write_nested(f, open)?;
    }
    open.pop();
    f.write_str("]")
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

impl fmt::Display for Value {
    /// Converts the value to the text `chaap` prints.
    ///
    /// # Example
    /// ```
    /// use desiscript::interpreter::value::core::Value;
    ///
    /// let array = Value::from(vec![Value::Number(1.0), Value::from("a"), Value::Null]);
    ///
    /// assert_eq!(Value::Number(10.0).to_string(), "10");
    /// assert_eq!(Value::Number(3.14159).to_string(), "3.14159");
    /// assert_eq!(array.to_string(), "[1, \"a\", null]");
    /// ```
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => f.write_str(&format_number(*n)),
            Self::String(s) => f.write_str(s),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Null => f.write_str("null"),
            Self::Undefined => f.write_str("undefined"),
            Self::Array(items) => write_array(items, f, &mut Vec::new()),
            Self::Function(function) => write!(f, "<function {}>", function.decl.name),
            Self::BoundMethod(bound) => write!(f, "<function {}>", bound.method.decl.name),
            Self::Class(class) => write!(f, "<class {}>", class.name),
            Self::Instance(instance) => write!(f, "<{} instance>", instance.borrow().class.name),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => write!(f, "String({s:?})"),
            Self::Number(n) => write!(f, "Number({n:?})"),
            Self::Bool(b) => write!(f, "Bool({b})"),
            Self::Null => f.write_str("Null"),
            Self::Undefined => f.write_str("Undefined"),
            other => write!(f, "{}({other})", other.type_name()),
        }
    }
}
