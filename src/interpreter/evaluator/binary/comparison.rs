use std::cmp::Ordering;

use crate::{
    ast::BinaryOperator,
    error::RuntimeErrorKind,
    interpreter::{
        evaluator::core::{EvalResult, Interpreter},
        value::core::Value,
    },
    util::position::Position,
};

impl Interpreter {
    /// Evaluates a comparison of the form `Value <Operator> Value`.
    ///
    /// `==` and `!=` never fail: primitives compare by value, arrays,
    /// functions, classes and instances by identity. Relational operators
    /// compare two numbers, or two strings lexicographically.
    ///
    /// # Parameters
    /// - `op`: The comparison operator.
    /// - `left`: The left-hand value.
    /// - `right`: The right-hand value.
    /// - `position`: Position of the operator.
    ///
    /// # Returns
    /// An `EvalResult<Value>` containing a boolean result.
    ///
    /// # Example
    /// ```
    /// use desiscript::{
    ///     ast::BinaryOperator,
    ///     interpreter::{evaluator::core::Interpreter, value::core::Value},
    ///     util::position::Position,
    /// };
    ///
    /// let a = Value::Number(3.0);
    /// let b = Value::Number(5.0);
    ///
    /// let result = Interpreter::eval_comparison(BinaryOperator::Less, &a, &b, Position::default());
    ///
    /// assert_eq!(result.unwrap(), Value::Bool(true));
    /// ```
    pub fn eval_comparison(op: BinaryOperator,
                           left: &Value,
                           right: &Value,
                           position: Position)
                           -> EvalResult<Value> {
        let ordering = match op {
            BinaryOperator::Equal => return Ok(Value::Bool(left.equals(right))),
            BinaryOperator::NotEqual => return Ok(Value::Bool(!left.equals(right))),
            _ => match (left, right) {
                (Value::Number(a), Value::Number(b)) => a.partial_cmp(b),
                (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
                _ => {
                    return Err(RuntimeErrorKind::InvalidOperands { operator: op.to_string(),
                                                                   left:     left.type_name(),
                                                                   right:    right.type_name(), }.at(position));
                },
            },
        };

        // NaN is unordered, so every relational comparison with it is false.
        let result = ordering.is_some_and(|ordering| match op {
                                 BinaryOperator::Less => ordering == Ordering::Less,
                                 BinaryOperator::LessEqual => ordering != Ordering::Greater,
                                 BinaryOperator::Greater => ordering == Ordering::Greater,
                                 BinaryOperator::GreaterEqual => ordering != Ordering::Less,
                                 _ => false,
                             });
        Ok(Value::Bool(result))
    }
}
