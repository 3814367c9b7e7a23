use crate::{
    ast::UnaryOperator,
    error::RuntimeErrorKind,
    interpreter::{
        evaluator::core::{EvalResult, Interpreter},
        value::core::Value,
    },
    util::position::Position,
};

impl Interpreter {
    /// Evaluates a unary operation.
    ///
    /// Supports arithmetic negation (`-x`), which requires a number, and
    /// logical NOT (`!x`, `nahi x`), which negates truthiness.
    ///
    /// # Parameters
    /// - `op`: The unary operator.
    /// - `value`: The evaluated operand.
    /// - `position`: Position of the operator.
    ///
    /// # Returns
    /// The resulting value.
    ///
    /// # Example
    /// ```
    /// use desiscript::{
    ///     ast::UnaryOperator,
    ///     interpreter::{evaluator::core::Interpreter, value::core::Value},
    ///     util::position::Position,
    /// };
    ///
    /// let position = Position::default();
    ///
    /// let negated = Interpreter::eval_unary(UnaryOperator::Negate, &Value::Number(2.0), position);
    /// assert_eq!(negated.unwrap(), Value::Number(-2.0));
    ///
    /// let not = Interpreter::eval_unary(UnaryOperator::Not, &Value::from(""), position);
    /// assert_eq!(not.unwrap(), Value::Bool(true));
    ///
    /// assert!(Interpreter::eval_unary(UnaryOperator::Negate, &Value::Null, position).is_err());
    /// ```
    pub fn eval_unary(op: UnaryOperator, value: &Value, position: Position) -> EvalResult<Value> {
        match (op, value) {
            (UnaryOperator::Negate, Value::Number(n)) => Ok(Value::Number(-n)),
            (UnaryOperator::Negate, other) => {
                Err(RuntimeErrorKind::InvalidOperand { operator: op.to_string(),
                                                       operand:  other.type_name(), }.at(position))
            },
            (UnaryOperator::Not, value) => Ok(Value::Bool(!value.is_truthy())),
        }
    }
}
