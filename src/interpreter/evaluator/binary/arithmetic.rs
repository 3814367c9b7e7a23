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
    /// Evaluates `+`, `-`, `*`, `/` and `%`.
    ///
    /// `+` concatenates the printed forms when either operand is a string and
    /// adds otherwise. All other cases require two numbers. `%` keeps the sign
    /// of the dividend.
    ///
    /// # Errors
    /// - `DivisionByZero` / `ModuloByZero` for a zero right operand.
    /// - `InvalidOperands` when the operand types do not fit the operator.
    ///
    /// # Example
    /// ```
    /// use desiscript::{
    ///     ast::BinaryOperator,
    ///     interpreter::{evaluator::core::Interpreter, value::core::Value},
    ///     util::position::Position,
    /// };
    ///
    /// let position = Position::default();
    /// let five = Value::Number(5.0);
    /// let zero = Value::Number(0.0);
    ///
    /// let error = Interpreter::eval_arithmetic(BinaryOperator::Div, &five, &zero, position);
    /// assert_eq!(error.unwrap_err().message(), "division by zero");
    ///
    /// let rest = Interpreter::eval_arithmetic(BinaryOperator::Mod, &Value::Number(-7.0), &Value::Number(3.0), position);
    /// assert_eq!(rest.unwrap(), Value::Number(-1.0));
    /// ```
    pub fn eval_arithmetic(op: BinaryOperator,
                           left: &Value,
                           right: &Value,
                           position: Position)
                           -> EvalResult<Value> {
        if op == BinaryOperator::Add
           && (matches!(left, Value::String(_)) || matches!(right, Value::String(_)))
        {
            return Ok(Value::from(format!("{left}{right}")));
        }

        let (Value::Number(a), Value::Number(b)) = (left, right) else {
            return Err(RuntimeErrorKind::InvalidOperands { operator: op.to_string(),
                                                           left:     left.type_name(),
                                                           right:    right.type_name(), }.at(position));
        };

        let result = match op {
            BinaryOperator::Add => a + b,
            BinaryOperator::Sub => a - b,
            BinaryOperator::Mul => a * b,
            BinaryOperator::Div if *b == 0.0 => {
                return Err(RuntimeErrorKind::DivisionByZero.at(position));
            },
            BinaryOperator::Div => a / b,
            BinaryOperator::Mod if *b == 0.0 => {
                return Err(RuntimeErrorKind::ModuloByZero.at(position));
            },
            BinaryOperator::Mod => a % b,
            _ => {
                return Err(RuntimeErrorKind::InvalidOperands { operator: op.to_string(),
                                                               left:     left.type_name(),
                                                               right:    right.type_name(), }.at(position));
            },
        };
        Ok(Value::Number(result))
    }
}
