use crate::{
    ast::{BinaryOperator, Expr},
    interpreter::{
        evaluator::core::{EvalResult, Interpreter},
        value::core::Value,
    },
    util::position::Position,
};

impl Interpreter {
    /// Evaluates a binary expression.
    ///
    /// `aur` and `ya` evaluate their right operand only when needed; every
    /// other operator evaluates left, then right, then applies
    /// [`eval_binary`](Self::eval_binary).
    pub(crate) fn eval_binary_expr(&mut self,
                                   left: &Expr,
                                   op: BinaryOperator,
                                   right: &Expr,
                                   position: Position)
                                   -> EvalResult<Value> {
        if matches!(op, BinaryOperator::And | BinaryOperator::Or) {
            return self.eval_logic(op, left, right);
        }
        let left = self.evaluate(left)?;
        let right = self.evaluate(right)?;
        Self::eval_binary(op, &left, &right, position)
    }

    /// Evaluates a binary operation between two values.
    ///
    /// Arithmetic goes to `eval_arithmetic`, relational and equality
    /// operators to `eval_comparison`.
    ///
    /// # Parameters
    /// - `op`: The operator.
    /// - `left`: Left operand.
    /// - `right`: Right operand.
    /// - `position`: Position of the operator for error reporting.
    ///
    /// # Returns
    /// An `EvalResult<Value>` containing the evaluated result.
    ///
    /// # Example
    /// ```
    /// use desiscript::{
    ///     ast::BinaryOperator,
    ///     interpreter::{evaluator::core::Interpreter, value::core::Value},
    ///     util::position::Position,
    /// };
    ///
    /// let left = Value::from("Value: ");
    /// let right = Value::Number(10.0);
    ///
    /// let result = Interpreter::eval_binary(BinaryOperator::Add, &left, &right, Position::default());
    /// assert_eq!(result.unwrap(), Value::from("Value: 10"));
    /// ```
    pub fn eval_binary(op: BinaryOperator,
                       left: &Value,
                       right: &Value,
                       position: Position)
                       -> EvalResult<Value> {
        use BinaryOperator::{
            Add, And, Div, Equal, Greater, GreaterEqual, Less, LessEqual, Mod, Mul, NotEqual, Or,
            Sub,
        };

        match op {
            Add | Sub | Mul | Div | Mod => Self::eval_arithmetic(op, left, right, position),
            Less | LessEqual | Greater | GreaterEqual | Equal | NotEqual => {
                Self::eval_comparison(op, left, right, position)
            },
            And => Ok(Value::Bool(left.is_truthy() && right.is_truthy())),
            Or => Ok(Value::Bool(left.is_truthy() || right.is_truthy())),
        }
    }
}
