use crate::{
    ast::{BinaryOperator, Expr},
    interpreter::{
        evaluator::core::{EvalResult, Interpreter},
        value::core::Value,
    },
};

impl Interpreter {
    /// Evaluates `aur` / `ya` with short-circuiting.
    ///
    /// The right operand is only evaluated when the left one does not decide
    /// the result. The result is always a boolean built from truthiness.
    ///
    /// # Parameters
    /// - `op`: `And` or `Or`.
    /// - `left`: Left operand expression.
    /// - `right`: Right operand expression.
    ///
    /// # Returns
    /// `Value::Bool` with the combined truthiness.
    pub(crate) fn eval_logic(&mut self,
                             op: BinaryOperator,
                             left: &Expr,
                             right: &Expr)
                             -> EvalResult<Value> {
        let left = self.evaluate(left)?.is_truthy();
        let decided = match op {
            BinaryOperator::And => !left,
            _ => left,
        };
        if decided {
            return Ok(Value::Bool(left));
        }
        Ok(Value::Bool(self.evaluate(right)?.is_truthy()))
    }
}
