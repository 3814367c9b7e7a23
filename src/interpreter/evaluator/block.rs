use crate::{
    ast::Statement,
    interpreter::{
        environment::Env,
        evaluator::core::{Completion, EvalResult, Interpreter},
    },
};

impl Interpreter {
    /// Executes statements in `scope`, then restores the previous environment.
    ///
    /// The previous environment is restored whether the statements finish,
    /// return early or fail, so an error never leaves the interpreter inside
    /// a dead scope. Execution stops at the first `wapas`.
    ///
    /// # Parameters
    /// - `statements`: The block body.
    /// - `scope`: The environment to run it in, usually a child of the current
    ///   one.
    ///
    /// # Returns
    /// [`Completion::Return`] if a statement returned, otherwise
    /// [`Completion::Normal`].
    pub fn execute_block(&mut self, statements: &[Statement], scope: Env) -> EvalResult<Completion> {
        let previous = std::mem::replace(&mut self.environment, scope);
        let result = self.execute_statements(statements);
        self.environment = previous;
        result
    }

    fn execute_statements(&mut self, statements: &[Statement]) -> EvalResult<Completion> {
        for statement in statements {
            if let Completion::Return(value) = self.execute(statement)? {
                return Ok(Completion::Return(value));
            }
        }
        Ok(Completion::Normal)
    }
}
