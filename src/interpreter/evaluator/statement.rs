use std::rc::Rc;

use tracing::debug;

use crate::{
    ast::{Expr, Export, Statement},
    error::RuntimeErrorKind,
    interpreter::{
        environment::Environment,
        evaluator::core::{Completion, EvalResult, Interpreter},
        value::{core::Value, object::Function},
    },
    util::{position::Position, stack::ensure_sufficient_stack},
};

impl Interpreter {
    /// Executes a single statement.
    ///
    /// Declarations bind in the current environment, control-flow statements
    /// run their bodies, and `wapas` yields [`Completion::Return`] for the
    /// enclosing call to pick up.
    ///
    /// # Parameters
    /// - `statement`: Statement to execute.
    ///
    /// # Returns
    /// How the statement finished.
    pub fn execute(&mut self, statement: &Statement) -> EvalResult<Completion> {
        ensure_sufficient_stack(|| self.execute_statement(statement))
    }

    fn execute_statement(&mut self, statement: &Statement) -> EvalResult<Completion> {
        match statement {
            Statement::VariableDeclaration { name,
                                             constant,
                                             initializer,
                                             span, } => {
                let value = self.evaluate(initializer)?;
                self.declare(name, value, *constant, span.position())?;
                Ok(Completion::Normal)
            },
            Statement::Function(decl) => {
                let function = Function { decl:    Rc::clone(decl),
                                          closure: Rc::clone(&self.environment), };
                self.declare(&decl.name,
                             Value::Function(Rc::new(function)),
                             false,
                             decl.span.position())?;
                Ok(Completion::Normal)
            },
            Statement::Class(decl) => {
                self.declare_class(decl)?;
                Ok(Completion::Normal)
            },
            Statement::If { condition,
                            then_branch,
                            else_branch,
                            .. } => {
                if self.evaluate(condition)?.is_truthy() {
                    self.execute(then_branch)
                } else if let Some(else_branch) = else_branch {
                    self.execute(else_branch)
                } else {
                    Ok(Completion::Normal)
                }
            },
            Statement::While { condition,
                               body,
                               span, } => self.execute_while(condition, body, span.position()),
            Statement::Return { value, span } => {
                if self.call_depth() == 0 {
                    return Err(RuntimeErrorKind::ReturnOutsideFunction.at(span.position()));
                }
                let value = match value {
                    Some(expr) => self.evaluate(expr)?,
                    None => Value::Null,
                };
                Ok(Completion::Return(value))
            },
            Statement::Print { value, .. } => {
                let line = self.evaluate(value)?.to_string();
                self.output.push(line);
                Ok(Completion::Normal)
            },
            Statement::Block { statements, .. } => {
                let scope = Environment::child(&self.environment);
                self.execute_block(statements, scope)
            },
            Statement::Expression { expr, .. } => {
                self.evaluate(expr)?;
                Ok(Completion::Normal)
            },
            Statement::Empty { .. } => Ok(Completion::Normal),
            Statement::Import { names,
                                source,
                                span, } => {
                self.execute_import(names, source, span.position())?;
                Ok(Completion::Normal)
            },
            Statement::Export { export, .. } => match export {
                Export::Declaration(declaration) => {
                    let completion = self.execute(declaration)?;
                    if let Some(name) = declaration.declared_name() {
                        self.exports.push(name.to_string());
                    }
                    Ok(completion)
                },
                Export::Names(names) => {
                    self.exports.extend(names.iter().cloned());
                    Ok(Completion::Normal)
                },
            },
        }
    }

    /// Declares `name` in the current environment.
    ///
    /// # Errors
    /// Returns `ConstantReassignment` when a constant of that name already
    /// lives in the current environment.
    pub(crate) fn declare(&self,
                          name: &str,
                          value: Value,
                          constant: bool,
                          position: Position)
                          -> EvalResult<()> {
        self.environment
            .borrow_mut()
            .define(name, value, constant)
            .map_err(|kind| kind.at(position))
    }

    /// Runs a `jabtak` loop.
    ///
    /// Each execution of the statement may run at most
    /// `limits.max_loop_iterations` iterations; the condition being true once
    /// more after that raises `LoopLimit`.
    fn execute_while(&mut self,
                     condition: &Expr,
                     body: &Statement,
                     position: Position)
                     -> EvalResult<Completion> {
        let mut iterations = 0;
        while self.evaluate(condition)?.is_truthy() {
            if iterations == self.limits.max_loop_iterations {
                debug!(iterations, "loop ceiling reached");
                return Err(RuntimeErrorKind::LoopLimit(iterations).at(position));
            }
            iterations += 1;
            if let Completion::Return(value) = self.execute(body)? {
                return Ok(Completion::Return(value));
            }
        }
        Ok(Completion::Normal)
    }
}
