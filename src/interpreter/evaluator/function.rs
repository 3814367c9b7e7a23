use std::rc::Rc;

use tracing::trace;

use crate::{
    ast::{Expr, FunctionDecl, Property},
    error::RuntimeErrorKind,
    interpreter::{
        environment::{Env, Environment},
        evaluator::core::{Completion, EvalResult, Interpreter, MethodFrame},
        value::core::Value,
    },
    util::position::Position,
};

impl Interpreter {
    /// Evaluates a call expression.
    ///
    /// `upar(...)` and `upar.name(...)` are resolved against the running
    /// method; every other callee is evaluated to a value first, then the
    /// arguments are evaluated left to right.
    ///
    /// # Parameters
    /// - `callee`: The called expression.
    /// - `arguments`: Argument expressions.
    /// - `position`: Position of the call, for errors.
    ///
    /// # Returns
    /// The call's return value, or `khali` if the body finished without
    /// `wapas`.
    pub(crate) fn eval_call(&mut self,
                            callee: &Expr,
                            arguments: &[Expr],
                            position: Position)
                            -> EvalResult<Value> {
        if let Expr::Super { span } = callee {
            let arguments = self.eval_arguments(arguments)?;
            return self.call_super_constructor(arguments, span.position());
        }

        let callee = match callee {
            Expr::Member { object,
                           property: Property::Named(name),
                           span, } if matches!(**object, Expr::Super { .. }) => {
                self.super_member(name, span.position())?
            },
            _ => self.evaluate(callee)?,
        };
        let arguments = self.eval_arguments(arguments)?;
        self.call_value(callee, arguments, position)
    }

    fn eval_arguments(&mut self, arguments: &[Expr]) -> EvalResult<Vec<Value>> {
        arguments.iter()
                 .map(|argument| self.evaluate(argument))
                 .collect()
    }

    /// Calls a function or bound method with already evaluated arguments.
    ///
    /// # Errors
    /// Returns `ClassCalledWithoutNew` for classes and `NotCallable` for any
    /// other non-function value.
    pub fn call_value(&mut self,
                      callee: Value,
                      arguments: Vec<Value>,
                      position: Position)
                      -> EvalResult<Value> {
        match callee {
            Value::Function(function) => {
                self.call_function(&function.decl, &function.closure, arguments, None, position)
            },
            Value::BoundMethod(bound) => {
                let frame = MethodFrame { this: bound.receiver.clone(),
                                          home: Rc::clone(&bound.home), };
                self.call_function(&bound.method.decl,
                                   &bound.home.closure,
                                   arguments,
                                   Some(frame),
                                   position)
            },
            Value::Class(class) => {
                Err(RuntimeErrorKind::ClassCalledWithoutNew(class.name.clone()).at(position))
            },
            other => Err(RuntimeErrorKind::NotCallable(describe_callee(&other)).at(position)),
        }
    }

    /// The call protocol shared by functions, methods and constructors.
    ///
    /// A new environment whose parent is `closure` receives the parameters:
    /// missing arguments bind `khali`, extra arguments are ignored. The frame
    /// stack, the environment and the depth are restored on every exit path.
    ///
    /// # Errors
    /// Returns `RecursionLimit` when `limits.max_call_depth` calls are already
    /// running, and propagates any error raised by the body.
    #[tracing::instrument(level = "trace", skip_all, fields(function = %decl.name))]
    pub(crate) fn call_function(&mut self,
                                decl: &FunctionDecl,
                                closure: &Env,
                                arguments: Vec<Value>,
                                frame: Option<MethodFrame>,
                                position: Position)
                                -> EvalResult<Value> {
        if self.call_depth() >= self.limits.max_call_depth {
            return Err(RuntimeErrorKind::RecursionLimit(self.limits.max_call_depth).at(position));
        }

        let scope = Environment::child(closure);
        {
            let mut scope = scope.borrow_mut();
            let mut arguments = arguments.into_iter();
            for parameter in &decl.parameters {
                // Parameters are fresh bindings in a fresh scope, so defining
                // them cannot hit a constant.
                let _ = scope.define(parameter, arguments.next().unwrap_or(Value::Null), false);
            }
        }

        self.frames.push(frame);
        let result = self.execute_block(&decl.body, scope);
        self.frames.pop();

        let value = match result? {
            Completion::Return(value) => value,
            Completion::Normal => Value::Null,
        };
        trace!(result = %value, "returned");
        Ok(value)
    }
}

/// Describes a value for the `NotCallable` message.
fn describe_callee(value: &Value) -> String {
    match value {
        Value::String(s) => format!("\"{s}\""),
        other => other.to_string(),
    }
}
