use std::rc::Rc;

use crate::{
    ast::{Expr, Program},
    error::{RuntimeError, RuntimeErrorKind},
    interpreter::{
        environment::{Env, Environment},
        module::Modules,
        value::{
            core::Value,
            object::{Class, Instance},
        },
    },
    util::{position::Position, stack::ensure_sufficient_stack},
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// Default ceiling on the iterations of one `jabtak` statement.
pub const DEFAULT_MAX_LOOP_ITERATIONS: usize = 1000;
/// Default ceiling on nested calls.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 100;

/// Runtime ceilings that stop runaway programs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Iterations one execution of a `jabtak` statement may run.
    pub max_loop_iterations: usize,
    /// Calls that may be active at once.
    pub max_call_depth:      usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self { max_loop_iterations: DEFAULT_MAX_LOOP_ITERATIONS,
               max_call_depth:      DEFAULT_MAX_CALL_DEPTH, }
    }
}

/// How a statement finished.
///
/// `wapas` produces `Return`, which every enclosing statement passes upward
/// until the call that started the function body consumes it.
#[derive(Debug, Clone, PartialEq)]
pub enum Completion {
    /// The statement ran to its end.
    Normal,
    /// A `wapas` ran with this value.
    Return(Value),
}

/// The receiver of the method that is currently running.
#[derive(Debug, Clone)]
pub struct MethodFrame {
    /// What `yeh` refers to; `None` inside static methods.
    pub this: Option<Rc<std::cell::RefCell<Instance>>>,
    /// The class declaring the running method; `upar` starts from its parent.
    pub home: Rc<Class>,
}

/// Stores the runtime evaluation state.
///
/// The interpreter owns the current environment, a frame per active call
/// (`Some` for methods, `None` for plain functions) and the printed output.
/// Every call and block restores these on the way out, including when an
/// error unwinds.
pub struct Interpreter {
    /// The global scope of this program or module.
    pub(crate) globals:     Env,
    /// The innermost scope.
    pub(crate) environment: Env,
    /// One entry per active call.
    pub(crate) frames:      Vec<Option<MethodFrame>>,
    /// Ceilings for loops and recursion.
    pub(crate) limits:      Limits,
    /// Lines printed so far.
    pub(crate) output:      Vec<String>,
    /// Names listed by `bhejo`, in order.
    pub(crate) exports:     Vec<String>,
    /// The module loader and cache, shared with imported modules.
    pub(crate) modules:     Rc<Modules>,
    /// Identity of the module being run, used to resolve relative imports.
    pub(crate) module_id:   Option<String>,
}

impl Interpreter {
    /// Creates an interpreter with a fresh global environment.
    #[must_use]
    pub fn new(limits: Limits, modules: Rc<Modules>, module_id: Option<String>) -> Self {
        let globals = Environment::global();
        Self { environment: Rc::clone(&globals),
               globals,
               frames: Vec::new(),
               limits,
               output: Vec::new(),
               exports: Vec::new(),
               modules,
               module_id }
    }

    /// Runs a whole program.
    ///
    /// This is the single point where runtime errors stop execution. The
    /// lines printed before an error stay available through
    /// [`output`](Self::output).
    ///
    /// # Errors
    /// Returns the first `RuntimeError` raised by any statement.
    pub fn interpret(&mut self, program: &Program) -> EvalResult<()> {
        for statement in &program.body {
            self.execute(statement)?;
        }
        Ok(())
    }

    /// Lines printed so far.
    #[must_use]
    pub fn output(&self) -> &[String] {
        &self.output
    }

    /// Takes the printed lines out of the interpreter.
    pub fn take_output(&mut self) -> Vec<String> {
        std::mem::take(&mut self.output)
    }

    /// Looks up a global binding, e.g. to inspect state after a run.
    #[must_use]
    pub fn global(&self, name: &str) -> Option<Value> {
        self.globals.borrow().get(name)
    }

    /// Number of calls currently running.
    pub(crate) fn call_depth(&self) -> usize {
        self.frames.len()
    }

    /// Evaluates an expression and returns the resulting value.
    ///
    /// This is the main entry point for expression evaluation. Operands are
    /// evaluated left to right.
    ///
    /// # Parameters
    /// - `expr`: Expression to evaluate.
    ///
    /// # Returns
    /// The value of the expression.
    pub fn evaluate(&mut self, expr: &Expr) -> EvalResult<Value> {
        ensure_sufficient_stack(|| self.eval_expr(expr))
    }

    fn eval_expr(&mut self, expr: &Expr) -> EvalResult<Value> {
        match expr {
            Expr::Literal { value, .. } => Ok(Value::from(value)),
            Expr::Identifier { name, span } => self.lookup(name, span.position()),
            Expr::Grouping { expr, .. } => self.evaluate(expr),
            Expr::Unary { op, operand, span } => {
                let value = self.evaluate(operand)?;
                Self::eval_unary(*op, &value, span.position())
            },
            Expr::Binary { left,
                           op,
                           right,
                           span, } => self.eval_binary_expr(left, *op, right, span.position()),
            Expr::Assign { target, value, span } => self.eval_assign(target, value, span.position()),
            Expr::Call { callee,
                         arguments,
                         span, } => self.eval_call(callee, arguments, span.position()),
            Expr::Member { object,
                           property,
                           span, } => self.eval_member(object, property, span.position()),
            Expr::Array { elements, .. } => {
                let values = elements.iter()
                                     .map(|element| self.evaluate(element))
                                     .collect::<EvalResult<Vec<_>>>()?;
                Ok(Value::from(values))
            },
            Expr::This { span } => self.this_value(span.position()),
            Expr::Super { span } => {
                self.method_frame(span.position(), RuntimeErrorKind::SuperOutsideMethod)?;
                Err(RuntimeErrorKind::InvalidSuper.at(span.position()))
            },
            Expr::New { class,
                        arguments,
                        span, } => self.eval_new(class, arguments, span.position()),
        }
    }

    /// Resolves a name through the scope chain.
    ///
    /// # Errors
    /// Returns `UndefinedVariable` if no enclosing scope defines `name`.
    pub(crate) fn lookup(&self, name: &str, position: Position) -> EvalResult<Value> {
        self.environment
            .borrow()
            .get(name)
            .ok_or_else(|| RuntimeErrorKind::UndefinedVariable(name.to_string()).at(position))
    }

    /// Returns the frame of the running method.
    ///
    /// # Errors
    /// Returns `error` when the innermost call is not a method, or when no call
    /// is running.
    pub(crate) fn method_frame(&self,
                               position: Position,
                               error: RuntimeErrorKind)
                               -> EvalResult<MethodFrame> {
        self.frames
            .last()
            .cloned()
            .flatten()
            .ok_or_else(|| error.at(position))
    }

    /// Evaluates `yeh`.
    fn this_value(&self, position: Position) -> EvalResult<Value> {
        self.method_frame(position, RuntimeErrorKind::ThisOutsideMethod)?
            .this
            .map(Value::Instance)
            .ok_or_else(|| RuntimeErrorKind::ThisOutsideMethod.at(position))
    }
}
