use std::rc::Rc;

use tracing::debug;

use crate::{
    ast::{ClassDecl, Expr},
    error::RuntimeErrorKind,
    interpreter::{
        evaluator::core::{EvalResult, Interpreter, MethodFrame},
        value::{
            core::Value,
            object::{BoundMethod, Class, Instance},
        },
    },
    util::position::Position,
};

impl Interpreter {
    /// Declares a class and binds its name as a constant.
    ///
    /// # Errors
    /// - `UndefinedVariable` if the superclass name is not bound.
    /// - `NotAClass` if it is bound to something other than a class.
    /// - `ConstantReassignment` if the class name is already a constant here.
    pub(crate) fn declare_class(&mut self, decl: &ClassDecl) -> EvalResult<()> {
        let position = decl.span.position();
        let superclass = match &decl.superclass {
            Some(name) => match self.lookup(name, position)? {
                Value::Class(class) => Some(class),
                _ => return Err(RuntimeErrorKind::NotAClass(name.clone()).at(position)),
            },
            None => None,
        };

        debug!(class = %decl.name,
               superclass = ?decl.superclass,
               methods = decl.methods.len(),
               "declaring class");

        let class = Class::new(decl, superclass, Rc::clone(&self.environment));
        self.declare(&decl.name, Value::Class(Rc::new(class)), true, position)
    }

    /// Evaluates `naya Class(arguments)`.
    ///
    /// Allocates an instance and runs the nearest constructor along the class
    /// chain with `yeh` bound to it. The constructor's return value is
    /// ignored; the result is always the instance.
    ///
    /// # Errors
    /// `NotAClass` when the name is bound to anything but a class.
    pub(crate) fn eval_new(&mut self,
                           class_name: &str,
                           arguments: &[Expr],
                           position: Position)
                           -> EvalResult<Value> {
        let Value::Class(class) = self.lookup(class_name, position)? else {
            return Err(RuntimeErrorKind::NotAClass(class_name.to_string()).at(position));
        };
        let arguments = arguments.iter()
                                 .map(|argument| self.evaluate(argument))
                                 .collect::<EvalResult<Vec<_>>>()?;

        let instance = Instance::new(Rc::clone(&class));
        if let Some((home, constructor)) = Class::find_method(&class, "constructor")
           && constructor.is_constructor
        {
            let frame = MethodFrame { this: Some(Rc::clone(&instance)),
                                      home: Rc::clone(&home) };
            self.call_function(&constructor.decl, &home.closure, arguments, Some(frame), position)?;
        }
        Ok(Value::Instance(instance))
    }

    /// Evaluates `upar(arguments)`: runs the parent's constructor on the
    /// current receiver.
    ///
    /// Resolution starts at the parent of the class that declares the running
    /// method, not at the receiver's class, so chains of three or more classes
    /// reach each constructor once. A parent without any constructor makes the
    /// call a no-op.
    pub(crate) fn call_super_constructor(&mut self,
                                         arguments: Vec<Value>,
                                         position: Position)
                                         -> EvalResult<Value> {
        let (frame, parent) = self.super_target(position)?;
        if let Some((home, constructor)) = Class::find_method(&parent, "constructor")
           && constructor.is_constructor
        {
            let frame = MethodFrame { this: frame.this,
                                      home: Rc::clone(&home) };
            self.call_function(&constructor.decl, &home.closure, arguments, Some(frame), position)?;
        }
        Ok(Value::Null)
    }

    /// Evaluates `upar.name`: the parent's version of a method, bound to the
    /// current receiver. Inside a static method this finds the parent's static
    /// method instead.
    ///
    /// # Errors
    /// `UndefinedProperty` when no ancestor declares `name`.
    pub(crate) fn super_member(&self, name: &str, position: Position) -> EvalResult<Value> {
        let (frame, parent) = self.super_target(position)?;
        let found = match frame.this {
            Some(_) => Class::find_method(&parent, name),
            None => Class::find_static(&parent, name),
        };
        let Some((home, method)) = found else {
            return Err(RuntimeErrorKind::UndefinedProperty { name:   name.to_string(),
                                                             target: format!("<class {}>",
                                                                             parent.name), }.at(position));
        };
        Ok(Value::BoundMethod(Rc::new(BoundMethod { receiver: frame.this,
                                                    method,
                                                    home })))
    }

    fn super_target(&self, position: Position) -> EvalResult<(MethodFrame, Rc<Class>)> {
        let frame = self.method_frame(position, RuntimeErrorKind::SuperOutsideMethod)?;
        let parent = frame.home
                          .superclass
                          .clone()
                          .ok_or_else(|| {
                              RuntimeErrorKind::NoSuperclass(frame.home.name.clone()).at(position)
                          })?;
        Ok((frame, parent))
    }
}
