use std::{cell::RefCell, collections::HashMap, rc::Rc};

use crate::{error::RuntimeErrorKind, interpreter::value::core::Value};

/// A scope shared between the interpreter and the closures that capture it.
pub type Env = Rc<RefCell<Environment>>;

/// A named slot in a scope.
#[derive(Debug, Clone)]
pub struct Binding {
    /// Current value.
    pub value:    Value,
    /// Whether the binding was declared with `pakka`.
    pub constant: bool,
}

/// One level of the lexical scope chain.
///
/// A new environment is created for the global scope, for every call and for
/// every block. Lookups and assignments walk outwards through `parent`;
/// declarations always land in the environment they are made in.
#[derive(Debug, Default)]
pub struct Environment {
    bindings: HashMap<String, Binding>,
    parent:   Option<Env>,
}

impl Environment {
    /// Creates an empty global environment.
    #[must_use]
    pub fn global() -> Env {
        Rc::new(RefCell::new(Self::default()))
    }

    /// Creates an empty environment nested in `parent`.
    #[must_use]
    pub fn child(parent: &Env) -> Env {
        Rc::new(RefCell::new(Self { bindings: HashMap::new(),
                                    parent:   Some(Rc::clone(parent)), }))
    }

    /// Declares `name` in this environment.
    ///
    /// Re-declaring a mutable binding replaces it; re-declaring a constant
    /// fails and keeps the old value.
    ///
    /// # Errors
    /// Returns `ConstantReassignment` if `name` is a constant in this
    /// environment.
    ///
    /// # Example
    /// ```
    /// use desiscript::interpreter::{environment::Environment, value::core::Value};
    ///
    /// let env = Environment::global();
    /// env.borrow_mut().define("PI", Value::Number(3.14159), true).unwrap();
    ///
    /// assert!(env.borrow_mut().define("PI", Value::Number(1.0), false).is_err());
    /// assert_eq!(env.borrow().get("PI"), Some(Value::Number(3.14159)));
    /// ```
    pub fn define(&mut self,
                  name: &str,
                  value: Value,
                  constant: bool)
                  -> Result<(), RuntimeErrorKind> {
        if self.bindings.get(name).is_some_and(|binding| binding.constant) {
            return Err(RuntimeErrorKind::ConstantReassignment(name.to_string()));
        }
        self.bindings
            .insert(name.to_string(), Binding { value, constant });
        Ok(())
    }

    /// Looks `name` up through the scope chain.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Value> {
        if let Some(binding) = self.bindings.get(name) {
            return Some(binding.value.clone());
        }
        self.parent
            .as_ref()
            .and_then(|parent| parent.borrow().get(name))
    }

    /// Rebinds `name` in the nearest environment that defines it.
    ///
    /// # Errors
    /// Returns `UndefinedVariable` if no environment defines `name`, or
    /// `ConstantReassignment` if the nearest binding is constant.
    pub fn assign(&mut self, name: &str, value: Value) -> Result<(), RuntimeErrorKind> {
        if let Some(binding) = self.bindings.get_mut(name) {
            if binding.constant {
                return Err(RuntimeErrorKind::ConstantReassignment(name.to_string()));
            }
            binding.value = value;
            return Ok(());
        }
        match &self.parent {
            Some(parent) => parent.borrow_mut().assign(name, value),
            None => Err(RuntimeErrorKind::UndefinedVariable(name.to_string())),
        }
    }
}
