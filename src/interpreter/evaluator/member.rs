use std::rc::Rc;

use crate::{
    ast::{Access, Expr, Property},
    error::{RuntimeError, RuntimeErrorKind},
    interpreter::{
        evaluator::core::{EvalResult, Interpreter},
        value::{
            core::Value,
            object::{BoundMethod, Class},
        },
    },
    util::{
        num::{f64_to_index, usize_to_f64},
        position::Position,
    },
};

/// Writes may grow an array up to this many elements.
const MAX_ARRAY_LENGTH: usize = 1 << 24;

/// A member key after evaluation: a name, or a computed index value.
enum Key {
    Name(String),
    Index(Value),
}

impl Key {
    /// The key as a property name, as used for instance fields.
    fn name(&self) -> String {
        match self {
            Self::Name(name) => name.clone(),
            Self::Index(value) => value.to_string(),
        }
    }
}

impl Interpreter {
    /// Evaluates `object.name` or `object[index]`.
    ///
    /// Instances resolve own fields first, then methods along the class chain.
    /// Classes expose their static methods. Arrays and strings support
    /// `.length` and index reads; an index that is out of range or not a
    /// whole number reads as `undefined`.
    ///
    /// # Errors
    /// - `NullAccess` when `object` is `khali` or `undefined`.
    /// - `UndefinedProperty` for names the value does not have.
    /// - `InaccessibleMethod` for private or protected methods reached from
    ///   outside their class hierarchy.
    pub(crate) fn eval_member(&mut self,
                              object: &Expr,
                              property: &Property,
                              position: Position)
                              -> EvalResult<Value> {
        if let (Expr::Super { .. }, Property::Named(name)) = (object, property) {
            return self.super_member(name, position);
        }

        let target = self.evaluate(object)?;
        let key = self.eval_key(property)?;
        self.get_member(&target, &key, position)
    }

    fn eval_key(&mut self, property: &Property) -> EvalResult<Key> {
        Ok(match property {
               Property::Named(name) => Key::Name(name.clone()),
               Property::Computed(index) => Key::Index(self.evaluate(index)?),
           })
    }

    fn get_member(&self, target: &Value, key: &Key, position: Position) -> EvalResult<Value> {
        match (target, key) {
            (Value::Null | Value::Undefined, key) => {
                Err(RuntimeErrorKind::NullAccess { action: "read",
                                                   name:   key.name(),
                                                   target: target.type_name(), }.at(position))
            },
            (Value::Instance(instance), key) => {
                let name = key.name();
                if let Some(value) = instance.borrow().fields.get(&name) {
                    return Ok(value.clone());
                }
                let class = Rc::clone(&instance.borrow().class);
                let Some((home, method)) = Class::find_method(&class, &name) else {
                    return Err(undefined_property(name, target, position));
                };
                self.check_access(&home, &name, method.access, position)?;
                Ok(Value::BoundMethod(Rc::new(BoundMethod { receiver: Some(Rc::clone(instance)),
                                                            method,
                                                            home })))
            },
            (Value::Class(class), key) => {
                let name = key.name();
                let Some((home, method)) = Class::find_static(class, &name) else {
                    return Err(undefined_property(name, target, position));
                };
                self.check_access(&home, &name, method.access, position)?;
                Ok(Value::BoundMethod(Rc::new(BoundMethod { receiver: None,
                                                            method,
                                                            home })))
            },
            (Value::Array(items), Key::Name(name)) if name == "length" => {
                Ok(Value::Number(usize_to_f64(items.borrow().len())))
            },
            (Value::Array(items), Key::Index(index)) => {
                Ok(read_index(index).and_then(|i| items.borrow().get(i).cloned())
                                    .unwrap_or(Value::Undefined))
            },
            (Value::String(s), Key::Name(name)) if name == "length" => {
                Ok(Value::Number(usize_to_f64(s.chars().count())))
            },
            (Value::String(s), Key::Index(index)) => {
                Ok(read_index(index).and_then(|i| s.chars().nth(i))
                                    .map_or(Value::Undefined, |c| Value::from(c.to_string())))
            },
            (_, key) => Err(undefined_property(key.name(), target, position)),
        }
    }

    /// Evaluates `target = value`.
    ///
    /// Identifiers rebind the nearest binding. Instance members set a field,
    /// array indices write an element, growing the array with `undefined`
    /// when the index lies past the end.
    ///
    /// # Errors
    /// - `UndefinedVariable` / `ConstantReassignment` for identifiers.
    /// - `NullAccess` when the target object is `khali` or `undefined`.
    /// - `InvalidIndex` for negative or fractional array indices.
    /// - `InvalidAssignmentTarget` for anything else.
    pub(crate) fn eval_assign(&mut self,
                              target: &Expr,
                              value: &Expr,
                              position: Position)
                              -> EvalResult<Value> {
        match target {
            Expr::Identifier { name, span } => {
                let value = self.evaluate(value)?;
                self.environment
                    .borrow_mut()
                    .assign(name, value.clone())
                    .map_err(|kind| kind.at(span.position()))?;
                Ok(value)
            },
            Expr::Member { object, property, .. } => {
                let object = self.evaluate(object)?;
                let key = self.eval_key(property)?;
                let value = self.evaluate(value)?;
                Self::set_member(&object, key, value.clone(), position)?;
                Ok(value)
            },
            _ => Err(RuntimeErrorKind::InvalidAssignmentTarget.at(position)),
        }
    }

    fn set_member(target: &Value, key: Key, value: Value, position: Position) -> EvalResult<()> {
        match (target, key) {
            (Value::Null | Value::Undefined, key) => {
                Err(RuntimeErrorKind::NullAccess { action: "set",
                                                   name:   key.name(),
                                                   target: target.type_name(), }.at(position))
            },
            (Value::Instance(instance), key) => {
                instance.borrow_mut().fields.insert(key.name(), value);
                Ok(())
            },
            (Value::Array(items), Key::Index(index)) => {
                let Some(i) = read_index(&index).filter(|&i| i < MAX_ARRAY_LENGTH) else {
                    return Err(RuntimeErrorKind::InvalidIndex(index.to_string()).at(position));
                };
                let mut items = items.borrow_mut();
                if i >= items.len() {
                    items.resize(i + 1, Value::Undefined);
                }
                items[i] = value;
                Ok(())
            },
            _ => Err(RuntimeErrorKind::InvalidAssignmentTarget.at(position)),
        }
    }

    /// Enforces `niji` and `surakshit`.
    ///
    /// Both are only reachable while the running method's receiver (or, in a
    /// static method, its class) is the declaring class or a subclass of it.
    fn check_access(&self,
                    home: &Rc<Class>,
                    name: &str,
                    access: Access,
                    position: Position)
                    -> EvalResult<()> {
        let label = match access {
            Access::Public => return Ok(()),
            Access::Private => "private",
            Access::Protected => "protected",
        };
        let allowed = self.frames.last().cloned().flatten().is_some_and(|frame| {
                          match frame.this {
                              Some(this) => this.borrow().class.is_subclass_of(home),
                              None => frame.home.is_subclass_of(home),
                          }
                      });
        if allowed {
            return Ok(());
        }
        Err(RuntimeErrorKind::InaccessibleMethod { method: name.to_string(),
                                                   class:  home.name.clone(),
                                                   access: label, }.at(position))
    }
}

fn undefined_property(name: String, target: &Value, position: Position) -> RuntimeError {
    let target = match target {
        Value::Instance(_) | Value::Class(_) => target.to_string(),
        other => other.type_name().to_string(),
    };
    RuntimeErrorKind::UndefinedProperty { name, target }.at(position)
}

/// Index for a read; anything but a whole, in-range number misses.
fn read_index(index: &Value) -> Option<usize> {
    match index {
        Value::Number(n) => f64_to_index(*n),
        _ => None,
    }
}
