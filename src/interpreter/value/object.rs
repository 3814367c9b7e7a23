use std::{cell::RefCell, collections::HashMap, fmt, rc::Rc};

use crate::{
    ast::{Access, ClassDecl, FunctionDecl},
    interpreter::{environment::Env, value::core::Value},
};

/// A user function closed over the environment it was declared in.
pub struct Function {
    /// The shared declaration.
    pub decl:    Rc<FunctionDecl>,
    /// The environment active at declaration time.
    pub closure: Env,
}

/// A method as stored in a class.
#[derive(Debug)]
pub struct Method {
    /// The method's parameters and body.
    pub decl:           Rc<FunctionDecl>,
    /// Declared visibility.
    pub access:         Access,
    /// Whether this is the `nirmaan` method.
    pub is_constructor: bool,
}

/// A class at runtime.
pub struct Class {
    /// The class name.
    pub name:           String,
    /// The resolved parent class.
    pub superclass:     Option<Rc<Self>>,
    /// Instance methods, including the constructor.
    pub methods:        HashMap<String, Rc<Method>>,
    /// Methods declared `sthir`.
    pub static_methods: HashMap<String, Rc<Method>>,
    /// The environment the class was declared in; method bodies close over it.
    pub closure:        Env,
}

impl Class {
    /// Builds a class from its declaration.
    #[must_use]
    pub fn new(decl: &ClassDecl, superclass: Option<Rc<Self>>, closure: Env) -> Self {
        let mut methods = HashMap::new();
        let mut static_methods = HashMap::new();
        for method in &decl.methods {
            let table = if method.is_static { &mut static_methods } else { &mut methods };
            table.insert(method.name().to_string(),
                         Rc::new(Method { decl:           Rc::clone(&method.function),
                                          access:         method.access,
                                          is_constructor: method.is_constructor, }));
        }
        Self { name: decl.name.clone(),
               superclass,
               methods,
               static_methods,
               closure }
    }

    /// Finds an instance method on `class` or its ancestors.
    ///
    /// # Returns
    /// The method and the class that declares it, which is where `upar`
    /// resolves from while the method runs.
    #[must_use]
    pub fn find_method(class: &Rc<Self>, name: &str) -> Option<(Rc<Self>, Rc<Method>)> {
        Self::find_in(class, name, |class| &class.methods)
    }

    /// Finds a static method on `class` or its ancestors.
    #[must_use]
    pub fn find_static(class: &Rc<Self>, name: &str) -> Option<(Rc<Self>, Rc<Method>)> {
        Self::find_in(class, name, |class| &class.static_methods)
    }

    fn find_in(class: &Rc<Self>,
               name: &str,
               table: fn(&Self) -> &HashMap<String, Rc<Method>>)
               -> Option<(Rc<Self>, Rc<Method>)> {
        let mut current = Some(Rc::clone(class));
        while let Some(class) = current {
            if let Some(method) = table(&class).get(name) {
                return Some((Rc::clone(&class), Rc::clone(method)));
            }
            current = class.superclass.clone();
        }
        None
    }

    /// Whether `self` is `ancestor` or inherits from it.
    #[must_use]
    pub fn is_subclass_of(&self, ancestor: &Self) -> bool {
        let mut current = Some(self);
        while let Some(class) = current {
            if std::ptr::eq(class, ancestor) {
                return true;
            }
            current = class.superclass.as_deref();
        }
        false
    }
}

// Closures can reach themselves through their environment, so the debug
// output leaves environments out.
impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function")
         .field("name", &self.decl.name)
         .field("parameters", &self.decl.parameters)
         .finish_non_exhaustive()
    }
}

impl fmt::Debug for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Class")
         .field("name", &self.name)
         .field("superclass", &self.superclass.as_ref().map(|class| &class.name))
         .field("methods", &self.methods.keys().collect::<Vec<_>>())
         .finish_non_exhaustive()
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instance")
         .field("class", &self.class.name)
         .field("fields", &self.fields.keys().collect::<Vec<_>>())
         .finish()
    }
}

/// An object created with `naya`.
pub struct Instance {
    /// The class the instance was created from.
    pub class:  Rc<Class>,
    /// Fields assigned through `yeh.name = ...` or `obj.name = ...`.
    pub fields: HashMap<String, Value>,
}

impl Instance {
    /// Creates an instance with no fields.
    #[must_use]
    pub fn new(class: Rc<Class>) -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self { class,
                                    fields: HashMap::new() }))
    }
}

/// A method looked up through an instance or a class, ready to be called.
#[derive(Debug)]
pub struct BoundMethod {
    /// The instance `yeh` refers to; `None` for static methods.
    pub receiver: Option<Rc<RefCell<Instance>>>,
    /// The method itself.
    pub method:   Rc<Method>,
    /// The class that declares the method.
    pub home:     Rc<Class>,
}
