use std::{collections::HashMap, rc::Rc};

use tracing::debug;

use crate::{
    error::{RuntimeError, RuntimeErrorKind},
    interpreter::{
        evaluator::core::{EvalResult, Interpreter},
        module::Exports,
        parse_source,
        value::core::Value,
    },
    util::position::Position,
};

impl Interpreter {
    /// Executes `lao { names } se "specifier"`.
    ///
    /// The module runs once per run; its exports are cached and later imports
    /// reuse them. Imported names are bound as constants in the current
    /// environment.
    ///
    /// # Errors
    /// - `ModuleLoad` if the module cannot be found, parsed or run.
    /// - `CircularImport` if the module is already being loaded.
    /// - `MissingExport` for names the module does not export.
    pub(crate) fn execute_import(&mut self,
                                 names: &[String],
                                 specifier: &str,
                                 position: Position)
                                 -> EvalResult<()> {
        let exports = self.load_module(specifier, position)?;
        for name in names {
            let Some(value) = exports.get(name).cloned() else {
                return Err(RuntimeErrorKind::MissingExport { path: specifier.to_string(),
                                                             name: name.clone(), }.at(position));
            };
            self.declare(name, value, true, position)?;
        }
        Ok(())
    }

    fn load_module(&mut self, specifier: &str, position: Position) -> EvalResult<Exports> {
        let load_error = |message: String| {
            RuntimeErrorKind::ModuleLoad { path: specifier.to_string(),
                                           message }.at(position)
        };

        let modules = Rc::clone(&self.modules);
        let id = modules.resolve(specifier, self.module_id.as_deref())
                        .map_err(|error| load_error(error.to_string()))?;

        if let Some(exports) = modules.cached(&id) {
            debug!(module = %id, "module cache hit");
            return Ok(exports);
        }
        if modules.is_loading(&id) {
            return Err(RuntimeErrorKind::CircularImport(specifier.to_string()).at(position));
        }

        debug!(module = %id, "loading module");
        let source = modules.read(&id)
                            .map_err(|error| load_error(error.to_string()))?;
        let program = parse_source(&source).map_err(|diagnostics| {
                                               load_error(diagnostics.to_string())
                                           })?;

        modules.begin(&id);
        let mut module = Self::new(self.limits, Rc::clone(&modules), Some(id.clone()));
        let result = module.interpret(&program)
                           .and_then(|()| module.collect_exports());
        modules.finish(&id);
        self.output.append(&mut module.take_output());

        let exports = Rc::new(result.map_err(|error| match error.kind {
                                        RuntimeErrorKind::CircularImport(_) => error,
                                        _ => load_error(error.to_string()),
                                    })?);
        modules.store(id, Rc::clone(&exports));
        Ok(exports)
    }

    /// Gathers the values of every name listed by `bhejo`.
    ///
    /// # Errors
    /// `UndefinedVariable` for an exported name that was never declared.
    pub(crate) fn collect_exports(&self) -> EvalResult<HashMap<String, Value>> {
        self.exports
            .iter()
            .map(|name| {
                self.global(name)
                    .map(|value| (name.clone(), value))
                    .ok_or_else(|| {
                        RuntimeError::from(RuntimeErrorKind::UndefinedVariable(name.clone()))
                    })
            })
            .collect()
    }
}
