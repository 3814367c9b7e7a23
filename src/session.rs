use std::{path::PathBuf, rc::Rc};

use tracing::debug;

use crate::{
    error::Error,
    interpreter::{
        evaluator::core::{Interpreter, Limits},
        module::{FsLoader, ModuleLoader, Modules},
        parse_source,
    },
};

/// Configures and runs programs.
///
/// A session carries the runtime limits, the path of the script (used to
/// resolve relative imports) and the module loader. Each call to
/// [`run`](Self::run) starts from a fresh global scope and an empty module
/// cache.
///
/// # Example
/// ```
/// use desiscript::Session;
///
/// let session = Session::new().max_loop_iterations(5);
///
/// let output = session.run("rakho i = 0\njabtak (i < 3) { chaap i; i = i + 1; }").unwrap();
/// assert_eq!(output, ["0", "1", "2"]);
///
/// let error = session.run("jabtak (sahi) { chaap 1; }").unwrap_err();
/// assert_eq!(error.output().len(), 5);
/// ```
pub struct Session {
    limits:      Limits,
    source_path: Option<PathBuf>,
    loader:      Option<Rc<dyn ModuleLoader>>,
}

impl Session {
    /// Creates a session with the default limits and the file-system loader.
    #[must_use]
    pub fn new() -> Self {
        Self { limits:      Limits::default(),
               source_path: None,
               loader:      None, }
    }

    /// Replaces both runtime limits.
    #[must_use]
    pub const fn limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    /// Sets how many iterations one `jabtak` statement may run.
    #[must_use]
    pub const fn max_loop_iterations(mut self, max: usize) -> Self {
        self.limits.max_loop_iterations = max;
        self
    }

    /// Sets how many calls may be active at once.
    #[must_use]
    pub const fn max_call_depth(mut self, max: usize) -> Self {
        self.limits.max_call_depth = max;
        self
    }

    /// Records where the script lives; relative imports resolve from its
    /// directory.
    #[must_use]
    pub fn source_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.source_path = Some(path.into());
        self
    }

    /// Serves imports from `loader` instead of the file system.
    #[must_use]
    pub fn loader(mut self, loader: impl ModuleLoader + 'static) -> Self {
        self.loader = Some(Rc::new(loader));
        self
    }

    /// Parses and runs `source`, returning the printed lines.
    ///
    /// # Errors
    /// - [`Error::Compile`] when the source does not lex or parse; nothing
    ///   runs.
    /// - [`Error::Runtime`] when evaluation fails; the error carries the lines
    ///   printed before the failure.
    pub fn run(&self, source: &str) -> Result<Vec<String>, Error> {
        let program = parse_source(source)?;

        let loader: Rc<dyn ModuleLoader> = match &self.loader {
            Some(loader) => Rc::clone(loader),
            None => Rc::new(FsLoader::default()),
        };
        let modules = Rc::new(Modules::new(loader));
        let module_id = self.source_path
                            .as_ref()
                            .map(|path| path.canonicalize().unwrap_or_else(|_| path.clone()))
                            .map(|path| path.display().to_string());
        debug!(limits = ?self.limits, module = ?module_id, "running program");

        if let Some(id) = &module_id {
            modules.begin(id);
        }
        let mut interpreter = Interpreter::new(self.limits, modules, module_id);
        match interpreter.interpret(&program) {
            Ok(()) => Ok(interpreter.take_output()),
            Err(error) => Err(Error::Runtime { error,
                                               output: interpreter.take_output() }),
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
