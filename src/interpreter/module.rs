use std::{
    cell::RefCell,
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
    rc::Rc,
};

use thiserror::Error;

use crate::interpreter::value::core::Value;

/// Why a module's source could not be obtained.
#[derive(Debug, Error)]
pub enum ModuleError {
    /// No module answers to the specifier.
    #[error("module not found")]
    NotFound,
    /// The module file exists but could not be read.
    #[error("cannot read {path}: {source}")]
    Io {
        /// The resolved file path.
        path:   String,
        /// The underlying I/O error.
        source: std::io::Error,
    },
}

/// Resolves import specifiers to modules and reads their sources.
///
/// Loading is split in two so the module cache can be consulted between the
/// steps: a module that already ran is resolved on every import but read only
/// once.
pub trait ModuleLoader {
    /// Returns the identity of the module `specifier` names.
    ///
    /// `importer` is the identity of the importing module, or `None` for the
    /// main script when it has no path. The identity keys the module cache, so
    /// two specifiers naming the same module must resolve to the same identity.
    ///
    /// # Errors
    /// Returns `ModuleError::NotFound` when no module answers to `specifier`.
    fn resolve(&self, specifier: &str, importer: Option<&str>) -> Result<String, ModuleError>;

    /// Returns the source text of a module previously returned by
    /// [`resolve`](Self::resolve).
    ///
    /// # Errors
    /// Returns a `ModuleError` when the source cannot be read.
    fn read(&self, id: &str) -> Result<String, ModuleError>;
}

/// Loads modules from the file system.
///
/// Specifiers resolve relative to the directory of the importing file, or to
/// `root` for imports made by a script without a path. A specifier without an
/// extension that does not name an existing file gets `.desi` appended.
#[derive(Debug, Clone)]
pub struct FsLoader {
    root: PathBuf,
}

impl FsLoader {
    /// Creates a loader resolving top-level imports against `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl Default for FsLoader {
    fn default() -> Self {
        Self::new(".")
    }
}

impl ModuleLoader for FsLoader {
    fn resolve(&self, specifier: &str, importer: Option<&str>) -> Result<String, ModuleError> {
        let base = importer.map(Path::new)
                           .and_then(Path::parent)
                           .map_or_else(|| self.root.clone(), Path::to_path_buf);
        let mut path = base.join(specifier);
        if path.extension().is_none() && !path.exists() {
            path.set_extension("desi");
        }
        if !path.is_file() {
            return Err(ModuleError::NotFound);
        }
        let id = path.canonicalize().unwrap_or(path);
        Ok(id.display().to_string())
    }

    fn read(&self, id: &str) -> Result<String, ModuleError> {
        fs::read_to_string(id).map_err(|source| ModuleError::Io { path: id.to_string(),
                                                                  source })
    }
}

/// Serves module sources from memory, for embedding and tests.
///
/// Specifiers are matched after dropping a leading `./`; a specifier without
/// the `.desi` extension also matches a module registered with it.
///
/// # Example
/// ```
/// use desiscript::interpreter::module::{MemoryLoader, ModuleLoader};
///
/// let loader = MemoryLoader::new().with_module("math.desi", "bhejo pakka PI = 3.14159;");
/// let id = loader.resolve("./math", None).unwrap();
///
/// assert_eq!(id, "math.desi");
/// assert!(loader.read(&id).unwrap().contains("PI"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryLoader {
    modules: HashMap<String, String>,
}

impl MemoryLoader {
    /// Creates an empty loader.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a module under `name`.
    #[must_use]
    pub fn with_module(mut self, name: &str, source: &str) -> Self {
        self.insert(name, source);
        self
    }

    /// Registers a module under `name`, replacing any previous one.
    pub fn insert(&mut self, name: &str, source: &str) {
        self.modules
            .insert(normalize(name).to_string(), source.to_string());
    }
}

fn normalize(specifier: &str) -> &str {
    specifier.strip_prefix("./").unwrap_or(specifier)
}

impl ModuleLoader for MemoryLoader {
    fn resolve(&self, specifier: &str, _importer: Option<&str>) -> Result<String, ModuleError> {
        let name = normalize(specifier);
        [name.to_string(), format!("{name}.desi")].into_iter()
                                                  .find(|id| self.modules.contains_key(id))
                                                  .ok_or(ModuleError::NotFound)
    }

    fn read(&self, id: &str) -> Result<String, ModuleError> {
        self.modules.get(id).cloned().ok_or(ModuleError::NotFound)
    }
}

/// The exported bindings of a module that finished running.
pub type Exports = Rc<HashMap<String, Value>>;

/// The module loader together with the per-run cache.
///
/// One `Modules` is shared by the main interpreter and every module
/// interpreter it starts, so each module runs at most once per run.
pub struct Modules {
    loader:  Rc<dyn ModuleLoader>,
    cache:   RefCell<HashMap<String, Exports>>,
    loading: RefCell<Vec<String>>,
}

impl Modules {
    /// Wraps a loader with an empty cache.
    #[must_use]
    pub fn new(loader: Rc<dyn ModuleLoader>) -> Self {
        Self { loader,
               cache: RefCell::new(HashMap::new()),
               loading: RefCell::new(Vec::new()) }
    }

    /// Resolves `specifier` to a module identity through the loader.
    ///
    /// # Errors
    /// Propagates the loader's `ModuleError`.
    pub fn resolve(&self, specifier: &str, importer: Option<&str>) -> Result<String, ModuleError> {
        self.loader.resolve(specifier, importer)
    }

    /// Reads the source of a resolved module through the loader.
    ///
    /// # Errors
    /// Propagates the loader's `ModuleError`.
    pub fn read(&self, id: &str) -> Result<String, ModuleError> {
        self.loader.read(id)
    }

    /// Exports of a module that already ran.
    #[must_use]
    pub fn cached(&self, id: &str) -> Option<Exports> {
        self.cache.borrow().get(id).cloned()
    }

    /// Whether `id` is currently running, i.e. importing it again would
    /// cycle.
    #[must_use]
    pub fn is_loading(&self, id: &str) -> bool {
        self.loading.borrow().iter().any(|loading| loading == id)
    }

    pub(crate) fn begin(&self, id: &str) {
        self.loading.borrow_mut().push(id.to_string());
    }

    pub(crate) fn finish(&self, id: &str) {
        self.loading.borrow_mut().retain(|loading| loading != id);
    }

    pub(crate) fn store(&self, id: String, exports: Exports) {
        self.cache.borrow_mut().insert(id, exports);
    }
}

impl Default for Modules {
    fn default() -> Self {
        Self::new(Rc::new(FsLoader::default()))
    }
}
