use std::{cell::RefCell, fs, rc::Rc};

use desiscript::{
    Error, Session,
    error::RuntimeErrorKind,
    interpreter::module::{FsLoader, MemoryLoader, ModuleError, ModuleLoader},
};
use indoc::indoc;
use pretty_assertions::assert_eq;

fn math() -> MemoryLoader {
    MemoryLoader::new().with_module("math.desi",
                                    indoc! {r#"
                                        chaap "math loaded"
                                        bhejo pakka PI = 3.14159
                                        bhejo kaam square(x) { wapas x * x }
                                        kaam hidden() { wapas 0 }
                                    "#})
}

fn run_with(loader: MemoryLoader, source: &str) -> Vec<String> {
    Session::new().loader(loader)
                  .run(source)
                  .unwrap_or_else(|error| panic!("{source}\n{error}"))
}

fn runtime_error(loader: MemoryLoader, source: &str) -> RuntimeErrorKind {
    match Session::new().loader(loader).run(source) {
        Err(Error::Runtime { error, .. }) => error.kind,
        other => panic!("expected a runtime error, got {other:?}"),
    }
}

#[test]
fn imported_names_are_usable() {
    let source = indoc! {r#"
        chaap "start"
        lao { PI, square } se "./math"
        chaap square(3)
        chaap PI
    "#};

    assert_eq!(run_with(math(), source), ["start", "math loaded", "9", "3.14159"]);
}

#[test]
fn modules_run_once_per_session() {
    let loader = math().with_module("geometry.desi",
                                    indoc! {r#"
                                        lao { PI } se "./math"
                                        bhejo kaam area(r) { wapas PI * r * r }
                                    "#});
    let source = indoc! {r#"
        lao { square } se "./math"
        lao { area } se "./geometry"
        lao { PI } se "math.desi"
        chaap area(1) == PI
    "#};

    assert_eq!(run_with(loader, source), ["math loaded", "true"]);
}

/// Serves modules from memory and remembers every read.
struct RecordingLoader {
    inner: MemoryLoader,
    reads: Rc<RefCell<Vec<String>>>,
}

impl ModuleLoader for RecordingLoader {
    fn resolve(&self, specifier: &str, importer: Option<&str>) -> Result<String, ModuleError> {
        self.inner.resolve(specifier, importer)
    }

    fn read(&self, id: &str) -> Result<String, ModuleError> {
        self.reads.borrow_mut().push(id.to_string());
        self.inner.read(id)
    }
}

#[test]
fn cached_modules_are_not_read_again() {
    let reads = Rc::new(RefCell::new(Vec::new()));
    let inner = math().with_module("a", "lao { PI } se \"./math\"\nbhejo pakka A = PI")
                      .with_module("b", "lao { PI } se \"math\"\nbhejo pakka B = PI");
    let loader = RecordingLoader { inner,
                                   reads: Rc::clone(&reads) };
    let source = indoc! {r#"
        lao { A } se "./a"
        lao { B } se "./b"
        lao { square } se "./math.desi"
        chaap A == B
    "#};

    let output = Session::new().loader(loader).run(source).unwrap();

    assert_eq!(output, ["math loaded", "true"]);
    assert_eq!(*reads.borrow(), ["a", "math.desi", "b"]);
}

#[test]
fn export_lists_name_earlier_declarations() {
    let loader = MemoryLoader::new().with_module("shapes",
                                                 indoc! {"
                                                     kaksha Square {
                                                         nirmaan(side) { yeh.side = side }
                                                         area() { wapas yeh.side * yeh.side }
                                                     }
                                                     rakho unit = naya Square(1)
                                                     bhejo { Square, unit };
                                                 "});
    let source = indoc! {r#"
        lao { Square, unit } se "shapes"
        chaap naya Square(4).area()
        chaap unit.area()
    "#};

    assert_eq!(run_with(loader, source), ["16", "1"]);
}

#[test]
fn module_closures_keep_their_own_globals() {
    let loader = MemoryLoader::new().with_module("counter",
                                                 indoc! {"
                                                     rakho count = 0
                                                     bhejo kaam next() {
                                                         count = count + 1
                                                         wapas count
                                                     }
                                                 "});
    let source = indoc! {r#"
        lao { next } se "./counter"
        rakho count = 100
        next()
        chaap next()
        chaap count
    "#};

    assert_eq!(run_with(loader, source), ["2", "100"]);
}

#[test]
fn imports_are_constant() {
    assert_eq!(runtime_error(math(), "lao { PI } se \"./math\"\nPI = 3"),
               RuntimeErrorKind::ConstantReassignment("PI".into()));
}

#[test]
fn missing_exports_are_reported() {
    assert_eq!(runtime_error(math(), "lao { hidden } se \"./math\""),
               RuntimeErrorKind::MissingExport { path: "./math".into(),
                                                 name: "hidden".into(), });
}

#[test]
fn unknown_modules_fail_to_load() {
    let Err(error) = Session::new().loader(MemoryLoader::new())
                                   .run("chaap 1\nlao { x } se \"nowhere\"")
    else {
        panic!("import should fail");
    };

    assert_eq!(error.output(), ["1"]);
    assert_eq!(error.to_string(),
               "RuntimeError: Cannot load module \"nowhere\": module not found at line 2, column 1");
}

#[test]
fn broken_modules_fail_to_load() {
    let parse = MemoryLoader::new().with_module("bad", "rakho = 1");
    let run = MemoryLoader::new().with_module("bad", "chaap \"partial\"\nrakho x = 1 / 0");

    assert!(matches!(runtime_error(parse, "lao { x } se \"bad\""),
                     RuntimeErrorKind::ModuleLoad { path, message }
                     if path == "bad" && message.starts_with("CompileError: Expected variable name")));

    let Err(Error::Runtime { error, output }) = Session::new().loader(run)
                                                              .run("lao { x } se \"bad\"")
    else {
        panic!("import should fail");
    };
    assert_eq!(output, ["partial"]);
    assert!(matches!(error.kind,
                     RuntimeErrorKind::ModuleLoad { message, .. }
                     if message.contains("division by zero")));
}

#[test]
fn circular_imports_are_detected() {
    let loader = MemoryLoader::new().with_module("a", "lao { b } se \"./b\"\nbhejo pakka a = 1")
                                    .with_module("b", "lao { a } se \"./a\"\nbhejo pakka b = 2");

    assert_eq!(runtime_error(loader, "lao { a } se \"./a\""),
               RuntimeErrorKind::CircularImport("./a".into()));
}

#[test]
fn a_module_importing_itself_is_circular() {
    let loader = MemoryLoader::new().with_module("self", "lao { x } se \"self\"\nbhejo pakka x = 1");

    assert_eq!(runtime_error(loader, "lao { x } se \"self\""),
               RuntimeErrorKind::CircularImport("self".into()));
}

#[test]
fn file_imports_resolve_relative_to_the_importer() {
    let path = "tests/fixtures/modules/main.desi";
    let source = fs::read_to_string(path).unwrap();

    let output = Session::new().source_path(path).run(&source).unwrap();

    assert_eq!(output, ["Namaste, Duniya", "Namaste, Rust"]);
}

#[test]
fn scripts_without_a_path_resolve_against_the_loader_root() {
    let output = Session::new().loader(FsLoader::new("tests/fixtures/modules/lib"))
                               .run("lao { greet } se \"./util\"\nchaap greet(\"root\")")
                               .unwrap();

    assert_eq!(output, ["Namaste, root"]);
}

#[test]
fn missing_files_are_not_found() {
    let error = Session::new().loader(FsLoader::new("tests/fixtures/modules"))
                              .run("lao { x } se \"./absent\"")
                              .unwrap_err();

    assert!(error.to_string()
                 .contains("Cannot load module \"./absent\": module not found"));
}
