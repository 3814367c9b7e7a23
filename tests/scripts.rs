use std::{fs, path::Path};

use desiscript::Session;
use pretty_assertions::assert_eq;
use walkdir::WalkDir;

/// Runs one script and compares it with the `.out` file next to it, and with
/// the `.err` file when the script is expected to fail.
fn check_script(path: &Path) {
    let source = fs::read_to_string(path).unwrap();
    let expected_output = fs::read_to_string(path.with_extension("out")).unwrap_or_default();
    let expected_error = fs::read_to_string(path.with_extension("err")).ok();

    let (output, error) = match Session::new().source_path(path).run(&source) {
        Ok(output) => (output, None),
        Err(error) => (error.output().to_vec(), Some(error.to_string())),
    };

    assert_eq!(output.join("\n"), expected_output.trim_end(), "output of {}", path.display());
    assert_eq!(error.as_deref(),
               expected_error.as_deref().map(str::trim_end),
               "error of {}",
               path.display());
}

#[test]
fn scripts_match_their_expected_output() {
    let scripts: Vec<_> = WalkDir::new("tests/scripts").sort_by_file_name()
                                                       .into_iter()
                                                       .filter_map(Result::ok)
                                                       .filter(|entry| {
                                                           entry.path()
                                                                .extension()
                                                                .is_some_and(|ext| ext == "desi")
                                                       })
                                                       .filter(|entry| {
                                                           !entry.path()
                                                                 .components()
                                                                 .any(|c| c.as_os_str() == "lib")
                                                       })
                                                       .collect();

    assert!(!scripts.is_empty(), "no scripts found under tests/scripts");
    for entry in scripts {
        check_script(entry.path());
    }
}
