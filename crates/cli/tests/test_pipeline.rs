//! End-to-end pipeline tests: source file in, class files on disk out.

use javelin_cli::{compile_file, Options, PipelineError};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn write_source(dir: &Path, name: &str, source: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, source).unwrap();
    path
}

fn options_for(dir: &TempDir) -> Options {
    Options {
        output: dir.path().join("out"),
        ..Options::default()
    }
}

#[test]
fn compiles_a_file_to_a_class_file() {
    let dir = TempDir::new().unwrap();
    let source = write_source(
        dir.path(),
        "Greeter.jav",
        r#"class Greeter { void greet() { println("hi"); } }"#,
    );

    let written = compile_file(&source, &options_for(&dir)).unwrap();

    assert_eq!(written.len(), 1);
    assert_eq!(written[0], dir.path().join("out").join("Greeter.class"));
    let bytes = fs::read(&written[0]).unwrap();
    assert_eq!(&bytes[..4], &[0xCA, 0xFE, 0xBA, 0xBE]);
}

#[test]
fn writes_one_class_file_per_class() {
    let dir = TempDir::new().unwrap();
    let source = write_source(dir.path(), "pair.jav", "class A { } class B { }");

    let written = compile_file(&source, &options_for(&dir)).unwrap();

    let names: Vec<String> = written
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["A.class", "B.class"]);
}

#[test]
fn creates_the_output_directory() {
    let dir = TempDir::new().unwrap();
    let source = write_source(dir.path(), "a.jav", "class A { }");
    let options = Options {
        output: dir.path().join("deep").join("nested"),
        ..Options::default()
    };

    compile_file(&source, &options).unwrap();

    assert!(options.output.join("A.class").is_file());
}

#[test]
fn missing_input_is_an_io_error() {
    let dir = TempDir::new().unwrap();
    let err = compile_file(&dir.path().join("absent.jav"), &options_for(&dir)).unwrap_err();
    assert!(matches!(err, PipelineError::Io(_)));
}

#[test]
fn syntax_errors_stop_before_anything_is_written() {
    let dir = TempDir::new().unwrap();
    let source = write_source(dir.path(), "bad.jav", "class A { void m() { x = ; } }");
    let options = options_for(&dir);

    let err = compile_file(&source, &options).unwrap_err();

    assert!(matches!(err, PipelineError::Parse(_)));
    assert!(!options.output.exists());
}

#[test]
fn type_errors_stop_before_anything_is_written() {
    let dir = TempDir::new().unwrap();
    let source = write_source(
        dir.path(),
        "bad.jav",
        "class A { void m() { int x; x = true; } }",
    );
    let options = options_for(&dir);

    let err = compile_file(&source, &options).unwrap_err();

    assert!(matches!(err, PipelineError::Semantic(_)));
    assert!(!options.output.exists());
}

#[test]
fn generator_errors_stop_before_anything_is_written() {
    let dir = TempDir::new().unwrap();
    // Assigning to a field has no local slot to store into.
    let source = write_source(dir.path(), "bad.jav", "class A { int x; void m() { x = 1; } }");
    let options = options_for(&dir);

    let err = compile_file(&source, &options).unwrap_err();

    assert!(matches!(err, PipelineError::Codegen(_)));
    assert!(!options.output.exists());
}
