//! Integration tests for the uvm-asm CLI.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

fn binary_path() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_uvm-asm"))
}

fn create_temp_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

fn run(source: &Path, output: &Path, flags: &[&str]) -> Output {
    Command::new(binary_path())
        .arg(source)
        .arg(output)
        .args(flags)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run uvm-asm")
}

#[test]
fn build_reference_program() {
    let temp_dir = tempfile::tempdir().unwrap();
    let source = create_temp_file(
        temp_dir.path(),
        "prog.asm",
        "const 125\nload 558\nstore\nbitrev\n",
    );
    let output = temp_dir.path().join("prog.bin");

    let result = run(&source, &output, &[]);

    assert!(result.status.success());
    let binary = fs::read(&output).unwrap();
    assert_eq!(
        binary,
        [
            0x6A, 0x1F, 0x00, 0x00, 0x97, 0x8B, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x3C, 0x00,
            0x00, 0x00,
        ]
    );
    let stdout = String::from_utf8_lossy(&result.stdout);
    assert!(stdout.contains("Assembled 4 instructions"));
}

#[test]
fn test_mode_prints_listing_and_words() {
    let temp_dir = tempfile::tempdir().unwrap();
    let source = create_temp_file(
        temp_dir.path(),
        "labels.asm",
        "start:\n    const 42   ; answer\n    load start\n",
    );
    let output = temp_dir.path().join("labels.bin");

    let result = run(&source, &output, &["--test"]);

    assert!(result.status.success());
    let stdout = String::from_utf8_lossy(&result.stdout);
    assert!(stdout.contains("=== INTERMEDIATE REPRESENTATION ==="));
    assert!(stdout.contains("[0000] CONST 42 (0x2A)"));
    assert!(stdout.contains("[0001] LOAD 0 (0x0)"));
    assert!(stdout.contains("=== LABELS ===\nstart = 0"));
    assert!(stdout.contains("Word 0: [0xAA, 0x0A, 0x00, 0x00]"));
    assert!(stdout.contains("Word 1: [0x17, 0x00, 0x00, 0x00]"));
    assert_eq!(fs::read(&output).unwrap().len(), 8);
}

#[test]
fn assembly_error_reports_line_and_fails() {
    let temp_dir = tempfile::tempdir().unwrap();
    let source = create_temp_file(temp_dir.path(), "bad.asm", "store\nconst\n");
    let output = temp_dir.path().join("bad.bin");

    let result = run(&source, &output, &[]);

    assert!(!result.status.success());
    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(stderr.contains("error: line 2: const expects 1 argument(s), got 0"));
    assert!(!output.exists());
}

#[test]
fn unknown_label_fails_without_output() {
    let temp_dir = tempfile::tempdir().unwrap();
    let source = create_temp_file(temp_dir.path(), "missing.asm", "load nowhere\n");
    let output = temp_dir.path().join("missing.bin");

    let result = run(&source, &output, &[]);

    assert!(!result.status.success());
    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(stderr.contains("error: unknown label 'nowhere'"));
    assert!(!output.exists());
}

#[test]
fn missing_input_file_fails() {
    let temp_dir = tempfile::tempdir().unwrap();
    let source = temp_dir.path().join("absent.asm");
    let output = temp_dir.path().join("absent.bin");

    let result = run(&source, &output, &[]);

    assert!(!result.status.success());
    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(stderr.contains("failed to read"));
}

#[test]
fn empty_source_writes_empty_binary() {
    let temp_dir = tempfile::tempdir().unwrap();
    let source = create_temp_file(temp_dir.path(), "empty.asm", "; nothing here\n\n");
    let output = temp_dir.path().join("empty.bin");

    let result = run(&source, &output, &["--test"]);

    assert!(result.status.success());
    assert!(fs::read(&output).unwrap().is_empty());
}

#[test]
fn missing_arguments_print_usage() {
    let result = Command::new(binary_path())
        .output()
        .expect("failed to run uvm-asm");

    assert!(!result.status.success());
    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(stderr.contains("Usage"));
}
