//! End-to-end tests for the `posti` binary
//!
//! These tests verify the exit status contract:
//! - A fatal abort under `--yes` exits 1
//! - An unknown profile key exits 1
//! - An operator halt, a dry run and a clean run exit 0

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use tempfile::TempDir;

const DOCUMENT: &str = r#"{
    "broken": {
        "label": "Broken",
        "steps": [
            {"title": "Fails", "command": "exit 3"},
            {"title": "Never", "command": "echo should-not-run"}
        ]
    },
    "fine": {
        "label": "Fine",
        "steps": [{"title": "Succeeds", "command": "true", "confirm": null}]
    }
}"#;

fn write_document(dir: &TempDir, content: &str) -> PathBuf {
    let path = dir.path().join("profiles.json");
    fs::write(&path, content).expect("write profile document");
    path
}

fn posti(document: &Path, args: &[&str], stdin: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_posti"))
        .arg("--profiles")
        .arg(document)
        .arg("--no-color")
        .args(args)
        .env("SHELL", "/bin/sh")
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .env_remove("FORCE_COLOR")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn posti");

    child
        .stdin
        .take()
        .expect("piped stdin")
        .write_all(stdin.as_bytes())
        .expect("write stdin");
    child.wait_with_output().expect("wait for posti")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn test_auto_confirm_failure_exits_one() {
    let dir = TempDir::new().unwrap();
    let doc = write_document(&dir, DOCUMENT);
    let output = posti(&doc, &["--profile", "broken", "--yes"], "");

    assert_eq!(output.status.code(), Some(1));
    let out = stdout(&output);
    assert!(out.contains("Run aborted: Command failed with exit code 3: exit 3"));
    assert!(!out.contains(">>> STEP 2/2"));
}

#[test]
fn test_unknown_profile_exits_one() {
    let dir = TempDir::new().unwrap();
    let doc = write_document(&dir, DOCUMENT);
    let output = posti(&doc, &["--profile", "nope", "--yes"], "");

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Unknown profile 'nope'. Available: broken, fine"));
}

#[test]
fn test_operator_halt_exits_zero() {
    let dir = TempDir::new().unwrap();
    let doc = write_document(&dir, DOCUMENT);
    // No dry run, then decline to continue after the failure.
    let output = posti(&doc, &["--profile", "broken"], "n\nn\n");

    assert_eq!(output.status.code(), Some(0));
    let out = stdout(&output);
    assert!(out.contains("Continue with remaining steps?"));
    assert!(out.contains("Halting on operator request."));
    assert!(out.contains("(halted)"));
    assert!(!out.contains(">>> STEP 2/2"));
}

#[test]
fn test_dry_run_exits_zero() {
    let dir = TempDir::new().unwrap();
    let doc = write_document(&dir, DOCUMENT);
    let output = posti(&doc, &["--profile", "broken", "--dry-run", "--yes"], "");

    assert_eq!(output.status.code(), Some(0));
    let out = stdout(&output);
    assert!(out.contains("[dry-run] exit 3"));
    assert!(out.contains("All done."));
}

#[test]
fn test_clean_run_exits_zero() {
    let dir = TempDir::new().unwrap();
    let doc = write_document(&dir, DOCUMENT);
    let output = posti(&doc, &["--profile", "fine", "--yes"], "");

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("Summary: 1 completed"));
}

#[test]
fn test_closed_input_exits_one() {
    let dir = TempDir::new().unwrap();
    let doc = write_document(&dir, DOCUMENT);
    let output = posti(&doc, &["--profile", "fine"], "");

    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_load_error_reports_cause_once_without_escapes() {
    let dir = TempDir::new().unwrap();
    let doc = write_document(&dir, r#"{"p": {"steps": [{"confirm": "yes"}]}}"#);
    let output = posti(&doc, &["list"], "");

    assert_eq!(output.status.code(), Some(1));
    let err = stderr(&output);
    assert_eq!(err.matches("invalid type").count(), 1, "{err}");
    assert!(!err.contains('\u{1b}'));
}

#[test]
fn test_validate_accepts_null_flags() {
    let dir = TempDir::new().unwrap();
    let doc = write_document(&dir, DOCUMENT);
    let output = Command::new(env!("CARGO_BIN_EXE_posti"))
        .arg("validate")
        .arg(&doc)
        .output()
        .expect("run posti validate");

    assert!(output.status.success());
    assert!(stdout(&output).contains("2 profile(s), 3 step(s)"));
}
