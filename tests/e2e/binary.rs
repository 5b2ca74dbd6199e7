//! Tests that drive the compiled `reftest` binary

use std::fs;
use std::process::{Command, Output};

use super::helpers::*;
use serial_test::serial;

fn reftest(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_reftest"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to run reftest binary")
}

fn stderr_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn stdout_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_no_arguments_is_usage_error() {
    let output = reftest(&[]);

    assert_eq!(output.status.code(), Some(3));
    assert!(stderr_of(&output).starts_with("Usage: reftest"));
    assert!(output.stdout.is_empty());
}

#[test]
fn test_unknown_option_is_usage_error() {
    let output = reftest(&["--diffshow", "jobs.txt", "./subject"]);

    assert_eq!(output.status.code(), Some(3));
    assert!(stderr_of(&output).starts_with("Usage: reftest"));
}

#[test]
fn test_unreadable_job_file() {
    let ws = Workspace::new().unwrap();
    let missing = ws.path().join("missing.txt");

    let output = reftest(&[&missing.display().to_string(), "./subject"]);

    assert_eq!(output.status.code(), Some(6));
    assert!(stderr_of(&output).contains("Unable to open file"));
}

#[test]
fn test_empty_job_file() {
    let ws = Workspace::new().unwrap();
    let jobs = ws.input("jobs.txt", "# nothing but comments\n\n").unwrap();

    let output = reftest(&[&jobs.display().to_string(), "./subject"]);

    assert_eq!(output.status.code(), Some(4));
    assert!(stderr_of(&output).contains("is empty"));
}

#[test]
fn test_duplicate_id_reports_line() {
    let ws = Workspace::new().unwrap();
    let input = ws.input("in", "cold\n").unwrap();
    let jobs = ws
        .input(
            "jobs.txt",
            &format!("t1\t{0}\nt1\t{0}\n", input.display()),
        )
        .unwrap();

    let output = reftest(&[&jobs.display().to_string(), "./subject"]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = stderr_of(&output);
    assert!(stderr.starts_with("reftest: Duplicate Job ID on line 2"), "{stderr}");
    assert!(output.stdout.is_empty());
}

#[test]
fn test_syntax_error_exit_code() {
    let ws = Workspace::new().unwrap();
    let jobs = ws.input("jobs.txt", "only-an-id\n").unwrap();

    let output = reftest(&[&jobs.display().to_string(), "./subject"]);

    assert_eq!(output.status.code(), Some(19));
    assert!(stderr_of(&output).contains("Syntax error on line 1"));
}

#[test]
#[serial]
fn test_full_run() {
    let ws = Workspace::new().unwrap();
    let reference = ws.script("good", REFERENCE_SCRIPT).unwrap();
    let subject = ws
        .script("subject", &REFERENCE_SCRIPT.replace("exit 3", "exit 4"))
        .unwrap();
    let input = ws.input("in", "cold\n").unwrap();
    let jobs = ws
        .job_file(&[("t1", &input, &["a"]), ("t2", &input, &["b"])])
        .unwrap();
    let job_dir = ws.artifact_dir();

    let run = |program: &str| {
        reftest(&[
            "--jobdir",
            &job_dir.display().to_string(),
            "--reference",
            &reference.display().to_string(),
            &jobs.display().to_string(),
            program,
        ])
    };

    let passing = run(&reference.display().to_string());
    assert_eq!(passing.status.code(), Some(0), "{}", stderr_of(&passing));
    assert!(stdout_of(&passing).ends_with("reftest: 2 out of 2 tests passed\n"));
    assert_eq!(fs::read_to_string(job_dir.join("t2.exitstatus")).unwrap(), "3\n");

    let failing = run(&subject.display().to_string());
    assert_eq!(failing.status.code(), Some(12));
    let stdout = stdout_of(&failing);
    assert!(!stdout.contains("Regenerating"));
    assert!(stdout.contains("Job t1: Exit status differs"));
    assert!(stdout.ends_with("reftest: 0 out of 2 tests passed\n"));
}
