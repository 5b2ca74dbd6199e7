//! Tests for per-job verdicts and the final tally

use super::helpers::*;
use reftest::error::exit_code;
use serial_test::serial;

#[test]
#[serial]
fn test_exact_reproduction_passes() {
    let ws = Workspace::new().unwrap();
    let reference = ws.script("good", REFERENCE_SCRIPT).unwrap();
    let subject = ws.script("subject", REFERENCE_SCRIPT).unwrap();
    let input = ws.input("t1.in", "cold\nwarm\n").unwrap();
    let jobs = ws.job_file(&[("t1", &input, &["--start", "cold"])]).unwrap();

    let (report, output) = run_captured(&ws.config(&jobs, &subject, &reference)).unwrap();

    assert_eq!(
        output,
        "Regenerating expected output for test t1\n\
         Running test: t1\n\
         Job t1: Stdout matches\n\
         Job t1: Stderr matches\n\
         Job t1: Exit status matches\n\
         reftest: 1 out of 1 tests passed\n"
    );
    assert_eq!((report.run, report.passed), (1, 1));
    assert_eq!(report.exit_code(), exit_code::SUCCESS);
}

#[test]
#[serial]
fn test_different_exit_status_only() {
    let ws = Workspace::new().unwrap();
    let reference = ws.script("good", REFERENCE_SCRIPT).unwrap();
    let subject = ws
        .script("subject", &REFERENCE_SCRIPT.replace("exit 3", "exit 0"))
        .unwrap();
    let input = ws.input("t1.in", "cold\nwarm\n").unwrap();
    let jobs = ws.job_file(&[("t1", &input, &[])]).unwrap();

    let (report, output) = run_captured(&ws.config(&jobs, &subject, &reference)).unwrap();

    assert_eq!(
        verdict_lines(&output),
        [
            "Job t1: Stdout matches",
            "Job t1: Stderr matches",
            "Job t1: Exit status differs",
        ]
    );
    assert_eq!((report.run, report.passed), (1, 0));
    assert_eq!(report.exit_code(), exit_code::TESTS_FAILED);
    assert!(output.ends_with("reftest: 0 out of 1 tests passed\n"));
}

#[test]
#[serial]
fn test_arguments_are_forwarded_to_subject() {
    let ws = Workspace::new().unwrap();
    let reference = ws.script("good", REFERENCE_SCRIPT).unwrap();
    // Ignores its arguments, so stderr differs from the reference
    let subject = ws
        .script("subject", "cat\necho \"args: \" >&2\nexit 3\n")
        .unwrap();
    let input = ws.input("t1.in", "cold\n").unwrap();
    let jobs = ws.job_file(&[("t1", &input, &["--len", "4"])]).unwrap();

    let (_, output) = run_captured(&ws.config(&jobs, &subject, &reference)).unwrap();

    assert_eq!(
        verdict_lines(&output),
        [
            "Job t1: Stdout matches",
            "Job t1: Stderr differs",
            "Job t1: Exit status matches",
        ]
    );
}

#[test]
#[serial]
fn test_missing_subject_is_unable_to_execute() {
    let ws = Workspace::new().unwrap();
    let reference = ws.script("good", REFERENCE_SCRIPT).unwrap();
    let subject = ws.path().join("does-not-exist");
    let input = ws.input("t1.in", "cold\n").unwrap();
    let jobs = ws.job_file(&[("t1", &input, &[])]).unwrap();

    let (report, output) = run_captured(&ws.config(&jobs, &subject, &reference)).unwrap();

    assert_eq!(verdict_lines(&output), ["Unable to execute test job t1"]);
    assert!(!output.contains("matches"));
    assert!(!output.contains("differs"));
    assert_eq!((report.run, report.passed), (1, 0));
    assert_eq!(report.exit_code(), exit_code::TESTS_FAILED);
}

#[test]
#[serial]
fn test_jobs_report_in_declaration_order() {
    let ws = Workspace::new().unwrap();
    let reference = ws.script("good", REFERENCE_SCRIPT).unwrap();
    // Fails only when given "--break"
    let subject = ws
        .script(
            "subject",
            "cat\necho \"args: $*\" >&2\nif [ \"$1\" = --break ]; then exit 1; fi\nexit 3\n",
        )
        .unwrap();
    let input = ws.input("in", "ward\n").unwrap();
    let jobs = ws
        .job_file(&[
            ("zeta", &input, &[]),
            ("alpha", &input, &["--break"]),
            ("mid", &input, &["x"]),
        ])
        .unwrap();

    let (report, output) = run_captured(&ws.config(&jobs, &subject, &reference)).unwrap();

    let running: Vec<&str> = output
        .lines()
        .filter_map(|line| line.strip_prefix("Running test: "))
        .collect();
    assert_eq!(running, ["zeta", "alpha", "mid"]);
    assert!(output.contains("Job alpha: Exit status differs"));
    assert_eq!((report.run, report.passed), (3, 2));
    assert!(output.ends_with("reftest: 2 out of 3 tests passed\n"));
}

#[test]
#[serial]
fn test_hung_subject_times_out() {
    let ws = Workspace::new().unwrap();
    let reference = ws.script("good", REFERENCE_SCRIPT).unwrap();
    let subject = ws.script("subject", "exec sleep 30\n").unwrap();
    let input = ws.input("t1.in", "cold\n").unwrap();
    let jobs = ws.job_file(&[("t1", &input, &[])]).unwrap();
    let config = ws
        .config(&jobs, &subject, &reference)
        .with_timeout(std::time::Duration::from_millis(500));

    let started = std::time::Instant::now();
    let (report, output) = run_captured(&config).unwrap();

    assert!(started.elapsed() < std::time::Duration::from_secs(10));
    assert!(output.contains("Job t1: Exit status differs"));
    assert_eq!((report.run, report.passed), (1, 0));
}
