//! Human-readable progress and result lines
//!
//! Every line is flushed as soon as it is written so that the output of an
//! interrupted run is complete up to the interruption.

use std::io::{self, Write};

use super::verdict::{JobOutcome, RunReport};
use crate::PROGRAM_NAME;

pub struct Reporter<W: Write> {
    out: W,
}

impl Reporter<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn regenerating(&mut self, test_id: &str) -> io::Result<()> {
        self.line(format_args!("Regenerating expected output for test {test_id}"))
    }

    pub fn running(&mut self, test_id: &str) -> io::Result<()> {
        self.line(format_args!("Running test: {test_id}"))
    }

    pub fn outcome(&mut self, test_id: &str, outcome: &JobOutcome) -> io::Result<()> {
        match outcome {
            JobOutcome::ExecutionFailed => {
                self.line(format_args!("Unable to execute test job {test_id}"))
            }
            JobOutcome::Compared {
                stdout,
                stderr,
                exit,
            } => {
                self.line(format_args!("Job {test_id}: Stdout {}", stdout.describe()))?;
                self.line(format_args!("Job {test_id}: Stderr {}", stderr.describe()))?;
                self.line(format_args!("Job {test_id}: Exit status {}", exit.describe()))
            }
        }
    }

    pub fn summary(&mut self, report: &RunReport) -> io::Result<()> {
        if report.no_tests_finished() {
            self.line(format_args!("{PROGRAM_NAME}: No tests have been finished"))
        } else {
            self.line(format_args!(
                "{PROGRAM_NAME}: {} out of {} tests passed",
                report.passed, report.run
            ))
        }
    }

    fn line(&mut self, args: std::fmt::Arguments<'_>) -> io::Result<()> {
        self.out.write_fmt(args)?;
        self.out.write_all(b"\n")?;
        self.out.flush()
    }
}
