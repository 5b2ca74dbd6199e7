//! Turning raw process outcomes into verdicts

use crate::error::exit_code;
use crate::process::ProcessOutcome;
use crate::runner::RawOutcome;

/// Result of comparing one of a job's three observable streams
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Match,
    Differ,
}

impl Verdict {
    pub fn from_match(matched: bool) -> Self {
        if matched {
            Verdict::Match
        } else {
            Verdict::Differ
        }
    }

    pub fn is_match(self) -> bool {
        self == Verdict::Match
    }

    pub fn describe(self) -> &'static str {
        match self {
            Verdict::Match => "matches",
            Verdict::Differ => "differs",
        }
    }
}

/// Result of a job that ran to completion (or to its timeout)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobOutcome {
    /// At least one of the three processes could not be started; no verdicts
    ExecutionFailed,
    Compared {
        stdout: Verdict,
        stderr: Verdict,
        exit: Verdict,
    },
}

impl JobOutcome {
    /// Derive verdicts from the three processes' outcomes
    ///
    /// Comparators signal a match by exiting 0. `expected_exit` is the status
    /// recorded in the job's `.exitstatus` artifact; `None` (unreadable) never
    /// matches. A process killed at the deadline never matches.
    pub fn from_raw(raw: &RawOutcome, expected_exit: Option<i32>) -> Self {
        let outcomes = [raw.subject, raw.stdout_comparator, raw.stderr_comparator];
        if outcomes.contains(&ProcessOutcome::LaunchFailed) {
            return JobOutcome::ExecutionFailed;
        }

        let compared_equal = |outcome: ProcessOutcome| outcome == ProcessOutcome::Exited(0);
        let exit = match (raw.subject, expected_exit) {
            (ProcessOutcome::Exited(actual), Some(expected)) => actual == expected,
            _ => false,
        };

        JobOutcome::Compared {
            stdout: Verdict::from_match(compared_equal(raw.stdout_comparator)),
            stderr: Verdict::from_match(compared_equal(raw.stderr_comparator)),
            exit: Verdict::from_match(exit),
        }
    }

    pub fn passed(&self) -> bool {
        match self {
            JobOutcome::ExecutionFailed => false,
            JobOutcome::Compared {
                stdout,
                stderr,
                exit,
            } => stdout.is_match() && stderr.is_match() && exit.is_match(),
        }
    }
}

/// Tally of finished jobs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunReport {
    pub run: usize,
    pub passed: usize,
    /// Stopped early by an interrupt
    pub interrupted: bool,
}

impl RunReport {
    pub fn record(&mut self, outcome: &JobOutcome) {
        self.run += 1;
        if outcome.passed() {
            self.passed += 1;
        }
    }

    pub fn mark_interrupted(&mut self) {
        self.interrupted = true;
    }

    /// Interrupted before any job produced a verdict
    pub fn no_tests_finished(&self) -> bool {
        self.interrupted && self.run == 0
    }

    pub fn all_passed(&self) -> bool {
        self.run > 0 && self.passed == self.run
    }

    pub fn exit_code(&self) -> u8 {
        if self.no_tests_finished() {
            exit_code::NO_TESTS_FINISHED
        } else if self.all_passed() {
            exit_code::SUCCESS
        } else {
            exit_code::TESTS_FAILED
        }
    }
}
