//! Running one job against the program under test
//!
//! # Topology
//!
//! ```text
//!  input file ──stdin──▶ subject ──stdout──▶ cmp <id>.stdout  (exit 0 = match)
//!                               └──stderr──▶ cmp <id>.stderr  (exit 0 = match)
//! ```
//!
//! All three processes are started before the runner waits on any of them, so
//! the comparators drain the pipes while the subject is still writing and a
//! full pipe buffer can never stall the subject. The comparators' own stdout
//! and stderr go to the null device.
//!
//! # Timeout
//!
//! The three processes share one deadline ([`crate::config::DEFAULT_JOB_TIMEOUT`]
//! unless configured otherwise). The runner waits in short bounded slices
//! until every process has exited, the deadline passes, or the interrupt flag
//! is raised. At the deadline anything still running is killed and reaped.
//! On interruption everything is killed and reaped and the job yields no
//! verdict.
//!
//! Job duration is not fixed: a job ends as soon as all three processes have
//! exited, and only a job that hangs runs for the full timeout.

mod wait;

use std::fs::File;
use std::path::Path;
use std::process::{Command, Stdio};
use std::time::Instant;

use tracing::{debug, warn};

use crate::artifacts::ArtifactStore;
use crate::config::RunConfig;
use crate::error::{Error, Result};
use crate::interrupt::Interrupt;
use crate::jobs::Job;
use crate::process::{ProcessOutcome, Supervised};

use wait::{wait_all, WaitEnd};

const SUBJECT: &str = "subject";
const STDOUT_COMPARATOR: &str = "stdout comparator";
const STDERR_COMPARATOR: &str = "stderr comparator";

/// How each of a job's three processes ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawOutcome {
    pub subject: ProcessOutcome,
    pub stdout_comparator: ProcessOutcome,
    pub stderr_comparator: ProcessOutcome,
}

/// Result of [`JobRunner::run_job`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobExecution {
    Finished(RawOutcome),
    /// Abandoned because the interrupt flag was raised; all processes were killed
    Interrupted,
}

pub struct JobRunner<'a> {
    config: &'a RunConfig,
    store: &'a ArtifactStore,
    interrupt: &'a Interrupt,
}

impl<'a> JobRunner<'a> {
    pub fn new(config: &'a RunConfig, store: &'a ArtifactStore, interrupt: &'a Interrupt) -> Self {
        Self {
            config,
            store,
            interrupt,
        }
    }

    /// Run the program under test for `job` and compare against its artifacts
    ///
    /// Every process started here has been reaped by the time this returns,
    /// whichever way it returns.
    pub fn run_job(&self, job: &Job) -> Result<JobExecution> {
        let started = Instant::now();
        let deadline = started + self.config.timeout;
        let mut processes = self.launch(job);

        let end = wait_all(
            &mut processes,
            deadline,
            self.interrupt,
            self.config.poll_interval,
        )
        .map_err(|source| Error::io(format!("waiting for job {}", job.test_id()), source))?;

        match end {
            WaitEnd::AllExited => {}
            WaitEnd::DeadlineReached => {
                for process in processes.iter_mut().filter(|p| p.is_running()) {
                    debug!(test_id = job.test_id(), process = process.label(), "timed out");
                    process.terminate().map_err(|source| {
                        let context =
                            format!("reaping {} of job {}", process.label(), job.test_id());
                        Error::io(context, source)
                    })?;
                }
            }
            WaitEnd::Interrupted => {
                debug!(test_id = job.test_id(), "interrupted, abandoning job");
                for process in processes.iter_mut() {
                    if let Err(err) = process.terminate() {
                        warn!(process = process.label(), error = %err, "failed to reap");
                    }
                }
                return Ok(JobExecution::Interrupted);
            }
        }

        let [subject, stdout_comparator, stderr_comparator] = processes;
        let raw = RawOutcome {
            subject: subject.finish(),
            stdout_comparator: stdout_comparator.finish(),
            stderr_comparator: stderr_comparator.finish(),
        };
        debug!(
            test_id = job.test_id(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            ?raw,
            "job finished"
        );
        Ok(JobExecution::Finished(raw))
    }

    /// Start the subject and both comparators, wired together
    fn launch(&self, job: &Job) -> [Supervised; 3] {
        let mut subject = match File::open(job.input_file()) {
            Ok(input) => Supervised::spawn(
                SUBJECT,
                Command::new(&self.config.program)
                    .args(job.arguments())
                    .stdin(input)
                    .stdout(Stdio::piped())
                    .stderr(Stdio::piped()),
            ),
            Err(err) => {
                warn!(
                    test_id = job.test_id(),
                    input = %job.input_file().display(),
                    error = %err,
                    "cannot open input file"
                );
                Supervised::not_launched(SUBJECT)
            }
        };

        // Without a running subject there is nothing to compare
        let (Some(stdout), Some(stderr)) = (subject.take_stdout(), subject.take_stderr()) else {
            return [
                subject,
                Supervised::not_launched(STDOUT_COMPARATOR),
                Supervised::not_launched(STDERR_COMPARATOR),
            ];
        };

        let stdout_comparator = self.spawn_comparator(
            STDOUT_COMPARATOR,
            &self.store.stdout_path(job.test_id()),
            stdout,
        );
        let stderr_comparator = self.spawn_comparator(
            STDERR_COMPARATOR,
            &self.store.stderr_path(job.test_id()),
            stderr,
        );

        [subject, stdout_comparator, stderr_comparator]
    }

    fn spawn_comparator(
        &self,
        label: &'static str,
        expected: &Path,
        stream: impl Into<Stdio>,
    ) -> Supervised {
        // The Command (and with it our copy of the pipe's read end) is dropped on return
        let mut command = Command::new(&self.config.comparator);
        command
            .arg(expected)
            .stdin(stream)
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        Supervised::spawn(label, &mut command)
    }
}
