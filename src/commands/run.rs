use std::io::Write;

use tracing::{debug, warn};

use crate::artifacts::{prepare_artifacts, ArtifactStore};
use crate::config::RunConfig;
use crate::error::{Error, Result};
use crate::interrupt::Interrupt;
use crate::jobs::load_jobs;
use crate::report::{JobOutcome, Reporter, RunReport};
use crate::runner::{JobExecution, JobRunner};

/// Load the jobs, refresh expected output, then run every job in order
/// Usage: reftest [--jobdir dir] [--regenerate] [--reference prog] jobfile program
///
/// Fatal problems (bad job file, unusable artifact directory, missing
/// reference program) are returned as errors before any job runs. Everything
/// that happens to individual jobs ends up in the returned [`RunReport`].
pub fn execute(config: &RunConfig, interrupt: &Interrupt) -> Result<RunReport> {
    execute_with_reporter(config, interrupt, &mut Reporter::stdout())
}

pub fn execute_with_reporter<W: Write>(
    config: &RunConfig,
    interrupt: &Interrupt,
    reporter: &mut Reporter<W>,
) -> Result<RunReport> {
    // 1. Parse and validate the job file
    let jobs = load_jobs(&config.job_file)?;

    // 2. Make sure expected output exists and is current for every job
    let store = ArtifactStore::new(&config.job_dir);
    let regenerated = prepare_artifacts(&jobs, &store, config, reporter)?;
    debug!(jobs = jobs.len(), regenerated, "artifacts ready");

    // 3. Run jobs one at a time, stopping at the first sign of an interrupt
    let runner = JobRunner::new(config, &store, interrupt);
    let mut report = RunReport::default();

    for job in &jobs {
        if interrupt.is_set() {
            report.mark_interrupted();
            break;
        }

        reporter.running(job.test_id()).map_err(report_failed)?;

        let raw = match runner.run_job(job)? {
            JobExecution::Finished(raw) if !interrupt.is_set() => raw,
            JobExecution::Finished(_) | JobExecution::Interrupted => {
                debug!(test_id = job.test_id(), "abandoned after interrupt");
                report.mark_interrupted();
                break;
            }
        };

        let expected_exit = match store.read_expected_exit_status(job.test_id()) {
            Ok(status) => Some(status),
            Err(err) => {
                warn!(test_id = job.test_id(), error = %err, "unreadable expected exit status");
                None
            }
        };

        let outcome = JobOutcome::from_raw(&raw, expected_exit);
        reporter.outcome(job.test_id(), &outcome).map_err(report_failed)?;
        report.record(&outcome);
    }

    // 4. Summarise
    reporter.summary(&report).map_err(report_failed)?;
    Ok(report)
}

fn report_failed(source: std::io::Error) -> Error {
    Error::io("writing report", source)
}
