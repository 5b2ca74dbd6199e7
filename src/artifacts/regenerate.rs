//! Running the reference program to (re)capture expected output

use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::process::Command;

use tracing::debug;

use super::store::{modified_time, ArtifactStore};
use crate::config::RunConfig;
use crate::error::{Error, Result};
use crate::jobs::{Job, JobSet};
use crate::process::exit_code_of;
use crate::report::Reporter;

/// Bring every job's artifacts up to date, in declaration order
///
/// Creates the artifact directory if needed. Returns how many jobs were
/// regenerated.
pub fn prepare_artifacts<W: Write>(
    jobs: &JobSet,
    store: &ArtifactStore,
    config: &RunConfig,
    reporter: &mut Reporter<W>,
) -> Result<usize> {
    store.ensure_dir()?;
    debug!(dir = %store.dir().display(), "artifact directory ready");

    let job_file_modified = modified_time(jobs.source());
    let mut regenerated = 0;

    for job in jobs {
        let stale = config.regenerate || store.is_stale(job.test_id(), job_file_modified);
        debug!(test_id = job.test_id(), stale, forced = config.regenerate, "artifact check");
        if !stale {
            continue;
        }

        reporter
            .regenerating(job.test_id())
            .map_err(|source| Error::io("writing progress", source))?;
        let status = regenerate(job, store, &config.reference_program)?;
        debug!(test_id = job.test_id(), status, "expected output captured");
        regenerated += 1;
    }

    Ok(regenerated)
}

/// Run the reference program for one job, overwriting its three artifacts
///
/// Returns the exit status that was recorded. On failure none of the job's
/// artifacts are left behind, so the job stays stale for the next run.
pub fn regenerate(job: &Job, store: &ArtifactStore, reference_program: &str) -> Result<i32> {
    capture(job, store, reference_program).inspect_err(|_| store.discard(job.test_id()))
}

fn capture(job: &Job, store: &ArtifactStore, reference_program: &str) -> Result<i32> {
    let test_id = job.test_id();
    let input = File::open(job.input_file()).map_err(|source| Error::InputOpen {
        input: job.input_file().to_path_buf(),
        source,
    })?;

    let stdout = create_artifact(&store.stdout_path(test_id))?;
    let stderr = create_artifact(&store.stderr_path(test_id))?;
    let exit_status_path = store.exit_status_path(test_id);
    let mut exit_status = create_artifact(&exit_status_path)?;

    let status = Command::new(reference_program)
        .args(job.arguments())
        .stdin(input)
        .stdout(stdout)
        .stderr(stderr)
        .status()
        .map_err(|source| Error::ReferenceLaunch {
            program: reference_program.to_string(),
            source,
        })?;

    let code = exit_code_of(status);
    writeln!(exit_status, "{code}").map_err(|source| Error::ArtifactWrite {
        path: exit_status_path,
        source,
    })?;

    Ok(code)
}

fn create_artifact(path: &Path) -> Result<File> {
    File::create(path).map_err(|source| Error::ArtifactWrite {
        path: path.to_path_buf(),
        source,
    })
}
