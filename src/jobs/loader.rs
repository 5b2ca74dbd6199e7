//! Job file parsing and validation
//!
//! The file is split on raw bytes, so input paths and arguments reach the
//! invoked programs exactly as written. Test ids name artifact files and
//! appear in the report, so they must be valid UTF-8.

use std::collections::HashSet;
use std::ffi::{OsStr, OsString};
use std::fs::{self, File};
use std::os::unix::ffi::OsStrExt;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::spec::{Job, JobSet};
use crate::error::{Error, Result};

const LINE_SEPARATOR: u8 = b'\n';
const FIELD_SEPARATOR: u8 = b'\t';
const COMMENT_PREFIX: u8 = b'#';
const PATH_SEPARATOR: char = '/';

/// Load and validate the job file at `path`
///
/// Fails with the first problem found, in file order. Does not touch the
/// artifact directory.
pub fn load_jobs(path: &Path) -> Result<JobSet> {
    let bytes = fs::read(path).map_err(|source| Error::JobFileOpen {
        path: path.to_path_buf(),
        source,
    })?;

    let jobs = parse_jobs(path, &bytes)?;
    debug!(job_file = %path.display(), jobs = jobs.len(), "loaded job file");
    Ok(jobs)
}

fn parse_jobs(job_file: &Path, contents: &[u8]) -> Result<JobSet> {
    let mut jobs = Vec::new();
    let mut seen = HashSet::new();

    for (index, line) in contents.split(|&byte| byte == LINE_SEPARATOR).enumerate() {
        let line_number = index + 1;
        if line.is_empty() || line.starts_with(&[COMMENT_PREFIX]) {
            continue;
        }

        let job = parse_line(line, line_number, job_file, &seen)?;
        seen.insert(job.test_id().to_string());
        jobs.push(job);
    }

    if jobs.is_empty() {
        return Err(Error::JobFileEmpty {
            path: job_file.to_path_buf(),
        });
    }

    Ok(JobSet::new(job_file.to_path_buf(), jobs))
}

fn parse_line(
    line: &[u8],
    line_number: usize,
    job_file: &Path,
    seen: &HashSet<String>,
) -> Result<Job> {
    // A record ends at its first empty field
    let fields: Vec<&[u8]> = line
        .split(|&byte| byte == FIELD_SEPARATOR)
        .take_while(|field| !field.is_empty())
        .collect();

    let syntax_error = || Error::Syntax {
        line: line_number,
        job_file: job_file.to_path_buf(),
    };

    let [test_id, input, arguments @ ..] = fields.as_slice() else {
        return Err(syntax_error());
    };

    let test_id = std::str::from_utf8(test_id).map_err(|_| syntax_error())?;
    if test_id.contains(PATH_SEPARATOR) {
        return Err(syntax_error());
    }

    if seen.contains(test_id) {
        return Err(Error::DuplicateId {
            line: line_number,
            job_file: job_file.to_path_buf(),
        });
    }

    let input_file = PathBuf::from(OsStr::from_bytes(input));
    File::open(&input_file).map_err(|source| Error::InputFile {
        input: input_file.clone(),
        line: line_number,
        job_file: job_file.to_path_buf(),
        source,
    })?;

    Ok(Job::new(
        test_id,
        input_file,
        arguments
            .iter()
            .map(|arg| OsString::from(OsStr::from_bytes(arg)))
            .collect(),
    ))
}
