//! Job and job set types

use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// A single declared test case
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    test_id: String,
    input_file: PathBuf,
    arguments: Vec<OsString>,
}

impl Job {
    pub fn new(
        test_id: impl Into<String>,
        input_file: impl Into<PathBuf>,
        arguments: Vec<OsString>,
    ) -> Self {
        Self {
            test_id: test_id.into(),
            input_file: input_file.into(),
            arguments,
        }
    }

    /// Unique name; also the stem of the job's artifact files
    pub fn test_id(&self) -> &str {
        &self.test_id
    }

    /// File bound to the invoked program's stdin
    pub fn input_file(&self) -> &Path {
        &self.input_file
    }

    /// Arguments passed to both the reference program and the program under test
    pub fn arguments(&self) -> &[OsString] {
        &self.arguments
    }
}

/// Jobs in declaration order, with distinct ids
#[derive(Debug, Clone)]
pub struct JobSet {
    source: PathBuf,
    jobs: Vec<Job>,
}

impl JobSet {
    /// Callers guarantee the ids are distinct; [`crate::jobs::load_jobs`] is
    /// the only public way to build one.
    pub(crate) fn new(source: PathBuf, jobs: Vec<Job>) -> Self {
        Self { source, jobs }
    }

    /// The job file this set was loaded from
    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Job> {
        self.jobs.iter()
    }
}

impl<'a> IntoIterator for &'a JobSet {
    type Item = &'a Job;
    type IntoIter = std::slice::Iter<'a, Job>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
