//! Run configuration

use std::path::PathBuf;
use std::time::Duration;

/// Directory holding expected-output artifacts when none is given
pub const DEFAULT_JOB_DIR: &str = "./tmp";

/// Trusted implementation that produces expected output
pub const DEFAULT_REFERENCE_PROGRAM: &str = "good-uqwordladder";

/// Byte comparator: `cmp FILE` compares FILE against its stdin and exits 0 on a match
pub const DEFAULT_COMPARATOR: &str = "cmp";

/// Wall-clock budget shared by the subject and both comparators of one job (1.5 seconds)
pub const DEFAULT_JOB_TIMEOUT: Duration = Duration::from_millis(1500);

/// Upper bound on a single blocking wait while supervising a job
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Everything a run needs to know
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Tab-separated job specification file
    pub job_file: PathBuf,
    /// Program under test
    pub program: String,
    /// Directory holding `<id>.stdout`, `<id>.stderr` and `<id>.exitstatus`
    pub job_dir: PathBuf,
    /// Treat every artifact as stale
    pub regenerate: bool,
    pub reference_program: String,
    pub comparator: String,
    pub timeout: Duration,
    pub poll_interval: Duration,
}

impl RunConfig {
    /// Create a configuration with defaults for everything but the two required inputs
    pub fn new(job_file: impl Into<PathBuf>, program: impl Into<String>) -> Self {
        Self {
            job_file: job_file.into(),
            program: program.into(),
            job_dir: PathBuf::from(DEFAULT_JOB_DIR),
            regenerate: false,
            reference_program: DEFAULT_REFERENCE_PROGRAM.to_string(),
            comparator: DEFAULT_COMPARATOR.to_string(),
            timeout: DEFAULT_JOB_TIMEOUT,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    pub fn with_job_dir(mut self, job_dir: impl Into<PathBuf>) -> Self {
        self.job_dir = job_dir.into();
        self
    }

    pub fn with_regenerate(mut self, regenerate: bool) -> Self {
        self.regenerate = regenerate;
        self
    }

    pub fn with_reference_program(mut self, program: impl Into<String>) -> Self {
        self.reference_program = program.into();
        self
    }

    pub fn with_comparator(mut self, comparator: impl Into<String>) -> Self {
        self.comparator = comparator.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
