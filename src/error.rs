//! Fatal error taxonomy
//!
//! Every variant terminates the run before (or instead of) the final summary and
//! maps to a fixed process exit code. Per-job problems (launch failures,
//! mismatches, interruption) are not errors; they are folded into the
//! reporting model in [`crate::report`].

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Process exit codes. The values are an external contract shared with scripts
/// that drive the runner and must not change.
pub mod exit_code {
    pub const SUCCESS: u8 = 0;
    pub const DUPLICATE_ID: u8 = 1;
    pub const USAGE: u8 = 3;
    pub const JOB_FILE_EMPTY: u8 = 4;
    pub const JOB_FILE_OPEN: u8 = 6;
    pub const NO_TESTS_FINISHED: u8 = 9;
    pub const TESTS_FAILED: u8 = 12;
    pub const ARTIFACT_WRITE: u8 = 15;
    pub const CREATE_DIR: u8 = 16;
    pub const REFERENCE_LAUNCH: u8 = 17;
    pub const SYNTAX: u8 = 19;
    pub const INPUT_FILE: u8 = 20;
}

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{}", crate::cli::USAGE)]
    Usage,

    #[error("Unable to open file \"{}\"", .path.display())]
    JobFileOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Job spec file \"{}\" is empty", .path.display())]
    JobFileEmpty { path: PathBuf },

    #[error("Syntax error on line {line} of job spec file \"{}\"", .job_file.display())]
    Syntax { line: usize, job_file: PathBuf },

    #[error("Duplicate Job ID on line {line} of job file \"{}\"", .job_file.display())]
    DuplicateId { line: usize, job_file: PathBuf },

    #[error(
        "Unable to open file \"{}\" specified on line {line} of file \"{}\"",
        .input.display(),
        .job_file.display()
    )]
    InputFile {
        input: PathBuf,
        line: usize,
        job_file: PathBuf,
        #[source]
        source: io::Error,
    },

    /// An input file that passed validation could no longer be opened when the
    /// reference program needed it.
    #[error("Unable to open input file \"{}\"", .input.display())]
    InputOpen {
        input: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Can't create directory named \"{}\"", .dir.display())]
    CreateDir {
        dir: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Unable to open file \"{}\" for writing", .path.display())]
    ArtifactWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Unable to execute reference program \"{program}\"")]
    ReferenceLaunch {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("I/O failure while {context}: {source}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },
}

impl Error {
    /// Exit code the process terminates with when this error ends the run
    pub fn exit_code(&self) -> u8 {
        match self {
            Error::Usage => exit_code::USAGE,
            Error::JobFileOpen { .. } => exit_code::JOB_FILE_OPEN,
            Error::JobFileEmpty { .. } => exit_code::JOB_FILE_EMPTY,
            Error::Syntax { .. } => exit_code::SYNTAX,
            Error::DuplicateId { .. } => exit_code::DUPLICATE_ID,
            Error::InputFile { .. } | Error::InputOpen { .. } => exit_code::INPUT_FILE,
            Error::CreateDir { .. } => exit_code::CREATE_DIR,
            Error::ArtifactWrite { .. } => exit_code::ARTIFACT_WRITE,
            Error::ReferenceLaunch { .. } => exit_code::REFERENCE_LAUNCH,
            Error::Io { .. } => exit_code::TESTS_FAILED,
        }
    }

    pub(crate) fn io(context: impl Into<String>, source: io::Error) -> Self {
        Error::Io {
            context: context.into(),
            source,
        }
    }
}
