//! Artifact directory layout and staleness

use std::fs::{self, DirBuilder};
use std::io;
use std::os::unix::fs::DirBuilderExt;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use tracing::{debug, warn};

use crate::error::{Error, Result};

/// Owner-only read/write/execute
const DIR_MODE: u32 = 0o700;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    Stdout,
    Stderr,
    ExitStatus,
}

impl ArtifactKind {
    pub const ALL: [ArtifactKind; 3] = [
        ArtifactKind::Stdout,
        ArtifactKind::Stderr,
        ArtifactKind::ExitStatus,
    ];

    pub fn extension(self) -> &'static str {
        match self {
            ArtifactKind::Stdout => "stdout",
            ArtifactKind::Stderr => "stderr",
            ArtifactKind::ExitStatus => "exitstatus",
        }
    }
}

/// The working directory holding every job's artifacts
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    dir: PathBuf,
}

impl ArtifactStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path(&self, test_id: &str, kind: ArtifactKind) -> PathBuf {
        self.dir.join(format!("{test_id}.{}", kind.extension()))
    }

    pub fn stdout_path(&self, test_id: &str) -> PathBuf {
        self.path(test_id, ArtifactKind::Stdout)
    }

    pub fn stderr_path(&self, test_id: &str) -> PathBuf {
        self.path(test_id, ArtifactKind::Stderr)
    }

    pub fn exit_status_path(&self, test_id: &str) -> PathBuf {
        self.path(test_id, ArtifactKind::ExitStatus)
    }

    /// Create the directory (not its parents) with owner-only permissions.
    ///
    /// An existing directory is left as it is.
    pub fn ensure_dir(&self) -> Result<()> {
        match DirBuilder::new().mode(DIR_MODE).create(&self.dir) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::AlreadyExists => Ok(()),
            Err(source) => Err(Error::CreateDir {
                dir: self.dir.clone(),
                source,
            }),
        }
    }

    /// Whether a job's artifacts must be regenerated
    ///
    /// Stale when any artifact is missing or strictly older than
    /// `job_file_modified`. An unknown job file time makes everything stale.
    pub fn is_stale(&self, test_id: &str, job_file_modified: Option<SystemTime>) -> bool {
        let Some(job_file_modified) = job_file_modified else {
            return true;
        };

        ArtifactKind::ALL.iter().any(|&kind| {
            match modified_time(&self.path(test_id, kind)) {
                Some(artifact_modified) => job_file_modified > artifact_modified,
                None => true,
            }
        })
    }

    /// Remove whatever artifacts exist for a job
    pub fn discard(&self, test_id: &str) {
        for kind in ArtifactKind::ALL {
            let path = self.path(test_id, kind);
            match fs::remove_file(&path) {
                Ok(()) => debug!(path = %path.display(), "discarded artifact"),
                Err(err) if err.kind() == io::ErrorKind::NotFound => {}
                Err(err) => warn!(path = %path.display(), error = %err, "cannot discard artifact"),
            }
        }
    }

    /// Expected exit status recorded for a job
    pub fn read_expected_exit_status(&self, test_id: &str) -> io::Result<i32> {
        let path = self.exit_status_path(test_id);
        let text = fs::read_to_string(&path)?;
        text.trim().parse().map_err(|err| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("{}: {err}", path.display()),
            )
        })
    }
}

/// Modification time, or None if the file is missing or the time unavailable
pub(crate) fn modified_time(path: &Path) -> Option<SystemTime> {
    fs::metadata(path).and_then(|meta| meta.modified()).ok()
}
