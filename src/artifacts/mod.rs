//! Reference artifacts: the expected output of each job
//!
//! For every job the working directory holds three files, named after the
//! job's id:
//!
//! - `<id>.stdout` - expected standard output, byte for byte
//! - `<id>.stderr` - expected standard error, byte for byte
//! - `<id>.exitstatus` - expected exit status as a decimal integer
//!
//! They are produced by running the trusted reference program and are reused
//! until they go stale: any of them missing, or the job file modified more
//! recently than any of them. `--regenerate` treats every artifact as stale.
//! All artifacts are brought up to date before the first job runs.

mod regenerate;
mod store;

pub use regenerate::{prepare_artifacts, regenerate};
pub use store::{ArtifactKind, ArtifactStore};
