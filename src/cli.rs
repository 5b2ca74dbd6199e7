//! Command-line surface

use clap::error::ErrorKind;
use clap::Parser;
use std::path::PathBuf;

use crate::config::{RunConfig, DEFAULT_JOB_DIR, DEFAULT_REFERENCE_PROGRAM};

/// Printed (alone) for any malformed command line
pub const USAGE: &str =
    "Usage: reftest [--jobdir dir] [--regenerate] [--reference prog] jobfile program";

#[derive(Parser, Debug)]
#[command(name = "reftest")]
#[command(
    about = "Run a program against expected output captured from a trusted implementation",
    long_about = None
)]
#[command(version)]
pub struct Cli {
    /// Directory for expected-output files (created if missing)
    #[arg(long, value_name = "DIR", default_value = DEFAULT_JOB_DIR)]
    pub jobdir: PathBuf,

    /// Regenerate all expected output, even if it is up to date
    #[arg(long)]
    pub regenerate: bool,

    /// Trusted program used to generate expected output
    #[arg(long, value_name = "PROG", default_value = DEFAULT_REFERENCE_PROGRAM)]
    pub reference: String,

    /// Job specification file (tab separated: id, input file, arguments...)
    pub jobfile: PathBuf,

    /// Program under test
    pub program: String,
}

impl Cli {
    pub fn into_config(self) -> RunConfig {
        RunConfig::new(self.jobfile, self.program)
            .with_job_dir(self.jobdir)
            .with_regenerate(self.regenerate)
            .with_reference_program(self.reference)
    }
}

/// Whether a clap error is an informational exit (`--help`, `--version`)
/// rather than a malformed command line
pub fn is_informational(err: &clap::Error) -> bool {
    matches!(
        err.kind(),
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion
    )
}
