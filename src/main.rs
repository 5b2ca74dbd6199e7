use std::process::ExitCode;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use reftest::cli::{self, Cli};
use reftest::commands::run;
use reftest::interrupt::Interrupt;
use reftest::{Error, PROGRAM_NAME};
use tracing::warn;
use tracing_subscriber::EnvFilter;

/// Diagnostics go to stderr, filtered by `RUST_LOG` (default: warnings only)
fn install_subscriber() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|err| anyhow!("{err}"))
        .context("Failed to install log subscriber")
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if cli::is_informational(&err) => err.exit(),
        Err(_) => {
            eprintln!("{}", Error::Usage);
            return ExitCode::from(Error::Usage.exit_code());
        }
    };

    if let Err(err) = install_subscriber() {
        eprintln!("{PROGRAM_NAME}: {err:#}");
    }

    let interrupt = Interrupt::new();
    if let Err(err) = interrupt
        .install()
        .context("Failed to set Ctrl+C handler")
    {
        warn!("{err:#}");
    }

    let config = cli.into_config();
    match run::execute(&config, &interrupt) {
        Ok(report) => ExitCode::from(report.exit_code()),
        Err(err) => {
            eprintln!("{PROGRAM_NAME}: {err}");
            ExitCode::from(err.exit_code())
        }
    }
}
