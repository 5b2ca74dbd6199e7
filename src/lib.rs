pub mod artifacts;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod interrupt;
pub mod jobs;
pub mod process;
pub mod report;
pub mod runner;

pub use error::{Error, Result};

/// Name used as the prefix of diagnostic and summary lines
pub const PROGRAM_NAME: &str = "reftest";
