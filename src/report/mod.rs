//! Verdicts, run statistics and the human-readable report

mod reporter;
mod verdict;

pub use reporter::Reporter;
pub use verdict::{JobOutcome, RunReport, Verdict};
