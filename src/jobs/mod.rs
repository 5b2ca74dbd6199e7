//! Job declarations
//!
//! A job file holds one job per line, tab separated:
//!
//! ```text
//! # id        input file      arguments...
//! short       tests/short.in  --len   3
//! dictionary  tests/dict.in   --dictionary    words.txt
//! ```
//!
//! Blank lines and lines beginning with `#` are ignored. Loading validates
//! every line before anything is run; the first bad line aborts the load.

mod loader;
mod spec;

pub use loader::load_jobs;
pub use spec::{Job, JobSet};
