//! Run-wide cancellation flag
//!
//! The flag starts clear, is set by the Ctrl+C (and termination) handler, and
//! is never cleared. It is handed explicitly to everything that has to observe
//! it rather than living in a global.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct Interrupt {
    flag: Arc<AtomicBool>,
}

impl Interrupt {
    pub fn new() -> Self {
        Self::default()
    }

    /// Route SIGINT (and SIGTERM/SIGHUP) to this flag.
    ///
    /// Can only succeed once per process.
    pub fn install(&self) -> Result<(), ctrlc::Error> {
        let handle = self.clone();
        ctrlc::set_handler(move || handle.trigger())
    }

    pub fn trigger(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_set(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}
