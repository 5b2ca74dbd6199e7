//! Bounded waiting on a job's processes

use std::io;
use std::time::{Duration, Instant};

use crate::interrupt::Interrupt;
use crate::process::Supervised;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum WaitEnd {
    /// Every process has been reaped
    AllExited,
    /// At least one process is still running at the deadline
    DeadlineReached,
    /// The interrupt flag was observed; processes may still be running
    Interrupted,
}

/// Reap processes as they exit until all are done, the deadline passes, or
/// the interrupt flag is raised
///
/// No single blocking wait lasts longer than `poll_interval`, so the flag is
/// noticed promptly.
pub(crate) fn wait_all(
    processes: &mut [Supervised],
    deadline: Instant,
    interrupt: &Interrupt,
    poll_interval: Duration,
) -> io::Result<WaitEnd> {
    loop {
        let Some(next) = processes.iter_mut().find(|p| p.is_running()) else {
            return Ok(WaitEnd::AllExited);
        };

        if interrupt.is_set() {
            return Ok(WaitEnd::Interrupted);
        }

        let now = Instant::now();
        if now >= deadline {
            return Ok(WaitEnd::DeadlineReached);
        }

        next.wait_for(poll_interval.min(deadline - now))?;
    }
}
