//! Child process supervision
//!
//! [`Supervised`] owns one spawned child from launch until it has been reaped.
//! Whatever path a job takes (normal exit, timeout, interruption, an early
//! `?` return) the child is killed if still running and waited for exactly
//! once, so no zombies or stray pipe descriptors outlive the job.

use std::fmt;
use std::io;
use std::os::unix::process::ExitStatusExt;
use std::process::{Child, ChildStderr, ChildStdout, Command, ExitStatus};
use std::time::Duration;

use nix::sys::signal::Signal;
use tracing::{debug, warn};
use wait_timeout::ChildExt;

/// How one process of a job ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessOutcome {
    /// Exited on its own; see [`exit_code_of`] for how signals are encoded
    Exited(i32),
    /// Still running at the deadline and killed by the runner
    TimedOut,
    /// Never started (missing executable, unreadable input, no pipe to read)
    LaunchFailed,
}

/// Integer exit status as recorded in `.exitstatus` artifacts
///
/// A normal exit yields its code; death by signal N yields `128 + N`.
pub fn exit_code_of(status: ExitStatus) -> i32 {
    match (status.code(), status.signal()) {
        (Some(code), _) => code,
        (None, Some(signal)) => 128 + signal,
        (None, None) => -1,
    }
}

/// Check if a process with the given PID is alive
///
/// Uses `nix::sys::signal::kill` with signal `None` (null signal / signal 0) to check
/// process existence. A reaped child no longer exists; an unreaped zombie still does.
#[cfg(test)]
pub(crate) fn is_process_alive(pid: u32) -> bool {
    use nix::errno::Errno;
    use nix::sys::signal::kill;
    use nix::unistd::Pid;

    let Ok(pid) = i32::try_from(pid) else {
        return false;
    };

    match kill(Pid::from_raw(pid), None) {
        Ok(()) => true,
        Err(Errno::EPERM) => true,
        Err(_) => false,
    }
}

/// A spawned child that is guaranteed to be reaped
pub struct Supervised {
    label: &'static str,
    child: Option<Child>,
    outcome: Option<ProcessOutcome>,
}

impl Supervised {
    /// Spawn `command`; a spawn failure is recorded as [`ProcessOutcome::LaunchFailed`]
    pub fn spawn(label: &'static str, command: &mut Command) -> Self {
        match command.spawn() {
            Ok(child) => {
                debug!(process = label, pid = child.id(), "spawned");
                Self {
                    label,
                    child: Some(child),
                    outcome: None,
                }
            }
            Err(err) => {
                debug!(
                    process = label,
                    program = ?command.get_program(),
                    error = %err,
                    "launch failed"
                );
                Self::not_launched(label)
            }
        }
    }

    /// A slot for a process that could not be started at all
    pub fn not_launched(label: &'static str) -> Self {
        Self {
            label,
            child: None,
            outcome: Some(ProcessOutcome::LaunchFailed),
        }
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn pid(&self) -> Option<u32> {
        self.child.as_ref().map(Child::id)
    }

    /// True until the child has been reaped (never true for a failed launch)
    pub fn is_running(&self) -> bool {
        self.outcome.is_none()
    }

    pub fn outcome(&self) -> Option<ProcessOutcome> {
        self.outcome
    }

    pub fn take_stdout(&mut self) -> Option<ChildStdout> {
        self.child.as_mut().and_then(|child| child.stdout.take())
    }

    pub fn take_stderr(&mut self) -> Option<ChildStderr> {
        self.child.as_mut().and_then(|child| child.stderr.take())
    }

    /// Block for at most `limit` waiting for the child to exit
    ///
    /// Returns true once the child has been reaped.
    pub fn wait_for(&mut self, limit: Duration) -> io::Result<bool> {
        let Some(child) = self.child.as_mut() else {
            return Ok(true);
        };

        match child.wait_timeout(limit)? {
            Some(status) => {
                self.reaped(ProcessOutcome::Exited(exit_code_of(status)));
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// SIGKILL the child if it is still running, then reap it
    ///
    /// A child that turns out to have exited by itself in the meantime keeps its
    /// real exit status; one that died from our SIGKILL is [`ProcessOutcome::TimedOut`].
    pub fn terminate(&mut self) -> io::Result<()> {
        let Some(child) = self.child.as_mut() else {
            return Ok(());
        };

        if let Err(err) = child.kill() {
            warn!(process = self.label, error = %err, "kill failed");
        }
        let status = child.wait()?;

        let outcome = if status.signal() == Some(Signal::SIGKILL as i32) {
            ProcessOutcome::TimedOut
        } else {
            ProcessOutcome::Exited(exit_code_of(status))
        };
        self.reaped(outcome);
        Ok(())
    }

    /// Reap (terminating if necessary) and return how the process ended
    pub fn finish(mut self) -> ProcessOutcome {
        if self.is_running() {
            if let Err(err) = self.terminate() {
                warn!(process = self.label, error = %err, "failed to reap");
            }
        }
        self.outcome.unwrap_or(ProcessOutcome::TimedOut)
    }

    fn reaped(&mut self, outcome: ProcessOutcome) {
        if let Some(child) = self.child.take() {
            debug!(process = self.label, pid = child.id(), ?outcome, "reaped");
        }
        self.outcome = Some(outcome);
    }
}

impl fmt::Debug for Supervised {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Supervised")
            .field("label", &self.label)
            .field("pid", &self.pid())
            .field("outcome", &self.outcome)
            .finish()
    }
}

impl Drop for Supervised {
    fn drop(&mut self) {
        if let Some(mut child) = self.child.take() {
            let _ = child.kill();
            let _ = child.wait();
        }
    }
}
