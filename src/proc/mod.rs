// src/proc/mod.rs

//! Process spawning and reaping primitives.
//!
//! Everything in this crate that creates OS processes goes through here:
//!
//! - [`spawn`] launches a program as a child process and hands back an owned
//!   [`SpawnedProcess`] handle.
//! - [`SpawnedProcess::wait`] blocks until that specific child terminates
//!   and reaps it (the handle is consumed, so a child is reaped at most
//!   once).
//! - [`ProcessSet`] owns a set of outstanding children and reaps them in
//!   completion order, which is how fire-and-forget spawns are drained
//!   without leaking zombie process-table entries.

pub mod reap;
pub mod spawn;

pub use reap::{ProcessSet, Reaped};
pub use spawn::{spawn, SpawnedProcess};

use std::fmt;
use std::os::unix::process::ExitStatusExt;

/// How a child process ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitKind {
    /// Normal termination with an exit code.
    Exited(i32),
    /// Abnormal termination by a signal.
    Signaled(i32),
    /// The OS failed to report a status for the child (an error from
    /// `wait`). Never produced by a process's own behaviour.
    Unknown,
}

impl ExitKind {
    pub fn success(&self) -> bool {
        matches!(self, ExitKind::Exited(0))
    }
}

impl From<std::process::ExitStatus> for ExitKind {
    fn from(status: std::process::ExitStatus) -> Self {
        match status.code() {
            Some(code) => ExitKind::Exited(code),
            None => ExitKind::Signaled(status.signal().unwrap_or(0)),
        }
    }
}

impl fmt::Display for ExitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitKind::Exited(code) => write!(f, "exited with code {code}"),
            ExitKind::Signaled(signal) => write!(f, "terminated by signal {signal}"),
            ExitKind::Unknown => write!(f, "ended with unretrievable status"),
        }
    }
}
