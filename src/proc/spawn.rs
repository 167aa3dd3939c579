// src/proc/spawn.rs

//! Spawning a single child process.

use std::ffi::OsStr;

use tokio::process::{Child, Command};
use tracing::{debug, error};

use crate::errors::{ProcyardError, Result};

use super::ExitKind;

/// An owned handle to a spawned child process.
///
/// The handle is the only way to reach the child: whoever holds it is
/// responsible for reaping it, either via [`SpawnedProcess::wait`] or by
/// moving it into a [`super::ProcessSet`].
#[derive(Debug)]
pub struct SpawnedProcess {
    pub(super) pid: u32,
    pub(super) child: Child,
}

/// Launch `program` with `args` as a new child process.
///
/// On success the child is already running and the caller owns its handle.
/// On failure no process was created; callers skip the affected work item
/// rather than aborting the whole run.
///
/// If the child itself cannot start the intended work (for scripts, the
/// shell failing to read or exec them), that surfaces later as a
/// distinguished nonzero [`ExitKind`] when the child is reaped, never as an
/// error here.
pub fn spawn<P, I, S>(program: P, args: I) -> Result<SpawnedProcess>
where
    P: AsRef<OsStr>,
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let program = program.as_ref();

    let mut cmd = Command::new(program);
    cmd.args(args);

    let child = cmd.spawn().map_err(|source| ProcyardError::Spawn {
        program: program.to_string_lossy().into_owned(),
        source,
    })?;

    // id() is always present before the first wait.
    let pid = child.id().unwrap_or(0);
    debug!(program = %program.to_string_lossy(), pid, "spawned child process");

    Ok(SpawnedProcess { pid, child })
}

impl SpawnedProcess {
    /// OS process identifier of the child.
    pub fn pid(&self) -> u32 {
        self.pid
    }

    /// Block until this child terminates, reap it, and classify how it
    /// ended. Consumes the handle, so a child is reaped exactly once.
    ///
    /// An OS failure to retrieve the status is logged and classified as
    /// [`ExitKind::Unknown`]; the child is gone either way.
    pub async fn wait(mut self) -> ExitKind {
        match self.child.wait().await {
            Ok(status) => ExitKind::from(status),
            Err(err) => {
                error!(pid = self.pid, error = %err, "waiting on child failed");
                ExitKind::Unknown
            }
        }
    }
}
