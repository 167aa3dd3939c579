// src/proc/reap.rs

//! Draining an unordered set of outstanding children.

use futures_util::future::select_all;
use tracing::{debug, error};

use super::{ExitKind, SpawnedProcess};

/// A reaped child: its pid and how it ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reaped {
    pub pid: u32,
    pub status: ExitKind,
}

/// Owned set of outstanding child processes.
///
/// Callers that fire-and-forget spawns park the handles here and then call
/// [`ProcessSet::reap_any`] in a loop until it returns `None`. Children are
/// reaped in whatever order they finish, which need not be spawn order.
#[derive(Debug, Default)]
pub struct ProcessSet {
    children: Vec<SpawnedProcess>,
}

impl ProcessSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of a spawned child until it is reaped.
    pub fn track(&mut self, child: SpawnedProcess) {
        self.children.push(child);
    }

    pub fn outstanding(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Block until some tracked child terminates, remove it from the set,
    /// and return its pid and classification. Returns `None` once no
    /// children remain.
    pub async fn reap_any(&mut self) -> Option<Reaped> {
        if self.children.is_empty() {
            return None;
        }

        let waits = self
            .children
            .iter_mut()
            .map(|c| Box::pin(c.child.wait()))
            .collect::<Vec<_>>();

        // Child::wait is cancel-safe, so the losing futures can simply be
        // dropped and retried on the next call.
        let (result, index, rest) = select_all(waits).await;
        drop(rest);

        let child = self.children.swap_remove(index);
        let status = match result {
            Ok(status) => ExitKind::from(status),
            Err(err) => {
                error!(pid = child.pid, error = %err, "waiting on child failed");
                ExitKind::Unknown
            }
        };

        debug!(pid = child.pid, %status, outstanding = self.children.len(), "reaped child");
        Some(Reaped {
            pid: child.pid,
            status,
        })
    }
}
