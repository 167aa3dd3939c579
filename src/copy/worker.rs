// src/copy/worker.rs

//! Single-file copy worker.
//!
//! This runs inside a dedicated child process (the hidden `copy-one`
//! subcommand): copy exactly one file byte-for-byte, overwriting any
//! existing destination, and report the outcome through the process exit
//! status. The parent never retries a failed worker; it just logs the
//! status it reaped.

use std::path::Path;

use anyhow::Context;
use tracing::{error, info};

use crate::errors::Result;

/// Copy `source` to `dest` and report via logs + the returned result.
///
/// A failure here becomes this process's nonzero exit status, which is what
/// the parent's reaper observes.
pub fn run(source: &Path, dest: &Path) -> Result<()> {
    let pid = std::process::id();

    match copy_file(source, dest) {
        Ok(bytes) => {
            info!(pid, source = ?source, dest = ?dest, bytes, "copied file");
            Ok(())
        }
        Err(err) => {
            error!(pid, source = ?source, dest = ?dest, error = %err, "copy failed");
            Err(err.into())
        }
    }
}

fn copy_file(source: &Path, dest: &Path) -> anyhow::Result<u64> {
    // std::fs::copy truncates and overwrites an existing destination.
    std::fs::copy(source, dest).with_context(|| format!("copying {:?} to {:?}", source, dest))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn copies_bytes_and_overwrites() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let source = dir.path().join("in.bin");
        let dest = dir.path().join("out.bin");

        std::fs::write(&source, b"fresh contents")?;
        std::fs::write(&dest, b"stale")?;

        run(&source, &dest)?;
        assert_eq!(std::fs::read(&dest)?, b"fresh contents");
        Ok(())
    }

    #[test]
    fn missing_source_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let source = dir.path().join("absent.bin");
        let dest = dir.path().join("out.bin");

        assert!(run(&source, &dest).is_err());
        assert!(!dest.exists());
    }
}
