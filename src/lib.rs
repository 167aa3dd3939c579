// src/lib.rs

pub mod cli;
pub mod copy;
pub mod demo;
pub mod errors;
pub mod fs;
pub mod logging;
pub mod proc;
pub mod watch;

use std::time::Duration;

use tracing::info;

use crate::cli::{CliArgs, Command};
use crate::copy::ParallelCopier;
use crate::errors::Result;
use crate::fs::RealFileSystem;
use crate::watch::{DirectoryWatcher, RunMode};

/// High-level entry point used by `main.rs`.
///
/// Maps each CLI command onto the corresponding component: `monitor` onto
/// the directory watcher, `copy` onto the parallel copier, `demo` onto the
/// self-contained demonstration, and the hidden `copy-one` onto the in-child
/// copy worker.
pub async fn run(args: CliArgs) -> Result<()> {
    match args.command {
        Command::Monitor {
            dir,
            interval,
            duration,
        } => {
            let watcher =
                DirectoryWatcher::new(RealFileSystem, dir, Duration::from_secs(interval))?;
            let mode = match duration {
                Some(secs) => RunMode::Bounded(Duration::from_secs(secs)),
                None => RunMode::Unbounded,
            };
            watcher.run(mode).await
        }

        Command::Copy {
            source,
            dest,
            pacing_ms,
        } => {
            let pacing = (pacing_ms > 0).then(|| Duration::from_millis(pacing_ms));
            let copier =
                ParallelCopier::new(RealFileSystem, source, dest)?.with_pacing(pacing);
            let report = copier.copy_all().await?;
            info!(
                copied = report.reaped - report.failed,
                failed = report.failed,
                "copy finished"
            );
            Ok(())
        }

        Command::Demo { root, watch_secs } => {
            let paths = demo::DemoPaths::resolve(root)?;
            demo::run(&paths, Duration::from_secs(watch_secs)).await
        }

        Command::CopyOne { source, dest } => copy::worker::run(&source, &dest),
    }
}
