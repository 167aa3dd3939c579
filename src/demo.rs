// src/demo.rs

//! Self-contained demonstration run.
//!
//! Seeds a small directory tree, runs one copy pass followed by one bounded
//! watch pass, and prints listings so the results can be checked by eye.
//! All real work goes through the [`ParallelCopier`] and
//! [`DirectoryWatcher`] contracts; this module only provisions data and
//! wires them together with explicitly resolved paths.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::anyhow;
use tracing::info;

use crate::copy::ParallelCopier;
use crate::errors::Result;
use crate::fs::{FileSystem, RealFileSystem};
use crate::watch::{DirectoryWatcher, RunMode, DEFAULT_POLL_INTERVAL};

/// Resolved locations for one demonstration run.
///
/// Resolved exactly once, up front; the core components never consult
/// environment state themselves.
#[derive(Debug, Clone)]
pub struct DemoPaths {
    pub root: PathBuf,
    pub scripts_dir: PathBuf,
    pub source_dir: PathBuf,
    pub dest_dir: PathBuf,
}

impl DemoPaths {
    /// Resolve the demonstration tree under `root`, or under the home
    /// directory when no root is given.
    pub fn resolve(root: Option<PathBuf>) -> Result<Self> {
        let base = match root {
            Some(dir) => dir,
            None => dirs::home_dir()
                .ok_or_else(|| anyhow!("could not determine a home directory; pass --root"))?,
        };
        let root = base.join("procyard-demo");
        Ok(Self {
            scripts_dir: root.join("scripts"),
            source_dir: root.join("source"),
            dest_dir: root.join("copied"),
            root,
        })
    }
}

const SEED_FILES: [(&str, &str); 3] = [
    ("alpha.txt", "alpha file for the copy demonstration\n"),
    ("beta.txt", "beta file for the copy demonstration\n"),
    ("gamma.txt", "gamma file for the copy demonstration\n"),
];

const SEED_SCRIPTS: [(&str, &str); 2] = [
    ("hello.sh", "#!/bin/sh\necho \"hello from the demo script\"\n"),
    ("count.sh", "#!/bin/sh\nfor i in 1 2 3; do echo \"tick $i\"; done\n"),
];

/// Run the whole demonstration: seed, copy pass, bounded watch pass,
/// listings.
pub async fn run(paths: &DemoPaths, watch_duration: Duration) -> Result<()> {
    let fs = RealFileSystem;
    seed(&fs, paths)?;

    let copier = ParallelCopier::new(fs, paths.source_dir.clone(), paths.dest_dir.clone())?;
    let report = copier.copy_all().await?;
    info!(
        spawned = report.spawned,
        reaped = report.reaped,
        failed = report.failed,
        "demo copy pass done"
    );

    let watcher = DirectoryWatcher::new(fs, paths.scripts_dir.clone(), DEFAULT_POLL_INTERVAL)?;
    watcher.run(RunMode::Bounded(watch_duration)).await?;

    print_listing(&fs, "copied files", &paths.dest_dir)?;
    print_listing(&fs, "remaining scripts", &paths.scripts_dir)?;
    Ok(())
}

fn seed<F: FileSystem>(fs: &F, paths: &DemoPaths) -> Result<()> {
    for dir in [&paths.scripts_dir, &paths.source_dir, &paths.dest_dir] {
        fs.create_dir_all(dir)?;
    }

    for (name, contents) in SEED_FILES {
        fs.write(&paths.source_dir.join(name), contents.as_bytes())?;
    }

    for (name, contents) in SEED_SCRIPTS {
        let path = paths.scripts_dir.join(name);
        fs.write(&path, contents.as_bytes())?;
        fs.set_executable(&path)?;
    }

    info!(root = ?paths.root, "seeded demonstration tree");
    Ok(())
}

/// Plain stdout output; this is the human-readable verification step.
fn print_listing<F: FileSystem>(fs: &F, label: &str, dir: &Path) -> Result<()> {
    println!("{label} ({}):", dir.display());

    let mut entries = fs.read_dir(dir)?;
    entries.sort();

    if entries.is_empty() {
        println!("  (empty)");
    }
    for entry in entries {
        if let Some(name) = entry.file_name() {
            println!("  {}", name.to_string_lossy());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::mock::MockFileSystem;

    #[test]
    fn resolve_places_the_tree_under_the_given_root() -> Result<()> {
        let paths = DemoPaths::resolve(Some(PathBuf::from("/tmp/base")))?;
        assert_eq!(paths.root, PathBuf::from("/tmp/base/procyard-demo"));
        assert_eq!(paths.scripts_dir, paths.root.join("scripts"));
        assert_eq!(paths.source_dir, paths.root.join("source"));
        assert_eq!(paths.dest_dir, paths.root.join("copied"));
        Ok(())
    }

    #[test]
    fn seeding_creates_executable_scripts_and_plain_files() -> Result<()> {
        let fs = MockFileSystem::new();
        let paths = DemoPaths::resolve(Some(PathBuf::from("base")))?;

        seed(&fs, &paths)?;

        for (name, _) in SEED_SCRIPTS {
            assert!(fs.is_executable(&paths.scripts_dir.join(name)));
        }
        for (name, _) in SEED_FILES {
            let path = paths.source_dir.join(name);
            assert!(fs.is_file(&path));
            assert!(!fs.is_executable(&path));
        }
        assert!(fs.is_dir(&paths.dest_dir));
        Ok(())
    }
}
