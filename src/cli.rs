// src/cli.rs

//! CLI argument parsing using `clap`.
//!
//! NOTE: this expects `clap` to be built with the `derive` feature, e.g.:
//! `clap = { version = "4.5.53", features = ["derive"] }` in `Cargo.toml`.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Command-line arguments for `procyard`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "procyard",
    version,
    about = "Run dropped-in shell scripts and fan out per-file copy processes.",
    long_about = None
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `PROCYARD_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL", global = true)]
    pub log_level: Option<LogLevel>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Watch a directory and run every executable `.sh` script dropped into
    /// it, deleting each script once it has been waited on.
    Monitor {
        /// Directory to watch.
        #[arg(value_name = "DIR")]
        dir: PathBuf,

        /// Poll interval, in seconds, while the directory has no scripts.
        #[arg(long, value_name = "SECS", default_value_t = 5)]
        interval: u64,

        /// Stop starting new scan cycles once this many seconds have
        /// elapsed. Without this flag the watch runs until stopped
        /// externally.
        #[arg(long, value_name = "SECS")]
        duration: Option<u64>,
    },

    /// Copy every regular file in SOURCE to DEST, one child process per
    /// file.
    Copy {
        /// Source directory (must exist).
        #[arg(value_name = "SOURCE")]
        source: PathBuf,

        /// Destination directory (created if absent).
        #[arg(value_name = "DEST")]
        dest: PathBuf,

        /// Delay between successive worker spawns, in milliseconds.
        /// 0 disables pacing.
        #[arg(long, value_name = "MS", default_value_t = 100)]
        pacing_ms: u64,
    },

    /// Seed demonstration data under a root directory, run one copy pass
    /// and one bounded watch pass, then print the resulting listings.
    Demo {
        /// Root for the demonstration tree (default: the home directory).
        #[arg(long, value_name = "DIR")]
        root: Option<PathBuf>,

        /// How long the bounded watch pass runs, in seconds.
        #[arg(long, value_name = "SECS", default_value_t = 10)]
        watch_secs: u64,
    },

    /// Internal worker: copy a single file. Spawned by `copy`, one per
    /// file.
    #[command(hide = true, name = "copy-one")]
    CopyOne {
        source: PathBuf,
        dest: PathBuf,
    },
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Parse `argv`.
///
/// Invalid invocations print usage and exit with status 1; `--help` and
/// `--version` keep clap's normal status-0 behaviour.
pub fn parse() -> CliArgs {
    match CliArgs::try_parse() {
        Ok(args) => args,
        Err(err) if !err.use_stderr() => err.exit(),
        Err(err) => {
            let _ = err.print();
            std::process::exit(1);
        }
    }
}
