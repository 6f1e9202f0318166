//! Command-line surface for tailrs.
//!
//! Parses flags into an immutable `TailConfig`; nothing here touches files.

use crate::config::TailConfig;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_SLEEP_INTERVAL_MS: u64 = 200;

#[derive(Parser, Debug)]
#[command(name = "tailrs", version)]
#[command(about = "Print the last lines of files, optionally following them as they grow", long_about = None)]
pub struct Args {
    /// Number of lines to show, counting from the bottom (0 or absent: 10)
    #[arg(short = 'n', long = "lines", value_name = "COUNT")]
    pub lines: Option<u64>,

    /// Keep reading after reaching end of file
    #[arg(short = 'f', long = "follow")]
    pub follow: bool,

    /// Show whole files instead of their last lines
    #[arg(short = 'a', long = "all", conflicts_with = "lines")]
    pub all: bool,

    /// Milliseconds to wait between end-of-file checks when following
    #[arg(
        short = 's',
        long = "sleep-interval",
        value_name = "MS",
        default_value_t = DEFAULT_SLEEP_INTERVAL_MS
    )]
    pub sleep_interval: u64,

    /// Log debug output to stderr
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Files to tail
    #[arg(value_name = "FILE", required = true)]
    pub files: Vec<PathBuf>,
}

impl Args {
    pub fn into_config(self) -> TailConfig {
        TailConfig::new(self.files)
            .with_lines(self.lines)
            .with_follow(self.follow)
            .with_show_all(self.all)
            .with_poll_interval(Duration::from_millis(self.sleep_interval))
    }
}
