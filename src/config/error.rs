//! Config error types for tailrs.
//!
//! Raised at the command-line boundary, before any file is tailed.

use std::fmt;
use std::path::PathBuf;

/// Invalid tail configuration.
#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// No file to tail was given.
    NoFiles,

    /// A named file does not exist.
    MissingFile { path: PathBuf },

    /// Poll interval of zero would spin the follow loop.
    InvalidPollInterval,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NoFiles => write!(f, "no files to tail"),
            ConfigError::MissingFile { path } => {
                write!(
                    f,
                    "invalid option or file does not exist: [{}]",
                    path.display()
                )
            }
            ConfigError::InvalidPollInterval => {
                write!(f, "sleep interval must be greater than zero")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
