//! Config types for tailrs.
//!
//! `TailConfig` is built once from the command line and only read afterwards.

use super::error::ConfigError;
use std::path::PathBuf;
use std::time::Duration;

/// Lines shown when no count (or a count of 0) is given.
pub const DEFAULT_LINE_COUNT: u64 = 10;

/// Delay between end-of-file checks in follow mode.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(200);

/// Where a tailer starts reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartPosition {
    /// Start of the Nth line from the end; at most N lines are printed
    /// unless following.
    LastLines(u64),
    /// Whole file, no line budget.
    Beginning,
    /// Current end of file; only appended lines are printed.
    End,
}

/// Immutable settings shared by every tailed file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TailConfig {
    files: Vec<PathBuf>,
    /// Requested line count as given; 0 and `None` both mean "default".
    lines: Option<u64>,
    show_all: bool,
    follow: bool,
    poll_interval: Duration,
}

impl TailConfig {
    pub fn new(files: Vec<PathBuf>) -> Self {
        Self {
            files,
            lines: None,
            show_all: false,
            follow: false,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    pub fn with_lines(mut self, lines: Option<u64>) -> Self {
        self.lines = lines;
        self
    }

    pub fn with_follow(mut self, follow: bool) -> Self {
        self.follow = follow;
        self
    }

    pub fn with_show_all(mut self, show_all: bool) -> Self {
        self.show_all = show_all;
        self
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    pub fn follow(&self) -> bool {
        self.follow
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// Explicit positive line count, if one was given.
    fn explicit_lines(&self) -> Option<u64> {
        self.lines.filter(|&n| n > 0)
    }

    /// Effective line count with the default substituted.
    pub fn line_count(&self) -> u64 {
        self.explicit_lines().unwrap_or(DEFAULT_LINE_COUNT)
    }

    /// Following without an explicit count skips the existing content.
    pub fn start_position(&self) -> StartPosition {
        if self.show_all {
            return StartPosition::Beginning;
        }
        match self.explicit_lines() {
            Some(n) => StartPosition::LastLines(n),
            None if self.follow => StartPosition::End,
            None => StartPosition::LastLines(DEFAULT_LINE_COUNT),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.files.is_empty() {
            return Err(ConfigError::NoFiles);
        }
        if self.poll_interval.is_zero() {
            return Err(ConfigError::InvalidPollInterval);
        }
        if let Some(path) = self.files.iter().find(|p| !p.exists()) {
            return Err(ConfigError::MissingFile { path: path.clone() });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    fn config() -> TailConfig {
        TailConfig::new(vec![PathBuf::from("app.log")])
    }

    #[test]
    fn test_default_line_count() {
        assert_eq!(config().line_count(), 10);
        assert_eq!(config().with_lines(Some(0)).line_count(), 10);
        assert_eq!(config().with_lines(Some(3)).line_count(), 3);
    }

    #[test]
    fn test_start_position_without_follow() {
        assert_eq!(config().start_position(), StartPosition::LastLines(10));
        assert_eq!(
            config().with_lines(Some(0)).start_position(),
            StartPosition::LastLines(10)
        );
        assert_eq!(
            config().with_lines(Some(25)).start_position(),
            StartPosition::LastLines(25)
        );
    }

    #[test]
    fn test_start_position_follow_without_count_skips_to_end() {
        let cfg = config().with_follow(true);
        assert_eq!(cfg.start_position(), StartPosition::End);

        let cfg = config().with_follow(true).with_lines(Some(5));
        assert_eq!(cfg.start_position(), StartPosition::LastLines(5));
    }

    #[test]
    fn test_show_all_wins() {
        let cfg = config().with_lines(Some(5)).with_show_all(true);
        assert_eq!(cfg.start_position(), StartPosition::Beginning);
    }

    #[test]
    fn test_default_poll_interval() {
        assert_eq!(config().poll_interval(), Duration::from_millis(200));
    }

    #[test]
    fn test_validate() {
        let file = NamedTempFile::new().unwrap();
        let cfg = TailConfig::new(vec![file.path().to_path_buf()]);
        assert_eq!(cfg.validate(), Ok(()));

        assert_eq!(TailConfig::new(vec![]).validate(), Err(ConfigError::NoFiles));

        let missing = PathBuf::from("/path/that/definitely/does/not/exist.log");
        assert_eq!(
            TailConfig::new(vec![missing.clone()]).validate(),
            Err(ConfigError::MissingFile { path: missing })
        );

        let cfg = TailConfig::new(vec![file.path().to_path_buf()])
            .with_poll_interval(Duration::ZERO);
        assert_eq!(cfg.validate(), Err(ConfigError::InvalidPollInterval));
    }
}
