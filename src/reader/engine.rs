use super::offset_locator::{locate, LINE_DELIMITER};
use super::TailedReader;
use crate::cancel::CancelToken;
use crate::config::{StartPosition, TailConfig, DEFAULT_LINE_COUNT, DEFAULT_POLL_INTERVAL};
use crate::error::TailError;
use crate::event::{TailEvent, TailListener};
use std::fs::File;
use std::io::{BufRead, BufReader, Seek, SeekFrom};
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

/// How a tailer that did not fail came to a stop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TailOutcome {
    /// Line budget exhausted or end of file reached (non-follow only)
    Completed { emitted: u64 },
    /// Stopped by the cancel token
    Cancelled { emitted: u64 },
}

impl TailOutcome {
    pub fn emitted(&self) -> u64 {
        match self {
            TailOutcome::Completed { emitted } | TailOutcome::Cancelled { emitted } => *emitted,
        }
    }
}

/// Tails a single text file line by line
///
/// Reads from a computed byte offset and hands each line to the listener
/// before reading the next. In follow mode, end of file is not terminal:
/// the tailer sleeps `poll_interval` and tries again until cancelled.
pub struct TextFileTailer<L> {
    path: PathBuf,
    start: StartPosition,
    follow: bool,
    poll_interval: Duration,
    listener: L,
}

impl<L: TailListener> TextFileTailer<L> {
    pub fn new<P: AsRef<Path>>(path: P, start: StartPosition, listener: L) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            start,
            follow: false,
            poll_interval: DEFAULT_POLL_INTERVAL,
            listener,
        }
    }

    /// Tailer for one file of a configuration
    pub fn from_config<P: AsRef<Path>>(config: &TailConfig, path: P, listener: L) -> Self {
        Self::new(path, config.start_position(), listener)
            .with_follow(config.follow())
            .with_poll_interval(config.poll_interval())
    }

    pub fn with_follow(mut self, follow: bool) -> Self {
        self.follow = follow;
        self
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    fn io_error(&self, source: std::io::Error) -> TailError {
        TailError::Io {
            path: self.path.clone(),
            source,
        }
    }

    /// Starting byte offset and line budget for this run
    fn starting_point(&self, file: &File) -> Result<(u64, Option<u64>), TailError> {
        match self.start {
            StartPosition::LastLines(n) => {
                let n = if n == 0 { DEFAULT_LINE_COUNT } else { n };
                Ok((locate(&self.path, n).skip_offset, Some(n)))
            }
            StartPosition::Beginning => Ok((0, None)),
            StartPosition::End => {
                let len = file.metadata().map_err(|e| self.io_error(e))?.len();
                Ok((len, None))
            }
        }
    }

    fn emit(&self, raw: &[u8]) -> Result<(), TailError> {
        let line = strip_delimiter(raw);
        let event = TailEvent::new(String::from_utf8_lossy(line).into_owned(), line.len());

        self.listener
            .on_tail(event)
            .map_err(|_| TailError::ListenerClosed {
                path: self.path.clone(),
            })
    }
}

impl<L: TailListener> TailedReader for TextFileTailer<L> {
    type Source = Path;
    type Listener = L;

    fn source(&self) -> &Path {
        &self.path
    }

    fn listener(&self) -> &L {
        &self.listener
    }

    fn run(&self, cancel: &CancelToken) -> Result<TailOutcome, TailError> {
        let file = File::open(&self.path).map_err(|source| TailError::SourceUnavailable {
            path: self.path.clone(),
            source,
        })?;

        let (offset, budget) = self.starting_point(&file)?;
        let mut reader = BufReader::new(file);
        reader
            .seek(SeekFrom::Start(offset))
            .map_err(|e| self.io_error(e))?;

        tracing::debug!(
            path = %self.path.display(),
            offset,
            follow = self.follow,
            "tailing file"
        );

        // Following ignores the budget
        let mut remaining = if self.follow { None } else { budget };
        let mut emitted = 0u64;
        let mut line = Vec::new();

        loop {
            if cancel.is_cancelled() {
                tracing::debug!(path = %self.path.display(), emitted, "tailing cancelled");
                return Ok(TailOutcome::Cancelled { emitted });
            }
            if remaining == Some(0) {
                return Ok(TailOutcome::Completed { emitted });
            }

            let read = reader
                .read_until(LINE_DELIMITER, &mut line)
                .map_err(|e| self.io_error(e))?;

            let terminated = line.last() == Some(&LINE_DELIMITER);
            // A fragment at end of file is a full line only when not following;
            // otherwise it waits for the rest of the line to be appended.
            let trailing_fragment = read == 0 && !self.follow && !line.is_empty();

            if terminated || trailing_fragment {
                self.emit(&line)?;
                line.clear();
                emitted += 1;
                if let Some(n) = remaining.as_mut() {
                    *n -= 1;
                }
            } else if read == 0 {
                if !self.follow {
                    return Ok(TailOutcome::Completed { emitted });
                }
                tracing::trace!(path = %self.path.display(), "end of file, waiting for more");
                thread::sleep(self.poll_interval);
            }
        }
    }
}

/// Drop the trailing delimiter and a carriage return before it
fn strip_delimiter(raw: &[u8]) -> &[u8] {
    let line = raw.strip_suffix(&[LINE_DELIMITER]).unwrap_or(raw);
    line.strip_suffix(b"\r").unwrap_or(line)
}
