//! Runs one tailer per file and merges their output.

use crate::cancel::CancelToken;
use crate::config::TailConfig;
use crate::error::TailError;
use crate::event::ChannelListener;
use crate::printer::TailPrinter;
use crate::reader::{TailOutcome, TailedReader, TextFileTailer};
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::mpsc::sync_channel;
use std::thread;

/// Lines queued between the tailers and the printer
const OUTPUT_QUEUE_DEPTH: usize = 64;

/// How tailing one file ended
#[derive(Debug)]
pub struct FileReport {
    pub path: PathBuf,
    pub result: Result<TailOutcome, TailError>,
}

/// Result of tailing every configured file
#[derive(Debug, Default)]
pub struct ExecutionReport {
    pub files: Vec<FileReport>,
    /// Lines written by the printer
    pub printed: u64,
}

impl ExecutionReport {
    pub fn failures(&self) -> impl Iterator<Item = &TailError> {
        self.files.iter().filter_map(|f| f.result.as_ref().err())
    }

    pub fn is_success(&self) -> bool {
        self.failures().next().is_none()
    }
}

/// Tails every file of a configuration concurrently
///
/// Each file gets its own thread and its own tailer; a failing file is
/// reported and stops alone while the others keep going.
pub struct TailExecutor {
    config: TailConfig,
}

impl TailExecutor {
    pub fn new(config: TailConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TailConfig {
        &self.config
    }

    /// Tail all files, printing to `writer` on the calling thread.
    ///
    /// Returns once every tailer has stopped: at end of input without
    /// follow, or after `cancel` fires when following.
    pub fn execute<W: Write>(&self, writer: W, cancel: &CancelToken) -> io::Result<ExecutionReport> {
        let (tx, rx) = sync_channel(OUTPUT_QUEUE_DEPTH);

        let handles: Vec<_> = self
            .config
            .files()
            .iter()
            .map(|path| {
                let tailer =
                    TextFileTailer::from_config(&self.config, path, ChannelListener::new(tx.clone()));
                let token = cancel.clone();
                let path = path.clone();
                let handle = thread::spawn(move || {
                    let result = tailer.run(&token);
                    report_result(tailer.source(), &result);
                    result
                });
                (path, handle)
            })
            .collect();

        // Printer ends once every tailer has dropped its listener
        drop(tx);

        let printed = TailPrinter::new(writer, rx).run();
        // Output is finished or gone; stop followers still waiting on idle files
        cancel.cancel();

        let files = handles
            .into_iter()
            .map(|(path, handle)| {
                let result = handle.join().unwrap_or_else(|_| {
                    Err(TailError::Io {
                        path: path.clone(),
                        source: io::Error::new(io::ErrorKind::Other, "tailer thread panicked"),
                    })
                });
                FileReport { path, result }
            })
            .collect();

        Ok(ExecutionReport {
            files,
            printed: printed?,
        })
    }
}

fn report_result(path: &std::path::Path, result: &Result<TailOutcome, TailError>) {
    match result {
        Ok(outcome) => {
            tracing::debug!(path = %path.display(), emitted = outcome.emitted(), "tailer finished");
        }
        Err(TailError::ListenerClosed { .. }) => {
            tracing::debug!(path = %path.display(), "output closed, tailer stopped");
        }
        Err(e) => {
            tracing::error!(path = %path.display(), error = %e, "tailer failed");
            eprintln!("tailrs: {}", e);
        }
    }
}
