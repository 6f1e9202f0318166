//! Failure types surfaced by a tailer.

use std::fmt;
use std::path::PathBuf;

/// Why tailing a single file stopped early.
///
/// Each variant is produced exactly once, where the failure is caught, and
/// carries the root cause. A failed tailer never retries.
#[derive(Debug)]
pub enum TailError {
    /// The file could not be opened (missing, permission denied, ...).
    SourceUnavailable {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Seeking or reading failed after the file was opened.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The listener's consumer went away; nothing can receive further lines.
    ListenerClosed { path: PathBuf },
}

impl TailError {
    /// Path of the file whose tailer failed.
    pub fn path(&self) -> &PathBuf {
        match self {
            TailError::SourceUnavailable { path, .. }
            | TailError::Io { path, .. }
            | TailError::ListenerClosed { path } => path,
        }
    }
}

impl fmt::Display for TailError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TailError::SourceUnavailable { path, source } => {
                write!(
                    f,
                    "could not finish tailing file {}: cannot open: {}",
                    path.display(),
                    source
                )
            }
            TailError::Io { path, source } => {
                write!(
                    f,
                    "could not finish tailing file {}: {}",
                    path.display(),
                    source
                )
            }
            TailError::ListenerClosed { path } => {
                write!(
                    f,
                    "could not finish tailing file {}: output closed",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for TailError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TailError::SourceUnavailable { source, .. } | TailError::Io { source, .. } => {
                Some(source)
            }
            TailError::ListenerClosed { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;
    use std::io;

    #[test]
    fn test_io_error_message_and_source() {
        let err = TailError::Io {
            path: PathBuf::from("/var/log/app.log"),
            source: io::Error::new(io::ErrorKind::Other, "disk gone"),
        };

        let msg = err.to_string();
        assert!(msg.starts_with("could not finish tailing file /var/log/app.log"));
        assert!(msg.contains("disk gone"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_source_unavailable_keeps_kind() {
        let err = TailError::SourceUnavailable {
            path: PathBuf::from("missing.log"),
            source: io::Error::from(io::ErrorKind::NotFound),
        };

        let root = err
            .source()
            .and_then(|e| e.downcast_ref::<io::Error>())
            .unwrap();
        assert_eq!(root.kind(), io::ErrorKind::NotFound);
        assert_eq!(err.path(), &PathBuf::from("missing.log"));
        assert!(err
            .to_string()
            .starts_with("could not finish tailing file missing.log: cannot open"));
    }

    #[test]
    fn test_listener_closed_has_no_source() {
        let err = TailError::ListenerClosed {
            path: PathBuf::from("a.log"),
        };
        assert!(err.source().is_none());
        assert!(err.to_string().contains("output closed"));
    }
}
