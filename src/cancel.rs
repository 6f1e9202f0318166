use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Stop signal shared by the executor and every tailer it spawns
///
/// Clones observe the same flag. Followers poll it between reads, so a
/// cancel takes effect within one poll interval.
#[derive(Clone, Debug)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self {
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Token driven by a flag someone else sets, such as a signal handler
    pub fn from_flag(flag: Arc<AtomicBool>) -> Self {
        Self { cancelled: flag }
    }

    /// Takes effect at each tailer's next read or wake-up, never mid-read.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

impl Default for CancelToken {
    fn default() -> Self {
        Self::new()
    }
}
