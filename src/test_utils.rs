use crate::event::{ListenerClosed, TailEvent, TailListener};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

/// Listener for tests that keeps every event in memory.
///
/// Clones share the same storage, so a test can hand one clone to a tailer
/// and inspect the other.
#[derive(Clone, Default)]
pub struct CollectingListener {
    events: Arc<Mutex<Vec<TailEvent>>>,
}

impl CollectingListener {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<TailEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn texts(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .map(TailEvent::into_text)
            .collect()
    }
}

impl TailListener for CollectingListener {
    fn on_tail(&self, event: TailEvent) -> Result<(), ListenerClosed> {
        self.events.lock().unwrap().push(event);
        Ok(())
    }
}

/// Poll `condition` for up to two seconds.
pub fn wait_until<F: FnMut() -> bool>(mut condition: F) -> bool {
    let deadline = Instant::now() + Duration::from_secs(2);
    while Instant::now() < deadline {
        if condition() {
            return true;
        }
        thread::sleep(Duration::from_millis(5));
    }
    condition()
}
