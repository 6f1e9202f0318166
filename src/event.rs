use std::fmt;
use std::sync::mpsc::SyncSender;

/// One emitted line: its text and its byte length (delimiter excluded)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TailEvent {
    text: String,
    length: usize,
}

impl TailEvent {
    pub fn new(text: String, length: usize) -> Self {
        Self { text, length }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Byte length of the line as read from the file
    pub fn length(&self) -> usize {
        self.length
    }

    pub fn into_text(self) -> String {
        self.text
    }
}

/// The receiving side of a tailer is gone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListenerClosed;

impl fmt::Display for ListenerClosed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "listener closed")
    }
}

impl std::error::Error for ListenerClosed {}

/// Recipient of emitted lines
///
/// Called once per line, synchronously, before the next line is read.
/// Implementations shared between tailers must serialise their own writes.
pub trait TailListener: Send + Sync {
    fn on_tail(&self, event: TailEvent) -> Result<(), ListenerClosed>;
}

/// Listener that forwards events into a bounded channel drained by a printer.
///
/// Clone one per tailer; the printer sees a single merged stream. A full
/// channel blocks the tailer until the printer catches up.
#[derive(Clone)]
pub struct ChannelListener {
    sender: SyncSender<TailEvent>,
}

impl ChannelListener {
    pub fn new(sender: SyncSender<TailEvent>) -> Self {
        Self { sender }
    }
}

impl TailListener for ChannelListener {
    fn on_tail(&self, event: TailEvent) -> Result<(), ListenerClosed> {
        self.sender.send(event).map_err(|_| ListenerClosed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc::sync_channel;

    #[test]
    fn test_channel_listener_forwards_in_order() {
        let (tx, rx) = sync_channel(4);
        let listener = ChannelListener::new(tx);

        listener.on_tail(TailEvent::new("a".into(), 1)).unwrap();
        listener.on_tail(TailEvent::new("bc".into(), 2)).unwrap();
        drop(listener);

        let events: Vec<_> = rx.iter().collect();
        assert_eq!(
            events,
            vec![TailEvent::new("a".into(), 1), TailEvent::new("bc".into(), 2)]
        );
    }

    #[test]
    fn test_channel_listener_reports_closed_receiver() {
        let (tx, rx) = sync_channel(4);
        let listener = ChannelListener::new(tx);
        drop(rx);

        assert_eq!(
            listener.on_tail(TailEvent::new("x".into(), 1)),
            Err(ListenerClosed)
        );
    }
}
