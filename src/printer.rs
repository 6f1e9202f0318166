//! Output side of tailing: drains emitted lines into a writer.

use crate::event::TailEvent;
use std::io::{self, Write};
use std::sync::mpsc::Receiver;

/// Single consumer for every tailer's events
///
/// Events from concurrent tailers arrive through one channel, so each line
/// is written whole and in the order it was delivered.
pub struct TailPrinter<W: Write> {
    writer: W,
    receiver: Receiver<TailEvent>,
}

impl<W: Write> TailPrinter<W> {
    pub fn new(writer: W, receiver: Receiver<TailEvent>) -> Self {
        Self { writer, receiver }
    }

    /// Print until every sender is gone.
    ///
    /// Returns the number of lines written. A closed pipe on the other end
    /// ends printing without an error.
    pub fn run(mut self) -> io::Result<u64> {
        let mut printed = 0u64;

        for event in self.receiver.iter() {
            match write_line(&mut self.writer, &event) {
                Ok(()) => printed += 1,
                Err(e) if e.kind() == io::ErrorKind::BrokenPipe => {
                    tracing::debug!("output closed, stopping printer");
                    return Ok(printed);
                }
                Err(e) => return Err(e),
            }
        }

        Ok(printed)
    }
}

fn write_line<W: Write>(writer: &mut W, event: &TailEvent) -> io::Result<()> {
    writer.write_all(event.text().as_bytes())?;
    writer.write_all(b"\n")?;
    // Follow output must show up as soon as it is read
    writer.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc::channel;
    use std::thread;

    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_prints_events_in_order() {
        let (tx, rx) = channel();
        tx.send(TailEvent::new("first".into(), 5)).unwrap();
        tx.send(TailEvent::new("".into(), 0)).unwrap();
        tx.send(TailEvent::new("third".into(), 5)).unwrap();
        drop(tx);

        let mut out = Vec::new();
        let printed = TailPrinter::new(&mut out, rx).run().unwrap();

        assert_eq!(printed, 3);
        assert_eq!(String::from_utf8(out).unwrap(), "first\n\nthird\n");
    }

    #[test]
    fn test_merges_many_senders() {
        let (tx, rx) = channel();
        let handles: Vec<_> = (0..4)
            .map(|t| {
                let tx = tx.clone();
                thread::spawn(move || {
                    for i in 0..50 {
                        let text = format!("t{}-{}", t, i);
                        let len = text.len();
                        tx.send(TailEvent::new(text, len)).unwrap();
                    }
                })
            })
            .collect();
        drop(tx);

        let mut out = Vec::new();
        let printed = TailPrinter::new(&mut out, rx).run().unwrap();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(printed, 200);
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 200);
        assert!(text.lines().all(|l| l.starts_with('t') && l.contains('-')));
    }

    #[test]
    fn test_broken_pipe_stops_quietly() {
        let (tx, rx) = channel();
        tx.send(TailEvent::new("lost".into(), 4)).unwrap();
        drop(tx);

        let printed = TailPrinter::new(ClosedPipe, rx).run().unwrap();
        assert_eq!(printed, 0);
    }
}
