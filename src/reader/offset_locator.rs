use crate::config::DEFAULT_LINE_COUNT;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// Byte that terminates a line, on every platform.
pub const LINE_DELIMITER: u8 = b'\n';

/// Size of each raw read during the offset scan
const SCAN_CHUNK_SIZE: usize = 8 * 1024;

/// Slots reserved up front; larger rings grow on demand up to their capacity
const PREALLOC_SLOTS: usize = 1024;

/// Fixed-capacity circular buffer of line-start offsets
///
/// Holds at most `capacity` entries; once full, every push overwrites the
/// oldest entry. Slots that were never written count as offset 0.
#[derive(Debug)]
pub struct OffsetRing {
    slots: Vec<u64>,
    capacity: usize,
    /// Next slot to write; once full, also the oldest entry
    write: usize,
}

impl OffsetRing {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            slots: Vec::with_capacity(capacity.min(PREALLOC_SLOTS)),
            capacity,
            write: 0,
        }
    }

    /// Ring sized to find the start of the Nth line from the end.
    pub fn for_line_count(line_count: u64) -> Self {
        let capacity = usize::try_from(line_count)
            .ok()
            .and_then(|n| n.checked_add(1))
            .unwrap_or(usize::MAX);
        Self::new(capacity)
    }

    pub fn push(&mut self, offset: u64) {
        if self.slots.len() < self.capacity {
            self.slots.push(offset);
        } else {
            self.slots[self.write] = offset;
        }
        self.write = (self.write + 1) % self.capacity;
    }

    /// Oldest remembered offset, or 0 while the ring has not filled up
    pub fn oldest(&self) -> u64 {
        if self.is_full() {
            self.slots[self.write]
        } else {
            0
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.slots.len() == self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

/// Result of an offset scan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocatedOffset {
    /// Lines seen in the file (may be fewer than requested)
    pub line_count: u64,
    /// Byte offset to start reading from; 0 when the file is too short
    pub skip_offset: u64,
}

/// Running state of one forward scan
struct ScanState {
    ring: OffsetRing,
    lines: u64,
    bytes_read: u64,
    last_byte: Option<u8>,
}

impl ScanState {
    fn new(line_count: u64) -> Self {
        Self {
            ring: OffsetRing::for_line_count(line_count),
            lines: 0,
            bytes_read: 0,
            last_byte: None,
        }
    }

    fn scan<R: Read>(&mut self, mut reader: R) -> io::Result<()> {
        let mut chunk = vec![0u8; SCAN_CHUNK_SIZE];

        loop {
            let n = match reader.read(&mut chunk) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };

            for pos in memchr::memchr_iter(LINE_DELIMITER, &chunk[..n]) {
                self.ring.push(self.bytes_read + pos as u64 + 1);
                self.lines += 1;
            }

            self.bytes_read += n as u64;
            self.last_byte = Some(chunk[n - 1]);
        }

        Ok(())
    }

    fn finish(mut self, requested: u64) -> LocatedOffset {
        // Unterminated last line: record the start of the (empty) line after it
        if matches!(self.last_byte, Some(b) if b != LINE_DELIMITER) {
            self.ring.push(self.bytes_read);
            self.lines += 1;
        }

        let skip_offset = if self.lines >= requested {
            self.ring.oldest()
        } else {
            0
        };

        LocatedOffset {
            line_count: self.lines,
            skip_offset,
        }
    }
}

/// Find the byte offset where the last `line_count` lines of a file begin.
///
/// Scans the file once in fixed-size chunks, remembering only the last
/// `line_count + 1` line starts. A `line_count` of 0 means the default (10).
///
/// A short file, or one that cannot be read, yields offset 0 together with
/// the number of lines actually seen.
pub fn locate<P: AsRef<Path>>(path: P, line_count: u64) -> LocatedOffset {
    let path = path.as_ref();
    let requested = if line_count == 0 {
        DEFAULT_LINE_COUNT
    } else {
        line_count
    };

    let mut state = ScanState::new(requested);
    let scanned = File::open(path).and_then(|file| state.scan(file));

    match scanned {
        Ok(()) => {
            let located = state.finish(requested);
            tracing::debug!(
                path = %path.display(),
                requested,
                lines = located.line_count,
                skip_offset = located.skip_offset,
                "located tail offset"
            );
            located
        }
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "offset scan failed, starting from 0");
            LocatedOffset {
                line_count: state.lines,
                skip_offset: 0,
            }
        }
    }
}
