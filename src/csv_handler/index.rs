//! Line offset index.
//!
//! [`LineIndex`] records the byte offset at which every line of a stream
//! begins. It is built with one forward pass and never changes afterwards.

use std::io::{BufRead, ErrorKind};

use tracing::debug;

use crate::error::{IndexedCsvError, Result};

/// Ordered byte offsets of every line in a CSV stream.
///
/// Entry 0 is the header and is always `0`. Entry `i` for `i >= 1` is the
/// offset of data line `i`. Offsets are strictly increasing and the index holds
/// exactly `1 + data_lines` entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    offsets: Vec<u64>,
    total_bytes: u64,
}

impl LineIndex {
    /// Scans `input` from its current position to end-of-stream.
    ///
    /// Returns the index together with the raw header line (terminator
    /// included). Data lines are never copied: the scan walks the buffered
    /// chunks in place, so memory use is the header plus one `u64` per line.
    ///
    /// A final line without a trailing newline is a data line. A newline at
    /// the very end of the stream does not open an empty one.
    pub fn build<B: BufRead>(input: &mut B) -> Result<(Self, Vec<u8>)> {
        let mut header = Vec::new();
        let header_len = input.read_until(b'\n', &mut header)?;
        if header_len == 0 {
            return Err(IndexedCsvError::MissingHeader);
        }

        let mut offsets = vec![0u64];
        let mut position = header_len as u64;
        // The header read stops after '\n' or at end-of-stream, so the next byte
        // (if any) starts a line.
        let mut at_line_start = true;

        loop {
            let chunk = match input.fill_buf() {
                Ok(chunk) => chunk,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            };
            if chunk.is_empty() {
                break;
            }

            let len = chunk.len();
            let mut cursor = 0;
            while cursor < len {
                if at_line_start {
                    offsets.push(position + cursor as u64);
                    at_line_start = false;
                }
                match chunk[cursor..].iter().position(|&b| b == b'\n') {
                    Some(i) => {
                        cursor += i + 1;
                        at_line_start = true;
                    }
                    None => break,
                }
            }

            input.consume(len);
            position += len as u64;
        }

        debug!(
            lines = offsets.len(),
            bytes = position,
            "built line offset index"
        );

        Ok((
            Self {
                offsets,
                total_bytes: position,
            },
            header,
        ))
    }

    /// Number of indexed lines, header included.
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    /// Always false: a built index holds at least the header entry.
    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// Number of data lines (index length minus the header).
    pub fn data_lines(&self) -> usize {
        self.offsets.len() - 1
    }

    /// Byte offset of `line`, or `None` past the end.
    pub fn offset(&self, line: usize) -> Option<u64> {
        self.offsets.get(line).copied()
    }

    /// Total number of bytes scanned.
    pub fn total_bytes(&self) -> u64 {
        self.total_bytes
    }

    pub fn as_slice(&self) -> &[u64] {
        &self.offsets
    }
}
