//! Forward iteration over data lines.
//!
//! Both [`RecordIter`] and [`RecordCursor`] keep only a line counter. Every step
//! seeks to its line through the index instead of relying on where the previous
//! read left the stream, so cursors may be interleaved with each other and with
//! direct lookups on the same reader.

use std::io::{Read, Seek};
use std::iter::FusedIterator;

use super::reader::IndexedCsvReader;
use super::record::Record;
use crate::error::{IndexedCsvError, Result};

/// Position within a run of data lines, detached from any reader.
///
/// Obtained from [`IndexedCsvReader::cursor`].
///
/// # Example
///
/// ```rust
/// use indexed_csv::IndexedCsvReader;
/// use std::io::Cursor;
///
/// let mut reader = IndexedCsvReader::new(Cursor::new("n\n1\n2\n3\n")).unwrap();
/// let mut early = reader.cursor(1).unwrap();
/// let mut late = reader.cursor(3).unwrap();
///
/// assert_eq!(early.next_record(&mut reader).unwrap().unwrap().get("n"), Some("1"));
/// assert_eq!(late.next_record(&mut reader).unwrap().unwrap().get("n"), Some("3"));
/// assert_eq!(early.next_record(&mut reader).unwrap().unwrap().get("n"), Some("2"));
/// assert!(late.next_record(&mut reader).is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordCursor {
    /// Next line to read.
    next: usize,
    /// Last data line, inclusive.
    end: usize,
}

impl RecordCursor {
    pub(crate) fn new(start: usize, end: usize) -> Self {
        Self { next: start, end }
    }

    /// Line number the next call will read.
    pub fn position(&self) -> usize {
        self.next
    }

    /// Number of lines left to read.
    pub fn remaining(&self) -> usize {
        (self.end + 1).saturating_sub(self.next)
    }

    pub fn is_finished(&self) -> bool {
        self.next > self.end
    }

    /// Reads the next record from `reader`.
    ///
    /// Returns `None` once the last data line has been read. A stream error is
    /// returned once and finishes the cursor; decoding errors (bad UTF-8, or a
    /// malformed row in strict mode) only affect their own line.
    pub fn next_record<R: Read + Seek>(
        &mut self,
        reader: &mut IndexedCsvReader<R>,
    ) -> Option<Result<Record>> {
        if self.is_finished() {
            return None;
        }
        let line = self.next;
        self.next += 1;

        let result = reader.read_record(line);
        if let Err(IndexedCsvError::Io(_)) = result {
            self.next = self.end + 1;
        }
        Some(result)
    }
}

/// Lazy iterator over data lines, returned by [`IndexedCsvReader::get_iter`].
///
/// Holds the reader mutably for its lifetime; use [`RecordCursor`] when lookups
/// need to be interleaved.
pub struct RecordIter<'a, R> {
    reader: &'a mut IndexedCsvReader<R>,
    cursor: RecordCursor,
}

impl<'a, R: Read + Seek> RecordIter<'a, R> {
    pub(crate) fn new(reader: &'a mut IndexedCsvReader<R>, cursor: RecordCursor) -> Self {
        Self { reader, cursor }
    }

    /// Line number the next item will come from.
    pub fn position(&self) -> usize {
        self.cursor.position()
    }
}

impl<R: Read + Seek> Iterator for RecordIter<'_, R> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        self.cursor.next_record(self.reader)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        // A stream error ends iteration early.
        (0, Some(self.cursor.remaining()))
    }
}

impl<R: Read + Seek> FusedIterator for RecordIter<'_, R> {}
