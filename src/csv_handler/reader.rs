use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind, Read, Seek, SeekFrom};
use std::path::Path;

use tracing::{debug, trace};

use super::index::LineIndex;
use super::iter::{RecordCursor, RecordIter};
use super::record::{split_line, Header, Record};
use crate::config::ReaderOptions;
use crate::error::{IndexedCsvError, Result};
use crate::validator::{check_row_shape, validate_line_number};

/// Random-access reader over a CSV stream.
///
/// The `IndexedCsvReader` scans its stream once at construction and records the
/// byte offset of every line. Each lookup afterwards validates the line number,
/// seeks straight to the recorded offset and decodes a single line, so the cost
/// of a lookup does not depend on the size of the file.
///
/// # Features
///
/// - O(1) lookup of any data line with [`get_line`](Self::get_line)
/// - Lazy forward iteration from any line with [`get_iter`](Self::get_iter)
/// - Detached [`RecordCursor`]s that can be advanced in any interleaving
/// - Memory use is the header plus one `u64` per line
///
/// # Concurrency
///
/// Every lookup moves the shared stream cursor, so methods take `&mut self`.
/// Sharing a reader between threads requires wrapping it in a `Mutex`.
///
/// # Example
///
/// ```rust
/// use indexed_csv::IndexedCsvReader;
/// use std::io::Cursor;
///
/// let data = "age,name,color\n23,Dan,blue\n33,Danny,purple\n50,Danna,red\n";
/// let mut reader = IndexedCsvReader::new(Cursor::new(data)).unwrap();
///
/// let record = reader.get_line(3).unwrap();
/// assert_eq!(record.get("name"), Some("Danna"));
///
/// let names: Vec<String> = reader
///     .get_iter(2)
///     .unwrap()
///     .map(|r| r.unwrap().get("name").unwrap().to_string())
///     .collect();
/// assert_eq!(names, vec!["Danny", "Danna"]);
/// ```
pub struct IndexedCsvReader<R> {
    /// The buffered stream. Every lookup re-seeks it through the index.
    stream: BufReader<R>,
    header: Header,
    index: LineIndex,
    options: ReaderOptions,
    /// Reused between lookups; holds at most one line.
    line_buf: Vec<u8>,
    /// Rows decoded in lenient mode whose field count differed from the header.
    malformed_rows: u64,
}

impl IndexedCsvReader<File> {
    /// Opens and indexes the file at `path` with default options.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_options(path, ReaderOptions::default())
    }

    /// Opens and indexes the file at `path`.
    pub fn open_with_options<P: AsRef<Path>>(path: P, options: ReaderOptions) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "opening CSV file");
        let file = File::open(path)?;
        Self::with_options(file, options)
    }
}

impl<R: Read + Seek> IndexedCsvReader<R> {
    /// Indexes `stream` with default options (comma delimiter, lenient rows).
    pub fn new(stream: R) -> Result<Self> {
        Self::with_options(stream, ReaderOptions::default())
    }

    /// Indexes `stream`.
    ///
    /// The stream is rewound to its start and read to the end exactly once.
    /// Afterwards its cursor sits at end-of-stream until the first lookup.
    pub fn with_options(stream: R, options: ReaderOptions) -> Result<Self> {
        if !options.delimiter.is_ascii() {
            return Err(IndexedCsvError::InvalidArgument(format!(
                "delimiter must be a single ASCII byte, got 0x{:02x}",
                options.delimiter
            )));
        }

        let mut stream = BufReader::new(stream);
        stream.rewind()?;

        let (index, raw_header) = LineIndex::build(&mut stream)?;
        let header_text = std::str::from_utf8(&raw_header)
            .map_err(|source| IndexedCsvError::InvalidUtf8 { line: 0, source })?;
        let header = Header::parse(header_text, options.delimiter_char());

        debug!(
            columns = header.len(),
            data_lines = index.data_lines(),
            "indexed CSV stream"
        );

        Ok(Self {
            stream,
            header,
            index,
            options,
            line_buf: Vec::new(),
            malformed_rows: 0,
        })
    }

    /// Returns data line `line` (1-based) as a record.
    ///
    /// # Errors
    ///
    /// - [`IndexedCsvError::HeaderRequested`] for line 0
    /// - [`IndexedCsvError::OutOfRange`] past the last data line
    /// - [`IndexedCsvError::Io`] if the seek or read fails
    /// - [`IndexedCsvError::MalformedRow`] in strict mode only
    ///
    /// The first two are checked before the stream is touched.
    pub fn get_line(&mut self, line: usize) -> Result<Record> {
        validate_line_number(line, self.index.data_lines())?;
        self.read_record(line)
    }

    /// Returns a lazy iterator over data lines `start..=data_lines`.
    ///
    /// The start line is validated before the iterator is created. Each step
    /// seeks to its line through the index.
    pub fn get_iter(&mut self, start: usize) -> Result<RecordIter<'_, R>> {
        let cursor = self.cursor(start)?;
        Ok(RecordIter::new(self, cursor))
    }

    /// Returns a cursor over data lines `start..=data_lines` that does not
    /// borrow the reader.
    ///
    /// Several cursors can be advanced against the same reader in any order,
    /// interleaved with [`get_line`](Self::get_line) calls.
    pub fn cursor(&self, start: usize) -> Result<RecordCursor> {
        validate_line_number(start, self.index.data_lines())?;
        Ok(RecordCursor::new(start, self.index.data_lines()))
    }

    /// Seeks to `line` and decodes it. The caller has validated `line`.
    pub(crate) fn read_record(&mut self, line: usize) -> Result<Record> {
        let offset = self
            .index
            .offset(line)
            .ok_or(IndexedCsvError::OutOfRange {
                line,
                data_lines: self.index.data_lines(),
            })?;

        trace!(line, offset, "seeking to line");
        self.stream.seek(SeekFrom::Start(offset))?;

        self.line_buf.clear();
        if self.stream.read_until(b'\n', &mut self.line_buf)? == 0 {
            return Err(IndexedCsvError::Io(std::io::Error::new(
                ErrorKind::UnexpectedEof,
                format!("line {} at offset {} is past the end of the stream", line, offset),
            )));
        }

        let text = std::str::from_utf8(&self.line_buf)
            .map_err(|source| IndexedCsvError::InvalidUtf8 { line, source })?;
        let delimiter = self.options.delimiter_char();

        let field_count = split_line(text, delimiter).count();
        let shape = check_row_shape(line, self.header.len(), field_count, self.options.strict)?;
        if !shape.is_exact() {
            self.malformed_rows += 1;
            debug!(line, %shape, "row field count differs from header");
        }

        Ok(self.header.zip(split_line(text, delimiter)))
    }

    /// Column names from the first line, in file order.
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Number of data lines, header excluded.
    pub fn data_lines(&self) -> usize {
        self.index.data_lines()
    }

    pub fn index(&self) -> &LineIndex {
        &self.index
    }

    pub fn options(&self) -> &ReaderOptions {
        &self.options
    }

    /// Count of lenient-mode lookups that hit a row with the wrong field count.
    pub fn malformed_rows(&self) -> u64 {
        self.malformed_rows
    }

    /// Releases the underlying stream.
    pub fn into_inner(self) -> R {
        self.stream.into_inner()
    }

    #[cfg(test)]
    pub(crate) fn stream_mut(&mut self) -> &mut R {
        self.stream.get_mut()
    }
}
