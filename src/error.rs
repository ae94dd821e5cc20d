//! Error module
//!
//! Defines the error type shared by the indexed reader, the line validator and
//! the command-line driver. Caller mistakes (asking for the header or for a line
//! past the end of the file) are kept apart from stream failures so that callers
//! can recover from the former and propagate the latter.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, IndexedCsvError>;

/// The main error type for the indexed CSV reader.
///
/// # Error Categories
///
/// - **Caller errors**: `OutOfRange` and `HeaderRequested` are raised before any
///   seek is attempted and never leave the reader in a different state
/// - **Stream errors**: `Io` wraps every failed seek or read; nothing is retried
/// - **Data errors**: `MissingHeader`, `InvalidUtf8` and (strict mode only)
///   `MalformedRow` describe content the reader cannot decode
/// - **Driver errors**: `Csv`, `Json` and `InvalidArgument` come from the binary
///
/// # Example
///
/// ```rust
/// use indexed_csv::error::IndexedCsvError;
/// use indexed_csv::IndexedCsvReader;
/// use std::io::Cursor;
///
/// let mut reader = IndexedCsvReader::new(Cursor::new("a,b\n1,2\n")).unwrap();
/// match reader.get_line(7) {
///     Err(IndexedCsvError::OutOfRange { line, data_lines }) => {
///         assert_eq!((line, data_lines), (7, 1));
///     }
///     other => panic!("unexpected: {:?}", other),
/// }
/// ```
#[derive(Error, Debug)]
pub enum IndexedCsvError {
    /// The requested line number is larger than the number of data lines.
    #[error("line {line} is out of range: the file has {data_lines} data lines")]
    OutOfRange {
        /// The requested 1-based line number.
        line: usize,
        /// Number of data lines in the file (excluding the header).
        data_lines: usize,
    },

    /// Line 0 was requested through a record lookup.
    ///
    /// Line 0 is the header row and is reserved; use
    /// [`IndexedCsvReader::header`](crate::IndexedCsvReader::header) instead.
    #[error("line 0 is the file header, data lines start at 1")]
    HeaderRequested,

    /// Underlying stream seek or read failure.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The stream was empty, so there is no header row to parse.
    #[error("stream is empty: no header line found")]
    MissingHeader,

    /// A line could not be decoded as UTF-8 text.
    #[error("line {line} is not valid UTF-8: {source}")]
    InvalidUtf8 {
        /// Line number (0 for the header).
        line: usize,
        #[source]
        source: std::str::Utf8Error,
    },

    /// A data row has a different field count than the header.
    ///
    /// Only raised when the reader runs in strict mode. In the default lenient
    /// mode the row is decoded by zipping to the shorter of the two.
    #[error("line {line}: expected {expected} fields but found {actual}")]
    MalformedRow {
        /// The 1-based data line number.
        line: usize,
        /// Number of header columns.
        expected: usize,
        /// Number of fields in the row.
        actual: usize,
    },

    /// CSV output error from the command-line driver.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON output error from the command-line driver.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid command-line argument.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl IndexedCsvError {
    /// Returns true for mistakes the caller can correct by asking for another line.
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self,
            IndexedCsvError::OutOfRange { .. } | IndexedCsvError::HeaderRequested
        )
    }
}
