//! Reader configuration
//!
//! [`ReaderOptions`] controls how data lines are split and how strictly their
//! shape is checked against the header.

/// Default field delimiter.
pub const DEFAULT_DELIMITER: u8 = b',';

/// Options applied to every lookup made by an
/// [`IndexedCsvReader`](crate::IndexedCsvReader).
///
/// # Example
///
/// ```rust
/// use indexed_csv::ReaderOptions;
///
/// let options = ReaderOptions::default().delimiter(b';').strict(true);
/// assert_eq!(options.delimiter, b';');
/// assert!(options.strict);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReaderOptions {
    /// Single-byte field delimiter. Must be ASCII.
    pub delimiter: u8,
    /// Reject rows whose field count differs from the header.
    ///
    /// When false (the default) rows are zipped with the header and the
    /// shorter side wins.
    pub strict: bool,
}

impl Default for ReaderOptions {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER,
            strict: false,
        }
    }
}

impl ReaderOptions {
    /// Sets the field delimiter.
    pub fn delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Enables or disables strict field-count checking.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub(crate) fn delimiter_char(&self) -> char {
        char::from(self.delimiter)
    }
}
