//! CSV handler module
//!
//! Indexes a CSV stream once and serves records from it by line number.

pub mod index;
pub mod iter;
pub mod reader;
pub mod record;

pub use index::LineIndex;
pub use iter::{RecordCursor, RecordIter};
pub use reader::IndexedCsvReader;
pub use record::{split_line, trim_line_terminator, Header, Record};
