//! Indexed CSV Library
//!
//! Random access to records of CSV files too large to load into memory. A
//! single scan records the byte offset of every line; lookups then seek
//! straight to the requested line and decode only that line.
//!
//! ```rust
//! use indexed_csv::IndexedCsvReader;
//! use std::io::Cursor;
//!
//! let data = "age,name,color\n23,Dan,blue\n33,Danny,purple\n50,Danna,red\n";
//! let mut reader = IndexedCsvReader::new(Cursor::new(data)).unwrap();
//! assert_eq!(reader.get_line(3).unwrap().get("color"), Some("red"));
//! ```

pub mod cli;
pub mod config;
pub mod csv_handler;
pub mod error;
pub mod validator;

pub use config::ReaderOptions;
pub use csv_handler::{Header, IndexedCsvReader, Record, RecordCursor, RecordIter};
pub use error::{IndexedCsvError, Result};
