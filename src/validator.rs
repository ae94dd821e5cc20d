//! Line and row validation
//!
//! Two checks guard every lookup made by the reader:
//!
//! - [`validate_line_number`] runs before any seek and rejects the header line
//!   and lines past the end of the file
//! - [`check_row_shape`] runs after a row is split and compares its field count
//!   with the header
//!
//! # Example
//!
//! ```rust
//! use indexed_csv::validator::{check_row_shape, validate_line_number, RowShape};
//!
//! assert!(validate_line_number(3, 5).is_ok());
//! assert!(validate_line_number(0, 5).is_err());
//! assert!(validate_line_number(6, 5).is_err());
//!
//! let shape = check_row_shape(2, 3, 2, false).unwrap();
//! assert_eq!(shape, RowShape::MissingFields { missing: 1 });
//! ```

use std::fmt;

use crate::error::{IndexedCsvError, Result};

/// Checks that `line` names an existing data line.
///
/// Line 0 is reported as [`IndexedCsvError::HeaderRequested`]; anything above
/// `data_lines` as [`IndexedCsvError::OutOfRange`].
pub fn validate_line_number(line: usize, data_lines: usize) -> Result<()> {
    if line == 0 {
        return Err(IndexedCsvError::HeaderRequested);
    }
    if line > data_lines {
        return Err(IndexedCsvError::OutOfRange { line, data_lines });
    }
    Ok(())
}

/// Shape of a data row relative to the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowShape {
    /// Same number of fields as header columns.
    Exact,
    /// Fewer fields than columns; the trailing columns are absent from the record.
    MissingFields {
        missing: usize,
    },
    /// More fields than columns; the trailing values are dropped.
    ExtraFields {
        extra: usize,
    },
}

impl RowShape {
    pub fn is_exact(&self) -> bool {
        matches!(self, RowShape::Exact)
    }
}

impl fmt::Display for RowShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowShape::Exact => write!(f, "exact"),
            RowShape::MissingFields { missing } => write!(f, "{} missing fields", missing),
            RowShape::ExtraFields { extra } => write!(f, "{} extra fields", extra),
        }
    }
}

/// Compares a row's field count with the header length.
///
/// In strict mode any mismatch is an [`IndexedCsvError::MalformedRow`]. In
/// lenient mode the mismatch is returned as a [`RowShape`] and the caller
/// decodes the row anyway.
pub fn check_row_shape(
    line: usize,
    header_len: usize,
    field_count: usize,
    strict: bool,
) -> Result<RowShape> {
    let shape = match field_count.cmp(&header_len) {
        std::cmp::Ordering::Equal => RowShape::Exact,
        std::cmp::Ordering::Less => RowShape::MissingFields {
            missing: header_len - field_count,
        },
        std::cmp::Ordering::Greater => RowShape::ExtraFields {
            extra: field_count - header_len,
        },
    };

    if strict && !shape.is_exact() {
        return Err(IndexedCsvError::MalformedRow {
            line,
            expected: header_len,
            actual: field_count,
        });
    }
    Ok(shape)
}
