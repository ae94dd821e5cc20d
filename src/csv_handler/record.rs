//! Header and record types.
//!
//! Defines [`Header`] (ordered column names), [`Record`] (one decoded data row)
//! and the line splitting shared by both.

use std::collections::HashMap;
use std::fmt;

use serde::ser::{Serialize, SerializeMap, Serializer};

/// Strips one trailing `\n` or `\r\n` from a raw line.
pub fn trim_line_terminator(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}

/// Splits a raw line into fields after removing its line terminator.
///
/// No quoting or escaping is recognised: every delimiter separates fields.
///
/// ```rust
/// use indexed_csv::csv_handler::split_line;
///
/// let fields: Vec<&str> = split_line("23,Dan,blue\r\n", ',').collect();
/// assert_eq!(fields, vec!["23", "Dan", "blue"]);
/// ```
pub fn split_line(line: &str, delimiter: char) -> std::str::Split<'_, char> {
    trim_line_terminator(line).split(delimiter)
}

/// Ordered column names parsed from the first line of the file.
///
/// Duplicate names are kept as they appear; they only collapse when a row is
/// decoded into a [`Record`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    columns: Vec<String>,
}

impl Header {
    /// Parses a raw header line.
    pub fn parse(line: &str, delimiter: char) -> Self {
        Self {
            columns: split_line(line, delimiter).map(str::to_string).collect(),
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Builds a record by zipping column names with `values`.
    ///
    /// Extra header columns are absent from the result and extra values are
    /// dropped. When a name repeats, the later value replaces the earlier one
    /// and the column keeps its first position.
    pub fn zip<'a, I>(&self, values: I) -> Record
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut record = Record::with_capacity(self.columns.len());
        for (name, value) in self.columns.iter().zip(values) {
            record.insert(name.clone(), value.to_string());
        }
        record
    }
}

/// One decoded data row: column name to field value, in header order.
///
/// Records are produced on demand and never cached by the reader.
///
/// # Example
///
/// ```rust
/// use indexed_csv::csv_handler::Header;
///
/// let header = Header::parse("age,name,color\n", ',');
/// let record = header.zip(vec!["50", "Danna", "red"]);
/// assert_eq!(record.get("name"), Some("Danna"));
/// assert_eq!(record.keys().collect::<Vec<_>>(), vec!["age", "name", "color"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    fields: Vec<(String, String)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            fields: Vec::with_capacity(capacity),
        }
    }

    /// Inserts a field, replacing the value of an existing column of the same
    /// name. Returns the replaced value.
    pub fn insert(&mut self, column: String, value: String) -> Option<String> {
        match self.fields.iter_mut().find(|(name, _)| *name == column) {
            Some((_, existing)) => Some(std::mem::replace(existing, value)),
            None => {
                self.fields.push((column, value));
                None
            }
        }
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value.as_str())
    }

    pub fn contains_key(&self, column: &str) -> bool {
        self.get(column).is_some()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterates `(column, value)` pairs in header order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(_, value)| value.as_str())
    }

    /// Converts into an unordered map.
    pub fn into_map(self) -> HashMap<String, String> {
        self.fields.into_iter().collect()
    }
}

impl IntoIterator for Record {
    type Item = (String, String);
    type IntoIter = std::vec::IntoIter<(String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

impl<'a> FromIterator<(&'a str, &'a str)> for Record {
    fn from_iter<T: IntoIterator<Item = (&'a str, &'a str)>>(iter: T) -> Self {
        let mut record = Record::new();
        for (name, value) in iter {
            record.insert(name.to_string(), value.to_string());
        }
        record
    }
}

/// Formats as `{age: "50", name: "Danna"}`.
impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (name, value)) in self.fields.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {:?}", name, value)?;
        }
        write!(f, "}}")
    }
}

/// Serialized as a map in header order, e.g. `{"age":"50","name":"Danna"}`.
impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
