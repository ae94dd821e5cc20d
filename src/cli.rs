//! CLI argument parsing module
//!
//! Handles command-line argument parsing using `clap` derive macros, and the
//! rendering of looked-up records and index statistics for the binary.

use clap::{Parser, ValueEnum};
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::config::ReaderOptions;
use crate::csv_handler::{Header, IndexedCsvReader, Record};
use crate::error::Result;

/// Output format for printed records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// `{column: "value", ...}` per line
    Text,
    /// One JSON object per line
    Json,
    /// CSV with a header row
    Csv,
}

/// Command-line arguments for the indexed CSV reader.
///
/// Use the `validate()` method after parsing to ensure argument combinations are valid.
///
/// # Example
///
/// ```rust,ignore
/// use clap::Parser;
/// use indexed_csv::cli::Args;
///
/// let args = Args::parse();
/// args.validate()?;
/// ```
#[derive(Parser, Debug)]
#[command(name = "indexed-csv")]
#[command(about = "Look up lines of large CSV files by number")]
#[command(version)]
pub struct Args {
    /// CSV file to index
    #[arg(short, long)]
    pub file: PathBuf,

    /// Data line to print (1-based; 0 is the header)
    #[arg(short = 'n', long, default_value = "3")]
    pub line: usize,

    /// Print every data line from this one to the end instead of a single line
    #[arg(long)]
    pub from: Option<usize>,

    /// Maximum number of lines to print with --from
    #[arg(long)]
    pub limit: Option<usize>,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Field delimiter (single ASCII character)
    #[arg(short, long, default_value = ",")]
    pub delimiter: char,

    /// Fail on rows whose field count differs from the header
    #[arg(long, default_value = "false")]
    pub strict: bool,

    /// Print index statistics instead of records
    #[arg(long, default_value = "false")]
    pub stats: bool,
}

impl Args {
    /// Validate argument combinations.
    ///
    /// - `--delimiter` must be a single ASCII character
    /// - `--limit` requires `--from` and must be at least 1
    /// - `--stats` cannot be combined with `--from`
    ///
    /// Line numbers are not checked here; the reader reports them.
    pub fn validate(&self) -> std::result::Result<(), String> {
        if !self.delimiter.is_ascii() {
            return Err(format!(
                "Invalid delimiter: {:?}. Must be a single ASCII character.",
                self.delimiter
            ));
        }

        if self.limit.is_some() && self.from.is_none() {
            return Err("--limit requires --from".to_string());
        }

        if self.limit == Some(0) {
            return Err("--limit must be at least 1".to_string());
        }

        if self.stats && self.from.is_some() {
            return Err("--stats cannot be used with --from".to_string());
        }

        Ok(())
    }

    /// Reader options derived from the arguments. Call `validate()` first.
    pub fn reader_options(&self) -> ReaderOptions {
        let mut buf = [0u8; 4];
        let delimiter = self.delimiter.encode_utf8(&mut buf).as_bytes()[0];
        ReaderOptions::default()
            .delimiter(delimiter)
            .strict(self.strict)
    }
}

/// Summary of an indexed file, printed by `--stats`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexStats {
    pub path: String,
    pub columns: Vec<String>,
    pub data_lines: usize,
    pub bytes: u64,
}

impl IndexStats {
    pub fn from_reader<R>(path: &Path, reader: &IndexedCsvReader<R>) -> Self
    where
        R: std::io::Read + std::io::Seek,
    {
        Self {
            path: path.display().to_string(),
            columns: reader.header().columns().to_vec(),
            data_lines: reader.data_lines(),
            bytes: reader.index().total_bytes(),
        }
    }

    /// Writes the summary in `format`.
    pub fn write_to<W: Write>(&self, format: OutputFormat, mut out: W) -> Result<()> {
        match format {
            OutputFormat::Json => {
                serde_json::to_writer(&mut out, self)?;
                writeln!(out)?;
            }
            OutputFormat::Csv => {
                let mut writer = csv::Writer::from_writer(&mut out);
                writer.write_record(["path", "columns", "data_lines", "bytes"])?;
                writer.write_record([
                    self.path.clone(),
                    self.columns.len().to_string(),
                    self.data_lines.to_string(),
                    self.bytes.to_string(),
                ])?;
                writer.flush()?;
            }
            OutputFormat::Text => {
                writeln!(out, "File:       {}", self.path)?;
                writeln!(out, "Columns:    {}", self.columns.join(", "))?;
                writeln!(out, "Data lines: {}", self.data_lines)?;
                writeln!(out, "Bytes:      {}", self.bytes)?;
            }
        }
        Ok(())
    }
}

/// Writes `records` to `out` in `format` and returns how many were written.
///
/// Stops at the first error, after flushing what was already written.
pub fn write_records<W, I>(
    format: OutputFormat,
    header: &Header,
    records: I,
    mut out: W,
) -> Result<usize>
where
    W: Write,
    I: IntoIterator<Item = Result<Record>>,
{
    let mut written = 0;
    match format {
        OutputFormat::Csv => {
            // Quoting here makes the output valid CSV even though the input
            // side never unquotes.
            let mut writer = csv::Writer::from_writer(&mut out);
            writer.write_record(header.columns())?;
            for record in records {
                let record = record?;
                writer.write_record(
                    header
                        .columns()
                        .iter()
                        .map(|column| record.get(column).unwrap_or("")),
                )?;
                written += 1;
            }
            writer.flush()?;
        }
        OutputFormat::Json => {
            for record in records {
                serde_json::to_writer(&mut out, &record?)?;
                writeln!(out)?;
                written += 1;
            }
        }
        OutputFormat::Text => {
            for record in records {
                writeln!(out, "{}", record?)?;
                written += 1;
            }
        }
    }
    out.flush()?;
    Ok(written)
}
