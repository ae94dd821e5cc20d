//! Indexed CSV - print lines of large CSV files by number
//!
//! Indexes the file given with `--file` once, then prints either a single data
//! line (`--line`, default 3) or every line from `--from` to the end.
//!
//! # Exit Codes
//!
//! | Code | Meaning |
//! |------|---------|
//! | 0 | Success |
//! | 1 | Configuration/argument error |
//! | 2 | Requested line does not exist (header or past the end) |
//! | 3 | File I/O error |
//! | 4 | File content could not be decoded |

use clap::Parser;
use std::io;
use std::process::ExitCode;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use indexed_csv::cli::{write_records, Args, IndexStats};
use indexed_csv::error::{IndexedCsvError, Result};
use indexed_csv::IndexedCsvReader;

/// Exit code for success
const EXIT_SUCCESS: u8 = 0;
/// Exit code for configuration/argument errors
const EXIT_CONFIG_ERROR: u8 = 1;
/// Exit code for a line number the file does not have
const EXIT_LINE_ERROR: u8 = 2;
/// Exit code for file I/O errors
const EXIT_IO_ERROR: u8 = 3;
/// Exit code for undecodable file content
const EXIT_DATA_ERROR: u8 = 4;

fn main() -> ExitCode {
    let args = Args::parse();

    if let Err(e) = args.validate() {
        eprintln!("Error: Configuration error: {}", e);
        eprintln!("  Hint: Use --help for usage information");
        return ExitCode::from(EXIT_CONFIG_ERROR);
    }

    init_tracing();

    match run(&args) {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(e) => {
            eprintln!("Error: {}", e);
            if let IndexedCsvError::OutOfRange { .. } | IndexedCsvError::HeaderRequested = e {
                eprintln!("  Hint: Use --stats to see how many data lines the file has");
            }
            ExitCode::from(error_to_exit_code(&e))
        }
    }
}

/// Logs go to stderr so they never mix with printed records. `RUST_LOG`
/// overrides the default `warn` level.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();
}

fn run(args: &Args) -> Result<()> {
    let mut reader = IndexedCsvReader::open_with_options(&args.file, args.reader_options())?;
    info!(
        file = %args.file.display(),
        data_lines = reader.data_lines(),
        "file indexed"
    );

    let stdout = io::stdout();
    let out = stdout.lock();

    if args.stats {
        return IndexStats::from_reader(&args.file, &reader).write_to(args.format, out);
    }

    let header = reader.header().clone();
    let written = match args.from {
        Some(start) => {
            let records = reader.get_iter(start)?;
            let limit = args.limit.unwrap_or(usize::MAX);
            write_records(args.format, &header, records.take(limit), out)?
        }
        None => {
            let record = reader.get_line(args.line)?;
            write_records(args.format, &header, std::iter::once(Ok(record)), out)?
        }
    };
    info!(records = written, "done");

    if reader.malformed_rows() > 0 {
        warn!(
            rows = reader.malformed_rows(),
            "some rows had a different number of fields than the header"
        );
    }

    Ok(())
}

/// Map an error to its exit code.
fn error_to_exit_code(error: &IndexedCsvError) -> u8 {
    match error {
        IndexedCsvError::InvalidArgument(_) => EXIT_CONFIG_ERROR,
        IndexedCsvError::OutOfRange { .. } => EXIT_LINE_ERROR,
        IndexedCsvError::HeaderRequested => EXIT_LINE_ERROR,
        IndexedCsvError::Io(_) => EXIT_IO_ERROR,
        IndexedCsvError::Csv(_) => EXIT_IO_ERROR,
        IndexedCsvError::Json(_) => EXIT_IO_ERROR,
        IndexedCsvError::MissingHeader => EXIT_DATA_ERROR,
        IndexedCsvError::InvalidUtf8 { .. } => EXIT_DATA_ERROR,
        IndexedCsvError::MalformedRow { .. } => EXIT_DATA_ERROR,
    }
}
