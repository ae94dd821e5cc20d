//! Property-based tests for random access and iteration
//!
//! Rows are generated without delimiters or line breaks inside fields, the
//! only input the reader is defined for.

use proptest::prelude::*;
use std::io::Cursor;

use indexed_csv::{IndexedCsvError, IndexedCsvReader, Record};

/// Strategy for generating a field value
///
/// Never empty: a single-column row with an empty value would render as a
/// blank final line, which is indistinguishable from a trailing newline.
fn field_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_.-][a-zA-Z0-9 _.-]{0,11}"
}

/// Strategy for generating distinct column names
fn header_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::btree_set("[a-z][a-z0-9_]{0,8}", 1..6)
        .prop_map(|names| names.into_iter().collect())
}

/// Strategy for a header plus rows of exactly the header's width
fn table_strategy() -> impl Strategy<Value = (Vec<String>, Vec<Vec<String>>)> {
    header_strategy().prop_flat_map(|header| {
        let width = header.len();
        let rows = prop::collection::vec(prop::collection::vec(field_strategy(), width), 1..40);
        (Just(header), rows)
    })
}

/// Strategy for the line terminator used throughout a file
fn terminator_strategy() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just("\n"), Just("\r\n")]
}

fn render(header: &[String], rows: &[Vec<String>], terminator: &str, trailing: bool) -> String {
    let mut lines = vec![header.join(",")];
    lines.extend(rows.iter().map(|row| row.join(",")));
    let mut text = lines.join(terminator);
    if trailing {
        text.push_str(terminator);
    }
    text
}

fn expected_record(header: &[String], row: &[String]) -> Record {
    header
        .iter()
        .map(String::as_str)
        .zip(row.iter().map(String::as_str))
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Every valid line decodes to the header zipped with that row's fields.
    #[test]
    fn property_get_line_matches_row(
        (header, rows) in table_strategy(),
        terminator in terminator_strategy(),
        trailing in any::<bool>(),
    ) {
        let text = render(&header, &rows, terminator, trailing);
        let mut reader = IndexedCsvReader::new(Cursor::new(text)).unwrap();

        prop_assert_eq!(reader.data_lines(), rows.len());
        prop_assert_eq!(reader.index().len(), rows.len() + 1);

        for (i, row) in rows.iter().enumerate() {
            let record = reader.get_line(i + 1).unwrap();
            prop_assert_eq!(record.len(), header.len());
            prop_assert_eq!(record, expected_record(&header, row));
        }
    }

    // get_iter(k) yields exactly get_line(k..=N), in order.
    #[test]
    fn property_get_iter_matches_get_line(
        (header, rows) in table_strategy(),
        start_seed in any::<prop::sample::Index>(),
    ) {
        let text = render(&header, &rows, "\n", true);
        let mut reader = IndexedCsvReader::new(Cursor::new(text)).unwrap();
        let n = rows.len();
        let start = start_seed.index(n) + 1;

        let from_iter: Vec<Record> = reader
            .get_iter(start)
            .unwrap()
            .map(|r| r.unwrap())
            .collect();
        prop_assert_eq!(from_iter.len(), n - start + 1);

        let from_lookup: Vec<Record> = (start..=n).map(|i| reader.get_line(i).unwrap()).collect();
        prop_assert_eq!(from_iter, from_lookup);
    }

    // Lookups are idempotent in any order.
    #[test]
    fn property_lookups_are_idempotent(
        (header, rows) in table_strategy(),
        picks in prop::collection::vec(any::<prop::sample::Index>(), 1..20),
    ) {
        let text = render(&header, &rows, "\n", false);
        let mut reader = IndexedCsvReader::new(Cursor::new(text)).unwrap();

        for pick in picks {
            let line = pick.index(rows.len()) + 1;
            let first = reader.get_line(line).unwrap();
            let second = reader.get_line(line).unwrap();
            prop_assert_eq!(&first, &second);
            prop_assert_eq!(first, expected_record(&header, &rows[line - 1]));
        }
    }

    // Line 0 and anything past N are rejected with distinct errors.
    #[test]
    fn property_invalid_lines_are_rejected(
        (header, rows) in table_strategy(),
        past_end in 1usize..1000,
    ) {
        let text = render(&header, &rows, "\n", true);
        let mut reader = IndexedCsvReader::new(Cursor::new(text)).unwrap();
        let n = rows.len();

        prop_assert!(matches!(reader.get_line(0), Err(IndexedCsvError::HeaderRequested)));
        let is_out_of_range = matches!(
            reader.get_line(n + past_end),
            Err(IndexedCsvError::OutOfRange { line, data_lines }) if line == n + past_end && data_lines == n
        );
        prop_assert!(is_out_of_range);
    }

    // Offsets start at 0 and strictly increase.
    #[test]
    fn property_offsets_strictly_increase(
        (header, rows) in table_strategy(),
        terminator in terminator_strategy(),
    ) {
        let text = render(&header, &rows, terminator, true);
        let reader = IndexedCsvReader::new(Cursor::new(text.clone())).unwrap();
        let offsets = reader.index().as_slice();

        prop_assert_eq!(offsets[0], 0);
        prop_assert!(offsets.windows(2).all(|w| w[0] < w[1]));
        prop_assert_eq!(reader.index().total_bytes(), text.len() as u64);
    }

    // Rows of the wrong width never fail in lenient mode; the shorter side wins.
    #[test]
    fn property_lenient_rows_zip_to_shortest(
        header in header_strategy(),
        row in prop::collection::vec(field_strategy(), 1..10),
    ) {
        let text = format!("{}\n{}\n", header.join(","), row.join(","));
        let mut reader = IndexedCsvReader::new(Cursor::new(text)).unwrap();
        let record = reader.get_line(1).unwrap();

        prop_assert_eq!(record.len(), header.len().min(row.len()));
        prop_assert_eq!(&record, &expected_record(&header, &row));
        let mismatched = u64::from(header.len() != row.len());
        prop_assert_eq!(reader.malformed_rows(), mismatched);
    }
}
