//! Integration tests for indexing CSV files on disk

use indexed_csv::{IndexedCsvError, IndexedCsvReader, Record, ReaderOptions};

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tempfile::tempdir;

/// Helper: write `contents` to `name` inside `dir`
fn write_file(dir: &Path, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    let mut file = File::create(&path).expect("create file");
    file.write_all(contents.as_bytes()).expect("write file");
    path
}

fn record(pairs: &[(&'static str, &'static str)]) -> Record {
    pairs.iter().copied().collect()
}

const PEOPLE: &str = "age,name,color
23,Dan,blue
33,Danny,purple
50,Danna,red
22,Barbra,grey
55,Moshik,white
";

#[test]
fn test_people_scenario() {
    let dir = tempdir().unwrap();
    let path = write_file(dir.path(), "people.csv", PEOPLE);
    let mut reader = IndexedCsvReader::open(&path).unwrap();

    assert_eq!(
        reader.get_line(3).unwrap(),
        record(&[("age", "50"), ("name", "Danna"), ("color", "red")])
    );
    assert!(matches!(
        reader.get_line(0),
        Err(IndexedCsvError::HeaderRequested)
    ));
    assert!(matches!(
        reader.get_line(6),
        Err(IndexedCsvError::OutOfRange { .. })
    ));

    let tail: Vec<Record> = reader.get_iter(4).unwrap().map(|r| r.unwrap()).collect();
    assert_eq!(
        tail,
        vec![
            record(&[("age", "22"), ("name", "Barbra"), ("color", "grey")]),
            record(&[("age", "55"), ("name", "Moshik"), ("color", "white")]),
        ]
    );
}

#[test]
fn test_random_order_lookups_on_large_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("numbers.csv");
    let lines = 50_000usize;
    {
        let mut out = BufWriter::new(File::create(&path).unwrap());
        writeln!(out, "id,square,label").unwrap();
        for i in 1..=lines {
            writeln!(out, "{},{},row-{}", i, i * i, i).unwrap();
        }
        out.flush().unwrap();
    }

    let mut reader = IndexedCsvReader::open(&path).unwrap();
    assert_eq!(reader.data_lines(), lines);

    for n in [lines, 1, 31_337, 2, 49_999, 25_000, 1] {
        let record = reader.get_line(n).unwrap();
        let expected_square = (n * n).to_string();
        let expected_label = format!("row-{}", n);
        assert_eq!(record.get("id"), Some(n.to_string().as_str()));
        assert_eq!(record.get("square"), Some(expected_square.as_str()));
        assert_eq!(record.get("label"), Some(expected_label.as_str()));
    }

    let count = reader.get_iter(lines - 9).unwrap().count();
    assert_eq!(count, 10);
}

#[test]
fn test_semicolon_file_in_strict_mode() {
    let dir = tempdir().unwrap();
    let path = write_file(dir.path(), "semi.csv", "a;b\n1;2\n3\n4;5\n");
    let options = ReaderOptions::default().delimiter(b';').strict(true);
    let mut reader = IndexedCsvReader::open_with_options(&path, options).unwrap();

    let results: Vec<_> = reader.get_iter(1).unwrap().collect();
    assert_eq!(results.len(), 3);
    assert_eq!(results[0].as_ref().unwrap(), &record(&[("a", "1"), ("b", "2")]));
    assert!(matches!(
        results[1],
        Err(IndexedCsvError::MalformedRow {
            line: 2,
            expected: 2,
            actual: 1
        })
    ));
    assert_eq!(results[2].as_ref().unwrap(), &record(&[("a", "4"), ("b", "5")]));
}

#[test]
fn test_reader_can_be_shared_behind_mutex() {
    use std::sync::{Arc, Mutex};
    use std::thread;

    let dir = tempdir().unwrap();
    let path = write_file(dir.path(), "people.csv", PEOPLE);
    let reader = Arc::new(Mutex::new(IndexedCsvReader::open(&path).unwrap()));

    let handles: Vec<_> = (1..=5)
        .map(|n| {
            let reader = Arc::clone(&reader);
            thread::spawn(move || {
                let mut reader = reader.lock().unwrap();
                reader.get_line(n).unwrap().get("age").unwrap().to_string()
            })
        })
        .collect();

    let mut ages: Vec<String> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    ages.sort();
    assert_eq!(ages, vec!["22", "23", "33", "50", "55"]);
}
