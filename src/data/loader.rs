use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use serde::Deserialize;

use super::error::DataError;
use super::model::Sample;

const COLUMNS: [&str; 3] = ["mass", "cross section", "uncertainty"];

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a cross-section table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`  – headerless rows `mass,xs,unc[,...]`
/// * `.json` – `[[mass, xs, unc], ...]` or `[{ "mass": .., "cross_section": .., "uncertainty": .. }, ...]`
/// * anything else – whitespace separated `mass xs unc` per line
///
/// A `.csv` or `.json` file that does not parse as such is read again as
/// whitespace text; if that fails too, the first error is reported.
///
/// Rows are returned in file order; mass ordering is not checked.
pub fn load_table(path: &Path) -> Result<Vec<Sample>, DataError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let structured = match ext.as_str() {
        "csv" => Some(load_csv(path)),
        "json" => Some(load_json(path)),
        _ => None,
    };
    let samples = match structured {
        None => load_text(path)?,
        Some(Ok(samples)) => samples,
        Some(Err(err @ DataError::Format { .. })) => load_text(path).map_err(|_| err)?,
        Some(Err(err)) => return Err(err),
    };
    log::info!("loaded {} samples from {}", samples.len(), path.display());
    Ok(samples)
}

fn open(path: &Path) -> Result<File, DataError> {
    File::open(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => DataError::NotFound {
            path: path.to_path_buf(),
        },
        _ => DataError::Io {
            path: path.to_path_buf(),
            source,
        },
    })
}

fn format_error(path: &Path, line: usize, reason: impl Into<String>) -> DataError {
    DataError::Format {
        path: path.to_path_buf(),
        line,
        reason: reason.into(),
    }
}

/// Parse the three leading fields of one row. Extra fields are ignored.
fn parse_fields<'a>(
    path: &Path,
    line: usize,
    fields: impl Iterator<Item = &'a str>,
) -> Result<Sample, DataError> {
    let fields: Vec<&str> = fields.collect();
    if fields.len() < COLUMNS.len() {
        return Err(format_error(
            path,
            line,
            format!("expected at least 3 fields, found {}", fields.len()),
        ));
    }

    let mut values = [0.0_f64; 3];
    for ((slot, column), token) in values.iter_mut().zip(COLUMNS).zip(&fields) {
        *slot = token
            .parse::<f64>()
            .map_err(|_| format_error(path, line, format!("{column} '{token}' is not a number")))?;
    }
    Ok(Sample::new(values[0], values[1], values[2]))
}

// ---------------------------------------------------------------------------
// Whitespace text loader / writer
// ---------------------------------------------------------------------------

/// Write samples as whitespace separated text, one `mass xs unc` per line.
pub fn save_table(path: &Path, samples: &[Sample]) -> Result<(), DataError> {
    let text: String = samples
        .iter()
        .map(|s| format!("{} {:e} {:e}\n", s.mass, s.cross_section, s.uncertainty))
        .collect();
    std::fs::write(path, text).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn load_text(path: &Path) -> Result<Vec<Sample>, DataError> {
    let mut text = String::new();
    open(path)?
        .read_to_string(&mut text)
        .map_err(|source| DataError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    parse_text(path, &text)
}

/// Parse whitespace separated table text. Blank lines are skipped.
pub(crate) fn parse_text(path: &Path, text: &str) -> Result<Vec<Sample>, DataError> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| parse_fields(path, i + 1, line.split_whitespace()))
        .collect()
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: no header, `mass,xs,unc` in the first three columns.
fn load_csv(path: &Path) -> Result<Vec<Sample>, DataError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(open(path)?);

    let mut samples = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.map_err(|e| format_error(path, row_no + 1, e.to_string()))?;
        let line = record
            .position()
            .map_or(row_no + 1, |pos| pos.line() as usize);
        samples.push(parse_fields(path, line, record.iter())?);
    }
    Ok(samples)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum JsonSample {
    Row(Vec<f64>),
    Record {
        mass: f64,
        #[serde(alias = "xs")]
        cross_section: f64,
        #[serde(alias = "unc")]
        uncertainty: f64,
    },
}

fn load_json(path: &Path) -> Result<Vec<Sample>, DataError> {
    let rows: Vec<JsonSample> = serde_json::from_reader(BufReader::new(open(path)?))
        .map_err(|e| format_error(path, e.line(), e.to_string()))?;

    rows.into_iter()
        .enumerate()
        .map(|(i, row)| match row {
            JsonSample::Row(values) if values.len() >= COLUMNS.len() => {
                Ok(Sample::new(values[0], values[1], values[2]))
            }
            JsonSample::Row(values) => Err(format_error(
                path,
                i + 1,
                format!("record has {} values, expected at least 3", values.len()),
            )),
            JsonSample::Record {
                mass,
                cross_section,
                uncertainty,
            } => Ok(Sample::new(mass, cross_section, uncertainty)),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn table_path() -> PathBuf {
        PathBuf::from("table.txt")
    }

    #[test]
    fn parses_whitespace_rows_in_order() {
        let text = "100 1.0 0.1\n200\t0.5   0.05\n\n  300 0.25 0.025 extra\n";
        let samples = parse_text(&table_path(), text).unwrap();
        assert_eq!(
            samples,
            vec![
                Sample::new(100.0, 1.0, 0.1),
                Sample::new(200.0, 0.5, 0.05),
                Sample::new(300.0, 0.25, 0.025),
            ]
        );
    }

    #[test]
    fn keeps_file_order_without_sorting() {
        let samples = parse_text(&table_path(), "300 1 0\n100 2 0\n").unwrap();
        assert_eq!(samples[0].mass, 300.0);
        assert_eq!(samples[1].mass, 100.0);
    }

    #[test]
    fn short_line_is_format_error() {
        let err = parse_text(&table_path(), "100 1.0 0.1\n200 0.5\n").unwrap_err();
        match err {
            DataError::Format { line, reason, .. } => {
                assert_eq!(line, 2);
                assert!(reason.contains("found 2"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn non_numeric_token_is_format_error() {
        let err = parse_text(&table_path(), "100 abc 0.1\n").unwrap_err();
        match err {
            DataError::Format { line, reason, .. } => {
                assert_eq!(line, 1);
                assert!(reason.contains("'abc'"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_table(&dir.path().join("missing.txt")).unwrap_err();
        assert!(matches!(err, DataError::NotFound { .. }));
    }

    #[test]
    fn loads_text_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("den.dat");
        std::fs::write(&path, "100 1.0 0.1\n200 0.5 0.05\n").unwrap();
        let samples = load_table(&path).unwrap();
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[1], Sample::new(200.0, 0.5, 0.05));
    }

    #[test]
    fn saved_table_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("saved.txt");
        let samples = vec![Sample::new(100.0, 1.25e3, 62.5), Sample::new(125.0, 0.5, 0.025)];
        save_table(&path, &samples).unwrap();
        assert_eq!(load_table(&path).unwrap(), samples);
    }

    #[test]
    fn loads_csv_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("num.csv");
        std::fs::write(&path, "100, 2.0, 0.2\n200,1.0,0.1,ignored\n").unwrap();
        let samples = load_table(&path).unwrap();
        assert_eq!(
            samples,
            vec![Sample::new(100.0, 2.0, 0.2), Sample::new(200.0, 1.0, 0.1)]
        );
    }

    #[test]
    fn csv_bad_token_reports_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.csv");
        std::fs::write(&path, "100,2.0,0.2\n200,x,0.1\n").unwrap();
        match load_table(&path).unwrap_err() {
            DataError::Format { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn loads_json_rows_and_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("num.json");
        std::fs::write(
            &path,
            r#"[[100, 2.0, 0.2], {"mass": 200, "xs": 1.0, "unc": 0.1}]"#,
        )
        .unwrap();
        let samples = load_table(&path).unwrap();
        assert_eq!(
            samples,
            vec![Sample::new(100.0, 2.0, 0.2), Sample::new(200.0, 1.0, 0.1)]
        );
    }

    #[test]
    fn whitespace_table_with_structured_extension() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["xs.csv", "xs.json"] {
            let path = dir.path().join(name);
            std::fs::write(&path, "100 1.0 0.1\n200 0.5 0.05\n").unwrap();
            assert_eq!(
                load_table(&path).unwrap(),
                vec![Sample::new(100.0, 1.0, 0.1), Sample::new(200.0, 0.5, 0.05)],
                "{name}"
            );
        }
    }

    #[test]
    fn json_short_row_is_format_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("short.json");
        std::fs::write(&path, "[[100, 2.0]]").unwrap();
        assert!(matches!(
            load_table(&path).unwrap_err(),
            DataError::Format { line: 1, .. }
        ));
    }
}
