use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use arrow::array::{Array, Float32Array, Float64Array, Int32Array, Int64Array, StringArray};
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use thiserror::Error;

use super::model::{Dataset, Record, COL_COUNTRY, COL_INDICATOR, COL_VALUE, COL_YEAR};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// A source file could not be turned into a [`Dataset`].
///
/// Fatal at startup; recoverable (status message, dataset unchanged) when the
/// user opens a file at runtime.
#[derive(Debug, Error)]
pub enum DataLoadError {
    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),
    #[error("reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),
    #[error("row {row}: {message}")]
    Malformed { row: usize, message: String },
    #[error("source contains no data rows")]
    Empty,
    #[error("parsing CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("parsing JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("reading Parquet: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),
    #[error("decoding Arrow batch: {0}")]
    Arrow(#[from] arrow::error::ArrowError),
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a long-format statistics table from a file. Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with the four required columns (recommended)
/// * `.json`    – records-oriented array, `df.to_json(orient='records')` style
/// * `.parquet` – flat columns with the same labels
///
/// Every format requires `Country Name`, `Indicator Name`, `Year` and
/// `Value`; `Year` must parse as an integer, a blank or unparsable `Value`
/// becomes a missing value.
pub fn load_file(path: &Path) -> Result<Dataset, DataLoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => Err(DataLoadError::UnsupportedExtension(other.to_string())),
    }
}

fn open(path: &Path) -> Result<std::fs::File, DataLoadError> {
    std::fs::File::open(path).map_err(|source| DataLoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<Dataset, DataLoadError> {
    read_csv(open(path)?)
}

fn read_csv<R: Read>(rdr: R) -> Result<Dataset, DataLoadError> {
    let mut reader = csv::Reader::from_reader(rdr);
    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();

    let column = |name: &'static str| -> Result<usize, DataLoadError> {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or(DataLoadError::MissingColumn(name))
    };
    let country_idx = column(COL_COUNTRY)?;
    let indicator_idx = column(COL_INDICATOR)?;
    let year_idx = column(COL_YEAR)?;
    let value_idx = column(COL_VALUE)?;

    let mut records = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let row = result?;
        let year_text = row.get(year_idx).unwrap_or("").trim();
        let year: i32 = year_text.parse().map_err(|_| DataLoadError::Malformed {
            row: row_no,
            message: format!("'{year_text}' is not a valid year"),
        })?;

        records.push(Record {
            country: row.get(country_idx).unwrap_or("").to_string(),
            indicator: row.get(indicator_idx).unwrap_or("").to_string(),
            year,
            value: parse_value(row.get(value_idx).unwrap_or("")),
        });
    }

    Dataset::from_records(records).ok_or(DataLoadError::Empty)
}

/// Blank or non-numeric cells are missing values, not errors.
fn parse_value(s: &str) -> Option<f64> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    s.parse::<f64>().ok()
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented):
///
/// ```json
/// [
///   {
///     "Country Name": "Chile",
///     "Indicator Name": "Population, total",
///     "Year": 2000,
///     "Value": 15342000.0
///   },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<Dataset, DataLoadError> {
    let mut text = String::new();
    open(path)?
        .read_to_string(&mut text)
        .map_err(|source| DataLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    parse_json(&text)
}

fn parse_json(text: &str) -> Result<Dataset, DataLoadError> {
    let records: Vec<Record> = serde_json::from_str(text)?;
    Dataset::from_records(records).ok_or(DataLoadError::Empty)
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with flat (scalar) columns.
///
/// Expected schema: `Country Name` and `Indicator Name` as Utf8, `Year` as
/// Int32/Int64, `Value` as a nullable Float32/Float64 (Int columns are
/// accepted too). Works with files written by both Pandas
/// (`df.to_parquet()`) and Polars (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<Dataset, DataLoadError> {
    let builder = ParquetRecordBatchReaderBuilder::try_new(open(path)?)?;
    let reader = builder.build()?;

    let mut records = Vec::new();

    for batch_result in reader {
        let batch = batch_result?;
        let schema = batch.schema();

        let column = |name: &'static str| -> Result<usize, DataLoadError> {
            schema
                .index_of(name)
                .map_err(|_| DataLoadError::MissingColumn(name))
        };
        let country_col = batch.column(column(COL_COUNTRY)?).clone();
        let indicator_col = batch.column(column(COL_INDICATOR)?).clone();
        let year_col = batch.column(column(COL_YEAR)?).clone();
        let value_col = batch.column(column(COL_VALUE)?).clone();

        for row in 0..batch.num_rows() {
            let country =
                string_at(&country_col, row).ok_or_else(|| DataLoadError::Malformed {
                    row,
                    message: format!("'{COL_COUNTRY}' is not a string"),
                })?;
            let indicator =
                string_at(&indicator_col, row).ok_or_else(|| DataLoadError::Malformed {
                    row,
                    message: format!("'{COL_INDICATOR}' is not a string"),
                })?;
            let year = int_at(&year_col, row).ok_or_else(|| DataLoadError::Malformed {
                row,
                message: format!("'{COL_YEAR}' is not an integer"),
            })? as i32;

            records.push(Record {
                country,
                indicator,
                year,
                value: float_at(&value_col, row),
            });
        }
    }

    Dataset::from_records(records).ok_or(DataLoadError::Empty)
}

// -- Arrow helpers --

fn string_at(col: &Arc<dyn Array>, row: usize) -> Option<String> {
    if col.is_null(row) {
        return None;
    }
    col.as_any()
        .downcast_ref::<StringArray>()
        .map(|a| a.value(row).to_string())
}

fn int_at(col: &Arc<dyn Array>, row: usize) -> Option<i64> {
    if col.is_null(row) {
        return None;
    }
    match col.data_type() {
        DataType::Int32 => col
            .as_any()
            .downcast_ref::<Int32Array>()
            .map(|a| a.value(row) as i64),
        DataType::Int64 => col
            .as_any()
            .downcast_ref::<Int64Array>()
            .map(|a| a.value(row)),
        _ => None,
    }
}

fn float_at(col: &Arc<dyn Array>, row: usize) -> Option<f64> {
    if col.is_null(row) {
        return None;
    }
    match col.data_type() {
        DataType::Float32 => col
            .as_any()
            .downcast_ref::<Float32Array>()
            .map(|a| a.value(row) as f64),
        DataType::Float64 => col
            .as_any()
            .downcast_ref::<Float64Array>()
            .map(|a| a.value(row)),
        DataType::Int32 | DataType::Int64 => int_at(col, row).map(|v| v as f64),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_CSV: &str = "\
Country Name,Indicator Name,Year,Value
Chile,GDP,2000,10.5
Chile,Pop,2000,
Norway,GDP,2000,20.25
";

    #[test]
    fn csv_rows_load_in_source_order() {
        let ds = read_csv(SAMPLE_CSV.as_bytes()).unwrap();
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.records[0].country, "Chile");
        assert_eq!(ds.records[0].value, Some(10.5));
        assert_eq!(ds.records[2].value, Some(20.25));
        assert_eq!(ds.year_bounds, (2000, 2000));
    }

    #[test]
    fn blank_value_cell_is_missing() {
        let ds = read_csv(SAMPLE_CSV.as_bytes()).unwrap();
        assert_eq!(ds.records[1].value, None);
    }

    #[test]
    fn non_numeric_value_cell_is_missing() {
        let csv = "Country Name,Indicator Name,Year,Value\nChile,GDP,2000,..\n";
        let ds = read_csv(csv.as_bytes()).unwrap();
        assert_eq!(ds.records[0].value, None);
    }

    #[test]
    fn missing_required_column_fails() {
        let csv = "Country Name,Indicator Name,Year\nChile,GDP,2000\n";
        match read_csv(csv.as_bytes()) {
            Err(DataLoadError::MissingColumn(col)) => assert_eq!(col, COL_VALUE),
            other => panic!("expected MissingColumn, got {other:?}"),
        }
    }

    #[test]
    fn bad_year_fails_with_row_number() {
        let csv = "Country Name,Indicator Name,Year,Value\nChile,GDP,MMXX,1.0\n";
        match read_csv(csv.as_bytes()) {
            Err(DataLoadError::Malformed { row, .. }) => assert_eq!(row, 0),
            other => panic!("expected Malformed, got {other:?}"),
        }
    }

    #[test]
    fn header_only_csv_is_empty() {
        let csv = "Country Name,Indicator Name,Year,Value\n";
        assert!(matches!(read_csv(csv.as_bytes()), Err(DataLoadError::Empty)));
    }

    #[test]
    fn json_records_load() {
        let json = r#"[
            {"Country Name": "Chile", "Indicator Name": "GDP", "Year": 2000, "Value": 10.5},
            {"Country Name": "Chile", "Indicator Name": "Pop", "Year": 2000, "Value": null},
            {"Country Name": "Norway", "Indicator Name": "GDP", "Year": 2010}
        ]"#;
        let ds = parse_json(json).unwrap();
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.records[0].value, Some(10.5));
        assert_eq!(ds.records[1].value, None);
        assert_eq!(ds.records[2].value, None);
        assert_eq!(ds.year_bounds, (2000, 2010));
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let err = load_file(Path::new("indicators.xlsx")).unwrap_err();
        assert!(matches!(err, DataLoadError::UnsupportedExtension(ext) if ext == "xlsx"));
    }
}
