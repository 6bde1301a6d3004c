use std::io;
use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use arrow::array::{Array, AsArray, Float32Array, Float64Array, Int32Array, Int64Array};
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::Deserialize;

use super::model::{LaunchDataset, LaunchRecord, Outcome};

/// Required column names, as they appear in the source dataset.
pub const COL_SITE: &str = "Launch Site";
pub const COL_PAYLOAD: &str = "Payload Mass (kg)";
pub const COL_CLASS: &str = "class";
pub const COL_BOOSTER: &str = "Booster Version Category";

const REQUIRED_COLUMNS: [&str; 4] = [COL_SITE, COL_PAYLOAD, COL_CLASS, COL_BOOSTER];

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a launch dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with the required columns; extras are ignored
/// * `.json`    – `[{ "Launch Site": ..., "Payload Mass (kg)": ..., ... }]`
/// * `.parquet` – flat columnar layout with the same column names
pub fn load_file(path: &Path) -> Result<LaunchDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
}

// ---------------------------------------------------------------------------
// Row deserialization shared by the CSV and JSON loaders
// ---------------------------------------------------------------------------

/// One row as it appears on disk, before validation.
#[derive(Debug, Deserialize)]
struct RawRecord {
    #[serde(rename = "Launch Site")]
    launch_site: String,
    #[serde(rename = "Payload Mass (kg)")]
    payload_mass_kg: f64,
    #[serde(rename = "class")]
    class: i64,
    #[serde(rename = "Booster Version Category")]
    booster_category: String,
}

impl RawRecord {
    fn into_record(self, row: usize) -> Result<LaunchRecord> {
        let outcome = Outcome::from_class(self.class)
            .with_context(|| format!("Row {row}: class must be 0 or 1, got {}", self.class))?;

        if !self.payload_mass_kg.is_finite() || self.payload_mass_kg < 0.0 {
            bail!(
                "Row {row}: payload mass must be a non-negative number, got {}",
                self.payload_mass_kg
            );
        }

        Ok(LaunchRecord {
            site: self.launch_site,
            payload_mass_kg: self.payload_mass_kg,
            outcome,
            booster_category: self.booster_category,
        })
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<LaunchDataset> {
    let file = std::fs::File::open(path).context("opening CSV file")?;
    from_csv_reader(file)
}

/// Parse launch records from any CSV source (file, in-memory buffer, ...).
fn from_csv_reader<R: io::Read>(source: R) -> Result<LaunchDataset> {
    let mut reader = csv::Reader::from_reader(source);

    let headers = reader.headers().context("reading CSV headers")?.clone();
    for col in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == col) {
            bail!("CSV missing '{col}' column");
        }
    }

    let mut records = Vec::new();
    for (row_no, result) in reader.deserialize::<RawRecord>().enumerate() {
        let raw = result.with_context(|| format!("CSV row {row_no}"))?;
        records.push(raw.into_record(row_no)?);
    }

    Ok(LaunchDataset::from_records(records))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default
/// `df.to_json(orient='records')`):
///
/// ```json
/// [
///   {
///     "Launch Site": "CCAFS LC-40",
///     "Payload Mass (kg)": 2296.0,
///     "class": 1,
///     "Booster Version Category": "FT"
///   },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<LaunchDataset> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    from_json_str(&text)
}

fn from_json_str(text: &str) -> Result<LaunchDataset> {
    let raw: Vec<RawRecord> =
        serde_json::from_str(text).context("parsing JSON (expected an array of records)")?;

    let records = raw
        .into_iter()
        .enumerate()
        .map(|(row, r)| r.into_record(row))
        .collect::<Result<Vec<_>>>()?;

    Ok(LaunchDataset::from_records(records))
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with a flat launch-record schema.
///
/// Expected columns:
/// - `Launch Site`: Utf8
/// - `Payload Mass (kg)`: Float64 (Float32/Int64/Int32 also accepted)
/// - `class`: Int64 or Int32
/// - `Booster Version Category`: Utf8
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<LaunchDataset> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();

        let col = |name: &str| {
            schema
                .index_of(name)
                .map(|i| batch.column(i).clone())
                .map_err(|_| anyhow::anyhow!("Parquet file missing '{name}' column"))
        };
        let site_col = col(COL_SITE)?;
        let payload_col = col(COL_PAYLOAD)?;
        let class_col = col(COL_CLASS)?;
        let booster_col = col(COL_BOOSTER)?;

        for row in 0..batch.num_rows() {
            let raw = RawRecord {
                launch_site: string_at(&site_col, row)
                    .with_context(|| format!("Row {row}: reading '{COL_SITE}'"))?,
                payload_mass_kg: f64_at(&payload_col, row)
                    .with_context(|| format!("Row {row}: reading '{COL_PAYLOAD}'"))?,
                class: i64_at(&class_col, row)
                    .with_context(|| format!("Row {row}: reading '{COL_CLASS}'"))?,
                booster_category: string_at(&booster_col, row)
                    .with_context(|| format!("Row {row}: reading '{COL_BOOSTER}'"))?,
            };
            records.push(raw.into_record(row)?);
        }
    }

    Ok(LaunchDataset::from_records(records))
}

// -- Arrow column helpers --

fn string_at(col: &Arc<dyn Array>, row: usize) -> Result<String> {
    if col.is_null(row) {
        bail!("null value in string column");
    }
    match col.data_type() {
        DataType::Utf8 => Ok(col.as_string::<i32>().value(row).to_string()),
        DataType::LargeUtf8 => Ok(col.as_string::<i64>().value(row).to_string()),
        other => bail!("expected a string column, got {other:?}"),
    }
}

fn f64_at(col: &Arc<dyn Array>, row: usize) -> Result<f64> {
    if col.is_null(row) {
        bail!("null value in numeric column");
    }
    match col.data_type() {
        DataType::Float64 => {
            let arr = col
                .as_any()
                .downcast_ref::<Float64Array>()
                .context("expected Float64Array")?;
            Ok(arr.value(row))
        }
        DataType::Float32 => {
            let arr = col
                .as_any()
                .downcast_ref::<Float32Array>()
                .context("expected Float32Array")?;
            Ok(arr.value(row) as f64)
        }
        DataType::Int64 => Ok(i64_at(col, row)? as f64),
        DataType::Int32 => Ok(i64_at(col, row)? as f64),
        other => bail!("expected a numeric column, got {other:?}"),
    }
}

fn i64_at(col: &Arc<dyn Array>, row: usize) -> Result<i64> {
    if col.is_null(row) {
        bail!("null value in integer column");
    }
    match col.data_type() {
        DataType::Int64 => {
            let arr = col
                .as_any()
                .downcast_ref::<Int64Array>()
                .context("expected Int64Array")?;
            Ok(arr.value(row))
        }
        DataType::Int32 => {
            let arr = col
                .as_any()
                .downcast_ref::<Int32Array>()
                .context("expected Int32Array")?;
            Ok(arr.value(row) as i64)
        }
        other => bail!("expected an integer column, got {other:?}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_CSV: &str = "\
Flight Number,Launch Site,class,Payload Mass (kg),Booster Version Category
1,CCAFS LC-40,0,0,v1.0
2,CCAFS LC-40,1,525,v1.0
3,KSC LC-39A,1,5300,FT
";

    #[test]
    fn csv_parses_records_and_ignores_extra_columns() {
        let ds = from_csv_reader(SAMPLE_CSV.as_bytes()).unwrap();
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.sites, vec!["CCAFS LC-40", "KSC LC-39A"]);
        assert_eq!(ds.payload_extent, Some((0.0, 5300.0)));

        let last = &ds.records[2];
        assert_eq!(last.site, "KSC LC-39A");
        assert_eq!(last.payload_mass_kg, 5300.0);
        assert_eq!(last.outcome, Outcome::Success);
        assert_eq!(last.booster_category, "FT");
    }

    #[test]
    fn csv_missing_required_column_is_an_error() {
        let csv = "Launch Site,class,Booster Version Category\nCCAFS LC-40,1,v1.0\n";
        let err = from_csv_reader(csv.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("Payload Mass (kg)"));
    }

    #[test]
    fn csv_rejects_out_of_domain_class() {
        let csv = "\
Launch Site,class,Payload Mass (kg),Booster Version Category
CCAFS LC-40,2,500,v1.0
";
        assert!(from_csv_reader(csv.as_bytes()).is_err());
    }

    #[test]
    fn csv_rejects_negative_payload() {
        let csv = "\
Launch Site,class,Payload Mass (kg),Booster Version Category
CCAFS LC-40,1,-10,v1.0
";
        assert!(from_csv_reader(csv.as_bytes()).is_err());
    }

    #[test]
    fn csv_rejects_non_numeric_payload() {
        let csv = "\
Launch Site,class,Payload Mass (kg),Booster Version Category
CCAFS LC-40,1,heavy,v1.0
";
        assert!(from_csv_reader(csv.as_bytes()).is_err());
    }

    #[test]
    fn json_parses_records_oriented_array() {
        let json = r#"[
            {"Launch Site": "VAFB SLC-4E", "Payload Mass (kg)": 553.0,
             "class": 1, "Booster Version Category": "v1.1"},
            {"Launch Site": "CCAFS SLC-40", "Payload Mass (kg)": 9600,
             "class": 0, "Booster Version Category": "B4"}
        ]"#;
        let ds = from_json_str(json).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records[0].site, "VAFB SLC-4E");
        assert_eq!(ds.records[1].payload_mass_kg, 9600.0);
        assert_eq!(ds.records[1].outcome, Outcome::Failure);
    }

    #[test]
    fn json_missing_field_is_an_error() {
        let json = r#"[{"Launch Site": "VAFB SLC-4E", "class": 1}]"#;
        assert!(from_json_str(json).is_err());
    }

    #[test]
    fn unsupported_extension_is_an_error() {
        assert!(load_file(Path::new("records.xlsx")).is_err());
    }
}
