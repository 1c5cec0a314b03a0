use std::collections::BTreeSet;
use std::path::Path;

use anyhow::{Context, Result, bail};
use arrow::array::{Array, ArrayRef, AsArray, Float64Array, StringArray};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Float64Type};
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::Deserialize;
use serde_json::{Map, Value as JsonValue};

use super::model::{
    COL_COMPANY, COL_CONTINENT, COL_COUNTRY, COL_GLOBAL_RANK, COL_LATITUDE, COL_LONGITUDE,
    COL_MARKET_VALUE, COL_PROFITS, COL_SALES, CompanyDataset, CompanyRecord, REQUIRED_COLUMNS,
};
use crate::error::ExplorerError;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the company table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – UTF-8, header row (the usual export)
/// * `.json`    – `[{ "Global Rank": 1, "Company": "...", ... }, ...]`
/// * `.parquet` – one column per field, numeric columns castable to Float64
///
/// Column labels are trimmed before matching. Rows missing any of the rank,
/// sales, profits, market value, latitude or longitude are dropped.
pub fn load_file(path: &Path) -> Result<CompanyDataset, ExplorerError> {
    let rows = read_rows(path).map_err(|e| ExplorerError::data_load(path, &e))?;
    build_dataset(path, rows).map_err(|e| ExplorerError::data_load(path, &e))
}

fn read_rows(path: &Path) -> Result<Vec<RawCompanyRow>> {
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

fn build_dataset(path: &Path, rows: Vec<RawCompanyRow>) -> Result<CompanyDataset> {
    let total = rows.len();
    let mut records = Vec::with_capacity(total);

    for (row_no, raw) in rows.into_iter().enumerate() {
        if let Some(record) = raw.into_record().with_context(|| format!("row {row_no}"))? {
            records.push(record);
        }
    }

    if records.is_empty() {
        bail!("no complete rows ({total} read, all missing required values)");
    }

    let dropped = total - records.len();
    if dropped > 0 {
        log::info!("Dropped {dropped} of {total} rows with missing required values");
    }

    let dataset = CompanyDataset::from_records(path, records);
    log::info!(
        "Loaded {} companies from {} ({} continents, {} countries)",
        dataset.len(),
        path.display(),
        dataset.continents.len(),
        dataset.countries.len()
    );
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// Intermediate row shared by all formats
// ---------------------------------------------------------------------------

/// A row as it appears in the source: every field may be absent.
#[derive(Debug, Default, Deserialize)]
struct RawCompanyRow {
    #[serde(rename = "Global Rank")]
    global_rank: Option<f64>,
    #[serde(rename = "Company")]
    company: Option<String>,
    #[serde(rename = "Country")]
    country: Option<String>,
    #[serde(rename = "Continent")]
    continent: Option<String>,
    #[serde(rename = "Sales ($billion)")]
    sales: Option<f64>,
    #[serde(rename = "Profits ($billion)")]
    profits: Option<f64>,
    #[serde(rename = "Market Value ($billion)")]
    market_value: Option<f64>,
    #[serde(rename = "Latitude_final")]
    latitude: Option<f64>,
    #[serde(rename = "Longitude_final")]
    longitude: Option<f64>,
}

impl RawCompanyRow {
    /// `Ok(None)` when a required value is missing; NaN counts as missing.
    fn into_record(self) -> Result<Option<CompanyRecord>> {
        let present = |v: Option<f64>| v.filter(|x| !x.is_nan());

        let Some(rank) = present(self.global_rank) else {
            return Ok(None);
        };
        if rank.fract() != 0.0 || !rank.is_finite() {
            bail!("'{COL_GLOBAL_RANK}' must be an integer, got {rank}");
        }

        let (Some(sales), Some(profits), Some(market_value), Some(latitude), Some(longitude)) = (
            present(self.sales),
            present(self.profits),
            present(self.market_value),
            present(self.latitude),
            present(self.longitude),
        ) else {
            return Ok(None);
        };

        Ok(Some(CompanyRecord {
            global_rank: rank as i64,
            company: self.company.unwrap_or_default(),
            country: self.country.unwrap_or_default(),
            continent: self.continent.unwrap_or_default(),
            sales,
            profits,
            market_value,
            latitude,
            longitude,
        }))
    }
}

/// Fail with the list of required columns absent from `labels`.
fn check_required_columns<'a>(labels: impl IntoIterator<Item = &'a str>) -> Result<()> {
    let present: BTreeSet<&str> = labels.into_iter().collect();
    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|col| !present.contains(col))
        .collect();

    if !missing.is_empty() {
        bail!("missing required column(s): {}", missing.join(", "));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Header and cell whitespace is trimmed; empty cells read as missing.
fn load_csv(path: &Path) -> Result<Vec<RawCompanyRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .context("opening CSV")?;

    let headers = reader.headers().context("reading CSV headers")?.clone();
    check_required_columns(headers.iter())?;

    reader
        .deserialize::<RawCompanyRow>()
        .enumerate()
        .map(|(row_no, result)| result.with_context(|| format!("CSV row {row_no}")))
        .collect()
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON, the default `df.to_json(orient='records')`:
///
/// ```json
/// [
///   { "Global Rank": 1, "Company": "ICBC", "Country": "China", ... },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<Vec<RawCompanyRow>> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let records = root.as_array().context("Expected top-level JSON array")?;

    let mut labels: BTreeSet<String> = BTreeSet::new();
    let mut trimmed = Vec::with_capacity(records.len());

    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;

        let obj: Map<String, JsonValue> = obj
            .iter()
            .map(|(key, val)| (key.trim().to_string(), val.clone()))
            .collect();
        labels.extend(obj.keys().cloned());
        trimmed.push(JsonValue::Object(obj));
    }

    check_required_columns(labels.iter().map(String::as_str))?;

    trimmed
        .into_iter()
        .enumerate()
        .map(|(i, obj)| {
            serde_json::from_value::<RawCompanyRow>(obj).with_context(|| format!("JSON row {i}"))
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file holding the company table.
///
/// Text columns may be Utf8, LargeUtf8 or dictionary encoded; numeric columns
/// may be any integer or float type. Works with files written by both
/// **Pandas** (`df.to_parquet()`) and **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<Vec<RawCompanyRow>> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;

    let labels: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().trim().to_string())
        .collect();
    check_required_columns(labels.iter().map(String::as_str))?;

    let position = |name: &str| labels.iter().position(|l| l == name).unwrap_or_default();
    let reader = builder.build().context("building parquet reader")?;

    let mut rows = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let first = rows.len();

        let rank = float_column(&batch, position(COL_GLOBAL_RANK), first)?;
        let company = text_column(&batch, position(COL_COMPANY))?;
        let country = text_column(&batch, position(COL_COUNTRY))?;
        let continent = text_column(&batch, position(COL_CONTINENT))?;
        let sales = float_column(&batch, position(COL_SALES), first)?;
        let profits = float_column(&batch, position(COL_PROFITS), first)?;
        let market_value = float_column(&batch, position(COL_MARKET_VALUE), first)?;
        let latitude = float_column(&batch, position(COL_LATITUDE), first)?;
        let longitude = float_column(&batch, position(COL_LONGITUDE), first)?;

        for row in 0..batch.num_rows() {
            rows.push(RawCompanyRow {
                global_rank: float_at(rank.as_primitive::<Float64Type>(), row),
                company: text_at(company.as_string::<i32>(), row),
                country: text_at(country.as_string::<i32>(), row),
                continent: text_at(continent.as_string::<i32>(), row),
                sales: float_at(sales.as_primitive::<Float64Type>(), row),
                profits: float_at(profits.as_primitive::<Float64Type>(), row),
                market_value: float_at(market_value.as_primitive::<Float64Type>(), row),
                latitude: float_at(latitude.as_primitive::<Float64Type>(), row),
                longitude: float_at(longitude.as_primitive::<Float64Type>(), row),
            });
        }
    }

    Ok(rows)
}

// -- Parquet / Arrow helpers --

/// Cast to Float64. A value that was present but does not parse is an error
/// naming its row; `first_row` is the batch's offset in the file.
fn float_column(batch: &RecordBatch, idx: usize, first_row: usize) -> Result<ArrayRef> {
    let name = batch.schema().field(idx).name().clone();
    let source = batch.column(idx);
    let floats = cast(source.as_ref(), &DataType::Float64)
        .with_context(|| format!("column '{name}' is not numeric"))?;

    if let Some(row) = (0..source.len()).find(|&i| source.is_valid(i) && floats.is_null(i)) {
        bail!("row {}: unparsable value in '{name}'", first_row + row);
    }
    Ok(floats)
}

fn text_column(batch: &RecordBatch, idx: usize) -> Result<ArrayRef> {
    let name = batch.schema().field(idx).name().clone();
    cast(batch.column(idx).as_ref(), &DataType::Utf8)
        .with_context(|| format!("column '{name}' is not text"))
}

fn float_at(arr: &Float64Array, row: usize) -> Option<f64> {
    arr.is_valid(row).then(|| arr.value(row))
}

fn text_at(arr: &StringArray, row: usize) -> Option<String> {
    arr.is_valid(row).then(|| arr.value(row).to_string())
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Arc;

    use arrow::array::Int64Array;
    use parquet::arrow::ArrowWriter;
    use tempfile::TempDir;

    use super::*;

    const HEADER: &str = "Global Rank, Company ,Country,Continent,Sales ($billion),\
                          Profits ($billion),Market Value ($billion),Latitude_final, Longitude_final";

    fn write_file(dir: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn csv_labels_are_trimmed_and_incomplete_rows_dropped() {
        let dir = TempDir::new().unwrap();
        let path = write_file(
            &dir,
            "top.csv",
            &format!(
                "{HEADER}\n\
                 1,ICBC,China,Asia,190.5,45.8,249.5,39.9,116.4\n\
                 2,JPMorgan Chase,United States,North America,136.2,40.4,,40.7,-74.0\n\
                 3,Toyota,Japan,Asia,281.2,22.7,217.3,35.1,137.2\n\
                 ,Nameless,Nowhere,Europe,1.0,1.0,1.0,1.0,1.0\n"
            ),
        );

        let ds = load_file(&path).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records[0].company, "ICBC");
        assert_eq!(ds.records[1].global_rank, 3);
        assert_eq!(ds.records[1].longitude, 137.2);
        assert!(!ds.countries.contains("United States"));
        assert_eq!(ds.source, path);
    }

    #[test]
    fn missing_text_fields_are_kept_as_empty() {
        let dir = TempDir::new().unwrap();
        let path = write_file(
            &dir,
            "top.csv",
            &format!("{HEADER}\n1,Mystery,,,1.0,0.5,10.0,0.0,0.0\n"),
        );

        let ds = load_file(&path).unwrap();
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.records[0].country, "");
        assert!(ds.countries.is_empty());
    }

    #[test]
    fn missing_column_is_a_load_error() {
        let dir = TempDir::new().unwrap();
        let path = write_file(
            &dir,
            "top.csv",
            "Global Rank,Company,Country,Continent,Sales ($billion),Profits ($billion)\n\
             1,ICBC,China,Asia,190.5,45.8\n",
        );

        let err = load_file(&path).unwrap_err();
        let ExplorerError::DataLoad { reason, .. } = err else {
            panic!("expected DataLoad, got {err:?}");
        };
        assert!(reason.contains("Market Value ($billion)"), "{reason}");
        assert!(reason.contains("Longitude_final"), "{reason}");
    }

    #[test]
    fn unparsable_value_is_a_load_error() {
        let dir = TempDir::new().unwrap();
        let path = write_file(
            &dir,
            "top.csv",
            &format!("{HEADER}\n1,ICBC,China,Asia,lots,45.8,249.5,39.9,116.4\n"),
        );

        assert!(matches!(
            load_file(&path),
            Err(ExplorerError::DataLoad { .. })
        ));
    }

    #[test]
    fn fractional_rank_is_a_load_error() {
        let dir = TempDir::new().unwrap();
        let path = write_file(
            &dir,
            "top.csv",
            &format!("{HEADER}\n1.5,ICBC,China,Asia,190.5,45.8,249.5,39.9,116.4\n"),
        );

        assert!(load_file(&path).is_err());
    }

    #[test]
    fn source_without_complete_rows_is_a_load_error() {
        let dir = TempDir::new().unwrap();
        let path = write_file(
            &dir,
            "top.csv",
            &format!("{HEADER}\n1,ICBC,China,Asia,190.5,45.8,NaN,39.9,116.4\n"),
        );

        let err = load_file(&path).unwrap_err();
        assert!(err.to_string().contains("no complete rows"), "{err}");
    }

    #[test]
    fn unreadable_source_is_a_load_error() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("absent.csv");
        assert!(matches!(
            load_file(&missing),
            Err(ExplorerError::DataLoad { .. })
        ));

        let other = write_file(&dir, "top.xlsx", "");
        let err = load_file(&other).unwrap_err();
        assert!(err.to_string().contains("Unsupported file extension"));
    }

    #[test]
    fn json_records_load_with_trimmed_keys() {
        let dir = TempDir::new().unwrap();
        let path = write_file(
            &dir,
            "top.json",
            r#"[
                {"Global Rank": 1.0, " Company ": "ICBC", "Country": "China", "Continent": "Asia",
                 "Sales ($billion)": 190.5, "Profits ($billion)": 45.8,
                 "Market Value ($billion)": 249.5, "Latitude_final": 39.9, "Longitude_final": 116.4},
                {"Global Rank": 2, "Company": "Ghost", "Country": "China", "Continent": "Asia",
                 "Sales ($billion)": null, "Profits ($billion)": 1.0,
                 "Market Value ($billion)": 2.0, "Latitude_final": 0.0, "Longitude_final": 0.0}
            ]"#,
        );

        let ds = load_file(&path).unwrap();
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.records[0].company, "ICBC");
        assert_eq!(ds.records[0].global_rank, 1);
    }

    #[test]
    fn json_unparsable_value_is_a_load_error() {
        let dir = TempDir::new().unwrap();
        let path = write_file(
            &dir,
            "top.json",
            r#"[
                {"Global Rank": 1, "Company": "ICBC", "Country": "China", "Continent": "Asia",
                 "Sales ($billion)": "lots", "Profits ($billion)": 45.8,
                 "Market Value ($billion)": 249.5, "Latitude_final": 39.9, "Longitude_final": 116.4}
            ]"#,
        );

        let err = load_file(&path).unwrap_err();
        let ExplorerError::DataLoad { reason, .. } = err else {
            panic!("expected DataLoad, got {err:?}");
        };
        assert!(reason.contains("JSON row 0"), "{reason}");
    }

    fn write_parquet(path: &Path, sales: ArrayRef, market_value: ArrayRef) {
        let batch = RecordBatch::try_from_iter(vec![
            ("Global Rank", Arc::new(Int64Array::from(vec![1, 2])) as ArrayRef),
            ("Company", Arc::new(StringArray::from(vec!["ICBC", "Toyota"])) as ArrayRef),
            ("Country", Arc::new(StringArray::from(vec!["China", "Japan"])) as ArrayRef),
            ("Continent", Arc::new(StringArray::from(vec!["Asia", "Asia"])) as ArrayRef),
            ("Sales ($billion)", sales),
            ("Profits ($billion)", Arc::new(Float64Array::from(vec![45.8, 22.7])) as ArrayRef),
            ("Market Value ($billion)", market_value),
            ("Latitude_final", Arc::new(Float64Array::from(vec![39.9, 35.1])) as ArrayRef),
            ("Longitude_final", Arc::new(Float64Array::from(vec![116.4, 137.2])) as ArrayRef),
        ])
        .unwrap();

        let file = std::fs::File::create(path).unwrap();
        let mut writer = ArrowWriter::try_new(file, batch.schema(), None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();
    }

    #[test]
    fn parquet_columns_are_cast_to_record_fields() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("top.parquet");
        write_parquet(
            &path,
            Arc::new(Float64Array::from(vec![190.5, 281.2])),
            Arc::new(Float64Array::from(vec![Some(249.5), None])),
        );

        let ds = load_file(&path).unwrap();
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.records[0].global_rank, 1);
        assert_eq!(ds.records[0].market_value, 249.5);
        assert_eq!(ds.records[0].continent, "Asia");
    }

    #[test]
    fn parquet_numeric_text_is_parsed() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("top.parquet");
        write_parquet(
            &path,
            Arc::new(StringArray::from(vec!["190.5", "281.2"])),
            Arc::new(StringArray::from(vec![Some("249.5"), None])),
        );

        let ds = load_file(&path).unwrap();
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.records[0].sales, 190.5);
    }

    #[test]
    fn parquet_unparsable_value_is_a_load_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("top.parquet");
        write_parquet(
            &path,
            Arc::new(StringArray::from(vec!["190.5", "lots"])),
            Arc::new(Float64Array::from(vec![249.5, 217.3])),
        );

        let err = load_file(&path).unwrap_err();
        let ExplorerError::DataLoad { reason, .. } = err else {
            panic!("expected DataLoad, got {err:?}");
        };
        assert!(reason.contains("row 1"), "{reason}");
        assert!(reason.contains("Sales ($billion)"), "{reason}");
    }
}
