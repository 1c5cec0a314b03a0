use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use serde::Serialize;

/// (country, continent, latitude, longitude) of each headquarters country.
const COUNTRIES: [(&str, &str, f64, f64); 16] = [
    ("China", "Asia", 35.9, 104.2),
    ("Japan", "Asia", 36.2, 138.3),
    ("India", "Asia", 20.6, 79.0),
    ("South Korea", "Asia", 35.9, 127.8),
    ("United States", "North America", 37.1, -95.7),
    ("Canada", "North America", 56.1, -106.3),
    ("Mexico", "North America", 23.6, -102.6),
    ("Germany", "Europe", 51.2, 10.5),
    ("United Kingdom", "Europe", 55.4, -3.4),
    ("France", "Europe", 46.2, 2.2),
    ("Switzerland", "Europe", 46.8, 8.2),
    ("Brazil", "South America", -14.2, -51.9),
    ("Chile", "South America", -35.7, -71.5),
    ("South Africa", "Africa", -30.6, 22.9),
    ("Nigeria", "Africa", 9.1, 8.7),
    ("Australia", "Oceania", -25.3, 133.8),
];

const NAME_PARTS: [&str; 12] = [
    "Global", "United", "Pacific", "Atlas", "Summit", "Nova", "Harbor", "Crown", "Apex",
    "Meridian", "Pioneer", "Zenith",
];
const INDUSTRIES: [&str; 8] = [
    "Bank", "Energy", "Motors", "Holdings", "Telecom", "Pharma", "Insurance", "Mining",
];

/// One output row, labelled the way the published dataset is.
#[derive(Debug, Serialize)]
struct CompanyRow {
    #[serde(rename = "Global Rank")]
    global_rank: i64,
    #[serde(rename = "Company")]
    company: String,
    #[serde(rename = "Country")]
    country: String,
    #[serde(rename = "Continent")]
    continent: String,
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

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }

    fn uniform(&mut self, low: f64, high: f64) -> f64 {
        low + (high - low) * self.next_f64()
    }
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

fn generate(count: i64, rng: &mut SimpleRng) -> Vec<CompanyRow> {
    (1..=count)
        .map(|rank| {
            let &(country, continent, lat, lon) = rng.pick(&COUNTRIES);

            // Size decays with rank; profits occasionally negative.
            let scale = 2000.0 / (rank as f64 + 20.0);
            let market_value = round2(scale * rng.uniform(5.0, 25.0));
            let sales = round2(scale * rng.uniform(2.0, 12.0));
            let profits = round2(scale * rng.uniform(-0.2, 1.5));

            // Roughly one row in fifty is incomplete, like the real export.
            let incomplete = rng.next_f64() < 0.02;
            let prefix = rng.pick(&NAME_PARTS);
            let industry = rng.pick(&INDUSTRIES);

            CompanyRow {
                global_rank: rank,
                company: format!("{prefix} {industry} {rank}"),
                country: country.to_string(),
                continent: continent.to_string(),
                sales: Some(sales),
                profits: Some(profits),
                market_value: (!incomplete).then_some(market_value),
                latitude: Some(round2(lat + rng.uniform(-3.0, 3.0))),
                longitude: Some(round2(lon + rng.uniform(-3.0, 3.0))),
            }
        })
        .collect()
}

fn write_csv(path: &Path, rows: &[CompanyRow]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV file")?;
    for row in rows {
        writer.serialize(row).context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV file")?;
    Ok(())
}

fn write_parquet(path: &Path, rows: &[CompanyRow]) -> Result<()> {
    let text = |f: fn(&CompanyRow) -> &str| {
        StringArray::from(rows.iter().map(f).collect::<Vec<_>>())
    };
    let number = |f: fn(&CompanyRow) -> Option<f64>| {
        Float64Array::from(rows.iter().map(f).collect::<Vec<_>>())
    };

    let schema = Arc::new(Schema::new(vec![
        Field::new("Global Rank", DataType::Int64, false),
        Field::new("Company", DataType::Utf8, false),
        Field::new("Country", DataType::Utf8, false),
        Field::new("Continent", DataType::Utf8, false),
        Field::new("Sales ($billion)", DataType::Float64, true),
        Field::new("Profits ($billion)", DataType::Float64, true),
        Field::new("Market Value ($billion)", DataType::Float64, true),
        Field::new("Latitude_final", DataType::Float64, true),
        Field::new("Longitude_final", DataType::Float64, true),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(Int64Array::from(
                rows.iter().map(|r| r.global_rank).collect::<Vec<_>>(),
            )),
            Arc::new(text(|r| r.company.as_str())),
            Arc::new(text(|r| r.country.as_str())),
            Arc::new(text(|r| r.continent.as_str())),
            Arc::new(number(|r| r.sales)),
            Arc::new(number(|r| r.profits)),
            Arc::new(number(|r| r.market_value)),
            Arc::new(number(|r| r.latitude)),
            Arc::new(number(|r| r.longitude)),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).context("creating parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing record batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    let parquet = std::env::args().any(|a| a == "--parquet");
    let mut rng = SimpleRng::new(42);
    let rows = generate(2000, &mut rng);

    let csv_path = Path::new("Top2000_Companies_Globally_Fixed.csv");
    write_csv(csv_path, &rows)?;
    println!("Wrote {} companies to {}", rows.len(), csv_path.display());

    if parquet {
        let pq_path = Path::new("Top2000_Companies_Globally_Fixed.parquet");
        write_parquet(pq_path, &rows)?;
        println!("Wrote {} companies to {}", rows.len(), pq_path.display());
    }
    Ok(())
}
