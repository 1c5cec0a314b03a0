use std::collections::BTreeSet;
use std::fmt;
use std::path::PathBuf;

// ---------------------------------------------------------------------------
// Column labels of the source table
// ---------------------------------------------------------------------------

pub const COL_GLOBAL_RANK: &str = "Global Rank";
pub const COL_COMPANY: &str = "Company";
pub const COL_COUNTRY: &str = "Country";
pub const COL_CONTINENT: &str = "Continent";
pub const COL_SALES: &str = "Sales ($billion)";
pub const COL_PROFITS: &str = "Profits ($billion)";
pub const COL_MARKET_VALUE: &str = "Market Value ($billion)";
pub const COL_LATITUDE: &str = "Latitude_final";
pub const COL_LONGITUDE: &str = "Longitude_final";

/// Columns every source must provide (after trimming labels).
pub const REQUIRED_COLUMNS: [&str; 9] = [
    COL_GLOBAL_RANK,
    COL_COMPANY,
    COL_COUNTRY,
    COL_CONTINENT,
    COL_SALES,
    COL_PROFITS,
    COL_MARKET_VALUE,
    COL_LATITUDE,
    COL_LONGITUDE,
];

/// Sentinel continent option meaning "no continent constraint".
pub const ALL_CONTINENTS: &str = "All";

// ---------------------------------------------------------------------------
// CompanyRecord – one row of the table
// ---------------------------------------------------------------------------

/// A single company. Monetary fields are in billions; profits may be negative.
#[derive(Debug, Clone, PartialEq)]
pub struct CompanyRecord {
    pub global_rank: i64,
    pub company: String,
    pub country: String,
    pub continent: String,
    pub sales: f64,
    pub profits: f64,
    pub market_value: f64,
    pub latitude: f64,
    pub longitude: f64,
}

// ---------------------------------------------------------------------------
// NumericColumn – typed access to the numeric fields
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericColumn {
    GlobalRank,
    Sales,
    Profits,
    MarketValue,
}

impl NumericColumn {
    pub fn value(self, record: &CompanyRecord) -> f64 {
        match self {
            NumericColumn::GlobalRank => record.global_rank as f64,
            NumericColumn::Sales => record.sales,
            NumericColumn::Profits => record.profits,
            NumericColumn::MarketValue => record.market_value,
        }
    }

    /// Source column label.
    pub fn label(self) -> &'static str {
        match self {
            NumericColumn::GlobalRank => COL_GLOBAL_RANK,
            NumericColumn::Sales => COL_SALES,
            NumericColumn::Profits => COL_PROFITS,
            NumericColumn::MarketValue => COL_MARKET_VALUE,
        }
    }
}

impl fmt::Display for NumericColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// CompanyDataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The loaded dataset. Immutable once built; shared behind an `Arc`.
#[derive(Debug, Clone)]
pub struct CompanyDataset {
    /// Where the rows came from.
    pub source: PathBuf,
    /// All complete rows, in source order.
    pub records: Vec<CompanyRecord>,
    /// Sorted distinct non-empty continents.
    pub continents: BTreeSet<String>,
    /// Sorted distinct non-empty countries.
    pub countries: BTreeSet<String>,
}

impl CompanyDataset {
    /// Build the option indices from the loaded records.
    pub fn from_records(source: impl Into<PathBuf>, records: Vec<CompanyRecord>) -> Self {
        let mut continents = BTreeSet::new();
        let mut countries = BTreeSet::new();

        for rec in &records {
            if !rec.continent.is_empty() {
                continents.insert(rec.continent.clone());
            }
            if !rec.country.is_empty() {
                countries.insert(rec.country.clone());
            }
        }

        CompanyDataset {
            source: source.into(),
            records,
            continents,
            countries,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&CompanyRecord> {
        self.records.get(index)
    }
}
