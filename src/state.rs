use std::collections::BTreeSet;
use std::ops::RangeInclusive;
use std::path::Path;
use std::sync::Arc;

use crate::color::ColorMap;
use crate::dashboard::Dashboard;
use crate::data::aggregate::extremes;
use crate::data::cache::DatasetCache;
use crate::data::filter::{FilterCriteria, ValueRange, available_continents, available_countries};
use crate::data::model::{ALL_CONTINENTS, CompanyDataset, NumericColumn};
use crate::data::search::{SearchMode, SearchOutcome, search_by_name};
use crate::error::{ExplorerError, Result};

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

pub const DEFAULT_DATASET_PATH: &str = "Top2000_Companies_Globally_Fixed.csv";
/// Environment variable overriding the dataset path.
pub const DATASET_PATH_ENV: &str = "COMPANY_EXPLORER_DATA";

pub const TOP_N_BOUNDS: RangeInclusive<i64> = 5..=50;
pub const DEFAULT_TOP_N: i64 = 10;
pub const DEFAULT_MARKET_VALUE_RANGE: (f64, f64) = (100.0, 500.0);

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Memoized loader shared by every open action.
    cache: Arc<DatasetCache>,

    /// Loaded dataset (None until a file loads successfully).
    pub dataset: Option<Arc<CompanyDataset>>,

    /// Continent selector options ("All" first).
    pub continent_options: Vec<String>,
    pub continent: String,

    /// Country options for the current continent.
    pub country_options: Vec<String>,
    pub selected_countries: BTreeSet<String>,

    pub top_n: i64,
    pub market_value_range: ValueRange,
    /// Whole-number slider limits enclosing the global market value extremes.
    pub market_value_bounds: (f64, f64),

    /// Derived views for the current selection.
    pub dashboard: Option<Dashboard>,

    pub search_query: String,
    pub search_mode: SearchMode,
    pub search_outcome: SearchOutcome,

    /// Continent colours for the map.
    pub color_map: ColorMap,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_cache(Arc::new(DatasetCache::new()))
    }
}

impl AppState {
    pub fn with_cache(cache: Arc<DatasetCache>) -> Self {
        let (low, high) = DEFAULT_MARKET_VALUE_RANGE;
        Self {
            cache,
            dataset: None,
            continent_options: vec![ALL_CONTINENTS.to_string()],
            continent: ALL_CONTINENTS.to_string(),
            country_options: Vec::new(),
            selected_countries: BTreeSet::new(),
            top_n: DEFAULT_TOP_N,
            market_value_range: ValueRange::new(low, high).unwrap_or_else(|_| ValueRange::unbounded()),
            market_value_bounds: (low, high),
            dashboard: None,
            search_query: String::new(),
            search_mode: SearchMode::default(),
            search_outcome: SearchOutcome::Idle,
            color_map: ColorMap::default(),
            status_message: None,
        }
    }

    /// Load `path` through the cache and make it the current dataset.
    /// On failure the previous dataset (if any) stays in place.
    pub fn open(&mut self, path: &Path) -> Result<()> {
        match self.cache.load(path) {
            Ok(dataset) => self.set_dataset(dataset),
            Err(e) => {
                log::error!("{e}");
                self.status_message = Some(format!("Error: {e}"));
                Err(e)
            }
        }
    }

    /// Drop the cached copy of the current source and read it again.
    pub fn reload(&mut self) -> Result<()> {
        let Some(path) = self.dataset.as_ref().map(|ds| ds.source.clone()) else {
            return Ok(());
        };
        self.cache.clear();
        self.open(&path)
    }

    /// Ingest a dataset: reset selectors to their defaults and recompute.
    pub fn set_dataset(&mut self, dataset: Arc<CompanyDataset>) -> Result<()> {
        let (max, min) = extremes(&dataset, NumericColumn::MarketValue)?;
        let bounds = (min.floor(), max.ceil());
        let (low, high) = DEFAULT_MARKET_VALUE_RANGE;

        self.market_value_bounds = bounds;
        self.market_value_range = ValueRange::new(
            low.clamp(bounds.0, bounds.1),
            high.clamp(bounds.0, bounds.1),
        )?;
        self.continent_options = available_continents(&dataset);
        self.continent = ALL_CONTINENTS.to_string();
        self.country_options = available_countries(&dataset, ALL_CONTINENTS);
        self.selected_countries.clear();
        self.color_map = ColorMap::new(&dataset.continents);
        self.search_outcome = SearchOutcome::Idle;
        self.status_message = None;

        self.dataset = Some(dataset);
        self.recompute();
        self.run_search();
        Ok(())
    }

    pub fn criteria(&self) -> FilterCriteria {
        FilterCriteria {
            continent: Some(self.continent.clone()),
            countries: self.selected_countries.clone(),
            market_value_range: self.market_value_range,
        }
    }

    /// Rebuild the dashboard for the current selection. On error the prior
    /// dashboard stays and the message is shown.
    pub fn recompute(&mut self) {
        let Some(ds) = &self.dataset else {
            return;
        };
        match Dashboard::compute(ds, &self.criteria(), self.top_n) {
            Ok(dashboard) => {
                log::debug!(
                    "Selection {} / {} countries / {:?}: {} companies",
                    self.continent,
                    self.selected_countries.len(),
                    self.market_value_range,
                    dashboard.high_value.len()
                );
                self.dashboard = Some(dashboard);
            }
            Err(e) => {
                log::warn!("Keeping previous dashboard: {e}");
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Switch continent; countries that are no longer offered are deselected.
    pub fn set_continent(&mut self, continent: &str) {
        if self.continent == continent {
            return;
        }
        self.continent = continent.to_string();
        if let Some(ds) = &self.dataset {
            self.country_options = available_countries(ds, continent);
        }
        let options = &self.country_options;
        self.selected_countries.retain(|c| options.contains(c));
        self.recompute();
    }

    pub fn toggle_country(&mut self, country: &str) {
        if !self.selected_countries.remove(country) {
            self.selected_countries.insert(country.to_string());
        }
        self.recompute();
    }

    pub fn clear_countries(&mut self) {
        self.selected_countries.clear();
        self.recompute();
    }

    /// Reject a negative count and keep the previous one.
    pub fn set_top_n(&mut self, n: i64) -> Result<()> {
        if n < 0 {
            return Err(ExplorerError::InvalidParameter(format!(
                "top-N count must be non-negative, got {n}"
            )));
        }
        self.top_n = n;
        self.recompute();
        Ok(())
    }

    /// Reject an inverted range and keep the previous one.
    pub fn set_market_value_range(&mut self, low: f64, high: f64) -> Result<()> {
        self.market_value_range = ValueRange::new(low, high)?;
        self.recompute();
        Ok(())
    }

    /// Re-run the name search for the current query and mode.
    pub fn run_search(&mut self) {
        self.search_outcome = match &self.dataset {
            Some(ds) if !self.search_query.is_empty() => SearchOutcome::from_result(
                search_by_name(ds, &self.search_query, self.search_mode),
            ),
            _ => SearchOutcome::Idle,
        };
    }
}
