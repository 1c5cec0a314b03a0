use std::collections::BTreeSet;

use super::model::{ALL_CONTINENTS, CompanyDataset, CompanyRecord};
use crate::error::{ExplorerError, Result};

// ---------------------------------------------------------------------------
// ValueRange – inclusive numeric bounds
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueRange {
    low: f64,
    high: f64,
}

impl ValueRange {
    pub fn new(low: f64, high: f64) -> Result<Self> {
        if low.is_nan() || high.is_nan() {
            return Err(ExplorerError::InvalidParameter(
                "range bounds must be numbers".to_string(),
            ));
        }
        if low > high {
            return Err(ExplorerError::InvalidParameter(format!(
                "range low bound {low} exceeds high bound {high}"
            )));
        }
        Ok(ValueRange { low, high })
    }

    /// A range that admits every value.
    pub fn unbounded() -> Self {
        ValueRange {
            low: f64::NEG_INFINITY,
            high: f64::INFINITY,
        }
    }

    pub fn low(&self) -> f64 {
        self.low
    }

    pub fn high(&self) -> f64 {
        self.high
    }

    pub fn contains(&self, value: f64) -> bool {
        self.low <= value && value <= self.high
    }
}

// ---------------------------------------------------------------------------
// FilterCriteria – one user selection
// ---------------------------------------------------------------------------

/// The sidebar selections applied to the dataset.
///
/// * `continent`: `None` or `Some("All")` means no continent constraint
/// * `countries`: empty means no country constraint
/// * `market_value_range`: inclusive bounds on market value
#[derive(Debug, Clone, PartialEq)]
pub struct FilterCriteria {
    pub continent: Option<String>,
    pub countries: BTreeSet<String>,
    pub market_value_range: ValueRange,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            continent: None,
            countries: BTreeSet::new(),
            market_value_range: ValueRange::unbounded(),
        }
    }
}

impl FilterCriteria {
    /// The continent constraint, if any (the "All" sentinel is no constraint).
    pub fn continent_constraint(&self) -> Option<&str> {
        self.continent
            .as_deref()
            .filter(|c| *c != ALL_CONTINENTS)
    }
}

// ---------------------------------------------------------------------------
// FilteredView – ordered row indices into the dataset
// ---------------------------------------------------------------------------

/// An ordered subset of dataset rows. Holds indices only; the records stay
/// in the dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilteredView {
    indices: Vec<usize>,
}

impl FilteredView {
    /// Every row, in dataset order.
    pub fn all(dataset: &CompanyDataset) -> Self {
        FilteredView {
            indices: (0..dataset.len()).collect(),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub(crate) fn from_indices(indices: Vec<usize>) -> Self {
        FilteredView { indices }
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Resolve the view against the dataset it was derived from.
    pub fn records<'a>(
        &'a self,
        dataset: &'a CompanyDataset,
    ) -> impl Iterator<Item = &'a CompanyRecord> + 'a {
        self.indices.iter().filter_map(move |&i| dataset.get(i))
    }

    /// Keep the rows satisfying `pred`, as a new view.
    pub fn retain_where(
        &self,
        dataset: &CompanyDataset,
        mut pred: impl FnMut(&CompanyRecord) -> bool,
    ) -> FilteredView {
        let indices = self
            .indices
            .iter()
            .copied()
            .filter(|&i| dataset.get(i).is_some_and(&mut pred))
            .collect();
        FilteredView { indices }
    }
}

// ---------------------------------------------------------------------------
// Filter steps
// ---------------------------------------------------------------------------

/// Exact, case-sensitive continent match. `None` or "All" is a no-op.
pub fn continent_step(
    dataset: &CompanyDataset,
    view: &FilteredView,
    continent: Option<&str>,
) -> FilteredView {
    match continent.filter(|c| *c != ALL_CONTINENTS) {
        Some(wanted) => view.retain_where(dataset, |rec| rec.continent == wanted),
        None => view.clone(),
    }
}

/// Country membership. An empty set is a no-op.
pub fn country_step(
    dataset: &CompanyDataset,
    view: &FilteredView,
    countries: &BTreeSet<String>,
) -> FilteredView {
    if countries.is_empty() {
        return view.clone();
    }
    view.retain_where(dataset, |rec| countries.contains(&rec.country))
}

/// Inclusive market value bounds.
pub fn market_value_step(
    dataset: &CompanyDataset,
    view: &FilteredView,
    range: ValueRange,
) -> FilteredView {
    view.retain_where(dataset, |rec| range.contains(rec.market_value))
}

/// Narrow `view` by every step of `criteria`.
pub fn refine(
    dataset: &CompanyDataset,
    view: &FilteredView,
    criteria: &FilterCriteria,
) -> FilteredView {
    let view = continent_step(dataset, view, criteria.continent.as_deref());
    let view = country_step(dataset, &view, &criteria.countries);
    market_value_step(dataset, &view, criteria.market_value_range)
}

/// The rows of `dataset` satisfying `criteria`, in dataset order.
pub fn apply_filters(dataset: &CompanyDataset, criteria: &FilterCriteria) -> FilteredView {
    refine(dataset, &FilteredView::all(dataset), criteria)
}

// ---------------------------------------------------------------------------
// Selector options
// ---------------------------------------------------------------------------

/// "All" followed by the dataset's continents, sorted.
pub fn available_continents(dataset: &CompanyDataset) -> Vec<String> {
    std::iter::once(ALL_CONTINENTS.to_string())
        .chain(dataset.continents.iter().cloned())
        .collect()
}

/// Sorted distinct countries within `continent` ("All" means every country).
pub fn available_countries(dataset: &CompanyDataset, continent: &str) -> Vec<String> {
    if continent == ALL_CONTINENTS {
        return dataset.countries.iter().cloned().collect();
    }
    dataset
        .records
        .iter()
        .filter(|rec| rec.continent == continent && !rec.country.is_empty())
        .map(|rec| rec.country.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
