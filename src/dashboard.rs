use crate::data::aggregate::extremes;
use crate::data::filter::{FilterCriteria, FilteredView, apply_filters};
use crate::data::model::{CompanyDataset, NumericColumn};
use crate::data::rank::{SortOrder, top_n, top_n_by};
use crate::data::region::{RegionView, region_view};
use crate::error::Result;

// ---------------------------------------------------------------------------
// Dashboard – everything derived from one selection
// ---------------------------------------------------------------------------

/// All views shown for one `(criteria, N)` selection. Recomputed from the
/// dataset on every change; never updated in place.
#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    pub top_n: i64,
    /// Rows passing continent, country and market value filters.
    pub high_value: FilteredView,
    /// High-value rows by global rank, first N.
    pub table: FilteredView,
    /// High-value rows by profit, first N.
    pub top_profit: FilteredView,
    /// High-value rows by market value, first N. `None` when nothing passes.
    pub pie: Option<FilteredView>,
    pub region: RegionView,
    /// Global `(max, min)` market value.
    pub market_extremes: (f64, f64),
}

impl Dashboard {
    pub fn compute(dataset: &CompanyDataset, criteria: &FilterCriteria, n: i64) -> Result<Self> {
        let high_value = apply_filters(dataset, criteria);

        let table = top_n_by(
            dataset,
            &high_value,
            n,
            NumericColumn::GlobalRank,
            SortOrder::Ascending,
        )?;
        let top_profit = top_n(dataset, &high_value, n)?;
        let pie = if high_value.is_empty() {
            None
        } else {
            Some(top_n_by(
                dataset,
                &high_value,
                n,
                NumericColumn::MarketValue,
                SortOrder::Descending,
            )?)
        };

        let region = criteria
            .continent_constraint()
            .map(region_view)
            .unwrap_or(RegionView::WORLD);

        Ok(Dashboard {
            top_n: n,
            high_value,
            table,
            top_profit,
            pie,
            region,
            market_extremes: extremes(dataset, NumericColumn::MarketValue)?,
        })
    }
}
