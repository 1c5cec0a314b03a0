use std::cmp::Ordering;

use super::filter::FilteredView;
use super::model::{CompanyDataset, NumericColumn};
use crate::error::{ExplorerError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Ascending,
    #[default]
    Descending,
}

/// The `n` most profitable rows of `view`.
pub fn top_n(dataset: &CompanyDataset, view: &FilteredView, n: i64) -> Result<FilteredView> {
    top_n_by(dataset, view, n, NumericColumn::Profits, SortOrder::Descending)
}

/// The first `min(n, view.len())` rows of `view` ordered by `key`.
///
/// The sort is stable: rows with equal keys keep their order in `view`.
/// Negative `n` is rejected; `n == 0` yields an empty view.
pub fn top_n_by(
    dataset: &CompanyDataset,
    view: &FilteredView,
    n: i64,
    key: NumericColumn,
    order: SortOrder,
) -> Result<FilteredView> {
    let n = usize::try_from(n).map_err(|_| {
        ExplorerError::InvalidParameter(format!("top-N count must be non-negative, got {n}"))
    })?;
    if n == 0 {
        return Ok(FilteredView::empty());
    }

    let mut keyed: Vec<(usize, f64)> = view
        .indices()
        .iter()
        .filter_map(|&i| dataset.get(i).map(|rec| (i, key.value(rec))))
        .collect();

    keyed.sort_by(|(_, a), (_, b)| match order {
        SortOrder::Ascending => compare(*a, *b),
        SortOrder::Descending => compare(*b, *a),
    });
    keyed.truncate(n);

    Ok(FilteredView::from_indices(
        keyed.into_iter().map(|(i, _)| i).collect(),
    ))
}

fn compare(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::{FilterCriteria, ValueRange, apply_filters};
    use crate::data::model::fixtures::{abc, mixed};

    fn names(ds: &CompanyDataset, view: &FilteredView) -> Vec<String> {
        view.records(ds).map(|r| r.company.clone()).collect()
    }

    #[test]
    fn sorted_descending_by_profit() {
        let ds = mixed();
        let top = top_n(&ds, &FilteredView::all(&ds), 4).unwrap();
        let profits: Vec<f64> = top.records(&ds).map(|r| r.profits).collect();
        assert_eq!(profits, [18.5, 12.0, 12.0, 12.0]);
        assert!(profits.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn ties_keep_dataset_order() {
        let ds = mixed();
        let top = top_n(&ds, &FilteredView::all(&ds), 4).unwrap();
        assert_eq!(names(&ds, &top), ["Toyota", "ACME Corp", "Bayer", "Nestle"]);
    }

    #[test]
    fn length_is_capped_by_the_view() {
        let ds = abc();
        let view = FilteredView::all(&ds);
        assert_eq!(top_n(&ds, &view, 10).unwrap().len(), 3);
        assert_eq!(top_n(&ds, &view, 2).unwrap().len(), 2);
        assert!(top_n(&ds, &FilteredView::empty(), 5).unwrap().is_empty());
    }

    #[test]
    fn zero_is_empty_and_negative_is_rejected() {
        let ds = abc();
        let view = FilteredView::all(&ds);
        assert!(top_n(&ds, &view, 0).unwrap().is_empty());
        assert!(matches!(
            top_n(&ds, &view, -1),
            Err(ExplorerError::InvalidParameter(_))
        ));
    }

    #[test]
    fn ascending_by_rank() {
        let ds = mixed();
        let view = FilteredView::from_indices(vec![6, 2, 0]);
        let top = top_n_by(&ds, &view, 2, NumericColumn::GlobalRank, SortOrder::Ascending).unwrap();
        assert_eq!(names(&ds, &top), ["ACME Corp", "Toyota"]);
    }

    #[test]
    fn negative_profits_sort_last() {
        let ds = mixed();
        let top = top_n(&ds, &FilteredView::all(&ds), 8).unwrap();
        assert_eq!(names(&ds, &top).last().map(String::as_str), Some("Vale"));
    }

    #[test]
    fn top_one_of_the_europe_subset() {
        let ds = abc();
        let criteria = FilterCriteria {
            continent: Some("Europe".to_string()),
            market_value_range: ValueRange::new(100.0, 500.0).unwrap(),
            ..FilterCriteria::default()
        };
        let view = apply_filters(&ds, &criteria);
        assert_eq!(names(&ds, &top_n(&ds, &view, 1).unwrap()), ["C"]);
    }
}
