use super::model::{CompanyDataset, NumericColumn};
use crate::error::{ExplorerError, Result};

/// `(max, min)` of `column` over the whole dataset.
///
/// Always computed on the full table, never on a filtered view, so the
/// figures stay fixed while the user changes the selection.
pub fn extremes(dataset: &CompanyDataset, column: NumericColumn) -> Result<(f64, f64)> {
    if dataset.is_empty() {
        return Err(ExplorerError::EmptyDataset {
            column: column.label(),
        });
    }

    Ok(dataset
        .records
        .iter()
        .map(|rec| column.value(rec))
        .fold((f64::NEG_INFINITY, f64::INFINITY), |(max, min), v| {
            (max.max(v), min.min(v))
        }))
}
