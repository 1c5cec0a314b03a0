use regex::RegexBuilder;

use super::filter::FilteredView;
use super::model::CompanyDataset;
use crate::error::{ExplorerError, Result};

/// How the query text is matched against company names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchMode {
    /// Case-insensitive substring.
    #[default]
    Substring,
    /// Case-insensitive regular expression.
    Pattern,
}

/// Companies whose name matches `query`, in dataset order.
///
/// An empty query matches nothing. In [`SearchMode::Pattern`] an invalid
/// expression is reported as [`ExplorerError::SearchFault`].
pub fn search_by_name(
    dataset: &CompanyDataset,
    query: &str,
    mode: SearchMode,
) -> Result<FilteredView> {
    if query.is_empty() {
        return Ok(FilteredView::empty());
    }

    let pattern = match mode {
        SearchMode::Substring => regex::escape(query),
        SearchMode::Pattern => query.to_string(),
    };
    let matcher = RegexBuilder::new(&pattern)
        .case_insensitive(true)
        .build()
        .map_err(|e| ExplorerError::SearchFault(e.to_string()))?;

    Ok(FilteredView::all(dataset).retain_where(dataset, |rec| matcher.is_match(&rec.company)))
}

// ---------------------------------------------------------------------------
// Interaction boundary
// ---------------------------------------------------------------------------

/// Result of the last search as shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SearchOutcome {
    /// No search has been run (or the query was cleared).
    #[default]
    Idle,
    Success(FilteredView),
    Failure(String),
}

impl SearchOutcome {
    /// Absorb a search result; faults become a message, never an error.
    pub fn from_result(result: Result<FilteredView>) -> Self {
        match result {
            Ok(view) => SearchOutcome::Success(view),
            Err(e) => {
                log::warn!("Company search failed: {e}");
                SearchOutcome::Failure(e.to_string())
            }
        }
    }
}
