use std::path::PathBuf;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Error taxonomy shared by the data layer and the UI state
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ExplorerError {
    /// The source could not be read, is missing columns, or has bad rows.
    /// Fatal for the dataset being loaded.
    #[error("failed to load {}: {reason}", .path.display())]
    DataLoad { path: PathBuf, reason: String },

    /// A request carried an out-of-domain parameter (negative N, inverted
    /// range). The request is rejected and prior state kept.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("cannot compute extremes of '{column}' over an empty dataset")]
    EmptyDataset { column: &'static str },

    /// Name search failed. Recovered at the interaction boundary.
    #[error("search failed: {0}")]
    SearchFault(String),
}

pub type Result<T, E = ExplorerError> = std::result::Result<T, E>;

impl ExplorerError {
    pub fn data_load(path: impl Into<PathBuf>, err: &anyhow::Error) -> Self {
        ExplorerError::DataLoad {
            path: path.into(),
            reason: format!("{err:#}"),
        }
    }
}
