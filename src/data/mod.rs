//! Data layer: core types, loading, filtering, ranking and lookups.
//!
//! Architecture:
//! ```text
//!  .csv / .json / .parquet
//!        │
//!        ▼
//!   ┌──────────────┐
//!   │ cache/loader │  parse file → Arc<CompanyDataset> (memoized)
//!   └──────────────┘
//!        │
//!        ▼
//!   ┌────────────────┐
//!   │ CompanyDataset │  Vec<CompanyRecord>, continent/country options
//!   └────────────────┘
//!        │
//!        ├──────────────┬──────────────┬──────────────┐
//!        ▼              ▼              ▼              ▼
//!   ┌──────────┐   ┌──────────┐   ┌───────────┐   ┌──────────┐
//!   │  filter  │   │  search  │   │ aggregate │   │  region  │
//!   └──────────┘   └──────────┘   └───────────┘   └──────────┘
//!        │  FilteredView
//!        ▼
//!   ┌──────────┐
//!   │   rank   │  top N by a numeric column
//!   └──────────┘
//! ```

pub mod aggregate;
pub mod cache;
pub mod filter;
pub mod loader;
pub mod model;
pub mod rank;
pub mod region;
pub mod search;
