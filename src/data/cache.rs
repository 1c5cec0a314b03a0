use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::SystemTime;

use super::loader::load_file;
use super::model::CompanyDataset;
use crate::error::{ExplorerError, Result};

// ---------------------------------------------------------------------------
// Source identity
// ---------------------------------------------------------------------------

/// Identifies one version of a source file. A changed size or modification
/// time counts as a different source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceKey {
    pub path: PathBuf,
    pub len: u64,
    pub modified: Option<SystemTime>,
}

impl SourceKey {
    pub fn probe(path: &Path) -> Result<Self> {
        let io_err = |e: std::io::Error| ExplorerError::DataLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        };
        let canonical = path.canonicalize().map_err(io_err)?;
        let meta = std::fs::metadata(&canonical).map_err(io_err)?;
        Ok(SourceKey {
            path: canonical,
            len: meta.len(),
            modified: meta.modified().ok(),
        })
    }
}

// ---------------------------------------------------------------------------
// DatasetCache – memoized loader
// ---------------------------------------------------------------------------

/// Holds the most recently loaded dataset and hands out shared references
/// to it while its source is unchanged.
#[derive(Debug, Default)]
pub struct DatasetCache {
    slot: Mutex<Option<(SourceKey, Arc<CompanyDataset>)>>,
}

impl DatasetCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached dataset for `path`, reading the file only when the
    /// source identity differs from the cached one.
    pub fn load(&self, path: &Path) -> Result<Arc<CompanyDataset>> {
        let key = SourceKey::probe(path)?;

        let mut slot = self
            .slot
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        if let Some((cached_key, dataset)) = slot.as_ref() {
            if *cached_key == key {
                log::debug!("Dataset cache hit for {}", key.path.display());
                return Ok(Arc::clone(dataset));
            }
        }

        log::debug!("Dataset cache miss for {}", key.path.display());
        let dataset = Arc::new(load_file(path)?);
        *slot = Some((key, Arc::clone(&dataset)));
        Ok(dataset)
    }

    /// Forget the cached dataset.
    pub fn clear(&self) {
        let mut slot = self
            .slot
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *slot = None;
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::TempDir;

    use super::*;

    const CSV: &str = "Global Rank,Company,Country,Continent,Sales ($billion),Profits ($billion),\
                       Market Value ($billion),Latitude_final,Longitude_final\n\
                       1,ICBC,China,Asia,190.5,45.8,249.5,39.9,116.4\n";

    fn write(path: &Path, contents: &str) {
        let mut f = std::fs::File::create(path).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
    }

    #[test]
    fn unchanged_source_returns_the_same_dataset() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("top.csv");
        write(&path, CSV);

        let cache = DatasetCache::new();
        let first = cache.load(&path).unwrap();
        let second = cache.load(&path).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn changed_source_is_reloaded() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("top.csv");
        write(&path, CSV);

        let cache = DatasetCache::new();
        let first = cache.load(&path).unwrap();

        write(
            &path,
            &format!("{CSV}2,Toyota,Japan,Asia,281.2,22.7,217.3,35.1,137.2\n"),
        );
        let second = cache.load(&path).unwrap();
        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(second.len(), 2);
    }

    #[test]
    fn other_path_is_a_different_source() {
        let dir = TempDir::new().unwrap();
        let a = dir.path().join("a.csv");
        let b = dir.path().join("b.csv");
        write(&a, CSV);
        write(&b, CSV);

        let cache = DatasetCache::new();
        let first = cache.load(&a).unwrap();
        let second = cache.load(&b).unwrap();
        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(second.source, b);
    }

    #[test]
    fn clear_forces_a_reload() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("top.csv");
        write(&path, CSV);

        let cache = DatasetCache::new();
        let first = cache.load(&path).unwrap();
        cache.clear();
        let second = cache.load(&path).unwrap();
        assert!(!Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn missing_source_is_a_load_error() {
        let dir = TempDir::new().unwrap();
        let cache = DatasetCache::new();
        assert!(matches!(
            cache.load(&dir.path().join("absent.csv")),
            Err(ExplorerError::DataLoad { .. })
        ));
    }
}
