use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use super::error::DataSourceError;
use super::loader;
use super::model::Table;

/// What a file looked like on disk when it was loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileSignature {
    pub len: u64,
    pub modified: Option<SystemTime>,
}

impl FileSignature {
    pub fn of(path: &Path) -> Result<Self, DataSourceError> {
        let meta = std::fs::metadata(path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                DataSourceError::NotFound {
                    path: path.to_path_buf(),
                }
            } else {
                DataSourceError::Io {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;
        Ok(FileSignature {
            len: meta.len(),
            modified: meta.modified().ok(),
        })
    }
}

struct CachedTable {
    signature: FileSignature,
    table: Arc<Table>,
}

/// Memoizes [`loader::load`] per path for as long as the file is unchanged.
///
/// The dashboard asks for the table on every interaction; only a changed
/// file signature (size or modification time) triggers a fresh load.
/// Failed loads are never stored.
#[derive(Default)]
pub struct DatasetCache {
    entries: HashMap<PathBuf, CachedTable>,
}

impl DatasetCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the table for `path`, loading it only if it is new or has changed.
    pub fn get_or_load(&mut self, path: &Path) -> Result<Arc<Table>, DataSourceError> {
        let key = cache_key(path);
        let signature = match FileSignature::of(path) {
            Ok(sig) => sig,
            Err(e) => {
                self.entries.remove(&key);
                return Err(e);
            }
        };

        if let Some(cached) = self.entries.get(&key) {
            if cached.signature == signature {
                log::debug!("Dataset cache hit for {}", path.display());
                return Ok(Arc::clone(&cached.table));
            }
            log::debug!("{} changed on disk, reloading", path.display());
        } else {
            log::debug!("Dataset cache miss for {}", path.display());
        }

        let table = Arc::new(loader::load(path)?);
        self.entries.insert(
            key,
            CachedTable {
                signature,
                table: Arc::clone(&table),
            },
        );
        Ok(table)
    }

    /// Drop the entry for `path`; the next request reloads it.
    pub fn invalidate(&mut self, path: &Path) -> bool {
        self.entries.remove(&cache_key(path)).is_some()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn cache_key(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    const CSV: &str = "taxpayer_name,taxpayer_id,sector,region,annual_revenue_usd,late_filings_last_12m,fiscal_device_uptime_pct,vat_to_sales_ratio,outstanding_debt_zig,previous_audit_violations,prediction_score\n\
                       Acme,T1,Retail,Harare,1000,2,95.0,0.10,0,1,80\n";

    fn write(path: &Path, contents: &str) {
        let mut f = std::fs::File::create(path).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
    }

    #[test]
    fn unchanged_file_is_served_from_cache() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.csv");
        write(&path, CSV);

        let mut cache = DatasetCache::new();
        let first = cache.get_or_load(&path).unwrap();
        let second = cache.get_or_load(&path).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn changed_file_is_reloaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.csv");
        write(&path, CSV);

        let mut cache = DatasetCache::new();
        let first = cache.get_or_load(&path).unwrap();
        write(&path, &format!("{CSV}Beta,T2,Mining,Bulawayo,500,0,99.5,0.20,150.5,0,40\n"));
        let second = cache.get_or_load(&path).unwrap();

        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(second.len(), 2);
    }

    #[test]
    fn invalidate_forces_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.csv");
        write(&path, CSV);

        let mut cache = DatasetCache::new();
        let first = cache.get_or_load(&path).unwrap();
        assert!(cache.invalidate(&path));
        assert!(!cache.invalidate(&path));
        let second = cache.get_or_load(&path).unwrap();
        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(*first, *second);
    }

    #[test]
    fn failures_are_not_cached() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.csv");
        write(&path, "taxpayer_name\nAcme\n");

        let mut cache = DatasetCache::new();
        assert!(cache.get_or_load(&path).is_err());
        assert!(cache.is_empty());

        std::fs::remove_file(&path).unwrap();
        assert!(matches!(
            cache.get_or_load(&path),
            Err(DataSourceError::NotFound { .. })
        ));
    }
}
