//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and passed into services
//! explicitly. Nothing in this crate reads environment variables during request
//! handling; binaries collect env values at the edge and hand them in here.

use crate::{CardError, CardResult, CardStore, JsonStore, SqliteStore};
use std::path::PathBuf;
use std::sync::Arc;

/// Default data directory when none is configured.
pub const DEFAULT_DATA_DIR: &str = "inspo-data";

/// Database file name inside the data directory.
pub const DB_FILE: &str = "inspo.db3";

/// Which storage adapter backs the notebook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackend {
    /// The backed variant: a relational table with per-row ownership.
    Sqlite(PathBuf),
    /// The local-only variant: one JSON file holding the whole list.
    LocalJson(PathBuf),
}

/// Core configuration resolved at startup.
#[derive(Debug, Clone)]
pub struct CoreConfig {
    backend: StorageBackend,
}

impl CoreConfig {
    pub fn new(backend: StorageBackend) -> Self {
        Self { backend }
    }

    /// Resolves the backend from pre-read environment values.
    ///
    /// `data_dir` is `INSPO_DATA_DIR` (default [`DEFAULT_DATA_DIR`]); `local` selects
    /// the JSON variant instead of the relational one. Taking `Option<String>` rather
    /// than reading the environment keeps resolution testable and single-shot.
    pub fn resolve(data_dir: Option<String>, local: bool) -> Self {
        let dir = data_dir
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));

        let backend = if local {
            StorageBackend::LocalJson(dir.join(crate::local::LOCAL_STORE_FILE))
        } else {
            StorageBackend::Sqlite(dir.join(DB_FILE))
        };
        Self { backend }
    }

    pub fn backend(&self) -> &StorageBackend {
        &self.backend
    }

    /// Opens the configured storage adapter, creating the data directory if needed.
    pub fn open_store(&self) -> CardResult<Arc<dyn CardStore>> {
        let path = match &self.backend {
            StorageBackend::Sqlite(path) => path,
            StorageBackend::LocalJson(path) => path,
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(CardError::FileWrite)?;
        }

        match &self.backend {
            StorageBackend::Sqlite(path) => Ok(Arc::new(SqliteStore::open(path)?)),
            StorageBackend::LocalJson(path) => Ok(Arc::new(JsonStore::open(path))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_defaults_to_sqlite_under_the_default_dir() {
        let cfg = CoreConfig::resolve(None, false);
        assert_eq!(
            cfg.backend(),
            &StorageBackend::Sqlite(PathBuf::from(DEFAULT_DATA_DIR).join(DB_FILE))
        );
    }

    #[test]
    fn resolve_ignores_blank_data_dir_values() {
        let cfg = CoreConfig::resolve(Some("   ".into()), true);
        assert_eq!(
            cfg.backend(),
            &StorageBackend::LocalJson(
                PathBuf::from(DEFAULT_DATA_DIR).join(crate::local::LOCAL_STORE_FILE)
            )
        );
    }

    #[test]
    fn open_store_creates_the_data_directory() {
        let dir = tempfile::tempdir().unwrap();
        let data_dir = dir.path().join("nested").join("data");
        let cfg = CoreConfig::resolve(Some(data_dir.to_string_lossy().into_owned()), false);
        let _store = cfg.open_store().unwrap();
        assert!(data_dir.is_dir());
    }
}
