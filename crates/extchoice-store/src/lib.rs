//! Persistence backends for the extchoice registry.
//!
//! Every backend implements `extchoice_core::store::RegistryStore` and stores
//! a single `PersistedRegistry` document.
//!
//! Backends:
//! - `fs`: one JSON file, replaced atomically on save
//! - `memory`: in-process, for tests and embedding
//! - `sqlite` (feature `sqlite`): one row in a SQLite table

use std::path::PathBuf;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use extchoice_core::store::RegistryStore;
use extchoice_core::{ChoiceError, ChoiceResult};

#[cfg(feature = "fs")]
pub mod fs;
pub mod memory;
#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(feature = "fs")]
pub use crate::fs::FsStore;
pub use crate::memory::MemoryStore;
#[cfg(feature = "sqlite")]
pub use crate::sqlite::SqliteStore;

/// Default file name for the JSON backend.
pub const DEFAULT_FILE_NAME: &str = "choice-registry.json";

/// Default file name for the SQLite backend.
pub const DEFAULT_SQLITE_FILE_NAME: &str = "choice-registry.sqlite3";

/// Store configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Directory holding the store's files.
    pub root: PathBuf,
    pub backend: StoreBackend,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum StoreBackend {
    Fs { file_name: String },
    Memory,
    Sqlite { file_name: String },
}

impl StoreBackend {
    pub fn parse(kind: &str) -> ChoiceResult<Self> {
        match kind {
            "fs" => Ok(Self::Fs {
                file_name: DEFAULT_FILE_NAME.to_string(),
            }),
            "memory" => Ok(Self::Memory),
            "sqlite" => Ok(Self::Sqlite {
                file_name: DEFAULT_SQLITE_FILE_NAME.to_string(),
            }),
            _ => Err(ChoiceError::invalid_argument(format!(
                "unknown store backend: {kind}"
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fs { .. } => "fs",
            Self::Memory => "memory",
            Self::Sqlite { .. } => "sqlite",
        }
    }
}

impl StoreConfig {
    /// JSON file store rooted at `root`.
    pub fn local_dev(root: PathBuf) -> ChoiceResult<Self> {
        let cfg = Self {
            root,
            backend: StoreBackend::parse("fs")?,
        };
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> ChoiceResult<()> {
        match &self.backend {
            StoreBackend::Fs { file_name } | StoreBackend::Sqlite { file_name } => {
                if file_name.trim().is_empty() {
                    return Err(ChoiceError::invalid_argument("store file name is empty"));
                }
                if file_name.contains(['/', '\\']) {
                    return Err(ChoiceError::invalid_argument(
                        "store file name must not contain path separators",
                    ));
                }
                if self.root.as_os_str().is_empty() {
                    return Err(ChoiceError::invalid_argument("store root is empty"));
                }
                Ok(())
            }
            StoreBackend::Memory => Ok(()),
        }
    }
}

/// Backend failures surface as `ChoiceError::Store`, context chain included.
pub(crate) fn backend_error(err: anyhow::Error) -> ChoiceError {
    ChoiceError::store(format!("{err:#}"))
}

/// Open the backend described by `cfg`.
pub fn open_store(cfg: &StoreConfig) -> ChoiceResult<Arc<dyn RegistryStore>> {
    cfg.validate()?;
    match &cfg.backend {
        #[cfg(feature = "fs")]
        StoreBackend::Fs { file_name } => Ok(Arc::new(FsStore::new(cfg.root.join(file_name)))),
        #[cfg(not(feature = "fs"))]
        StoreBackend::Fs { .. } => Err(ChoiceError::invalid_argument(
            "fs backend not enabled (build with feature `fs`)",
        )),
        StoreBackend::Memory => Ok(Arc::new(MemoryStore::new())),
        #[cfg(feature = "sqlite")]
        StoreBackend::Sqlite { file_name } => {
            Ok(Arc::new(SqliteStore::open(cfg.root.join(file_name))?))
        }
        #[cfg(not(feature = "sqlite"))]
        StoreBackend::Sqlite { .. } => Err(ChoiceError::invalid_argument(
            "sqlite backend not enabled (build with feature `sqlite`)",
        )),
    }
}
