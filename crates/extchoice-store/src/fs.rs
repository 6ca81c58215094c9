//! JSON file backend.
//!
//! Saves go to a uniquely named temp file in the target's directory, which is
//! then renamed over the target, so a crash mid-save leaves either the old
//! document or the new one. A temp file that was not renamed is removed.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use tempfile::NamedTempFile;
use tracing::debug;

use extchoice_core::model::PersistedRegistry;
use extchoice_core::store::RegistryStore;
use extchoice_core::ChoiceResult;

use crate::backend_error;

#[derive(Debug, Clone)]
pub struct FsStore {
    path: PathBuf,
}

impl FsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn dir(&self) -> &Path {
        match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        }
    }

    fn write_atomically(&self, bytes: &[u8]) -> anyhow::Result<()> {
        let dir = self.dir();
        fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;

        let mut tmp = NamedTempFile::new_in(dir)
            .with_context(|| format!("creating temp file in {}", dir.display()))?;
        tmp.write_all(bytes)
            .with_context(|| format!("writing {}", tmp.path().display()))?;
        tmp.as_file()
            .sync_all()
            .with_context(|| format!("syncing {}", tmp.path().display()))?;
        tmp.persist(&self.path)
            .map_err(|e| e.error)
            .with_context(|| format!("replacing {}", self.path.display()))?;
        Ok(())
    }
}

impl RegistryStore for FsStore {
    fn load(&self) -> ChoiceResult<Option<PersistedRegistry>> {
        let bytes = match fs::read(&self.path) {
            Ok(b) => b,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(backend_error(
                    anyhow::Error::new(e).context(format!("reading {}", self.path.display())),
                ))
            }
        };
        let doc = PersistedRegistry::from_json_slice(&bytes)?;
        debug!(path = %self.path.display(), entries = doc.entries.len(), "read registry file");
        Ok(Some(doc))
    }

    fn save(&self, state: &PersistedRegistry) -> ChoiceResult<()> {
        let bytes = state.to_json_vec()?;
        self.write_atomically(&bytes).map_err(backend_error)?;
        debug!(path = %self.path.display(), bytes = bytes.len(), "wrote registry file");
        Ok(())
    }

    fn describe(&self) -> String {
        format!("fs:{}", self.path.display())
    }
}
