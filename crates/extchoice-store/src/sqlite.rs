//! SQLite backend (feature `sqlite`).
//!
//! The registry document is kept as JSON text in a single row of
//! `choice_registry`.

#![cfg(feature = "sqlite")]

use std::path::{Path, PathBuf};

use anyhow::Context;
use parking_lot::Mutex;
use rusqlite::{params, Connection, OptionalExtension};
use tracing::debug;

use extchoice_core::model::PersistedRegistry;
use extchoice_core::store::RegistryStore;
use extchoice_core::ChoiceResult;

use crate::backend_error;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS choice_registry (
    id         INTEGER PRIMARY KEY CHECK (id = 1),
    doc        TEXT    NOT NULL,
    updated_at INTEGER NOT NULL
);
";

pub struct SqliteStore {
    path: PathBuf,
    conn: Mutex<Connection>,
}

impl SqliteStore {
    pub fn open(path: impl Into<PathBuf>) -> ChoiceResult<Self> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))
                .map_err(backend_error)?;
        }
        let conn = Connection::open(&path)
            .with_context(|| format!("opening {}", path.display()))
            .map_err(backend_error)?;
        Self::init(conn, path)
    }

    /// In-memory database, mostly for tests.
    pub fn open_in_memory() -> ChoiceResult<Self> {
        let conn = Connection::open_in_memory().context("opening in-memory sqlite")
            .map_err(backend_error)?;
        Self::init(conn, PathBuf::from(":memory:"))
    }

    fn init(conn: Connection, path: PathBuf) -> ChoiceResult<Self> {
        conn.execute_batch(SCHEMA)
            .context("creating choice_registry table")
            .map_err(backend_error)?;
        Ok(Self {
            path,
            conn: Mutex::new(conn),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RegistryStore for SqliteStore {
    fn load(&self) -> ChoiceResult<Option<PersistedRegistry>> {
        let doc: Option<String> = self
            .conn
            .lock()
            .query_row("SELECT doc FROM choice_registry WHERE id = 1", [], |row| {
                row.get(0)
            })
            .optional()
            .context("reading choice_registry")
            .map_err(backend_error)?;

        match doc {
            Some(text) => Ok(Some(PersistedRegistry::from_json_slice(text.as_bytes())?)),
            None => Ok(None),
        }
    }

    fn save(&self, state: &PersistedRegistry) -> ChoiceResult<()> {
        let text = String::from_utf8(state.to_json_vec()?)
            .context("encoding registry document")
            .map_err(backend_error)?;
        let now = time::OffsetDateTime::now_utc().unix_timestamp();

        self.conn
            .lock()
            .execute(
                "INSERT INTO choice_registry (id, doc, updated_at) VALUES (1, ?1, ?2)
                 ON CONFLICT(id) DO UPDATE SET doc = excluded.doc, updated_at = excluded.updated_at",
                params![text, now],
            )
            .context("writing choice_registry")
            .map_err(backend_error)?;

        debug!(path = %self.path.display(), entries = state.entries.len(), "wrote registry row");
        Ok(())
    }

    fn describe(&self) -> String {
        format!("sqlite:{}", self.path.display())
    }
}
