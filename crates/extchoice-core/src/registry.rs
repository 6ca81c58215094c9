//! The named choice registry.
//!
//! Holds the administrator-defined choice sets and answers lookups by name.
//!
//! Properties:
//! - entry order is preserved and significant (it drives listing order)
//! - lookups are exact, case-sensitive, first match wins
//! - the only mutation is a full replacement, which admits valid entries only
//! - a registry with no loaded state reads as empty
//!
//! Entries are kept behind an `Arc` that is swapped as a whole on replacement,
//! so readers always see either the old list or the new one.

use std::collections::BTreeSet;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use serde::Serialize;
use tracing::{debug, error, warn};

use crate::config::{validate_config, DuplicatePolicy, RegistryConfig};
use crate::errors::ChoiceResult;
use crate::model::{check_name, ChoiceSetEntry, NameCheck, PersistedRegistry};
use crate::store::RegistryStore;

pub struct ChoiceRegistry {
    config: RegistryConfig,
    store: Option<Arc<dyn RegistryStore>>,
    entries: RwLock<Arc<[ChoiceSetEntry]>>,
    update: Mutex<()>,
}

impl std::fmt::Debug for ChoiceRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChoiceRegistry")
            .field("config", &self.config)
            .field("store", &self.store.as_ref().map(|s| s.describe()))
            .field("entries", &self.entries.read().len())
            .finish()
    }
}

impl ChoiceRegistry {
    /// An empty registry with no backing store. Replacements are not persisted.
    pub fn detached(config: RegistryConfig) -> Self {
        Self {
            config,
            store: None,
            entries: RwLock::new(Arc::from(Vec::new())),
            update: Mutex::new(()),
        }
    }

    /// Restore a registry from `store`. Absent state starts empty.
    pub fn open(store: Arc<dyn RegistryStore>, config: RegistryConfig) -> ChoiceResult<Self> {
        validate_config(&config)?;
        let registry = Self {
            config,
            store: Some(store),
            entries: RwLock::new(Arc::from(Vec::new())),
            update: Mutex::new(()),
        };
        registry.reload()?;
        Ok(registry)
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    pub fn is_detached(&self) -> bool {
        self.store.is_none()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Current entries, as an immutable snapshot.
    pub fn snapshot(&self) -> Arc<[ChoiceSetEntry]> {
        Arc::clone(&self.entries.read())
    }

    /// Names of all entries, in registry order.
    pub fn list_names(&self) -> Vec<String> {
        self.snapshot().iter().map(|e| e.name.clone()).collect()
    }

    /// First entry named exactly `name`.
    ///
    /// Duplicate names are tolerated; the earliest entry wins.
    pub fn find_entry(&self, name: &str) -> Option<ChoiceSetEntry> {
        self.snapshot().iter().find(|e| e.name == name).cloned()
    }

    /// Choices of the entry named `name`, or an empty list.
    pub fn get_choices(&self, name: &str) -> Vec<String> {
        self.find_entry(name).map(|e| e.choices).unwrap_or_default()
    }

    /// Replace all entries with the valid subset of `candidates`, then persist.
    ///
    /// Invalid entries are dropped and listed in the report. A failed save is
    /// logged and reported; the new entries stay in memory.
    pub fn replace_all(&self, candidates: Vec<ChoiceSetEntry>) -> ReplaceReport {
        let _guard = self.update.lock();

        let admission = admit(candidates, &self.config);
        for d in &admission.dropped {
            warn!(index = d.index, name = %d.name, reason = %d.reason, "dropping choice set entry");
        }
        for name in &admission.duplicates {
            warn!(name = %name, "duplicate choice set name; lookups use the first entry");
        }

        let kept = admission.entries.len();
        let next: Arc<[ChoiceSetEntry]> = Arc::from(admission.entries);
        *self.entries.write() = Arc::clone(&next);

        let persistence = match &self.store {
            None => Persistence::Detached,
            Some(store) => {
                let doc = PersistedRegistry::new(next.to_vec());
                match store.save(&doc) {
                    Ok(()) => {
                        debug!(store = %store.describe(), entries = kept, "saved choice registry");
                        Persistence::Saved
                    }
                    Err(e) => {
                        error!(store = %store.describe(), error = %e, "failed to save choice registry");
                        Persistence::Failed {
                            message: e.to_string(),
                        }
                    }
                }
            }
        };

        ReplaceReport {
            kept,
            dropped: admission.dropped,
            duplicates: admission.duplicates,
            persistence,
        }
    }

    /// Re-read state from the store. On error the current entries are kept.
    ///
    /// A detached registry has nothing to reload and is left unchanged.
    pub fn reload(&self) -> ChoiceResult<()> {
        let Some(store) = &self.store else {
            return Ok(());
        };
        let _guard = self.update.lock();

        let entries = match store.load()? {
            Some(doc) => {
                doc.check_version()?;
                doc.entries
            }
            None => {
                debug!(store = %store.describe(), "no persisted choice registry; starting empty");
                Vec::new()
            }
        };
        debug!(store = %store.describe(), entries = entries.len(), "loaded choice registry");
        *self.entries.write() = Arc::from(entries);
        Ok(())
    }

    /// Persisted form of the current state.
    pub fn to_persisted(&self) -> PersistedRegistry {
        PersistedRegistry::new(self.snapshot().to_vec())
    }
}

/// What `replace_all` did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReplaceReport {
    pub kept: usize,
    pub dropped: Vec<DroppedEntry>,
    /// Names held more than once after admission.
    pub duplicates: Vec<String>,
    pub persistence: Persistence,
}

impl ReplaceReport {
    pub fn is_saved(&self) -> bool {
        matches!(self.persistence, Persistence::Saved)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DroppedEntry {
    /// Position in the submitted sequence.
    pub index: usize,
    pub name: String,
    pub reason: DropReason,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DropReason {
    InvalidName { message: String },
    Duplicate,
}

impl std::fmt::Display for DropReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidName { message } => write!(f, "invalid name: {message}"),
            Self::Duplicate => f.write_str("duplicate name"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Persistence {
    Saved,
    Detached,
    Failed { message: String },
}

/// Result of filtering a candidate sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Admission {
    pub entries: Vec<ChoiceSetEntry>,
    pub dropped: Vec<DroppedEntry>,
    pub duplicates: Vec<String>,
}

/// Filter `candidates` down to admissible entries, preserving relative order.
///
/// Admitted names are trimmed.
pub fn admit(candidates: Vec<ChoiceSetEntry>, config: &RegistryConfig) -> Admission {
    let mut out = Admission::default();
    let mut seen = BTreeSet::new();
    let mut repeated = BTreeSet::new();

    for (index, mut entry) in candidates.into_iter().enumerate() {
        let rejection = match check_name(&entry.name, config.name_policy) {
            NameCheck::Error(message) => Some(message),
            NameCheck::Ok if entry.name.trim().chars().count() > config.max_name_len => Some(
                format!("name is longer than {} characters", config.max_name_len),
            ),
            NameCheck::Ok => None,
        };
        if let Some(message) = rejection {
            out.dropped.push(DroppedEntry {
                index,
                name: entry.name,
                reason: DropReason::InvalidName { message },
            });
            continue;
        }

        // Stored names are the trimmed form the check approved.
        if entry.name.trim().len() != entry.name.len() {
            entry.name = entry.name.trim().to_string();
        }

        if !seen.insert(entry.name.clone()) {
            match config.duplicate_policy {
                DuplicatePolicy::DropLater => {
                    out.dropped.push(DroppedEntry {
                        index,
                        name: entry.name,
                        reason: DropReason::Duplicate,
                    });
                    continue;
                }
                DuplicatePolicy::Keep => {
                    if repeated.insert(entry.name.clone()) {
                        out.duplicates.push(entry.name.clone());
                    }
                }
            }
        }

        out.entries.push(entry);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NamePolicy;
    use crate::errors::ChoiceError;
    use assert_matches::assert_matches;
    use proptest::prelude::*;

    #[derive(Default)]
    struct TestStore {
        state: Mutex<Option<PersistedRegistry>>,
        saves: Mutex<usize>,
        fail_saves: bool,
    }

    impl RegistryStore for TestStore {
        fn load(&self) -> ChoiceResult<Option<PersistedRegistry>> {
            Ok(self.state.lock().clone())
        }

        fn save(&self, state: &PersistedRegistry) -> ChoiceResult<()> {
            if self.fail_saves {
                return Err(ChoiceError::store("read-only"));
            }
            *self.saves.lock() += 1;
            *self.state.lock() = Some(state.clone());
            Ok(())
        }

        fn describe(&self) -> String {
            "test".to_string()
        }
    }

    fn env_entry() -> ChoiceSetEntry {
        ChoiceSetEntry::new("env", ["dev", "staging", "prod"])
    }

    #[test]
    fn detached_registry_reads_as_empty() {
        let r = ChoiceRegistry::detached(RegistryConfig::default());
        assert!(r.list_names().is_empty());
        assert!(r.find_entry("env").is_none());
        assert!(r.get_choices("env").is_empty());
    }

    #[test]
    fn replace_all_drops_invalid_entries() {
        let r = ChoiceRegistry::detached(RegistryConfig::default());
        let report = r.replace_all(vec![env_entry(), ChoiceSetEntry::new("", ["x"])]);

        assert_eq!(report.kept, 1);
        assert_eq!(report.dropped.len(), 1);
        assert_eq!(report.dropped[0].index, 1);
        assert_matches!(report.dropped[0].reason, DropReason::InvalidName { .. });
        assert_eq!(report.persistence, Persistence::Detached);

        assert_eq!(r.snapshot().to_vec(), vec![env_entry()]);
        assert_eq!(r.get_choices("env"), vec!["dev", "staging", "prod"]);
        assert!(r.get_choices("missing").is_empty());
        assert!(r.get_choices("ENV").is_empty());
    }

    #[test]
    fn replace_all_with_nothing_empties_registry() {
        let r = ChoiceRegistry::detached(RegistryConfig::default());
        r.replace_all(vec![env_entry()]);
        r.replace_all(Vec::new());
        assert!(r.list_names().is_empty());
    }

    #[test]
    fn duplicate_names_first_wins() {
        let r = ChoiceRegistry::detached(RegistryConfig::default());
        let report = r.replace_all(vec![
            ChoiceSetEntry::new("env", ["a"]),
            ChoiceSetEntry::new("other", ["b"]),
            ChoiceSetEntry::new("env", ["c"]),
        ]);

        assert_eq!(report.kept, 3);
        assert_eq!(report.duplicates, vec!["env".to_string()]);
        assert_eq!(r.list_names(), vec!["env", "other", "env"]);
        assert_eq!(r.get_choices("env"), vec!["a"]);
    }

    #[test]
    fn drop_later_policy_removes_duplicates() {
        let cfg = RegistryConfig {
            duplicate_policy: DuplicatePolicy::DropLater,
            ..RegistryConfig::default()
        };
        let r = ChoiceRegistry::detached(cfg);
        let report = r.replace_all(vec![
            ChoiceSetEntry::new("env", ["a"]),
            ChoiceSetEntry::new("env", ["c"]),
        ]);

        assert_eq!(report.kept, 1);
        assert!(report.duplicates.is_empty());
        assert_eq!(report.dropped[0].reason, DropReason::Duplicate);
        assert_eq!(r.list_names(), vec!["env"]);
    }

    #[test]
    fn non_empty_policy_admits_any_visible_name() {
        let cfg = RegistryConfig {
            name_policy: NamePolicy::NonEmpty,
            ..RegistryConfig::default()
        };
        let r = ChoiceRegistry::detached(cfg);
        let report = r.replace_all(vec![ChoiceSetEntry::new("my env", ["a"])]);
        assert_eq!(report.kept, 1);
        assert_eq!(r.get_choices("my env"), vec!["a"]);
    }

    #[test]
    fn replace_all_persists_and_open_restores() {
        let store = Arc::new(TestStore::default());
        let r = ChoiceRegistry::open(store.clone(), RegistryConfig::default()).unwrap();
        assert!(r.is_empty());

        let report = r.replace_all(vec![
            env_entry(),
            ChoiceSetEntry::new("region", ["eu", "us"]),
        ]);
        assert!(report.is_saved());
        assert_eq!(*store.saves.lock(), 1);

        let restored = ChoiceRegistry::open(store, RegistryConfig::default()).unwrap();
        assert_eq!(restored.snapshot().to_vec(), r.snapshot().to_vec());
        assert_eq!(restored.list_names(), vec!["env", "region"]);
    }

    #[test]
    fn save_failure_is_reported_not_raised() {
        let store = Arc::new(TestStore {
            fail_saves: true,
            ..TestStore::default()
        });
        let r = ChoiceRegistry::open(store, RegistryConfig::default()).unwrap();
        let report = r.replace_all(vec![env_entry()]);

        assert_matches!(report.persistence, Persistence::Failed { ref message } if message.contains("read-only"));
        assert_eq!(r.get_choices("env"), vec!["dev", "staging", "prod"]);
    }

    #[test]
    fn reload_picks_up_external_changes() {
        let store = Arc::new(TestStore::default());
        let r = ChoiceRegistry::open(store.clone(), RegistryConfig::default()).unwrap();
        *store.state.lock() = Some(PersistedRegistry::new(vec![env_entry()]));

        assert!(r.is_empty());
        r.reload().unwrap();
        assert_eq!(r.list_names(), vec!["env"]);
    }

    #[test]
    fn reload_rejects_unknown_version_and_keeps_state() {
        let store = Arc::new(TestStore::default());
        let r = ChoiceRegistry::open(store.clone(), RegistryConfig::default()).unwrap();
        r.replace_all(vec![env_entry()]);

        *store.state.lock() = Some(PersistedRegistry {
            version: "v7".to_string(),
            entries: Vec::new(),
        });
        assert_matches!(r.reload(), Err(ChoiceError::InvalidArgument(_)));
        assert_eq!(r.list_names(), vec!["env"]);
    }

    #[test]
    fn snapshot_is_unaffected_by_later_replacement() {
        let r = ChoiceRegistry::detached(RegistryConfig::default());
        r.replace_all(vec![env_entry()]);
        let before = r.snapshot();
        r.replace_all(Vec::new());
        assert_eq!(before.len(), 1);
        assert!(r.is_empty());
    }

    #[test]
    fn padded_names_are_stored_trimmed() {
        let r = ChoiceRegistry::detached(RegistryConfig::default());
        let report = r.replace_all(vec![
            ChoiceSetEntry::new(" env ", ["dev"]),
            ChoiceSetEntry::new("\tregion", ["eu"]),
        ]);

        assert_eq!(report.kept, 2);
        assert_eq!(r.list_names(), vec!["env", "region"]);
        assert_eq!(r.get_choices("env"), vec!["dev"]);
        assert_eq!(r.get_choices("region"), vec!["eu"]);
        assert!(r.get_choices(" env ").is_empty());
    }

    #[test]
    fn padded_duplicates_are_detected_after_trimming() {
        let r = ChoiceRegistry::detached(RegistryConfig::default());
        let report = r.replace_all(vec![
            ChoiceSetEntry::new("env", ["a"]),
            ChoiceSetEntry::new(" env", ["b"]),
        ]);
        assert_eq!(report.duplicates, vec!["env".to_string()]);
        assert_eq!(r.get_choices("env"), vec!["a"]);
    }

    #[test]
    fn overlong_names_are_dropped() {
        let cfg = RegistryConfig {
            max_name_len: 3,
            ..RegistryConfig::default()
        };
        let r = ChoiceRegistry::detached(cfg);
        let report = r.replace_all(vec![
            ChoiceSetEntry::new("env", ["a"]),
            ChoiceSetEntry::new("region", ["b"]),
        ]);

        assert_eq!(r.list_names(), vec!["env"]);
        assert_matches!(
            &report.dropped[0].reason,
            DropReason::InvalidName { message } if message.contains("longer than 3")
        );
    }

    #[test]
    fn open_rejects_invalid_config() {
        let cfg = RegistryConfig {
            max_name_len: 0,
            ..RegistryConfig::default()
        };
        let e = ChoiceRegistry::open(Arc::new(TestStore::default()), cfg).unwrap_err();
        assert_matches!(e, ChoiceError::InvalidArgument(_));
    }

    #[test]
    fn to_persisted_matches_saved_state() {
        let store = Arc::new(TestStore::default());
        let r = ChoiceRegistry::open(store.clone(), RegistryConfig::default()).unwrap();
        r.replace_all(vec![env_entry(), ChoiceSetEntry::new("", ["x"])]);

        let doc = r.to_persisted();
        assert_eq!(doc.version, "v1");
        assert_eq!(doc.entries, vec![env_entry()]);
        assert_eq!(store.state.lock().clone(), Some(doc));
    }

    fn arb_entry() -> impl Strategy<Value = ChoiceSetEntry> {
        (
            "[a-c_ -]{0,3}",
            proptest::collection::vec("[a-z]{0,3}", 0..4),
        )
            .prop_map(|(name, choices)| ChoiceSetEntry { name, choices })
    }

    proptest! {
        #[test]
        fn replace_all_keeps_exactly_the_valid_subset(
            candidates in proptest::collection::vec(arb_entry(), 0..8)
        ) {
            let expected: Vec<ChoiceSetEntry> = candidates
                .iter()
                .filter(|e| e.is_valid())
                .map(|e| ChoiceSetEntry::new(e.name.trim(), e.choices.clone()))
                .collect();

            let r = ChoiceRegistry::detached(RegistryConfig::default());
            let report = r.replace_all(candidates.clone());
            prop_assert_eq!(report.kept + report.dropped.len(), candidates.len());
            prop_assert_eq!(r.snapshot().to_vec(), expected.clone());

            r.replace_all(expected.clone());
            prop_assert_eq!(r.snapshot().to_vec(), expected);
        }
    }
}
