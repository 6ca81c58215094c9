//! In-process backend.

use parking_lot::Mutex;

use extchoice_core::model::PersistedRegistry;
use extchoice_core::store::RegistryStore;
use extchoice_core::{ChoiceError, ChoiceResult};

#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<Option<PersistedRegistry>>,
    saves: Mutex<usize>,
    fail_saves: Mutex<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds `state`.
    pub fn with_state(state: PersistedRegistry) -> Self {
        let store = Self::new();
        *store.state.lock() = Some(state);
        store
    }

    /// Number of successful saves so far.
    pub fn save_count(&self) -> usize {
        *self.saves.lock()
    }

    /// Make subsequent saves fail with `message`; `None` restores normal saves.
    pub fn set_save_failure(&self, message: Option<&str>) {
        *self.fail_saves.lock() = message.map(str::to_string);
    }

    pub fn current(&self) -> Option<PersistedRegistry> {
        self.state.lock().clone()
    }
}

impl RegistryStore for MemoryStore {
    fn load(&self) -> ChoiceResult<Option<PersistedRegistry>> {
        Ok(self.current())
    }

    fn save(&self, state: &PersistedRegistry) -> ChoiceResult<()> {
        if let Some(msg) = self.fail_saves.lock().as_deref() {
            return Err(ChoiceError::store(msg));
        }
        *self.state.lock() = Some(state.clone());
        *self.saves.lock() += 1;
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}
