//! The persistence seam for the registry.
//!
//! Concrete backends live in `extchoice-store`. The registry treats every call
//! as opaque and synchronous.

use crate::errors::ChoiceResult;
use crate::model::PersistedRegistry;

pub trait RegistryStore: Send + Sync {
    /// Load persisted state. `Ok(None)` means nothing has been saved yet.
    fn load(&self) -> ChoiceResult<Option<PersistedRegistry>>;

    /// Replace persisted state.
    fn save(&self, state: &PersistedRegistry) -> ChoiceResult<()>;

    /// Short human-readable location, for logs.
    fn describe(&self) -> String;
}
