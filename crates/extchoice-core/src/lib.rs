//! extchoice-core
//!
//! Core primitives for extchoice:
//! - choice-set entries and their validation
//! - the named choice registry with filtered full replacement
//! - the persisted registry document and the store seam it is saved through

pub mod config;
pub mod errors;
pub mod model;
pub mod registry;
pub mod store;
pub mod version;

pub use crate::errors::{ChoiceError, ChoiceResult};

/// Convenience re-exports.
pub mod prelude {
    pub use crate::config::{DuplicatePolicy, NamePolicy, RegistryConfig};
    pub use crate::model::{
        check_name, ChoiceProviderReference, ChoiceSetEntry, NameCheck, PersistedRegistry,
    };
    pub use crate::registry::{ChoiceRegistry, DropReason, DroppedEntry, Persistence, ReplaceReport};
    pub use crate::store::RegistryStore;
    pub use crate::{ChoiceError, ChoiceResult};
}
