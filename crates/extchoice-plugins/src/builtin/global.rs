//! Built-in `global` provider.
//!
//! Jobs store only a reference (the entry name). Choices are looked up in the
//! shared `ChoiceRegistry` every time they are requested, so edits made by an
//! administrator apply to every referencing job, and a reference to a removed
//! entry yields an empty list.

#![cfg(feature = "builtin")]

use std::sync::Arc;

use anyhow::Result;

use extchoice_core::model::ChoiceProviderReference;
use extchoice_core::registry::ChoiceRegistry;

use crate::provider::{ChoiceListProvider, ProviderContext, ProviderError, ProviderFactory};
use crate::registry::ProviderRegistry;
use crate::spec::ProviderSpec;

pub const ID: &str = "builtin.global";

pub fn spec() -> ProviderSpec {
    ProviderSpec::new(ID, "Global Choice Set")
        .description("Choices defined once in the global configuration and referenced by name")
        .meta("scope", "global")
}

/// Register the global provider.
pub fn register(registry: &mut ProviderRegistry) {
    registry
        .register(spec(), Box::new(GlobalFactory))
        .expect("failed to register builtin.global");
}

pub struct GlobalChoiceListProvider {
    reference: ChoiceProviderReference,
    registry: Arc<ChoiceRegistry>,
}

impl GlobalChoiceListProvider {
    pub fn new(reference: ChoiceProviderReference, registry: Arc<ChoiceRegistry>) -> Self {
        Self {
            reference,
            registry,
        }
    }

    pub fn name(&self) -> &str {
        self.reference.as_str()
    }

    pub fn reference(&self) -> &ChoiceProviderReference {
        &self.reference
    }
}

impl ChoiceListProvider for GlobalChoiceListProvider {
    fn kind(&self) -> &str {
        ID
    }

    fn choice_list(&self) -> Vec<String> {
        self.registry.get_choices(self.reference.as_str())
    }
}

struct GlobalFactory;

impl ProviderFactory for GlobalFactory {
    fn build(
        &self,
        config: &serde_json::Value,
        ctx: &ProviderContext,
    ) -> Result<Box<dyn ChoiceListProvider>> {
        let reference: ChoiceProviderReference = serde_json::from_value(config.clone())
            .map_err(|source| ProviderError::InvalidConfig {
                provider: ID.to_string(),
                source,
            })?;
        Ok(Box::new(GlobalChoiceListProvider::new(
            reference,
            Arc::clone(&ctx.global),
        )))
    }
}

/// Items for the entry-name selector of a job using this provider.
pub fn name_items(registry: &ChoiceRegistry) -> Vec<String> {
    registry.list_names()
}
