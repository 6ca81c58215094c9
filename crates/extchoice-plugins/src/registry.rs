//! Provider catalog.
//!
//! Stores the provider kinds a host supports and builds provider instances
//! from job bindings.
//!
//! Requirements:
//! - stable ordering for listing (ids are kept in a `BTreeMap`)
//! - clear errors for unknown providers and bad binding config
//! - no global mutable state

use std::collections::BTreeMap;

use tracing::debug;

use crate::provider::{
    ChoiceListProvider, ProviderBinding, ProviderContext, ProviderError, ProviderFactory,
};
use crate::spec::ProviderSpec;

/// A provider kind: its spec plus the factory that builds instances.
pub struct RegisteredProvider {
    pub spec: ProviderSpec,
    pub factory: Box<dyn ProviderFactory>,
}

#[derive(Default)]
pub struct ProviderRegistry {
    providers: BTreeMap<String, RegisteredProvider>,
}

impl ProviderRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            providers: BTreeMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Register a provider kind.
    pub fn register(
        &mut self,
        spec: ProviderSpec,
        factory: Box<dyn ProviderFactory>,
    ) -> anyhow::Result<()> {
        spec.validate()?;

        let id = spec.id.as_str().to_string();
        if self.providers.contains_key(&id) {
            anyhow::bail!("provider id already registered: {id}");
        }

        self.providers.insert(id, RegisteredProvider { spec, factory });
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&RegisteredProvider> {
        self.providers.get(id)
    }

    /// Display name for a provider kind.
    pub fn display_name(&self, id: &str) -> Option<&str> {
        self.get(id).map(|p| p.spec.display_name.as_str())
    }

    /// Provider ids in deterministic order.
    pub fn list_ids(&self) -> Vec<String> {
        self.providers.keys().cloned().collect()
    }

    /// Provider specs in deterministic id order.
    pub fn list(&self) -> Vec<ProviderSpec> {
        self.providers.values().map(|p| p.spec.clone()).collect()
    }

    /// Build the provider a job binding points at.
    pub fn build(
        &self,
        binding: &ProviderBinding,
        ctx: &ProviderContext,
    ) -> anyhow::Result<Box<dyn ChoiceListProvider>> {
        let reg = self
            .get(&binding.provider)
            .ok_or_else(|| ProviderError::UnknownProvider(binding.provider.clone()))?;
        debug!(provider = %binding.provider, "building choice list provider");
        reg.factory.build(&binding.config, ctx)
    }
}
