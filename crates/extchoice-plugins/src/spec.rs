//! Provider specification types.
//!
//! A spec describes a provider kind without instantiating it:
//! - stable id (stored in job bindings)
//! - display name shown when a job picks its choice source
//! - free-form metadata for UIs
//!
//! Specs are data-only.

use std::collections::BTreeMap;

use anyhow::Result;
use serde::Serialize;

/// Stable provider identifier, e.g. "builtin.global".
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ProviderId(pub String);

impl ProviderId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ProviderSpec {
    pub id: ProviderId,

    /// Human-readable name for selection lists.
    pub display_name: String,

    pub description: String,

    /// Arbitrary metadata for UI.
    pub meta: BTreeMap<String, String>,
}

impl ProviderSpec {
    pub fn new(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: ProviderId::new(id),
            display_name: display_name.into(),
            description: String::new(),
            meta: BTreeMap::new(),
        }
    }

    pub fn description(mut self, text: impl Into<String>) -> Self {
        self.description = text.into();
        self
    }

    pub fn meta(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.meta.insert(key.into(), value.into());
        self
    }

    /// Validate spec for basic quality constraints.
    pub fn validate(&self) -> Result<()> {
        if self.id.as_str().trim().is_empty() {
            anyhow::bail!("provider id is empty");
        }
        if !self.id.as_str().is_ascii() {
            anyhow::bail!("provider id must be ASCII");
        }
        if self.display_name.trim().is_empty() {
            anyhow::bail!("provider display name is empty");
        }
        Ok(())
    }
}
