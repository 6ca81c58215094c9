//! The provider interface jobs use to obtain their choices.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use extchoice_core::registry::ChoiceRegistry;

/// Source of the selectable values for one job parameter.
pub trait ChoiceListProvider: Send + Sync {
    /// Provider id this instance was built from.
    fn kind(&self) -> &str;

    /// Current choices. May be empty; never fails.
    fn choice_list(&self) -> Vec<String>;
}

/// Shared state available to provider factories.
#[derive(Debug, Clone)]
pub struct ProviderContext {
    pub global: Arc<ChoiceRegistry>,
}

impl ProviderContext {
    pub fn new(global: Arc<ChoiceRegistry>) -> Self {
        Self { global }
    }
}

/// A job's stored provider selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderBinding {
    /// Provider id, e.g. "builtin.global".
    pub provider: String,

    /// Provider-specific settings.
    #[serde(default)]
    pub config: serde_json::Value,
}

impl ProviderBinding {
    pub fn new(provider: impl Into<String>, config: serde_json::Value) -> Self {
        Self {
            provider: provider.into(),
            config,
        }
    }
}

/// Builds providers of one kind from binding config.
pub trait ProviderFactory: Send + Sync {
    fn build(
        &self,
        config: &serde_json::Value,
        ctx: &ProviderContext,
    ) -> anyhow::Result<Box<dyn ChoiceListProvider>>;
}

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("unknown provider: {0}")]
    UnknownProvider(String),

    #[error("invalid config for provider {provider}: {source}")]
    InvalidConfig {
        provider: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ProviderError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnknownProvider(_) => "unknown_provider",
            Self::InvalidConfig { .. } => "invalid_config",
        }
    }
}
