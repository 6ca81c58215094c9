//! Built-in `textarea` provider: choices stored inline in the job, one per line.

#![cfg(feature = "builtin")]

use anyhow::Result;
use serde::Deserialize;

use extchoice_core::model::split_choice_text;

use crate::provider::{ChoiceListProvider, ProviderContext, ProviderError, ProviderFactory};
use crate::registry::ProviderRegistry;
use crate::spec::ProviderSpec;

pub const ID: &str = "builtin.textarea";

pub fn spec() -> ProviderSpec {
    ProviderSpec::new(ID, "Textarea Choice List")
        .description("Choices entered directly in the job configuration, one per line")
        .meta("scope", "job")
}

/// Register the textarea provider.
pub fn register(registry: &mut ProviderRegistry) {
    registry
        .register(spec(), Box::new(TextareaFactory))
        .expect("failed to register builtin.textarea");
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextareaChoiceListProvider {
    choices: Vec<String>,
}

impl TextareaChoiceListProvider {
    pub fn from_text(text: &str) -> Self {
        Self {
            choices: split_choice_text(text),
        }
    }

    pub fn from_choices(choices: Vec<String>) -> Self {
        Self { choices }
    }

    pub fn choice_text(&self) -> String {
        self.choices.join("\n")
    }
}

impl ChoiceListProvider for TextareaChoiceListProvider {
    fn kind(&self) -> &str {
        ID
    }

    fn choice_list(&self) -> Vec<String> {
        self.choices.clone()
    }
}

/// Binding config: `choiceText` wins over `choices` when both are given.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TextareaConfig {
    #[serde(default)]
    choice_text: Option<String>,
    #[serde(default)]
    choices: Option<Vec<String>>,
}

struct TextareaFactory;

impl ProviderFactory for TextareaFactory {
    fn build(
        &self,
        config: &serde_json::Value,
        _ctx: &ProviderContext,
    ) -> Result<Box<dyn ChoiceListProvider>> {
        let cfg: TextareaConfig = if config.is_null() {
            TextareaConfig::default()
        } else {
            serde_json::from_value(config.clone()).map_err(|source| {
                ProviderError::InvalidConfig {
                    provider: ID.to_string(),
                    source,
                }
            })?
        };

        let provider = match (cfg.choice_text, cfg.choices) {
            (Some(text), _) => TextareaChoiceListProvider::from_text(&text),
            (None, Some(choices)) => TextareaChoiceListProvider::from_choices(choices),
            (None, None) => TextareaChoiceListProvider::from_choices(Vec::new()),
        };
        Ok(Box::new(provider))
    }
}
