//! Configuration structures for extchoice-core.
//!
//! Configuration is explicit and serializable. The core crate does not read
//! environment variables; hosts (the CLI, an embedding server) build a
//! `RegistryConfig` and hand it to the registry.

use serde::{Deserialize, Serialize};

use crate::errors::{ChoiceError, ChoiceResult};

/// Registry configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryConfig {
    #[serde(default)]
    pub name_policy: NamePolicy,
    #[serde(default)]
    pub duplicate_policy: DuplicatePolicy,
    /// Longest admitted entry name, in characters (after trimming).
    #[serde(default = "RegistryConfig::default_max_name_len")]
    pub max_name_len: usize,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            name_policy: NamePolicy::default(),
            duplicate_policy: DuplicatePolicy::default(),
            max_name_len: Self::default_max_name_len(),
        }
    }
}

impl RegistryConfig {
    fn default_max_name_len() -> usize {
        256
    }
}

/// Which entry names are admitted by `ChoiceSetEntry::is_valid`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NamePolicy {
    /// Any name that is non-blank after trimming.
    NonEmpty,
    /// Non-blank, and only ASCII alphanumerics or `_`.
    #[default]
    Identifier,
}

impl NamePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NonEmpty => "non-empty",
            Self::Identifier => "identifier",
        }
    }

    pub fn parse(s: &str) -> ChoiceResult<Self> {
        match s {
            "non-empty" => Ok(Self::NonEmpty),
            "identifier" => Ok(Self::Identifier),
            _ => Err(ChoiceError::invalid_argument(format!(
                "unknown name policy: {s}"
            ))),
        }
    }
}

/// What `replace_all` does with entries whose name repeats an earlier one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DuplicatePolicy {
    /// Keep every entry; lookups return the first one.
    #[default]
    Keep,
    /// Drop later entries that reuse an admitted name.
    DropLater,
}

impl DuplicatePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Keep => "keep",
            Self::DropLater => "drop-later",
        }
    }

    pub fn parse(s: &str) -> ChoiceResult<Self> {
        match s {
            "keep" => Ok(Self::Keep),
            "drop-later" => Ok(Self::DropLater),
            _ => Err(ChoiceError::invalid_argument(format!(
                "unknown duplicate policy: {s}"
            ))),
        }
    }
}

/// Validate a registry configuration.
pub fn validate_config(cfg: &RegistryConfig) -> ChoiceResult<()> {
    if cfg.max_name_len == 0 {
        return Err(ChoiceError::invalid_argument(
            "max_name_len must be greater than zero",
        ));
    }
    Ok(())
}
