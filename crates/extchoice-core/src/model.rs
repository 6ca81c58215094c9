//! Data model: choice-set entries, job-side references, and the persisted
//! registry document.
//!
//! Entries are plain data. An entry may be invalid (for example while a form
//! is being submitted); validity is checked when entries are admitted into a
//! registry, not when they are constructed.

use serde::{Deserialize, Serialize};

use crate::config::NamePolicy;
use crate::errors::ChoiceResult;
use crate::version::StateVersion;

/// An administrator-defined named list of choices.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceSetEntry {
    pub name: String,
    #[serde(default)]
    pub choices: Vec<String>,
}

impl ChoiceSetEntry {
    pub fn new<I, S>(name: impl Into<String>, choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            choices: choices.into_iter().map(Into::into).collect(),
        }
    }

    /// Build an entry from textarea input: one choice per line.
    ///
    /// The name is trimmed. Lines are split on `\n` or `\r\n`; trailing empty
    /// lines are dropped, inner empty lines are kept.
    pub fn from_text(name: &str, text: &str) -> Self {
        Self {
            name: name.trim().to_string(),
            choices: split_choice_text(text),
        }
    }

    /// Choices joined back into textarea form.
    pub fn choice_text(&self) -> String {
        self.choices.join("\n")
    }

    /// Whether this entry may be admitted under the default name policy.
    pub fn is_valid(&self) -> bool {
        self.is_valid_with(NamePolicy::default())
    }

    pub fn is_valid_with(&self, policy: NamePolicy) -> bool {
        check_name(&self.name, policy).is_ok()
    }
}

/// Outcome of validating an entry name, as shown next to a form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "message", rename_all = "lowercase")]
pub enum NameCheck {
    Ok,
    Error(String),
}

impl NameCheck {
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok)
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Ok => None,
            Self::Error(m) => Some(m),
        }
    }
}

/// Validate an entry name under `policy`.
pub fn check_name(name: &str, policy: NamePolicy) -> NameCheck {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return NameCheck::Error("name is required".to_string());
    }
    match policy {
        NamePolicy::NonEmpty => NameCheck::Ok,
        NamePolicy::Identifier => {
            if trimmed
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_')
            {
                NameCheck::Ok
            } else {
                NameCheck::Error(
                    "only alphanumerics and underscores are allowed in a name".to_string(),
                )
            }
        }
    }
}

/// Split textarea input into choices.
pub fn split_choice_text(text: &str) -> Vec<String> {
    let mut lines: Vec<String> = text
        .split('\n')
        .map(|l| l.strip_suffix('\r').unwrap_or(l).to_string())
        .collect();
    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    lines
}

/// A job's pointer into the registry, by entry name.
///
/// Resolution happens when choices are requested, so a reference to a renamed
/// or removed entry is not an error; it simply yields no choices.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChoiceProviderReference {
    pub name: String,
}

impl ChoiceProviderReference {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.name
    }
}

/// The persisted form of a registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedRegistry {
    pub version: String,
    #[serde(default)]
    pub entries: Vec<ChoiceSetEntry>,
}

impl PersistedRegistry {
    pub fn new(entries: Vec<ChoiceSetEntry>) -> Self {
        Self {
            version: StateVersion::CURRENT.as_str().to_string(),
            entries,
        }
    }

    /// Reject documents written by an unknown format version.
    pub fn check_version(&self) -> ChoiceResult<StateVersion> {
        StateVersion::parse(&self.version)
    }

    pub fn from_json_slice(bytes: &[u8]) -> ChoiceResult<Self> {
        let doc: Self = serde_json::from_slice(bytes)?;
        doc.check_version()?;
        Ok(doc)
    }

    pub fn to_json_vec(&self) -> ChoiceResult<Vec<u8>> {
        Ok(serde_json::to_vec_pretty(self)?)
    }
}
