//! Parsing of configuration submissions.
//!
//! A submission is either a bare array of entries or `{ "entries": [...] }`.
//! Each entry has a `name` and either `choices` (array) or `choiceText`
//! (textarea string, one choice per line). Entries are not validated here;
//! that is the registry's job.

use anyhow::{anyhow, Result};
use serde::Deserialize;

use extchoice_core::model::{split_choice_text, ChoiceSetEntry};

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Submission {
    Bare(Vec<SubmittedEntry>),
    Wrapped { entries: Vec<SubmittedEntry> },
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SubmittedEntry {
    #[serde(default)]
    name: String,
    #[serde(default)]
    choices: Option<Vec<String>>,
    #[serde(default)]
    choice_text: Option<String>,
}

impl From<SubmittedEntry> for ChoiceSetEntry {
    fn from(e: SubmittedEntry) -> Self {
        let choices = match (e.choice_text, e.choices) {
            (Some(text), _) => split_choice_text(&text),
            (None, Some(choices)) => choices,
            (None, None) => Vec::new(),
        };
        ChoiceSetEntry {
            name: e.name.trim().to_string(),
            choices,
        }
    }
}

pub fn parse_submission(value: serde_json::Value) -> Result<Vec<ChoiceSetEntry>> {
    let sub: Submission = serde_json::from_value(value).map_err(|e| {
        anyhow!("submission must be an array of entries or {{\"entries\": [...]}}: {e}")
    })?;
    let entries = match sub {
        Submission::Bare(v) | Submission::Wrapped { entries: v } => v,
    };
    Ok(entries.into_iter().map(ChoiceSetEntry::from).collect())
}
