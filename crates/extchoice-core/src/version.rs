//! Version helpers for the persisted registry format.

use crate::errors::{ChoiceError, ChoiceResult};

/// Known persisted-state versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateVersion {
    V1,
}

impl StateVersion {
    pub const CURRENT: Self = Self::V1;

    /// Parse a state version string (e.g. "v1").
    pub fn parse(s: &str) -> ChoiceResult<Self> {
        match s {
            "v1" => Ok(Self::V1),
            _ => Err(ChoiceError::invalid_argument(format!(
                "unsupported state version: {s}"
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::V1 => "v1",
        }
    }
}
