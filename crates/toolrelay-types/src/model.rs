//! Model selection.
//!
//! The agent is bound to a single model chosen by a version-pinned
//! identifier such as `openai/gpt-4o-2024-08-06`. The identifier is opaque
//! to toolrelay; it is split into provider and model name only so the
//! orchestration runtime can route it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::RelayError;

/// Default model the agent is bound to.
pub const DEFAULT_MODEL: &str = "openai/gpt-4o-2024-08-06";

/// A `provider/model` pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModelHandle {
    /// Provider prefix (e.g. `openai`).
    pub provider: String,
    /// Provider-specific model name, including any version pin.
    pub model: String,
}

impl ModelHandle {
    /// Build a handle from its parts.
    pub fn new(provider: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            model: model.into(),
        }
    }
}

impl FromStr for ModelHandle {
    type Err = RelayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (provider, model) = s
            .split_once('/')
            .ok_or_else(|| RelayError::InvalidModel(format!("expected provider/model, got '{s}'")))?;
        if provider.is_empty() || model.is_empty() {
            return Err(RelayError::InvalidModel(format!(
                "provider and model must be non-empty in '{s}'"
            )));
        }
        Ok(Self::new(provider, model))
    }
}

impl fmt::Display for ModelHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.provider, self.model)
    }
}

impl Default for ModelHandle {
    fn default() -> Self {
        // DEFAULT_MODEL is a valid provider/model pair.
        let (provider, model) = DEFAULT_MODEL.split_once('/').unwrap_or(("openai", DEFAULT_MODEL));
        Self::new(provider, model)
    }
}

impl Serialize for ModelHandle {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ModelHandle {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_provider_and_model() {
        let handle: ModelHandle = "openai/gpt-4o-2024-08-06".parse().unwrap();
        assert_eq!(handle.provider, "openai");
        assert_eq!(handle.model, "gpt-4o-2024-08-06");
        assert_eq!(handle.to_string(), "openai/gpt-4o-2024-08-06");
    }

    #[test]
    fn model_keeps_inner_slashes() {
        let handle: ModelHandle = "openrouter/meta-llama/llama-3.1-70b".parse().unwrap();
        assert_eq!(handle.provider, "openrouter");
        assert_eq!(handle.model, "meta-llama/llama-3.1-70b");
    }

    #[test]
    fn parse_rejects_missing_prefix() {
        assert!("gpt-4o".parse::<ModelHandle>().is_err());
        assert!("/gpt-4o".parse::<ModelHandle>().is_err());
        assert!("openai/".parse::<ModelHandle>().is_err());
    }

    #[test]
    fn default_matches_constant() {
        assert_eq!(ModelHandle::default().to_string(), DEFAULT_MODEL);
    }

    #[test]
    fn serde_as_string() {
        let handle: ModelHandle = serde_json::from_str("\"anthropic/claude-sonnet-4-5\"").unwrap();
        assert_eq!(handle.provider, "anthropic");
        let json = serde_json::to_string(&handle).unwrap();
        assert_eq!(json, "\"anthropic/claude-sonnet-4-5\"");
    }
}
