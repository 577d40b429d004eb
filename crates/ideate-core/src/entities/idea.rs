use schemars::JsonSchema;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::CoreError;

const fn default_confidence() -> u8 {
    5
}

/// An idea as submitted through the form.
///
/// Every field defaults so that a partially filled body still parses and the
/// missing pieces surface through [`IdeaInput::validate`] as a 400 instead of
/// an extractor rejection.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct IdeaInput {
    #[serde(default)]
    pub domain: String,
    /// Free-text domain when `domain` is "Other".
    #[serde(default)]
    pub other_domain: Option<String>,
    #[serde(default)]
    pub motivation: String,
    #[serde(default)]
    pub idea: String,
    /// Accepts a number or a numeric string; forms post both.
    #[serde(
        default = "default_confidence",
        deserialize_with = "deserialize_confidence"
    )]
    pub confidence: u8,
    /// Optional goal date, passed through untouched.
    #[serde(default)]
    pub deadline: Option<String>,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub consent: bool,
}

impl IdeaInput {
    /// Check required fields before relaying.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] when the email is missing or the
    /// confidence is outside 1-10.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.email.trim().is_empty() {
            return Err(CoreError::Validation("Email required".into()));
        }
        if !(1..=10).contains(&self.confidence) {
            return Err(CoreError::Validation(format!(
                "confidence must be between 1 and 10, got {}",
                self.confidence
            )));
        }
        Ok(())
    }

    /// The domain to record: the free-text entry when "Other" was picked.
    #[must_use]
    pub fn effective_domain(&self) -> &str {
        match self.other_domain.as_deref().map(str::trim) {
            Some(other) if self.domain == "Other" && !other.is_empty() => other,
            _ => &self.domain,
        }
    }
}

fn deserialize_confidence<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Number(n) => n
            .as_u64()
            .and_then(|n| u8::try_from(n).ok())
            .ok_or_else(|| de::Error::custom(format!("confidence out of range: {n}"))),
        Value::String(s) => s
            .trim()
            .parse::<u8>()
            .map_err(|e| de::Error::custom(format!("confidence '{s}': {e}"))),
        Value::Null => Ok(default_confidence()),
        other => Err(de::Error::custom(format!(
            "confidence must be a number, got {other}"
        ))),
    }
}
