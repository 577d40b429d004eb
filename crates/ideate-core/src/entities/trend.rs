use schemars::JsonSchema;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One market trend produced by the research phase.
///
/// Older pipeline runs emitted bare strings; newer ones emit a structured
/// object. Both shapes are resolved here, once, when the record is read.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(untagged)]
pub enum Trend {
    Plain(String),
    Detailed {
        trend: String,
        #[serde(default)]
        description: String,
        #[serde(default)]
        relevance: String,
        #[serde(default)]
        url: Option<String>,
    },
}

impl Trend {
    /// Headline text regardless of shape.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Plain(text) | Self::Detailed { trend: text, .. } => text,
        }
    }

    /// Source link, only available on detailed trends.
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::Plain(_) => None,
            Self::Detailed { url, .. } => url.as_deref().filter(|u| !u.is_empty()),
        }
    }
}

/// Deserialize the `trends` field from any shape the pipeline has written.
///
/// - sequence: each element is a [`Trend`]
/// - mapping (legacy): one trend per key, so the entry count is preserved
/// - null: empty
pub(crate) fn deserialize_trends<'de, D>(deserializer: D) -> Result<Vec<Trend>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(Vec::new()),
        Value::Array(items) => items
            .into_iter()
            .map(|item| serde_json::from_value(item).map_err(de::Error::custom))
            .collect(),
        Value::Object(map) => Ok(map
            .into_iter()
            .map(|(key, value)| legacy_entry(key, value))
            .collect()),
        other => Err(de::Error::custom(format!(
            "trends must be a sequence or a mapping, got {other}"
        ))),
    }
}

fn legacy_entry(key: String, value: Value) -> Trend {
    match value {
        Value::String(text) if !text.is_empty() => Trend::Plain(text),
        object @ Value::Object(_) => serde_json::from_value(object).unwrap_or(Trend::Plain(key)),
        _ => Trend::Plain(key),
    }
}
