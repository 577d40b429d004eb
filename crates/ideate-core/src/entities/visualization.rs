use std::collections::HashSet;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// A box on the brainstorming canvas. Coordinates are percentages of the canvas.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct VisualizationNode {
    pub id: String,
    pub label: String,
    pub x: f64,
    pub y: f64,
}

/// A directed edge between two nodes.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct VisualizationConnection {
    pub id: String,
    pub source: String,
    pub target: String,
}

/// Diagram editor state for one niche, stored opaquely in
/// `AnalysisRecord::visualization_code`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct VisualizationState {
    pub niche: String,
    pub nodes: Vec<VisualizationNode>,
    pub connections: Vec<VisualizationConnection>,
    pub timestamp: String,
}

impl VisualizationState {
    /// Structural checks the editor relies on.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] for duplicate node ids, coordinates
    /// outside 0-100, or connections pointing at unknown nodes.
    pub fn validate(&self) -> Result<(), CoreError> {
        let mut ids = HashSet::with_capacity(self.nodes.len());
        for node in &self.nodes {
            if !ids.insert(node.id.as_str()) {
                return Err(CoreError::Validation(format!(
                    "duplicate node id '{}'",
                    node.id
                )));
            }
            if !(0.0..=100.0).contains(&node.x) || !(0.0..=100.0).contains(&node.y) {
                return Err(CoreError::Validation(format!(
                    "node '{}' is outside the canvas",
                    node.id
                )));
            }
        }
        for conn in &self.connections {
            if !ids.contains(conn.source.as_str()) || !ids.contains(conn.target.as_str()) {
                return Err(CoreError::Validation(format!(
                    "connection '{}' references an unknown node",
                    conn.id
                )));
            }
        }
        Ok(())
    }

    /// Serialize for storage.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Serialization`] if encoding fails.
    pub fn to_code(&self) -> Result<String, CoreError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a stored `visualization_code` value.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Serialization`] if the code is not a valid state.
    pub fn from_code(code: &str) -> Result<Self, CoreError> {
        Ok(serde_json::from_str(code)?)
    }
}
