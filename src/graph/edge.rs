//! Edge implementation for property graph
//!
//! Edges are directed: exactly one tail (`source`) and one head (`target`).
//! Label and endpoints are fixed at creation; only properties change.

use super::property::{apply_updates, PropertyMap, PropertyValue};
use super::types::{Direction, EdgeId, EdgeLabel, VertexId};
use serde::{Deserialize, Serialize};

/// A directed, labeled edge in the property graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    /// Unique identifier for this edge
    pub id: EdgeId,

    /// Tail vertex (edge goes FROM this vertex)
    pub source: VertexId,

    /// Head vertex (edge goes TO this vertex)
    pub target: VertexId,

    /// Relationship label
    pub label: EdgeLabel,

    /// Properties associated with this edge
    pub properties: PropertyMap,

    /// Creation timestamp (Unix milliseconds)
    pub created_at: i64,

    /// Last update timestamp (Unix milliseconds)
    pub updated_at: i64,
}

impl Edge {
    /// Create a new directed edge
    pub fn new(
        id: EdgeId,
        source: VertexId,
        target: VertexId,
        label: impl Into<EdgeLabel>,
    ) -> Self {
        let now = chrono::Utc::now().timestamp_millis();

        Edge {
            id,
            source,
            target,
            label: label.into(),
            properties: PropertyMap::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply an upsert-style update; `Null` values remove keys
    pub fn apply(&mut self, attrs: &PropertyMap) -> bool {
        let changed = apply_updates(&mut self.properties, attrs);
        if changed {
            self.updated_at = chrono::Utc::now().timestamp_millis();
        }
        changed
    }

    /// Get a property value
    pub fn get_property(&self, key: &str) -> Option<&PropertyValue> {
        self.properties.get(key)
    }

    /// Get number of properties
    pub fn property_count(&self) -> usize {
        self.properties.len()
    }

    /// Far endpoint when the edge is walked in `direction`: the head for
    /// `Out`, the tail for `In`.
    pub fn opposite(&self, direction: Direction) -> VertexId {
        match direction {
            Direction::Out => self.target,
            Direction::In => self.source,
        }
    }

    /// Check if this edge goes FROM a specific vertex
    pub fn starts_from(&self, vertex: VertexId) -> bool {
        self.source == vertex
    }

    /// Check if this edge goes TO a specific vertex
    pub fn ends_at(&self, vertex: VertexId) -> bool {
        self.target == vertex
    }
}
