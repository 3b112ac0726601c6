//! Vertex implementation for property graph

use super::property::{apply_updates, PropertyMap, PropertyValue};
use super::types::VertexId;
use serde::{Deserialize, Serialize};

/// A vertex in the property graph
///
/// Vertices have:
/// - A unique, engine-assigned ID
/// - Properties (key-value pairs, never holding `Null`)
/// - Creation and update timestamps
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    /// Unique identifier for this vertex
    pub id: VertexId,

    /// Properties associated with this vertex
    pub properties: PropertyMap,

    /// Creation timestamp (Unix milliseconds)
    pub created_at: i64,

    /// Last update timestamp (Unix milliseconds)
    pub updated_at: i64,
}

impl Vertex {
    /// Create a new vertex with an empty property bag
    pub fn new(id: VertexId) -> Self {
        let now = chrono::Utc::now().timestamp_millis();

        Vertex {
            id,
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

    /// Check if property exists
    pub fn has_property(&self, key: &str) -> bool {
        self.properties.contains_key(key)
    }

    /// Get number of properties
    pub fn property_count(&self) -> usize {
        self.properties.len()
    }
}
