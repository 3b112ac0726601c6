//! Core property graph
//!
//! This module implements the property graph data model with:
//! - Vertices with engine-assigned ids and property bags
//! - Directed, labeled edges with properties
//! - Multiple edges between the same vertices
//! - An adjacency index partitioned by direction and label

pub mod edge;
pub mod error;
pub mod index;
pub mod property;
pub mod state;
pub mod store;
pub mod types;
pub mod vertex;

// Re-export main types
pub use edge::Edge;
pub use error::{GraphError, GraphResult};
pub use index::{AdjacencyEntry, EdgeEndpoints, GraphIndex};
pub use property::{PropertyMap, PropertyValue};
pub use state::GraphState;
pub use store::PropertyStore;
pub use types::{Direction, EdgeId, EdgeLabel, ElementId, VertexId};
pub use vertex::Vertex;
