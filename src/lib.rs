//! Graphshim
//!
//! An in-memory property graph with transactional upserts and paginated,
//! label-filtered one-hop traversals.
//!
//! # Architecture
//!
//! - `graph`: data model, property store and adjacency index
//! - `txn`: single-writer transactions over copy-on-write snapshots
//! - `traversal`: `inVertices` / `outVertices` / `inEdges` / `outEdges` with paging
//! - `deletion`: edge, vertex and related-element removal
//! - `service`: the public `GraphService` facade
//!
//! Readers always see the last committed snapshot and never wait on a writer.
//!
//! ## Example Usage
//!
//! ```rust
//! use graphshim::{ElementId, EngineConfig, GraphService, PropertyMap};
//!
//! let service = GraphService::new(EngineConfig::default());
//!
//! let mut attrs = PropertyMap::new();
//! attrs.insert("name".to_string(), "Alice".into());
//! let alice = service.save_vertex(None, &attrs).unwrap();
//! let bob = service.save_vertex(None, &PropertyMap::new()).unwrap();
//! service.save_edge(None, "knows", alice, bob, &PropertyMap::new()).unwrap();
//!
//! let out = service
//!     .traversal(alice, "outVertices", Some("knows"), Some(1), Some(10))
//!     .unwrap();
//! assert_eq!(out, vec![ElementId::Vertex(bob)]);
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod deletion;
pub mod graph;
pub mod service;
pub mod traversal;
pub mod txn;

// Re-export main types for convenience
pub use config::{ConfigError, ConfigResult, EngineConfig};
pub use deletion::{DeletionCoordinator, DeletionReport};
pub use graph::{
    Direction, Edge, EdgeId, EdgeLabel, ElementId, GraphError, GraphIndex, GraphResult,
    GraphState, PropertyMap, PropertyStore, PropertyValue, Vertex, VertexId,
};
pub use service::GraphService;
pub use traversal::{Page, TraversalEngine, TraversalKind};
pub use txn::{IdAllocator, Transaction, TransactionGuard};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        let ver = version();
        assert!(!ver.is_empty());
        assert_eq!(ver, "0.1.0");
    }
}
