//! In-memory property storage
//!
//! Maps vertex and edge identifiers to their records and property bags.
//! Adjacency lives in [`GraphIndex`](super::index::GraphIndex); the two are
//! kept consistent by [`GraphState`](super::state::GraphState).

use super::edge::Edge;
use super::error::{GraphError, GraphResult};
use super::property::PropertyMap;
use super::types::{EdgeId, VertexId};
use super::vertex::Vertex;
use rustc_hash::FxHashMap;

/// Vertex and edge records keyed by id
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyStore {
    /// Vertex storage: VertexId -> Vertex
    vertices: FxHashMap<VertexId, Vertex>,

    /// Edge storage: EdgeId -> Edge
    edges: FxHashMap<EdgeId, Edge>,
}

impl PropertyStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store with preallocated tables
    pub fn with_capacity(vertex_capacity: usize, edge_capacity: usize) -> Self {
        PropertyStore {
            vertices: FxHashMap::with_capacity_and_hasher(vertex_capacity, Default::default()),
            edges: FxHashMap::with_capacity_and_hasher(edge_capacity, Default::default()),
        }
    }

    /// Create or update a vertex.
    ///
    /// With `id = None` a fresh vertex is created under the id returned by
    /// `allocate`; an id that is already live fails with `IdInUse`. With
    /// `id = Some(..)` the vertex must already exist, else `VertexNotFound` is
    /// returned. Nothing changes on error. `Null` values in `attrs` remove
    /// keys, everything else overwrites.
    pub fn upsert(
        &mut self,
        id: Option<VertexId>,
        attrs: &PropertyMap,
        allocate: impl FnOnce() -> VertexId,
    ) -> GraphResult<VertexId> {
        match id {
            Some(id) => {
                let vertex = self
                    .vertices
                    .get_mut(&id)
                    .ok_or(GraphError::VertexNotFound(id))?;
                vertex.apply(attrs);
                Ok(id)
            }
            None => {
                let id = allocate();
                if self.vertices.contains_key(&id) {
                    return Err(GraphError::IdInUse(id.into()));
                }
                let mut vertex = Vertex::new(id);
                vertex.apply(attrs);
                // Creation sets both timestamps to the same instant
                vertex.updated_at = vertex.created_at;
                self.vertices.insert(id, vertex);
                Ok(id)
            }
        }
    }

    /// Property bag of a vertex
    pub fn get(&self, id: VertexId) -> GraphResult<&PropertyMap> {
        self.vertices
            .get(&id)
            .map(|v| &v.properties)
            .ok_or(GraphError::VertexNotFound(id))
    }

    /// Get a vertex by ID
    pub fn vertex(&self, id: VertexId) -> Option<&Vertex> {
        self.vertices.get(&id)
    }

    /// Check if a vertex exists
    pub fn has_vertex(&self, id: VertexId) -> bool {
        self.vertices.contains_key(&id)
    }

    /// Remove a vertex record. Incident edges are the caller's concern.
    pub fn remove_vertex(&mut self, id: VertexId) -> Option<Vertex> {
        self.vertices.remove(&id)
    }

    /// Store a newly created edge record
    pub fn insert_edge(&mut self, edge: Edge) {
        self.edges.insert(edge.id, edge);
    }

    /// Apply an upsert-style update to an existing edge's property bag
    pub fn update_edge(&mut self, id: EdgeId, attrs: &PropertyMap) -> GraphResult<()> {
        let edge = self.edges.get_mut(&id).ok_or(GraphError::EdgeNotFound(id))?;
        edge.apply(attrs);
        Ok(())
    }

    /// Get an edge by ID
    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(&id)
    }

    /// Check if an edge exists
    pub fn has_edge(&self, id: EdgeId) -> bool {
        self.edges.contains_key(&id)
    }

    /// Remove an edge record
    pub fn remove_edge(&mut self, id: EdgeId) -> Option<Edge> {
        self.edges.remove(&id)
    }

    /// Get total number of vertices
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get total number of edges
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Largest live vertex id
    pub fn max_vertex_id(&self) -> Option<VertexId> {
        self.vertices.keys().max().copied()
    }

    /// Largest live edge id
    pub fn max_edge_id(&self) -> Option<EdgeId> {
        self.edges.keys().max().copied()
    }

    /// All vertex ids in ascending order
    pub fn vertex_ids(&self) -> Vec<VertexId> {
        let mut ids: Vec<VertexId> = self.vertices.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// All edges, unordered
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.values()
    }
}
