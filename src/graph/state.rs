//! Graph state: property store plus adjacency index
//!
//! A `GraphState` value is what readers see as a committed snapshot and what
//! a transaction mutates as its private shadow copy. All mutations that touch
//! both structures go through here so the adjacency never disagrees with the
//! set of live edges.

use super::edge::Edge;
use super::error::{GraphError, GraphResult};
use super::index::GraphIndex;
use super::property::PropertyMap;
use super::store::PropertyStore;
use super::types::{EdgeId, EdgeLabel, VertexId};
use super::vertex::Vertex;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GraphState {
    store: PropertyStore,
    index: GraphIndex,
}

impl GraphState {
    /// Create a new empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty graph with preallocated tables
    pub fn with_capacity(vertex_capacity: usize, edge_capacity: usize) -> Self {
        GraphState {
            store: PropertyStore::with_capacity(vertex_capacity, edge_capacity),
            index: GraphIndex::with_capacity(vertex_capacity, edge_capacity),
        }
    }

    pub fn store(&self) -> &PropertyStore {
        &self.store
    }

    pub fn index(&self) -> &GraphIndex {
        &self.index
    }

    /// Create (`id = None`) or update a vertex; see [`PropertyStore::upsert`]
    pub fn upsert_vertex(
        &mut self,
        id: Option<VertexId>,
        attrs: &PropertyMap,
        allocate: impl FnOnce() -> VertexId,
    ) -> GraphResult<VertexId> {
        let created = id.is_none();
        let id = self.store.upsert(id, attrs, allocate)?;
        if created {
            self.index.add_vertex(id);
        }
        Ok(id)
    }

    /// Property bag of a vertex
    pub fn get(&self, id: VertexId) -> GraphResult<&PropertyMap> {
        self.store.get(id)
    }

    pub fn vertex(&self, id: VertexId) -> GraphResult<&Vertex> {
        self.store.vertex(id).ok_or(GraphError::VertexNotFound(id))
    }

    pub fn edge(&self, id: EdgeId) -> GraphResult<&Edge> {
        self.store.edge(id).ok_or(GraphError::EdgeNotFound(id))
    }

    pub fn has_vertex(&self, id: VertexId) -> bool {
        self.store.has_vertex(id)
    }

    pub fn has_edge(&self, id: EdgeId) -> bool {
        self.store.has_edge(id)
    }

    /// Create an edge `from -[label]-> to` carrying `attrs`
    pub fn add_edge(
        &mut self,
        label: impl Into<EdgeLabel>,
        from: VertexId,
        to: VertexId,
        attrs: &PropertyMap,
        allocate: impl FnOnce() -> EdgeId,
    ) -> GraphResult<EdgeId> {
        let label = label.into();
        let id = self.index.add_edge(&label, from, to, allocate)?;

        let mut edge = Edge::new(id, from, to, label);
        edge.apply(attrs);
        edge.updated_at = edge.created_at;
        self.store.insert_edge(edge);
        Ok(id)
    }

    /// Update the property bag of an existing edge
    pub fn update_edge(&mut self, id: EdgeId, attrs: &PropertyMap) -> GraphResult<()> {
        self.store.update_edge(id, attrs)
    }

    /// Remove an edge and both of its adjacency entries. Unknown ids are a no-op.
    pub fn remove_edge(&mut self, id: EdgeId) -> Option<Edge> {
        self.index.remove_edge(id);
        self.store.remove_edge(id)
    }

    /// Remove a vertex together with every incident edge
    pub fn remove_vertex(&mut self, id: VertexId) -> GraphResult<(Vertex, Vec<Edge>)> {
        if !self.store.has_vertex(id) {
            return Err(GraphError::VertexNotFound(id));
        }
        let edges = self
            .index
            .remove_vertex(id)
            .into_iter()
            .filter_map(|edge| self.store.remove_edge(edge))
            .collect();
        let vertex = self
            .store
            .remove_vertex(id)
            .ok_or(GraphError::VertexNotFound(id))?;
        Ok((vertex, edges))
    }

    pub fn max_vertex_id(&self) -> Option<VertexId> {
        self.store.max_vertex_id()
    }

    pub fn max_edge_id(&self) -> Option<EdgeId> {
        self.store.max_edge_id()
    }

    pub fn vertex_count(&self) -> usize {
        self.store.vertex_count()
    }

    pub fn edge_count(&self) -> usize {
        self.store.edge_count()
    }

    /// Check that the index mirrors the live edges exactly: every stored edge
    /// has matching endpoints in the index and there are two entries per edge.
    pub fn is_consistent(&self) -> bool {
        if self.index.edge_count() != self.store.edge_count()
            || self.index.entry_count() != 2 * self.store.edge_count()
        {
            return false;
        }
        self.store.edges().all(|edge| {
            self.index.edge_endpoints(edge.id).is_some_and(|ep| {
                ep.source == edge.source && ep.target == edge.target && ep.label == edge.label
            })
        })
    }
}
