//! Public entry point
//!
//! `GraphService` ties the pieces together: writes run through the
//! transaction guard, reads run against the last committed snapshot.

use crate::config::{ConfigResult, EngineConfig};
use crate::deletion::DeletionReport;
use crate::graph::{
    Edge, EdgeId, EdgeLabel, ElementId, GraphError, GraphResult, GraphState, PropertyMap, Vertex,
    VertexId,
};
use crate::traversal::{Page, TraversalEngine, TraversalKind};
use crate::txn::{Transaction, TransactionGuard};
use std::sync::Arc;
use tracing::info;

pub struct GraphService {
    config: EngineConfig,
    guard: TransactionGuard,
    engine: TraversalEngine,
}

impl GraphService {
    /// Create an empty graph
    pub fn new(config: EngineConfig) -> Self {
        let state = GraphState::with_capacity(config.vertex_capacity, config.edge_capacity);
        info!(
            graph = %config.graph_name,
            vertex_capacity = config.vertex_capacity,
            edge_capacity = config.edge_capacity,
            "graph service initialized"
        );
        GraphService {
            guard: TransactionGuard::new(config.graph_name.clone(), state),
            config,
            engine: TraversalEngine::new(),
        }
    }

    /// Validate `config` first
    pub fn try_new(config: EngineConfig) -> ConfigResult<Self> {
        config.validate()?;
        Ok(Self::new(config))
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Last committed state
    pub fn snapshot(&self) -> Arc<GraphState> {
        self.guard.snapshot()
    }

    /// Run several mutations as one atomic unit
    pub fn transaction<T, E, F>(&self, body: F) -> Result<T, E>
    where
        F: FnOnce(&mut Transaction<'_>) -> Result<T, E>,
        E: From<GraphError>,
    {
        self.guard.run(body)
    }

    /// Create a vertex (`id = None`) or merge `attrs` into an existing one.
    /// A `Null` value removes the key.
    pub fn save_vertex(&self, id: Option<VertexId>, attrs: &PropertyMap) -> GraphResult<VertexId> {
        self.guard.run(|tx| tx.upsert_vertex(id, attrs))
    }

    /// Create an edge (`id = None`) or merge `attrs` into an existing one.
    ///
    /// Label and endpoints cannot change after creation; passing different
    /// ones for an existing edge fails with `InvalidOperation`.
    pub fn save_edge(
        &self,
        id: Option<EdgeId>,
        label: impl Into<EdgeLabel>,
        from: VertexId,
        to: VertexId,
        attrs: &PropertyMap,
    ) -> GraphResult<EdgeId> {
        let label = label.into();
        self.guard.run(|tx| match id {
            None => tx.add_edge_with_properties(label, from, to, attrs),
            Some(id) => {
                let edge = tx.state().edge(id)?;
                if edge.label != label || edge.source != from || edge.target != to {
                    return Err(GraphError::InvalidOperation(format!(
                        "edge {} is {} -[{}]-> {}; label and endpoints are immutable",
                        id.as_u64(),
                        edge.source.as_u64(),
                        edge.label,
                        edge.target.as_u64()
                    )));
                }
                tx.update_edge(id, attrs)?;
                Ok(id)
            }
        })
    }

    pub fn get_vertex(&self, id: VertexId) -> GraphResult<Vertex> {
        self.snapshot().vertex(id).cloned()
    }

    pub fn get_edge(&self, id: EdgeId) -> GraphResult<Edge> {
        self.snapshot().edge(id).cloned()
    }

    /// Load several vertices in the requested order from one snapshot
    pub fn get_vertices(&self, ids: &[VertexId]) -> GraphResult<Vec<Vertex>> {
        let snapshot = self.snapshot();
        ids.iter()
            .map(|&id| snapshot.vertex(id).cloned())
            .collect()
    }

    /// One-hop traversal.
    ///
    /// `operation` is one of `inVertices`, `outVertices`, `inEdges`,
    /// `outEdges`. Pagination applies only when both `page_num` and
    /// `per_page` are given.
    pub fn traversal(
        &self,
        id: VertexId,
        operation: &str,
        label: Option<&str>,
        page_num: Option<usize>,
        per_page: Option<usize>,
    ) -> GraphResult<Vec<ElementId>> {
        let kind: TraversalKind = operation.parse()?;
        let page = Page::from_parts(page_num, per_page)?;
        self.engine.traverse(&self.snapshot(), id, kind, label, page)
    }

    /// (out vertex, in vertex) of an edge
    pub fn edge_vertices(&self, id: EdgeId) -> GraphResult<(VertexId, VertexId)> {
        self.engine.edge_vertices(&self.snapshot(), id)
    }

    /// Remove a vertex and its incident edges
    pub fn delete_vertex(&self, id: VertexId) -> GraphResult<DeletionReport> {
        self.guard.run(|tx| {
            let (vertex, edges) = tx.delete_vertex(id)?;
            Ok(DeletionReport {
                edges: edges.into_iter().map(|edge| edge.id).collect(),
                vertices: vec![vertex.id],
            })
        })
    }

    /// Remove an edge. Returns `false` if it did not exist.
    pub fn delete_edge(&self, id: EdgeId) -> GraphResult<bool> {
        self.guard.run(|tx| Ok(tx.remove_edge(id).is_some()))
    }

    /// Remove what `traversal(id, operation, edge_label)` would reach; see
    /// [`crate::deletion::DeletionCoordinator::delete_related`]
    pub fn delete_related(
        &self,
        id: VertexId,
        operation: &str,
        edge_label: Option<&str>,
    ) -> GraphResult<DeletionReport> {
        let kind: TraversalKind = operation.parse()?;
        self.guard.run(|tx| tx.delete_related(id, kind, edge_label))
    }

    pub fn vertex_count(&self) -> usize {
        self.snapshot().vertex_count()
    }

    pub fn edge_count(&self) -> usize {
        self.snapshot().edge_count()
    }
}

impl Default for GraphService {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}
