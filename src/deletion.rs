//! Vertex and edge removal
//!
//! Cascade policy:
//! - deleting an edge removes its record and both adjacency entries
//! - deleting a vertex removes it and every incident edge
//! - `delete_related` removes the edges a traversal would walk; for the
//!   vertex-yielding kinds it removes the far vertices too (each cascading to
//!   its own edges). The start vertex itself is never removed.

use crate::graph::{Edge, EdgeId, GraphResult, GraphState, Vertex, VertexId};
use crate::traversal::TraversalKind;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// What a deletion removed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletionReport {
    pub edges: Vec<EdgeId>,
    pub vertices: Vec<VertexId>,
}

impl DeletionReport {
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty() && self.vertices.is_empty()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DeletionCoordinator {}

impl DeletionCoordinator {
    pub fn new() -> Self {
        Self {}
    }

    /// Remove an edge; unknown ids are a no-op
    pub fn delete_edge(&self, state: &mut GraphState, id: EdgeId) -> Option<Edge> {
        let removed = state.remove_edge(id);
        if removed.is_some() {
            debug!(edge = %id, "deleted edge");
        }
        removed
    }

    /// Remove a vertex and every edge touching it
    pub fn delete_vertex(
        &self,
        state: &mut GraphState,
        id: VertexId,
    ) -> GraphResult<(Vertex, Vec<Edge>)> {
        let (vertex, edges) = state.remove_vertex(id)?;
        debug!(vertex = %id, edges = edges.len(), "deleted vertex");
        Ok((vertex, edges))
    }

    /// Remove the elements a `kind` traversal from `id` (filtered by `label`)
    /// would reach. See the module docs for the cascade rules.
    pub fn delete_related(
        &self,
        state: &mut GraphState,
        id: VertexId,
        kind: TraversalKind,
        label: Option<&str>,
    ) -> GraphResult<DeletionReport> {
        // Validates `id`
        state.vertex(id)?;
        let entries = state.index().neighbors(id, kind.direction(), label);

        let mut report = DeletionReport::default();
        for entry in &entries {
            if self.delete_edge(state, entry.edge).is_some() {
                report.edges.push(entry.edge);
            }
        }

        if kind.yields_vertices() {
            for entry in &entries {
                if entry.neighbor == id || report.vertices.contains(&entry.neighbor) {
                    continue;
                }
                let (_, cascaded) = self.delete_vertex(state, entry.neighbor)?;
                report.vertices.push(entry.neighbor);
                report.edges.extend(cascaded.into_iter().map(|edge| edge.id));
            }
        }

        debug!(
            vertex = %id,
            kind = %kind,
            edges = report.edges.len(),
            vertices = report.vertices.len(),
            "deleted related elements"
        );
        Ok(report)
    }
}
