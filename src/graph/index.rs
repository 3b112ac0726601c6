//! Adjacency index
//!
//! Per vertex and direction, edges are kept ordered by `EdgeId` (which is
//! creation order, ids are never reused) with a secondary per-label index so
//! a label-filtered lookup does not scan unrelated edges.
//!
//! Every entry mirrors exactly one live edge: adding an edge creates one
//! `Out` entry on its tail and one `In` entry on its head, removing it drops
//! both.

use super::error::{GraphError, GraphResult};
use super::types::{Direction, EdgeId, EdgeLabel, VertexId};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// One side of an edge, as recorded on one of its endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdjacencyEntry {
    /// Vertex owning this entry
    pub vertex: VertexId,
    pub direction: Direction,
    pub label: EdgeLabel,
    pub edge: EdgeId,
    /// Vertex on the other end of `edge`
    pub neighbor: VertexId,
}

#[derive(Debug, Clone, Default, PartialEq)]
struct HalfAdjacency {
    /// EdgeId -> (label, neighbor)
    entries: BTreeMap<EdgeId, (EdgeLabel, VertexId)>,
    /// Label -> edges carrying it
    by_label: FxHashMap<EdgeLabel, BTreeSet<EdgeId>>,
}

impl HalfAdjacency {
    fn insert(&mut self, edge: EdgeId, label: &EdgeLabel, neighbor: VertexId) {
        self.entries.insert(edge, (label.clone(), neighbor));
        self.by_label.entry(label.clone()).or_default().insert(edge);
    }

    fn remove(&mut self, edge: EdgeId) {
        if let Some((label, _)) = self.entries.remove(&edge) {
            if let Some(set) = self.by_label.get_mut(&label) {
                set.remove(&edge);
                if set.is_empty() {
                    self.by_label.remove(&label);
                }
            }
        }
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
struct VertexAdjacency {
    incoming: HalfAdjacency,
    outgoing: HalfAdjacency,
}

impl VertexAdjacency {
    fn side(&self, direction: Direction) -> &HalfAdjacency {
        match direction {
            Direction::In => &self.incoming,
            Direction::Out => &self.outgoing,
        }
    }

    fn side_mut(&mut self, direction: Direction) -> &mut HalfAdjacency {
        match direction {
            Direction::In => &mut self.incoming,
            Direction::Out => &mut self.outgoing,
        }
    }
}

/// Endpoints and label of a live edge
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeEndpoints {
    pub source: VertexId,
    pub target: VertexId,
    pub label: EdgeLabel,
}

/// Adjacency structure over all live vertices and edges
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GraphIndex {
    /// One adjacency record per live vertex (present even when it has no edges)
    adjacency: FxHashMap<VertexId, VertexAdjacency>,

    /// Reverse lookup for edge removal
    endpoints: FxHashMap<EdgeId, EdgeEndpoints>,
}

impl GraphIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(vertex_capacity: usize, edge_capacity: usize) -> Self {
        GraphIndex {
            adjacency: FxHashMap::with_capacity_and_hasher(vertex_capacity, Default::default()),
            endpoints: FxHashMap::with_capacity_and_hasher(edge_capacity, Default::default()),
        }
    }

    /// Register a vertex so edges can attach to it
    pub fn add_vertex(&mut self, id: VertexId) {
        self.adjacency.entry(id).or_default();
    }

    pub fn has_vertex(&self, id: VertexId) -> bool {
        self.adjacency.contains_key(&id)
    }

    /// Link `from -[label]-> to` under the id returned by `allocate`.
    ///
    /// Fails with `VertexNotFound` (and allocates nothing) if either endpoint
    /// is unknown, and with `IdInUse` if the allocated id is already linked.
    pub fn add_edge(
        &mut self,
        label: &EdgeLabel,
        from: VertexId,
        to: VertexId,
        allocate: impl FnOnce() -> EdgeId,
    ) -> GraphResult<EdgeId> {
        if !self.has_vertex(from) {
            return Err(GraphError::VertexNotFound(from));
        }
        if !self.has_vertex(to) {
            return Err(GraphError::VertexNotFound(to));
        }

        let edge = allocate();
        if self.endpoints.contains_key(&edge) {
            return Err(GraphError::IdInUse(edge.into()));
        }
        if let Some(adj) = self.adjacency.get_mut(&from) {
            adj.outgoing.insert(edge, label, to);
        }
        if let Some(adj) = self.adjacency.get_mut(&to) {
            adj.incoming.insert(edge, label, from);
        }
        self.endpoints.insert(
            edge,
            EdgeEndpoints {
                source: from,
                target: to,
                label: label.clone(),
            },
        );
        Ok(edge)
    }

    /// Entries of `id` on the given side, in creation order, optionally
    /// restricted to one label. Unknown vertices yield an empty sequence.
    pub fn neighbors(
        &self,
        id: VertexId,
        direction: Direction,
        label: Option<&str>,
    ) -> Vec<AdjacencyEntry> {
        let Some(adj) = self.adjacency.get(&id) else {
            return Vec::new();
        };
        let side = adj.side(direction);
        let entry = |edge: EdgeId, label: &EdgeLabel, neighbor: VertexId| AdjacencyEntry {
            vertex: id,
            direction,
            label: label.clone(),
            edge,
            neighbor,
        };

        match label {
            None => side
                .entries
                .iter()
                .map(|(&edge, (label, neighbor))| entry(edge, label, *neighbor))
                .collect(),
            Some(label) => side
                .by_label
                .get(label)
                .map(|edges| {
                    edges
                        .iter()
                        .filter_map(|edge| {
                            side.entries
                                .get(edge)
                                .map(|(label, neighbor)| entry(*edge, label, *neighbor))
                        })
                        .collect()
                })
                .unwrap_or_default(),
        }
    }

    /// Unlink an edge. Unknown ids are a no-op; returns the removed endpoints.
    pub fn remove_edge(&mut self, edge: EdgeId) -> Option<EdgeEndpoints> {
        let endpoints = self.endpoints.remove(&edge)?;
        if let Some(adj) = self.adjacency.get_mut(&endpoints.source) {
            adj.side_mut(Direction::Out).remove(edge);
        }
        if let Some(adj) = self.adjacency.get_mut(&endpoints.target) {
            adj.side_mut(Direction::In).remove(edge);
        }
        Some(endpoints)
    }

    /// Unregister a vertex, unlinking all of its edges first.
    /// Returns the ids of the edges that were unlinked.
    pub fn remove_vertex(&mut self, id: VertexId) -> Vec<EdgeId> {
        let Some(adj) = self.adjacency.get(&id) else {
            return Vec::new();
        };
        let incident: BTreeSet<EdgeId> = adj
            .outgoing
            .entries
            .keys()
            .chain(adj.incoming.entries.keys())
            .copied()
            .collect();

        for edge in &incident {
            self.remove_edge(*edge);
        }
        self.adjacency.remove(&id);
        incident.into_iter().collect()
    }

    pub fn edge_endpoints(&self, edge: EdgeId) -> Option<&EdgeEndpoints> {
        self.endpoints.get(&edge)
    }

    /// Number of edges on one side of a vertex
    pub fn degree(&self, id: VertexId, direction: Direction) -> usize {
        self.adjacency
            .get(&id)
            .map(|adj| adj.side(direction).len())
            .unwrap_or(0)
    }

    /// Total number of adjacency entries (two per live edge)
    pub fn entry_count(&self) -> usize {
        self.adjacency
            .values()
            .map(|adj| adj.incoming.len() + adj.outgoing.len())
            .sum()
    }

    pub fn edge_count(&self) -> usize {
        self.endpoints.len()
    }
}
