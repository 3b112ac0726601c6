//! One-hop traversals with page slicing
//!
//! A traversal walks from a start vertex along its edges on one side,
//! optionally restricted to a single label, and yields either the edges
//! themselves or the vertices at their far ends, in edge creation order.

use crate::graph::{Direction, EdgeId, ElementId, GraphError, GraphResult, GraphState, VertexId};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;
use std::str::FromStr;

/// What a traversal walks and what it yields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TraversalKind {
    InVertices,
    OutVertices,
    InEdges,
    OutEdges,
}

impl TraversalKind {
    pub const ALL: [TraversalKind; 4] = [
        TraversalKind::InVertices,
        TraversalKind::OutVertices,
        TraversalKind::InEdges,
        TraversalKind::OutEdges,
    ];

    /// Side of the start vertex the traversal walks
    pub fn direction(self) -> Direction {
        match self {
            TraversalKind::InVertices | TraversalKind::InEdges => Direction::In,
            TraversalKind::OutVertices | TraversalKind::OutEdges => Direction::Out,
        }
    }

    /// True when the result holds far-end vertices rather than edges
    pub fn yields_vertices(self) -> bool {
        matches!(self, TraversalKind::InVertices | TraversalKind::OutVertices)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TraversalKind::InVertices => "inVertices",
            TraversalKind::OutVertices => "outVertices",
            TraversalKind::InEdges => "inEdges",
            TraversalKind::OutEdges => "outEdges",
        }
    }
}

impl fmt::Display for TraversalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TraversalKind {
    type Err = GraphError;

    /// Case-sensitive, exact match on the four operation names
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TraversalKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| GraphError::InvalidOperation(s.to_string()))
    }
}

/// A 1-based page window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub page_num: usize,
    pub per_page: usize,
}

impl Page {
    /// Both values must be at least 1
    pub fn new(page_num: usize, per_page: usize) -> GraphResult<Self> {
        if page_num == 0 || per_page == 0 {
            return Err(GraphError::InvalidPage {
                page_num: Some(page_num),
                per_page: Some(per_page),
            });
        }
        Ok(Page { page_num, per_page })
    }

    /// Build a page from optional parts.
    ///
    /// Any supplied part must be at least 1. Pagination applies only when
    /// both parts are given; a single part means "no pagination".
    pub fn from_parts(
        page_num: Option<usize>,
        per_page: Option<usize>,
    ) -> GraphResult<Option<Self>> {
        if page_num == Some(0) || per_page == Some(0) {
            return Err(GraphError::InvalidPage { page_num, per_page });
        }
        Ok(match (page_num, per_page) {
            (Some(page_num), Some(per_page)) => Some(Page { page_num, per_page }),
            _ => None,
        })
    }

    /// Index window `[start, end)` clamped to a sequence of length `len`
    pub fn bounds(&self, len: usize) -> Range<usize> {
        let start = (self.page_num - 1).saturating_mul(self.per_page);
        if start >= len {
            return len..len;
        }
        let end = start.saturating_add(self.per_page).min(len);
        start..end
    }

    /// Slice `items` down to this page
    pub fn apply<T>(&self, mut items: Vec<T>) -> Vec<T> {
        let range = self.bounds(items.len());
        items.truncate(range.end);
        items.drain(..range.start);
        items
    }
}

/// Runs traversals against a graph state
///
/// Callers pass a committed snapshot (or a transaction's own state), so a
/// traversal never observes a half-applied transaction.
#[derive(Debug, Clone, Copy, Default)]
pub struct TraversalEngine {}

impl TraversalEngine {
    pub fn new() -> Self {
        Self {}
    }

    /// Walk one hop from `start`.
    ///
    /// Fails with `VertexNotFound` if `start` is not a live vertex. A vertex
    /// with no matching edges yields an empty sequence.
    pub fn traverse(
        &self,
        state: &GraphState,
        start: VertexId,
        kind: TraversalKind,
        label: Option<&str>,
        page: Option<Page>,
    ) -> GraphResult<Vec<ElementId>> {
        if !state.has_vertex(start) {
            return Err(GraphError::VertexNotFound(start));
        }

        let results: Vec<ElementId> = state
            .index()
            .neighbors(start, kind.direction(), label)
            .into_iter()
            .map(|entry| {
                if kind.yields_vertices() {
                    ElementId::Vertex(entry.neighbor)
                } else {
                    ElementId::Edge(entry.edge)
                }
            })
            .collect();

        Ok(match page {
            Some(page) => page.apply(results),
            None => results,
        })
    }

    /// Endpoints of an edge as (tail, head), i.e. (out vertex, in vertex)
    pub fn edge_vertices(
        &self,
        state: &GraphState,
        edge: EdgeId,
    ) -> GraphResult<(VertexId, VertexId)> {
        let edge = state.edge(edge)?;
        Ok((edge.source, edge.target))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::PropertyMap;

    #[test]
    fn test_kind_parsing_is_exact() {
        assert_eq!("inVertices".parse::<TraversalKind>(), Ok(TraversalKind::InVertices));
        assert_eq!("outEdges".parse::<TraversalKind>(), Ok(TraversalKind::OutEdges));
        assert_eq!(
            "OutEdges".parse::<TraversalKind>(),
            Err(GraphError::InvalidOperation("OutEdges".to_string()))
        );
        assert!("bogus".parse::<TraversalKind>().is_err());
        assert!("".parse::<TraversalKind>().is_err());

        for kind in TraversalKind::ALL {
            assert_eq!(kind.to_string().parse::<TraversalKind>(), Ok(kind));
        }
    }

    #[test]
    fn test_kind_direction() {
        assert_eq!(TraversalKind::InVertices.direction(), Direction::In);
        assert_eq!(TraversalKind::InEdges.direction(), Direction::In);
        assert_eq!(TraversalKind::OutVertices.direction(), Direction::Out);
        assert_eq!(TraversalKind::OutEdges.direction(), Direction::Out);
        assert!(TraversalKind::OutVertices.yields_vertices());
        assert!(!TraversalKind::InEdges.yields_vertices());
    }

    #[test]
    fn test_page_bounds() {
        let page = Page::new(1, 2).unwrap();
        assert_eq!(page.bounds(5), 0..2);
        assert_eq!(Page::new(3, 2).unwrap().bounds(5), 4..5);
        assert_eq!(Page::new(10, 2).unwrap().bounds(5), 5..5);
        assert_eq!(Page::new(1, 10).unwrap().bounds(0), 0..0);
        assert_eq!(Page::new(usize::MAX, usize::MAX).unwrap().bounds(3), 3..3);
    }

    #[test]
    fn test_page_apply() {
        let items = vec!['a', 'b', 'c', 'd', 'e'];
        assert_eq!(Page::new(1, 2).unwrap().apply(items.clone()), vec!['a', 'b']);
        assert_eq!(Page::new(2, 2).unwrap().apply(items.clone()), vec!['c', 'd']);
        assert_eq!(Page::new(3, 2).unwrap().apply(items.clone()), vec!['e']);
        assert!(Page::new(10, 2).unwrap().apply(items).is_empty());
    }

    #[test]
    fn test_page_validation() {
        assert_eq!(
            Page::new(0, 5),
            Err(GraphError::InvalidPage {
                page_num: Some(0),
                per_page: Some(5)
            })
        );
        assert!(Page::new(1, 0).is_err());
        assert_eq!(
            Page::from_parts(Some(0), None),
            Err(GraphError::InvalidPage {
                page_num: Some(0),
                per_page: None
            })
        );
        assert_eq!(
            Page::from_parts(None, Some(0)),
            Err(GraphError::InvalidPage {
                page_num: None,
                per_page: Some(0)
            })
        );
        assert_eq!(Page::from_parts(Some(2), None), Ok(None));
        assert_eq!(Page::from_parts(None, Some(2)), Ok(None));
        assert_eq!(Page::from_parts(None, None), Ok(None));
        assert_eq!(
            Page::from_parts(Some(2), Some(3)),
            Ok(Some(Page { page_num: 2, per_page: 3 }))
        );
    }

    #[test]
    fn test_traverse_vertices_and_edges() {
        let mut state = GraphState::new();
        let mut next_v = 0;
        let mut next_e = 0;
        let mut vertex = |state: &mut GraphState| {
            state
                .upsert_vertex(None, &PropertyMap::new(), || {
                    next_v += 1;
                    VertexId::new(next_v)
                })
                .unwrap()
        };
        let a = vertex(&mut state);
        let b = vertex(&mut state);
        let c = vertex(&mut state);

        let mut edge = |state: &mut GraphState, label: &str, from: VertexId, to: VertexId| {
            state
                .add_edge(label, from, to, &PropertyMap::new(), || {
                    next_e += 1;
                    EdgeId::new(next_e)
                })
                .unwrap()
        };
        let ab = edge(&mut state, "knows", a, b);
        let ac = edge(&mut state, "likes", a, c);
        let cb = edge(&mut state, "knows", c, b);

        let engine = TraversalEngine::new();
        let out = engine
            .traverse(&state, a, TraversalKind::OutVertices, None, None)
            .unwrap();
        assert_eq!(out, vec![ElementId::Vertex(b), ElementId::Vertex(c)]);

        let in_edges = engine
            .traverse(&state, b, TraversalKind::InEdges, Some("knows"), None)
            .unwrap();
        assert_eq!(in_edges, vec![ElementId::Edge(ab), ElementId::Edge(cb)]);

        let out_edges = engine
            .traverse(&state, a, TraversalKind::OutEdges, Some("likes"), None)
            .unwrap();
        assert_eq!(out_edges, vec![ElementId::Edge(ac)]);

        let none = engine
            .traverse(&state, b, TraversalKind::OutVertices, None, None)
            .unwrap();
        assert!(none.is_empty());

        assert_eq!(engine.edge_vertices(&state, ac).unwrap(), (a, c));
        assert_eq!(
            engine.traverse(&state, VertexId::new(99), TraversalKind::InEdges, None, None),
            Err(GraphError::VertexNotFound(VertexId::new(99)))
        );
    }
}
