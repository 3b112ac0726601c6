//! Core type definitions for the property graph

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Unique identifier for a vertex
///
/// Assigned by the engine on creation and never handed out again, even when
/// the transaction that allocated it rolls back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct VertexId(pub u64);

impl VertexId {
    pub fn new(id: u64) -> Self {
        VertexId(id)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VertexId({})", self.0)
    }
}

impl From<u64> for VertexId {
    fn from(id: u64) -> Self {
        VertexId(id)
    }
}

/// Unique identifier for an edge
///
/// Edge ids grow monotonically, so ordering by id is creation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct EdgeId(pub u64);

impl EdgeId {
    pub fn new(id: u64) -> Self {
        EdgeId(id)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EdgeId({})", self.0)
    }
}

impl From<u64> for EdgeId {
    fn from(id: u64) -> Self {
        EdgeId(id)
    }
}

/// Edge label (relationship name, e.g. "knows", "wrote")
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct EdgeLabel(String);

impl EdgeLabel {
    pub fn new(label: impl Into<String>) -> Self {
        EdgeLabel(label.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EdgeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Borrow<str> for EdgeLabel {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<String> for EdgeLabel {
    fn from(s: String) -> Self {
        EdgeLabel(s)
    }
}

impl From<&str> for EdgeLabel {
    fn from(s: &str) -> Self {
        EdgeLabel(s.to_string())
    }
}

/// Side of an edge as seen from a vertex
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Edges whose head is the vertex
    In,
    /// Edges whose tail is the vertex
    Out,
}

impl Direction {
    pub fn reverse(self) -> Self {
        match self {
            Direction::In => Direction::Out,
            Direction::Out => Direction::In,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::In => write!(f, "in"),
            Direction::Out => write!(f, "out"),
        }
    }
}

/// Identifier of either kind of graph element, as produced by traversals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementId {
    Vertex(VertexId),
    Edge(EdgeId),
}

impl ElementId {
    pub fn as_vertex(&self) -> Option<VertexId> {
        match self {
            ElementId::Vertex(id) => Some(*id),
            ElementId::Edge(_) => None,
        }
    }

    pub fn as_edge(&self) -> Option<EdgeId> {
        match self {
            ElementId::Edge(id) => Some(*id),
            ElementId::Vertex(_) => None,
        }
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementId::Vertex(id) => write!(f, "{}", id),
            ElementId::Edge(id) => write!(f, "{}", id),
        }
    }
}

impl From<VertexId> for ElementId {
    fn from(id: VertexId) -> Self {
        ElementId::Vertex(id)
    }
}

impl From<EdgeId> for ElementId {
    fn from(id: EdgeId) -> Self {
        ElementId::Edge(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_id() {
        let id = VertexId::new(42);
        assert_eq!(id.as_u64(), 42);
        assert_eq!(format!("{}", id), "VertexId(42)");

        let id2: VertexId = 100.into();
        assert_eq!(id2.as_u64(), 100);
    }

    #[test]
    fn test_edge_id() {
        let id = EdgeId::new(99);
        assert_eq!(id.as_u64(), 99);
        assert_eq!(format!("{}", id), "EdgeId(99)");
    }

    #[test]
    fn test_edge_label() {
        let label = EdgeLabel::new("knows");
        assert_eq!(label.as_str(), "knows");
        assert_eq!(format!("{}", label), "knows");

        let label2: EdgeLabel = "wrote".into();
        assert_eq!(label2.as_str(), "wrote");
    }

    #[test]
    fn test_direction_reverse() {
        assert_eq!(Direction::In.reverse(), Direction::Out);
        assert_eq!(Direction::Out.reverse(), Direction::In);
        assert_eq!(Direction::Out.to_string(), "out");
    }

    #[test]
    fn test_element_id_accessors() {
        let v: ElementId = VertexId::new(3).into();
        let e: ElementId = EdgeId::new(4).into();

        assert_eq!(v.as_vertex(), Some(VertexId::new(3)));
        assert_eq!(v.as_edge(), None);
        assert_eq!(e.as_edge(), Some(EdgeId::new(4)));
        assert_eq!(e.as_vertex(), None);
    }

    #[test]
    fn test_id_ordering() {
        let id1 = EdgeId::new(1);
        let id2 = EdgeId::new(2);
        assert!(id1 < id2);
    }
}
