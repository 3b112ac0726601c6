use super::types::{EdgeId, ElementId, VertexId};
use thiserror::Error;

/// Errors that can occur during graph operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    #[error("Vertex {0} not found")]
    VertexNotFound(VertexId),

    #[error("Edge {0} not found")]
    EdgeNotFound(EdgeId),

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// A supplied page number or page size of 0; `None` marks a part that was not given
    #[error("Invalid page: page_num={page_num:?}, per_page={per_page:?} (both must be >= 1)")]
    InvalidPage {
        page_num: Option<usize>,
        per_page: Option<usize>,
    },

    #[error("A transaction is already active on this graph")]
    TransactionActive,

    #[error("Identifier {0} is already in use")]
    IdInUse(ElementId),
}

impl GraphError {
    /// True for the "referenced id does not exist" kind
    pub fn is_not_found(&self) -> bool {
        matches!(self, GraphError::VertexNotFound(_) | GraphError::EdgeNotFound(_))
    }
}

pub type GraphResult<T> = Result<T, GraphError>;
