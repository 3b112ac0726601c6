//! Single-writer transactions over the shared graph
//!
//! Readers take the committed snapshot (`Arc<GraphState>`) and never wait on
//! the writer. A transaction works on its own copy of the state, cloned on
//! its first mutation; on success the copy replaces the committed snapshot in
//! one pointer swap, on error (or panic) it is dropped.
//!
//! Id counters live outside the state so ids handed out inside a rolled-back
//! transaction are never issued again.

use crate::deletion::{DeletionCoordinator, DeletionReport};
use crate::graph::{
    Edge, EdgeId, EdgeLabel, GraphError, GraphResult, GraphState, PropertyMap, Vertex, VertexId,
};
use crate::traversal::TraversalKind;
use parking_lot::{ReentrantMutex, RwLock};
use std::cell::Cell;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, debug_span, warn};

/// Monotonic id source for vertices and edges
#[derive(Debug)]
pub struct IdAllocator {
    next_vertex: AtomicU64,
    next_edge: AtomicU64,
}

impl IdAllocator {
    pub fn new() -> Self {
        IdAllocator {
            next_vertex: AtomicU64::new(1),
            next_edge: AtomicU64::new(1),
        }
    }

    /// Resume past every id already live in `state`
    pub fn starting_after(state: &GraphState) -> Self {
        let after = |max: Option<u64>| max.map_or(1, |id| id.saturating_add(1));
        IdAllocator {
            next_vertex: AtomicU64::new(after(state.max_vertex_id().map(|id| id.as_u64()))),
            next_edge: AtomicU64::new(after(state.max_edge_id().map(|id| id.as_u64()))),
        }
    }

    pub fn next_vertex(&self) -> VertexId {
        VertexId::new(self.next_vertex.fetch_add(1, Ordering::Relaxed))
    }

    pub fn next_edge(&self) -> EdgeId {
        EdgeId::new(self.next_edge.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

/// Owner of the committed graph and the writer lock
pub struct TransactionGuard {
    graph_name: String,
    committed: RwLock<Arc<GraphState>>,
    /// Held for the whole transaction; the flag detects nesting on the same thread
    writer: ReentrantMutex<Cell<bool>>,
    ids: IdAllocator,
    sequence: AtomicU64,
}

/// Clears the active flag however the body exits
struct ActiveFlag<'a>(&'a Cell<bool>);

impl Drop for ActiveFlag<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

impl TransactionGuard {
    /// Guard `state`; new ids continue after the largest ones it holds
    pub fn new(graph_name: impl Into<String>, state: GraphState) -> Self {
        TransactionGuard {
            graph_name: graph_name.into(),
            ids: IdAllocator::starting_after(&state),
            committed: RwLock::new(Arc::new(state)),
            writer: ReentrantMutex::new(Cell::new(false)),
            sequence: AtomicU64::new(0),
        }
    }

    pub fn graph_name(&self) -> &str {
        &self.graph_name
    }

    /// Last committed state. Never blocks on a running transaction.
    pub fn snapshot(&self) -> Arc<GraphState> {
        Arc::clone(&self.committed.read())
    }

    /// Run `body` as one atomic unit.
    ///
    /// If the body returns `Ok`, all of its mutations become visible at once.
    /// If it returns `Err`, every mutation is discarded and the error is
    /// returned unchanged. Calling `run` again from inside `body` fails with
    /// [`GraphError::TransactionActive`].
    pub fn run<T, E, F>(&self, body: F) -> Result<T, E>
    where
        F: FnOnce(&mut Transaction<'_>) -> Result<T, E>,
        E: From<GraphError>,
    {
        let lock = self.writer.lock();
        if lock.get() {
            return Err(GraphError::TransactionActive.into());
        }
        lock.set(true);
        let _active = ActiveFlag(&*lock);

        let seq = self.sequence.fetch_add(1, Ordering::Relaxed) + 1;
        let span = debug_span!("transaction", graph = %self.graph_name, seq);
        let _enter = span.enter();

        let base = self.snapshot();
        let mut tx = Transaction {
            state: Arc::clone(&base),
            ids: &self.ids,
        };

        match body(&mut tx) {
            Ok(value) => {
                if Arc::ptr_eq(&base, &tx.state) {
                    debug!("transaction committed without changes");
                } else {
                    *self.committed.write() = tx.state;
                    debug!("transaction committed");
                }
                Ok(value)
            }
            Err(err) => {
                warn!("transaction rolled back");
                Err(err)
            }
        }
    }
}

/// Handle passed to a transaction body
///
/// Reads see the transaction's own writes.
pub struct Transaction<'g> {
    state: Arc<GraphState>,
    ids: &'g IdAllocator,
}

impl Transaction<'_> {
    /// Current state, including this transaction's uncommitted writes
    pub fn state(&self) -> &GraphState {
        &self.state
    }

    pub(crate) fn state_mut(&mut self) -> &mut GraphState {
        Arc::make_mut(&mut self.state)
    }

    /// Create (`id = None`) or update a vertex; `Null` values remove keys
    pub fn upsert_vertex(
        &mut self,
        id: Option<VertexId>,
        attrs: &PropertyMap,
    ) -> GraphResult<VertexId> {
        if let Some(id) = id {
            if !self.state.has_vertex(id) {
                return Err(GraphError::VertexNotFound(id));
            }
        }
        let ids = self.ids;
        let id = self.state_mut().upsert_vertex(id, attrs, || ids.next_vertex())?;
        debug!(vertex = %id, keys = attrs.len(), "upserted vertex");
        Ok(id)
    }

    /// Create an edge `from -[label]-> to`
    pub fn add_edge(
        &mut self,
        label: impl Into<EdgeLabel>,
        from: VertexId,
        to: VertexId,
    ) -> GraphResult<EdgeId> {
        self.add_edge_with_properties(label, from, to, &PropertyMap::new())
    }

    /// Create an edge carrying properties
    pub fn add_edge_with_properties(
        &mut self,
        label: impl Into<EdgeLabel>,
        from: VertexId,
        to: VertexId,
        attrs: &PropertyMap,
    ) -> GraphResult<EdgeId> {
        if !self.state.has_vertex(from) {
            return Err(GraphError::VertexNotFound(from));
        }
        if !self.state.has_vertex(to) {
            return Err(GraphError::VertexNotFound(to));
        }
        let ids = self.ids;
        let id = self
            .state_mut()
            .add_edge(label, from, to, attrs, || ids.next_edge())?;
        debug!(edge = %id, from = %from, to = %to, "added edge");
        Ok(id)
    }

    /// Update an existing edge's property bag
    pub fn update_edge(&mut self, id: EdgeId, attrs: &PropertyMap) -> GraphResult<()> {
        if !self.state.has_edge(id) {
            return Err(GraphError::EdgeNotFound(id));
        }
        self.state_mut().update_edge(id, attrs)
    }

    /// Remove an edge. Idempotent: unknown ids return `None`.
    pub fn remove_edge(&mut self, id: EdgeId) -> Option<Edge> {
        if !self.state.has_edge(id) {
            return None;
        }
        DeletionCoordinator::new().delete_edge(self.state_mut(), id)
    }

    /// Remove a vertex and all of its edges
    pub fn delete_vertex(&mut self, id: VertexId) -> GraphResult<(Vertex, Vec<Edge>)> {
        if !self.state.has_vertex(id) {
            return Err(GraphError::VertexNotFound(id));
        }
        DeletionCoordinator::new().delete_vertex(self.state_mut(), id)
    }

    /// Remove what a traversal of `kind` from `id` would reach
    pub fn delete_related(
        &mut self,
        id: VertexId,
        kind: TraversalKind,
        label: Option<&str>,
    ) -> GraphResult<DeletionReport> {
        if !self.state.has_vertex(id) {
            return Err(GraphError::VertexNotFound(id));
        }
        DeletionCoordinator::new().delete_related(self.state_mut(), id, kind, label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::PropertyValue;

    fn attrs(pairs: &[(&str, PropertyValue)]) -> PropertyMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_commit_makes_writes_visible() {
        let guard = TransactionGuard::new("test", GraphState::new());
        let before = guard.snapshot();

        let id = guard
            .run(|tx| tx.upsert_vertex(None, &attrs(&[("name", "Alice".into())])))
            .unwrap();

        assert_eq!(before.vertex_count(), 0);
        let after = guard.snapshot();
        assert_eq!(after.get(id).unwrap().get("name").unwrap().as_string(), Some("Alice"));
    }

    #[test]
    fn test_error_rolls_back_everything() {
        let guard = TransactionGuard::new("test", GraphState::new());
        let seed = guard.run(|tx| tx.upsert_vertex(None, &PropertyMap::new())).unwrap();
        let before = guard.snapshot();

        let result: GraphResult<()> = guard.run(|tx| {
            let a = tx.upsert_vertex(None, &attrs(&[("n", 1i64.into())]))?;
            tx.upsert_vertex(Some(seed), &attrs(&[("n", 2i64.into())]))?;
            tx.add_edge("knows", seed, a)?;
            tx.upsert_vertex(Some(VertexId::new(999)), &PropertyMap::new())?;
            Ok(())
        });

        assert_eq!(result, Err(GraphError::VertexNotFound(VertexId::new(999))));
        let after = guard.snapshot();
        assert!(Arc::ptr_eq(&before, &after));
        assert_eq!(*before, *after);
    }

    #[test]
    fn test_reads_inside_transaction_see_own_writes() {
        let guard = TransactionGuard::new("test", GraphState::new());
        guard
            .run(|tx| {
                let id = tx.upsert_vertex(None, &attrs(&[("k", "v".into())]))?;
                assert!(tx.state().has_vertex(id));
                assert_eq!(guard.snapshot().vertex_count(), 0);
                Ok::<_, GraphError>(())
            })
            .unwrap();
        assert_eq!(guard.snapshot().vertex_count(), 1);
    }

    #[test]
    fn test_nested_transaction_rejected() {
        let guard = TransactionGuard::new("test", GraphState::new());
        let result: GraphResult<()> = guard.run(|tx| {
            tx.upsert_vertex(None, &PropertyMap::new())?;
            guard.run(|inner| inner.upsert_vertex(None, &PropertyMap::new()).map(|_| ()))
        });

        assert_eq!(result, Err(GraphError::TransactionActive));
        assert_eq!(guard.snapshot().vertex_count(), 0);

        // The guard is usable again afterwards
        guard.run(|tx| tx.upsert_vertex(None, &PropertyMap::new())).unwrap();
        assert_eq!(guard.snapshot().vertex_count(), 1);
    }

    #[test]
    fn test_rolled_back_ids_are_not_reused() {
        let guard = TransactionGuard::new("test", GraphState::new());
        let burned: Result<VertexId, GraphError> = guard.run(|tx| {
            let id = tx.upsert_vertex(None, &PropertyMap::new())?;
            Err(GraphError::VertexNotFound(id))
        });
        let burned = match burned {
            Err(GraphError::VertexNotFound(id)) => id,
            other => panic!("unexpected result: {:?}", other),
        };

        let fresh = guard.run(|tx| tx.upsert_vertex(None, &PropertyMap::new())).unwrap();
        assert_ne!(fresh, burned);
    }

    #[test]
    fn test_seeded_state_ids_are_not_reused() {
        let mut seeded = GraphState::new();
        let a = seeded
            .upsert_vertex(None, &attrs(&[("name", "old".into())]), || VertexId::new(1))
            .unwrap();
        let b = seeded
            .upsert_vertex(None, &PropertyMap::new(), || VertexId::new(2))
            .unwrap();
        let ab = seeded
            .add_edge("knows", a, b, &PropertyMap::new(), || EdgeId::new(7))
            .unwrap();

        let guard = TransactionGuard::new("seeded", seeded);
        let (fresh, edge) = guard
            .run(|tx| {
                let fresh = tx.upsert_vertex(None, &PropertyMap::new())?;
                let edge = tx.add_edge("knows", b, fresh)?;
                Ok::<_, GraphError>((fresh, edge))
            })
            .unwrap();

        assert_eq!(fresh, VertexId::new(3));
        assert_eq!(edge, EdgeId::new(8));
        let state = guard.snapshot();
        assert_eq!(state.vertex_count(), 3);
        assert_eq!(state.get(a).unwrap().get("name").unwrap().as_string(), Some("old"));
        assert_eq!(state.index().degree(fresh, crate::graph::Direction::Out), 0);
        assert_eq!(state.edge(ab).unwrap().source, a);
        assert!(state.is_consistent());
    }

    #[test]
    fn test_read_only_transaction_keeps_snapshot() {
        let guard = TransactionGuard::new("test", GraphState::new());
        let before = guard.snapshot();
        let count = guard
            .run(|tx| Ok::<_, GraphError>(tx.state().vertex_count()))
            .unwrap();
        assert_eq!(count, 0);
        assert!(Arc::ptr_eq(&before, &guard.snapshot()));
    }

    #[test]
    fn test_panic_in_body_leaves_state_untouched() {
        let guard = TransactionGuard::new("test", GraphState::new());
        let before = guard.snapshot();

        let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _: GraphResult<()> = guard.run(|tx| {
                tx.upsert_vertex(None, &PropertyMap::new())?;
                panic!("boom");
            });
        }));

        assert!(outcome.is_err());
        assert!(Arc::ptr_eq(&before, &guard.snapshot()));
        guard.run(|tx| tx.upsert_vertex(None, &PropertyMap::new())).unwrap();
    }
}
