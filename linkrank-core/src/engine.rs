//! Shared Link Graph
//!
//! [`LinkGraph`] is the single graph instance of a running service. It is
//! created empty by the service layer and handed to whoever needs it; clones
//! share the same store.
//!
//! # Locking
//!
//! The store sits behind a `parking_lot` read/write lock. Mutation batches
//! take the write lock for their whole duration, and a PageRank solve holds
//! the read lock from the first iteration to the last, so a solve never
//! observes a half-applied batch. The lock is fair: once a writer is queued,
//! new readers wait behind it, so a stream of rank requests cannot starve
//! mutations.

use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard};
use tracing::info;

use crate::graph::{GraphStore, MutationStats, Mutator, OutlinkBatch};

/// Cloneable handle to the process-wide link graph.
#[derive(Debug, Clone, Default)]
pub struct LinkGraph {
    store: Arc<RwLock<GraphStore>>,
}

impl LinkGraph {
    /// Create a handle to a new empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing store.
    pub fn from_store(store: GraphStore) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
        }
    }

    /// Reconcile the graph with complete outlink lists.
    ///
    /// See [`Mutator::insert`] for the pruning rules.
    pub fn insert(&self, batch: &OutlinkBatch) -> MutationStats {
        let stats = {
            let mut store = self.store.write();
            Mutator::new(&mut store).insert(batch)
        };

        info!(
            sources = batch.len(),
            nodes_added = stats.nodes_added,
            edges_added = stats.edges_added,
            edges_pruned = stats.edges_pruned,
            "inserted outlinks into link graph"
        );
        stats
    }

    /// Purge documents and their incident edges. Unknown IDs are ignored.
    pub fn delete<I, S>(&self, ids: I) -> MutationStats
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let stats = {
            let mut store = self.store.write();
            Mutator::new(&mut store).delete(ids)
        };

        info!(
            nodes_removed = stats.nodes_removed,
            edges_removed = stats.edges_removed,
            "removed documents from link graph"
        );
        stats
    }

    /// Lock the graph for reading.
    ///
    /// Mutations block until the guard is dropped.
    pub fn read(&self) -> RwLockReadGuard<'_, GraphStore> {
        self.store.read()
    }

    /// Copy of the current graph.
    pub fn snapshot(&self) -> GraphStore {
        self.store.read().clone()
    }

    pub fn node_count(&self) -> usize {
        self.store.read().node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.store.read().edge_count()
    }
}
