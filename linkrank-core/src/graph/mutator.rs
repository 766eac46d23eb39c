//! Graph Mutator
//!
//! Applies crawl updates to a [`GraphStore`].
//!
//! # Insert
//!
//! An insert batch maps each source document to its *complete* current list
//! of outlinks. For every entry, in the order supplied:
//!
//! 1. If the source is new, add it.
//! 2. Otherwise prune every existing outlink that is missing from the new list.
//! 3. Add each listed target (creating it if needed) and the edge to it.
//!
//! The list is authoritative, not a delta: a caller that sends a partial list
//! loses the edges it left out. A document that is never re-sent as a source
//! keeps its last known outlinks.
//!
//! # Delete
//!
//! A delete batch lists documents to purge. Each one present loses all its
//! incident edges and is removed. Unknown IDs are ignored, so deletions are
//! independent of each other and of their order.

use std::collections::HashSet;

use indexmap::IndexMap;
use serde::Serialize;

use super::node::NodeId;
use super::store::GraphStore;

/// Source document to its full current outlink list, in application order.
pub type OutlinkBatch = IndexMap<NodeId, Vec<NodeId>>;

/// Counts of what a mutation changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MutationStats {
    pub nodes_added: usize,
    pub edges_added: usize,
    /// Outlinks dropped because the source no longer lists them.
    pub edges_pruned: usize,
    pub nodes_removed: usize,
    /// Edges dropped together with a removed node.
    pub edges_removed: usize,
}

impl MutationStats {
    /// True if the mutation left the graph unchanged.
    pub fn is_noop(&self) -> bool {
        *self == Self::default()
    }
}

/// Applies insert and delete batches to a borrowed store.
pub struct Mutator<'g> {
    store: &'g mut GraphStore,
}

impl<'g> Mutator<'g> {
    pub fn new(store: &'g mut GraphStore) -> Self {
        Self { store }
    }

    /// Reconcile the graph with a batch of complete outlink lists.
    pub fn insert(&mut self, batch: &OutlinkBatch) -> MutationStats {
        let mut stats = MutationStats::default();

        for (source, outlinks) in batch {
            if self.store.add_node(source.clone()) {
                stats.nodes_added += 1;
            } else {
                stats.edges_pruned += self.prune_stale(source, outlinks);
            }

            for target in outlinks {
                if self.store.add_node(target.clone()) {
                    stats.nodes_added += 1;
                }
                if self.store.add_edge(source.clone(), target.clone()) {
                    stats.edges_added += 1;
                }
            }
        }

        stats
    }

    /// Purge the listed documents and their incident edges.
    pub fn delete<I, S>(&mut self, ids: I) -> MutationStats
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut stats = MutationStats::default();

        for id in ids {
            if let Some(edges) = self.store.remove_node(id.as_ref()) {
                stats.nodes_removed += 1;
                stats.edges_removed += edges;
            }
        }

        stats
    }

    /// Drop outlinks of `source` that are not in `outlinks`.
    fn prune_stale(&mut self, source: &NodeId, outlinks: &[NodeId]) -> usize {
        let keep: HashSet<&str> = outlinks.iter().map(NodeId::as_str).collect();

        // Collect first: removal edits the set we would be iterating
        let stale: Vec<NodeId> = self
            .store
            .successors(source.as_str())
            .filter(|target| !keep.contains(target.as_str()))
            .cloned()
            .collect();

        for target in &stale {
            self.store.remove_edge(source.as_str(), target.as_str());
        }
        stale.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn batch(entries: &[(&str, &[&str])]) -> OutlinkBatch {
        entries
            .iter()
            .map(|(source, targets)| {
                (
                    NodeId::from(*source),
                    targets.iter().map(|t| NodeId::from(*t)).collect(),
                )
            })
            .collect()
    }

    fn successors(store: &GraphStore, id: &str) -> HashSet<String> {
        store.successors(id).map(|n| n.to_string()).collect()
    }

    fn set(ids: &[&str]) -> HashSet<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn insert_builds_graph() {
        let mut store = GraphStore::new();
        let stats = Mutator::new(&mut store).insert(&batch(&[("A", &["B", "C"]), ("B", &["A"])]));

        assert_eq!(store.node_count(), 3);
        assert_eq!(successors(&store, "A"), set(&["B", "C"]));
        assert_eq!(
            store.predecessors("A").map(|n| n.to_string()).collect::<HashSet<_>>(),
            set(&["B"])
        );
        assert_eq!(stats.nodes_added, 3);
        assert_eq!(stats.edges_added, 3);
        assert_eq!(stats.edges_pruned, 0);
    }

    #[test]
    fn insert_twice_is_idempotent() {
        let mut store = GraphStore::new();
        let input = batch(&[("A", &["B", "C"]), ("B", &["A"])]);

        Mutator::new(&mut store).insert(&input);
        let edges = store.edge_count();
        let second = Mutator::new(&mut store).insert(&input);

        assert!(second.is_noop());
        assert_eq!(store.node_count(), 3);
        assert_eq!(store.edge_count(), edges);
    }

    #[test]
    fn reinsert_prunes_stale_outlinks() {
        let mut store = GraphStore::new();
        Mutator::new(&mut store).insert(&batch(&[("S", &["A", "B"])]));
        let stats = Mutator::new(&mut store).insert(&batch(&[("S", &["B", "C"])]));

        assert_eq!(successors(&store, "S"), set(&["B", "C"]));
        assert_eq!(stats.edges_pruned, 1);
        assert_eq!(stats.edges_added, 1);
        // The pruned target stays as a node
        assert!(store.contains("A"));
    }

    #[test]
    fn sources_not_resent_keep_their_edges() {
        let mut store = GraphStore::new();
        Mutator::new(&mut store).insert(&batch(&[("A", &["B"]), ("C", &["B"])]));
        Mutator::new(&mut store).insert(&batch(&[("A", &[])]));

        assert!(successors(&store, "A").is_empty());
        assert_eq!(successors(&store, "C"), set(&["B"]));
    }

    #[test]
    fn duplicate_outlinks_collapse() {
        let mut store = GraphStore::new();
        let stats = Mutator::new(&mut store).insert(&batch(&[("A", &["B", "B"])]));
        assert_eq!(stats.edges_added, 1);
        assert_eq!(store.edge_count(), 1);
    }

    #[test]
    fn delete_removes_node_and_edges() {
        let mut store = GraphStore::new();
        Mutator::new(&mut store).insert(&batch(&[("A", &["X"]), ("X", &["B"])]));

        let stats = Mutator::new(&mut store).delete(["X", "ghost"]);

        assert_eq!(stats.nodes_removed, 1);
        assert_eq!(stats.edges_removed, 2);
        assert!(!store.contains("X"));
        assert!(successors(&store, "A").is_empty());
        assert_eq!(store.in_degree("B"), 0);
    }

    #[test]
    fn delete_of_absent_node_is_noop() {
        let mut store = GraphStore::new();
        Mutator::new(&mut store).insert(&batch(&[("A", &["B"])]));
        let stats = Mutator::new(&mut store).delete(vec!["Z".to_string()]);

        assert!(stats.is_noop());
        assert_eq!(store.node_count(), 2);
        assert_eq!(store.edge_count(), 1);
    }

    #[test]
    fn delete_order_does_not_matter() {
        let input = batch(&[("A", &["X", "Y"]), ("X", &["Y", "B"]), ("Y", &["A"])]);

        let mut forward = GraphStore::new();
        Mutator::new(&mut forward).insert(&input);
        Mutator::new(&mut forward).delete(["X", "Y"]);

        let mut backward = GraphStore::new();
        Mutator::new(&mut backward).insert(&input);
        Mutator::new(&mut backward).delete(["Y", "X"]);

        let nodes = |s: &GraphStore| s.nodes().map(|n| n.to_string()).collect::<HashSet<_>>();
        assert_eq!(nodes(&forward), nodes(&backward));
        assert_eq!(forward.edge_count(), backward.edge_count());
        assert_eq!(forward.edge_count(), 0);
    }
}
