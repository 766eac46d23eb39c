//! Graph Store
//!
//! The store owns the node set and the per-node adjacency. It has no
//! algorithm of its own: the mutator decides which edges change and the
//! solver reads the structure.
//!
//! Nodes are enumerated in insertion order until one is removed: removal
//! moves the last node into the freed slot, so deleting a node costs O(1)
//! plus its degree. Enumeration is still deterministic for a given history
//! of mutations, and it cannot change during a solve, which holds the graph
//! read lock.

use indexmap::IndexMap;

use super::node::{Adjacency, NodeId};
use crate::error::{GraphError, Result};

/// Directed link graph with synced successor and predecessor sets.
#[derive(Debug, Clone, Default)]
pub struct GraphStore {
    /// All nodes in the graph with their neighbours.
    nodes: IndexMap<NodeId, Adjacency>,

    /// Number of edges, kept alongside the adjacency.
    edge_count: usize,
}

impl GraphStore {
    /// Create a new empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node. Returns `false` if it was already present.
    pub fn add_node(&mut self, id: impl Into<NodeId>) -> bool {
        let id = id.into();
        if self.nodes.contains_key(&id) {
            return false;
        }
        self.nodes.insert(id, Adjacency::new());
        true
    }

    /// Add the edge `from -> to`, creating either endpoint if needed.
    ///
    /// Returns `false` if the edge already existed.
    pub fn add_edge(&mut self, from: impl Into<NodeId>, to: impl Into<NodeId>) -> bool {
        let from = from.into();
        let to = to.into();

        self.add_node(from.clone());
        self.add_node(to.clone());

        let added = match self.nodes.get_mut(&from) {
            Some(adj) => adj.add_successor(to.clone()),
            None => false,
        };
        if added {
            if let Some(adj) = self.nodes.get_mut(&to) {
                adj.add_predecessor(from);
            }
            self.edge_count += 1;
        }
        added
    }

    /// Remove the edge `from -> to`. Missing edges are ignored.
    ///
    /// Returns whether an edge was removed.
    pub fn remove_edge(&mut self, from: &str, to: &str) -> bool {
        let removed = match self.nodes.get_mut(from) {
            Some(adj) => adj.remove_successor(to),
            None => false,
        };
        if removed {
            if let Some(adj) = self.nodes.get_mut(to) {
                adj.remove_predecessor(from);
            }
            self.edge_count -= 1;
        }
        removed
    }

    /// Remove the edge `from -> to`, failing if it does not exist.
    pub fn remove_edge_strict(&mut self, from: &str, to: &str) -> Result<()> {
        if self.remove_edge(from, to) {
            Ok(())
        } else {
            Err(GraphError::EdgeNotFound {
                from: from.to_string(),
                to: to.to_string(),
            })
        }
    }

    /// Remove a node from the graph.
    ///
    /// Also removes all edges involving this node, in both directions.
    /// Returns the number of edges removed, or `None` if the node was absent.
    pub fn remove_node(&mut self, id: &str) -> Option<usize> {
        let adj = self.nodes.swap_remove(id)?;
        let mut removed = 0;

        // Drop this node from its successors' predecessor sets
        for target in adj.successors() {
            if let Some(target_adj) = self.nodes.get_mut(target) {
                target_adj.remove_predecessor(id);
            }
            removed += 1;
        }

        // Drop this node from its predecessors' successor sets.
        // A self-loop was already counted above.
        for source in adj.predecessors() {
            if source.as_str() == id {
                continue;
            }
            if let Some(source_adj) = self.nodes.get_mut(source) {
                source_adj.remove_successor(id);
            }
            removed += 1;
        }

        self.edge_count -= removed;
        Some(removed)
    }

    /// Check whether a node is present.
    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// Check whether the edge `from -> to` is present.
    pub fn has_edge(&self, from: &str, to: &str) -> bool {
        self.nodes
            .get(from)
            .map(|adj| adj.successors().contains(to))
            .unwrap_or(false)
    }

    /// Get the adjacency of a node.
    pub fn get(&self, id: &str) -> Option<&Adjacency> {
        self.nodes.get(id)
    }

    /// Targets of the outlinks of `id`. Empty if the node is unknown.
    pub fn successors<'a>(&'a self, id: &str) -> impl Iterator<Item = &'a NodeId> + 'a {
        self.nodes
            .get(id)
            .into_iter()
            .flat_map(|adj| adj.successors().iter())
    }

    /// Sources of the links pointing at `id`. Empty if the node is unknown.
    pub fn predecessors<'a>(&'a self, id: &str) -> impl Iterator<Item = &'a NodeId> + 'a {
        self.nodes
            .get(id)
            .into_iter()
            .flat_map(|adj| adj.predecessors().iter())
    }

    /// Out-degree of a node, zero if unknown.
    pub fn out_degree(&self, id: &str) -> usize {
        self.nodes.get(id).map(Adjacency::out_degree).unwrap_or(0)
    }

    /// In-degree of a node, zero if unknown.
    pub fn in_degree(&self, id: &str) -> usize {
        self.nodes.get(id).map(Adjacency::in_degree).unwrap_or(0)
    }

    /// All node IDs in enumeration order.
    pub fn nodes(&self) -> impl ExactSizeIterator<Item = &NodeId> {
        self.nodes.keys()
    }

    /// Nodes with their adjacency, in enumeration order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&NodeId, &Adjacency)> {
        self.nodes.iter()
    }

    /// Position of a node in the enumeration order.
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.nodes.get_index_of(id)
    }

    /// Get the total number of nodes in the graph.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Get the total number of edges in the graph.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Remove every node and edge.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.edge_count = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn successor_set(store: &GraphStore, id: &str) -> HashSet<String> {
        store.successors(id).map(|n| n.to_string()).collect()
    }

    fn predecessor_set(store: &GraphStore, id: &str) -> HashSet<String> {
        store.predecessors(id).map(|n| n.to_string()).collect()
    }

    fn set(ids: &[&str]) -> HashSet<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn add_node_is_idempotent() {
        let mut store = GraphStore::new();
        assert!(store.add_node("a"));
        assert!(!store.add_node("a"));
        assert_eq!(store.node_count(), 1);
    }

    #[test]
    fn add_edge_creates_endpoints() {
        let mut store = GraphStore::new();
        assert!(store.add_edge("a", "b"));
        assert!(!store.add_edge("a", "b"));

        assert_eq!(store.node_count(), 2);
        assert_eq!(store.edge_count(), 1);
        assert!(store.has_edge("a", "b"));
        assert!(!store.has_edge("b", "a"));
        assert_eq!(successor_set(&store, "a"), set(&["b"]));
        assert_eq!(predecessor_set(&store, "b"), set(&["a"]));
    }

    #[test]
    fn remove_edge_keeps_both_directions_in_sync() {
        let mut store = GraphStore::new();
        store.add_edge("a", "b");
        store.add_edge("a", "c");

        assert!(store.remove_edge("a", "b"));
        assert!(!store.remove_edge("a", "b"));

        assert_eq!(successor_set(&store, "a"), set(&["c"]));
        assert!(predecessor_set(&store, "b").is_empty());
        assert_eq!(store.edge_count(), 1);
        // Endpoints survive edge removal
        assert!(store.contains("b"));
    }

    #[test]
    fn strict_removal_reports_missing_edge() {
        let mut store = GraphStore::new();
        store.add_edge("a", "b");

        assert!(store.remove_edge_strict("a", "b").is_ok());
        let err = store.remove_edge_strict("a", "b").unwrap_err();
        assert!(matches!(
            err,
            GraphError::EdgeNotFound { ref from, ref to } if from == "a" && to == "b"
        ));
    }

    #[test]
    fn remove_node_drops_incident_edges() {
        let mut store = GraphStore::new();
        store.add_edge("a", "x");
        store.add_edge("x", "b");
        store.add_edge("c", "x");
        store.add_edge("a", "b");

        assert_eq!(store.remove_node("x"), Some(3));
        assert_eq!(store.remove_node("x"), None);

        assert!(!store.contains("x"));
        assert_eq!(store.node_count(), 3);
        assert_eq!(store.edge_count(), 1);
        assert_eq!(successor_set(&store, "a"), set(&["b"]));
        assert!(successor_set(&store, "c").is_empty());
        assert_eq!(predecessor_set(&store, "b"), set(&["a"]));
    }

    #[test]
    fn self_loops_are_plain_edges() {
        let mut store = GraphStore::new();
        assert!(store.add_edge("a", "a"));
        assert_eq!(store.out_degree("a"), 1);
        assert_eq!(store.in_degree("a"), 1);

        assert_eq!(store.remove_node("a"), Some(1));
        assert_eq!(store.edge_count(), 0);
    }

    #[test]
    fn unknown_nodes_have_no_neighbours() {
        let store = GraphStore::new();
        assert_eq!(store.successors("ghost").count(), 0);
        assert_eq!(store.predecessors("ghost").count(), 0);
        assert_eq!(store.out_degree("ghost"), 0);
    }

    #[test]
    fn removal_moves_last_node_into_the_gap() {
        let mut store = GraphStore::new();
        store.add_edge("c", "a");
        store.add_node("b");
        store.remove_node("c");
        store.add_node("d");

        let order: Vec<&str> = store.nodes().map(NodeId::as_str).collect();
        assert_eq!(order, vec!["b", "a", "d"]);
        assert_eq!(store.index_of("d"), Some(2));
    }

    #[test]
    fn mass_removal_keeps_adjacency_consistent() {
        let mut store = GraphStore::new();
        for i in 0..200 {
            store.add_edge(format!("n{i}"), format!("n{}", (i + 1) % 200));
            store.add_edge(format!("n{i}"), format!("n{}", (i * 3) % 200));
        }
        for i in (0..200).step_by(2) {
            store.remove_node(&format!("n{i}"));
        }

        assert_eq!(store.node_count(), 100);
        let mut edges = 0;
        for (id, adj) in store.iter() {
            for target in adj.successors() {
                assert!(store.get(target.as_str()).unwrap().predecessors().contains(id));
                edges += 1;
            }
            for source in adj.predecessors() {
                assert!(store.has_edge(source.as_str(), id.as_str()));
            }
        }
        assert_eq!(edges, store.edge_count());
    }
}
