//! Graph Nodes
//!
//! This module defines the node identifier and the per-node adjacency that
//! live in the link graph.

use std::borrow::Borrow;
use std::fmt;

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// Identifier of a document in the link graph.
///
/// In practice this is a URL, but the engine treats it as an opaque key and
/// never parses it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    /// Create a node ID from anything string-like.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the ID and return the owned string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl Borrow<str> for NodeId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for NodeId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for NodeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&String> for NodeId {
    fn from(id: &String) -> Self {
        Self(id.clone())
    }
}

impl From<&NodeId> for NodeId {
    fn from(id: &NodeId) -> Self {
        id.clone()
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Outgoing and incoming neighbours of one node.
///
/// The store keeps the two sets of every node in sync: `v` is in the
/// successors of `u` exactly when `u` is in the predecessors of `v`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Adjacency {
    /// Targets of this node's outlinks.
    successors: IndexSet<NodeId>,

    /// Sources of the links pointing at this node.
    predecessors: IndexSet<NodeId>,
}

impl Adjacency {
    /// Create an adjacency with no neighbours.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all successors.
    pub fn successors(&self) -> &IndexSet<NodeId> {
        &self.successors
    }

    /// Get all predecessors.
    pub fn predecessors(&self) -> &IndexSet<NodeId> {
        &self.predecessors
    }

    /// Number of outlinks. Zero means the node is dangling.
    pub fn out_degree(&self) -> usize {
        self.successors.len()
    }

    /// Number of inlinks.
    pub fn in_degree(&self) -> usize {
        self.predecessors.len()
    }

    pub(crate) fn add_successor(&mut self, id: NodeId) -> bool {
        self.successors.insert(id)
    }

    pub(crate) fn remove_successor(&mut self, id: &str) -> bool {
        self.successors.swap_remove(id)
    }

    pub(crate) fn add_predecessor(&mut self, id: NodeId) -> bool {
        self.predecessors.insert(id)
    }

    pub(crate) fn remove_predecessor(&mut self, id: &str) -> bool {
        self.predecessors.swap_remove(id)
    }
}
