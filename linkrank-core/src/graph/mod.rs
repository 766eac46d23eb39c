//! Link Graph
//!
//! This module implements the directed graph of hyperlinked documents and
//! the mutation protocol that keeps it in step with crawl data.
//!
//! # Overview
//!
//! - Nodes are documents, identified by an opaque string (usually a URL).
//! - An edge `u -> v` means document `u` links to document `v`. Edges carry
//!   no weight and appear at most once; self-links are allowed.
//!
//! # Design Decisions
//!
//! 1. Each node stores both its successors and its predecessors, updated
//!    together, so deleting a node can unhook every incident edge without
//!    scanning the graph.
//!
//! 2. Nodes live in an index map, which gives the solver a stable
//!    enumeration to index against. Removal swaps the last node into the
//!    gap instead of shifting the tail.
//!
//! 3. Edges never dangle: adding an edge adds its endpoints and removing a
//!    node removes its edges.

mod mutator;
mod node;
mod store;

pub use mutator::{MutationStats, Mutator, OutlinkBatch};
pub use node::{Adjacency, NodeId};
pub use store::GraphStore;
