//! LinkRank Core
//!
//! This crate keeps an in-memory graph of hyperlinked documents in step with
//! crawl data and ranks its documents with PageRank. It implements:
//!
//! - The link graph and its insert/delete reconciliation protocol
//! - A PageRank power-iteration solver with personalization and dangling
//!   node redistribution
//! - A ranking service that scores a requested subset of documents
//! - An async service boundary and request codecs for a transport layer
//!
//! The crate is designed to be used both as a native Rust library and, with
//! the `python` feature, as a Python extension module via PyO3.
//!
//! # Architecture
//!
//! - `graph`: node identifiers, adjacency store and the mutator
//! - `rank`: solver configuration, power iteration and the ranking service
//! - `engine`: the shared, lock-guarded graph handle
//! - `server`: async front end with request timeouts
//! - `codec`: JSON and MessagePack request bodies
//! - `config`: service configuration
//!
//! # Example
//!
//! ```rust
//! use linkrank_core::graph::{NodeId, OutlinkBatch};
//! use linkrank_core::rank::{RankConfig, RankingService};
//! use linkrank_core::LinkGraph;
//!
//! let graph = LinkGraph::new();
//! let mut batch = OutlinkBatch::new();
//! batch.insert(NodeId::from("A"), vec![NodeId::from("B"), NodeId::from("C")]);
//! batch.insert(NodeId::from("B"), vec![NodeId::from("A")]);
//! graph.insert(&batch);
//!
//! let service = RankingService::new(graph.clone(), RankConfig::default());
//! let ranking = service.rank(&["A", "B", "C"]).unwrap();
//! assert_eq!(ranking.first().unwrap().id.as_str(), "A");
//! ```

pub mod codec;
pub mod config;
pub mod engine;
pub mod error;
pub mod graph;
pub mod rank;
pub mod server;

#[cfg(feature = "python")]
mod python;

pub use config::EngineConfig;
pub use engine::LinkGraph;
pub use error::{DistributionKind, GraphError, Result};
pub use server::RankServer;

#[cfg(feature = "python")]
use pyo3::prelude::*;

/// Python module definition.
///
/// This function is called by Python when importing the module.
/// It registers all Python-exposed types.
#[cfg(feature = "python")]
#[pymodule]
fn _core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<python::PyLinkGraph>()?;

    // Add version info
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;

    Ok(())
}
