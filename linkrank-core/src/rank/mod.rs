//! PageRank
//!
//! Ranking is read-only: [`RankSolver`] runs power iteration over a
//! [`GraphStore`](crate::graph::GraphStore) and [`RankingService`] turns the
//! resulting scores into an ordered answer for the requested documents.
//!
//! A failed solve (no convergence, bad distribution) is reported to the
//! caller as an error and leaves the graph untouched. Retrying with other
//! parameters is up to the caller.

mod config;
mod service;
mod solver;

pub use config::{Distribution, RankConfig};
pub use service::{RankedNode, Ranking, RankingService};
pub use solver::{RankSolver, RankVector};
