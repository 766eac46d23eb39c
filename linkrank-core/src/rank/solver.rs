//! PageRank Solver
//!
//! Power iteration over the right-stochastic transition matrix of the link
//! graph. A node with out-degree `d` sends `1/d` of its mass along each
//! outlink; links carry no weight.
//!
//! # Algorithm
//!
//! ```text
//! x <- start vector (uniform unless nstart is given)
//! repeat up to max_iter times:
//!     x_prev <- x; x <- 0
//!     dangle <- alpha * sum of x_prev over dangling nodes
//!     for each node n:
//!         for each successor s of n: x[s] += alpha * x_prev[n] / outdeg(n)
//!         x[n] += dangle * dangling[n] + (1 - alpha) * personalization[n]
//!     if |x - x_prev|_1 < N * tol: converged
//! ```
//!
//! Dangling nodes do not leak mass: what they hold is handed back through
//! the dangling distribution, so every iterate stays a probability
//! distribution.
//!
//! The store is flattened into an index-based topology once per solve so the
//! inner loop only touches vectors.

use indexmap::IndexMap;
use tracing::{debug, warn};

use super::config::{Distribution, RankConfig};
use crate::error::{DistributionKind, GraphError, Result};
use crate::graph::{GraphStore, NodeId};

/// Scores produced by one solve, in node enumeration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RankVector {
    scores: IndexMap<NodeId, f64>,
    iterations: usize,
}

impl RankVector {
    /// The vector of an empty graph.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Score of a node, if it was part of the solve.
    pub fn get(&self, id: &str) -> Option<f64> {
        self.scores.get(id).copied()
    }

    /// Score of a node, zero for nodes outside the graph.
    pub fn score(&self, id: &str) -> f64 {
        self.get(id).unwrap_or(0.0)
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&NodeId, f64)> {
        self.scores.iter().map(|(id, score)| (id, *score))
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Sum of all scores. Close to 1.0 for a converged solve.
    pub fn total(&self) -> f64 {
        self.scores.values().sum()
    }

    /// Number of power iterations the solve took.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    pub fn into_map(self) -> IndexMap<NodeId, f64> {
        self.scores
    }
}

/// Flattened structure of the graph for one solve.
struct Topology {
    /// Successor indices per node.
    successors: Vec<Vec<usize>>,

    /// Indices of nodes with no outlinks.
    dangling: Vec<usize>,
}

impl Topology {
    fn build(store: &GraphStore) -> Self {
        let successors: Vec<Vec<usize>> = store
            .iter()
            .map(|(_, adj)| {
                adj.successors()
                    .iter()
                    .filter_map(|target| store.index_of(target.as_str()))
                    .collect()
            })
            .collect();

        let dangling = successors
            .iter()
            .enumerate()
            .filter(|(_, succ)| succ.is_empty())
            .map(|(i, _)| i)
            .collect();

        Self {
            successors,
            dangling,
        }
    }
}

/// Runs PageRank with a fixed configuration.
#[derive(Debug, Clone, Default)]
pub struct RankSolver {
    config: RankConfig,
}

impl RankSolver {
    pub fn new(config: RankConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RankConfig {
        &self.config
    }

    /// Compute PageRank over every node of `store`.
    pub fn solve(&self, store: &GraphStore) -> Result<RankVector> {
        let n = store.node_count();
        if n == 0 {
            return Ok(RankVector::empty());
        }

        let config = &self.config;
        config.validate()?;

        let uniform = 1.0 / n as f64;
        let personalization = resolve(
            store,
            config.personalization.as_ref(),
            DistributionKind::Personalization,
        )?
        .unwrap_or_else(|| vec![uniform; n]);
        let dangling_weights = resolve(store, config.dangling.as_ref(), DistributionKind::Dangling)?
            .unwrap_or_else(|| personalization.clone());
        let mut x = resolve(store, config.nstart.as_ref(), DistributionKind::Start)?
            .unwrap_or_else(|| vec![uniform; n]);

        let topology = Topology::build(store);
        let alpha = config.alpha;
        let threshold = n as f64 * config.tol;
        let mut next = vec![0.0; n];

        debug!(
            nodes = n,
            dangling = topology.dangling.len(),
            alpha,
            max_iter = config.max_iter,
            "starting pagerank"
        );

        for iteration in 1..=config.max_iter {
            next.fill(0.0);
            let dangle_sum = alpha * topology.dangling.iter().map(|&i| x[i]).sum::<f64>();

            for (i, successors) in topology.successors.iter().enumerate() {
                if !successors.is_empty() {
                    let share = alpha * x[i] / successors.len() as f64;
                    for &s in successors {
                        next[s] += share;
                    }
                }
                next[i] += dangle_sum * dangling_weights[i] + (1.0 - alpha) * personalization[i];
            }

            let err: f64 = next.iter().zip(&x).map(|(a, b)| (a - b).abs()).sum();
            std::mem::swap(&mut x, &mut next);

            if err < threshold {
                debug!(iterations = iteration, err, "pagerank converged");
                let scores = store.nodes().cloned().zip(x).collect();
                return Ok(RankVector {
                    scores,
                    iterations: iteration,
                });
            }
        }

        warn!(max_iter = config.max_iter, "pagerank failed to converge");
        Err(GraphError::Convergence {
            max_iter: config.max_iter,
        })
    }
}

/// Align a supplied distribution with the node order and normalize it.
///
/// Entries for nodes outside the graph are ignored.
fn resolve(
    store: &GraphStore,
    supplied: Option<&Distribution>,
    kind: DistributionKind,
) -> Result<Option<Vec<f64>>> {
    let Some(supplied) = supplied else {
        return Ok(None);
    };

    let mut missing: Vec<String> = store
        .nodes()
        .filter(|id| !supplied.contains_key(id.as_str()))
        .map(|id| id.to_string())
        .collect();
    if !missing.is_empty() {
        missing.sort();
        return Err(GraphError::IncompleteDistribution { kind, missing });
    }

    let values: Vec<f64> = store
        .nodes()
        .map(|id| supplied.get(id.as_str()).copied().unwrap_or(0.0))
        .collect();
    if values.iter().any(|v| !v.is_finite() || *v < 0.0) {
        return Err(GraphError::DegenerateDistribution { kind });
    }

    let total: f64 = values.iter().sum();
    if !total.is_finite() || total <= 0.0 {
        return Err(GraphError::DegenerateDistribution { kind });
    }

    Ok(Some(values.into_iter().map(|v| v / total).collect()))
}
