//! Ranking Service
//!
//! Answers rank requests: solve PageRank over the whole graph, keep the
//! requested documents, and order them by score. Documents that are not in
//! the graph are reported with a score of zero.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::config::RankConfig;
use super::solver::{RankSolver, RankVector};
use crate::engine::LinkGraph;
use crate::error::Result;
use crate::graph::NodeId;

/// One entry of a ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedNode {
    pub id: NodeId,
    pub score: f64,
}

/// Requested documents ordered by descending score.
///
/// Equal scores keep the order in which the documents were requested.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ranking(Vec<RankedNode>);

impl Ranking {
    /// Project a rank vector onto `requested` and sort it.
    ///
    /// A repeated ID is reported once, at its first position.
    pub fn project<I, S>(ranks: &RankVector, requested: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<NodeId>,
    {
        let mut scores: IndexMap<NodeId, f64> = IndexMap::new();
        for id in requested {
            let id = id.into();
            if !scores.contains_key(&id) {
                let score = ranks.score(id.as_str());
                scores.insert(id, score);
            }
        }

        let mut entries: Vec<RankedNode> = scores
            .into_iter()
            .map(|(id, score)| RankedNode { id, score })
            .collect();
        // Stable: ties stay in request order
        entries.sort_by(|a, b| b.score.total_cmp(&a.score));
        Self(entries)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RankedNode> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Highest-ranked entry.
    pub fn first(&self) -> Option<&RankedNode> {
        self.0.first()
    }

    /// Score of a listed document.
    pub fn score_of(&self, id: &str) -> Option<f64> {
        self.0
            .iter()
            .find(|entry| entry.id.as_str() == id)
            .map(|entry| entry.score)
    }

    /// IDs in rank order.
    pub fn ids(&self) -> Vec<&str> {
        self.0.iter().map(|entry| entry.id.as_str()).collect()
    }

    pub fn into_pairs(self) -> Vec<(NodeId, f64)> {
        self.0
            .into_iter()
            .map(|entry| (entry.id, entry.score))
            .collect()
    }
}

impl IntoIterator for Ranking {
    type Item = RankedNode;
    type IntoIter = std::vec::IntoIter<RankedNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Ranking {
    type Item = &'a RankedNode;
    type IntoIter = std::slice::Iter<'a, RankedNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Ranks documents of a shared link graph.
#[derive(Debug, Clone)]
pub struct RankingService {
    graph: LinkGraph,
    solver: RankSolver,
}

impl RankingService {
    /// Create a service over `graph` with the given default parameters.
    pub fn new(graph: LinkGraph, config: RankConfig) -> Self {
        Self {
            graph,
            solver: RankSolver::new(config),
        }
    }

    pub fn graph(&self) -> &LinkGraph {
        &self.graph
    }

    pub fn config(&self) -> &RankConfig {
        self.solver.config()
    }

    /// Rank the listed documents.
    pub fn rank<S: AsRef<str>>(&self, requested: &[S]) -> Result<Ranking> {
        self.run(&self.solver, Some(requested))
    }

    /// Rank every document currently in the graph.
    pub fn rank_all(&self) -> Result<Ranking> {
        self.run::<&str>(&self.solver, None)
    }

    /// Rank the listed documents with one-off parameters.
    pub fn rank_with<S: AsRef<str>>(&self, config: RankConfig, requested: &[S]) -> Result<Ranking> {
        self.run(&RankSolver::new(config), Some(requested))
    }

    /// Rank every document with one-off parameters.
    pub fn rank_all_with(&self, config: RankConfig) -> Result<Ranking> {
        self.run::<&str>(&RankSolver::new(config), None)
    }

    fn run<S: AsRef<str>>(&self, solver: &RankSolver, requested: Option<&[S]>) -> Result<Ranking> {
        // Hold the read lock across the solve and the node enumeration so
        // both see the same graph.
        let store = self.graph.read();
        let ranks = solver.solve(&store)?;

        let ranking = match requested {
            Some(ids) => Ranking::project(&ranks, ids.iter().map(|id| id.as_ref())),
            None => Ranking::project(&ranks, store.nodes()),
        };
        Ok(ranking)
    }
}
