//! Async Service Boundary
//!
//! [`RankServer`] is what a transport layer (HTTP handlers, RPC, a queue
//! consumer) calls into. It offers the three call-level operations of the
//! engine:
//!
//! | request          | call                          |
//! |------------------|-------------------------------|
//! | `GET rank`       | [`RankServer::rank_all`]      |
//! | `PUT insert`     | [`RankServer::insert`]        |
//! | `DELETE delete`  | [`RankServer::delete`]        |
//!
//! Graph work is CPU-bound and takes the graph lock, so every operation runs
//! on tokio's blocking pool instead of an async worker.
//!
//! The request timeout bounds rank requests only. A timed-out solve is not
//! interrupted and finishes in the background, which is harmless because
//! ranking never writes to the graph. Mutations are always awaited to
//! completion: a batch that has started applying will commit, so the caller
//! must see its real outcome rather than a timeout.

use std::time::Duration;

use tracing::warn;

use crate::codec::{self, Encoding};
use crate::config::EngineConfig;
use crate::engine::LinkGraph;
use crate::error::{GraphError, Result};
use crate::graph::{MutationStats, NodeId, OutlinkBatch};
use crate::rank::{RankConfig, Ranking, RankingService};

/// Async front end over one shared link graph.
#[derive(Debug, Clone)]
pub struct RankServer {
    ranking: RankingService,
    timeout: Option<Duration>,
}

impl RankServer {
    /// Create a server that owns a new empty graph.
    pub fn new(config: EngineConfig) -> Self {
        Self::with_graph(LinkGraph::new(), config)
    }

    /// Create a server over an existing graph.
    pub fn with_graph(graph: LinkGraph, config: EngineConfig) -> Self {
        let timeout = config.request_timeout();
        Self {
            ranking: RankingService::new(graph, config.rank),
            timeout,
        }
    }

    pub fn graph(&self) -> &LinkGraph {
        self.ranking.graph()
    }

    /// Rank every document in the graph.
    pub async fn rank_all(&self) -> Result<Ranking> {
        let ranking = self.ranking.clone();
        self.run_solve(move || ranking.rank_all()).await
    }

    /// Rank the listed documents.
    pub async fn rank(&self, ids: Vec<NodeId>) -> Result<Ranking> {
        let ranking = self.ranking.clone();
        self.run_solve(move || ranking.rank(ids.as_slice())).await
    }

    /// Rank the listed documents with one-off solver parameters.
    pub async fn rank_with(&self, config: RankConfig, ids: Vec<NodeId>) -> Result<Ranking> {
        let ranking = self.ranking.clone();
        self.run_solve(move || ranking.rank_with(config, ids.as_slice()))
            .await
    }

    /// Apply an insert batch.
    pub async fn insert(&self, batch: OutlinkBatch) -> Result<MutationStats> {
        let graph = self.graph().clone();
        let stats = tokio::task::spawn_blocking(move || graph.insert(&batch)).await?;
        Ok(stats)
    }

    /// Apply a delete batch.
    pub async fn delete(&self, ids: Vec<NodeId>) -> Result<MutationStats> {
        let graph = self.graph().clone();
        let stats = tokio::task::spawn_blocking(move || graph.delete(&ids)).await?;
        Ok(stats)
    }

    /// Decode and apply a raw insert body.
    pub async fn insert_body(&self, body: &[u8], encoding: Encoding) -> Result<MutationStats> {
        let batch = codec::decode_outlinks(body, encoding)?;
        self.insert(batch).await
    }

    /// Decode and apply a raw delete body.
    pub async fn delete_body(&self, body: &[u8], encoding: Encoding) -> Result<MutationStats> {
        let ids = codec::decode_ids(body, encoding)?;
        self.delete(ids).await
    }

    /// Run a read-only solve on the blocking pool, bounded by the timeout.
    async fn run_solve<F>(&self, f: F) -> Result<Ranking>
    where
        F: FnOnce() -> Result<Ranking> + Send + 'static,
    {
        let task = tokio::task::spawn_blocking(f);

        match self.timeout {
            Some(limit) => match tokio::time::timeout(limit, task).await {
                Ok(joined) => joined?,
                Err(_) => {
                    warn!(?limit, "rank request timed out");
                    Err(GraphError::Timeout(limit))
                }
            },
            None => task.await?,
        }
    }
}
