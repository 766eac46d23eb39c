//! Python Bindings
//!
//! Exposes the link graph to Python as `LinkGraph`:
//!
//! ```python
//! from linkrank._core import LinkGraph
//!
//! graph = LinkGraph()
//! graph.insert({"http://home.com/": ["http://index.com/"]})
//! graph.rank()                      # every document, service damping
//! graph.rank(["http://home.com/"], alpha=0.85)
//! graph.delete(["http://index.com/"])
//! ```

use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::PyDict;

use crate::config::EngineConfig;
use crate::engine::LinkGraph;
use crate::error::GraphError;
use crate::graph::{NodeId, OutlinkBatch};
use crate::rank::{Ranking, RankingService};

impl From<GraphError> for PyErr {
    fn from(err: GraphError) -> Self {
        match err {
            GraphError::Convergence { .. } | GraphError::Timeout(_) | GraphError::Task(_) => {
                PyRuntimeError::new_err(err.to_string())
            }
            _ => PyValueError::new_err(err.to_string()),
        }
    }
}

/// Python-exposed link graph with its ranking service.
#[pyclass(name = "LinkGraph")]
pub struct PyLinkGraph {
    ranking: RankingService,
}

#[pymethods]
impl PyLinkGraph {
    #[new]
    fn new() -> Self {
        let config = EngineConfig::default();
        Self {
            ranking: RankingService::new(LinkGraph::new(), config.rank),
        }
    }

    /// Insert a dict of document -> complete outlink list.
    fn insert(&self, py: Python<'_>, urls: &Bound<'_, PyDict>) -> PyResult<()> {
        let mut batch = OutlinkBatch::new();
        for (source, outlinks) in urls.iter() {
            let source: String = source.extract()?;
            let outlinks: Vec<String> = outlinks.extract()?;
            batch.insert(
                NodeId::from(source),
                outlinks.into_iter().map(NodeId::from).collect(),
            );
        }

        let graph = self.ranking.graph().clone();
        py.allow_threads(move || graph.insert(&batch));
        Ok(())
    }

    /// Remove documents and their links. Unknown documents are ignored.
    fn delete(&self, py: Python<'_>, urls: Vec<String>) {
        let graph = self.ranking.graph().clone();
        py.allow_threads(move || graph.delete(&urls));
    }

    /// Rank documents, highest score first, as `(url, score)` pairs.
    ///
    /// Without `urls` every document in the graph is ranked.
    #[pyo3(signature = (urls=None, alpha=None))]
    fn rank(
        &self,
        py: Python<'_>,
        urls: Option<Vec<String>>,
        alpha: Option<f64>,
    ) -> PyResult<Vec<(String, f64)>> {
        let ranking = self.ranking.clone();
        let result: Result<Ranking, GraphError> = py.allow_threads(move || {
            let config = match alpha {
                Some(alpha) => ranking.config().clone().with_alpha(alpha),
                None => ranking.config().clone(),
            };
            match urls {
                Some(urls) => ranking.rank_with(config, urls.as_slice()),
                None => ranking.rank_all_with(config),
            }
        });

        Ok(result?
            .into_pairs()
            .into_iter()
            .map(|(id, score)| (id.into_string(), score))
            .collect())
    }

    fn successors(&self, url: &str) -> Vec<String> {
        let store = self.ranking.graph().read();
        store.successors(url).map(|id| id.to_string()).collect()
    }

    fn predecessors(&self, url: &str) -> Vec<String> {
        let store = self.ranking.graph().read();
        store.predecessors(url).map(|id| id.to_string()).collect()
    }

    fn node_count(&self) -> usize {
        self.ranking.graph().node_count()
    }

    fn __len__(&self) -> usize {
        self.node_count()
    }
}
