//! Error Types
//!
//! Every failure in the engine is scoped to a single request. Nothing here
//! is fatal to the process, and a failed solve never touches the graph.

use std::fmt;
use std::time::Duration;

use thiserror::Error;

/// Which per-node distribution a solver error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistributionKind {
    /// Teleportation target.
    Personalization,
    /// Redistribution target for dangling nodes.
    Dangling,
    /// Starting vector of the power iteration.
    Start,
}

impl fmt::Display for DistributionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DistributionKind::Personalization => "personalization",
            DistributionKind::Dangling => "dangling",
            DistributionKind::Start => "start",
        };
        f.write_str(name)
    }
}

/// Errors produced by the link graph and the rank solver.
#[derive(Debug, Error)]
pub enum GraphError {
    /// A supplied distribution has no value for some graph nodes.
    #[error("{kind} distribution must have a value for every node, missing nodes: {missing:?}")]
    IncompleteDistribution {
        kind: DistributionKind,
        missing: Vec<String>,
    },

    /// A supplied distribution cannot be normalized.
    #[error("{kind} distribution must be non-negative with positive finite mass")]
    DegenerateDistribution { kind: DistributionKind },

    /// Power iteration did not reach the tolerance.
    #[error("power iteration failed to converge in {max_iter} iterations")]
    Convergence { max_iter: usize },

    /// Strict edge removal on an edge that is not in the graph.
    #[error("edge not found: {from} -> {to}")]
    EdgeNotFound { from: String, to: String },

    /// Solver parameters outside their valid range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A request body that does not have the expected shape.
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// A response could not be serialized.
    #[error("encoding failed: {0}")]
    Encode(String),

    /// The request did not finish within the service timeout.
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// A background task panicked or was cancelled.
    #[error("task failed: {0}")]
    Task(String),
}

impl From<serde_json::Error> for GraphError {
    fn from(err: serde_json::Error) -> Self {
        GraphError::MalformedInput(err.to_string())
    }
}

impl From<rmp_serde::decode::Error> for GraphError {
    fn from(err: rmp_serde::decode::Error) -> Self {
        GraphError::MalformedInput(err.to_string())
    }
}

impl From<tokio::task::JoinError> for GraphError {
    fn from(err: tokio::task::JoinError) -> Self {
        GraphError::Task(err.to_string())
    }
}

/// Result type for graph operations.
pub type Result<T> = std::result::Result<T, GraphError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn incomplete_distribution_names_missing_nodes() {
        let err = GraphError::IncompleteDistribution {
            kind: DistributionKind::Personalization,
            missing: vec!["b".to_string(), "c".to_string()],
        };
        let msg = err.to_string();
        assert!(msg.starts_with("personalization distribution"));
        assert!(msg.contains("\"b\""));
        assert!(msg.contains("\"c\""));
    }

    #[test]
    fn convergence_reports_iteration_cap() {
        let err = GraphError::Convergence { max_iter: 7 };
        assert_eq!(
            err.to_string(),
            "power iteration failed to converge in 7 iterations"
        );
    }

    #[test]
    fn json_errors_become_malformed_input() {
        let err: GraphError = serde_json::from_str::<Vec<String>>("{")
            .unwrap_err()
            .into();
        assert!(matches!(err, GraphError::MalformedInput(_)));
    }
}
