//! Solver Configuration

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{GraphError, Result};
use crate::graph::NodeId;

/// Per-node weights supplied by the caller. Normalized before use.
pub type Distribution = HashMap<NodeId, f64>;

/// PageRank parameters.
///
/// Deserializing fills any missing field with its default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankConfig {
    /// Damping factor: probability of following a link rather than teleporting.
    pub alpha: f64,

    /// Maximum number of power iterations.
    pub max_iter: usize,

    /// Per-node tolerance. The solve converges once the L1 change between
    /// two iterations drops below `node_count * tol`.
    pub tol: f64,

    /// Teleportation distribution. Uniform when absent.
    pub personalization: Option<Distribution>,

    /// Starting vector. Uniform when absent.
    pub nstart: Option<Distribution>,

    /// Where dangling nodes send their mass. Falls back to the
    /// personalization distribution when absent.
    pub dangling: Option<Distribution>,
}

impl Default for RankConfig {
    fn default() -> Self {
        Self {
            alpha: 0.85,
            max_iter: 100,
            tol: 1.0e-6,
            personalization: None,
            nstart: None,
            dangling: None,
        }
    }
}

impl RankConfig {
    /// Create a configuration with default parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the damping factor.
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Set the iteration cap.
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Set the per-node tolerance.
    pub fn with_tolerance(mut self, tol: f64) -> Self {
        self.tol = tol;
        self
    }

    /// Set the teleportation distribution.
    pub fn with_personalization(mut self, personalization: Distribution) -> Self {
        self.personalization = Some(personalization);
        self
    }

    /// Set the starting vector.
    pub fn with_nstart(mut self, nstart: Distribution) -> Self {
        self.nstart = Some(nstart);
        self
    }

    /// Set the dangling redistribution.
    pub fn with_dangling(mut self, dangling: Distribution) -> Self {
        self.dangling = Some(dangling);
        self
    }

    /// Check scalar parameters. Distributions are checked against the graph
    /// at solve time.
    pub fn validate(&self) -> Result<()> {
        if !self.alpha.is_finite() || !(0.0..=1.0).contains(&self.alpha) {
            return Err(GraphError::InvalidConfig(format!(
                "alpha must be within [0, 1], got {}",
                self.alpha
            )));
        }
        if !self.tol.is_finite() || self.tol <= 0.0 {
            return Err(GraphError::InvalidConfig(format!(
                "tol must be positive, got {}",
                self.tol
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_pagerank_conventions() {
        let config = RankConfig::default();
        assert_eq!(config.alpha, 0.85);
        assert_eq!(config.max_iter, 100);
        assert_eq!(config.tol, 1.0e-6);
        assert!(config.personalization.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn builder_overrides_fields() {
        let config = RankConfig::new()
            .with_alpha(0.4)
            .with_max_iter(10)
            .with_tolerance(1e-3);
        assert_eq!(config.alpha, 0.4);
        assert_eq!(config.max_iter, 10);
        assert_eq!(config.tol, 1e-3);
    }

    #[test]
    fn validate_rejects_out_of_range_parameters() {
        assert!(RankConfig::new().with_alpha(1.5).validate().is_err());
        assert!(RankConfig::new().with_alpha(f64::NAN).validate().is_err());
        assert!(RankConfig::new().with_tolerance(0.0).validate().is_err());
        assert!(RankConfig::new().with_alpha(0.0).validate().is_ok());
        assert!(RankConfig::new().with_alpha(1.0).validate().is_ok());
    }

    #[test]
    fn deserialize_fills_missing_fields() {
        let config: RankConfig =
            serde_json::from_str(r#"{"alpha": 0.5, "personalization": {"a": 2.0}}"#).unwrap();
        assert_eq!(config.alpha, 0.5);
        assert_eq!(config.max_iter, 100);
        let p = config.personalization.unwrap();
        assert_eq!(p.get("a"), Some(&2.0));
    }
}
