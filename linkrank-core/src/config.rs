//! Engine Configuration
//!
//! Settings a host process hands to the service layer at startup. Every
//! field has a default, so an empty JSON object is a valid configuration.
//!
//! ```json
//! {
//!     "rank": { "alpha": 0.4, "max_iter": 100, "tol": 1e-6 },
//!     "request_timeout_ms": 2000
//! }
//! ```
//!
//! A `rank` object replaces the default solver parameters as a whole; any
//! field it leaves out takes the solver default (damping 0.85), not the
//! service default below.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::rank::RankConfig;

/// Damping used for rank requests unless the caller overrides it.
pub const SERVICE_ALPHA: f64 = 0.4;

/// Service-level settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Solver parameters for rank requests.
    pub rank: RankConfig,

    /// Upper bound on how long a caller waits for one request.
    /// `None` waits for completion.
    pub request_timeout_ms: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            rank: RankConfig::default().with_alpha(SERVICE_ALPHA),
            request_timeout_ms: None,
        }
    }
}

impl EngineConfig {
    /// Parse and validate a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.rank.validate()?;
        Ok(config)
    }

    pub fn with_rank(mut self, rank: RankConfig) -> Self {
        self.rank = rank;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout_ms = Some(u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX));
        self
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_ms.map(Duration::from_millis)
    }
}
