//! Configuration errors
//!
//! The engine itself has no failure modes; only configuration input coming
//! from the host (JSON, CLI flags, UI controls) can be rejected.

use thiserror::Error;

/// Rejected configuration input
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("time step must be one of 60, 300, 600 or 3600 seconds, got {0}")]
    InvalidTimeStep(u32),

    #[error("canvas extent must be positive and finite, got {width}x{height}")]
    InvalidCanvas { width: f32, height: f32 },

    #[error(
        "population cap {max} must leave room for {initial} objects plus one collision's fragments"
    )]
    InvalidPopulation { initial: usize, max: usize },

    #[error("close-approach threshold must be positive, got {0}")]
    InvalidThreshold(f32),

    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("could not read config: {0}")]
    Io(#[from] std::io::Error),
}
