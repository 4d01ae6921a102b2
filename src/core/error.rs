use thiserror::Error;

/// Errors that can occur during manifold operations
#[derive(Debug, Error, Clone)]
pub enum Error {
    /// Point is not on the manifold
    #[error("point not on manifold: {0}")]
    NotOnManifold(String),

    /// Dimension mismatch, e.g. a weight sequence whose length disagrees
    /// with the number of points it weights
    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    /// Computation failed (e.g., projecting the zero vector)
    #[error("computation failed: {0}")]
    ComputationFailed(String),

    /// Invalid parameter value
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Result type for manifold operations
pub type Result<T> = std::result::Result<T, Error>;
