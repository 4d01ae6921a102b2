pub mod core;
pub mod manifolds;
pub mod statistics;

// Flat re-exports for convenience
pub use crate::core::{EmbeddedManifold, Error, Manifold, Result, Tolerance};

// Re-export manifold types
pub use crate::manifolds::{Euclidean, Sphere};

// Re-export the statistics surface
pub use crate::statistics::{
    correction_factor, mean, mean_and_std, mean_and_variance, median, std_dev, std_dev_weighted,
    variance, variance_weighted, variance_with, Estimate, GeometricMedian, KarcherMean,
};

/// Convenience re-exports for common use cases
pub mod prelude {
    pub use crate::core::{EmbeddedManifold, Error, Manifold, Result, Tolerance};
    pub use crate::manifolds::{Euclidean, Sphere};
    pub use crate::statistics::{
        mean, mean_and_std, mean_and_variance, median, std_dev, variance, variance_weighted,
        GeometricMedian, KarcherMean,
    };
}
