use crate::core::{Error, Manifold, Result, Tolerance};
use crate::statistics::weights;

/// Result of an iterative location estimate (mean or median)
#[derive(Debug, Clone)]
pub struct Estimate<P> {
    /// Final iterate
    pub point: P,
    /// Number of iterations performed
    pub iterations: usize,
    /// Whether the tolerance test passed, as opposed to the iteration cap
    /// being reached
    pub converged: bool,
}

/// Karcher (Riemannian center of mass) mean solver
///
/// Gradient-descent fixed point: each iteration forms the weighted average
/// of the logarithmic maps toward every input point and follows it through
/// the exponential map. Works for any `Manifold` implementation.
pub struct KarcherMean {
    /// Maximum number of iterations before returning the best-effort
    /// iterate
    pub max_iterations: usize,
    /// Tolerance options forwarded to the manifold's closeness predicate
    pub tolerance: Tolerance,
    /// Print an iteration table while solving
    pub verbose: bool,
}

impl Default for KarcherMean {
    fn default() -> Self {
        Self {
            max_iterations: 100,
            tolerance: Tolerance::default(),
            verbose: false,
        }
    }
}

impl KarcherMean {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_tolerance(mut self, tolerance: Tolerance) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn verbose(mut self) -> Self {
        self.verbose = true;
        self
    }

    /// Estimate the weighted Karcher mean of `points`
    ///
    /// `weights` defaults to uniform; its length must match the number of
    /// points. `start` defaults to the first point; it is copied into the
    /// working iterate, never mutated. Reaching the iteration cap is not
    /// an error; the returned `converged` flag records which way the loop
    /// ended.
    pub fn estimate<M>(
        &self,
        manifold: &M,
        points: &[M::Point],
        weights: Option<&[f64]>,
        start: Option<&M::Point>,
    ) -> Result<Estimate<M::Point>>
    where
        M: Manifold,
        M::Point: Clone,
    {
        if points.is_empty() {
            return Err(Error::InvalidParameter(
                "cannot compute the mean of an empty point sequence".to_string(),
            ));
        }

        let w = match weights {
            Some(w) => {
                weights::check_len(w, points.len())?;
                weights::normalized(w, 2.0)
            }
            None => weights::normalized(&weights::uniform(points.len()), 2.0),
        };

        let mut y = start.unwrap_or(&points[0]).clone();
        let mut yold = y.clone();
        let mut log_buf = manifold.zero_tangent_vector(&y);

        if self.verbose {
            println!("Karcher mean: gradient descent");
            println!("{:>6} {:>14}", "Iter", "step");
        }

        for iter in 1..=self.max_iterations {
            yold.clone_from(&y);

            let mut acc = manifold.zero_tangent_vector(&yold);
            for (x, wi) in points.iter().zip(&w) {
                manifold.log_in_place(&mut log_buf, &yold, x);
                manifold.add_scaled_tangent(&mut acc, *wi, &log_buf);
            }
            manifold.exp_in_place(&mut y, &yold, &acc);

            if self.verbose && iter % 10 == 0 {
                println!("{:6} {:14.6e}", iter, manifold.distance(&y, &yold));
            }

            if manifold.is_approx(&y, &yold, &self.tolerance) {
                return Ok(Estimate {
                    point: y,
                    iterations: iter,
                    converged: true,
                });
            }
        }

        Ok(Estimate {
            point: y,
            iterations: self.max_iterations,
            converged: false,
        })
    }
}

/// Karcher mean of `points` with uniform weights and default options
pub fn mean<M>(manifold: &M, points: &[M::Point]) -> Result<M::Point>
where
    M: Manifold,
    M::Point: Clone,
{
    Ok(KarcherMean::new()
        .estimate(manifold, points, None, None)?
        .point)
}
