use crate::core::{Error, Manifold, Result, Tolerance};
use crate::statistics::mean::Estimate;
use crate::statistics::weights;

/// Riemannian geometric median solver
///
/// Cyclic proximal-point iteration: each sweep visits the points in input
/// order and moves the iterate a clamped fraction of the way along the
/// geodesic toward each one, reusing the updated iterate immediately. The
/// inner loop is inherently sequential.
///
/// The default iteration cap is far larger than the mean solver's because
/// the subgradient-type scheme converges slowly.
pub struct GeometricMedian {
    /// Maximum number of sweeps over the point sequence
    pub max_iterations: usize,
    /// Tolerance options forwarded to the manifold's closeness predicate
    pub tolerance: Tolerance,
    /// Print an iteration table while solving
    pub verbose: bool,
}

impl Default for GeometricMedian {
    fn default() -> Self {
        Self {
            max_iterations: 1_000_000,
            tolerance: Tolerance::default(),
            verbose: false,
        }
    }
}

impl GeometricMedian {
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

    /// Estimate the weighted geometric median of `points`
    ///
    /// Same calling convention as the mean solver: `weights` defaults to
    /// uniform and must match the point count, `start` defaults to the
    /// first point and is copied before use. A point coinciding with the
    /// current iterate contributes a no-op step, never a division by zero.
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
                "cannot compute the median of an empty point sequence".to_string(),
            ));
        }

        let w = match weights {
            Some(w) => {
                weights::check_len(w, points.len())?;
                weights::normalized(w, 1.0)
            }
            None => weights::uniform(points.len()),
        };

        let mut y = start.unwrap_or(&points[0]).clone();
        let mut yold = y.clone();
        let mut next = manifold.allocate_point(&y);
        let mut step = manifold.zero_tangent_vector(&y);

        if self.verbose {
            println!("Geometric median: cyclic proximal point");
            println!("{:>8} {:>14}", "Sweep", "step");
        }

        for sweep in 1..=self.max_iterations {
            yold.clone_from(&y);
            let lambda = 0.5 / sweep as f64;

            for (x, wj) in points.iter().zip(&w) {
                let d = manifold.distance(&y, x);
                if d <= 0.0 {
                    // already at this point, nothing to move toward
                    continue;
                }

                // clamp to 1 so the step never overshoots past x itself
                let t = (lambda * wj / d).min(1.0);
                manifold.log_in_place(&mut step, &y, x);
                manifold.scale_tangent(&mut step, t);
                manifold.exp_in_place(&mut next, &y, &step);
                std::mem::swap(&mut y, &mut next);
            }

            if self.verbose && sweep % 1000 == 0 {
                println!("{:8} {:14.6e}", sweep, manifold.distance(&y, &yold));
            }

            if manifold.is_approx(&y, &yold, &self.tolerance) {
                return Ok(Estimate {
                    point: y,
                    iterations: sweep,
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

/// Geometric median of `points` with uniform weights and default options
pub fn median<M>(manifold: &M, points: &[M::Point]) -> Result<M::Point>
where
    M: Manifold,
    M::Point: Clone,
{
    Ok(GeometricMedian::new()
        .estimate(manifold, points, None, None)?
        .point)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifolds::Euclidean;
    use approx::assert_relative_eq;
    use ndarray::arr1;

    #[test]
    fn test_weight_length_mismatch_names_both_lengths() {
        let euclidean = Euclidean::new(2);
        let points = vec![arr1(&[0.0, 0.0]), arr1(&[1.0, 0.0]), arr1(&[0.0, 1.0])];

        let result = GeometricMedian::new().estimate(&euclidean, &points, Some(&[0.5, 0.5]), None);
        assert!(matches!(
            result,
            Err(Error::DimensionMismatch {
                expected: 3,
                got: 2
            })
        ));
    }

    #[test]
    fn test_duplicate_points_do_not_poison_the_iterate() {
        let euclidean = Euclidean::new(1);
        // start defaults to the first point, so the first inner step hits
        // the zero-distance case on the very first sweep
        let points = vec![arr1(&[0.0]), arr1(&[0.0]), arr1(&[1.0])];

        let estimate = GeometricMedian::new()
            .estimate(&euclidean, &points, None, None)
            .unwrap();

        assert!(estimate.point[0].is_finite());
        // the median of {0, 0, 1} on the line is 0
        assert_relative_eq!(estimate.point[0], 0.0, epsilon = 1e-3);
    }

    #[test]
    fn test_median_on_the_line() {
        let euclidean = Euclidean::new(1);
        let points = vec![arr1(&[-1.0]), arr1(&[0.1]), arr1(&[5.0])];

        let estimate = GeometricMedian::new()
            .with_max_iterations(50_000)
            .estimate(&euclidean, &points, None, None)
            .unwrap();

        // the 1-d geometric median is the middle sample
        assert_relative_eq!(estimate.point[0], 0.1, epsilon = 1e-2);
    }
}
