use ndarray::Array1;
use ndarray_linalg::Norm;

use crate::core::{EmbeddedManifold, Error, Manifold, Result, Tolerance};

/// Euclidean space R^n with the standard metric
///
/// The simplest instance of the manifold interface: exp is addition, log
/// is subtraction. The Karcher mean on this space is the ordinary weighted
/// arithmetic mean, which makes it a useful cross-check for the solvers.
pub struct Euclidean {
    dim: usize,
}

impl Euclidean {
    pub fn new(dim: usize) -> Self {
        Euclidean { dim }
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Validate dimension
    pub fn validate_point(&self, p: &Array1<f64>) -> Result<()> {
        if p.len() != self.dim {
            return Err(Error::DimensionMismatch {
                expected: self.dim,
                got: p.len(),
            });
        }
        Ok(())
    }
}

impl Manifold for Euclidean {
    type Point = Array1<f64>;
    type Vector = Array1<f64>;

    fn distance(&self, x: &Self::Point, y: &Self::Point) -> f64 {
        (y - x).norm_l2()
    }

    fn exp_in_place(&self, out: &mut Self::Point, x: &Self::Point, v: &Self::Vector) {
        out.assign(&(x + v));
    }

    fn log_in_place(&self, out: &mut Self::Vector, x: &Self::Point, y: &Self::Point) {
        out.assign(&(y - x));
    }

    fn zero_tangent_vector(&self, x: &Self::Point) -> Self::Vector {
        Array1::zeros(x.len())
    }

    fn allocate_point(&self, like: &Self::Point) -> Self::Point {
        Array1::zeros(like.len())
    }

    fn scale_tangent(&self, v: &mut Self::Vector, t: f64) {
        v.mapv_inplace(|e| e * t);
    }

    fn add_scaled_tangent(&self, acc: &mut Self::Vector, t: f64, v: &Self::Vector) {
        acc.scaled_add(t, v);
    }

    fn is_approx(&self, x: &Self::Point, y: &Self::Point, tol: &Tolerance) -> bool {
        let diff_norm = (x - y).norm_l2();
        tol.admits(diff_norm, x.norm_l2(), y.norm_l2())
    }
}

impl EmbeddedManifold for Euclidean {
    fn ambient_dim(&self) -> usize {
        self.dim
    }

    fn dim(&self) -> usize {
        self.dim
    }

    fn is_on_manifold(&self, p: &Self::Point, _tolerance: f64) -> bool {
        p.len() == self.dim
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::arr1;

    #[test]
    fn test_euclidean_exp_log() {
        let euclidean = Euclidean::new(3);
        let p = arr1(&[1.0, 2.0, 3.0]);
        let x = arr1(&[0.1, 0.2, 0.3]);

        let q = euclidean.exp(&p, &x);
        let x_recovered = euclidean.log(&p, &q);

        assert_relative_eq!(x[0], x_recovered[0], epsilon = 1e-10);
        assert_relative_eq!(x[1], x_recovered[1], epsilon = 1e-10);
        assert_relative_eq!(x[2], x_recovered[2], epsilon = 1e-10);
    }

    #[test]
    fn test_euclidean_distance() {
        let euclidean = Euclidean::new(2);
        let p = arr1(&[0.0, 0.0]);
        let q = arr1(&[3.0, 4.0]);

        assert_relative_eq!(euclidean.distance(&p, &q), 5.0, epsilon = 1e-10);
    }

    #[test]
    fn test_euclidean_validation() {
        let euclidean = Euclidean::new(2);

        assert!(euclidean.validate_point(&arr1(&[1.0, 2.0])).is_ok());
        assert!(euclidean.validate_point(&arr1(&[1.0, 2.0, 3.0])).is_err());
    }

    #[test]
    fn test_is_approx_tolerances() {
        let euclidean = Euclidean::new(2);
        let p = arr1(&[1.0, 0.0]);
        let q = arr1(&[1.0 + 1e-12, 0.0]);
        let r = arr1(&[1.1, 0.0]);

        let tol = Tolerance::default();
        assert!(euclidean.is_approx(&p, &q, &tol));
        assert!(!euclidean.is_approx(&p, &r, &tol));

        let loose = Tolerance {
            absolute: 0.5,
            relative: 0.0,
        };
        assert!(euclidean.is_approx(&p, &r, &loose));
    }
}
