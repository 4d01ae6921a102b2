use ndarray::Array1;
use ndarray_linalg::Norm;
use rand::Rng;
use rand_distr::StandardNormal;

use crate::core::{EmbeddedManifold, Error, Manifold, Result, Tolerance};

/// Sphere S^n with the round metric, represented as unit-norm vectors in
/// the ambient space R^(n+1)
pub struct Sphere {
    dim: usize,
}

impl Sphere {
    /// Create the sphere S^dim (ambient dimension dim + 1)
    pub fn new(dim: usize) -> Self {
        Sphere { dim }
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    fn is_on_sphere(&self, p: &Array1<f64>, tolerance: f64) -> bool {
        if p.len() != self.dim + 1 {
            return false;
        }
        (p.norm_l2() - 1.0).abs() < tolerance
    }

    /// Renormalize a near-sphere vector back onto the manifold
    pub fn project(&self, p: &Array1<f64>) -> Result<Array1<f64>> {
        let norm = p.norm_l2();
        if norm < 1e-10 {
            return Err(Error::ComputationFailed(
                "cannot project zero vector onto sphere".to_string(),
            ));
        }
        Ok(p / norm)
    }

    /// Orthogonal projection of an ambient vector onto the tangent
    /// hyperplane at `p`: `v − ⟨p,v⟩p`
    pub fn project_tangent(&self, p: &Array1<f64>, v: &Array1<f64>) -> Array1<f64> {
        let dot_pv = p.dot(v);
        v - dot_pv * p
    }

    /// Check that `p` has the right ambient dimension and unit norm
    pub fn validate_point(&self, p: &Array1<f64>) -> Result<()> {
        if p.len() != self.dim + 1 {
            return Err(Error::DimensionMismatch {
                expected: self.dim + 1,
                got: p.len(),
            });
        }
        if !self.is_on_sphere(p, 1e-8) {
            return Err(Error::NotOnManifold(format!(
                "point not on sphere: ||p|| = {}",
                p.norm_l2()
            )));
        }
        Ok(())
    }

    /// Sample a point uniformly on the sphere by projecting an ambient
    /// standard Gaussian vector
    pub fn random_point<R: Rng + ?Sized>(&self, rng: &mut R) -> Array1<f64> {
        loop {
            let v = Array1::from_shape_fn(self.dim + 1, |_| rng.sample::<f64, _>(StandardNormal));
            let norm = v.norm_l2();
            if norm > 1e-10 {
                return v / norm;
            }
        }
    }

    /// Sample a Gaussian tangent vector at `p` with standard deviation
    /// `sigma`, by projecting an ambient Gaussian onto the tangent space
    pub fn random_tangent<R: Rng + ?Sized>(
        &self,
        p: &Array1<f64>,
        sigma: f64,
        rng: &mut R,
    ) -> Array1<f64> {
        let v = Array1::from_shape_fn(self.dim + 1, |_| {
            sigma * rng.sample::<f64, _>(StandardNormal)
        });
        self.project_tangent(p, &v)
    }
}

impl Manifold for Sphere {
    type Point = Array1<f64>;
    type Vector = Array1<f64>;

    /// Geodesic distance arccos(⟨x,y⟩), with the inner product clamped to
    /// [-1, 1] so floating-point noise never produces NaN
    fn distance(&self, x: &Self::Point, y: &Self::Point) -> f64 {
        let dot_xy = x.dot(y);
        dot_xy.clamp(-1.0, 1.0).acos()
    }

    fn exp_in_place(&self, out: &mut Self::Point, x: &Self::Point, v: &Self::Vector) {
        let norm_v = v.norm_l2();

        if norm_v < 1e-10 {
            out.assign(x);
            return;
        }

        let cos_norm = norm_v.cos();
        let sin_norm = norm_v.sin();

        out.assign(&(cos_norm * x + (sin_norm / norm_v) * v));
        let norm_out = out.norm_l2();
        out.mapv_inplace(|e| e / norm_out);
    }

    /// Inverse of `exp`: `(θ/sin θ)·(y − ⟨x,y⟩x)` with `θ = arccos(⟨x,y⟩)`.
    ///
    /// Numerically unstable for antipodal inputs (θ → π, sin θ → 0); the
    /// result is meaningless there and callers must avoid that regime.
    fn log_in_place(&self, out: &mut Self::Vector, x: &Self::Point, y: &Self::Point) {
        let dot_xy = x.dot(y);
        let dist = dot_xy.clamp(-1.0, 1.0).acos();

        if dist < 1e-10 {
            out.fill(0.0);
            return;
        }

        let tangent = y - dot_xy * x;
        let norm_tangent = tangent.norm_l2();

        if norm_tangent < 1e-10 {
            out.fill(0.0);
            return;
        }

        out.assign(&((dist / norm_tangent) * tangent));
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

impl EmbeddedManifold for Sphere {
    fn ambient_dim(&self) -> usize {
        self.dim + 1
    }

    fn dim(&self) -> usize {
        self.dim
    }

    fn is_on_manifold(&self, p: &Self::Point, tolerance: f64) -> bool {
        self.is_on_sphere(p, tolerance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::arr1;

    #[test]
    fn test_distance_symmetry_and_zero() {
        let sphere = Sphere::new(2);
        let x = arr1(&[1.0, 0.0, 0.0]);
        let y = arr1(&[0.0, 1.0, 0.0]);

        assert_relative_eq!(sphere.distance(&x, &x), 0.0, epsilon = 1e-12);
        assert_relative_eq!(
            sphere.distance(&x, &y),
            sphere.distance(&y, &x),
            epsilon = 1e-12
        );
        assert_relative_eq!(
            sphere.distance(&x, &y),
            std::f64::consts::FRAC_PI_2,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_antipodal_distance_is_pi() {
        let sphere = Sphere::new(2);
        let x = arr1(&[0.0, 0.0, 1.0]);
        let y = arr1(&[0.0, 0.0, -1.0]);

        assert_relative_eq!(sphere.distance(&x, &y), std::f64::consts::PI, epsilon = 1e-12);
    }

    #[test]
    fn test_exp_of_zero_tangent_is_identity() {
        let sphere = Sphere::new(2);
        let x = arr1(&[0.0, 1.0, 0.0]);
        let zero = sphere.zero_tangent_vector(&x);

        let y = sphere.exp(&x, &zero);
        for i in 0..3 {
            assert_relative_eq!(y[i], x[i], epsilon = 1e-12);
        }
    }

    #[test]
    fn test_exp_log_round_trip() {
        let sphere = Sphere::new(2);
        let x = arr1(&[1.0, 0.0, 0.0]);
        let y = sphere
            .project(&arr1(&[0.5, 0.5, std::f64::consts::FRAC_1_SQRT_2]))
            .unwrap();

        let v = sphere.log(&x, &y);
        let y_back = sphere.exp(&x, &v);

        for i in 0..3 {
            assert_relative_eq!(y_back[i], y[i], epsilon = 1e-10);
        }
    }

    #[test]
    fn test_project_zero_vector_fails() {
        let sphere = Sphere::new(2);
        assert!(sphere.project(&arr1(&[0.0, 0.0, 0.0])).is_err());
    }

    #[test]
    fn test_validate_point() {
        let sphere = Sphere::new(2);
        assert!(sphere.validate_point(&arr1(&[1.0, 0.0, 0.0])).is_ok());
        assert!(sphere.validate_point(&arr1(&[1.0, 1.0, 0.0])).is_err());
        assert!(sphere.validate_point(&arr1(&[1.0, 0.0])).is_err());
    }

    #[test]
    fn test_random_point_lies_on_sphere() {
        let sphere = Sphere::new(3);
        let mut rng = rand::thread_rng();

        for _ in 0..20 {
            let p = sphere.random_point(&mut rng);
            assert!(sphere.is_on_manifold(&p, 1e-10));
        }
    }

    #[test]
    fn test_random_tangent_is_orthogonal_to_base() {
        let sphere = Sphere::new(3);
        let mut rng = rand::thread_rng();
        let p = sphere.random_point(&mut rng);

        for _ in 0..20 {
            let v = sphere.random_tangent(&p, 0.5, &mut rng);
            assert_relative_eq!(p.dot(&v), 0.0, epsilon = 1e-10);
        }
    }
}
