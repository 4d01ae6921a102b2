/// Tolerance options for the closeness predicate used as the solvers'
/// convergence test.
///
/// A pair of points passes when the norm of their difference is at most
/// `max(absolute, relative * max(‖x‖, ‖y‖))`, the usual mixed
/// absolute/relative acceptance rule.
#[derive(Debug, Clone, Copy)]
pub struct Tolerance {
    /// Absolute tolerance on the distance between the two points
    pub absolute: f64,
    /// Relative tolerance, scaled by the larger of the two point norms
    pub relative: f64,
}

impl Default for Tolerance {
    fn default() -> Self {
        Tolerance {
            absolute: 0.0,
            relative: f64::EPSILON.sqrt(),
        }
    }
}

impl Tolerance {
    /// Mixed absolute/relative acceptance test on a precomputed difference
    /// norm and the norms of the two operands.
    pub fn admits(&self, diff_norm: f64, x_norm: f64, y_norm: f64) -> bool {
        diff_norm <= self.absolute.max(self.relative * x_norm.max(y_norm))
    }
}

/// Core trait for a Riemannian manifold
///
/// This is the full contract the statistics solvers operate through: the
/// geodesic distance, the exponential and logarithmic maps (each with an
/// in-place core and an allocating wrapper), tangent-buffer allocation,
/// the minimal tangent-space arithmetic needed to form weighted tangent
/// combinations, and a closeness predicate for convergence tests.
///
/// Implementations are responsible for their own domain validation; the
/// statistics layer never checks manifold membership itself.
#[must_use]
pub trait Manifold {
    /// Point on the manifold
    type Point;

    /// Tangent vector at a point
    type Vector;

    /// Riemannian distance between two points
    ///
    /// Symmetric, nonnegative, zero iff the points coincide up to the
    /// manifold's own notion of equivalence.
    fn distance(&self, x: &Self::Point, y: &Self::Point) -> f64;

    /// Exponential map, in-place core: write into `out` the point reached
    /// by following the geodesic from `x` with initial velocity `v` for
    /// unit time. Must satisfy `exp(x, 0) = x`.
    fn exp_in_place(&self, out: &mut Self::Point, x: &Self::Point, v: &Self::Vector);

    /// Exponential map, allocating wrapper around `exp_in_place`
    fn exp(&self, x: &Self::Point, v: &Self::Vector) -> Self::Point {
        let mut out = self.allocate_point(x);
        self.exp_in_place(&mut out, x, v);
        out
    }

    /// Logarithmic map, in-place core: write into `out` the tangent vector
    /// at `x` pointing toward `y`, i.e. the inverse of `exp` for inputs
    /// within the injectivity radius: `exp(x, log(x, y)) ≈ y`.
    fn log_in_place(&self, out: &mut Self::Vector, x: &Self::Point, y: &Self::Point);

    /// Logarithmic map, allocating wrapper around `log_in_place`
    fn log(&self, x: &Self::Point, y: &Self::Point) -> Self::Vector {
        let mut out = self.zero_tangent_vector(x);
        self.log_in_place(&mut out, x, y);
        out
    }

    /// The zero tangent vector at `x`
    fn zero_tangent_vector(&self, x: &Self::Point) -> Self::Vector;

    /// Allocate a fresh, independent point buffer with the same structural
    /// shape as `like`. Solvers use this to avoid aliasing caller data.
    fn allocate_point(&self, like: &Self::Point) -> Self::Point;

    /// Scale a tangent vector in place: `v ← t·v`
    fn scale_tangent(&self, v: &mut Self::Vector, t: f64);

    /// Accumulate a scaled tangent vector: `acc ← acc + t·v`
    ///
    /// Both vectors must live in the same tangent space.
    fn add_scaled_tangent(&self, acc: &mut Self::Vector, t: f64, v: &Self::Vector);

    /// Closeness predicate used as the solvers' convergence test
    fn is_approx(&self, x: &Self::Point, y: &Self::Point, tol: &Tolerance) -> bool;
}

/// Trait for manifolds embedded in Euclidean space
pub trait EmbeddedManifold: Manifold {
    /// Dimension of the ambient embedding space
    fn ambient_dim(&self) -> usize;

    /// Intrinsic dimension of the manifold
    fn dim(&self) -> usize;

    /// Whether `p` satisfies the manifold's membership constraint up to
    /// `tolerance`
    fn is_on_manifold(&self, p: &Self::Point, tolerance: f64) -> bool;
}
