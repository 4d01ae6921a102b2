pub mod euclidean;
pub mod sphere;

pub use euclidean::Euclidean;
pub use sphere::Sphere;
