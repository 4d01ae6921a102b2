pub mod mean;
pub mod median;
pub mod moments;
pub mod weights;

pub use mean::{mean, Estimate, KarcherMean};
pub use median::{median, GeometricMedian};
pub use moments::{
    mean_and_std, mean_and_std_with, mean_and_variance, mean_and_variance_with, std_dev,
    std_dev_weighted, std_dev_with, variance, variance_weighted, variance_with,
};
pub use weights::correction_factor;
