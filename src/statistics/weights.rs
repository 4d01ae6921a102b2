use crate::core::{Error, Result};

/// Check that a weight sequence has one entry per point
///
/// Raised eagerly, before any solver iteration, so a mismatch never
/// surfaces as an out-of-bounds access mid-iteration.
pub(crate) fn check_len(weights: &[f64], n_points: usize) -> Result<()> {
    if weights.len() != n_points {
        return Err(Error::DimensionMismatch {
            expected: n_points,
            got: weights.len(),
        });
    }
    Ok(())
}

/// Normalize a raw weight sequence to `w_i / (scale · Σw)`
///
/// The mean solver uses `scale = 2` (the gradient of the halved squared
/// distance), the median solver `scale = 1`.
pub(crate) fn normalized(weights: &[f64], scale: f64) -> Vec<f64> {
    let total: f64 = weights.iter().sum();
    let denom = scale * total;
    weights.iter().map(|w| w / denom).collect()
}

/// Uniform probability weights: `n` entries of `1/n`
pub(crate) fn uniform(n: usize) -> Vec<f64> {
    vec![1.0 / n as f64; n]
}

/// Bias-correction factor for weighted variance
///
/// The uncorrected variance divides by the weight total; the corrected
/// variance divides by the effective sample count `Σw − Σw²/Σw`. For
/// uniform probability weights over `n` points the corrected factor
/// reduces to the familiar `n/(n-1)`.
pub fn correction_factor(weights: &[f64], corrected: bool) -> f64 {
    let total: f64 = weights.iter().sum();
    if corrected {
        let total_sq: f64 = weights.iter().map(|w| w * w).sum();
        1.0 / (total - total_sq / total)
    } else {
        1.0 / total
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_check_len_mismatch() {
        assert!(check_len(&[1.0, 1.0], 2).is_ok());
        let err = check_len(&[1.0, 1.0], 3).unwrap_err();
        match err {
            Error::DimensionMismatch { expected, got } => {
                assert_eq!(expected, 3);
                assert_eq!(got, 2);
            }
            other => panic!("expected DimensionMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_normalized_mean_rule() {
        // mean rule: w_i / (2·Σw)
        let w = normalized(&[1.0, 1.0, 2.0], 2.0);
        assert_relative_eq!(w[0], 0.125, epsilon = 1e-15);
        assert_relative_eq!(w[1], 0.125, epsilon = 1e-15);
        assert_relative_eq!(w[2], 0.25, epsilon = 1e-15);
    }

    #[test]
    fn test_normalized_median_rule() {
        // median rule: w_i / Σw
        let w = normalized(&[2.0, 2.0], 1.0);
        assert_relative_eq!(w[0], 0.5, epsilon = 1e-15);
        assert_relative_eq!(w[1], 0.5, epsilon = 1e-15);
    }

    #[test]
    fn test_correction_factor_uniform() {
        let n = 5;
        let w = uniform(n);

        // uncorrected: 1/Σw = 1 for probability weights
        assert_relative_eq!(correction_factor(&w, false), 1.0, epsilon = 1e-15);
        // corrected: n/(n-1)
        assert_relative_eq!(correction_factor(&w, true), 5.0 / 4.0, epsilon = 1e-15);
    }

    #[test]
    fn test_correction_factor_raw_weights() {
        let w = [1.0, 1.0, 1.0, 1.0];
        // uncorrected divides by the weight total
        assert_relative_eq!(correction_factor(&w, false), 0.25, epsilon = 1e-15);
    }
}
