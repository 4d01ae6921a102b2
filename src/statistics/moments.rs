use crate::core::{Error, Manifold, Result};
use crate::statistics::mean::KarcherMean;
use crate::statistics::weights;

/// Weighted variance about a given or computed mean, full form
///
/// When `mean` is omitted it is computed by `solver` with the same raw
/// weights. The result is
/// `correction_factor(w, corrected) · Σ w_i · distance(mean, x_i)²`.
pub fn variance_with<M>(
    manifold: &M,
    points: &[M::Point],
    weights: Option<&[f64]>,
    mean: Option<&M::Point>,
    corrected: bool,
    solver: &KarcherMean,
) -> Result<f64>
where
    M: Manifold,
    M::Point: Clone,
{
    if points.is_empty() {
        return Err(Error::InvalidParameter(
            "cannot compute the variance of an empty point sequence".to_string(),
        ));
    }

    let w = match weights {
        Some(w) => {
            weights::check_len(w, points.len())?;
            w.to_vec()
        }
        None => weights::uniform(points.len()),
    };

    let computed;
    let center = match mean {
        Some(m) => m,
        None => {
            computed = solver.estimate(manifold, points, weights, None)?.point;
            &computed
        }
    };

    let factor = weights::correction_factor(&w, corrected);
    let sum: f64 = points
        .iter()
        .zip(&w)
        .map(|(x, wi)| {
            let d = manifold.distance(center, x);
            wi * d * d
        })
        .sum();

    Ok(factor * sum)
}

/// Unweighted variance; defaults to the bias-corrected estimator
pub fn variance<M>(manifold: &M, points: &[M::Point]) -> Result<f64>
where
    M: Manifold,
    M::Point: Clone,
{
    variance_with(manifold, points, None, None, true, &KarcherMean::new())
}

/// Weighted variance; defaults to the uncorrected estimator
///
/// Note the deliberate default asymmetry against [`variance`]: explicit
/// weights follow the weighted-statistics convention (`corrected = false`),
/// the unweighted overload follows the sample-variance convention
/// (`corrected = true`).
pub fn variance_weighted<M>(manifold: &M, points: &[M::Point], weights: &[f64]) -> Result<f64>
where
    M: Manifold,
    M::Point: Clone,
{
    variance_with(
        manifold,
        points,
        Some(weights),
        None,
        false,
        &KarcherMean::new(),
    )
}

/// Standard deviation, full form
pub fn std_dev_with<M>(
    manifold: &M,
    points: &[M::Point],
    weights: Option<&[f64]>,
    mean: Option<&M::Point>,
    corrected: bool,
    solver: &KarcherMean,
) -> Result<f64>
where
    M: Manifold,
    M::Point: Clone,
{
    Ok(variance_with(manifold, points, weights, mean, corrected, solver)?.sqrt())
}

/// Unweighted standard deviation (bias-corrected, like [`variance`])
pub fn std_dev<M>(manifold: &M, points: &[M::Point]) -> Result<f64>
where
    M: Manifold,
    M::Point: Clone,
{
    Ok(variance(manifold, points)?.sqrt())
}

/// Weighted standard deviation (uncorrected, like [`variance_weighted`])
pub fn std_dev_weighted<M>(manifold: &M, points: &[M::Point], weights: &[f64]) -> Result<f64>
where
    M: Manifold,
    M::Point: Clone,
{
    Ok(variance_weighted(manifold, points, weights)?.sqrt())
}

/// Mean and variance in one pass, full form
///
/// Computes the Karcher mean once and reuses it for the second moment, so
/// the pair agrees exactly with separate `mean` / `variance_with` calls
/// while skipping the duplicate mean computation.
pub fn mean_and_variance_with<M>(
    manifold: &M,
    points: &[M::Point],
    weights: Option<&[f64]>,
    corrected: bool,
    solver: &KarcherMean,
) -> Result<(M::Point, f64)>
where
    M: Manifold,
    M::Point: Clone,
{
    if points.is_empty() {
        return Err(Error::InvalidParameter(
            "cannot compute the variance of an empty point sequence".to_string(),
        ));
    }

    let center = solver.estimate(manifold, points, weights, None)?.point;
    let var = variance_with(manifold, points, weights, Some(&center), corrected, solver)?;
    Ok((center, var))
}

/// Unweighted mean and bias-corrected variance in one pass
pub fn mean_and_variance<M>(manifold: &M, points: &[M::Point]) -> Result<(M::Point, f64)>
where
    M: Manifold,
    M::Point: Clone,
{
    mean_and_variance_with(manifold, points, None, true, &KarcherMean::new())
}

/// Mean and standard deviation in one pass, full form
pub fn mean_and_std_with<M>(
    manifold: &M,
    points: &[M::Point],
    weights: Option<&[f64]>,
    corrected: bool,
    solver: &KarcherMean,
) -> Result<(M::Point, f64)>
where
    M: Manifold,
    M::Point: Clone,
{
    let (center, var) = mean_and_variance_with(manifold, points, weights, corrected, solver)?;
    Ok((center, var.sqrt()))
}

/// Unweighted mean and bias-corrected standard deviation in one pass
pub fn mean_and_std<M>(manifold: &M, points: &[M::Point]) -> Result<(M::Point, f64)>
where
    M: Manifold,
    M::Point: Clone,
{
    let (center, var) = mean_and_variance(manifold, points)?;
    Ok((center, var.sqrt()))
}
