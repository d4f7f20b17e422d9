//! Node feature generation.

use ndarray::{Array2, Axis};
use rand_distr::{Distribution, StandardNormal, Uniform};

use curvlink_graph::CsrMatrix;

use crate::config::FeatureType;
use crate::sampling::seeded_rng;

/// Raw (un-normalized) `n × d` feature matrix for `kind`.
///
/// `OneHot` and `Position` produce `n` columns regardless of `dimensions`.
pub fn generate_features(
    kind: FeatureType,
    n: usize,
    dimensions: usize,
    seed: u64,
    adjacency: &CsrMatrix,
) -> Array2<f64> {
    match kind {
        FeatureType::OneHot => Array2::eye(n),
        FeatureType::Uniform => {
            let mut rng = seeded_rng(seed);
            let dist = Uniform::new(0.0f64, 1.0);
            Array2::from_shape_fn((n, dimensions), |_| dist.sample(&mut rng))
        }
        FeatureType::Normal => {
            let mut rng = seeded_rng(seed);
            Array2::from_shape_fn((n, dimensions), |_| StandardNormal.sample(&mut rng))
        }
        FeatureType::Position => adjacency.to_dense(),
    }
}

/// Divide every row by its sum. Rows summing to zero stay zero.
pub fn row_normalize(mut features: Array2<f64>) -> Array2<f64> {
    let mut zero_rows = 0usize;
    for mut row in features.axis_iter_mut(Axis(0)) {
        let sum: f64 = row.sum();
        let inv = 1.0 / sum;
        if inv.is_finite() {
            row.mapv_inplace(|x| x * inv);
        } else {
            zero_rows += 1;
            row.fill(0.0);
        }
    }
    if zero_rows > 0 {
        tracing::debug!(zero_rows, "feature rows with zero sum left at zero");
        if zero_rows == features.nrows() {
            tracing::warn!("every feature row sums to zero");
        }
    }
    features
}
