use rand::Rng;

use crate::error::Result;
use crate::math::{matrix::Matrix, precision::Precision};
use crate::network::params::LayerParams;

/// Weights drawn from N(0, weight_scale²) and zero biases, cast to `precision`.
///
/// `n_in` is the fan-in of the layer, `n_out` its width.
pub fn random_init<R: Rng + ?Sized>(
    n_in: usize,
    n_out: usize,
    weight_scale: f64,
    precision: Precision,
    rng: &mut R,
) -> Result<LayerParams> {
    let weights = Matrix::random_normal(n_in, n_out, weight_scale, rng)?;
    Ok(LayerParams {
        weights: precision.cast_matrix(&weights),
        biases: Matrix::zeros(1, n_out),
    })
}
