use crate::error::{FcnetError, Result};
use crate::network::{network::Network, params::Gradients};

/// Vanilla gradient descent: `p -= learning_rate * dp` for every parameter.
pub struct Sgd {
    pub learning_rate: f64,
}

impl Sgd {
    pub fn new(learning_rate: f64) -> Sgd {
        Sgd { learning_rate }
    }

    /// Applies one update in place. `grads` must come from a `loss` call on
    /// a network of the same architecture.
    pub fn step(&self, network: &mut Network, grads: &Gradients) -> Result<()> {
        if grads.len() != network.num_layers() {
            return Err(FcnetError::shape(
                "Sgd::step",
                format!("{} layer gradients", network.num_layers()),
                format!("{} layer gradients", grads.len()),
            ));
        }
        let precision = network.config().precision;
        let lr = self.learning_rate;
        for (i, (params, g)) in network.params_mut().iter_mut().zip(grads).enumerate() {
            if params.weights.shape() != g.weights.shape() || params.biases.shape() != g.biases.shape() {
                return Err(FcnetError::shape(
                    "Sgd::step",
                    format!("layer {} weights {:?}", i + 1, params.weights.shape()),
                    format!("{:?}", g.weights.shape()),
                ));
            }
            params.weights = precision.cast_matrix(&(&params.weights - &g.weights.scale(lr)));
            params.biases = precision.cast_matrix(&(&params.biases - &g.biases.scale(lr)));
        }
        Ok(())
    }
}
