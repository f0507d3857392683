use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::{debug, trace, warn};

use crate::activation::relu::{relu_backward, relu_forward};
use crate::error::{FcnetError, Result};
use crate::layers::dropout::{Dropout, Mode};
use crate::layers::linear::{linear_backward, linear_forward};
use crate::loss::softmax::softmax_loss;
use crate::math::matrix::Matrix;
use crate::network::config::NetworkConfig;
use crate::network::init::random_init;
use crate::network::params::{Gradients, LayerGrads, LayerParams};

/// What `Network::loss` returns: class scores when called without labels,
/// loss and gradients when called with them.
#[derive(Debug, Clone)]
pub enum LossOutput {
    Scores(Matrix),
    Train { loss: f64, grads: Gradients },
}

/// Forward-pass intermediates of one hidden layer.
struct HiddenCache {
    /// Linear output, before ReLU.
    pre: Matrix,
    /// Post-dropout output; the input of the next layer.
    out: Matrix,
    /// Dropout keep-mask (all ones when dropout is off).
    mask: Matrix,
}

/// Intermediates of one forward pass. Lives for a single `loss` call.
struct ForwardCache {
    hidden: Vec<HiddenCache>,
}

/// Fully-connected softmax classifier.
///
/// Layers `1..N-1` are `linear -> relu -> dropout`, layer `N` is linear and
/// produces raw class scores. Parameters are read during `loss` and only
/// ever changed from outside through `params_mut`.
#[derive(Debug, Clone)]
pub struct Network {
    config: NetworkConfig,
    layers: Vec<LayerParams>,
    dropout: Dropout,
    rng: StdRng,
}

impl Network {
    /// Validates `config` and draws initial parameters from the network's
    /// own random stream.
    pub fn new(config: NetworkConfig) -> Result<Network> {
        config.validate()?;
        let dropout = Dropout::new(config.dropout)?;
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let dims = config.dims();
        let layers = dims
            .windows(2)
            .map(|w| random_init(w[0], w[1], config.weight_scale, config.precision, &mut rng))
            .collect::<Result<Vec<_>>>()?;

        let network = Network { config, layers, dropout, rng };
        debug!(
            dims = ?dims,
            parameters = network.num_parameters(),
            dropout = network.config.dropout,
            reg = network.config.reg,
            "built network"
        );
        Ok(network)
    }

    pub fn config(&self) -> &NetworkConfig {
        &self.config
    }

    pub fn num_layers(&self) -> usize {
        self.layers.len()
    }

    pub fn num_parameters(&self) -> usize {
        self.layers.iter().map(LayerParams::num_parameters).sum()
    }

    pub fn params(&self) -> &[LayerParams] {
        &self.layers
    }

    /// Mutable access for an optimizer. Shapes must be left unchanged.
    pub fn params_mut(&mut self) -> &mut [LayerParams] {
        &mut self.layers
    }

    /// Class scores for `x` when `labels` is `None`; otherwise the
    /// regularized softmax loss and its gradient for every parameter.
    pub fn loss(&mut self, x: &Matrix, labels: Option<&[usize]>) -> Result<LossOutput> {
        match labels {
            None => Ok(LossOutput::Scores(self.scores(x)?)),
            Some(labels) => {
                let (loss, grads) = self.loss_and_grads(x, labels)?;
                Ok(LossOutput::Train { loss, grads })
            }
        }
    }

    /// Evaluation-mode forward pass: `(N, num_classes)` scores.
    pub fn scores(&self, x: &Matrix) -> Result<Matrix> {
        self.check_batch(x, None)?;
        let x = self.config.precision.cast_matrix(x);
        // Eval passes never draw from the stream, so a scratch copy keeps
        // this method free of `&mut self`.
        let (scores, _) = self.forward(&x, Mode::Eval, &mut self.rng.clone())?;
        Ok(scores)
    }

    /// Training-mode forward and backward pass.
    pub fn loss_and_grads(&mut self, x: &Matrix, labels: &[usize]) -> Result<(f64, Gradients)> {
        self.check_batch(x, Some(labels))?;
        let x = self.config.precision.cast_matrix(x);

        let mut rng = self.rng.clone();
        let (scores, cache) = self.forward(&x, Mode::Train, &mut rng)?;
        self.rng = rng;

        let (data_loss, dscores) = match softmax_loss(&scores, labels) {
            Ok(out) => out,
            Err(e) => {
                warn!(error = %e, "softmax loss failed");
                return Err(e);
            }
        };

        let (reg_loss, grads) = self.backward(&x, &cache, dscores)?;
        let loss = self.config.precision.cast(data_loss + reg_loss);
        trace!(data_loss, reg_loss, loss, batch = x.rows, "computed loss");
        Ok((loss, grads))
    }

    /// Predicted class per example (argmax of the scores).
    pub fn predict(&self, x: &Matrix) -> Result<Vec<usize>> {
        Ok(self.scores(x)?.argmax_rows())
    }

    /// Fraction of examples in `x` whose predicted class equals the label.
    pub fn accuracy(&self, x: &Matrix, labels: &[usize]) -> Result<f64> {
        self.check_batch(x, Some(labels))?;
        let predicted = self.predict(x)?;
        let correct = predicted.iter().zip(labels).filter(|(p, y)| p == y).count();
        Ok(correct as f64 / labels.len() as f64)
    }

    fn check_batch(&self, x: &Matrix, labels: Option<&[usize]>) -> Result<()> {
        self.check_params()?;
        if x.data.len() != x.rows * x.cols {
            return Err(FcnetError::shape(
                "input batch",
                format!("{} values for {}x{}", x.rows * x.cols, x.rows, x.cols),
                format!("{} values", x.data.len()),
            ));
        }
        if x.rows == 0 {
            return Err(FcnetError::shape("input batch", "at least one example", "0 examples"));
        }
        if x.cols != self.config.input_dim {
            return Err(FcnetError::shape(
                "input batch",
                format!("{} features", self.config.input_dim),
                format!("{} features", x.cols),
            ));
        }
        if let Some(labels) = labels {
            if labels.len() != x.rows {
                return Err(FcnetError::shape(
                    "labels",
                    format!("{} labels (one per example)", x.rows),
                    format!("{} labels", labels.len()),
                ));
            }
            let num_classes = self.config.num_classes;
            if let Some((index, &label)) = labels.iter().enumerate().find(|&(_, &l)| l >= num_classes) {
                return Err(FcnetError::InvalidLabel { index, label, num_classes });
            }
        }
        Ok(())
    }

    /// Parameters may have been replaced through `params_mut`; every layer
    /// must still match the configured dimension chain.
    fn check_params(&self) -> Result<()> {
        let dims = self.config.dims();
        for (i, params) in self.layers.iter().enumerate() {
            let (n_in, n_out) = (dims[i], dims[i + 1]);
            let weights_ok = params.weights.shape() == (n_in, n_out)
                && params.weights.data.len() == n_in * n_out;
            if !weights_ok {
                return Err(FcnetError::shape(
                    "layer weights",
                    format!("{}x{} for layer {}", n_in, n_out, i + 1),
                    format!("{}x{} with {} values", params.weights.rows, params.weights.cols, params.weights.data.len()),
                ));
            }
            let biases_ok = params.biases.shape() == (1, n_out) && params.biases.data.len() == n_out;
            if !biases_ok {
                return Err(FcnetError::shape(
                    "layer biases",
                    format!("1x{} for layer {}", n_out, i + 1),
                    format!("{}x{} with {} values", params.biases.rows, params.biases.cols, params.biases.data.len()),
                ));
            }
        }
        Ok(())
    }

    /// Scores come back already cast to the configured precision, so
    /// training and evaluation see identical values.
    fn forward<R: Rng + ?Sized>(&self, x: &Matrix, mode: Mode, rng: &mut R) -> Result<(Matrix, ForwardCache)> {
        let precision = self.config.precision;
        let last = self.layers.len() - 1;
        let (hidden_layers, output) = (&self.layers[..last], &self.layers[last]);
        let mut cache = ForwardCache { hidden: Vec::with_capacity(hidden_layers.len()) };

        for params in hidden_layers {
            let input = cache.hidden.last().map_or(x, |c| &c.out);
            let pre = precision.cast_matrix(&linear_forward(input, &params.weights, &params.biases)?);
            let relu = relu_forward(&pre);
            let (out, mask) = self.dropout.forward(&relu, mode, rng);
            cache.hidden.push(HiddenCache { pre, out: precision.cast_matrix(&out), mask });
        }

        let input = cache.hidden.last().map_or(x, |c| &c.out);
        let scores = precision.cast_matrix(&linear_forward(input, &output.weights, &output.biases)?);
        Ok((scores, cache))
    }

    /// Walks the layers from the output back to the input. Returns the L2
    /// penalty and the per-layer gradients, input layer first.
    fn backward(&self, x: &Matrix, cache: &ForwardCache, dscores: Matrix) -> Result<(f64, Gradients)> {
        let precision = self.config.precision;
        let reg = self.config.reg;
        let last = self.layers.len() - 1;

        let mut grads = Vec::with_capacity(self.layers.len());
        let mut reg_loss = 0.0;
        // Gradient w.r.t. the current layer's output. For hidden layers that
        // is the post-dropout activation fed to the next layer.
        let mut dout = dscores;

        for i in (0..=last).rev() {
            let params = &self.layers[i];
            if i < last {
                let c = &cache.hidden[i];
                let drelu = self.dropout.backward(&dout, &c.mask, Mode::Train)?;
                dout = relu_backward(&drelu, &c.pre)?;
            }

            let input = if i == 0 { x } else { &cache.hidden[i - 1].out };
            let g = linear_backward(&dout, input, &params.weights)?;

            reg_loss += 0.5 * reg * params.weights.sum_squares();
            let dw = &g.dw + &params.weights.scale(reg);
            grads.push(LayerGrads {
                weights: precision.cast_matrix(&dw),
                biases: precision.cast_matrix(&g.db),
            });
            dout = g.dx;
        }

        grads.reverse();
        Ok((reg_loss, Gradients::new(grads)))
    }
}
