use std::ops::Index;

use crate::math::matrix::Matrix;

/// Weights `(inputs, outputs)` and bias row `(1, outputs)` of one layer.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerParams {
    pub weights: Matrix,
    pub biases: Matrix,
}

impl LayerParams {
    pub fn input_dim(&self) -> usize {
        self.weights.rows
    }

    pub fn output_dim(&self) -> usize {
        self.weights.cols
    }

    pub fn num_parameters(&self) -> usize {
        self.weights.len() + self.biases.len()
    }
}

/// Gradient of the loss with respect to one layer's parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerGrads {
    pub weights: Matrix,
    pub biases: Matrix,
}

/// Per-layer gradients, in the same order as the network's layers.
///
/// Built only by `Network::loss`, which pushes exactly one entry per layer.
#[derive(Debug, Clone, PartialEq)]
pub struct Gradients {
    layers: Vec<LayerGrads>,
}

impl Gradients {
    pub(crate) fn new(layers: Vec<LayerGrads>) -> Gradients {
        Gradients { layers }
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LayerGrads> {
        self.layers.iter()
    }

    pub fn get(&self, layer: usize) -> Option<&LayerGrads> {
        self.layers.get(layer)
    }

    /// Largest absolute entry across every gradient.
    pub fn max_abs(&self) -> f64 {
        self.layers
            .iter()
            .map(|g| g.weights.max_abs().max(g.biases.max_abs()))
            .fold(0.0, f64::max)
    }
}

impl Index<usize> for Gradients {
    type Output = LayerGrads;

    fn index(&self, layer: usize) -> &LayerGrads {
        &self.layers[layer]
    }
}

impl<'a> IntoIterator for &'a Gradients {
    type Item = &'a LayerGrads;
    type IntoIter = std::slice::Iter<'a, LayerGrads>;

    fn into_iter(self) -> Self::IntoIter {
        self.layers.iter()
    }
}
