use rand::Rng;

use crate::error::{FcnetError, Result};
use crate::math::matrix::Matrix;

/// Whether a pass is a training pass (dropout masks drawn) or an
/// evaluation pass (dropout is the identity).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Train,
    Eval,
}

/// Inverted dropout with drop probability `p`.
///
/// The mask returned by `forward` is binary (1 = kept); the `1 / (1 - p)`
/// rescale is applied on top of it in both directions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dropout {
    p: f64,
}

impl Dropout {
    pub fn new(p: f64) -> Result<Dropout> {
        if !(0.0..1.0).contains(&p) {
            return Err(FcnetError::Config(format!(
                "dropout probability must be in [0, 1), got {}",
                p
            )));
        }
        Ok(Dropout { p })
    }

    pub fn p(&self) -> f64 {
        self.p
    }

    pub fn is_enabled(&self) -> bool {
        self.p > 0.0
    }

    fn is_active(&self, mode: Mode) -> bool {
        self.is_enabled() && mode == Mode::Train
    }

    fn keep_scale(&self) -> f64 {
        1.0 / (1.0 - self.p)
    }

    /// Returns the (possibly) dropped-out activations and the keep-mask.
    pub fn forward<R: Rng + ?Sized>(&self, x: &Matrix, mode: Mode, rng: &mut R) -> (Matrix, Matrix) {
        if !self.is_active(mode) {
            return (x.clone(), Matrix::ones(x.rows, x.cols));
        }
        let data = (0..x.len())
            .map(|_| if rng.gen::<f64>() >= self.p { 1.0 } else { 0.0 })
            .collect();
        let mask = Matrix { rows: x.rows, cols: x.cols, data };
        let out = x.hadamard(&mask).scale(self.keep_scale());
        (out, mask)
    }

    /// Gradient with respect to the dropout input, given the gradient with
    /// respect to its output and the mask `forward` produced.
    pub fn backward(&self, dout: &Matrix, mask: &Matrix, mode: Mode) -> Result<Matrix> {
        if !self.is_active(mode) {
            return Ok(dout.clone());
        }
        Ok(dout.try_hadamard(mask)?.scale(self.keep_scale()))
    }
}
