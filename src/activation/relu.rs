use crate::error::Result;
use crate::math::matrix::Matrix;

/// Element-wise `max(0, x)`.
pub fn relu_forward(x: &Matrix) -> Matrix {
    x.map(|v| if v > 0.0 { v } else { 0.0 })
}

/// Passes `dout` through where the pre-activation was positive and zeroes
/// it elsewhere (including exactly at 0).
pub fn relu_backward(dout: &Matrix, pre_activation: &Matrix) -> Result<Matrix> {
    let mask = pre_activation.map(|v| if v > 0.0 { 1.0 } else { 0.0 });
    dout.try_hadamard(&mask)
}
