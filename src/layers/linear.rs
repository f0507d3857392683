use crate::error::{FcnetError, Result};
use crate::math::matrix::Matrix;

/// Gradients produced by `linear_backward`.
#[derive(Debug, Clone)]
pub struct LinearGrads {
    /// ∂L/∂x, shape `(N, D)`.
    pub dx: Matrix,
    /// ∂L/∂W, shape `(D, M)`.
    pub dw: Matrix,
    /// ∂L/∂b, shape `(1, M)`.
    pub db: Matrix,
}

/// `x · W + b` with `b` broadcast over the batch.
///
/// `x` is `(N, D)`, `w` is `(D, M)`, `b` is `(1, M)`.
pub fn linear_forward(x: &Matrix, w: &Matrix, b: &Matrix) -> Result<Matrix> {
    if b.shape() != (1, w.cols) {
        return Err(FcnetError::shape(
            "linear_forward bias",
            format!("1x{}", w.cols),
            format!("{}x{}", b.rows, b.cols),
        ));
    }
    Ok(x.matmul(w)?.add_row(b))
}

pub fn linear_backward(dout: &Matrix, x: &Matrix, w: &Matrix) -> Result<LinearGrads> {
    if dout.shape() != (x.rows, w.cols) {
        return Err(FcnetError::shape(
            "linear_backward upstream gradient",
            format!("{}x{}", x.rows, w.cols),
            format!("{}x{}", dout.rows, dout.cols),
        ));
    }
    Ok(LinearGrads {
        dx: dout.matmul(&w.transpose())?,
        dw: x.transpose().matmul(dout)?,
        db: dout.sum_rows(),
    })
}
