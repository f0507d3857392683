//! Finite-difference gradient checking.
//!
//! Used to verify the analytic gradients `Network::loss` returns.

use crate::math::matrix::Matrix;

/// Centered finite-difference estimate of ∂f/∂m for every entry of `at`.
///
/// `f` is evaluated at copies of `at` with a single entry moved by `±h`.
pub fn eval_numerical_gradient<F>(mut f: F, at: &Matrix, h: f64) -> Matrix
where
    F: FnMut(&Matrix) -> f64,
{
    let mut grad = Matrix::zeros(at.rows, at.cols);
    let mut perturbed = at.clone();

    for i in 0..at.len() {
        let original = at.data[i];

        perturbed.data[i] = original + h;
        let f_plus = f(&perturbed);

        perturbed.data[i] = original - h;
        let f_minus = f(&perturbed);

        perturbed.data[i] = original;
        grad.data[i] = (f_plus - f_minus) / (2.0 * h);
    }

    grad
}

/// Largest entry-wise relative error `|a - b| / max(1e-8, |a| + |b|)`.
pub fn rel_error(a: &Matrix, b: &Matrix) -> f64 {
    assert_eq!(a.shape(), b.shape(), "rel_error: shapes differ");
    a.data
        .iter()
        .zip(&b.data)
        .map(|(x, y)| (x - y).abs() / (x.abs() + y.abs()).max(1e-8))
        .fold(0.0, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quadratic_gradient() {
        // f(m) = Σ m_i², ∂f/∂m_i = 2 m_i
        let at = Matrix::from_vec(1, 3, vec![1.0, -2.0, 0.5]).unwrap();
        let grad = eval_numerical_gradient(|m| m.sum_squares(), &at, 1e-5);
        let expected = at.scale(2.0);
        assert!(rel_error(&grad, &expected) < 1e-8);
    }

    #[test]
    fn rel_error_of_identical_matrices_is_zero() {
        let a = Matrix::from_vec(1, 2, vec![0.0, 3.0]).unwrap();
        assert_eq!(rel_error(&a, &a), 0.0);
    }
}
