use crate::error::{FcnetError, Result};
use crate::math::matrix::Matrix;

/// Row-wise softmax. Each row is shifted by its max before exponentiating so
/// large scores cannot overflow.
pub fn softmax(scores: &Matrix) -> Matrix {
    let mut probs = scores.clone();
    for row in probs.data.chunks_mut(scores.cols.max(1)) {
        let max = row.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let mut total = 0.0;
        for v in row.iter_mut() {
            *v = (*v - max).exp();
            total += *v;
        }
        for v in row.iter_mut() {
            *v /= total;
        }
    }
    probs
}

/// Mean cross-entropy of the softmax of `scores` against integer `labels`,
/// and its gradient with respect to `scores`: `(probs - one_hot) / N`.
pub fn softmax_loss(scores: &Matrix, labels: &[usize]) -> Result<(f64, Matrix)> {
    let n = scores.rows;
    if n == 0 {
        return Err(FcnetError::shape("softmax_loss", "at least one example", "an empty batch"));
    }
    if labels.len() != n {
        return Err(FcnetError::shape(
            "softmax_loss",
            format!("{} labels", n),
            format!("{} labels", labels.len()),
        ));
    }
    if let Some((index, &label)) = labels.iter().enumerate().find(|&(_, &l)| l >= scores.cols) {
        return Err(FcnetError::InvalidLabel { index, label, num_classes: scores.cols });
    }

    let mut loss = 0.0;
    for (i, &label) in labels.iter().enumerate() {
        let row = scores.row(i);
        let max = row.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let log_sum: f64 = row.iter().map(|v| (v - max).exp()).sum::<f64>().ln();
        // -log p[label] = log Σ exp(s - max) - (s[label] - max)
        loss += log_sum - (row[label] - max);
    }
    loss /= n as f64;

    if !loss.is_finite() {
        return Err(FcnetError::NumericInstability(format!(
            "softmax loss evaluated to {}",
            loss
        )));
    }

    let mut dscores = softmax(scores);
    for (i, &label) in labels.iter().enumerate() {
        let v = dscores.get(i, label);
        dscores.set(i, label, v - 1.0);
    }
    Ok((loss, dscores.scale(1.0 / n as f64)))
}
