//! Evaluation-mode behaviour of `Network::loss`.

use fcnet::{FcnetError, LossOutput, Matrix, Network, NetworkConfig, Precision};
use rand::{rngs::StdRng, SeedableRng};

fn random_batch(rows: usize, cols: usize, seed: u64) -> Matrix {
    let mut rng = StdRng::seed_from_u64(seed);
    Matrix::random_normal(rows, cols, 1.0, &mut rng).unwrap()
}

fn scores_of(net: &mut Network, x: &Matrix) -> Matrix {
    match net.loss(x, None).unwrap() {
        LossOutput::Scores(scores) => scores,
        LossOutput::Train { .. } => panic!("no labels were given, expected scores"),
    }
}

#[test]
fn scores_have_one_row_per_example() {
    let mut net = Network::new(NetworkConfig::new(vec![20, 10], 12, 7).with_seed(0)).unwrap();
    let scores = scores_of(&mut net, &random_batch(9, 12, 1));
    assert_eq!(scores.shape(), (9, 7));
}

#[test]
fn inference_is_deterministic_even_with_dropout() {
    let mut net = Network::new(
        NetworkConfig::new(vec![30, 30], 8, 4).with_dropout(0.5).with_seed(3),
    )
    .unwrap();
    let x = random_batch(6, 8, 2);
    let first = scores_of(&mut net, &x);
    let second = scores_of(&mut net, &x);
    assert_eq!(first, second);
}

#[test]
fn eval_mode_dropout_equals_no_dropout() {
    let base = NetworkConfig::new(vec![16], 5, 3)
        .with_precision(Precision::F64)
        .with_seed(21);
    let plain = Network::new(base.clone()).unwrap();
    let dropped = Network::new(base.with_dropout(0.6)).unwrap();
    assert_eq!(plain.params(), dropped.params());

    let x = random_batch(10, 5, 4);
    assert_eq!(plain.scores(&x).unwrap(), dropped.scores(&x).unwrap());
}

#[test]
fn training_dropout_draws_fresh_masks_per_call() {
    let mut net = Network::new(
        NetworkConfig::new(vec![64], 6, 3)
            .with_precision(Precision::F64)
            .with_weight_scale(0.5)
            .with_dropout(0.5)
            .with_seed(8),
    )
    .unwrap();
    let x = random_batch(8, 6, 5);
    let labels = [0, 1, 2, 0, 1, 2, 0, 1];
    let (a, _) = net.loss_and_grads(&x, &labels).unwrap();
    let (b, _) = net.loss_and_grads(&x, &labels).unwrap();
    assert_ne!(a, b);
}

#[test]
fn loss_never_mutates_parameters() {
    let mut net = Network::new(NetworkConfig::new(vec![4], 3, 2).with_dropout(0.2).with_seed(1)).unwrap();
    let before = net.params().to_vec();
    let x = random_batch(2, 3, 9);
    net.loss(&x, Some(&[0, 1])).unwrap();
    net.loss(&x, None).unwrap();
    assert_eq!(net.params(), &before[..]);
}

#[test]
fn f32_networks_emit_single_precision_values() {
    let mut net = Network::new(NetworkConfig::new(vec![4], 3, 2).with_seed(1)).unwrap();
    let x = random_batch(2, 3, 9);
    let scores = scores_of(&mut net, &x);
    assert!(scores.data.iter().all(|&s| (s as f32) as f64 == s));
    let (loss, grads) = net.loss_and_grads(&x, &[1, 1]).unwrap();
    assert_eq!((loss as f32) as f64, loss);
    assert!(grads[0].weights.data.iter().all(|&g| (g as f32) as f64 == g));
}

#[test]
fn mismatched_batches_are_rejected() {
    let mut net = Network::new(NetworkConfig::new(vec![4], 3, 2).with_seed(1)).unwrap();
    let err = net.loss(&random_batch(2, 4, 0), None).unwrap_err();
    assert!(matches!(err, FcnetError::ShapeMismatch { .. }));
    let err = net.loss(&random_batch(2, 3, 0), Some(&[0, 1, 1])).unwrap_err();
    assert!(matches!(err, FcnetError::ShapeMismatch { .. }));
    let err = net.loss(&random_batch(2, 3, 0), Some(&[0, 2])).unwrap_err();
    assert!(matches!(err, FcnetError::InvalidLabel { .. }));
}

#[test]
fn extreme_inputs_do_not_overflow() {
    let mut net = Network::new(
        NetworkConfig::new(vec![8], 4, 3).with_precision(Precision::F64).with_weight_scale(1.0).with_seed(2),
    )
    .unwrap();
    let x = random_batch(3, 4, 1).scale(1e4);
    let (loss, grads) = net.loss_and_grads(&x, &[0, 1, 2]).unwrap();
    assert!(loss.is_finite());
    assert!(grads.iter().all(|g| g.weights.is_finite() && g.biases.is_finite()));
}
