//! A CIFAR-10 sized network driven by plain gradient descent on 50
//! examples must memorize them.

use fcnet::{Matrix, Network, NetworkConfig, Sgd};
use rand::{rngs::StdRng, SeedableRng};

#[test]
fn overfits_fifty_examples() {
    let config = NetworkConfig::new(vec![100], 3072, 10).with_seed(0);
    let mut net = Network::new(config).unwrap();

    let mut rng = StdRng::seed_from_u64(1);
    let x = Matrix::random_normal(50, 3072, 1.0, &mut rng).unwrap();
    let labels: Vec<usize> = (0..50).map(|i| i % 10).collect();
    let sgd = Sgd::new(0.3);

    let mut losses = Vec::new();
    for _ in 0..20 {
        let (loss, grads) = net.loss_and_grads(&x, &labels).unwrap();
        losses.push(loss);
        sgd.step(&mut net, &grads).unwrap();
    }
    assert!(
        losses.windows(2).all(|w| w[1] < w[0]),
        "loss did not decrease monotonically: {:?}",
        losses
    );

    let mut loss = *losses.last().unwrap();
    for _ in 0..300 {
        if loss < 0.1 {
            break;
        }
        let (l, grads) = net.loss_and_grads(&x, &labels).unwrap();
        loss = l;
        sgd.step(&mut net, &grads).unwrap();
    }
    assert!(loss < 0.1, "training loss stalled at {}", loss);
    assert_eq!(net.accuracy(&x, &labels).unwrap(), 1.0);
}
