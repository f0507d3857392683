/// Overfits a fully-connected network on a small synthetic batch with plain
/// gradient descent, logging loss and training accuracy per step.
///
/// Run with:
///   cargo run --example overfit --release -- --steps 40
///
/// Real datasets and the full training loop live outside this crate.
use anyhow::{Context, Result};
use clap::Parser;
use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::info;
use tracing_subscriber::EnvFilter;

use fcnet::{Matrix, Network, NetworkConfig, Sgd};

#[derive(Parser, Debug)]
#[command(name = "fcnet", about = "Overfit a fully-connected classifier on a synthetic batch")]
struct Args {
    /// Network configuration JSON; overrides the architecture flags below.
    #[arg(long)]
    config: Option<String>,

    /// Comma-separated hidden layer widths.
    #[arg(long, value_delimiter = ',', default_value = "100")]
    hidden: Vec<usize>,

    #[arg(long, default_value_t = 3072)]
    input_dim: usize,

    #[arg(long, default_value_t = 10)]
    num_classes: usize,

    #[arg(long, default_value_t = 0.0)]
    dropout: f64,

    #[arg(long, default_value_t = 0.0)]
    reg: f64,

    #[arg(long, default_value_t = 1e-2)]
    weight_scale: f64,

    /// Number of synthetic training examples.
    #[arg(long, default_value_t = 50)]
    samples: usize,

    #[arg(long, default_value_t = 20)]
    steps: usize,

    #[arg(long, default_value_t = 0.3)]
    learning_rate: f64,

    #[arg(long, default_value_t = 0)]
    seed: u64,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => NetworkConfig::load_json(path)
            .with_context(|| format!("loading network config from {}", path))?,
        None => NetworkConfig::new(args.hidden.clone(), args.input_dim, args.num_classes)
            .with_dropout(args.dropout)
            .with_reg(args.reg)
            .with_weight_scale(args.weight_scale)
            .with_seed(args.seed),
    };

    let mut network = Network::new(config.clone()).context("building network")?;
    info!(
        layers = network.num_layers(),
        parameters = network.num_parameters(),
        "network ready"
    );

    let mut rng = StdRng::seed_from_u64(args.seed.wrapping_add(1));
    let x = Matrix::random_normal(args.samples, config.input_dim, 1.0, &mut rng)?;
    let labels: Vec<usize> = (0..args.samples).map(|_| rng.gen_range(0..config.num_classes)).collect();

    let sgd = Sgd::new(args.learning_rate);
    for step in 1..=args.steps {
        let (loss, grads) = network.loss_and_grads(&x, &labels)?;
        sgd.step(&mut network, &grads)?;
        let accuracy = network.accuracy(&x, &labels)?;
        info!(step, loss, accuracy, "step");
    }

    Ok(())
}
