pub mod error;
pub mod math;
pub mod activation;
pub mod layers;
pub mod loss;
pub mod network;
pub mod optim;
pub mod gradcheck;

// Convenience re-exports
pub use error::{FcnetError, Result};
pub use math::matrix::Matrix;
pub use math::precision::Precision;
pub use layers::dropout::{Dropout, Mode};
pub use loss::softmax::softmax_loss;
pub use network::config::NetworkConfig;
pub use network::network::{LossOutput, Network};
pub use network::params::{Gradients, LayerGrads, LayerParams};
pub use optim::sgd::Sgd;
