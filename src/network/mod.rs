pub mod config;
pub mod init;
pub mod network;
pub mod params;

pub use config::NetworkConfig;
pub use init::random_init;
pub use network::{Network, LossOutput};
pub use params::{Gradients, LayerGrads, LayerParams};
