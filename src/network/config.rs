use serde::{Serialize, Deserialize};

use crate::error::{FcnetError, Result};
use crate::layers::dropout::Dropout;
use crate::math::precision::Precision;

/// Architecture and hyperparameters of a fully-connected network.
///
/// The network is `[linear - relu - (dropout)] x len(hidden_dims) - linear
/// - softmax`. Missing fields in a JSON file fall back to the defaults,
/// which describe a CIFAR-10 sized classifier with one hidden layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// Width of each hidden layer, input side first.
    pub hidden_dims: Vec<usize>,
    /// Number of features per example.
    pub input_dim: usize,
    pub num_classes: usize,
    /// Drop probability in [0, 1); 0 disables dropout.
    pub dropout: f64,
    /// L2 regularization strength.
    pub reg: f64,
    /// Standard deviation of the initial weights.
    pub weight_scale: f64,
    pub precision: Precision,
    /// Seed for the network's random stream; `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        NetworkConfig {
            hidden_dims: vec![100],
            input_dim: 32 * 32 * 3,
            num_classes: 10,
            dropout: 0.0,
            reg: 0.0,
            weight_scale: 1e-2,
            precision: Precision::F32,
            seed: None,
        }
    }
}

impl NetworkConfig {
    pub fn new(hidden_dims: Vec<usize>, input_dim: usize, num_classes: usize) -> Self {
        NetworkConfig {
            hidden_dims,
            input_dim,
            num_classes,
            ..NetworkConfig::default()
        }
    }

    pub fn with_dropout(mut self, dropout: f64) -> Self {
        self.dropout = dropout;
        self
    }

    pub fn with_reg(mut self, reg: f64) -> Self {
        self.reg = reg;
        self
    }

    pub fn with_weight_scale(mut self, weight_scale: f64) -> Self {
        self.weight_scale = weight_scale;
        self
    }

    pub fn with_precision(mut self, precision: Precision) -> Self {
        self.precision = precision;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Hidden layers plus the output layer.
    pub fn num_layers(&self) -> usize {
        self.hidden_dims.len() + 1
    }

    /// `[input_dim, hidden_dims.., num_classes]`; layer `i` maps
    /// `dims[i] -> dims[i + 1]`.
    pub fn dims(&self) -> Vec<usize> {
        let mut dims = Vec::with_capacity(self.hidden_dims.len() + 2);
        dims.push(self.input_dim);
        dims.extend(&self.hidden_dims);
        dims.push(self.num_classes);
        dims
    }

    pub fn validate(&self) -> Result<()> {
        if self.input_dim == 0 {
            return Err(FcnetError::Config("input_dim must be positive".into()));
        }
        if self.num_classes == 0 {
            return Err(FcnetError::Config("num_classes must be positive".into()));
        }
        if let Some(i) = self.hidden_dims.iter().position(|&d| d == 0) {
            return Err(FcnetError::Config(format!("hidden layer {} has width 0", i + 1)));
        }
        Dropout::new(self.dropout)?;
        if !(self.reg >= 0.0) || !self.reg.is_finite() {
            return Err(FcnetError::Config(format!(
                "reg must be a non-negative number, got {}",
                self.reg
            )));
        }
        if !(self.weight_scale > 0.0) || !self.weight_scale.is_finite() {
            return Err(FcnetError::Config(format!(
                "weight_scale must be positive, got {}",
                self.weight_scale
            )));
        }
        Ok(())
    }

    /// Writes the configuration as pretty-printed JSON.
    pub fn save_json(&self, path: &str) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Reads and validates a configuration written by `save_json` (or by
    /// hand; absent fields take their defaults).
    pub fn load_json(path: &str) -> Result<NetworkConfig> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        let config: NetworkConfig = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dims_chain_covers_every_layer() {
        let c = NetworkConfig::new(vec![5, 7], 4, 3);
        assert_eq!(c.num_layers(), 3);
        assert_eq!(c.dims(), vec![4, 5, 7, 3]);
        assert_eq!(NetworkConfig::new(vec![], 4, 3).dims(), vec![4, 3]);
    }

    #[test]
    fn defaults_are_valid() {
        NetworkConfig::default().validate().unwrap();
    }

    #[test]
    fn rejects_bad_values() {
        let base = NetworkConfig::new(vec![5], 4, 3);
        assert!(NetworkConfig::new(vec![5, 0], 4, 3).validate().is_err());
        assert!(NetworkConfig::new(vec![5], 0, 3).validate().is_err());
        assert!(NetworkConfig::new(vec![5], 4, 0).validate().is_err());
        assert!(base.clone().with_dropout(1.0).validate().is_err());
        assert!(base.clone().with_reg(-1e-3).validate().is_err());
        assert!(base.clone().with_reg(f64::NAN).validate().is_err());
        assert!(base.clone().with_weight_scale(0.0).validate().is_err());
        assert!(matches!(
            base.with_dropout(-0.5).validate().unwrap_err(),
            FcnetError::Config(_)
        ));
    }

    #[test]
    fn partial_json_takes_defaults() {
        let c: NetworkConfig =
            serde_json::from_str(r#"{"hidden_dims": [20, 10], "input_dim": 8, "seed": 3}"#).unwrap();
        assert_eq!(c.hidden_dims, vec![20, 10]);
        assert_eq!(c.num_classes, 10);
        assert_eq!(c.precision, Precision::F32);
        assert_eq!(c.seed, Some(3));
    }
}
