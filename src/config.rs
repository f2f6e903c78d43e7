//! Configuration structures for training
//!
//! This module provides the training configuration parsed from a JSON file:
//! the network topology and the stochastic gradient descent hyperparameters.
//!
//! # Example
//!
//! ```json
//! {
//!   "layer_sizes": [784, 30, 10],
//!   "learning_rate": 3.0,
//!   "batch_size": 10,
//!   "num_epochs": 30,
//!   "seed": 42
//! }
//! ```

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::topology::Topology;

/// Training configuration: topology plus SGD hyperparameters.
#[derive(Debug, Clone, Deserialize)]
pub struct TrainingConfig {
    /// Neuron count per layer; layer 0 is the input layer.
    pub layer_sizes: Vec<usize>,

    /// Step size for gradient descent (must be positive).
    pub learning_rate: f32,

    /// Examples per mini-batch (must be at least 1 and no larger than the
    /// training set).
    pub batch_size: usize,

    /// Full passes over the shuffled training set. Zero is valid and trains
    /// nothing.
    pub num_epochs: usize,

    /// RNG seed for reproducible runs; omit to seed from the clock.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl TrainingConfig {
    /// Check every field that can be validated without the dataset.
    ///
    /// The batch-size-versus-dataset-size bound is checked by the trainer,
    /// which is the first code that sees both.
    pub fn validate(&self) -> Result<()> {
        Topology::new(self.layer_sizes.clone())?;
        if !(self.learning_rate > 0.0) || !self.learning_rate.is_finite() {
            return Err(Error::InvalidConfig(format!(
                "learning_rate must be positive and finite, got {}",
                self.learning_rate
            )));
        }
        if self.batch_size == 0 {
            return Err(Error::InvalidConfig(
                "batch_size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// The validated topology described by `layer_sizes`.
    pub fn topology(&self) -> Result<Topology> {
        Topology::new(self.layer_sizes.clone())
    }
}

/// Loads a training configuration from a JSON file.
///
/// Reads the file at `path`, deserializes it and validates the values.
///
/// # Examples
///
/// ```no_run
/// use mnist_feedforward::config::load_config;
///
/// let config = load_config("config/mnist.json").unwrap();
/// assert_eq!(config.layer_sizes, vec![784, 30, 10]);
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<TrainingConfig> {
    let contents = fs::read_to_string(path)?;
    let config: TrainingConfig = serde_json::from_str(&contents)?;
    config.validate()?;
    Ok(config)
}
