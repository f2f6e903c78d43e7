//! Layer topology description
//!
//! A topology is the ordered list of neuron counts per layer, e.g.
//! `[784, 30, 10]` for MNIST. Layer 0 is the input layer; every later layer
//! is trainable. The topology fixes the shape of every weight buffer, bias
//! vector and gradient bundle in the crate.

use crate::error::{Error, Result};

/// Immutable, validated sequence of layer sizes.
///
/// # Examples
///
/// ```
/// use mnist_feedforward::topology::Topology;
///
/// let topology = Topology::new(vec![784, 30, 10]).unwrap();
/// assert_eq!(topology.num_layers(), 3);
/// assert_eq!(topology.input_size(), 784);
/// assert_eq!(topology.output_size(), 10);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topology {
    sizes: Vec<usize>,
}

impl Topology {
    /// Build a topology from per-layer neuron counts.
    ///
    /// Rejects an empty sequence and any zero-sized layer.
    pub fn new(sizes: Vec<usize>) -> Result<Self> {
        if sizes.is_empty() {
            return Err(Error::InvalidConfig(
                "topology needs at least one layer".to_string(),
            ));
        }
        if let Some(pos) = sizes.iter().position(|&s| s == 0) {
            return Err(Error::InvalidConfig(format!(
                "layer {} has zero neurons",
                pos
            )));
        }
        Ok(Self { sizes })
    }

    /// Total number of layers, input layer included.
    pub fn num_layers(&self) -> usize {
        self.sizes.len()
    }

    /// Neuron count of one layer.
    pub fn size(&self, layer: usize) -> usize {
        self.sizes[layer]
    }

    /// Size of the input layer (layer 0).
    pub fn input_size(&self) -> usize {
        self.sizes[0]
    }

    /// Size of the output layer.
    pub fn output_size(&self) -> usize {
        self.sizes[self.sizes.len() - 1]
    }

    /// All layer sizes in order.
    pub fn sizes(&self) -> &[usize] {
        &self.sizes
    }
}
