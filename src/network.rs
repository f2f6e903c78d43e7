//! Feed-forward network state and its three numeric operations
//!
//! The network owns one `DenseLayer` per computed layer and implements
//! forward propagation, backpropagation and the gradient descent update.
//!
//! Layer 0 is a frozen identity pass-through: conceptually every input
//! neuron has the single weight 1.0 and bias 0, so its weighted sum equals
//! the raw input and its activation is `sigmoid(input)`. No storage is
//! allocated for these parameters, which makes the "never train layer 0"
//! rule structural instead of a check repeated in every method. Note that
//! sigmoid IS applied to the pass-through, so unnormalized pixel intensities
//! reach layer 1 heavily saturated; this matches the behavior the rest of
//! the numbers in this crate are pinned to.

use crate::error::{Error, Result};
use crate::gradient::GradientBundle;
use crate::layers::DenseLayer;
use crate::topology::Topology;
use crate::utils::{sigmoid, sigmoid_prime, SimpleRng};

/// All weights and biases of a feed-forward network.
///
/// Created zeroed; call [`Network::randomize`] before training.
///
/// # Examples
///
/// ```
/// use mnist_feedforward::network::Network;
/// use mnist_feedforward::topology::Topology;
/// use mnist_feedforward::utils::SimpleRng;
///
/// let topology = Topology::new(vec![784, 30, 10]).unwrap();
/// let mut network = Network::new(topology);
/// network.randomize(&mut SimpleRng::new(42));
///
/// let output = network.process(&vec![0.0; 784]).unwrap();
/// assert_eq!(output.len(), 10);
/// ```
#[derive(Debug, Clone)]
pub struct Network {
    topology: Topology,
    layers: Vec<DenseLayer>,
}

impl Network {
    /// Allocate zeroed weights and biases shaped by the topology.
    pub fn new(topology: Topology) -> Self {
        let layers = topology
            .sizes()
            .windows(2)
            .map(|pair| DenseLayer::new(pair[0], pair[1]))
            .collect();
        Self { topology, layers }
    }

    /// Redraw every trainable weight and bias from N(0, 1).
    ///
    /// May be called repeatedly to re-initialize. Layer 0 has no trainable
    /// parameters and is unaffected.
    pub fn randomize(&mut self, rng: &mut SimpleRng) {
        for layer in &mut self.layers {
            layer.randomize(rng);
        }
    }

    /// The topology this network was built from.
    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    /// The trainable layers; index t holds layer t + 1 of the topology.
    pub fn layers(&self) -> &[DenseLayer] {
        &self.layers
    }

    /// Mutable access to one trainable layer, indexed like [`Network::layers`].
    pub fn layer_mut(&mut self, index: usize) -> &mut DenseLayer {
        &mut self.layers[index]
    }

    /// Run an input vector through every layer and return the output layer's
    /// activation.
    ///
    /// Pure function of the input and the current weights; no side effects.
    pub fn process(&self, input: &[f32]) -> Result<Vec<f32>> {
        self.check_input(input)?;

        // Layer 0: z equals the raw input, activation is sigmoid(z).
        let mut activation: Vec<f32> = input.iter().map(|&x| sigmoid(x)).collect();
        for layer in &self.layers {
            let mut z = vec![0.0f32; layer.output_size()];
            layer.weighted_input(&activation, &mut z);
            for value in z.iter_mut() {
                *value = sigmoid(*value);
            }
            activation = z;
        }
        Ok(activation)
    }

    /// Backpropagation for one training example.
    ///
    /// Runs the forward pass keeping every layer's weighted sum and
    /// activation, computes the output-layer error under the quadratic cost,
    /// then propagates the error signal backward through the transposed
    /// weights down to and including layer 0. Returns the per-layer error
    /// signals together with the per-layer activations; the caller needs
    /// activation l-1 to form layer l's weight gradient.
    ///
    /// Deterministic for fixed weights and arguments; never mutates the
    /// network.
    pub fn compute_error(&self, input: &[f32], expected: &[f32]) -> Result<GradientBundle> {
        self.check_input(input)?;
        if expected.len() != self.topology.output_size() {
            return Err(Error::ShapeMismatch {
                context: "expected output vector",
                expected: self.topology.output_size(),
                actual: expected.len(),
            });
        }

        let num_layers = self.topology.num_layers();

        // Forward pass, caching z and a for every layer.
        let mut weighted_inputs: Vec<Vec<f32>> = Vec::with_capacity(num_layers);
        let mut activations: Vec<Vec<f32>> = Vec::with_capacity(num_layers);
        weighted_inputs.push(input.to_vec());
        activations.push(input.iter().map(|&x| sigmoid(x)).collect());
        for layer in &self.layers {
            let mut z = vec![0.0f32; layer.output_size()];
            layer.weighted_input(&activations[activations.len() - 1], &mut z);
            let a = z.iter().map(|&v| sigmoid(v)).collect();
            weighted_inputs.push(z);
            activations.push(a);
        }

        let mut errors: Vec<Vec<f32>> = vec![Vec::new(); num_layers];

        // Output layer: err = (a - y) * sigmoid'(z), quadratic cost.
        let last = num_layers - 1;
        errors[last] = activations[last]
            .iter()
            .zip(expected)
            .zip(&weighted_inputs[last])
            .map(|((&a, &y), &z)| (a - y) * sigmoid_prime(z))
            .collect();

        // Hidden layers and layer 0: err[l] = sigmoid'(z[l]) ⊙ (W[l+1]ᵀ · err[l+1]).
        for l in (0..last).rev() {
            let upper = &self.layers[l];
            let mut weighted_error = vec![0.0f32; upper.input_size()];
            upper.backpropagate(&errors[l + 1], &mut weighted_error);
            errors[l] = weighted_error
                .iter()
                .zip(&weighted_inputs[l])
                .map(|(&w, &z)| w * sigmoid_prime(z))
                .collect();
        }

        Ok(GradientBundle {
            errors,
            activations,
        })
    }

    /// Gradient descent step from a batch-averaged bundle.
    ///
    /// For every trainable layer l: `b[l][j] -= lr * err[l][j]` and
    /// `W[l][j][k] -= lr * err[l][j] * a[l-1][k]`. The bundle must already
    /// be the per-batch average; averaging is the trainer's job. Layer 0 has
    /// no parameters and `errors[0]` is ignored.
    pub fn apply_update(&mut self, bundle: &GradientBundle, learning_rate: f32) -> Result<()> {
        let num_layers = self.topology.num_layers();
        if bundle.errors.len() != num_layers || bundle.activations.len() != num_layers {
            return Err(Error::ShapeMismatch {
                context: "gradient bundle layer count",
                expected: num_layers,
                actual: bundle.errors.len().min(bundle.activations.len()),
            });
        }
        for (l, layer) in self.layers.iter().enumerate() {
            if bundle.errors[l + 1].len() != layer.output_size() {
                return Err(Error::ShapeMismatch {
                    context: "gradient bundle error signal",
                    expected: layer.output_size(),
                    actual: bundle.errors[l + 1].len(),
                });
            }
            if bundle.activations[l].len() != layer.input_size() {
                return Err(Error::ShapeMismatch {
                    context: "gradient bundle activation",
                    expected: layer.input_size(),
                    actual: bundle.activations[l].len(),
                });
            }
        }

        for (l, layer) in self.layers.iter_mut().enumerate() {
            layer.apply_gradient(&bundle.errors[l + 1], &bundle.activations[l], learning_rate);
        }
        Ok(())
    }

    fn check_input(&self, input: &[f32]) -> Result<()> {
        if input.len() != self.topology.input_size() {
            return Err(Error::ShapeMismatch {
                context: "input vector",
                expected: self.topology.input_size(),
                actual: input.len(),
            });
        }
        Ok(())
    }
}
