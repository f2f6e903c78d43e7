//! Dense (fully connected) layer implementation
//!
//! This module provides the parameter storage for one trainable layer and the
//! three BLAS-backed primitives the network needs: the forward weighted sum,
//! the transposed error product for backpropagation, and the rank-1 gradient
//! descent step.

use cblas::{saxpy, sger, sgemv, Layout, Transpose};

use crate::utils::SimpleRng;

/// Dense layer with a flat weight buffer and a bias vector.
///
/// Weights are stored row-major with shape (output_size × input_size):
/// `weights[j * input_size + k]` is the weight from neuron k of the previous
/// layer to neuron j of this layer, so a whole row is the incoming weight
/// vector of one neuron.
///
/// # Example
///
/// ```
/// use mnist_feedforward::layers::DenseLayer;
///
/// let layer = DenseLayer::new(784, 30);
/// assert_eq!(layer.input_size(), 784);
/// assert_eq!(layer.output_size(), 30);
/// assert_eq!(layer.parameter_count(), 784 * 30 + 30);
/// ```
#[derive(Debug, Clone)]
pub struct DenseLayer {
    input_size: usize,
    output_size: usize,
    weights: Vec<f32>,
    biases: Vec<f32>,
}

impl DenseLayer {
    /// Create a layer with every weight and bias set to zero.
    pub fn new(input_size: usize, output_size: usize) -> Self {
        Self {
            input_size,
            output_size,
            weights: vec![0.0f32; input_size * output_size],
            biases: vec![0.0f32; output_size],
        }
    }

    /// Redraw every weight and bias from a standard normal distribution.
    pub fn randomize(&mut self, rng: &mut SimpleRng) {
        for value in &mut self.weights {
            *value = rng.next_gaussian();
        }
        for value in &mut self.biases {
            *value = rng.next_gaussian();
        }
    }

    /// Weighted sum z = W·input + b for one example.
    ///
    /// `z` is overwritten with the result.
    pub fn weighted_input(&self, input: &[f32], z: &mut [f32]) {
        assert_eq!(
            input.len(),
            self.input_size,
            "input length must match layer input size"
        );
        assert_eq!(
            z.len(),
            self.output_size,
            "output buffer length must match layer output size"
        );

        z.copy_from_slice(&self.biases);
        unsafe {
            sgemv(
                Layout::RowMajor,
                Transpose::None,
                self.output_size as i32,
                self.input_size as i32,
                1.0,
                &self.weights,
                self.input_size as i32,
                input,
                1,
                1.0,
                z,
                1,
            );
        }
    }

    /// Transposed error product Wᵀ·err, pushing this layer's error signal
    /// back to the previous layer.
    ///
    /// `out` has the previous layer's length and is overwritten.
    pub fn backpropagate(&self, err: &[f32], out: &mut [f32]) {
        assert_eq!(
            err.len(),
            self.output_size,
            "error length must match layer output size"
        );
        assert_eq!(
            out.len(),
            self.input_size,
            "output buffer length must match layer input size"
        );

        unsafe {
            sgemv(
                Layout::RowMajor,
                Transpose::Ordinary,
                self.output_size as i32,
                self.input_size as i32,
                1.0,
                &self.weights,
                self.input_size as i32,
                err,
                1,
                0.0,
                out,
                1,
            );
        }
    }

    /// Gradient descent step from an averaged error signal and the averaged
    /// activation of the previous layer:
    ///
    /// `b[j] -= lr * err[j]` and `W[j][k] -= lr * err[j] * prev_activation[k]`.
    pub fn apply_gradient(&mut self, err: &[f32], prev_activation: &[f32], learning_rate: f32) {
        assert_eq!(
            err.len(),
            self.output_size,
            "error length must match layer output size"
        );
        assert_eq!(
            prev_activation.len(),
            self.input_size,
            "activation length must match layer input size"
        );

        unsafe {
            saxpy(
                self.output_size as i32,
                -learning_rate,
                err,
                1,
                &mut self.biases,
                1,
            );
            sger(
                Layout::RowMajor,
                self.output_size as i32,
                self.input_size as i32,
                -learning_rate,
                err,
                1,
                prev_activation,
                1,
                &mut self.weights,
                self.input_size as i32,
            );
        }
    }

    /// Get the input size of the layer.
    pub fn input_size(&self) -> usize {
        self.input_size
    }

    /// Get the output size of the layer.
    pub fn output_size(&self) -> usize {
        self.output_size
    }

    /// Get the number of trainable parameters.
    pub fn parameter_count(&self) -> usize {
        self.weights.len() + self.biases.len()
    }

    /// Flat row-major weight buffer.
    pub fn weights(&self) -> &[f32] {
        &self.weights
    }

    /// Bias vector.
    pub fn biases(&self) -> &[f32] {
        &self.biases
    }

    /// Replace the weight buffer; the length must match the layer shape.
    pub fn set_weights(&mut self, weights: &[f32]) {
        assert_eq!(
            weights.len(),
            self.weights.len(),
            "weight buffer length must match layer shape"
        );
        self.weights.copy_from_slice(weights);
    }

    /// Replace the bias vector; the length must match the layer size.
    pub fn set_biases(&mut self, biases: &[f32]) {
        assert_eq!(
            biases.len(),
            self.biases.len(),
            "bias vector length must match layer size"
        );
        self.biases.copy_from_slice(biases);
    }
}
