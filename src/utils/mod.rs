//! Shared utilities for the network implementation
//!
//! This module provides random number generation and the sigmoid activation
//! function used by every layer.

pub mod activations;
pub mod rng;

pub use activations::{sigmoid, sigmoid_prime};
pub use rng::SimpleRng;
