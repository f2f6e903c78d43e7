//! Per-example gradient bundles
//!
//! `compute_error` returns one bundle per training example: the error signal
//! of every layer plus the activation of every layer. The trainer sums
//! bundles over a mini-batch and divides by the example count before handing
//! the average to the updater.

use crate::error::{Error, Result};
use crate::topology::Topology;

/// Error signals and activations for every layer of the network, including
/// the input layer.
///
/// `errors[l][j]` is ∂Cost/∂z for neuron j of layer l; `activations[l][j]`
/// is the sigmoid output of that neuron. The updater reads `errors[l]` and
/// `activations[l - 1]` for every trainable layer l; `errors[0]` is carried
/// for shape symmetry but never applied, because layer 0 is frozen.
#[derive(Debug, Clone, PartialEq)]
pub struct GradientBundle {
    pub errors: Vec<Vec<f32>>,
    pub activations: Vec<Vec<f32>>,
}

impl GradientBundle {
    /// Zeroed bundle shaped for one network topology.
    pub fn zeros(topology: &Topology) -> Self {
        let errors: Vec<Vec<f32>> = topology.sizes().iter().map(|&s| vec![0.0; s]).collect();
        Self {
            activations: errors.clone(),
            errors,
        }
    }

    /// Element-wise sum with another bundle of the same shape.
    pub fn accumulate(&mut self, other: &GradientBundle) -> Result<()> {
        if other.errors.len() != self.errors.len() {
            return Err(Error::ShapeMismatch {
                context: "gradient bundle layer count",
                expected: self.errors.len(),
                actual: other.errors.len(),
            });
        }
        for (mine, theirs) in self.errors.iter_mut().zip(&other.errors) {
            if mine.len() != theirs.len() {
                return Err(Error::ShapeMismatch {
                    context: "gradient bundle error signal",
                    expected: mine.len(),
                    actual: theirs.len(),
                });
            }
            for (m, t) in mine.iter_mut().zip(theirs) {
                *m += t;
            }
        }
        for (mine, theirs) in self.activations.iter_mut().zip(&other.activations) {
            if mine.len() != theirs.len() {
                return Err(Error::ShapeMismatch {
                    context: "gradient bundle activation",
                    expected: mine.len(),
                    actual: theirs.len(),
                });
            }
            for (m, t) in mine.iter_mut().zip(theirs) {
                *m += t;
            }
        }
        Ok(())
    }

    /// Divide every element by a mini-batch example count.
    pub fn average_over(&mut self, count: usize) -> Result<()> {
        if count == 0 {
            return Err(Error::InvalidConfig(
                "cannot average a gradient bundle over zero examples".to_string(),
            ));
        }
        let divisor = count as f32;
        for layer in self.errors.iter_mut().chain(self.activations.iter_mut()) {
            for value in layer.iter_mut() {
                *value /= divisor;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_topology() -> Topology {
        Topology::new(vec![2, 2]).unwrap()
    }

    #[test]
    fn test_zeros_matches_topology_shape() {
        let bundle = GradientBundle::zeros(&small_topology());
        assert_eq!(bundle.errors.len(), 2);
        assert_eq!(bundle.activations.len(), 2);
        assert_eq!(bundle.errors[0], vec![0.0, 0.0]);
        assert_eq!(bundle.activations[1], vec![0.0, 0.0]);
    }

    #[test]
    fn test_accumulate_and_average() {
        let topology = small_topology();
        let mut sum = GradientBundle::zeros(&topology);

        let mut one = GradientBundle::zeros(&topology);
        one.errors[1] = vec![1.0, 3.0];
        one.activations[0] = vec![2.0, 4.0];

        sum.accumulate(&one).unwrap();
        sum.accumulate(&one).unwrap();
        sum.average_over(2).unwrap();

        assert_eq!(sum.errors[1], vec![1.0, 3.0]);
        assert_eq!(sum.activations[0], vec![2.0, 4.0]);
    }

    #[test]
    fn test_accumulate_rejects_shape_mismatch() {
        let mut sum = GradientBundle::zeros(&small_topology());
        let other = GradientBundle::zeros(&Topology::new(vec![2, 3]).unwrap());

        assert!(matches!(
            sum.accumulate(&other),
            Err(Error::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_average_over_zero_is_an_error() {
        let mut bundle = GradientBundle::zeros(&small_topology());
        assert!(matches!(
            bundle.average_over(0),
            Err(Error::InvalidConfig(_))
        ));
    }
}
