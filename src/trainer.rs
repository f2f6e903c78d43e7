//! Training loop driver and evaluation
//!
//! One epoch: shuffle an index array (keeping input/label pairs intact),
//! walk the training set in mini-batches, sum per-example gradient bundles,
//! divide by the batch's example count, apply one update, then score the
//! network on the test set. The final batch of an epoch may be shorter than
//! the configured size.

use crate::config::TrainingConfig;
use crate::dataset::Dataset;
use crate::error::{Error, Result};
use crate::gradient::GradientBundle;
use crate::network::Network;
use crate::utils::SimpleRng;

/// Accuracy of one epoch's evaluation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EpochReport {
    pub epoch: usize,
    pub correct: usize,
    pub total: usize,
}

/// Train a network with mini-batch stochastic gradient descent.
///
/// After each epoch the network is evaluated on `test_set` and the result is
/// passed to `on_epoch`. Fails fast on degenerate configuration: zero batch
/// size, a batch size exceeding the training set, or a non-positive learning
/// rate.
pub fn train<F>(
    network: &mut Network,
    training_set: &Dataset,
    test_set: &Dataset,
    config: &TrainingConfig,
    rng: &mut SimpleRng,
    mut on_epoch: F,
) -> Result<()>
where
    F: FnMut(&EpochReport),
{
    config.validate()?;
    if config.batch_size > training_set.len() {
        return Err(Error::InvalidConfig(format!(
            "batch_size {} exceeds training set size {}",
            config.batch_size,
            training_set.len()
        )));
    }

    let mut indices: Vec<usize> = (0..training_set.len()).collect();

    for epoch in 0..config.num_epochs {
        // Pairing-preserving shuffle: the permutation is applied to indices,
        // so inputs and targets stay aligned.
        rng.shuffle_usize(&mut indices);

        for batch_start in (0..indices.len()).step_by(config.batch_size) {
            let batch_end = (batch_start + config.batch_size).min(indices.len());
            let batch = &indices[batch_start..batch_end];

            let mut sum = GradientBundle::zeros(network.topology());
            for &example in batch {
                let bundle = network
                    .compute_error(training_set.input(example), training_set.target(example))?;
                sum.accumulate(&bundle)?;
            }
            sum.average_over(batch.len())?;
            network.apply_update(&sum, config.learning_rate)?;
        }

        let correct = evaluate(network, test_set)?;
        on_epoch(&EpochReport {
            epoch,
            correct,
            total: test_set.len(),
        });
    }

    Ok(())
}

/// Count how many examples the network classifies correctly.
///
/// An example counts as correct when the arg-max of the network output
/// matches the arg-max of the one-hot target.
pub fn evaluate(network: &Network, dataset: &Dataset) -> Result<usize> {
    let mut correct = 0usize;
    for (input, target) in dataset.iter() {
        let output = network.process(input)?;
        if argmax(&output) == argmax(target) {
            correct += 1;
        }
    }
    Ok(correct)
}

/// Index of the largest value; the lowest index wins ties.
pub fn argmax(values: &[f32]) -> usize {
    let mut best = 0usize;
    let mut best_value = f32::NEG_INFINITY;
    for (i, &value) in values.iter().enumerate() {
        if value > best_value {
            best_value = value;
            best = i;
        }
    }
    best
}
