//! Error types shared across the crate.

use thiserror::Error;

/// Convenience alias used by every fallible operation in this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Failures surfaced by network operations, the dataset loader and the
/// trainer.
///
/// Shape mismatches are always hard errors: a vector of the wrong length is
/// rejected, never truncated or padded.
#[derive(Debug, Error)]
pub enum Error {
    /// A vector or buffer had a different length than the topology requires.
    #[error("dimension mismatch for {context}: expected {expected}, got {actual}")]
    ShapeMismatch {
        context: &'static str,
        expected: usize,
        actual: usize,
    },

    /// A configuration value is degenerate (zero batch size, non-positive
    /// learning rate, empty topology, ...).
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The dataset file is not valid IDX data (bad magic number, truncated
    /// payload, disagreeing counts).
    #[error("malformed dataset: {0}")]
    DatasetFormat(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("could not parse configuration: {0}")]
    ConfigParse(#[from] serde_json::Error),
}
