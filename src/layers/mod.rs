//! Layer storage for the feed-forward network
//!
//! Only fully connected (dense) layers exist in this network; every layer is
//! sigmoid-activated by the caller.

pub mod dense;

pub use dense::DenseLayer;
