//! Sigmoid activation function
//!
//! Every layer in the network is sigmoid-activated; both the value and the
//! derivative are evaluated at the pre-activation (weighted sum) z.

/// Sigmoid activation: 1 / (1 + exp(-x)).
///
/// Split by the sign of the argument so the exponential never overflows for
/// large negative inputs; the result is identical to the naive formula.
pub fn sigmoid(x: f32) -> f32 {
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let e = x.exp();
        e / (1.0 + e)
    }
}

/// Sigmoid derivative evaluated at the pre-activation z.
///
/// Returns sigmoid(z) * (1 - sigmoid(z)).
pub fn sigmoid_prime(z: f32) -> f32 {
    let s = sigmoid(z);
    s * (1.0 - s)
}
