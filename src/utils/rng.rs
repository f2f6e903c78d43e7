//! Simple random number generator for reproducibility.
//!
//! This module provides a lightweight xorshift-based PRNG that doesn't require
//! external dependencies, ensuring reproducible results across runs. The
//! generator is passed explicitly into every randomized operation (weight
//! initialization, dataset shuffling) so that training runs can be replayed
//! from a seed.

use std::f64::consts::PI;
use std::time::{SystemTime, UNIX_EPOCH};

/// Simple RNG for reproducibility without external crates.
///
/// Uses xorshift algorithm for fast, deterministic random number generation.
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u64,
}

impl SimpleRng {
    /// Create a new RNG with explicit seed (if zero, use a fixed value).
    pub fn new(seed: u64) -> Self {
        let state = if seed == 0 { 0x9e3779b97f4a7c15 } else { seed };
        Self { state }
    }

    /// Reseed based on the current time.
    pub fn reseed_from_time(&mut self) {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos() as u64;
        self.state = if nanos == 0 {
            0x9e3779b97f4a7c15
        } else {
            nanos
        };
    }

    /// Basic xorshift to generate u32.
    pub fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        (x >> 32) as u32
    }

    /// Convert to [0, 1).
    pub fn next_f32(&mut self) -> f32 {
        self.next_u32() as f32 / u32::MAX as f32
    }

    /// Standard normal sample (mean 0, variance 1) via Box-Muller.
    pub fn next_gaussian(&mut self) -> f32 {
        // u1 lands in (0, 1] so the logarithm stays finite.
        let u1 = (self.next_u32() as f64 + 1.0) / (u32::MAX as f64 + 1.0);
        let u2 = self.next_u32() as f64 / (u32::MAX as f64 + 1.0);
        ((-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos()) as f32
    }

    /// Integer sample in [0, upper).
    pub fn gen_usize(&mut self, upper: usize) -> usize {
        if upper == 0 {
            0
        } else {
            (self.next_u32() as usize) % upper
        }
    }

    /// Fisher-Yates shuffle for usize slices.
    pub fn shuffle_usize(&mut self, data: &mut [usize]) {
        if data.len() <= 1 {
            return;
        }
        for i in (1..data.len()).rev() {
            let j = self.gen_usize(i + 1);
            data.swap(i, j);
        }
    }
}
