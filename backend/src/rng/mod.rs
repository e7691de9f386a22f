//! Deterministic random number generation
//!
//! Uses xorshift64* algorithm for fast, deterministic random number generation.
//! CRITICAL: All randomness in the simulator MUST go through this module.
//!
//! The simulator is generic over [`RandomSource`] so tests can drive every
//! decision point with scripted draws.

mod scripted;
mod xorshift;

pub use scripted::ScriptedRng;
pub use xorshift::{derive_seed, RngManager};

/// A source of uniform random draws.
///
/// Every stochastic decision in a life goes through one of these three
/// methods, in a fixed order per simulated year.
pub trait RandomSource {
    /// Uniform f64 in [0.0, 1.0)
    fn next_f64(&mut self) -> f64;

    /// Uniform integer in [min, max] (both inclusive)
    fn range_inclusive(&mut self, min: i64, max: i64) -> i64;

    /// Uniform index in [0, len)
    ///
    /// # Panics
    /// Panics if `len` is zero.
    fn index(&mut self, len: usize) -> usize {
        assert!(len > 0, "cannot choose from an empty pool");
        self.range_inclusive(0, len as i64 - 1) as usize
    }

    /// Uniformly pick one element of a non-empty slice
    fn choose<'a, T>(&mut self, items: &'a [T]) -> &'a T
    where
        Self: Sized,
    {
        &items[self.index(items.len())]
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_f64(&mut self) -> f64 {
        (**self).next_f64()
    }

    fn range_inclusive(&mut self, min: i64, max: i64) -> i64 {
        (**self).range_inclusive(min, max)
    }

    fn index(&mut self, len: usize) -> usize {
        (**self).index(len)
    }
}
