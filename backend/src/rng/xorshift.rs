//! xorshift64* random number generator
//!
//! This is a fast, high-quality PRNG that is deterministic and suitable
//! for simulation purposes.
//!
//! # Algorithm
//!
//! xorshift64* is a variant of xorshift that passes TestU01's BigCrush
//! statistical tests. It uses 64-bit state and produces 64-bit output.
//!
//! # Determinism
//!
//! Same seed → same sequence of random numbers, and therefore the same life.
//! Batches derive one seed per life with [`derive_seed`], so each life can be
//! reproduced in isolation.

use serde::{Deserialize, Serialize};

use super::RandomSource;

/// Golden-ratio increment used to spread derived seeds apart
const SEED_SPREAD: u64 = 0x9e37_79b9_7f4a_7c15;

/// Derive an independent seed for the `index`-th life of a batch
///
/// # Example
/// ```
/// use life_simulator_core_rs::rng::derive_seed;
///
/// assert_eq!(derive_seed(42, 3), derive_seed(42, 3));
/// assert_ne!(derive_seed(42, 3), derive_seed(42, 4));
/// ```
pub fn derive_seed(master_seed: u64, index: u64) -> u64 {
    master_seed ^ index.wrapping_add(1).wrapping_mul(SEED_SPREAD)
}

/// Deterministic random number generator using xorshift64*
///
/// # Example
/// ```
/// use life_simulator_core_rs::RngManager;
///
/// let mut rng = RngManager::new(12345);
/// let value = rng.next();
/// let range_value = rng.range(0, 100); // [0, 100)
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngManager {
    /// Internal state (64-bit)
    state: u64,
}

impl RngManager {
    /// Create a new RNG with given seed
    ///
    /// A zero seed is replaced with 1 (xorshift cannot leave the zero state).
    pub fn new(seed: u64) -> Self {
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u64 value
    pub fn next(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545F4914F6CDD1D)
    }

    /// Generate random value in range [min, max)
    ///
    /// # Panics
    /// Panics if min >= max
    ///
    /// # Example
    /// ```
    /// use life_simulator_core_rs::RngManager;
    ///
    /// let mut rng = RngManager::new(12345);
    /// let offset = rng.range(-15, 16); // health offset in [-15, 15]
    /// assert!((-15..=15).contains(&offset));
    /// ```
    pub fn range(&mut self, min: i64, max: i64) -> i64 {
        assert!(min < max, "min must be less than max");

        let value = self.next();
        let range_size = (max - min) as u64;
        min + (value % range_size) as i64
    }

    /// Get current RNG state (for replay)
    pub fn get_state(&self) -> u64 {
        self.state
    }
}

impl RandomSource for RngManager {
    /// Random f64 in [0.0, 1.0), built from the top 53 bits
    fn next_f64(&mut self) -> f64 {
        let value = self.next();
        (value >> 11) as f64 * (1.0 / ((1u64 << 53) as f64))
    }

    fn range_inclusive(&mut self, min: i64, max: i64) -> i64 {
        assert!(min <= max, "min must not exceed max");
        self.range(min, max + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_seed_converted_to_nonzero() {
        let rng = RngManager::new(0);
        assert_ne!(rng.get_state(), 0, "Zero seed should be converted to 1");
    }

    #[test]
    #[should_panic(expected = "min must be less than max")]
    fn test_range_invalid_bounds() {
        let mut rng = RngManager::new(12345);
        rng.range(100, 50);
    }

    #[test]
    fn test_range_inclusive_hits_both_ends() {
        let mut rng = RngManager::new(7);
        let mut seen = [false; 3];
        for _ in 0..500 {
            let v = rng.range_inclusive(0, 2);
            seen[v as usize] = true;
        }
        assert_eq!(seen, [true, true, true]);
    }

    #[test]
    fn test_range_inclusive_single_value() {
        let mut rng = RngManager::new(7);
        assert_eq!(rng.range_inclusive(35_000, 35_000), 35_000);
    }

    #[test]
    fn test_next_f64_in_range() {
        let mut rng = RngManager::new(12345);

        for _ in 0..1000 {
            let val = rng.next_f64();
            assert!(
                (0.0..1.0).contains(&val),
                "next_f64() produced value {} outside [0.0, 1.0)",
                val
            );
        }
    }

    #[test]
    fn test_derived_seeds_differ_from_master() {
        let master = 99;
        let seeds: Vec<u64> = (0..16).map(|i| derive_seed(master, i)).collect();
        for (i, seed) in seeds.iter().enumerate() {
            assert_ne!(*seed, master);
            assert!(!seeds[i + 1..].contains(seed), "duplicate derived seed");
        }
    }
}
