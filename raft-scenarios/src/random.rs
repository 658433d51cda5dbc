//! Random number generation provider abstraction.
//!
//! Scenario generation never touches a process-wide generator. Every batch
//! owns a [`SeededRandomProvider`], and every scenario gets its own provider
//! seeded from the batch one, so a single `u64` reproduces the whole batch.

use rand::distr::{uniform::SampleUniform, Distribution, StandardUniform};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::cell::RefCell;
use std::ops::Range;

/// Provider trait for random number generation.
///
/// Implementations use interior mutability so callers can share a provider
/// by reference while drawing from it.
pub trait RandomProvider {
    /// Generate a random value of type T.
    fn random<T>(&self) -> T
    where
        StandardUniform: Distribution<T>;

    /// Generate a random value within a specified range.
    ///
    /// The range is exclusive of the upper bound (start..end) and must not be empty.
    fn random_range<T>(&self, range: Range<T>) -> T
    where
        T: SampleUniform + PartialOrd;
}

/// Deterministic random provider backed by ChaCha8.
///
/// The same seed always produces the same sequence of values.
///
/// # Example
///
/// ```rust
/// use raft_scenarios::{RandomProvider, SeededRandomProvider};
///
/// let a = SeededRandomProvider::new(7);
/// let b = SeededRandomProvider::new(7);
/// assert_eq!(a.random_range(0..1000u64), b.random_range(0..1000u64));
/// ```
#[derive(Debug)]
pub struct SeededRandomProvider {
    seed: u64,
    rng: RefCell<ChaCha8Rng>,
}

impl SeededRandomProvider {
    /// Create a provider seeded with `seed`.
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: RefCell::new(ChaCha8Rng::seed_from_u64(seed)),
        }
    }

    /// The seed this provider was created with.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Create a child provider seeded from this one.
    ///
    /// Children are independent of each other once created; only the order
    /// in which they are forked matters.
    pub fn fork(&self) -> SeededRandomProvider {
        SeededRandomProvider::new(self.random())
    }
}

impl RandomProvider for SeededRandomProvider {
    fn random<T>(&self) -> T
    where
        StandardUniform: Distribution<T>,
    {
        self.rng.borrow_mut().random()
    }

    fn random_range<T>(&self, range: Range<T>) -> T
    where
        T: SampleUniform + PartialOrd,
    {
        self.rng.borrow_mut().random_range(range)
    }
}
