//! Lazy sequences of valid NHS numbers.
//!
//! Both generators are plain [`Iterator`]s: the caller decides how many
//! numbers to pull.

mod deterministic;
pub use deterministic::{DeterministicGenerator, deterministic_generator};

mod random;
pub use random::{RandomGenerator, random_generator};
