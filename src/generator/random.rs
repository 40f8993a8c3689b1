use std::iter::FusedIterator;

use nonempty::NonEmpty;
use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::domain::{
    NhsNumber,
    range::{self, NumeralRange},
};

/// An unpredictable, infinite sequence of NHS numbers.
///
/// Each step picks one of the ranges at random, draws a base uniformly from
/// it, and yields it if it has a valid check digit. Bases without one are
/// discarded and drawn again, so numbers are uniform over the valid bases of
/// the chosen range.
///
/// Ranges are weighted equally, no matter their size.
///
/// The iterator never returns `None`; stop pulling from it when you have
/// enough.
///
/// # Examples
///
/// ```
/// use nhs_number::RandomGenerator;
///
/// let mut generator = RandomGenerator::new([(489_000_000, 489_999_999)]).unwrap();
/// let number = generator.next().unwrap();
/// assert!(number.to_string().starts_with("489"));
/// ```
#[derive(Debug, Clone)]
pub struct RandomGenerator<R = StdRng> {
    ranges: NonEmpty<NumeralRange>,
    rng: R,
}

impl RandomGenerator<StdRng> {
    /// Creates a generator over the given `(low, high)` ranges, seeded from
    /// the operating system's entropy source.
    ///
    /// # Errors
    ///
    /// Returns an error if any range is invalid, or if no ranges are given.
    /// See [`NumeralRange::new`].
    pub fn new<I>(ranges: I) -> Result<Self, range::Error>
    where
        I: IntoIterator<Item = (u32, u32)>,
    {
        range::validate_ranges(ranges).map(|ranges| Self::with_rng(ranges, StdRng::from_entropy()))
    }

    /// Creates a reproducible generator: the same seed and ranges always
    /// produce the same sequence.
    #[must_use]
    pub fn with_seed(ranges: NonEmpty<NumeralRange>, seed: u64) -> Self {
        tracing::debug!(seed, "Seeding random generator");
        Self::with_rng(ranges, StdRng::seed_from_u64(seed))
    }

    /// Creates a generator over already-validated ranges, seeded from the
    /// operating system's entropy source.
    #[must_use]
    pub fn from_ranges(ranges: NonEmpty<NumeralRange>) -> Self {
        Self::with_rng(ranges, StdRng::from_entropy())
    }
}

impl<R: Rng> RandomGenerator<R> {
    /// Creates a generator drawing from the given random number generator.
    #[must_use]
    pub fn with_rng(ranges: NonEmpty<NumeralRange>, rng: R) -> Self {
        tracing::debug!(ranges = ranges.len(), "Created random generator");
        Self { ranges, rng }
    }

    /// The ranges this generator draws from.
    #[must_use]
    pub const fn ranges(&self) -> &NonEmpty<NumeralRange> {
        &self.ranges
    }

    fn choose_range(&mut self) -> NumeralRange {
        let index = self.rng.gen_range(0..self.ranges.len());
        self.ranges.get(index).copied().unwrap_or(self.ranges.head)
    }
}

impl Default for RandomGenerator<StdRng> {
    /// A generator over [`DEFAULT_RANGES`](crate::DEFAULT_RANGES).
    fn default() -> Self {
        Self::from_ranges(range::default_ranges())
    }
}

impl<R: Rng> Iterator for RandomGenerator<R> {
    type Item = NhsNumber;

    fn next(&mut self) -> Option<Self::Item> {
        // Adjacent bases never share a checksum residue, so any range of two or
        // more bases holds a valid number. Singletons are validated up front.
        loop {
            let range = self.choose_range();
            let base = self.rng.gen_range(range.bases());
            match NhsNumber::from_base(base) {
                Ok(number) => return Some(number),
                Err(e) => tracing::trace!("Redrawing: {e}"),
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}

impl<R: Rng> FusedIterator for RandomGenerator<R> {}

/// Returns a generator for an unpredictable, infinite sequence of NHS numbers.
///
/// Shorthand for [`RandomGenerator::new`].
///
/// # Errors
///
/// Returns an error if any range is invalid, or if no ranges are given.
pub fn random_generator<I>(ranges: I) -> Result<RandomGenerator, range::Error>
where
    I: IntoIterator<Item = (u32, u32)>,
{
    RandomGenerator::new(ranges)
}
