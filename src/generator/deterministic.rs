use std::{iter::FusedIterator, ops::RangeInclusive};

use nonempty::NonEmpty;

use crate::domain::{
    NhsNumber,
    range::{self, NumeralRange},
};

/// A predictable, finite sequence of NHS numbers.
///
/// Walks each range in order from low to high, yielding every base that has a
/// valid check digit. Bases without one are skipped. The sequence ends once
/// the last range is exhausted and cannot be restarted; build a new generator
/// to replay it.
///
/// # Examples
///
/// ```
/// use nhs_number::DeterministicGenerator;
///
/// let numbers: Vec<String> = DeterministicGenerator::new([(600_000_000, 600_000_001), (6, 7)])
///     .unwrap()
///     .map(|number| number.to_string())
///     .collect();
///
/// assert_eq!(numbers, ["6000000006", "6000000014", "0000000078"]);
/// ```
#[derive(Debug, Clone)]
pub struct DeterministicGenerator {
    ranges: NonEmpty<NumeralRange>,
    /// Index of the range currently being walked.
    index: usize,
    /// Bases still to visit in the current range.
    current: RangeInclusive<u32>,
}

impl DeterministicGenerator {
    /// Creates a generator over the given `(low, high)` ranges.
    ///
    /// All ranges are validated before the generator is returned.
    ///
    /// # Errors
    ///
    /// Returns an error if any range is invalid, or if no ranges are given.
    /// See [`NumeralRange::new`].
    pub fn new<I>(ranges: I) -> Result<Self, range::Error>
    where
        I: IntoIterator<Item = (u32, u32)>,
    {
        range::validate_ranges(ranges).map(Self::from_ranges)
    }

    /// Creates a generator over already-validated ranges.
    #[must_use]
    pub fn from_ranges(ranges: NonEmpty<NumeralRange>) -> Self {
        tracing::debug!(ranges = ranges.len(), "Created deterministic generator");
        let current = ranges.head.bases();
        Self {
            ranges,
            index: 0,
            current,
        }
    }

    /// The ranges this generator walks.
    #[must_use]
    pub const fn ranges(&self) -> &NonEmpty<NumeralRange> {
        &self.ranges
    }

    fn advance_range(&mut self) -> bool {
        if self.index < self.ranges.len() {
            self.index += 1;
        }
        match self.ranges.get(self.index) {
            Some(range) => {
                self.current = range.bases();
                true
            }
            None => false,
        }
    }
}

impl Default for DeterministicGenerator {
    /// A generator over [`DEFAULT_RANGES`](crate::DEFAULT_RANGES), starting at
    /// `4000000004`.
    fn default() -> Self {
        Self::from_ranges(range::default_ranges())
    }
}

impl Iterator for DeterministicGenerator {
    type Item = NhsNumber;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            for base in self.current.by_ref() {
                match NhsNumber::from_base(base) {
                    Ok(number) => return Some(number),
                    Err(e) => tracing::trace!("Skipping candidate: {e}"),
                }
            }
            if !self.advance_range() {
                return None;
            }
        }
    }
}

impl FusedIterator for DeterministicGenerator {}

/// Returns a generator for a predictable sequence of NHS numbers.
///
/// Shorthand for [`DeterministicGenerator::new`].
///
/// # Errors
///
/// Returns an error if any range is invalid, or if no ranges are given.
pub fn deterministic_generator<I>(ranges: I) -> Result<DeterministicGenerator, range::Error>
where
    I: IntoIterator<Item = (u32, u32)>,
{
    DeterministicGenerator::new(ranges)
}
