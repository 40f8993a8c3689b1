use std::{fmt, ops::RangeInclusive, str::FromStr};

use nonempty::NonEmpty;
use serde::{Deserialize, Serialize};

use super::check_digit::CheckDigit;

/// The largest base that fits in nine digits.
pub const MAX_BASE: u32 = 999_999_999;

/// The ranges currently issued in England, Wales and the Isle of Man.
///
/// Numbers outside these ranges may be valid but could conflict with
/// identifiers issued in Northern Ireland and Scotland.
pub const DEFAULT_RANGES: &[NumeralRange] = &[
    NumeralRange::new_unchecked(400_000_000, 499_999_999),
    NumeralRange::new_unchecked(600_000_000, 708_800_001),
];

/// An inclusive range of 9-digit NHS number bases.
///
/// Bounds exclude the check digit: the range `(400000000, 400000009)` covers
/// NHS numbers `400000000?` through `400000009?`.
///
/// Every range contains at least one valid NHS number. A single-base range
/// is checked on construction. Wider ranges always qualify, because two
/// adjacent bases never share a checksum residue modulo 11, so at most one of
/// them lacks a check digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawRange", into = "RawRange")]
pub struct NumeralRange {
    low: u32,
    high: u32,
}

impl NumeralRange {
    /// Creates a validated range.
    ///
    /// # Errors
    ///
    /// - [`Error::Descending`] if `high < low`
    /// - [`Error::OutOfBounds`] if `high` has more than nine digits
    /// - [`Error::NoValidNumber`] if `low == high` and that base has no valid
    ///   check digit
    pub fn new(low: u32, high: u32) -> Result<Self, Error> {
        if high < low {
            return Err(Error::Descending { low, high });
        }
        if high > MAX_BASE {
            return Err(Error::OutOfBounds(high));
        }
        if low == high && CheckDigit::for_base(low) == Some(CheckDigit::NoValidCheckDigit) {
            return Err(Error::NoValidNumber(low));
        }
        Ok(Self { low, high })
    }

    const fn new_unchecked(low: u32, high: u32) -> Self {
        Self { low, high }
    }

    /// The lowest base in the range.
    #[must_use]
    pub const fn low(&self) -> u32 {
        self.low
    }

    /// The highest base in the range.
    #[must_use]
    pub const fn high(&self) -> u32 {
        self.high
    }

    /// Returns `true` if `base` lies within the range.
    #[must_use]
    pub const fn contains(&self, base: u32) -> bool {
        self.low <= base && base <= self.high
    }

    /// The bases in this range, in ascending order.
    #[must_use]
    pub const fn bases(&self) -> RangeInclusive<u32> {
        self.low..=self.high
    }
}

impl TryFrom<(u32, u32)> for NumeralRange {
    type Error = Error;

    fn try_from((low, high): (u32, u32)) -> Result<Self, Self::Error> {
        Self::new(low, high)
    }
}

impl fmt::Display for NumeralRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:09}-{:09}", self.low, self.high)
    }
}

impl FromStr for NumeralRange {
    type Err = Error;

    /// Parses `LOW-HIGH`, e.g. `489000000-489999999`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (low, high) = s
            .split_once('-')
            .ok_or_else(|| Error::Syntax(s.to_string()))?;
        let parse = |bound: &str| {
            bound
                .trim()
                .parse::<u32>()
                .map_err(|_| Error::Syntax(s.to_string()))
        };
        Self::new(parse(low)?, parse(high)?)
    }
}

/// Errors that can occur when building ranges.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum Error {
    /// The high end of the range is below the low end.
    #[error("Invalid range {low:09}-{high:09}: the high end should not be lower than the low end")]
    Descending {
        /// The low bound as given.
        low: u32,
        /// The high bound as given.
        high: u32,
    },

    /// A single-value range whose only base has no valid check digit.
    #[error("Invalid range: {0:09} is not the base of a valid NHS number")]
    NoValidNumber(u32),

    /// A bound doesn't fit in nine digits.
    #[error("Invalid range bound {0}: bases have at most 9 digits")]
    OutOfBounds(u32),

    /// No ranges were given.
    #[error("At least one range is required")]
    Empty,

    /// A range string couldn't be parsed.
    #[error("Invalid range '{0}': expected LOW-HIGH")]
    Syntax(String),
}

/// Validates a list of `(low, high)` pairs.
///
/// Every range is checked before anything is returned, so an invalid range
/// anywhere in the list is reported even if earlier ranges are fine.
///
/// # Errors
///
/// Returns [`Error::Empty`] for an empty list, or the first error from
/// [`NumeralRange::new`].
pub fn validate_ranges<I>(ranges: I) -> Result<NonEmpty<NumeralRange>, Error>
where
    I: IntoIterator<Item = (u32, u32)>,
{
    let ranges = ranges
        .into_iter()
        .map(NumeralRange::try_from)
        .collect::<Result<Vec<_>, _>>()?;
    NonEmpty::from_vec(ranges).ok_or(Error::Empty)
}

/// The default ranges as a non-empty list.
#[must_use]
pub fn default_ranges() -> NonEmpty<NumeralRange> {
    NonEmpty {
        head: DEFAULT_RANGES[0],
        tail: DEFAULT_RANGES[1..].to_vec(),
    }
}

#[derive(Serialize, Deserialize)]
struct RawRange {
    low: u32,
    high: u32,
}

impl TryFrom<RawRange> for NumeralRange {
    type Error = Error;

    fn try_from(raw: RawRange) -> Result<Self, Self::Error> {
        Self::new(raw.low, raw.high)
    }
}

impl From<NumeralRange> for RawRange {
    fn from(range: NumeralRange) -> Self {
        Self {
            low: range.low,
            high: range.high,
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use test_case::test_case;

    use super::*;
    use crate::domain::NhsNumber;

    #[test]
    fn default_ranges_are_valid() {
        for range in DEFAULT_RANGES {
            assert_eq!(NumeralRange::new(range.low(), range.high()), Ok(*range));
        }
        assert_eq!(default_ranges().len(), DEFAULT_RANGES.len());
    }

    #[test_case(8, 4, Error::Descending { low: 8, high: 4 }; "descending")]
    #[test_case(6, 6, Error::NoValidNumber(6); "singleton without check digit")]
    #[test_case(0, 1_000_000_000, Error::OutOfBounds(1_000_000_000); "ten digits")]
    fn rejects_invalid_range(low: u32, high: u32, expected: Error) {
        assert_eq!(NumeralRange::new(low, high), Err(expected));
    }

    proptest! {
        #[test]
        fn adjacent_bases_hold_a_valid_number(low in 0..MAX_BASE) {
            let range = NumeralRange::new(low, low + 1).unwrap();
            prop_assert!(range.bases().any(|base| NhsNumber::from_base(base).is_ok()));
        }
    }

    #[test]
    fn accepts_valid_singleton() {
        let range = NumeralRange::new(7, 7).unwrap();
        assert_eq!(range.bases().count(), 1);
    }

    #[test]
    fn validation_checks_every_range() {
        let error = validate_ranges([(4, 8), (10, 2)]).unwrap_err();
        assert_eq!(error, Error::Descending { low: 10, high: 2 });
    }

    #[test]
    fn empty_list_is_rejected() {
        assert_eq!(
            validate_ranges(Vec::new()).unwrap_err(),
            Error::Empty
        );
    }

    #[test_case("489000000-489999999", 489_000_000, 489_999_999; "plain")]
    #[test_case("7 - 100", 7, 100; "padded")]
    fn parses_range(input: &str, low: u32, high: u32) {
        let range: NumeralRange = input.parse().unwrap();
        assert_eq!((range.low(), range.high()), (low, high));
    }

    #[test_case("489000000"; "missing high")]
    #[test_case("a-b"; "not numbers")]
    fn rejects_malformed_range_string(input: &str) {
        assert_eq!(
            input.parse::<NumeralRange>(),
            Err(Error::Syntax(input.to_string()))
        );
    }

    #[test]
    fn displays_zero_padded() {
        let range = NumeralRange::new(7, 100).unwrap();
        assert_eq!(range.to_string(), "000000007-000000100");
    }
}
