use std::{fmt, str::FromStr};

use super::check_digit::{BASE_DIGITS, CheckDigit};
use crate::format;

/// Number of digits in an NHS number, including the check digit.
pub const DIGITS: usize = BASE_DIGITS + 1;

/// A valid 10-digit NHS number.
///
/// An NHS number is a 9-digit base followed by a modulus-11 check digit. This
/// type can only hold numbers whose check digit is correct, so holding one is
/// proof of validity.
///
/// # Examples
///
/// ```
/// use nhs_number::NhsNumber;
///
/// let number: NhsNumber = "9434765919".parse().unwrap();
/// assert_eq!(number.base(), 943_476_591);
/// assert_eq!(number.check_digit(), 9);
/// assert_eq!(number.display(" ").to_string(), "943 476 5919");
///
/// assert!("9434765918".parse::<NhsNumber>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NhsNumber {
    base: u32,
    check_digit: u8,
}

impl NhsNumber {
    /// Completes a 9-digit base with its check digit.
    ///
    /// # Errors
    ///
    /// - [`Error::BaseOutOfRange`] if `base` has more than nine digits
    /// - [`Error::NoValidCheckDigit`] if no check digit exists for `base`
    pub fn from_base(base: u32) -> Result<Self, Error> {
        match CheckDigit::for_base(base) {
            Some(CheckDigit::Valid(check_digit)) => Ok(Self { base, check_digit }),
            Some(CheckDigit::NoValidCheckDigit) => {
                Err(Error::NoValidCheckDigit(format!("{base:09}")))
            }
            None => Err(Error::BaseOutOfRange(base)),
        }
    }

    /// Parses a number that may be written in 3-3-4 format, such as
    /// `943 476 5919` or `943-476-5919`.
    ///
    /// Separators are removed with [`format::remove_separators`] before
    /// validation.
    ///
    /// # Errors
    ///
    /// Returns an error if the number is invalid once separators are removed.
    pub fn parse_formatted(s: &str) -> Result<Self, Error> {
        format::remove_separators(s).parse()
    }

    /// The 9-digit base, without the check digit.
    #[must_use]
    pub const fn base(&self) -> u32 {
        self.base
    }

    /// The check digit (0-9).
    #[must_use]
    pub const fn check_digit(&self) -> u8 {
        self.check_digit
    }

    /// Returns a displayable representation in 3-3-4 format using the given
    /// separator.
    #[must_use]
    pub const fn display<'a>(&'a self, separator: &'a str) -> Separated<'a> {
        Separated {
            number: self,
            separator,
        }
    }
}

impl fmt::Display for NhsNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:09}{}", self.base, self.check_digit)
    }
}

/// An NHS number formatted in 3-3-4 groups.
///
/// Returned by [`NhsNumber::display`].
#[derive(Debug, Clone, Copy)]
pub struct Separated<'a> {
    number: &'a NhsNumber,
    separator: &'a str,
}

impl fmt::Display for Separated<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let base = self.number.base;
        write!(
            f,
            "{:03}{sep}{:03}{sep}{:03}{}",
            base / 1_000_000,
            base / 1_000 % 1_000,
            base % 1_000,
            self.number.check_digit,
            sep = self.separator,
        )
    }
}

/// Reasons a string is not a valid NHS number.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum Error {
    /// Wrong number of characters.
    #[error("Invalid NHS number '{0}': expected {DIGITS} digits")]
    Length(String),

    /// Contains something other than decimal digits.
    #[error("Invalid NHS number '{0}': must contain only decimal digits")]
    NonNumeric(String),

    /// The base has no valid check digit.
    #[error("Invalid NHS number '{0}': no valid check digit exists for this base")]
    NoValidCheckDigit(String),

    /// The check digit doesn't match the base.
    #[error("Invalid NHS number '{number}': expected check digit {expected}")]
    CheckDigitMismatch {
        /// The number as given.
        number: String,
        /// The check digit computed from the base.
        expected: u8,
    },

    /// The base has more than nine digits.
    #[error("Invalid NHS number base {0}: bases have at most 9 digits")]
    BaseOutOfRange(u32),
}

impl FromStr for NhsNumber {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::NonNumeric(s.to_string()));
        }
        if s.len() != DIGITS {
            return Err(Error::Length(s.to_string()));
        }

        // Every byte is an ASCII digit, so this cannot fail.
        let base: u32 = s[..BASE_DIGITS]
            .parse()
            .map_err(|_| Error::NonNumeric(s.to_string()))?;
        let given = s.as_bytes()[BASE_DIGITS] - b'0';

        match CheckDigit::for_base(base) {
            Some(CheckDigit::Valid(expected)) if expected == given => Ok(Self {
                base,
                check_digit: expected,
            }),
            Some(CheckDigit::Valid(expected)) => Err(Error::CheckDigitMismatch {
                number: s.to_string(),
                expected,
            }),
            Some(CheckDigit::NoValidCheckDigit) => Err(Error::NoValidCheckDigit(s.to_string())),
            None => Err(Error::BaseOutOfRange(base)),
        }
    }
}

impl TryFrom<&str> for NhsNumber {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::from_str(value)
    }
}

impl TryFrom<u32> for NhsNumber {
    type Error = Error;

    fn try_from(base: u32) -> Result<Self, Self::Error> {
        Self::from_base(base)
    }
}

impl PartialEq<str> for NhsNumber {
    fn eq(&self, other: &str) -> bool {
        other.parse::<Self>().is_ok_and(|parsed| parsed == *self)
    }
}

impl PartialEq<&str> for NhsNumber {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

/// Checks whether `value` is a valid NHS number.
///
/// The value must be exactly ten decimal digits, with no separators. Numbers
/// in 3-3-4 format should be passed through [`format::remove_separators`]
/// first.
///
/// Never panics: anything that isn't a valid NHS number returns `false`.
///
/// # Examples
///
/// ```
/// use nhs_number::is_valid_nhs_number;
///
/// assert!(is_valid_nhs_number("9434765919"));
/// assert!(!is_valid_nhs_number("9434765918"));
/// assert!(!is_valid_nhs_number("943 476 5919"));
/// ```
#[must_use]
pub fn is_valid_nhs_number(value: impl AsRef<str>) -> bool {
    value.as_ref().parse::<NhsNumber>().is_ok()
}
