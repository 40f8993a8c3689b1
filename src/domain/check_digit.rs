use std::fmt;

/// Number of digits in the base of an NHS number (everything but the check
/// digit).
pub const BASE_DIGITS: usize = 9;

/// The outcome of running the modulus-11 checksum over a 9-digit base.
///
/// A base whose checksum works out as 10 has no legal check digit, so no valid
/// NHS number can be formed from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CheckDigit {
    /// The check digit (0-9) that completes the base.
    Valid(u8),

    /// The base cannot be completed into a valid NHS number.
    NoValidCheckDigit,
}

impl CheckDigit {
    /// Value returned by [`calculate_check_digit`] for a base with no valid
    /// check digit.
    pub const SENTINEL: u8 = 10;

    /// Computes the check digit for a base given as individual digit values.
    ///
    /// Each digit is weighted by `10 - position`, the weighted sum is taken
    /// modulo 11 and subtracted from 11. A result of 11 becomes 0; a result
    /// of 10 means there is no valid check digit.
    ///
    /// Every element of `digits` must be in `0..=9`.
    #[must_use]
    pub fn compute(digits: &[u8; BASE_DIGITS]) -> Self {
        let sum: u32 = digits
            .iter()
            .zip((2..=10).rev())
            .map(|(&digit, weight)| u32::from(digit) * weight)
            .sum();

        match sum % 11 {
            0 => Self::Valid(0),
            1 => Self::NoValidCheckDigit,
            // remainder is in 2..=10, so the digit is in 1..=9
            remainder => u8::try_from(11 - remainder).map_or(Self::NoValidCheckDigit, Self::Valid),
        }
    }

    /// Computes the check digit for a base given as an integer.
    ///
    /// Returns `None` if `base` has more than nine digits.
    #[must_use]
    pub fn for_base(base: u32) -> Option<Self> {
        base_to_digits(base).map(|digits| Self::compute(&digits))
    }

    /// Returns the digit, if there is one.
    #[must_use]
    pub const fn digit(self) -> Option<u8> {
        match self {
            Self::Valid(digit) => Some(digit),
            Self::NoValidCheckDigit => None,
        }
    }

    /// Returns `true` if the base can be completed into a valid NHS number.
    #[must_use]
    pub const fn is_valid(self) -> bool {
        matches!(self, Self::Valid(_))
    }

    /// Returns the integer form, using [`Self::SENTINEL`] for bases that have
    /// no valid check digit.
    #[must_use]
    pub const fn to_u8(self) -> u8 {
        match self {
            Self::Valid(digit) => digit,
            Self::NoValidCheckDigit => Self::SENTINEL,
        }
    }
}

impl fmt::Display for CheckDigit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Valid(digit) => write!(f, "{digit}"),
            Self::NoValidCheckDigit => f.write_str("none"),
        }
    }
}

/// Error returned when the input to [`calculate_check_digit`] doesn't start
/// with nine decimal digits.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum Error {
    /// The first nine characters are not all ASCII digits.
    #[error("Invalid numeral '{0}': expected at least 9 leading decimal digits")]
    MalformedBase(String),
}

/// Calculates the check digit for the first nine digits of `numeral`.
///
/// Any characters after the ninth are ignored, so this accepts either a bare
/// base or a full 10-digit NHS number.
///
/// The result is in `0..=10`. A result of 10 ([`CheckDigit::SENTINEL`])
/// means that no valid NHS number starts with these nine digits. Use
/// [`CheckDigit::compute`] for the tagged form.
///
/// # Examples
///
/// ```
/// use nhs_number::calculate_check_digit;
///
/// assert_eq!(calculate_check_digit("943476591").unwrap(), 9);
/// assert_eq!(calculate_check_digit("000000006").unwrap(), 10);
/// ```
///
/// # Errors
///
/// Returns [`Error::MalformedBase`] if `numeral` doesn't start with nine ASCII
/// digits.
pub fn calculate_check_digit(numeral: &str) -> Result<u8, Error> {
    let digits = leading_digits(numeral).ok_or_else(|| Error::MalformedBase(numeral.to_string()))?;
    Ok(CheckDigit::compute(&digits).to_u8())
}

/// Extracts the first nine characters of `s` as digit values.
pub(crate) fn leading_digits(s: &str) -> Option<[u8; BASE_DIGITS]> {
    let bytes = s.as_bytes().get(..BASE_DIGITS)?;
    let mut digits = [0; BASE_DIGITS];
    for (slot, &byte) in digits.iter_mut().zip(bytes) {
        if !byte.is_ascii_digit() {
            return None;
        }
        *slot = byte - b'0';
    }
    Some(digits)
}

/// Splits a base into its nine zero-padded decimal digits.
pub(crate) fn base_to_digits(mut base: u32) -> Option<[u8; BASE_DIGITS]> {
    if base > super::range::MAX_BASE {
        return None;
    }
    let mut digits = [0; BASE_DIGITS];
    for slot in digits.iter_mut().rev() {
        *slot = u8::try_from(base % 10).unwrap_or_default();
        base /= 10;
    }
    Some(digits)
}
