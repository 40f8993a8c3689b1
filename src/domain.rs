//! Domain models for NHS numbers.
//!
//! This module contains the checksum, the validated [`NhsNumber`] type, the
//! ranges that generators draw bases from, and configuration.

/// Modulus-11 check digit calculation.
pub mod check_digit;
pub use check_digit::{CheckDigit, calculate_check_digit};

mod config;
pub use config::{Config, Error as ConfigError};

/// The validated NHS number type.
pub mod nhs_number;
pub use nhs_number::{Error as NhsNumberError, NhsNumber, is_valid_nhs_number};

/// Ranges of 9-digit bases.
pub mod range;
pub use range::{DEFAULT_RANGES, Error as RangeError, NumeralRange};
