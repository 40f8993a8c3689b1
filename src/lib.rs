//! Generate and validate 10-digit NHS numbers
//!
//! NHS numbers are the patient identifiers used by the National Health Service
//! in England, Wales and the Isle of Man. Each is a 9-digit base followed by a
//! modulus-11 check digit.

pub mod domain;
pub use domain::{
    CheckDigit, Config, DEFAULT_RANGES, NhsNumber, NumeralRange, calculate_check_digit,
    is_valid_nhs_number,
};

pub mod format;
pub use format::{add_separators, remove_separators};

pub mod generator;
pub use generator::{
    DeterministicGenerator, RandomGenerator, deterministic_generator, random_generator,
};
