//! Conversion between raw and 3-3-4 formatted NHS numbers.
//!
//! NHS numbers are often written in groups of three, three and four digits,
//! e.g. `943 476 5919` or `943-476-5919`.

/// The separator used when none is specified.
pub const DEFAULT_SEPARATOR: &str = " ";

/// Inserts `separator` after the third and sixth characters of `number`,
/// producing the 3-3-4 format.
///
/// `number` is expected to be a 10-digit numeral. Shorter input is split as
/// far as it goes, so this never panics.
///
/// # Examples
///
/// ```
/// use nhs_number::format::add_separators;
///
/// assert_eq!(add_separators("4000000004", " "), "400 000 0004");
/// assert_eq!(add_separators("4000000004", "-"), "400-000-0004");
/// ```
#[must_use]
pub fn add_separators(number: &str, separator: &str) -> String {
    let chars: Vec<char> = number.chars().collect();
    let group = |from: usize, to: usize| -> String {
        chars
            .get(from.min(chars.len())..to.min(chars.len()))
            .unwrap_or_default()
            .iter()
            .collect()
    };

    format!(
        "{}{separator}{}{separator}{}",
        group(0, 3),
        group(3, 6),
        group(6, 10)
    )
}

/// Removes separators from a number in 3-3-4 format, e.g. `123-456-7890`
/// becomes `1234567890`.
///
/// Separators are detected by position: if the characters at index 3 and 7
/// are both non-numeric, they are dropped. Otherwise the text is assumed to
/// be unformatted already and is returned unchanged.
///
/// Separators must be a single non-numeric character. A numeric separator
/// can't be told apart from a digit, so text using one is returned as is.
///
/// # Examples
///
/// ```
/// use nhs_number::format::remove_separators;
///
/// assert_eq!(remove_separators("764-552-9342"), "7645529342");
/// assert_eq!(remove_separators("764 552 9342"), "7645529342");
/// assert_eq!(remove_separators("7645529342"), "7645529342");
/// ```
#[must_use]
pub fn remove_separators(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    match (chars.get(3), chars.get(7)) {
        (Some(first), Some(second)) if !first.is_numeric() && !second.is_numeric() => chars
            .iter()
            .enumerate()
            .filter(|&(index, _)| index != 3 && index != 7)
            .map(|(_, c)| c)
            .collect(),
        _ => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use test_case::test_case;

    use super::*;
    use crate::domain::nhs_number::is_valid_nhs_number;

    #[test_case(" ", "000 000 0027"; "space")]
    #[test_case("-", "000-000-0027"; "dash")]
    #[test_case(DEFAULT_SEPARATOR, "000 000 0027"; "default")]
    #[test_case("", "0000000027"; "empty")]
    #[test_case(" - ", "000 - 000 - 0027"; "multi-character")]
    fn adds_separators(separator: &str, expected: &str) {
        assert_eq!(add_separators("0000000027", separator), expected);
    }

    #[test]
    fn short_input_does_not_panic() {
        assert_eq!(add_separators("1234", "-"), "123-4-");
        assert_eq!(add_separators("", "-"), "--");
    }

    #[test_case("764-552-9342"; "dash")]
    #[test_case("764 552 9342"; "space")]
    #[test_case("764/552/9342"; "slash")]
    #[test_case("7645529342"; "already unformatted")]
    fn removes_separators(input: &str) {
        assert_eq!(remove_separators(input), "7645529342");
    }

    #[test_case(""; "empty")]
    #[test_case("764-55"; "too short")]
    #[test_case("76405529342"; "numeric separator")]
    #[test_case("764-5529342"; "only one separator")]
    fn leaves_unrecognised_text_alone(input: &str) {
        assert_eq!(remove_separators(input), input);
    }

    #[test_case("·"; "middle dot")]
    #[test_case("—"; "em dash")]
    #[test_case("\t"; "tab")]
    fn handles_non_ascii_separators(separator: &str) {
        let formatted = add_separators("9434765919", separator);
        assert_eq!(formatted, format!("943{separator}476{separator}5919"));
        assert_eq!(remove_separators(&formatted), "9434765919");
        assert!(is_valid_nhs_number(remove_separators(&formatted)));
    }

    proptest! {
        #[test]
        fn round_trips(
            number in "[0-9]{10}",
            separator in any::<char>().prop_filter("separator must not be numeric", |c| !c.is_numeric()),
        ) {
            let formatted = add_separators(&number, &separator.to_string());
            prop_assert_eq!(remove_separators(&formatted), number);
        }
    }
}
