use std::io::{self, Write};

use clap::Parser;
use nhs_number::NhsNumber;
use tracing::instrument;

#[derive(Debug, Parser)]
#[command(about = "Check whether NHS numbers are valid")]
pub struct Validate {
    /// The NHS numbers to check
    #[arg(required = true)]
    numbers: Vec<String>,

    /// Only report invalid numbers
    #[arg(long, short)]
    quiet: bool,
}

impl Validate {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self) -> anyhow::Result<()> {
        let mut out = io::stdout().lock();
        let invalid = self.report(&mut out)?;

        if invalid > 0 {
            anyhow::bail!("{invalid} of {} NHS numbers are invalid", self.numbers.len());
        }
        Ok(())
    }

    /// Writes one line per number and returns how many were invalid.
    fn report<W: Write>(&self, out: &mut W) -> io::Result<usize> {
        let mut invalid = 0;
        for input in &self.numbers {
            match NhsNumber::parse_formatted(input) {
                Ok(_) if self.quiet => {}
                Ok(number) => writeln!(out, "{input}: valid ({number})")?,
                Err(e) => {
                    invalid += 1;
                    writeln!(out, "{input}: invalid ({e})")?;
                }
            }
        }
        Ok(invalid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validate(numbers: &[&str], quiet: bool) -> (usize, String) {
        let command = Validate {
            numbers: numbers.iter().map(ToString::to_string).collect(),
            quiet,
        };
        let mut buffer = Vec::new();
        let invalid = command.report(&mut buffer).unwrap();
        (invalid, String::from_utf8(buffer).unwrap())
    }

    #[test]
    fn reports_each_number() {
        let (invalid, output) = validate(&["9434765919", "943 476 5919", "9434765918"], false);

        assert_eq!(invalid, 1);
        let lines: Vec<_> = output.lines().collect();
        assert_eq!(lines[0], "9434765919: valid (9434765919)");
        assert_eq!(lines[1], "943 476 5919: valid (9434765919)");
        assert!(lines[2].starts_with("9434765918: invalid ("));
        assert!(lines[2].contains("expected check digit 9"));
    }

    #[test]
    fn quiet_only_reports_invalid_numbers() {
        let (invalid, output) = validate(&["9434765919", "000000r000"], true);

        assert_eq!(invalid, 1);
        assert_eq!(output.lines().count(), 1);
        assert!(output.starts_with("000000r000: invalid"));
    }
}
