use std::{
    io::{self, BufWriter, Write},
    path::PathBuf,
};

mod validate;

use anyhow::Context;
use clap::ArgAction;
use nhs_number::{Config, DeterministicGenerator, NhsNumber, NumeralRange, RandomGenerator};
use tracing::instrument;
use validate::Validate;

#[derive(Debug, clap::Parser)]
#[command(version, about = "Generate 10-digit NHS numbers.")]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(flatten)]
    generate: Generate,

    #[command(subcommand)]
    command: Option<Command>,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);
        self.dispatch()
    }

    fn dispatch(self) -> anyhow::Result<()> {
        match self.command {
            Some(Command::Validate(command)) => command.run(),
            None => {
                // only generation reads the config file
                let config = match &self.config {
                    Some(path) => Config::load(path)?,
                    None => Config::default(),
                };
                self.generate.run(config)
            }
        }
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        // stdout is reserved for the numbers themselves
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(io::stderr)
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

#[derive(Debug, clap::Subcommand)]
pub enum Command {
    /// Check whether NHS numbers are valid
    ///
    /// Numbers may be given in 3-3-4 format, e.g. '943 476 5919'.
    Validate(Validate),
}

/// Arguments for generating numbers (the default action).
#[derive(Debug, clap::Args)]
pub struct Generate {
    /// The amount to generate
    #[arg(short = 'n', long = "count", default_value_t = 10)]
    count: usize,

    /// Generate predictably, starting at 4000000004
    #[arg(short, long)]
    deterministic: bool,

    /// Format using spaces, e.g. 565 228 3297
    #[arg(short, long)]
    format: bool,

    /// Separator to use with --format (overrides the config file)
    #[arg(long, requires = "format")]
    separator: Option<String>,

    /// Range of 9-digit bases to generate from, as LOW-HIGH (repeatable,
    /// overrides the config file)
    #[arg(short, long, value_name = "LOW-HIGH")]
    range: Vec<NumeralRange>,

    /// Seed for reproducible random output (overrides the config file)
    #[arg(long, conflicts_with = "deterministic")]
    seed: Option<u64>,
}

impl Generate {
    #[instrument(skip(config))]
    fn run(self, mut config: Config) -> anyhow::Result<()> {
        if !self.range.is_empty() {
            config.set_ranges(self.range);
        }
        if let Some(separator) = self.separator {
            config.set_separator(separator);
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }

        let numbers: Box<dyn Iterator<Item = NhsNumber>> = if self.deterministic {
            Box::new(DeterministicGenerator::from_ranges(config.ranges()))
        } else if let Some(seed) = config.seed {
            Box::new(RandomGenerator::with_seed(config.ranges(), seed))
        } else {
            Box::new(RandomGenerator::from_ranges(config.ranges()))
        };

        let separator = self.format.then(|| config.separator());

        let mut out = BufWriter::new(io::stdout().lock());
        let written = write_numbers(&mut out, numbers, self.count, separator)
            .context("Failed to write NHS numbers")?;
        out.flush().context("Failed to write NHS numbers")?;

        if written < self.count {
            tracing::warn!(
                "Ranges exhausted after {written} of {} NHS numbers",
                self.count
            );
        }
        Ok(())
    }
}

/// Writes up to `count` numbers, one per line, optionally in 3-3-4 format.
///
/// Returns how many were written, which is less than `count` only if
/// `numbers` runs out.
fn write_numbers<W: Write>(
    out: &mut W,
    numbers: impl Iterator<Item = NhsNumber>,
    count: usize,
    separator: Option<&str>,
) -> io::Result<usize> {
    let mut written = 0;
    for number in numbers.take(count) {
        match separator {
            Some(separator) => writeln!(out, "{}", number.display(separator))?,
            None => writeln!(out, "{number}")?,
        }
        written += 1;
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use nhs_number::{domain::ConfigError, is_valid_nhs_number};

    use super::*;

    fn lines(buffer: &[u8]) -> Vec<String> {
        String::from_utf8(buffer.to_vec())
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn default_amount() {
        let cli = Cli::try_parse_from(["nhs-number-generator"]).unwrap();
        assert_eq!(cli.generate.count, 10);

        let mut buffer = Vec::new();
        let written = write_numbers(
            &mut buffer,
            RandomGenerator::default(),
            cli.generate.count,
            None,
        )
        .unwrap();

        let output = lines(&buffer);
        assert_eq!(written, 10);
        assert_eq!(output.len(), 10);
        assert!(output.iter().all(is_valid_nhs_number));
    }

    #[test]
    fn writes_formatted_numbers() {
        let mut buffer = Vec::new();
        write_numbers(
            &mut buffer,
            DeterministicGenerator::default(),
            2,
            Some(" "),
        )
        .unwrap();

        assert_eq!(lines(&buffer), ["400 000 0004", "400 000 0012"]);
    }

    #[test]
    fn stops_when_generator_is_exhausted() {
        let generator = DeterministicGenerator::new([(600_000_000, 600_000_001)]).unwrap();
        let mut buffer = Vec::new();
        let written = write_numbers(&mut buffer, generator, 5, None).unwrap();

        assert_eq!(written, 2);
        assert_eq!(lines(&buffer), ["6000000006", "6000000014"]);
    }

    #[test]
    fn parses_generate_flags() {
        let cli = Cli::try_parse_from([
            "nhs-number-generator",
            "-n",
            "5",
            "-d",
            "-f",
            "--separator",
            "-",
            "-r",
            "489000000-489999999",
        ])
        .unwrap();

        assert_eq!(cli.generate.count, 5);
        assert!(cli.generate.deterministic);
        assert!(cli.generate.format);
        assert_eq!(cli.generate.separator.as_deref(), Some("-"));
        assert_eq!(
            cli.generate.range,
            [NumeralRange::new(489_000_000, 489_999_999).unwrap()]
        );
        assert!(cli.command.is_none());
    }

    #[test]
    fn rejects_invalid_range_argument() {
        assert!(Cli::try_parse_from(["nhs-number-generator", "-r", "8-4"]).is_err());
        assert!(Cli::try_parse_from(["nhs-number-generator", "-r", "6-6"]).is_err());
    }

    #[test]
    fn separator_requires_format() {
        assert!(Cli::try_parse_from(["nhs-number-generator", "--separator", "-"]).is_err());
    }

    #[test]
    fn seed_conflicts_with_deterministic() {
        assert!(Cli::try_parse_from(["nhs-number-generator", "-d", "--seed", "1"]).is_err());
    }

    #[test]
    fn parses_validate_subcommand() {
        let cli =
            Cli::try_parse_from(["nhs-number-generator", "validate", "9434765919"]).unwrap();
        assert!(matches!(cli.command, Some(Command::Validate(_))));
    }

    fn broken_config() -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"_version = \"1\"\nseed = \"forty-two\"\n")
            .unwrap();
        file
    }

    #[test]
    fn validate_ignores_config_file() {
        let config = broken_config();
        let cli = Cli::try_parse_from([
            "nhs-number-generator",
            "-c",
            config.path().to_str().unwrap(),
            "validate",
            "9434765919",
        ])
        .unwrap();

        cli.dispatch().unwrap();
    }

    #[test]
    fn generate_reports_broken_config_file() {
        let config = broken_config();
        let cli = Cli::try_parse_from([
            "nhs-number-generator",
            "-c",
            config.path().to_str().unwrap(),
        ])
        .unwrap();

        let error = cli.dispatch().unwrap_err();
        assert!(error.downcast_ref::<ConfigError>().is_some());
    }
}
