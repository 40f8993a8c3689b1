use std::path::{Path, PathBuf};

use nonempty::NonEmpty;
use serde::{Deserialize, Serialize};

use super::range::{self, NumeralRange};
use crate::format::DEFAULT_SEPARATOR;

/// Configuration for generating NHS numbers.
///
/// Loaded from a TOML file. Every field is optional; missing fields take their
/// defaults.
///
/// ```toml
/// _version = "1"
/// separator = "-"
/// seed = 42
///
/// [[ranges]]
/// low = 489000000
/// high = 489999999
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Versions", into = "Versions")]
pub struct Config {
    /// The ranges of bases to generate from.
    ///
    /// If this is empty, the default ranges are used.
    ranges: Vec<NumeralRange>,

    /// The separator placed between groups when formatting.
    separator: String,

    /// Seed for the random generator.
    ///
    /// When set, random output is reproducible.
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ranges: Vec::new(),
            separator: default_separator(),
            seed: None,
        }
    }
}

impl Config {
    /// Loads the configuration from a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the TOML content
    /// (including any range in it) is invalid.
    pub fn load(path: &Path) -> Result<Self, Error> {
        let content = std::fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&content).map_err(|source| Error::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(
            "Loaded config from {}: {} range(s)",
            path.display(),
            config.ranges.len()
        );
        Ok(config)
    }

    /// Saves the configuration to a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be serialized to TOML or if
    /// the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), Error> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|source| Error::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Returns the configured ranges, falling back to
    /// [`DEFAULT_RANGES`](super::DEFAULT_RANGES) if none are set.
    #[must_use]
    pub fn ranges(&self) -> NonEmpty<NumeralRange> {
        NonEmpty::from_slice(&self.ranges).unwrap_or_else(range::default_ranges)
    }

    /// Replaces the configured ranges.
    pub fn set_ranges(&mut self, ranges: Vec<NumeralRange>) {
        self.ranges = ranges;
    }

    /// Returns the separator used when formatting.
    #[must_use]
    pub fn separator(&self) -> &str {
        &self.separator
    }

    /// Sets the separator used when formatting.
    pub fn set_separator(&mut self, separator: String) {
        self.separator = separator;
    }
}

fn default_separator() -> String {
    DEFAULT_SEPARATOR.to_string()
}

/// Errors that can occur loading or saving configuration.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The file couldn't be read.
    #[error("Failed to read config file {}: {source}", .path.display())]
    Read {
        /// The file that was read.
        path: PathBuf,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// The file isn't a valid configuration.
    #[error("Failed to parse config file {}: {source}", .path.display())]
    Parse {
        /// The file that was parsed.
        path: PathBuf,
        /// The underlying TOML error.
        source: toml::de::Error,
    },

    /// The configuration couldn't be serialized.
    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// The file couldn't be written.
    #[error("Failed to write config file {}: {source}", .path.display())]
    Write {
        /// The file that was written.
        path: PathBuf,
        /// The underlying IO error.
        source: std::io::Error,
    },
}

/// The serialized versions of the configuration.
/// This allows for future changes to the configuration format and to the domain
/// type without breaking compatibility.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "_version")]
enum Versions {
    #[serde(rename = "1")]
    V1 {
        #[serde(default = "default_separator")]
        separator: String,

        #[serde(default, skip_serializing_if = "Option::is_none")]
        seed: Option<u64>,

        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        ranges: Vec<NumeralRange>,
    },
}

impl From<Versions> for Config {
    fn from(versions: Versions) -> Self {
        match versions {
            Versions::V1 {
                ranges,
                separator,
                seed,
            } => Self {
                ranges,
                separator,
                seed,
            },
        }
    }
}

impl From<Config> for Versions {
    fn from(config: Config) -> Self {
        Self::V1 {
            ranges: config.ranges,
            separator: config.separator,
            seed: config.seed,
        }
    }
}
