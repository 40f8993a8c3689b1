//! Generate 10-digit NHS numbers from the command line.
//!
//! Prints random NHS numbers from the ranges issued in England, Wales and the
//! Isle of Man, one per line:
//!
//! ```text
//! $ nhs-number-generator -n 3 -f
//! 565 228 3297
//! 439 874 0214
//! 681 201 5533
//! ```

use clap::Parser;

mod cli;

fn main() -> anyhow::Result<()> {
    cli::Cli::parse().run()
}
