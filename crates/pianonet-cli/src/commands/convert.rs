//! Convert command implementation
//!
//! Re-encodes a saved sequence in another container format and checks that the
//! content hash survives.

use anyhow::{bail, Context, Result};
use colored::Colorize;
use std::process::ExitCode;

use super::{open_sequence, parse_format};

/// Run the convert command
///
/// # Arguments
/// * `input` - Path to the saved sequence
/// * `from` - Container format of the input
/// * `output` - Path to write to
/// * `to` - Container format of the output
///
/// # Returns
/// Exit code: 0 success, 1 error
pub fn run(input: &str, from: &str, output: &str, to: &str) -> Result<ExitCode> {
    let from = parse_format(from)?;
    let to = parse_format(to)?;
    println!(
        "{} {} ({}) -> {} ({})",
        "Converting:".cyan().bold(),
        input,
        from,
        output,
        to
    );

    let sequence = open_sequence(input, from)?;
    sequence
        .save(output, to)
        .with_context(|| format!("Failed to write: {}", output))?;

    let written = open_sequence(output, to)?;
    if written.content_hash() != sequence.content_hash() {
        bail!(
            "content hash changed during conversion: {} != {}",
            written.content_hash(),
            sequence.content_hash()
        );
    }

    println!(
        "{} Converted to {} ({})",
        "SUCCESS".green().bold(),
        output,
        to
    );
    println!("{} {}", "Hash:".dimmed(), written.content_hash());

    Ok(ExitCode::SUCCESS)
}
