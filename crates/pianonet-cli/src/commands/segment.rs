//! Segment command implementation
//!
//! Extracts a random run of whole timesteps from a saved sequence and writes
//! it as a new sequence.

use anyhow::{Context, Result};
use colored::Colorize;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use std::process::ExitCode;

use super::{open_sequence, parse_format, Sequence};

/// Pick the segment, seeded when `seed` is given.
pub fn extract(sequence: &Sequence, num_timesteps: usize, seed: Option<u64>) -> Result<Sequence> {
    let segment = match seed {
        Some(seed) => {
            let mut rng = Pcg32::seed_from_u64(seed);
            sequence.random_segment_with_rng(num_timesteps, &mut rng)
        }
        None => sequence.random_segment(num_timesteps),
    };
    segment.with_context(|| format!("Failed to extract {} timesteps", num_timesteps))
}

/// Run the segment command
///
/// # Arguments
/// * `input` - Path to the saved sequence
/// * `format_name` - Container format of the input
/// * `num_timesteps` - Segment length in timesteps
/// * `output` - Path to write the segment to
/// * `output_format_name` - Container format of the output (default: same as input)
/// * `seed` - Optional RNG seed for reproducible selection
///
/// # Returns
/// Exit code: 0 success, 1 error
pub fn run(
    input: &str,
    format_name: &str,
    num_timesteps: usize,
    output: &str,
    output_format_name: Option<&str>,
    seed: Option<u64>,
) -> Result<ExitCode> {
    let format = parse_format(format_name)?;
    let output_format = match output_format_name {
        Some(name) => parse_format(name)?,
        None => format,
    };

    println!(
        "{} {} timesteps from {}",
        "Segmenting:".cyan().bold(),
        num_timesteps,
        input
    );
    if let Some(seed) = seed {
        println!("{} {}", "Seed:".dimmed(), seed);
    }

    let sequence = open_sequence(input, format)?;
    let segment = extract(&sequence, num_timesteps, seed)?;
    segment
        .save(output, output_format)
        .with_context(|| format!("Failed to write: {}", output))?;

    println!(
        "{} Wrote {} notes to {} ({})",
        "SUCCESS".green().bold(),
        segment.length_in_notes(),
        output,
        output_format
    );
    println!("{} {}", "Hash:".dimmed(), segment.content_hash());

    Ok(ExitCode::SUCCESS)
}
