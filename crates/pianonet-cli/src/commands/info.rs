//! Info command implementation
//!
//! Prints lengths, transformer parameters, and the content hash of a saved
//! note sequence.

use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;
use std::process::ExitCode;

use super::{open_sequence, parse_format, Sequence};

/// JSON output for the info command.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InfoOutput {
    /// Number of notes in the flat sequence
    pub length_in_notes: usize,
    /// Number of whole timesteps
    pub length_in_timesteps: usize,
    /// Notes per timestep
    pub keys_per_timestep: usize,
    /// Lowest kept key in the source pianoroll
    pub min_key: usize,
    /// Width of the source pianoroll
    pub full_key_count: usize,
    /// Timestep downsampling factor
    pub downsample_factor: usize,
    /// Fraction of notes that are on
    pub density: f64,
    /// BLAKE3 content hash
    pub content_hash: String,
}

impl InfoOutput {
    /// Collect info about a sequence.
    pub fn from_sequence(sequence: &Sequence) -> Self {
        let transformer = sequence.transformer();
        let active = sequence.notes().iter().filter(|&&on| on).count();
        let density = if sequence.length_in_notes() == 0 {
            0.0
        } else {
            active as f64 / sequence.length_in_notes() as f64
        };

        Self {
            length_in_notes: sequence.length_in_notes(),
            length_in_timesteps: sequence.length_in_timesteps(),
            keys_per_timestep: transformer.num_keys(),
            min_key: transformer.min_key(),
            full_key_count: transformer.full_key_count(),
            downsample_factor: transformer.downsample_factor(),
            density,
            content_hash: sequence.content_hash(),
        }
    }
}

/// Run the info command
///
/// # Arguments
/// * `input` - Path to the saved sequence
/// * `format_name` - Container format of the input
/// * `json_output` - Whether to output machine-readable JSON
///
/// # Returns
/// Exit code: 0 success, 1 error
pub fn run(input: &str, format_name: &str, json_output: bool) -> Result<ExitCode> {
    let format = parse_format(format_name)?;
    let sequence = open_sequence(input, format)?;
    let info = InfoOutput::from_sequence(&sequence);

    if json_output {
        let json = serde_json::to_string_pretty(&info).context("Failed to serialize info")?;
        println!("{}", json);
        return Ok(ExitCode::SUCCESS);
    }

    println!("{} {}", "Sequence:".cyan().bold(), input);
    println!("  {:<20} {}", "notes", info.length_in_notes);
    println!("  {:<20} {}", "timesteps", info.length_in_timesteps);
    println!("  {:<20} {}", "keys per timestep", info.keys_per_timestep);
    println!(
        "  {:<20} {}..{} of {}",
        "key range",
        info.min_key,
        info.min_key + info.keys_per_timestep,
        info.full_key_count
    );
    println!("  {:<20} {}", "downsample factor", info.downsample_factor);
    println!("  {:<20} {:.4}", "density", info.density);
    println!("{} {}", "Hash:".dimmed(), info.content_hash);

    Ok(ExitCode::SUCCESS)
}
