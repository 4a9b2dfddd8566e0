//! Create command implementation
//!
//! Builds a note sequence from a text file of `0`/`1` notes and a transformer
//! description, then saves it.

use anyhow::{Context, Result};
use colored::Colorize;
use pianonet_core::CropDownsampleTransformer;
use std::fs;
use std::process::ExitCode;
use std::sync::Arc;

use super::{parse_bits, parse_format, Sequence};

/// Load a transformer description (JSON).
///
/// ```json
/// { "full_key_count": 88, "min_key": 20, "num_keys": 48, "downsample_factor": 2 }
/// ```
pub fn load_transformer(path: &str) -> Result<CropDownsampleTransformer> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read transformer file: {}", path))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse transformer file: {}", path))
}

/// Run the create command
///
/// # Arguments
/// * `transformer_path` - Path to the transformer JSON description
/// * `notes_path` - Path to the note text file
/// * `output` - Path to write the sequence to
/// * `format_name` - Output container format (json or binary)
///
/// # Returns
/// Exit code: 0 success, 1 error
pub fn run(
    transformer_path: &str,
    notes_path: &str,
    output: &str,
    format_name: &str,
) -> Result<ExitCode> {
    let format = parse_format(format_name)?;
    println!("{} {}", "Creating:".cyan().bold(), output);

    let transformer = Arc::new(load_transformer(transformer_path)?);
    let text = fs::read_to_string(notes_path)
        .with_context(|| format!("Failed to read notes file: {}", notes_path))?;
    let notes = parse_bits(&text).with_context(|| format!("Invalid notes file: {}", notes_path))?;

    let sequence = Sequence::from_flat_sequence(transformer, &notes)
        .with_context(|| format!("Notes in {} do not fit the transformer", notes_path))?;
    sequence
        .save(output, format)
        .with_context(|| format!("Failed to write: {}", output))?;

    println!(
        "{} {} notes, {} timesteps ({})",
        "SUCCESS".green().bold(),
        sequence.length_in_notes(),
        sequence.length_in_timesteps(),
        format
    );
    println!("{} {}", "Hash:".dimmed(), sequence.content_hash());

    Ok(ExitCode::SUCCESS)
}
