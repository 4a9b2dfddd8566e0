//! CLI command implementations

pub mod convert;
pub mod create;
pub mod info;
pub mod segment;
pub mod window;

use anyhow::{anyhow, Context, Result};
use pianonet_core::{CropDownsampleTransformer, NoteSequence, SequenceFormat};
use std::path::Path;

/// Note sequences handled by the CLI.
pub type Sequence = NoteSequence<CropDownsampleTransformer>;

/// Parse a `--format` style argument.
pub(crate) fn parse_format(name: &str) -> Result<SequenceFormat> {
    name.parse::<SequenceFormat>().map_err(|e| anyhow!(e))
}

/// Open a saved sequence, attaching the path to any error.
pub(crate) fn open_sequence(path: &str, format: SequenceFormat) -> Result<Sequence> {
    Sequence::open(Path::new(path), format)
        .with_context(|| format!("Failed to load {} note sequence: {}", format, path))
}

/// Render notes as a string of `0` and `1` characters.
pub(crate) fn format_bits(notes: &[bool]) -> String {
    notes.iter().map(|&on| if on { '1' } else { '0' }).collect()
}

/// Parse `0`/`1` characters, skipping whitespace.
pub(crate) fn parse_bits(text: &str) -> Result<Vec<bool>> {
    text.chars()
        .filter(|c| !c.is_whitespace())
        .enumerate()
        .map(|(i, c)| match c {
            '0' => Ok(false),
            '1' => Ok(true),
            other => Err(anyhow!("invalid note character {:?} at note {}", other, i)),
        })
        .collect()
}
