//! Window command implementation
//!
//! Prints a range of notes as a `0`/`1` string, optionally padding positions
//! outside the sequence with `0`.

use anyhow::Result;
use pianonet_core::NoteRange;
use std::process::ExitCode;

use super::{format_bits, open_sequence, parse_format, Sequence};

/// Read the requested window.
pub fn read(sequence: &Sequence, start: isize, end: isize, pad: bool) -> Vec<bool> {
    let range = if pad {
        NoteRange::Padded { start, end }
    } else {
        NoteRange::Slice {
            start: Some(start),
            end: Some(end),
        }
    };
    sequence.values_in_range(range)
}

/// Run the window command
///
/// # Arguments
/// * `input` - Path to the saved sequence
/// * `format_name` - Container format of the input
/// * `start` - First note index (may be negative)
/// * `end` - Exclusive end note index
/// * `pad` - Pad out-of-bounds positions instead of clamping
///
/// # Returns
/// Exit code: 0 success, 1 error
pub fn run(input: &str, format_name: &str, start: isize, end: isize, pad: bool) -> Result<ExitCode> {
    let format = parse_format(format_name)?;
    let sequence = open_sequence(input, format)?;
    println!("{}", format_bits(&read(&sequence, start, end, pad)));
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pianonet_core::CropDownsampleTransformer;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    fn sequence() -> Sequence {
        let transformer = Arc::new(CropDownsampleTransformer::new(0, 2, 1).unwrap());
        Sequence::from_flat_sequence(transformer, &[true, true, false, true]).unwrap()
    }

    #[test]
    fn test_padded_window() {
        assert_eq!(format_bits(&read(&sequence(), -2, 6, true)), "00110100");
    }

    #[test]
    fn test_slice_window_counts_negative_from_end() {
        assert_eq!(format_bits(&read(&sequence(), -2, 6, false)), "01");
    }
}
