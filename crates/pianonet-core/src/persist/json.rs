//! JSON container.
//!
//! ```json
//! { "format_version": 1, "transformer": { ... }, "notes": "0010..." }
//! ```

use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::FORMAT_VERSION;
use crate::error::{NoteSequenceError, SequenceResult};

#[derive(Serialize)]
struct DocumentRef<'a, T> {
    format_version: u16,
    transformer: &'a T,
    notes: String,
}

#[derive(Deserialize)]
struct Document<T> {
    transformer: T,
    notes: String,
}

/// Read before the full document so a newer schema reports its version.
#[derive(Deserialize)]
struct VersionProbe {
    format_version: u16,
}

pub(super) fn encode<T: Serialize>(notes: &[bool], transformer: &T) -> SequenceResult<Vec<u8>> {
    let document = DocumentRef {
        format_version: FORMAT_VERSION,
        transformer,
        notes: notes.iter().map(|&on| if on { '1' } else { '0' }).collect(),
    };
    serde_json::to_vec_pretty(&document).map_err(|e| NoteSequenceError::Serialize(e.to_string()))
}

pub(super) fn decode<T: DeserializeOwned>(
    bytes: &[u8],
    path: &Path,
) -> SequenceResult<(Vec<bool>, T)> {
    let probe: VersionProbe =
        serde_json::from_slice(bytes).map_err(|e| NoteSequenceError::deserialize(path, e))?;
    if probe.format_version != FORMAT_VERSION {
        return Err(NoteSequenceError::UnsupportedFormatVersion {
            found: probe.format_version,
            expected: FORMAT_VERSION,
        });
    }

    let document: Document<T> =
        serde_json::from_slice(bytes).map_err(|e| NoteSequenceError::deserialize(path, e))?;

    let notes = document
        .notes
        .char_indices()
        .map(|(i, c)| match c {
            '0' => Ok(false),
            '1' => Ok(true),
            other => Err(NoteSequenceError::deserialize(
                path,
                format!("invalid note character {:?} at index {}", other, i),
            )),
        })
        .collect::<SequenceResult<Vec<bool>>>()?;

    Ok((notes, document.transformer))
}
