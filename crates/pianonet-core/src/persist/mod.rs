//! Saving and loading note sequences.
//!
//! Two container formats are supported, chosen explicitly by the caller:
//!
//! - [`SequenceFormat::Json`]: human-readable document, notes as a `0`/`1` string
//! - [`SequenceFormat::Binary`]: compact little-endian container, notes bit-packed
//!
//! Both store the transformer next to the notes, so a saved file is enough to
//! rebuild the whole sequence. Both carry [`FORMAT_VERSION`]; files with any
//! other version are rejected.

mod binary;
mod json;

use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use log::debug;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{NoteSequenceError, SequenceResult};
use crate::sequence::NoteSequence;
use crate::transform::SequenceTransformer;

/// Version written into every saved file.
pub const FORMAT_VERSION: u16 = 1;

/// On-disk container format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SequenceFormat {
    /// Generic JSON document.
    #[default]
    Json,
    /// Compact bit-packed container.
    Binary,
}

impl SequenceFormat {
    /// All supported formats.
    pub const ALL: [SequenceFormat; 2] = [SequenceFormat::Json, SequenceFormat::Binary];

    /// Short name used on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            SequenceFormat::Json => "json",
            SequenceFormat::Binary => "binary",
        }
    }

    /// Conventional file extension.
    pub fn extension(&self) -> &'static str {
        match self {
            SequenceFormat::Json => "pnsq.json",
            SequenceFormat::Binary => "pnsq",
        }
    }
}

impl fmt::Display for SequenceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SequenceFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "json" => Ok(SequenceFormat::Json),
            "binary" => Ok(SequenceFormat::Binary),
            other => Err(format!(
                "unknown sequence format '{}' (expected json or binary)",
                other
            )),
        }
    }
}

impl<T: SequenceTransformer + Serialize> NoteSequence<T> {
    /// Encode the sequence and its transformer.
    pub fn to_bytes(&self, format: SequenceFormat) -> SequenceResult<Vec<u8>> {
        match format {
            SequenceFormat::Json => json::encode(&self.notes, self.transformer.as_ref()),
            SequenceFormat::Binary => binary::encode(&self.notes, self.transformer.as_ref()),
        }
    }

    /// Write the sequence and its transformer to `path`.
    pub fn save(&self, path: impl AsRef<Path>, format: SequenceFormat) -> SequenceResult<()> {
        let path = path.as_ref();
        let bytes = self.to_bytes(format)?;
        fs::write(path, &bytes).map_err(|e| NoteSequenceError::io(path, e))?;
        debug!(
            "saved {} notes to {} ({}, {} bytes)",
            self.notes.len(),
            path.display(),
            format,
            bytes.len()
        );
        Ok(())
    }
}

impl<T: SequenceTransformer + DeserializeOwned> NoteSequence<T> {
    /// Read a sequence previously written with [`NoteSequence::save`].
    pub fn open(path: impl AsRef<Path>, format: SequenceFormat) -> SequenceResult<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|e| NoteSequenceError::io(path, e))?;

        let (notes, transformer) = match format {
            SequenceFormat::Json => json::decode::<T>(&bytes, path)?,
            SequenceFormat::Binary => binary::decode::<T>(&bytes, path)?,
        };
        transformer
            .validate(&notes)
            .map_err(NoteSequenceError::Validation)?;

        debug!(
            "loaded {} notes from {} ({})",
            notes.len(),
            path.display(),
            format
        );
        Ok(Self {
            notes,
            transformer: Arc::new(transformer),
        })
    }

    /// Replace this sequence with the one stored at `path`.
    ///
    /// The file is fully decoded before anything is replaced; on error `self`
    /// is left as it was.
    pub fn load(&mut self, path: impl AsRef<Path>, format: SequenceFormat) -> SequenceResult<()> {
        *self = Self::open(path, format)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_names_round_trip() {
        for format in SequenceFormat::ALL {
            assert_eq!(format.name().parse::<SequenceFormat>(), Ok(format));
            assert_eq!(format.to_string(), format.name());
        }
    }

    #[test]
    fn test_unknown_format_name() {
        let err = "mna_jl".parse::<SequenceFormat>().unwrap_err();
        assert!(err.contains("mna_jl"));
    }

    #[test]
    fn test_extensions_are_distinct() {
        assert_ne!(
            SequenceFormat::Json.extension(),
            SequenceFormat::Binary.extension()
        );
        assert_eq!(SequenceFormat::default(), SequenceFormat::Json);
    }
}
