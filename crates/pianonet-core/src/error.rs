//! Error types for note sequences and transformers.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for note sequence operations.
pub type SequenceResult<T> = Result<T, NoteSequenceError>;

/// Errors raised by a [`crate::SequenceTransformer`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransformError {
    /// Flat sequence length does not divide into whole timesteps.
    #[error("flat sequence of {length} notes is not a multiple of {keys_per_timestep} keys per timestep")]
    LengthNotMultiple {
        /// Number of notes in the rejected sequence.
        length: usize,
        /// Keys per timestep expected by the transformer.
        keys_per_timestep: usize,
    },

    /// Pianoroll width does not match the transformer's key range.
    #[error("pianoroll has {found} keys, transformer expects {expected}")]
    KeyCountMismatch {
        /// Keys the transformer was configured for.
        expected: usize,
        /// Keys present in the pianoroll.
        found: usize,
    },

    /// Transformer parameters are inconsistent.
    #[error("invalid transformer parameter '{name}': {message}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Error message.
        message: String,
    },
}

impl TransformError {
    /// Creates an invalid parameter error.
    pub fn invalid_param(name: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            message: message.into(),
        }
    }

    /// Stable error code.
    pub fn code(&self) -> &'static str {
        match self {
            TransformError::LengthNotMultiple { .. } => "TRANSFORM_001",
            TransformError::KeyCountMismatch { .. } => "TRANSFORM_002",
            TransformError::InvalidParameter { .. } => "TRANSFORM_003",
        }
    }
}

/// Error reported by a [`crate::Playback`] implementation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("playback failed: {message}")]
pub struct PlaybackError {
    /// Error message.
    pub message: String,
}

impl PlaybackError {
    /// Creates a playback error.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Errors that can occur while building, reading, or persisting a note sequence.
#[derive(Debug, Error)]
pub enum NoteSequenceError {
    /// The flat sequence was rejected by the transformer.
    #[error("flat sequence rejected: {0}")]
    Validation(#[source] TransformError),

    /// Flattening or unflattening through the transformer failed.
    #[error("transform failed: {0}")]
    Transform(#[from] TransformError),

    /// More timesteps were requested than the sequence holds.
    #[error("requested {requested} timesteps but the sequence only has {available}")]
    SegmentTooLong {
        /// Timesteps requested.
        requested: usize,
        /// Timesteps available.
        available: usize,
    },

    /// The reconstructed pianoroll could not be played.
    #[error(transparent)]
    Playback(#[from] PlaybackError),

    /// Reading or writing a file failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        /// File being accessed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The sequence could not be encoded.
    #[error("failed to serialize note sequence: {0}")]
    Serialize(String),

    /// The file contents could not be decoded.
    #[error("failed to deserialize {path}: {message}")]
    Deserialize {
        /// File being decoded.
        path: PathBuf,
        /// Error message.
        message: String,
    },

    /// Binary container did not start with the expected magic bytes.
    #[error("{path} is not a note sequence file (magic {found:?})")]
    InvalidMagic {
        /// File being decoded.
        path: PathBuf,
        /// Bytes found at the start of the file.
        found: [u8; 4],
    },

    /// File was written by an incompatible format version.
    #[error("unsupported note sequence format version {found} (expected {expected})")]
    UnsupportedFormatVersion {
        /// Version stored in the file.
        found: u16,
        /// Version this build reads.
        expected: u16,
    },

    /// Binary container ended before all declared data was read.
    #[error("{path} is truncated: expected {expected} bytes of note data, found {actual}")]
    Truncated {
        /// File being decoded.
        path: PathBuf,
        /// Bytes declared by the header.
        expected: usize,
        /// Bytes actually present.
        actual: usize,
    },
}

impl NoteSequenceError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn deserialize(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        Self::Deserialize {
            path: path.into(),
            message: message.to_string(),
        }
    }

    /// Stable error code.
    pub fn code(&self) -> &'static str {
        match self {
            NoteSequenceError::Validation(_) => "SEQ_001",
            NoteSequenceError::Transform(_) => "SEQ_002",
            NoteSequenceError::SegmentTooLong { .. } => "SEQ_003",
            NoteSequenceError::Playback(_) => "SEQ_004",
            NoteSequenceError::Io { .. } => "SEQ_005",
            NoteSequenceError::Serialize(_) => "SEQ_006",
            NoteSequenceError::Deserialize { .. } => "SEQ_007",
            NoteSequenceError::InvalidMagic { .. } => "SEQ_008",
            NoteSequenceError::UnsupportedFormatVersion { .. } => "SEQ_009",
            NoteSequenceError::Truncated { .. } => "SEQ_010",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_param_helper() {
        let err = TransformError::invalid_param("num_keys", "must be greater than zero");
        assert!(err.to_string().contains("num_keys"));
        assert!(err.to_string().contains("greater than zero"));
        assert_eq!(err.code(), "TRANSFORM_003");
    }

    #[test]
    fn test_validation_wraps_transform_error() {
        let err = NoteSequenceError::Validation(TransformError::LengthNotMultiple {
            length: 10,
            keys_per_timestep: 4,
        });
        assert_eq!(err.code(), "SEQ_001");
        assert!(err.to_string().contains("10 notes"));
    }

    #[test]
    fn test_segment_too_long_message() {
        let err = NoteSequenceError::SegmentTooLong {
            requested: 5,
            available: 3,
        };
        assert_eq!(
            err.to_string(),
            "requested 5 timesteps but the sequence only has 3"
        );
    }
}
