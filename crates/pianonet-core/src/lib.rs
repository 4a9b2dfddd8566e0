//! Pianonet Note Sequences
//!
//! This crate converts a two-dimensional pianoroll (timesteps by keys) into the
//! one-dimensional boolean stream a sequence model consumes and produces, and
//! back again.
//!
//! # Overview
//!
//! - A [`SequenceTransformer`] decides how a pianoroll is cropped, downsampled,
//!   and flattened. [`CropDownsampleTransformer`] is the stock implementation.
//! - A [`NoteSequence`] holds the flat notes and a shared handle to its
//!   transformer. It offers random timestep-aligned segments, padded range
//!   reads for fixed-width context windows, BLAKE3 content hashes, and
//!   persistence in two container formats.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use pianonet_core::{CropDownsampleTransformer, NoteRange, NoteSequence, PianoRoll};
//!
//! // Keep 48 keys starting at key 20, every other timestep.
//! let transformer = Arc::new(CropDownsampleTransformer::new(20, 48, 2).unwrap());
//!
//! let mut roll = PianoRoll::empty(32, 88);
//! roll.set(0, 39, true);
//!
//! let sequence = NoteSequence::from_pianoroll(transformer, &roll).unwrap();
//! assert_eq!(sequence.length_in_timesteps(), 16);
//!
//! // A context window that starts before the first note.
//! let window = sequence.values_in_range(NoteRange::Padded { start: -10, end: 48 });
//! assert_eq!(window.len(), 58);
//! assert!(window[10 + 19]);
//!
//! let segment = sequence.random_segment(4).unwrap();
//! assert_eq!(segment.length_in_notes(), 4 * 48);
//! ```
//!
//! # Modules
//!
//! - [`error`]: Error types
//! - [`hash`]: Content hashing
//! - [`persist`]: Container formats for saving and loading
//! - [`pianoroll`]: Pianoroll grid and playback capability
//! - [`sequence`]: The note sequence type
//! - [`transform`]: Transformer capability and the crop/downsample implementation

pub mod error;
pub mod hash;
pub mod persist;
pub mod pianoroll;
pub mod sequence;
pub mod transform;

pub use error::{NoteSequenceError, PlaybackError, SequenceResult, TransformError};
pub use hash::note_content_hash;
pub use persist::{SequenceFormat, FORMAT_VERSION};
pub use pianoroll::{PianoRoll, Playback, PIANO_KEY_COUNT};
pub use sequence::{NoteRange, NoteSequence, Source};
pub use transform::{CropDownsampleTransformer, SequenceTransformer};

/// Crate version, recorded by tools that write sequence files.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
