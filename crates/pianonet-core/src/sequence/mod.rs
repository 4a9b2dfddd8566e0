//! The [`NoteSequence`] type: a flattened pianoroll plus the transformer that
//! gives it musical meaning.
//!
//! ```text
//! timestep = 0                 timestep = 1
//!  A  A# B  C  C# D  D# E  ... A  A# B  C  C# D  D# E  ...
//! [0, 0, 0, 1, 0, 0, 0, 0, ... 1, 0, 0, 1, 0, 0, 0, 0, ...]
//! ```
//!
//! # Ownership
//!
//! A sequence owns its notes and shares its transformer through an [`Arc`].
//! Flat input is copied on construction, and [`NoteSequence::random_segment`]
//! copies the selected slice into the new sequence, so no two sequences ever
//! alias note storage. The transformer is never cloned, only its `Arc`.

mod range;
mod segment;

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use log::trace;
use serde::de::DeserializeOwned;

use crate::error::{NoteSequenceError, SequenceResult};
use crate::hash::note_content_hash;
use crate::persist::SequenceFormat;
use crate::pianoroll::Playback;
use crate::transform::SequenceTransformer;

pub use range::NoteRange;

/// Where a [`NoteSequence`] is initialised from.
pub enum Source<'a, T: SequenceTransformer> {
    /// Flatten a pianoroll through the transformer.
    Pianoroll {
        /// Pianoroll to flatten.
        pianoroll: &'a T::Pianoroll,
        /// Transformer used for flattening and later reconstruction.
        transformer: Arc<T>,
    },
    /// Adopt an already cropped and downsampled flat sequence.
    FlatSequence {
        /// Notes, already in the transformer's layout.
        notes: &'a [bool],
        /// Transformer the notes conform to.
        transformer: Arc<T>,
    },
    /// Load a previously saved sequence, transformer included.
    File {
        /// Path of the saved sequence.
        path: &'a Path,
        /// Container format the file was written in.
        format: SequenceFormat,
    },
}

/// One-dimensional note stream derived from flattening a pianoroll.
pub struct NoteSequence<T> {
    pub(crate) notes: Vec<bool>,
    pub(crate) transformer: Arc<T>,
}

impl<T: SequenceTransformer + DeserializeOwned> NoteSequence<T> {
    /// Build a sequence from any [`Source`].
    pub fn create(source: Source<'_, T>) -> SequenceResult<Self> {
        match source {
            Source::Pianoroll {
                pianoroll,
                transformer,
            } => Self::from_pianoroll(transformer, pianoroll),
            Source::FlatSequence { notes, transformer } => {
                Self::from_flat_sequence(transformer, notes)
            }
            Source::File { path, format } => Self::open(path, format),
        }
    }
}

impl<T: SequenceTransformer> NoteSequence<T> {
    /// Flatten `pianoroll` through `transformer`.
    pub fn from_pianoroll(transformer: Arc<T>, pianoroll: &T::Pianoroll) -> SequenceResult<Self> {
        let notes = transformer.flatten(pianoroll)?;
        trace!("flattened pianoroll into {} notes", notes.len());
        Ok(Self { notes, transformer })
    }

    /// Adopt a flat sequence that already matches the transformer's cropping
    /// and downsampling. The notes are validated, never re-cropped, and copied.
    pub fn from_flat_sequence(transformer: Arc<T>, notes: &[bool]) -> SequenceResult<Self> {
        transformer
            .validate(notes)
            .map_err(NoteSequenceError::Validation)?;
        Ok(Self {
            notes: notes.to_vec(),
            transformer,
        })
    }

    /// The stored flat sequence.
    pub fn notes(&self) -> &[bool] {
        &self.notes
    }

    /// Shared handle to the transformer.
    pub fn transformer(&self) -> &Arc<T> {
        &self.transformer
    }

    /// Rebuild a pianoroll, lossy only where the transformer cropped or downsampled.
    pub fn to_pianoroll(&self) -> SequenceResult<T::Pianoroll> {
        Ok(self.transformer.unflatten(&self.notes)?)
    }

    /// Length of the flat sequence.
    pub fn length_in_notes(&self) -> usize {
        self.notes.len()
    }

    /// Length in whole timesteps.
    pub fn length_in_timesteps(&self) -> usize {
        self.notes.len() / self.transformer.keys_per_timestep()
    }

    /// BLAKE3 hash of the notes, independent of the transformer.
    pub fn content_hash(&self) -> String {
        note_content_hash(&self.notes)
    }

    /// Reconstruct the pianoroll and play it.
    pub fn play(&self) -> SequenceResult<()>
    where
        T::Pianoroll: Playback,
    {
        self.to_pianoroll()?.play()?;
        Ok(())
    }
}

impl<T> Clone for NoteSequence<T> {
    fn clone(&self) -> Self {
        Self {
            notes: self.notes.clone(),
            transformer: Arc::clone(&self.transformer),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for NoteSequence<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NoteSequence")
            .field("length_in_notes", &self.notes.len())
            .field("transformer", &self.transformer)
            .finish()
    }
}
