//! Bounds-safe reads of note ranges.

use std::ops::Range;

use super::NoteSequence;

/// A range of note indices to read from a [`NoteSequence`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteRange {
    /// Ordinary slice rules: open ends, negative indices count from the end,
    /// out-of-range indices clamp, and inverted ranges are empty.
    Slice {
        /// First index, or the beginning when `None`.
        start: Option<isize>,
        /// Exclusive end index, or the end when `None`.
        end: Option<isize>,
    },
    /// Fixed-width window; positions before the start or past the end of the
    /// sequence read as `false`.
    Padded {
        /// First index, may be negative.
        start: isize,
        /// Exclusive end index, may exceed the sequence length.
        end: isize,
    },
}

/// Resolve slice bounds against a sequence of `len` entries.
fn resolve_slice(len: usize, start: Option<isize>, end: Option<isize>) -> Range<usize> {
    let clamp = |index: isize| -> usize {
        if index < 0 {
            len.saturating_sub(index.unsigned_abs())
        } else {
            index.unsigned_abs().min(len)
        }
    };

    let start = start.map_or(0, clamp);
    let end = end.map_or(len, clamp);
    if start >= end {
        start..start
    } else {
        start..end
    }
}

impl<T> NoteSequence<T> {
    /// Read the notes covered by `range`.
    pub fn values_in_range(&self, range: NoteRange) -> Vec<bool> {
        match range {
            NoteRange::Slice { start, end } => self.slice_values(start, end).to_vec(),
            NoteRange::Padded { start, end } => self.padded_values(start, end),
        }
    }

    /// Borrow the notes selected by ordinary slice rules.
    pub fn slice_values(&self, start: Option<isize>, end: Option<isize>) -> &[bool] {
        &self.notes[resolve_slice(self.notes.len(), start, end)]
    }

    /// Read `start..end`, padding with `false` wherever the window hangs over
    /// either end of the sequence.
    ///
    /// The window inside the sequence is read with slice rules and each
    /// boundary is padded independently, so the result is not always
    /// `end - start` long when `start > end`.
    pub fn padded_values(&self, start: isize, end: isize) -> Vec<bool> {
        let len = self.notes.len();
        let len_index = isize::try_from(len).unwrap_or(isize::MAX);

        let pad_at_start = if start < 0 { start.unsigned_abs() } else { 0 };
        let pad_at_end = if end > len_index {
            end.abs_diff(len_index)
        } else {
            0
        };

        let window = self.slice_values(Some(start.max(0)), Some(end.min(len_index)));

        let mut values = Vec::with_capacity(pad_at_start + window.len() + pad_at_end);
        values.resize(pad_at_start, false);
        values.extend_from_slice(window);
        values.resize(values.len() + pad_at_end, false);
        values
    }
}
