//! Pianoroll grid of note-on states indexed by timestep and key.

use crate::error::{PlaybackError, TransformError};

/// Number of keys on a standard piano.
pub const PIANO_KEY_COUNT: usize = 88;

/// Something that can be played back, e.g. through a MIDI output.
pub trait Playback {
    /// Play the content, blocking until playback finishes.
    fn play(&self) -> Result<(), PlaybackError>;
}

/// Two-dimensional note grid: `states[timestep * num_keys + key]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PianoRoll {
    num_keys: usize,
    states: Vec<bool>,
}

impl PianoRoll {
    /// Create an all-off pianoroll with the given dimensions.
    pub fn empty(num_timesteps: usize, num_keys: usize) -> Self {
        Self {
            num_keys,
            states: vec![false; num_timesteps * num_keys],
        }
    }

    /// Build a pianoroll from a row-major flat array of `num_keys` wide rows.
    pub fn from_flat_array(flat: Vec<bool>, num_keys: usize) -> Result<Self, TransformError> {
        if num_keys == 0 {
            return Err(TransformError::invalid_param(
                "num_keys",
                "pianoroll must have at least one key",
            ));
        }
        if flat.len() % num_keys != 0 {
            return Err(TransformError::LengthNotMultiple {
                length: flat.len(),
                keys_per_timestep: num_keys,
            });
        }
        Ok(Self {
            num_keys,
            states: flat,
        })
    }

    /// Row-major copy of the grid.
    pub fn to_flat_array(&self) -> Vec<bool> {
        self.states.clone()
    }

    /// Number of keys per timestep.
    pub fn num_keys(&self) -> usize {
        self.num_keys
    }

    /// Number of timesteps.
    pub fn num_timesteps(&self) -> usize {
        if self.num_keys == 0 {
            0
        } else {
            self.states.len() / self.num_keys
        }
    }

    /// Note state at `(timestep, key)`, or `None` if out of bounds.
    pub fn get(&self, timestep: usize, key: usize) -> Option<bool> {
        if key >= self.num_keys {
            return None;
        }
        self.states.get(timestep * self.num_keys + key).copied()
    }

    /// Set the note state at `(timestep, key)`. Out-of-bounds writes are ignored.
    pub fn set(&mut self, timestep: usize, key: usize, on: bool) {
        if key >= self.num_keys {
            return;
        }
        if let Some(state) = self.states.get_mut(timestep * self.num_keys + key) {
            *state = on;
        }
    }

    /// The keys of a single timestep.
    pub fn row(&self, timestep: usize) -> Option<&[bool]> {
        let start = timestep * self.num_keys;
        self.states.get(start..start + self.num_keys)
    }

    /// Count of note-on cells.
    pub fn active_count(&self) -> usize {
        self.states.iter().filter(|&&on| on).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_dimensions() {
        let roll = PianoRoll::empty(16, PIANO_KEY_COUNT);
        assert_eq!(roll.num_timesteps(), 16);
        assert_eq!(roll.num_keys(), 88);
        assert_eq!(roll.active_count(), 0);
    }

    #[test]
    fn test_set_and_get() {
        let mut roll = PianoRoll::empty(4, 12);
        roll.set(2, 5, true);
        assert_eq!(roll.get(2, 5), Some(true));
        assert_eq!(roll.get(2, 4), Some(false));
        assert_eq!(roll.get(4, 0), None);
        assert_eq!(roll.get(0, 12), None);
    }

    #[test]
    fn test_out_of_bounds_set_is_ignored() {
        let mut roll = PianoRoll::empty(2, 3);
        roll.set(0, 3, true);
        roll.set(5, 0, true);
        assert_eq!(roll.active_count(), 0);
    }

    #[test]
    fn test_flat_array_is_row_major() {
        let mut roll = PianoRoll::empty(2, 3);
        roll.set(1, 0, true);
        assert_eq!(
            roll.to_flat_array(),
            vec![false, false, false, true, false, false]
        );
        assert_eq!(roll.row(1), Some(&[true, false, false][..]));
    }

    #[test]
    fn test_from_flat_array_rejects_partial_rows() {
        let err = PianoRoll::from_flat_array(vec![true; 7], 3).unwrap_err();
        assert_eq!(
            err,
            TransformError::LengthNotMultiple {
                length: 7,
                keys_per_timestep: 3
            }
        );
        assert!(PianoRoll::from_flat_array(vec![], 0).is_err());
    }
}
