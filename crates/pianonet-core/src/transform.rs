//! Conversion between pianorolls and flat note sequences.
//!
//! A [`SequenceTransformer`] owns the cropping and downsampling policy that
//! decides which part of a pianoroll survives flattening. [`crate::NoteSequence`]
//! only ever talks to the trait; [`CropDownsampleTransformer`] is the stock
//! implementation over [`PianoRoll`].

use serde::{Deserialize, Serialize};

use crate::error::TransformError;
use crate::pianoroll::{PianoRoll, PIANO_KEY_COUNT};

/// Capability that maps a pianoroll to a flat boolean sequence and back.
pub trait SequenceTransformer {
    /// Pianoroll representation this transformer reads and produces.
    type Pianoroll;

    /// Number of consecutive entries in the flat sequence that make up one timestep.
    /// Must be non-zero.
    fn keys_per_timestep(&self) -> usize;

    /// Crop, downsample, and flatten a pianoroll.
    fn flatten(&self, pianoroll: &Self::Pianoroll) -> Result<Vec<bool>, TransformError>;

    /// Rebuild a pianoroll from a flat sequence, as faithfully as the cropping allows.
    fn unflatten(&self, notes: &[bool]) -> Result<Self::Pianoroll, TransformError>;

    /// Check that a flat sequence already matches this transformer's layout.
    fn validate(&self, notes: &[bool]) -> Result<(), TransformError>;
}

/// Raw transformer parameters as stored on disk, checked on conversion.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CropDownsampleParams {
    full_key_count: usize,
    min_key: usize,
    num_keys: usize,
    downsample_factor: usize,
}

/// Crops a key range out of each timestep and keeps every n-th timestep.
///
/// ```text
/// timestep 0                 timestep 1
/// k0 k1 k2 ... k(num_keys-1) k0 k1 k2 ...
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CropDownsampleParams", into = "CropDownsampleParams")]
pub struct CropDownsampleTransformer {
    full_key_count: usize,
    min_key: usize,
    num_keys: usize,
    downsample_factor: usize,
}

impl CropDownsampleTransformer {
    /// Create a transformer for an 88-key pianoroll.
    pub fn new(
        min_key: usize,
        num_keys: usize,
        downsample_factor: usize,
    ) -> Result<Self, TransformError> {
        Self::with_key_count(PIANO_KEY_COUNT, min_key, num_keys, downsample_factor)
    }

    /// Create a transformer for a pianoroll of `full_key_count` keys.
    pub fn with_key_count(
        full_key_count: usize,
        min_key: usize,
        num_keys: usize,
        downsample_factor: usize,
    ) -> Result<Self, TransformError> {
        if num_keys == 0 {
            return Err(TransformError::invalid_param(
                "num_keys",
                "must keep at least one key",
            ));
        }
        if downsample_factor == 0 {
            return Err(TransformError::invalid_param(
                "downsample_factor",
                "must be at least 1",
            ));
        }
        let max_key = min_key.checked_add(num_keys).ok_or_else(|| {
            TransformError::invalid_param("num_keys", "key range overflows")
        })?;
        if max_key > full_key_count {
            return Err(TransformError::invalid_param(
                "num_keys",
                format!(
                    "keys {}..{} exceed the {}-key pianoroll",
                    min_key, max_key, full_key_count
                ),
            ));
        }

        Ok(Self {
            full_key_count,
            min_key,
            num_keys,
            downsample_factor,
        })
    }

    /// Keep the full keyboard at full time resolution.
    pub fn identity(full_key_count: usize) -> Result<Self, TransformError> {
        Self::with_key_count(full_key_count, 0, full_key_count, 1)
    }

    /// Width of the pianorolls this transformer reads.
    pub fn full_key_count(&self) -> usize {
        self.full_key_count
    }

    /// Lowest key kept by cropping.
    pub fn min_key(&self) -> usize {
        self.min_key
    }

    /// Number of kept keys.
    pub fn num_keys(&self) -> usize {
        self.num_keys
    }

    /// Every `downsample_factor`-th timestep is kept.
    pub fn downsample_factor(&self) -> usize {
        self.downsample_factor
    }
}

impl TryFrom<CropDownsampleParams> for CropDownsampleTransformer {
    type Error = TransformError;

    fn try_from(params: CropDownsampleParams) -> Result<Self, Self::Error> {
        Self::with_key_count(
            params.full_key_count,
            params.min_key,
            params.num_keys,
            params.downsample_factor,
        )
    }
}

impl From<CropDownsampleTransformer> for CropDownsampleParams {
    fn from(transformer: CropDownsampleTransformer) -> Self {
        Self {
            full_key_count: transformer.full_key_count,
            min_key: transformer.min_key,
            num_keys: transformer.num_keys,
            downsample_factor: transformer.downsample_factor,
        }
    }
}

impl SequenceTransformer for CropDownsampleTransformer {
    type Pianoroll = PianoRoll;

    fn keys_per_timestep(&self) -> usize {
        self.num_keys
    }

    fn flatten(&self, pianoroll: &PianoRoll) -> Result<Vec<bool>, TransformError> {
        if pianoroll.num_keys() != self.full_key_count {
            return Err(TransformError::KeyCountMismatch {
                expected: self.full_key_count,
                found: pianoroll.num_keys(),
            });
        }

        let kept_keys = self.min_key..self.min_key + self.num_keys;
        let kept_timesteps = (0..pianoroll.num_timesteps()).step_by(self.downsample_factor);

        let mut notes = Vec::with_capacity(kept_timesteps.len() * self.num_keys);
        for timestep in kept_timesteps {
            if let Some(row) = pianoroll.row(timestep) {
                notes.extend_from_slice(&row[kept_keys.clone()]);
            }
        }
        Ok(notes)
    }

    fn unflatten(&self, notes: &[bool]) -> Result<PianoRoll, TransformError> {
        self.validate(notes)?;

        let num_timesteps = notes.len() / self.num_keys * self.downsample_factor;
        let mut pianoroll = PianoRoll::empty(num_timesteps, self.full_key_count);

        for (step, keys) in notes.chunks_exact(self.num_keys).enumerate() {
            // Each kept timestep stands in for the ones dropped after it.
            for repeat in 0..self.downsample_factor {
                let timestep = step * self.downsample_factor + repeat;
                for (offset, &on) in keys.iter().enumerate() {
                    if on {
                        pianoroll.set(timestep, self.min_key + offset, true);
                    }
                }
            }
        }
        Ok(pianoroll)
    }

    fn validate(&self, notes: &[bool]) -> Result<(), TransformError> {
        if notes.len() % self.num_keys != 0 {
            return Err(TransformError::LengthNotMultiple {
                length: notes.len(),
                keys_per_timestep: self.num_keys,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn small_roll() -> PianoRoll {
        // 4 timesteps x 6 keys, one note per timestep walking upward.
        let mut roll = PianoRoll::empty(4, 6);
        for t in 0..4 {
            roll.set(t, t + 1, true);
        }
        roll
    }

    #[test]
    fn test_new_rejects_bad_parameters() {
        assert!(CropDownsampleTransformer::new(0, 0, 1).is_err());
        assert!(CropDownsampleTransformer::new(0, 10, 0).is_err());
        assert!(CropDownsampleTransformer::new(80, 10, 1).is_err());
        assert!(CropDownsampleTransformer::new(usize::MAX, 2, 1).is_err());
        assert!(CropDownsampleTransformer::new(20, 48, 2).is_ok());
    }

    #[test]
    fn test_identity_flatten_matches_flat_array() {
        let roll = small_roll();
        let transformer = CropDownsampleTransformer::identity(6).unwrap();
        assert_eq!(transformer.flatten(&roll).unwrap(), roll.to_flat_array());
        assert_eq!(transformer.keys_per_timestep(), 6);
    }

    #[test]
    fn test_flatten_crops_and_downsamples() {
        let roll = small_roll();
        let transformer = CropDownsampleTransformer::with_key_count(6, 1, 3, 2).unwrap();
        let notes = transformer.flatten(&roll).unwrap();

        // Timesteps 0 and 2, keys 1..4.
        assert_eq!(notes, vec![true, false, false, false, false, true]);
    }

    #[test]
    fn test_flatten_rejects_wrong_width() {
        let transformer = CropDownsampleTransformer::new(0, 12, 1).unwrap();
        let err = transformer.flatten(&small_roll()).unwrap_err();
        assert_eq!(
            err,
            TransformError::KeyCountMismatch {
                expected: 88,
                found: 6
            }
        );
    }

    #[test]
    fn test_unflatten_repeats_downsampled_timesteps() {
        let transformer = CropDownsampleTransformer::with_key_count(6, 1, 3, 2).unwrap();
        let roll = transformer
            .unflatten(&[true, false, false, false, false, true])
            .unwrap();

        assert_eq!(roll.num_timesteps(), 4);
        assert_eq!(roll.num_keys(), 6);
        assert_eq!(roll.get(0, 1), Some(true));
        assert_eq!(roll.get(1, 1), Some(true));
        assert_eq!(roll.get(2, 3), Some(true));
        assert_eq!(roll.get(3, 3), Some(true));
        assert_eq!(roll.active_count(), 4);
    }

    #[test]
    fn test_round_trip_within_declared_loss() {
        let transformer = CropDownsampleTransformer::with_key_count(6, 1, 3, 2).unwrap();
        let notes = transformer.flatten(&small_roll()).unwrap();
        let rebuilt = transformer.unflatten(&notes).unwrap();
        assert_eq!(transformer.flatten(&rebuilt).unwrap(), notes);
    }

    #[test]
    fn test_validate_requires_whole_timesteps() {
        let transformer = CropDownsampleTransformer::new(0, 4, 1).unwrap();
        assert!(transformer.validate(&[false; 8]).is_ok());
        assert!(transformer.validate(&[]).is_ok());
        assert_eq!(
            transformer.validate(&[false; 6]).unwrap_err(),
            TransformError::LengthNotMultiple {
                length: 6,
                keys_per_timestep: 4
            }
        );
    }

    #[test]
    fn test_serde_round_trip_and_checks() {
        let transformer = CropDownsampleTransformer::new(21, 48, 4).unwrap();
        let json = serde_json::to_string(&transformer).unwrap();
        let restored: CropDownsampleTransformer = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, transformer);

        let bad = r#"{"full_key_count":88,"min_key":80,"num_keys":20,"downsample_factor":1}"#;
        assert!(serde_json::from_str::<CropDownsampleTransformer>(bad).is_err());
    }
}
