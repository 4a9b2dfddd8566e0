//! Random extraction of whole-timestep segments.

use std::sync::Arc;

use log::debug;
use rand::Rng;

use super::NoteSequence;
use crate::error::{NoteSequenceError, SequenceResult};
use crate::transform::SequenceTransformer;

impl<T: SequenceTransformer> NoteSequence<T> {
    /// A segment of `num_timesteps` timesteps starting at a uniformly random
    /// timestep, drawn from the thread-local RNG.
    pub fn random_segment(&self, num_timesteps: usize) -> SequenceResult<Self> {
        self.random_segment_with_rng(num_timesteps, &mut rand::thread_rng())
    }

    /// Like [`NoteSequence::random_segment`], drawing the start from `rng`.
    ///
    /// The segment owns a copy of the selected notes and shares this
    /// sequence's transformer. Requesting every timestep returns the whole
    /// sequence.
    pub fn random_segment_with_rng<R: Rng>(
        &self,
        num_timesteps: usize,
        rng: &mut R,
    ) -> SequenceResult<Self> {
        let available = self.length_in_timesteps();
        if num_timesteps > available {
            return Err(NoteSequenceError::SegmentTooLong {
                requested: num_timesteps,
                available,
            });
        }

        let keys_per_timestep = self.transformer.keys_per_timestep();
        let max_start = available - num_timesteps;
        let start = rng.gen_range(0..=max_start);

        let start_note = start * keys_per_timestep;
        let end_note = start_note + num_timesteps * keys_per_timestep;
        debug!(
            "segment of {} timesteps starting at timestep {} (notes {}..{})",
            num_timesteps, start, start_note, end_note
        );

        Self::from_flat_sequence(
            Arc::clone(&self.transformer),
            &self.notes[start_note..end_note],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::CropDownsampleTransformer;
    use pretty_assertions::assert_eq;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    const KEYS: usize = 4;

    fn sequence(timesteps: usize) -> NoteSequence<CropDownsampleTransformer> {
        let transformer =
            Arc::new(CropDownsampleTransformer::with_key_count(KEYS, 0, KEYS, 1).unwrap());
        let notes: Vec<bool> = (0..timesteps * KEYS).map(|i| (i * 7) % 5 < 2).collect();
        NoteSequence::from_flat_sequence(transformer, &notes).unwrap()
    }

    #[test]
    fn test_segment_length_for_every_valid_size() {
        let source = sequence(12);
        let mut rng = Pcg32::seed_from_u64(7);
        for n in 0..=12 {
            let segment = source.random_segment_with_rng(n, &mut rng).unwrap();
            assert_eq!(segment.length_in_notes(), n * KEYS);
            assert_eq!(segment.length_in_timesteps(), n);
        }
    }

    #[test]
    fn test_full_length_segment_equals_source() {
        let source = sequence(9);
        let segment = source.random_segment(9).unwrap();
        assert_eq!(segment.notes(), source.notes());
        assert_eq!(segment.content_hash(), source.content_hash());
    }

    #[test]
    fn test_segment_too_long() {
        let source = sequence(3);
        let err = source.random_segment(4).unwrap_err();
        assert!(matches!(
            err,
            NoteSequenceError::SegmentTooLong {
                requested: 4,
                available: 3
            }
        ));
    }

    #[test]
    fn test_segment_is_aligned_window_of_source() {
        let source = sequence(20);
        let mut rng = Pcg32::seed_from_u64(42);
        for _ in 0..50 {
            let segment = source.random_segment_with_rng(5, &mut rng).unwrap();
            let found = source
                .notes()
                .chunks_exact(KEYS)
                .collect::<Vec<_>>()
                .windows(5)
                .any(|window| window.concat() == segment.notes());
            assert!(found, "segment is not a timestep-aligned window");
        }
    }

    #[test]
    fn test_segment_is_deterministic_for_seed() {
        let source = sequence(30);
        let a = source
            .random_segment_with_rng(6, &mut Pcg32::seed_from_u64(3))
            .unwrap();
        let b = source
            .random_segment_with_rng(6, &mut Pcg32::seed_from_u64(3))
            .unwrap();
        assert_eq!(a.notes(), b.notes());
    }

    #[test]
    fn test_segment_shares_transformer() {
        let source = sequence(5);
        let segment = source.random_segment(2).unwrap();
        assert!(Arc::ptr_eq(segment.transformer(), source.transformer()));
    }
}
