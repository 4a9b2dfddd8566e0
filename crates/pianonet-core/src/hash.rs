//! Content hashing for note data.
//!
//! ```text
//! content_hash = hex(BLAKE3(note_0 || note_1 || ... ))   // one byte per note, 0 or 1
//! ```
//!
//! Only the notes are hashed; the transformer never contributes, so two
//! sequences with equal notes hash equally however they were built.

/// Length of a hex-encoded content hash.
pub const CONTENT_HASH_LEN: usize = 64;

const CHUNK: usize = 4096;

/// Computes the BLAKE3 content hash of a note slice.
///
/// # Returns
/// * A 64-character lowercase hexadecimal string
pub fn note_content_hash(notes: &[bool]) -> String {
    let mut hasher = blake3::Hasher::new();
    let mut buffer = [0u8; CHUNK];
    for chunk in notes.chunks(CHUNK) {
        for (byte, &on) in buffer.iter_mut().zip(chunk) {
            *byte = u8::from(on);
        }
        hasher.update(&buffer[..chunk.len()]);
    }
    hasher.finalize().to_hex().to_string()
}
