//! Bit-packed binary container.
//!
//! Layout (all integers little-endian):
//!
//! | Offset | Size | Field                              |
//! |--------|------|------------------------------------|
//! | 0      | 4    | Magic `PNSQ`                       |
//! | 4      | 2    | Format version                     |
//! | 6      | 2    | Flags (reserved, 0)                |
//! | 8      | 4    | Transformer JSON length `n`        |
//! | 12     | n    | Transformer JSON                   |
//! | 12+n   | 8    | Note count `c`                     |
//! | 20+n   | c/8  | Notes, 8 per byte, LSB first       |

use std::io::{Cursor, Read};
use std::path::Path;

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::FORMAT_VERSION;
use crate::error::{NoteSequenceError, SequenceResult};

/// Magic bytes at the start of every binary container.
pub const MAGIC: [u8; 4] = *b"PNSQ";

const HEADER_SIZE: usize = 12;

fn packed_len(note_count: usize) -> usize {
    note_count.div_ceil(8)
}

pub(super) fn encode<T: Serialize>(notes: &[bool], transformer: &T) -> SequenceResult<Vec<u8>> {
    let transformer_json =
        serde_json::to_vec(transformer).map_err(|e| NoteSequenceError::Serialize(e.to_string()))?;
    let transformer_len = u32::try_from(transformer_json.len()).map_err(|_| {
        NoteSequenceError::Serialize("transformer description exceeds 4 GiB".to_string())
    })?;

    let mut buffer =
        Vec::with_capacity(HEADER_SIZE + transformer_json.len() + 8 + packed_len(notes.len()));
    buffer.extend_from_slice(&MAGIC);
    // Writes into a Vec cannot fail.
    let write = |e: std::io::Error| NoteSequenceError::Serialize(e.to_string());
    buffer
        .write_u16::<LittleEndian>(FORMAT_VERSION)
        .map_err(write)?;
    buffer.write_u16::<LittleEndian>(0).map_err(write)?;
    buffer
        .write_u32::<LittleEndian>(transformer_len)
        .map_err(write)?;
    buffer.extend_from_slice(&transformer_json);
    buffer
        .write_u64::<LittleEndian>(notes.len() as u64)
        .map_err(write)?;

    for chunk in notes.chunks(8) {
        let byte = chunk
            .iter()
            .enumerate()
            .fold(0u8, |byte, (bit, &on)| byte | (u8::from(on) << bit));
        buffer.push(byte);
    }

    Ok(buffer)
}

pub(super) fn decode<T: DeserializeOwned>(
    bytes: &[u8],
    path: &Path,
) -> SequenceResult<(Vec<bool>, T)> {
    let truncated = |expected: usize| NoteSequenceError::Truncated {
        path: path.to_path_buf(),
        expected,
        actual: bytes.len(),
    };

    if bytes.len() < HEADER_SIZE {
        let mut found = [0u8; 4];
        let n = bytes.len().min(4);
        found[..n].copy_from_slice(&bytes[..n]);
        if found != MAGIC {
            return Err(NoteSequenceError::InvalidMagic {
                path: path.to_path_buf(),
                found,
            });
        }
        return Err(truncated(HEADER_SIZE));
    }

    let mut cursor = Cursor::new(bytes);
    let mut magic = [0u8; 4];
    cursor
        .read_exact(&mut magic)
        .map_err(|_| truncated(HEADER_SIZE))?;
    if magic != MAGIC {
        return Err(NoteSequenceError::InvalidMagic {
            path: path.to_path_buf(),
            found: magic,
        });
    }

    let version = cursor
        .read_u16::<LittleEndian>()
        .map_err(|_| truncated(HEADER_SIZE))?;
    if version != FORMAT_VERSION {
        return Err(NoteSequenceError::UnsupportedFormatVersion {
            found: version,
            expected: FORMAT_VERSION,
        });
    }
    let _flags = cursor
        .read_u16::<LittleEndian>()
        .map_err(|_| truncated(HEADER_SIZE))?;
    let transformer_len = cursor
        .read_u32::<LittleEndian>()
        .map_err(|_| truncated(HEADER_SIZE))? as usize;

    let notes_header_end = HEADER_SIZE
        .checked_add(transformer_len)
        .and_then(|n| n.checked_add(8))
        .ok_or_else(|| NoteSequenceError::deserialize(path, "transformer length overflows"))?;
    if bytes.len() < notes_header_end {
        return Err(truncated(notes_header_end));
    }

    let transformer_bytes = &bytes[HEADER_SIZE..HEADER_SIZE + transformer_len];
    let transformer: T = serde_json::from_slice(transformer_bytes)
        .map_err(|e| NoteSequenceError::deserialize(path, e))?;

    cursor.set_position((HEADER_SIZE + transformer_len) as u64);
    let note_count = cursor
        .read_u64::<LittleEndian>()
        .map_err(|_| truncated(notes_header_end))?;
    let note_count = usize::try_from(note_count)
        .map_err(|_| NoteSequenceError::deserialize(path, "note count exceeds address space"))?;

    let packed = &bytes[notes_header_end..];
    let expected = packed_len(note_count);
    if packed.len() != expected {
        if packed.len() < expected {
            return Err(NoteSequenceError::Truncated {
                path: path.to_path_buf(),
                expected,
                actual: packed.len(),
            });
        }
        return Err(NoteSequenceError::deserialize(
            path,
            format!(
                "{} trailing bytes after note data",
                packed.len() - expected
            ),
        ));
    }

    let notes = (0..note_count)
        .map(|i| packed[i / 8] & (1 << (i % 8)) != 0)
        .collect();

    Ok((notes, transformer))
}
