//! Bit-exact full-state snapshot encoding.
//!
//! Layout, integers little-endian:
//!
//! ```text
//! version: u8 | capacity: u64
//! start: u64 | start parity: u8 | end: u64 | end parity: u8
//! capacity slot payloads, each length-prefixed, physical order
//! ```
//!
//! Vacant slots encode the zero-length empty-slot marker. On load the
//! valid range is recomputed from the restored cursors: positions inside
//! it decode as present elements, positions outside it reconstruct as
//! vacant regardless of payload. Markers are therefore only meaningful
//! outside the valid range; the codec does not distinguish "never
//! written" from "evicted".

use alloc::vec::Vec;

use crate::cursor::{self, Cursor};
use crate::element::Element;
use crate::error::{CodecError, RingError};
use crate::ring::RingBuffer;
use crate::wire::{self, Reader};

/// Version tag written at the head of every snapshot.
pub const SNAPSHOT_VERSION: u8 = 1;

fn put_cursor(out: &mut Vec<u8>, cursor: Cursor) {
    wire::put_len(out, cursor.pos);
    wire::put_parity(out, cursor.parity);
}

fn take_cursor(reader: &mut Reader<'_>, capacity: usize) -> Result<Cursor, CodecError> {
    let raw = reader.take_u64()?;
    let parity = reader.take_parity()?;
    let out_of_range = CodecError::CursorOutOfRange {
        pos: raw,
        capacity: capacity as u64,
    };
    let pos = usize::try_from(raw).map_err(|_| out_of_range.clone())?;
    if pos >= capacity {
        return Err(out_of_range);
    }
    Ok(Cursor { pos, parity })
}

impl<E: Element> RingBuffer<E> {
    /// Encodes the complete internal state, valid and vacant slots alike.
    ///
    /// Loading the result reproduces a buffer whose subsequent behavior,
    /// including the physical position of future writes, is identical to
    /// this one. The transient snapshot-iterator cursor is not part of
    /// the state and is not saved.
    #[must_use]
    pub fn save(&self) -> Vec<u8> {
        let mut out = Vec::new();
        self.save_into(&mut out);
        out
    }

    /// Appends the snapshot encoding to `out`.
    pub fn save_into(&self, out: &mut Vec<u8>) {
        wire::put_u8(out, SNAPSHOT_VERSION);
        wire::put_len(out, self.capacity());
        put_cursor(out, self.start);
        put_cursor(out, self.end);
        let mut scratch = Vec::new();
        for slot in &self.slots {
            match slot {
                Some(element) => {
                    scratch.clear();
                    element.encode_into(&mut scratch);
                    wire::put_bytes(out, &scratch);
                }
                None => wire::put_bytes(out, &[]),
            }
        }
    }

    /// Decodes a snapshot produced by [`save`](RingBuffer::save).
    ///
    /// # Errors
    ///
    /// [`CodecError::UnsupportedVersion`] for any version tag other than
    /// [`SNAPSHOT_VERSION`]; [`CodecError::UnexpectedEndOfInput`],
    /// [`CodecError::TrailingInput`], [`CodecError::CursorOutOfRange`],
    /// [`CodecError::InvalidParity`], or [`CodecError::Ring`] for input
    /// that deviates from the documented layout.
    pub fn load(input: &[u8]) -> Result<Self, CodecError> {
        let mut reader = Reader::new(input);
        let buffer = Self::load_from(&mut reader)?;
        reader.finish()?;
        Ok(buffer)
    }

    /// Decodes one snapshot from the head of `reader`, leaving any bytes
    /// that follow it unread.
    pub(crate) fn load_from(reader: &mut Reader<'_>) -> Result<Self, CodecError> {
        let version = reader.take_u8()?;
        if version != SNAPSHOT_VERSION {
            return Err(CodecError::UnsupportedVersion(version));
        }
        let capacity = reader.take_len()?;
        if capacity == 0 {
            return Err(RingError::ZeroCapacity.into());
        }
        // Every slot costs at least its length prefix, so a capacity the
        // input cannot cover is truncation; checked before the slab is
        // allocated.
        if capacity > reader.remaining() / 8 {
            return Err(CodecError::UnexpectedEndOfInput);
        }
        let start = take_cursor(reader, capacity)?;
        let end = take_cursor(reader, capacity)?;

        let mut buffer = RingBuffer::new(capacity)?;
        buffer.start = start;
        buffer.end = end;
        for pos in 0..capacity {
            let payload = reader.take_bytes()?;
            if cursor::contains(start, end, pos) {
                buffer.slots[pos] = Some(E::decode(payload)?);
            }
        }
        Ok(buffer)
    }
}
