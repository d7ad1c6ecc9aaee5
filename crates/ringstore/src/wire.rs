//! Little-endian wire primitives shared by the snapshot and replay codecs.
//!
//! Integers are `u64` little-endian, byte strings are length-prefixed,
//! parity flags are a single 0/1 byte.

use alloc::vec::Vec;

use crate::error::CodecError;

pub(crate) fn put_u8(out: &mut Vec<u8>, value: u8) {
    out.push(value);
}

pub(crate) fn put_u64(out: &mut Vec<u8>, value: u64) {
    out.extend_from_slice(&value.to_le_bytes());
}

pub(crate) fn put_len(out: &mut Vec<u8>, value: usize) {
    put_u64(out, value as u64);
}

pub(crate) fn put_parity(out: &mut Vec<u8>, parity: bool) {
    put_u8(out, u8::from(parity));
}

pub(crate) fn put_bytes(out: &mut Vec<u8>, bytes: &[u8]) {
    put_len(out, bytes.len());
    out.extend_from_slice(bytes);
}

/// Forward-only view over an encoded byte stream.
pub(crate) struct Reader<'a> {
    input: &'a [u8],
}

impl<'a> Reader<'a> {
    pub(crate) fn new(input: &'a [u8]) -> Self {
        Self { input }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.input.is_empty()
    }

    pub(crate) fn remaining(&self) -> usize {
        self.input.len()
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], CodecError> {
        if self.input.len() < n {
            return Err(CodecError::UnexpectedEndOfInput);
        }
        let (head, rest) = self.input.split_at(n);
        self.input = rest;
        Ok(head)
    }

    pub(crate) fn take_u8(&mut self) -> Result<u8, CodecError> {
        Ok(self.take(1)?[0])
    }

    pub(crate) fn take_u64(&mut self) -> Result<u64, CodecError> {
        let bytes: [u8; 8] = self
            .take(8)?
            .try_into()
            .map_err(|_| CodecError::UnexpectedEndOfInput)?;
        Ok(u64::from_le_bytes(bytes))
    }

    /// Reads a `u64` that must fit the platform word. Values beyond it
    /// cannot describe a decodable payload, so they surface as truncation.
    pub(crate) fn take_len(&mut self) -> Result<usize, CodecError> {
        usize::try_from(self.take_u64()?).map_err(|_| CodecError::UnexpectedEndOfInput)
    }

    pub(crate) fn take_parity(&mut self) -> Result<bool, CodecError> {
        match self.take_u8()? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(CodecError::InvalidParity(other)),
        }
    }

    /// Reads a length-prefixed byte string.
    pub(crate) fn take_bytes(&mut self) -> Result<&'a [u8], CodecError> {
        let len = self.take_len()?;
        self.take(len)
    }

    /// Succeeds only when every input byte has been consumed.
    pub(crate) fn finish(self) -> Result<(), CodecError> {
        if self.input.is_empty() {
            Ok(())
        } else {
            Err(CodecError::TrailingInput(self.input.len()))
        }
    }
}
