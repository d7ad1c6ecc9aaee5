//! Element adapters: wire encoding and memory accounting per stored type.

use alloc::vec::Vec;
use core::borrow::Borrow;
use core::fmt;

use bstr::BStr;

use crate::error::CodecError;

/// Adapter between a stored element type and the buffer engine.
///
/// Ownership is handled by the language: dropping a slot releases the
/// element and cloning duplicates it. What remains for the adapter is the
/// persistence encoding and the memory-accounting hook used by
/// [`RingBuffer::memory_usage`](crate::RingBuffer::memory_usage).
pub trait Element: Sized {
    /// Appends this element's wire encoding to `out`.
    ///
    /// The codec layer frames the payload with a length prefix; the
    /// encoding itself carries no framing.
    fn encode_into(&self, out: &mut Vec<u8>);

    /// Decodes an element from the exact payload produced by
    /// [`encode_into`](Element::encode_into).
    ///
    /// # Errors
    ///
    /// Fails with [`CodecError::InvalidElement`] when the payload does not
    /// decode as this element type.
    fn decode(payload: &[u8]) -> Result<Self, CodecError>;

    /// Bytes the element owns outside its slot.
    ///
    /// Inline elements report zero; handle types report the referenced
    /// payload's length.
    fn retained_size(&self) -> usize {
        0
    }
}

/// An owned, binary-safe byte payload.
///
/// This is the store's element type: the slot holds the owning handle
/// while the payload lives on the heap, so the accounting hook reports the
/// payload length. Debug and Display render through [`bstr`], keeping
/// arbitrary bytes printable.
///
/// ```rust
/// use ringstore::ByteString;
///
/// let payload = ByteString::from("stream-7");
/// assert_eq!(payload.len(), 8);
/// assert_eq!(payload.as_bytes(), b"stream-7");
/// ```
#[derive(Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ByteString(Vec<u8>);

impl ByteString {
    /// Borrows the payload bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Payload length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True for a zero-length payload.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Consumes the handle and returns the payload.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }
}

impl From<Vec<u8>> for ByteString {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl From<&[u8]> for ByteString {
    fn from(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }
}

impl From<&str> for ByteString {
    fn from(text: &str) -> Self {
        Self(text.as_bytes().to_vec())
    }
}

impl AsRef<[u8]> for ByteString {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Borrow<[u8]> for ByteString {
    fn borrow(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for ByteString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(BStr::new(&self.0), f)
    }
}

impl fmt::Display for ByteString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(BStr::new(&self.0), f)
    }
}

impl Element for ByteString {
    fn encode_into(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.0);
    }

    fn decode(payload: &[u8]) -> Result<Self, CodecError> {
        Ok(Self(payload.to_vec()))
    }

    fn retained_size(&self) -> usize {
        self.0.len()
    }
}

/// Fixed-width sample element; eight little-endian bytes on the wire.
impl Element for u64 {
    fn encode_into(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.to_le_bytes());
    }

    fn decode(payload: &[u8]) -> Result<Self, CodecError> {
        let bytes: [u8; 8] = payload
            .try_into()
            .map_err(|_| CodecError::InvalidElement(payload.len()))?;
        Ok(u64::from_le_bytes(bytes))
    }
}
