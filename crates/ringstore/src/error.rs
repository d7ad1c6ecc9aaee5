//! Error types, layered engine → codec → store.

use thiserror::Error;

use crate::element::ByteString;

/// Errors from ring buffer operations.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RingError {
    /// `read`, `front`, or `back` was called on a buffer holding no
    /// elements.
    #[error("buffer is empty")]
    Empty,
    /// A buffer cannot be created with zero slots.
    #[error("capacity must be a positive integer")]
    ZeroCapacity,
}

/// Errors from decoding a snapshot or replay log.
///
/// Decoding never guesses: any deviation from the documented layout
/// aborts the load with the variant that names the deviation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// The input carries a version tag this build does not understand.
    #[error("unsupported snapshot version {0}")]
    UnsupportedVersion(u8),
    /// The input ended before the encoding was complete.
    #[error("unexpected end of input")]
    UnexpectedEndOfInput,
    /// Bytes remained after the encoding was fully decoded.
    #[error("{0} trailing bytes after a complete decode")]
    TrailingInput(usize),
    /// A restored cursor position does not fit the restored capacity.
    #[error("cursor position {pos} out of range for capacity {capacity}")]
    CursorOutOfRange {
        /// The position found in the input.
        pos: u64,
        /// The capacity the position was checked against.
        capacity: u64,
    },
    /// A parity flag was encoded as something other than 0 or 1.
    #[error("invalid parity byte {0:#04x}")]
    InvalidParity(u8),
    /// An element payload does not decode as the element type.
    #[error("malformed element payload of {0} bytes")]
    InvalidElement(usize),
    /// A replay directive opcode this build does not understand.
    #[error("unknown directive opcode {0:#04x}")]
    UnknownDirective(u8),
    /// A replay log that does not start with exactly one create
    /// directive.
    #[error("replay directive out of order")]
    MisplacedDirective,
    /// The encoded buffer violates an engine invariant.
    #[error(transparent)]
    Ring(#[from] RingError),
}

/// Errors from the named-buffer store boundary.
///
/// Documented "buffer is empty" outcomes are `None` results, not errors;
/// these variants cover name resolution and persistence failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// `create` was called with a name that is already bound.
    #[error("buffer already exists: {0}")]
    AlreadyExists(ByteString),
    /// An operation other than `create` referenced an unbound name.
    #[error("no such buffer: {0}")]
    NotFound(ByteString),
    /// A dump entry carries a type tag other than the ring buffer type.
    #[error("wrong type tag {tag:#04x} for entry {name}")]
    WrongType {
        /// Name of the offending entry.
        name: ByteString,
        /// The tag found in the dump.
        tag: u8,
    },
    /// An engine error surfaced through a store operation.
    #[error(transparent)]
    Ring(#[from] RingError),
    /// A codec error surfaced through restore.
    #[error(transparent)]
    Codec(#[from] CodecError),
}
