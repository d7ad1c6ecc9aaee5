//! Logical-content replay log.
//!
//! A replay log rebuilds a buffer by replaying a create directive and the
//! currently valid elements, oldest first. The result has identical
//! logical content (front, back, length, iteration order) but generally
//! *not* the same physical cursor positions as the buffer the log was
//! captured from; the full-state snapshot exists for bit-exact restores.

use alloc::vec::Vec;

use crate::element::Element;
use crate::error::CodecError;
use crate::ring::RingBuffer;
use crate::wire::{self, Reader};

const OP_CREATE: u8 = 0x01;
const OP_WRITE: u8 = 0x02;

/// A single replay directive.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ReplayOp<E> {
    /// Create an empty buffer.
    Create {
        /// Slot count of the buffer being rebuilt.
        capacity: usize,
    },
    /// Append one element; directives are ordered oldest first.
    Write(E),
}

/// An ordered sequence of replay directives for one buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReplayLog<E> {
    ops: Vec<ReplayOp<E>>,
}

impl<E> ReplayLog<E> {
    /// Captures the directives that rebuild `buffer`'s logical contents.
    #[must_use]
    pub fn rewrite(buffer: &RingBuffer<E>) -> Self
    where
        E: Clone,
    {
        let mut ops = Vec::with_capacity(buffer.len() + 1);
        ops.push(ReplayOp::Create {
            capacity: buffer.capacity(),
        });
        ops.extend(buffer.iter().cloned().map(ReplayOp::Write));
        Self { ops }
    }

    /// The directives in replay order.
    #[must_use]
    pub fn ops(&self) -> &[ReplayOp<E>] {
        &self.ops
    }

    /// Replays the directives into a fresh buffer.
    ///
    /// # Errors
    ///
    /// Fails with [`CodecError::MisplacedDirective`] unless exactly one
    /// create directive leads the log, and with [`CodecError::Ring`] when
    /// that directive asks for zero capacity.
    pub fn replay(&self) -> Result<RingBuffer<E>, CodecError>
    where
        E: Clone,
    {
        let mut ops = self.ops.iter();
        let Some(ReplayOp::Create { capacity }) = ops.next() else {
            return Err(CodecError::MisplacedDirective);
        };
        let mut buffer = RingBuffer::new(*capacity)?;
        for op in ops {
            match op {
                ReplayOp::Write(element) => buffer.write(element.clone()),
                ReplayOp::Create { .. } => return Err(CodecError::MisplacedDirective),
            }
        }
        Ok(buffer)
    }
}

impl<E: Element> ReplayLog<E> {
    /// Encodes the log, one tagged directive after another.
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::new();
        let mut scratch = Vec::new();
        for op in &self.ops {
            match op {
                ReplayOp::Create { capacity } => {
                    wire::put_u8(&mut out, OP_CREATE);
                    wire::put_len(&mut out, *capacity);
                }
                ReplayOp::Write(element) => {
                    scratch.clear();
                    element.encode_into(&mut scratch);
                    wire::put_u8(&mut out, OP_WRITE);
                    wire::put_bytes(&mut out, &scratch);
                }
            }
        }
        out
    }

    /// Decodes a log produced by [`encode`](ReplayLog::encode).
    ///
    /// # Errors
    ///
    /// Fails with [`CodecError::UnknownDirective`] on an unrecognized
    /// opcode, or [`CodecError::UnexpectedEndOfInput`] on truncation.
    /// Directive order is not validated here; [`replay`](ReplayLog::replay)
    /// enforces it.
    pub fn decode(input: &[u8]) -> Result<Self, CodecError> {
        let mut reader = Reader::new(input);
        let mut ops = Vec::new();
        while !reader.is_empty() {
            match reader.take_u8()? {
                OP_CREATE => ops.push(ReplayOp::Create {
                    capacity: reader.take_len()?,
                }),
                OP_WRITE => {
                    let payload = reader.take_bytes()?;
                    ops.push(ReplayOp::Write(E::decode(payload)?));
                }
                other => return Err(CodecError::UnknownDirective(other)),
            }
        }
        Ok(Self { ops })
    }
}

impl<E: Clone> RingBuffer<E> {
    /// Captures this buffer's replay log; shorthand for
    /// [`ReplayLog::rewrite`].
    #[must_use]
    pub fn replay_log(&self) -> ReplayLog<E> {
        ReplayLog::rewrite(self)
    }
}
