//! Named-buffer store: the host-facing boundary over the engine.
//!
//! The store is an explicit registry object constructed by the caller;
//! the crate holds no global state. Name resolution failures are errors,
//! while the documented "buffer is empty" outcomes of `read`, `front`,
//! `back`, and `read_all` are `None` results.

use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use crate::element::ByteString;
use crate::error::{CodecError, RingError, StoreError};
use crate::ring::RingBuffer;
use crate::wire::{self, Reader};

/// Version tag written at the head of every store dump.
pub const DUMP_VERSION: u8 = 1;

/// Type tag marking a ring buffer entry inside a dump.
const RING_BUFFER_TAG: u8 = 0x72;

/// One host-level rewrite directive.
///
/// A store rewrite is the per-buffer replay log lifted to named buffers:
/// replaying the directives into an empty store reproduces every buffer's
/// logical content.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StoreOp {
    /// Bind a fresh empty buffer to a name.
    Create {
        /// Buffer name.
        name: ByteString,
        /// Slot count.
        capacity: usize,
    },
    /// Append one element to the named buffer.
    Write {
        /// Buffer name.
        name: ByteString,
        /// The payload to append.
        element: ByteString,
    },
}

/// A registry of named ring buffers holding [`ByteString`] payloads.
///
/// ```rust
/// use ringstore::{BufferStore, ByteString};
///
/// let mut store = BufferStore::new();
/// store.create("jobs", 2)?;
/// store.write("jobs", [ByteString::from("a"), ByteString::from("b")])?;
/// assert_eq!(store.read("jobs")?, Some(ByteString::from("a")));
/// # Ok::<(), ringstore::StoreError>(())
/// ```
#[derive(Debug, Default, PartialEq)]
pub struct BufferStore {
    buffers: BTreeMap<ByteString, RingBuffer<ByteString>>,
}

impl BufferStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn buffer(&self, name: &[u8]) -> Result<&RingBuffer<ByteString>, StoreError> {
        self.buffers
            .get(name)
            .ok_or_else(|| StoreError::NotFound(name.into()))
    }

    fn buffer_mut(&mut self, name: &[u8]) -> Result<&mut RingBuffer<ByteString>, StoreError> {
        self.buffers
            .get_mut(name)
            .ok_or_else(|| StoreError::NotFound(name.into()))
    }

    /// Binds a fresh empty buffer of `capacity` slots to `name`.
    ///
    /// # Errors
    ///
    /// Fails with [`StoreError::AlreadyExists`] when the name is bound,
    /// or [`RingError::ZeroCapacity`] for a zero capacity; the store is
    /// unchanged on error.
    pub fn create(&mut self, name: impl AsRef<[u8]>, capacity: usize) -> Result<(), StoreError> {
        let name = name.as_ref();
        if self.buffers.contains_key(name) {
            return Err(StoreError::AlreadyExists(name.into()));
        }
        let buffer = RingBuffer::new(capacity)?;
        self.buffers.insert(name.into(), buffer);
        Ok(())
    }

    /// Appends elements in argument order, evicting the oldest on
    /// overflow.
    ///
    /// # Errors
    ///
    /// Fails with [`StoreError::NotFound`] for an unbound name.
    pub fn write<I>(&mut self, name: impl AsRef<[u8]>, elements: I) -> Result<(), StoreError>
    where
        I: IntoIterator<Item = ByteString>,
    {
        let buffer = self.buffer_mut(name.as_ref())?;
        for element in elements {
            buffer.write(element);
        }
        Ok(())
    }

    /// Removes and returns the oldest element, or `None` when the buffer
    /// is empty.
    ///
    /// # Errors
    ///
    /// Fails with [`StoreError::NotFound`] for an unbound name.
    pub fn read(&mut self, name: impl AsRef<[u8]>) -> Result<Option<ByteString>, StoreError> {
        let buffer = self.buffer_mut(name.as_ref())?;
        match buffer.read() {
            Ok(element) => Ok(Some(element)),
            Err(RingError::Empty) => Ok(None),
            Err(other) => Err(other.into()),
        }
    }

    /// Borrows the oldest element, or `None` when the buffer is empty.
    ///
    /// # Errors
    ///
    /// Fails with [`StoreError::NotFound`] for an unbound name.
    pub fn front(&self, name: impl AsRef<[u8]>) -> Result<Option<&ByteString>, StoreError> {
        Ok(self.buffer(name.as_ref())?.front().ok())
    }

    /// Borrows the newest element, or `None` when the buffer is empty.
    ///
    /// # Errors
    ///
    /// Fails with [`StoreError::NotFound`] for an unbound name.
    pub fn back(&self, name: impl AsRef<[u8]>) -> Result<Option<&ByteString>, StoreError> {
        Ok(self.buffer(name.as_ref())?.back().ok())
    }

    /// Clones the full logical sequence oldest to newest without
    /// disturbing the buffer, or `None` when it is empty.
    ///
    /// # Errors
    ///
    /// Fails with [`StoreError::NotFound`] for an unbound name.
    pub fn read_all(&self, name: impl AsRef<[u8]>) -> Result<Option<Vec<ByteString>>, StoreError> {
        let buffer = self.buffer(name.as_ref())?;
        if buffer.is_empty() {
            return Ok(None);
        }
        Ok(Some(buffer.to_vec()))
    }

    /// Number of elements the named buffer currently holds.
    ///
    /// # Errors
    ///
    /// Fails with [`StoreError::NotFound`] for an unbound name.
    pub fn length(&self, name: impl AsRef<[u8]>) -> Result<usize, StoreError> {
        Ok(self.buffer(name.as_ref())?.len())
    }

    /// Capacity the named buffer was created with.
    ///
    /// # Errors
    ///
    /// Fails with [`StoreError::NotFound`] for an unbound name.
    pub fn size(&self, name: impl AsRef<[u8]>) -> Result<usize, StoreError> {
        Ok(self.buffer(name.as_ref())?.capacity())
    }

    /// True when the named buffer's next write will evict.
    ///
    /// # Errors
    ///
    /// Fails with [`StoreError::NotFound`] for an unbound name.
    pub fn is_full(&self, name: impl AsRef<[u8]>) -> Result<bool, StoreError> {
        Ok(self.buffer(name.as_ref())?.is_full())
    }

    /// True when the named buffer holds no elements.
    ///
    /// # Errors
    ///
    /// Fails with [`StoreError::NotFound`] for an unbound name.
    pub fn is_empty(&self, name: impl AsRef<[u8]>) -> Result<bool, StoreError> {
        Ok(self.buffer(name.as_ref())?.is_empty())
    }

    /// Empties the named buffer, releasing every stored payload.
    ///
    /// # Errors
    ///
    /// Fails with [`StoreError::NotFound`] for an unbound name.
    pub fn clear(&mut self, name: impl AsRef<[u8]>) -> Result<(), StoreError> {
        self.buffer_mut(name.as_ref())?.clear();
        Ok(())
    }

    /// Approximate resident size of the named buffer in bytes.
    ///
    /// # Errors
    ///
    /// Fails with [`StoreError::NotFound`] for an unbound name.
    pub fn memory_usage(&self, name: impl AsRef<[u8]>) -> Result<usize, StoreError> {
        Ok(self.buffer(name.as_ref())?.memory_usage())
    }

    /// Encodes every buffer as a durable, bit-exact dump.
    ///
    /// Layout: version tag, entry count, then per entry the name, the
    /// ring buffer type tag, and a full-state snapshot.
    #[must_use]
    pub fn dump(&self) -> Vec<u8> {
        let mut out = Vec::new();
        wire::put_u8(&mut out, DUMP_VERSION);
        wire::put_len(&mut out, self.buffers.len());
        for (name, buffer) in &self.buffers {
            wire::put_bytes(&mut out, name.as_bytes());
            wire::put_u8(&mut out, RING_BUFFER_TAG);
            buffer.save_into(&mut out);
        }
        out
    }

    /// Decodes a dump into a fresh store.
    ///
    /// # Errors
    ///
    /// Fails with [`CodecError::UnsupportedVersion`] for an unrecognized
    /// dump version, [`StoreError::WrongType`] for an entry whose type
    /// tag is not the ring buffer type, or any [`CodecError`] raised
    /// while decoding an entry's snapshot.
    pub fn restore(input: &[u8]) -> Result<Self, StoreError> {
        let mut reader = Reader::new(input);
        let version = reader.take_u8()?;
        if version != DUMP_VERSION {
            return Err(CodecError::UnsupportedVersion(version).into());
        }
        let count = reader.take_len()?;
        let mut buffers = BTreeMap::new();
        for _ in 0..count {
            let name = ByteString::from(reader.take_bytes()?);
            let tag = reader.take_u8()?;
            if tag != RING_BUFFER_TAG {
                return Err(StoreError::WrongType { name, tag });
            }
            let buffer = RingBuffer::load_from(&mut reader)?;
            buffers.insert(name, buffer);
        }
        reader.finish()?;
        Ok(Self { buffers })
    }

    /// Captures the rewrite directives for every buffer: a create
    /// followed by the valid elements, oldest first, per name.
    #[must_use]
    pub fn rewrite(&self) -> Vec<StoreOp> {
        let mut ops = Vec::new();
        for (name, buffer) in &self.buffers {
            ops.push(StoreOp::Create {
                name: name.clone(),
                capacity: buffer.capacity(),
            });
            for element in buffer {
                ops.push(StoreOp::Write {
                    name: name.clone(),
                    element: element.clone(),
                });
            }
        }
        ops
    }

    /// Applies one rewrite directive.
    ///
    /// # Errors
    ///
    /// Propagates the corresponding [`create`](BufferStore::create) or
    /// [`write`](BufferStore::write) failure.
    pub fn apply(&mut self, op: StoreOp) -> Result<(), StoreError> {
        match op {
            StoreOp::Create { name, capacity } => self.create(&name, capacity),
            StoreOp::Write { name, element } => self.write(&name, [element]),
        }
    }

    /// Rebuilds a store by replaying rewrite directives in order.
    ///
    /// # Errors
    ///
    /// Propagates the first [`apply`](BufferStore::apply) failure.
    pub fn replay<I>(ops: I) -> Result<Self, StoreError>
    where
        I: IntoIterator<Item = StoreOp>,
    {
        let mut store = Self::new();
        for op in ops {
            store.apply(op)?;
        }
        Ok(store)
    }
}
