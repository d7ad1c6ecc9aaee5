//! A fixed-capacity circular buffer engine with durable persistence.
//!
//! [`RingBuffer`] stores a bounded, ordered sequence of elements and
//! overwrites the oldest element once every slot is occupied. Coincident
//! read and write cursors are disambiguated with parity bits rather than an
//! element counter, so no slot is wasted on bookkeeping. Two persistence
//! encodings are provided with different fidelity guarantees: a bit-exact
//! full-state snapshot ([`RingBuffer::save`] / [`RingBuffer::load`]) that
//! restores the physical cursor positions verbatim, and a [`ReplayLog`]
//! that rebuilds logical content only. [`BufferStore`] maps names to
//! buffers and exposes the host-facing operation set on top of the engine.
//!
//! ```rust
//! use ringstore::RingBuffer;
//!
//! let mut ring = RingBuffer::new(4)?;
//! for n in 1..=6u64 {
//!     ring.write(n);
//! }
//! // 1 and 2 were evicted to make room for 5 and 6.
//! assert_eq!(ring.front()?, &3);
//! assert_eq!(ring.back()?, &6);
//! assert_eq!(ring.len(), 4);
//! # Ok::<(), ringstore::RingError>(())
//! ```

#![no_std]
extern crate alloc;

#[cfg(test)]
extern crate std;

mod cursor;
mod element;
mod error;
mod replay;
mod ring;
mod snapshot;
mod store;
mod wire;

#[cfg(test)]
mod tests;

pub use element::{ByteString, Element};
pub use error::{CodecError, RingError, StoreError};
pub use replay::{ReplayLog, ReplayOp};
pub use ring::{Iter, RingBuffer};
pub use snapshot::SNAPSHOT_VERSION;
pub use store::{BufferStore, DUMP_VERSION, StoreOp};
