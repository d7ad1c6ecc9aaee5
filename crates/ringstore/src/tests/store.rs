use alloc::vec;

use crate::{BufferStore, ByteString, CodecError, RingError, StoreError, StoreOp};

fn payloads<const N: usize>(values: [&str; N]) -> [ByteString; N] {
    values.map(ByteString::from)
}

fn seeded_store() -> BufferStore {
    let mut store = BufferStore::new();
    store.create("jobs", 4).unwrap();
    store
        .write("jobs", payloads(["1", "2", "3", "4", "5", "6"]))
        .unwrap();
    store.create("audit", 2).unwrap();
    store.write("audit", payloads(["login"])).unwrap();
    store
}

#[test]
fn create_rejects_duplicates_and_zero_capacity() {
    let mut store = BufferStore::new();
    store.create("jobs", 4).unwrap();
    assert_eq!(
        store.create("jobs", 8),
        Err(StoreError::AlreadyExists(ByteString::from("jobs")))
    );
    assert_eq!(
        store.create("broken", 0),
        Err(StoreError::Ring(RingError::ZeroCapacity))
    );
    // The failed creates left the store untouched.
    assert_eq!(store.size("jobs"), Ok(4));
    assert_eq!(
        store.length("broken"),
        Err(StoreError::NotFound(ByteString::from("broken")))
    );
}

#[test]
fn operations_on_unbound_names_fail() {
    let mut store = BufferStore::new();
    let missing = StoreError::NotFound(ByteString::from("missing"));
    assert_eq!(store.read("missing"), Err(missing.clone()));
    assert_eq!(store.write("missing", payloads(["x"])), Err(missing.clone()));
    assert_eq!(store.clear("missing"), Err(missing));
}

#[test]
fn boundary_table_semantics() {
    let mut store = seeded_store();

    // Oldest two of "jobs" were evicted by the overflow writes.
    assert_eq!(store.length("jobs"), Ok(4));
    assert_eq!(store.size("jobs"), Ok(4));
    assert_eq!(store.is_full("jobs"), Ok(true));
    assert_eq!(store.is_empty("jobs"), Ok(false));
    assert_eq!(store.front("jobs").unwrap(), Some(&ByteString::from("3")));
    assert_eq!(store.back("jobs").unwrap(), Some(&ByteString::from("6")));
    assert_eq!(
        store.read_all("jobs").unwrap().unwrap(),
        payloads(["3", "4", "5", "6"])
    );
    // read_all was non-destructive.
    assert_eq!(store.length("jobs"), Ok(4));

    assert_eq!(store.read("jobs").unwrap(), Some(ByteString::from("3")));
    assert_eq!(store.read("jobs").unwrap(), Some(ByteString::from("4")));
    assert_eq!(store.read("jobs").unwrap(), Some(ByteString::from("5")));
    assert_eq!(store.length("jobs"), Ok(1));
    assert_eq!(store.front("jobs").unwrap(), Some(&ByteString::from("6")));
}

#[test]
fn empty_buffers_report_absent_values_not_errors() {
    let mut store = BufferStore::new();
    store.create("empty", 3).unwrap();
    assert_eq!(store.read("empty"), Ok(None));
    assert_eq!(store.front("empty"), Ok(None));
    assert_eq!(store.back("empty"), Ok(None));
    assert_eq!(store.read_all("empty"), Ok(None));
}

#[test]
fn clear_empties_a_buffer() {
    let mut store = seeded_store();
    store.clear("jobs").unwrap();
    assert_eq!(store.is_empty("jobs"), Ok(true));
    assert_eq!(store.is_full("jobs"), Ok(false));
    assert_eq!(store.read_all("jobs"), Ok(None));
    // Capacity survives a clear.
    assert_eq!(store.size("jobs"), Ok(4));
}

#[test]
fn memory_usage_tracks_payload_bytes() {
    let mut store = BufferStore::new();
    store.create("m", 2).unwrap();
    let base = store.memory_usage("m").unwrap();
    store.write("m", payloads(["abcd"])).unwrap();
    assert_eq!(store.memory_usage("m"), Ok(base + 4));
}

#[test]
fn dump_restore_round_trip_is_bit_exact() {
    let store = seeded_store();
    let restored = BufferStore::restore(&store.dump()).unwrap();

    assert_eq!(
        restored.read_all("jobs").unwrap().unwrap(),
        payloads(["3", "4", "5", "6"])
    );
    assert_eq!(
        restored.read_all("audit").unwrap().unwrap(),
        payloads(["login"])
    );
    assert_eq!(restored.dump(), store.dump());

    // Eviction after restore matches eviction after the original,
    // because cursor state came back verbatim.
    let mut original = store;
    let mut restored = restored;
    original.write("jobs", payloads(["7"])).unwrap();
    restored.write("jobs", payloads(["7"])).unwrap();
    assert_eq!(restored.dump(), original.dump());
}

#[test]
fn restore_rejects_unknown_dump_version() {
    let mut bytes = seeded_store().dump();
    bytes[0] = 9;
    assert_eq!(
        BufferStore::restore(&bytes),
        Err(StoreError::Codec(CodecError::UnsupportedVersion(9)))
    );
}

#[test]
fn restore_rejects_wrong_entry_type_tag() {
    let mut store = BufferStore::new();
    store.create("a", 1).unwrap();
    let mut bytes = store.dump();

    // Entry layout: version (1), count (8), name length (8), name (1),
    // then the type tag.
    let tag_offset = 1 + 8 + 8 + 1;
    bytes[tag_offset] = 0x00;
    assert_eq!(
        BufferStore::restore(&bytes),
        Err(StoreError::WrongType {
            name: ByteString::from("a"),
            tag: 0x00,
        })
    );
}

#[test]
fn restore_rejects_truncated_and_trailing_input() {
    let bytes = seeded_store().dump();
    assert_eq!(
        BufferStore::restore(&bytes[..bytes.len() - 1]),
        Err(StoreError::Codec(CodecError::UnexpectedEndOfInput))
    );

    let mut bytes = bytes;
    bytes.push(0);
    assert_eq!(
        BufferStore::restore(&bytes),
        Err(StoreError::Codec(CodecError::TrailingInput(1)))
    );
}

#[test]
fn rewrite_emits_creates_then_writes_per_buffer() {
    let mut store = BufferStore::new();
    store.create("a", 2).unwrap();
    store.write("a", payloads(["x", "y", "z"])).unwrap();

    let ops = store.rewrite();
    assert_eq!(
        ops,
        vec![
            StoreOp::Create {
                name: ByteString::from("a"),
                capacity: 2,
            },
            StoreOp::Write {
                name: ByteString::from("a"),
                element: ByteString::from("y"),
            },
            StoreOp::Write {
                name: ByteString::from("a"),
                element: ByteString::from("z"),
            },
        ]
    );
}

#[test]
fn replaying_a_rewrite_reproduces_logical_content() {
    let store = seeded_store();
    let replayed = BufferStore::replay(store.rewrite()).unwrap();

    for name in ["jobs", "audit"] {
        assert_eq!(replayed.length(name), store.length(name));
        assert_eq!(replayed.size(name), store.size(name));
        assert_eq!(replayed.read_all(name), store.read_all(name));
        assert_eq!(replayed.front(name), store.front(name));
        assert_eq!(replayed.back(name), store.back(name));
    }
}

#[test]
fn apply_propagates_engine_errors() {
    let mut store = BufferStore::new();
    let op = StoreOp::Create {
        name: ByteString::from("z"),
        capacity: 0,
    };
    assert_eq!(store.apply(op), Err(StoreError::Ring(RingError::ZeroCapacity)));

    let op = StoreOp::Write {
        name: ByteString::from("z"),
        element: ByteString::from("v"),
    };
    assert_eq!(
        store.apply(op),
        Err(StoreError::NotFound(ByteString::from("z")))
    );
}
