//! End-to-end host session: operate a store, persist it both ways,
//! restart, and keep operating.

use ringstore::{BufferStore, ByteString, ReplayLog, RingBuffer};

fn payload(text: &str) -> ByteString {
    ByteString::from(text)
}

#[test]
fn store_survives_a_dump_restart_cycle() {
    let mut store = BufferStore::new();
    store.create("events", 4).unwrap();
    store
        .write(
            "events",
            ["boot", "listen", "accept", "read", "write", "close"].map(payload),
        )
        .unwrap();
    store.create("metrics", 8).unwrap();
    store.write("metrics", ["42"].map(payload)).unwrap();

    let disk = store.dump();
    drop(store);

    // "Restart": the restored store picks up exactly where the old one
    // stopped, including which slot the next eviction hits.
    let mut store = BufferStore::restore(&disk).unwrap();
    assert_eq!(store.length("events"), Ok(4));
    assert_eq!(store.front("events").unwrap(), Some(&payload("accept")));
    assert_eq!(store.back("events").unwrap(), Some(&payload("close")));

    store.write("events", ["shutdown"].map(payload)).unwrap();
    assert_eq!(
        store.read_all("events").unwrap().unwrap(),
        ["read", "write", "close", "shutdown"].map(payload)
    );
    assert_eq!(store.length("metrics"), Ok(1));
}

#[test]
fn rewrite_log_rebuilds_logical_state() {
    let mut store = BufferStore::new();
    store.create("events", 3).unwrap();
    store
        .write("events", ["a", "b", "c", "d"].map(payload))
        .unwrap();

    let replayed = BufferStore::replay(store.rewrite()).unwrap();
    assert_eq!(
        replayed.read_all("events").unwrap().unwrap(),
        ["b", "c", "d"].map(payload)
    );
    assert_eq!(replayed.is_full("events"), Ok(true));
}

#[test]
fn engine_snapshot_round_trips_through_public_api() {
    let mut ring = RingBuffer::new(4).unwrap();
    for n in 1..=6u64 {
        ring.write(n);
    }

    let restored = RingBuffer::<u64>::load(&ring.save()).unwrap();
    assert_eq!(restored.save(), ring.save());

    let logical: Vec<u64> = restored.iter().copied().collect();
    assert_eq!(logical, vec![3, 4, 5, 6]);

    let replayed = ReplayLog::<u64>::decode(&ring.replay_log().encode())
        .unwrap()
        .replay()
        .unwrap();
    assert_eq!(replayed.to_vec(), logical);
}
