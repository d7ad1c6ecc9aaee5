#![no_main]

use libfuzzer_sys::fuzz_target;
use ringstore::{BufferStore, ByteString, ReplayLog, RingBuffer};

// Every decoder must reject arbitrary input with a typed error, never a
// panic; accepted input must re-encode to something that decodes again.
fuzz_target!(|data: &[u8]| {
    if let Ok(ring) = RingBuffer::<ByteString>::load(data) {
        let saved = ring.save();
        let reloaded = RingBuffer::<ByteString>::load(&saved).expect("re-save must decode");
        assert_eq!(reloaded.save(), saved);
    }

    if let Ok(log) = ReplayLog::<ByteString>::decode(data) {
        let encoded = log.encode();
        let _ = ReplayLog::<ByteString>::decode(&encoded).expect("re-encode must decode");
        // Replaying allocates the create directive's capacity up front;
        // keep the fuzzer away from multi-gigabyte slabs.
        let modest = matches!(
            log.ops().first(),
            Some(ringstore::ReplayOp::Create { capacity }) if *capacity <= 1 << 20
        );
        if modest {
            let _ = log.replay();
        }
    }

    if let Ok(store) = BufferStore::restore(data) {
        let dumped = store.dump();
        BufferStore::restore(&dumped).expect("re-dump must decode");
    }
});
