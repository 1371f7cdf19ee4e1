//! Fuzz target for the activity tracker
//!
//! Ensure ranking order and single-record-per-buffer (HIGH priority)
//!
//! # Strategy
//!
//! - Registration: register the same buffer repeatedly with stale timestamps
//! - Rename: re-register an id under a new display name
//! - Eviction: evict live and unknown buffers
//!
//! # Invariants
//!
//! - At most one record per buffer id
//! - Ranked order is non-increasing in last activity
//! - Every ranked record matches the latest registration for its buffer
//! - Evicted buffers never appear in the ranking

#![no_main]

use std::collections::HashMap;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use relaychat_core::ActivityTracker;

#[derive(Debug, Clone, Arbitrary)]
enum TrackerOp {
    Register { buffer: u8, name: u8, at: u8 },
    Evict { buffer: u8 },
}

fuzz_target!(|ops: Vec<TrackerOp>| {
    let mut tracker = ActivityTracker::<u8>::new();
    // Model: buffer -> (name, at) of the latest registration
    let mut model: HashMap<u64, (String, u8)> = HashMap::new();

    for op in &ops {
        match *op {
            TrackerOp::Register { buffer, name, at } => {
                let buffer = u64::from(buffer % 8);
                let name = format!("#c{}", name % 4);
                tracker.register_activity(buffer, name.clone(), at);
                model.insert(buffer, (name, at));
            },
            TrackerOp::Evict { buffer } => {
                let buffer = u64::from(buffer % 8);
                let removed = tracker.evict(buffer);
                assert_eq!(removed, model.remove(&buffer).is_some());
            },
        }

        let ranked: Vec<_> = tracker.ranked().collect();
        assert_eq!(ranked.len(), model.len());
        assert_eq!(tracker.len(), model.len());

        for pair in ranked.windows(2) {
            assert!(pair[0].last_activity >= pair[1].last_activity, "ranking out of order");
        }

        for record in &ranked {
            let Some((name, at)) = model.get(&record.buffer_id) else {
                panic!("evicted buffer {} still ranked", record.buffer_id);
            };
            assert_eq!(&record.display_name, name);
            assert_eq!(record.last_activity, *at);
        }
    }
});
