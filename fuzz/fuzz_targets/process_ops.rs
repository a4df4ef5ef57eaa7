#![no_main]

// ────────────────────────────────────────────────────────────
// Harness: process_ops
// Checks strict monotonicity over arbitrary operation sequences,
// including clocks near u64::MAX.
// ────────────────────────────────────────────────────────────

use libfuzzer_sys::fuzz_target;
use arbitrary::Arbitrary;

use lamport_clock::{NoopRecorder, Process, ProcessId, Timestamp};

#[derive(Arbitrary, Debug, Clone)]
enum Op {
    Local,
    Send,
    Receive(u64),
}

fuzz_target!(|ops: Vec<Op>| {
    let peer = ProcessId::from("peer");
    let mut process = Process::with_recorder("P", NoopRecorder);

    for op in &ops {
        let before = process.clock();
        let result = match op {
            Op::Local => process.local_event("fuzz"),
            Op::Send => process.send(&peer),
            Op::Receive(ts) => process.receive(&peer, Timestamp::new(*ts)),
        };
        match result {
            Ok(after) => {
                assert!(after > before);
                assert_eq!(after, process.clock());
            }
            Err(_) => assert_eq!(process.clock(), before),
        }
    }
});
