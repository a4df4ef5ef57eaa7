#![no_main]

// ────────────────────────────────────────────────────────────
// Harness: process_receive
// Any raw i64 timestamp either advances the clock past it or is
// rejected with the clock untouched.
// ────────────────────────────────────────────────────────────

use libfuzzer_sys::fuzz_target;
use arbitrary::Arbitrary;

use lamport_clock::{ClockError, NoopRecorder, Process, ProcessId, Timestamp};

#[derive(Arbitrary, Debug, Clone)]
struct ReceiveFrame {
    locals: u8,
    sent: i64,
}

fuzz_target!(|frame: ReceiveFrame| {
    let mut process = Process::with_recorder("P", NoopRecorder);
    for _ in 0..frame.locals {
        let _ = process.local_event("fuzz");
    }
    let before = process.clock();

    match process.receive(&ProcessId::from("Q"), frame.sent) {
        Ok(after) => {
            assert!(after > before);
            assert!(after > Timestamp::new(frame.sent as u64));
        }
        Err(ClockError::InvalidArgument(_)) => {
            assert!(frame.sent < 0);
            assert_eq!(process.clock(), before);
        }
        Err(ClockError::Overflow) => unreachable!("i64 input cannot overflow a u64 clock"),
    }
});
