//! Observation side channel for clock updates.
//!
//! Clock logic never prints. Every successful operation hands an [`EventRecord`]
//! to the process's [`Recorder`], which may log it, collect it, or drop it.

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use crate::types::{ProcessId, Timestamp};

/// What happened on a process, and the clock value it produced.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EventRecord {
    Local {
        process: ProcessId,
        clock: Timestamp,
        description: String,
    },
    Send {
        process: ProcessId,
        target: ProcessId,
        clock: Timestamp,
    },
    Receive {
        process: ProcessId,
        source: ProcessId,
        /// Clock value before the max-adjustment.
        before: Timestamp,
        /// Timestamp carried by the message.
        received: Timestamp,
        clock: Timestamp,
    },
}

impl EventRecord {
    pub fn process(&self) -> &ProcessId {
        match self {
            EventRecord::Local { process, .. }
            | EventRecord::Send { process, .. }
            | EventRecord::Receive { process, .. } => process,
        }
    }

    /// Clock value after the operation.
    pub fn clock(&self) -> Timestamp {
        match self {
            EventRecord::Local { clock, .. }
            | EventRecord::Send { clock, .. }
            | EventRecord::Receive { clock, .. } => *clock,
        }
    }
}

impl fmt::Display for EventRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventRecord::Local { process, clock, description } => {
                write!(f, "[{} | TS={}]: local event - {}", process, clock, description)
            }
            EventRecord::Send { process, target, clock } => {
                write!(f, "[{} | TS={}]: sends message to {} with TS={}", process, clock, target, clock)
            }
            EventRecord::Receive { process, source, before, received, clock } => {
                writeln!(f, "[{} | TS={}]: receives message from {} (sent TS={}).", process, clock, source, received)?;
                write!(
                    f,
                    "    * adjust: max({}, {}) -> clock updated to {} (after increment)",
                    before, received, clock
                )
            }
        }
    }
}

/// Sink for [`EventRecord`]s. Recording is fire-and-forget and must not fail.
pub trait Recorder: Send + Sync {
    fn record(&self, record: &EventRecord);
}

/// Emits each record as a structured `tracing` event at INFO level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingRecorder;

impl Recorder for TracingRecorder {
    fn record(&self, record: &EventRecord) {
        match record {
            EventRecord::Local { process, clock, description } => {
                tracing::info!(process = %process, clock = clock.value(), description = %description, "local event");
            }
            EventRecord::Send { process, target, clock } => {
                tracing::info!(process = %process, target = %target, clock = clock.value(), "message sent");
            }
            EventRecord::Receive { process, source, before, received, clock } => {
                tracing::info!(
                    process = %process,
                    source = %source,
                    before = before.value(),
                    received = received.value(),
                    clock = clock.value(),
                    "message received"
                );
            }
        }
    }
}

/// Discards every record.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopRecorder;

impl Recorder for NoopRecorder {
    fn record(&self, _record: &EventRecord) {}
}

/// Collects records in memory. Clones share the same buffer, so one recorder
/// can observe several processes in order.
#[derive(Debug, Clone, Default)]
pub struct MemoryRecorder {
    records: Arc<Mutex<Vec<EventRecord>>>,
}

impl MemoryRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything recorded so far.
    pub fn records(&self) -> Vec<EventRecord> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn len(&self) -> usize {
        self.records.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.records.lock().unwrap_or_else(PoisonError::into_inner).clear();
    }

    /// Renders the collected records as newline-delimited JSON.
    pub fn to_json_lines(&self) -> Result<String, serde_json::Error> {
        let mut out = String::new();
        for record in self.records() {
            out.push_str(&serde_json::to_string(&record)?);
            out.push('\n');
        }
        Ok(out)
    }
}

impl Recorder for MemoryRecorder {
    fn record(&self, record: &EventRecord) {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(record.clone());
    }
}

impl<R: Recorder + ?Sized> Recorder for Arc<R> {
    fn record(&self, record: &EventRecord) {
        (**self).record(record)
    }
}
