#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![deny(deprecated)]

//!
//! Lamport logical clocks for processes exchanging messages.
//!
//! Each [`Process`] owns an integer counter advanced by three rules (local
//! event, send, receive) so that if event A causally precedes event B then
//! `clock(A) < clock(B)`. Observation is a side channel ([`record`]); the clock
//! logic itself never prints. [`SharedProcess`] serialises updates for processes
//! running on their own threads, and [`simulation`] drives scripted exchanges
//! between orchestrator-owned processes.

// Identifiers, timestamps and the message envelope.
pub mod types;

// Error types for clock operations and simulations.
pub mod error;

// Event records and recorder sinks.
pub mod record;

// The clock-owning process and its thread-safe handle.
pub mod process;

// Scenario-driven orchestration of several processes.
pub mod simulation;

pub use error::{ClockError, SimulationError};
pub use process::{Process, SharedProcess};
pub use record::{EventRecord, MemoryRecorder, NoopRecorder, Recorder, TracingRecorder};
pub use simulation::{Scenario, Simulation, Snapshot, Step};
pub use types::{Message, ProcessId, Timestamp};
