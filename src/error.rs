//!
//! Defines error types for Lamport clock processes and the simulations driving them.

use crate::types::ProcessId;

/// Errors raised by a single process's clock operations.
///
/// A failed operation never mutates the clock.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClockError {
    /// A timestamp handed to `receive` is outside the clock's domain (e.g., negative).
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    /// The clock is at `u64::MAX` and cannot advance any further.
    #[error("Lamport clock has reached its maximum value")]
    Overflow,
}

impl From<std::convert::Infallible> for ClockError {
    fn from(never: std::convert::Infallible) -> Self {
        match never {}
    }
}

/// Errors raised while orchestrating several processes through a scenario.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SimulationError {
    /// A step referenced a process the simulation does not own.
    #[error("Unknown process: {0}")]
    UnknownProcess(ProcessId),
    /// Two processes were registered under the same identifier.
    #[error("Process already registered: {0}")]
    DuplicateProcess(ProcessId),
    /// A receive step ran while no message from `from` to `to` was in flight.
    #[error("No message in flight from {from} to {to}")]
    NoMessageInFlight { from: ProcessId, to: ProcessId },
    /// The underlying clock operation failed.
    #[error("Clock operation failed: {0}")]
    Clock(#[from] ClockError),
    /// The scenario document could not be read or parsed.
    #[error("Invalid scenario: {0}")]
    Scenario(String),
}
