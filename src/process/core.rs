//!
//! Core Lamport clock logic: one process, one counter, three update rules.
//!
//! * Rule 1: every event (local, send, receive) advances the clock by one.
//! * Rule 2: a send stamps the message with the post-increment clock; a receive
//!   first raises the clock to at least the carried timestamp, then applies Rule 1.

use crate::error::ClockError;
use crate::record::{EventRecord, Recorder, TracingRecorder};
use crate::types::{Message, ProcessId, Timestamp};

/// A process owning a Lamport logical clock.
///
/// The clock starts at zero and only changes through [`local_event`](Self::local_event),
/// [`send`](Self::send) and [`receive`](Self::receive). Each successful call strictly
/// increases it; a failed call leaves it untouched and records nothing.
#[derive(Debug, Clone)]
pub struct Process<R: Recorder = TracingRecorder> {
    id: ProcessId,
    clock: Timestamp,
    recorder: R,
}

impl Process<TracingRecorder> {
    /// Creates a process at clock zero that reports through `tracing`.
    pub fn new(id: impl Into<ProcessId>) -> Self {
        Self::with_recorder(id, TracingRecorder)
    }
}

impl<R: Recorder> Process<R> {
    pub fn with_recorder(id: impl Into<ProcessId>, recorder: R) -> Self {
        Process {
            id: id.into(),
            clock: Timestamp::ZERO,
            recorder,
        }
    }

    /// Creates a process whose clock already reads `clock`.
    #[cfg(any(test, feature = "test-utils"))]
    pub fn starting_at(id: impl Into<ProcessId>, clock: Timestamp, recorder: R) -> Self {
        Process {
            id: id.into(),
            clock,
            recorder,
        }
    }

    pub fn id(&self) -> &ProcessId {
        &self.id
    }

    /// Current clock value. Reading never advances the clock.
    pub fn clock(&self) -> Timestamp {
        self.clock
    }

    pub fn recorder(&self) -> &R {
        &self.recorder
    }

    /// Registers a purely local event (Rule 1) and returns the new clock.
    pub fn local_event(&mut self, description: &str) -> Result<Timestamp, ClockError> {
        let next = self.advance()?;
        self.recorder.record(&EventRecord::Local {
            process: self.id.clone(),
            clock: next,
            description: description.to_string(),
        });
        Ok(next)
    }

    /// Advances the clock for a send to `target` and returns the timestamp the
    /// message must carry. Delivery is the caller's business.
    pub fn send(&mut self, target: &ProcessId) -> Result<Timestamp, ClockError> {
        let sent = self.advance()?;
        self.recorder.record(&EventRecord::Send {
            process: self.id.clone(),
            target: target.clone(),
            clock: sent,
        });
        Ok(sent)
    }

    /// Like [`send`](Self::send), but packs the timestamp into a [`Message`].
    pub fn send_message(&mut self, target: &ProcessId) -> Result<Message, ClockError> {
        let timestamp = self.send(target)?;
        Ok(Message {
            source: self.id.clone(),
            target: target.clone(),
            timestamp,
        })
    }

    /// Applies a message stamped `sent_timestamp` from `source`.
    ///
    /// The clock becomes `max(clock, sent_timestamp) + 1`, computed in that order so
    /// the result is always strictly greater than the sender's timestamp.
    /// Out-of-domain input (e.g. a negative `i64`) fails with `InvalidArgument`
    /// before anything is mutated.
    pub fn receive<T>(&mut self, source: &ProcessId, sent_timestamp: T) -> Result<Timestamp, ClockError>
    where
        T: TryInto<Timestamp>,
        ClockError: From<T::Error>,
    {
        let received: Timestamp = sent_timestamp.try_into().map_err(|e| {
            let err = ClockError::from(e);
            tracing::warn!(process = %self.id, source = %source, error = %err, "rejected receive");
            err
        })?;

        let before = self.clock;
        let next = before.max(received).increment().inspect_err(|_| {
            tracing::warn!(process = %self.id, source = %source, received = received.value(), "clock overflow");
        })?;
        self.clock = next;
        tracing::debug!(process = %self.id, before = before.value(), received = received.value(), clock = next.value(), "clock adjusted");

        self.recorder.record(&EventRecord::Receive {
            process: self.id.clone(),
            source: source.clone(),
            before,
            received,
            clock: next,
        });
        Ok(next)
    }

    /// Applies a [`Message`] produced by [`send_message`](Self::send_message).
    pub fn receive_message(&mut self, message: &Message) -> Result<Timestamp, ClockError> {
        self.receive(&message.source, message.timestamp)
    }

    fn advance(&mut self) -> Result<Timestamp, ClockError> {
        let next = self.clock.increment().inspect_err(|_| {
            tracing::warn!(process = %self.id, clock = self.clock.value(), "clock overflow");
        })?;
        self.clock = next;
        tracing::debug!(process = %self.id, clock = next.value(), "clock advanced");
        Ok(next)
    }
}
