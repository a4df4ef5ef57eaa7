//! Thread-safe handle to a [`Process`].
//!
//! Each operation holds the process lock for its whole read-modify-write, so
//! concurrent calls on one process are serialised. Processes never share a
//! lock; the only thing that crosses between them is a timestamp.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::error::ClockError;
use crate::process::core::Process;
use crate::record::{Recorder, TracingRecorder};
use crate::types::{Message, ProcessId, Timestamp};

/// Cloneable, `Send + Sync` handle; all clones drive the same clock.
#[derive(Debug)]
pub struct SharedProcess<R: Recorder = TracingRecorder> {
    id: ProcessId,
    inner: Arc<Mutex<Process<R>>>,
}

impl<R: Recorder> Clone for SharedProcess<R> {
    fn clone(&self) -> Self {
        SharedProcess {
            id: self.id.clone(),
            inner: Arc::clone(&self.inner),
        }
    }
}

impl SharedProcess<TracingRecorder> {
    pub fn new(id: impl Into<ProcessId>) -> Self {
        Self::from_process(Process::new(id))
    }
}

impl<R: Recorder> SharedProcess<R> {
    pub fn from_process(process: Process<R>) -> Self {
        SharedProcess {
            id: process.id().clone(),
            inner: Arc::new(Mutex::new(process)),
        }
    }

    pub fn id(&self) -> &ProcessId {
        &self.id
    }

    pub fn clock(&self) -> Timestamp {
        self.lock().clock()
    }

    pub fn local_event(&self, description: &str) -> Result<Timestamp, ClockError> {
        self.lock().local_event(description)
    }

    pub fn send(&self, target: &ProcessId) -> Result<Timestamp, ClockError> {
        self.lock().send(target)
    }

    pub fn send_message(&self, target: &ProcessId) -> Result<Message, ClockError> {
        self.lock().send_message(target)
    }

    pub fn receive<T>(&self, source: &ProcessId, sent_timestamp: T) -> Result<Timestamp, ClockError>
    where
        T: TryInto<Timestamp>,
        ClockError: From<T::Error>,
    {
        self.lock().receive(source, sent_timestamp)
    }

    pub fn receive_message(&self, message: &Message) -> Result<Timestamp, ClockError> {
        self.lock().receive_message(message)
    }

    // A panic while holding the lock cannot leave a half-written clock: the
    // counter is assigned once, after every check has passed.
    fn lock(&self) -> MutexGuard<'_, Process<R>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
