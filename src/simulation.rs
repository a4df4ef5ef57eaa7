//! Scripted orchestration of several processes.
//!
//! A [`Simulation`] owns its processes and the messages in transit between them.
//! It threads each sent timestamp to the matching receive, so the processes
//! themselves never see one another.

use std::collections::{BTreeMap, VecDeque};
use std::fmt;
use std::path::Path;

use crate::error::SimulationError;
use crate::process::Process;
use crate::record::Recorder;
use crate::types::{ProcessId, Timestamp};

/// One scheduled event.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    Local { process: ProcessId, description: String },
    Send { from: ProcessId, to: ProcessId },
    /// Delivers the oldest in-flight message on the `from` -> `at` link.
    Receive { at: ProcessId, from: ProcessId },
}

/// The processes taking part and the order in which events happen.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Scenario {
    pub processes: Vec<ProcessId>,
    pub steps: Vec<Step>,
}

impl Scenario {
    /// Three processes, eight events; ends at P1=5, P2=4, P3=3.
    pub fn reference() -> Self {
        let (p1, p2, p3) = (ProcessId::from("P1"), ProcessId::from("P2"), ProcessId::from("P3"));
        let local = |p: &ProcessId, d: &str| Step::Local { process: p.clone(), description: d.to_string() };
        let send = |from: &ProcessId, to: &ProcessId| Step::Send { from: from.clone(), to: to.clone() };
        let receive = |at: &ProcessId, from: &ProcessId| Step::Receive { at: at.clone(), from: from.clone() };

        Scenario {
            processes: vec![p1.clone(), p2.clone(), p3.clone()],
            steps: vec![
                local(&p1, "Task start"),
                send(&p2, &p3),
                receive(&p3, &p2),
                send(&p1, &p2),
                local(&p3, "Data processing"),
                receive(&p2, &p1),
                send(&p2, &p1),
                receive(&p1, &p2),
            ],
        }
    }

    pub fn from_json(text: &str) -> Result<Self, SimulationError> {
        serde_json::from_str(text).map_err(|e| SimulationError::Scenario(e.to_string()))
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SimulationError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| SimulationError::Scenario(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&text)
    }

    pub fn to_json(&self) -> Result<String, SimulationError> {
        serde_json::to_string_pretty(self).map_err(|e| SimulationError::Scenario(e.to_string()))
    }
}

/// Clock of every process at one instant, in registration order.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Snapshot(pub Vec<(ProcessId, Timestamp)>);

impl Snapshot {
    pub fn get(&self, id: &ProcessId) -> Option<Timestamp> {
        self.0.iter().find(|(p, _)| p == id).map(|(_, ts)| *ts)
    }
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (id, clock)) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}={}", id, clock)?;
        }
        Ok(())
    }
}

/// Owns a set of processes and the messages in transit between them.
#[derive(Debug)]
pub struct Simulation<R: Recorder + Clone> {
    processes: BTreeMap<ProcessId, Process<R>>,
    // Registration order, used for snapshots.
    order: Vec<ProcessId>,
    // FIFO per (source, target) link.
    in_flight: BTreeMap<(ProcessId, ProcessId), VecDeque<Timestamp>>,
    recorder: R,
}

impl<R: Recorder + Clone> Simulation<R> {
    /// Every process added later reports to a clone of `recorder`.
    pub fn new(recorder: R) -> Self {
        Simulation {
            processes: BTreeMap::new(),
            order: Vec::new(),
            in_flight: BTreeMap::new(),
            recorder,
        }
    }

    pub fn for_scenario(scenario: &Scenario, recorder: R) -> Result<Self, SimulationError> {
        let mut sim = Self::new(recorder);
        for id in &scenario.processes {
            sim.add_process(id.clone())?;
        }
        Ok(sim)
    }

    pub fn add_process(&mut self, id: impl Into<ProcessId>) -> Result<(), SimulationError> {
        let id = id.into();
        let process = Process::with_recorder(id.clone(), self.recorder.clone());
        self.register(id, process)
    }

    /// Registers a process whose clock already reads `clock`.
    #[cfg(any(test, feature = "test-utils"))]
    pub fn add_process_at(&mut self, id: impl Into<ProcessId>, clock: Timestamp) -> Result<(), SimulationError> {
        let id = id.into();
        let process = Process::starting_at(id.clone(), clock, self.recorder.clone());
        self.register(id, process)
    }

    pub fn process(&self, id: &ProcessId) -> Option<&Process<R>> {
        self.processes.get(id)
    }

    /// Number of messages sent from `source` to `target` and not yet received.
    pub fn in_flight(&self, source: &ProcessId, target: &ProcessId) -> usize {
        self.in_flight
            .get(&(source.clone(), target.clone()))
            .map_or(0, VecDeque::len)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot(
            self.order
                .iter()
                .filter_map(|id| self.processes.get(id).map(|p| (id.clone(), p.clock())))
                .collect(),
        )
    }

    /// Executes one step and returns the clocks right after it.
    ///
    /// A failing step changes nothing: unknown processes are detected before any
    /// clock moves, and a queued message is only consumed once its receive succeeds.
    pub fn apply(&mut self, step: &Step) -> Result<Snapshot, SimulationError> {
        match step {
            Step::Local { process, description } => {
                self.process_mut(process)?.local_event(description)?;
            }
            Step::Send { from, to } => {
                self.ensure_known(to)?;
                let sent = self.process_mut(from)?.send(to)?;
                self.in_flight
                    .entry((from.clone(), to.clone()))
                    .or_default()
                    .push_back(sent);
            }
            Step::Receive { at, from } => {
                self.ensure_known(at)?;
                self.ensure_known(from)?;
                let link = (from.clone(), at.clone());
                let sent = self
                    .in_flight
                    .get(&link)
                    .and_then(|q| q.front().copied())
                    .ok_or_else(|| SimulationError::NoMessageInFlight {
                        from: from.clone(),
                        to: at.clone(),
                    })?;
                self.process_mut(at)?.receive(from, sent)?;
                if let Some(queue) = self.in_flight.get_mut(&link) {
                    queue.pop_front();
                }
            }
        }
        let snapshot = self.snapshot();
        tracing::debug!(state = %snapshot, "step applied");
        Ok(snapshot)
    }

    /// Runs every step in order, stopping at the first failure.
    pub fn run(&mut self, steps: &[Step]) -> Result<Vec<Snapshot>, SimulationError> {
        steps.iter().map(|step| self.apply(step)).collect()
    }

    fn register(&mut self, id: ProcessId, process: Process<R>) -> Result<(), SimulationError> {
        if self.processes.contains_key(&id) {
            return Err(SimulationError::DuplicateProcess(id));
        }
        self.order.push(id.clone());
        self.processes.insert(id, process);
        Ok(())
    }

    fn ensure_known(&self, id: &ProcessId) -> Result<(), SimulationError> {
        if self.processes.contains_key(id) {
            Ok(())
        } else {
            Err(SimulationError::UnknownProcess(id.clone()))
        }
    }

    fn process_mut(&mut self, id: &ProcessId) -> Result<&mut Process<R>, SimulationError> {
        self.processes
            .get_mut(id)
            .ok_or_else(|| SimulationError::UnknownProcess(id.clone()))
    }
}
