//! Conformance checks against the three-process reference trace.

use std::io::Write;

use lamport_clock::{
    ClockError, EventRecord, MemoryRecorder, NoopRecorder, Process, ProcessId, Scenario,
    Simulation, SimulationError, Step, Timestamp,
};

fn pid(label: &str) -> ProcessId {
    ProcessId::from(label)
}

fn ts(value: u64) -> Timestamp {
    Timestamp::new(value)
}

#[test]
fn reference_trace_step_by_step() {
    let (p1, p2, p3) = (pid("P1"), pid("P2"), pid("P3"));
    let mut a = Process::with_recorder("P1", NoopRecorder);
    let mut b = Process::with_recorder("P2", NoopRecorder);
    let mut c = Process::with_recorder("P3", NoopRecorder);

    assert_eq!(a.local_event("Task start").unwrap(), ts(1));

    let m = b.send(&p3).unwrap();
    assert_eq!(m, ts(1));
    assert_eq!(b.clock(), ts(1));

    assert_eq!(c.receive(&p2, m).unwrap(), ts(2));

    let m = a.send(&p2).unwrap();
    assert_eq!(m, ts(2));

    assert_eq!(c.local_event("Data processing").unwrap(), ts(3));

    assert_eq!(b.receive(&p1, m).unwrap(), ts(3));

    let m = b.send(&p1).unwrap();
    assert_eq!(m, ts(4));

    assert_eq!(a.receive(&p2, m).unwrap(), ts(5));

    assert_eq!((a.clock(), b.clock(), c.clock()), (ts(5), ts(4), ts(3)));
}

#[test]
fn reference_scenario_through_simulation() {
    let scenario = Scenario::reference();
    let recorder = MemoryRecorder::new();
    let mut sim = Simulation::for_scenario(&scenario, recorder.clone()).unwrap();

    let initial = sim.snapshot();
    assert_eq!(initial.to_string(), "P1=0, P2=0, P3=0");

    let snapshots = sim.run(&scenario.steps).unwrap();
    let rendered: Vec<String> = snapshots.iter().map(ToString::to_string).collect();
    assert_eq!(
        rendered,
        vec![
            "P1=1, P2=0, P3=0",
            "P1=1, P2=1, P3=0",
            "P1=1, P2=1, P3=2",
            "P1=2, P2=1, P3=2",
            "P1=2, P2=1, P3=3",
            "P1=2, P2=3, P3=3",
            "P1=2, P2=4, P3=3",
            "P1=5, P2=4, P3=3",
        ]
    );

    // Final receive on P1 reports the pre-adjustment clock and the carried timestamp.
    let last = recorder.records().pop().unwrap();
    assert_eq!(
        last,
        EventRecord::Receive {
            process: pid("P1"),
            source: pid("P2"),
            before: ts(2),
            received: ts(4),
            clock: ts(5),
        }
    );
}

#[test]
fn rejection_scenario_leaves_clock_unchanged() {
    let mut p = Process::with_recorder("P1", NoopRecorder);
    p.local_event("x").unwrap();
    p.local_event("y").unwrap();

    let err = p.receive(&pid("P2"), -1i64).unwrap_err();
    assert!(matches!(err, ClockError::InvalidArgument(_)));
    assert_eq!(p.clock(), ts(2));
}

#[test]
fn scenario_loads_from_file() {
    let scenario = Scenario::reference();
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(scenario.to_json().unwrap().as_bytes()).unwrap();

    let loaded = Scenario::from_path(file.path()).unwrap();
    assert_eq!(loaded, scenario);
}

#[test]
fn scenario_from_handwritten_json() {
    let json = r#"{
        "processes": ["A", "B"],
        "steps": [
            {"op": "local", "process": "A", "description": "warm up"},
            {"op": "local", "process": "A", "description": "warm up again"},
            {"op": "send", "from": "A", "to": "B"},
            {"op": "receive", "at": "B", "from": "A"}
        ]
    }"#;
    let scenario = Scenario::from_json(json).unwrap();
    assert_eq!(scenario.steps[2], Step::Send { from: pid("A"), to: pid("B") });

    let mut sim = Simulation::for_scenario(&scenario, NoopRecorder).unwrap();
    let last = sim.run(&scenario.steps).unwrap().pop().unwrap();
    assert_eq!(last.get(&pid("A")), Some(ts(3)));
    assert_eq!(last.get(&pid("B")), Some(ts(4)));
}

#[test]
fn malformed_scenario_reported() {
    let err = Scenario::from_json(r#"{"processes": ["A"], "steps": [{"op": "teleport"}]}"#).unwrap_err();
    assert!(matches!(err, SimulationError::Scenario(_)));

    let missing = Scenario::from_path("/nonexistent/lamport/scenario.json").unwrap_err();
    assert!(matches!(missing, SimulationError::Scenario(_)));
}

#[test]
fn duplicate_process_in_scenario_rejected() {
    let scenario = Scenario { processes: vec![pid("A"), pid("A")], steps: vec![] };
    let err = Simulation::for_scenario(&scenario, NoopRecorder).unwrap_err();
    assert_eq!(err, SimulationError::DuplicateProcess(pid("A")));
}
