#![no_main]

// ────────────────────────────────────────────────────────────
// Harness: scenario_json
// Arbitrary scenario documents must parse or fail cleanly, and a
// parsed scenario must run or fail without panicking.
// ────────────────────────────────────────────────────────────

use libfuzzer_sys::fuzz_target;

use lamport_clock::{NoopRecorder, Scenario, Simulation};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else { return };
    let Ok(scenario) = Scenario::from_json(text) else { return };
    if let Ok(mut sim) = Simulation::for_scenario(&scenario, NoopRecorder) {
        let _ = sim.run(&scenario.steps);
    }
});
