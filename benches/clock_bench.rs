use criterion::{black_box, criterion_group, criterion_main, Criterion};
use lamport_clock::{NoopRecorder, Process, ProcessId, Scenario, SharedProcess, Simulation, Timestamp};

fn clock_benchmarks(c: &mut Criterion) {
    let peer = ProcessId::from("peer");

    c.bench_function("local_event", |b| {
        let mut p = Process::with_recorder("P", NoopRecorder);
        b.iter(|| p.local_event(black_box("bench")))
    });

    c.bench_function("receive", |b| {
        let mut p = Process::with_recorder("P", NoopRecorder);
        b.iter(|| p.receive(&peer, black_box(Timestamp::new(7))))
    });

    c.bench_function("shared_local_event", |b| {
        let p = SharedProcess::from_process(Process::with_recorder("P", NoopRecorder));
        b.iter(|| p.local_event(black_box("bench")))
    });

    c.bench_function("reference_scenario", |b| {
        let scenario = Scenario::reference();
        b.iter(|| {
            let mut sim = Simulation::for_scenario(&scenario, NoopRecorder)?;
            sim.run(&scenario.steps)
        })
    });
}

criterion_group!(benches, clock_benchmarks);
criterion_main!(benches);
