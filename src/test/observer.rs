use crate::engine::{
    Engine, EngineConfig, EngineObserver, PersonId, SlotId, TraceEvent, TraceRecorder,
};
use crate::sim::{Backpressure, FixedArrivals, SimTime, StaggeredArrivals, driver};

fn assign(t: u64, person: u64, slot: usize, departure: u64) -> TraceEvent {
    TraceEvent::Assign {
        t: SimTime(t),
        person: PersonId(person),
        slot: SlotId(slot),
        departure: SimTime(departure),
    }
}

fn arrival(t: u64, person: u64) -> TraceEvent {
    TraceEvent::Arrival {
        t: SimTime(t),
        person: PersonId(person),
    }
}

fn departure(t: u64, person: u64, slot: usize) -> TraceEvent {
    TraceEvent::Departure {
        t: SimTime(t),
        person: PersonId(person),
        slot: SlotId(slot),
    }
}

#[test]
fn recorder_sees_every_transition_in_order() {
    let recorder = TraceRecorder::new();
    let log = recorder.events();

    let mut cfg = EngineConfig::new(2, SimTime(5));
    cfg.batch_cap = 2;
    let mut e = Engine::new(cfg).expect("engine").with_observer(recorder);
    let mut source = FixedArrivals::new([0, 0, 1, 1].map(SimTime));
    driver::run(&mut e, &mut source, Backpressure::Fail).expect("run");

    assert_eq!(
        &*log.lock().expect("log lock"),
        &[
            arrival(0, 1),
            arrival(0, 2),
            assign(0, 1, 0, 5),
            assign(0, 2, 1, 5),
            arrival(1, 3),
            arrival(1, 4),
            departure(5, 1, 0),
            departure(5, 2, 1),
            assign(5, 3, 0, 10),
            assign(5, 4, 1, 10),
            departure(10, 3, 0),
            departure(10, 4, 1),
        ]
    );
}

#[test]
fn recorder_sees_rejections() {
    let recorder = TraceRecorder::new();
    let log = recorder.events();

    let mut cfg = EngineConfig::new(1, SimTime(5));
    cfg.queue_capacity = 1;
    let mut e = Engine::new(cfg).expect("engine").with_observer(recorder);
    e.on_arrival(PersonId(1), SimTime(0)).expect("admit");
    e.on_arrival(PersonId(2), SimTime(0)).expect("admit");
    assert!(e.on_arrival(PersonId(3), SimTime(0)).is_err());

    let log = log.lock().expect("log lock");
    assert_eq!(
        log.last(),
        Some(&TraceEvent::Rejected {
            t: SimTime(0),
            person: PersonId(3)
        })
    );
}

#[test]
fn identical_runs_produce_identical_traces() {
    let run_once = || {
        let recorder = TraceRecorder::new();
        let log = recorder.events();
        let mut e = Engine::new(EngineConfig::new(10, SimTime(5)))
            .expect("engine")
            .with_observer(recorder);
        let mut source = StaggeredArrivals::new(300, 2, 42);
        driver::run(&mut e, &mut source, Backpressure::Fail).expect("run");
        let events = log.lock().expect("log lock").clone();
        events
    };

    let a = run_once();
    let b = run_once();
    assert!(!a.is_empty());
    assert_eq!(a, b);
}

#[test]
fn trace_event_serializes_with_kind_tag() {
    let v = serde_json::to_value(assign(0, 1, 0, 5)).expect("serialize");
    assert_eq!(
        v,
        serde_json::json!({ "kind": "assign", "t": 0, "person": 1, "slot": 0, "departure": 5 })
    );

    let back: TraceEvent = serde_json::from_value(serde_json::json!({
        "kind": "departure", "t": 5, "person": 1, "slot": 0
    }))
    .expect("deserialize");
    assert_eq!(back, departure(5, 1, 0));
}

#[test]
fn recorder_panics_on_poisoned_log() {
    let mut recorder = TraceRecorder::new();
    let log = recorder.events();
    let poisoner = std::thread::spawn(move || {
        let _guard = log.lock().expect("log lock");
        panic!("poison the trace log");
    });
    assert!(poisoner.join().is_err());

    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        recorder.on_rejected(SimTime(0), PersonId(1));
    }));
    assert!(result.is_err(), "lost trace event must not be silent");
}
