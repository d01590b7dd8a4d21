use std::sync::Arc;
use std::sync::atomic::Ordering;
use std::time::Duration;

use resink_runtime::run_loop::spawn_loop_named;

use crate::config::engine::Event;
use crate::infra::event_hub::EventHub;
use crate::tests::harness::{
    CountingFactory, FailingFactory, FlakyFactory, PanickingFactory, SlowFactory, drain_events,
    spawn_worker, summarize,
};
use crate::worker::SinkWorker;
use crate::worker::messages::{ShutdownMessage, TickMessage};

#[test]
fn three_ticks_then_stop_pair_every_create_with_a_destroy() {
    let (factory, created) = CountingFactory::new();
    let mut harness = spawn_worker(Box::new(factory));

    for _ in 0..3 {
        harness.worker.post(TickMessage).expect("post tick");
    }
    harness.worker.post(ShutdownMessage).expect("post shutdown");
    harness.join.join().expect("worker thread");

    assert_eq!(created.load(Ordering::Relaxed), 3);
    let events = drain_events(&mut harness.events_rx);
    let counts = summarize(&events);
    let [a, b, c] = counts.created[..] else {
        panic!("expected three creations, got {:?}", counts.created);
    };
    assert_eq!(
        events,
        vec![
            Event::SinkCreated { sink_id: a },
            Event::SinkDestroyed { sink_id: a },
            Event::SinkCreated { sink_id: b },
            Event::SinkDestroyed { sink_id: b },
            Event::SinkCreated { sink_id: c },
            Event::SinkDestroyed { sink_id: c },
            Event::WorkerDestroyed,
        ]
    );
}

#[test]
fn stop_requested_mid_replace_waits_for_the_replacement() {
    let mut harness = spawn_worker(Box::new(SlowFactory {
        delay: Duration::from_millis(80),
    }));

    harness.worker.post(TickMessage).expect("post tick");
    // Land the stop request while the slow create is still executing.
    std::thread::sleep(Duration::from_millis(20));
    harness.worker.post(ShutdownMessage).expect("post shutdown");
    harness.join.join().expect("worker thread");

    let events = drain_events(&mut harness.events_rx);
    let counts = summarize(&events);
    assert_eq!(counts.created.len(), 1);
    assert_eq!(counts.destroyed.len(), 1);
    assert_eq!(counts.worker_destroyed, 1);
    let teardown_at = events
        .iter()
        .position(|event| *event == Event::WorkerDestroyed)
        .expect("teardown event");
    assert!(
        events[teardown_at..]
            .iter()
            .all(|event| !matches!(event, Event::SinkCreated { .. })),
        "no replacement may follow teardown: {events:?}"
    );
    assert_eq!(events.last(), Some(&Event::WorkerDestroyed));
}

#[test]
fn failed_creation_reports_and_leaves_the_slot_empty() {
    let mut harness = spawn_worker(Box::new(FailingFactory));

    harness.worker.post(TickMessage).expect("post tick");
    harness.worker.post(TickMessage).expect("post tick");
    harness.worker.post(ShutdownMessage).expect("post shutdown");
    harness.join.join().expect("worker thread");

    let events = drain_events(&mut harness.events_rx);
    let counts = summarize(&events);
    assert_eq!(counts.created.len(), 0);
    assert_eq!(counts.destroyed.len(), 0, "nothing to destroy at teardown");
    assert_eq!(counts.failed, 2, "each tick retries and reports");
    assert_eq!(counts.worker_destroyed, 1);
    assert_eq!(events.last(), Some(&Event::WorkerDestroyed));
}

#[test]
fn recovery_after_failure_keeps_create_destroy_counts_paired() {
    let mut harness = spawn_worker(Box::new(FlakyFactory::new()));

    for _ in 0..4 {
        harness.worker.post(TickMessage).expect("post tick");
    }
    harness.worker.post(ShutdownMessage).expect("post shutdown");
    harness.join.join().expect("worker thread");

    let events = drain_events(&mut harness.events_rx);
    let counts = summarize(&events);
    assert_eq!(counts.created.len(), 2);
    assert_eq!(counts.destroyed.len(), 2);
    assert_eq!(counts.failed, 2);
    assert_eq!(counts.created, counts.destroyed, "pairing survives failures");
    assert_eq!(counts.worker_destroyed, 1);
}

#[test]
fn abandoned_worker_loop_still_tears_down_exactly_once() {
    let (factory, _created) = CountingFactory::new();
    let events = Arc::new(EventHub::new(64));
    let mut events_rx = events.subscribe();
    let state = SinkWorker::new(Box::new(factory), Arc::clone(&events));
    let (worker, join) = spawn_loop_named(state, "resink-test-worker").expect("spawn worker loop");

    // No shutdown is ever posted; closing the queue is the only signal.
    drop(worker);
    join.join().expect("worker thread");

    let events = drain_events(&mut events_rx);
    assert_eq!(events, vec![Event::WorkerDestroyed]);
}

#[test]
fn panicking_factory_terminates_loop_but_still_tears_down() {
    let mut harness = spawn_worker(Box::new(PanickingFactory));

    harness.worker.post(TickMessage).expect("post tick");
    harness.join.join().expect("worker thread survives the panic");

    let events = drain_events(&mut harness.events_rx);
    assert_eq!(events, vec![Event::WorkerDestroyed]);
}

#[test]
fn ticks_queued_behind_a_shutdown_never_touch_the_slot() {
    let (factory, created) = CountingFactory::new();
    let mut harness = spawn_worker(Box::new(factory));

    harness.worker.post(ShutdownMessage).expect("post shutdown");
    for _ in 0..5 {
        // Best-effort: the queue may already be torn down.
        let _ = harness.worker.post(TickMessage);
    }
    harness.join.join().expect("worker thread");

    assert_eq!(created.load(Ordering::Relaxed), 0);
    let events = drain_events(&mut harness.events_rx);
    assert_eq!(events, vec![Event::WorkerDestroyed]);
}
