//! Integration tests for the polling monitor.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use pinsim::adapters::memory_snapshot::MemorySnapshot;
use pinsim::app::ports::ChartSink;
use pinsim::monitor::{Monitor, MonitorState};
use pinsim::{PinMode, PinStore};

use super::mock_ports::{CountingChart, ManualClock};

const PERIOD: Duration = Duration::from_millis(20);

fn make_monitor(
    cap: usize,
) -> (
    Monitor<MemorySnapshot, ManualClock>,
    Arc<PinStore<MemorySnapshot>>,
    ManualClock,
) {
    let store = Arc::new(PinStore::new(8, MemorySnapshot::new()));
    let clock = ManualClock::new();
    let monitor = Monitor::new(Arc::clone(&store), clock.clone(), &[0, 1, 2], cap, PERIOD);
    (monitor, store, clock)
}

#[test]
fn history_keeps_most_recent_samples_oldest_first() {
    let (monitor, store, clock) = make_monitor(5);
    store.set_mode(0, PinMode::Output).unwrap();

    for i in 0..8u32 {
        store.write(0, i % 2).unwrap();
        monitor.poll_once();
        clock.advance_ms(500);
    }

    let h = monitor.history();
    assert_eq!(h.len(), 5);
    assert_eq!(h.timestamps, vec![1.5, 2.0, 2.5, 3.0, 3.5]);
    assert_eq!(h.values(0), Some(&[1, 0, 1, 0, 1][..]));
    assert_eq!(h.values(2), Some(&[0, 0, 0, 0, 0][..]));
}

#[test]
fn history_never_exceeds_cap_while_polling() {
    let (mut monitor, _store, _clock) = make_monitor(3);
    monitor.start().unwrap();
    thread::sleep(PERIOD * 10);
    monitor.stop();

    assert!(monitor.tick_count() > 3);
    monitor.with_history(|h| {
        assert_eq!(h.len(), 3);
        for pin in [0, 1, 2] {
            assert_eq!(h.values(pin).map(|v| v.len()), Some(3));
        }
    });
}

#[test]
fn no_samples_after_stop() {
    let (mut monitor, _store, _clock) = make_monitor(1000);
    monitor.start().unwrap();
    thread::sleep(PERIOD * 3);
    monitor.stop();
    assert_eq!(monitor.state(), MonitorState::Idle);

    let ticks = monitor.tick_count();
    let len = monitor.history().len();
    thread::sleep(PERIOD * 3);

    assert_eq!(monitor.tick_count(), ticks);
    assert_eq!(monitor.history().len(), len);
}

#[test]
fn restart_resumes_appending() {
    let (mut monitor, _store, _clock) = make_monitor(1000);
    monitor.start().unwrap();
    thread::sleep(PERIOD * 2);
    monitor.stop();
    let first = monitor.history().len();

    monitor.start().unwrap();
    thread::sleep(PERIOD * 2);
    monitor.stop();
    assert!(monitor.history().len() > first);
}

#[test]
fn renderer_always_sees_equal_length_columns() {
    let (mut monitor, store, _clock) = make_monitor(4);
    store.set_mode(1, PinMode::Output).unwrap();
    monitor.start().unwrap();

    let mut chart = CountingChart::default();
    for i in 0..20u32 {
        store.write(1, i % 2).unwrap();
        chart.draw(&monitor.history());
        thread::sleep(Duration::from_millis(3));
    }
    monitor.stop();

    for frame in &chart.frames {
        assert!(frame.len() <= 4);
        for (_, values) in &frame.series {
            assert_eq!(values.len(), frame.timestamps.len());
        }
    }
}

#[test]
fn dropping_a_polling_monitor_stops_it() {
    let (mut monitor, store, _clock) = make_monitor(10);
    monitor.start().unwrap();
    thread::sleep(PERIOD);
    drop(monitor);

    // Both the monitor and its thread have released the store.
    assert_eq!(Arc::strong_count(&store), 1);
}
