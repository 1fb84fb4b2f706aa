//! Mock adapters for integration tests.
//!
//! Records every event and hands out deterministic timestamps so tests can
//! assert on exact histories.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use pinsim::app::events::PinEvent;
use pinsim::app::ports::{ChartSink, ClockPort, EventSink};
use pinsim::monitor::HistorySnapshot;

// ── RecordingSink ─────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<PinEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn warnings(&self) -> Vec<PinEvent> {
        self.events.iter().copied().filter(PinEvent::is_warning).collect()
    }

    pub fn last(&self) -> Option<&PinEvent> {
        self.events.last()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &PinEvent) {
        self.events.push(*event);
    }
}

// ── ManualClock ───────────────────────────────────────────────

/// Clock that only moves when told to. Clones share the same time.
#[derive(Clone, Default)]
pub struct ManualClock {
    millis: Arc<AtomicU64>,
}

#[allow(dead_code)]
impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance_ms(&self, ms: u64) {
        self.millis.fetch_add(ms, Ordering::Relaxed);
    }
}

impl ClockPort for ManualClock {
    fn now_secs(&self) -> f64 {
        self.millis.load(Ordering::Relaxed) as f64 / 1000.0
    }
}

// ── CountingChart ─────────────────────────────────────────────

/// Chart sink that keeps the frames it was asked to draw.
#[derive(Default)]
pub struct CountingChart {
    pub frames: Vec<HistorySnapshot>,
}

impl ChartSink for CountingChart {
    fn draw(&mut self, history: &HistorySnapshot) {
        self.frames.push(history.clone());
    }
}
