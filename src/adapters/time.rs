//! Clock adapter for monitor timestamps.
//!
//! [`UptimeClock`] counts monotonic seconds since the clock was created,
//! which keeps chart axes short and immune to wall-clock jumps.

use std::time::Instant;

use crate::app::ports::ClockPort;

/// Monotonic time since construction.
#[derive(Debug, Clone, Copy)]
pub struct UptimeClock {
    start: Instant,
}

impl Default for UptimeClock {
    fn default() -> Self {
        Self::new()
    }
}

impl UptimeClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl ClockPort for UptimeClock {
    fn now_secs(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }
}
