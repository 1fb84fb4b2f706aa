//! Simulator configuration parameters
//!
//! Everything that used to be an ambient constant (pin count, snapshot path,
//! poll cadence, history depth) is carried here and handed to constructors,
//! so independent stores with different sizes and paths can coexist.
//! Values can be loaded from a JSON file via [`ConfigPort`](crate::app::ports::ConfigPort)
//! and overridden on the command line.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::app::ports::ConfigError;
use crate::pins::{DEFAULT_MONITOR_PINS, DEFAULT_PIN_COUNT};

/// Upper bound on the bank size accepted from configuration.
pub const MAX_PIN_COUNT: usize = 1024;

/// Core simulator configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    // --- Pin bank ---
    /// Number of simulated pins shared by every reader and writer
    pub pin_count: usize,
    /// Durable snapshot file
    pub snapshot_path: PathBuf,

    // --- Monitor ---
    /// Poll period of the signal monitor (milliseconds)
    pub poll_interval_ms: u64,
    /// Samples kept per monitored pin
    pub history_cap: usize,
    /// Pins charted by the monitor
    pub monitor_pins: Vec<usize>,
    /// Chart redraw period (milliseconds)
    pub chart_refresh_ms: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            pin_count: DEFAULT_PIN_COUNT,
            snapshot_path: PathBuf::from("build/sim/sim_gpio_pin_states.state"),

            poll_interval_ms: 500, // 2 Hz
            history_cap: 100,      // 50 s at the default poll rate
            monitor_pins: DEFAULT_MONITOR_PINS.to_vec(),
            chart_refresh_ms: 500,
        }
    }
}

impl SimConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn chart_refresh(&self) -> Duration {
        Duration::from_millis(self.chart_refresh_ms)
    }

    /// Range-check every field. Invalid values are rejected, not clamped.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_PIN_COUNT).contains(&self.pin_count) {
            return Err(ConfigError::ValidationFailed("pin_count must be 1–1024"));
        }
        if self.snapshot_path.as_os_str().is_empty() {
            return Err(ConfigError::ValidationFailed(
                "snapshot_path must not be empty",
            ));
        }
        if !(10..=60_000).contains(&self.poll_interval_ms) {
            return Err(ConfigError::ValidationFailed(
                "poll_interval_ms must be 10–60000",
            ));
        }
        if !(1..=100_000).contains(&self.history_cap) {
            return Err(ConfigError::ValidationFailed(
                "history_cap must be 1–100000",
            ));
        }
        if self.monitor_pins.iter().any(|&p| p >= self.pin_count) {
            return Err(ConfigError::ValidationFailed(
                "monitor_pins must be < pin_count",
            ));
        }
        if !(10..=60_000).contains(&self.chart_refresh_ms) {
            return Err(ConfigError::ValidationFailed(
                "chart_refresh_ms must be 10–60000",
            ));
        }
        Ok(())
    }
}
