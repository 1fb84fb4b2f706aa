//! Port traits — the boundary between pin-bank logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ PinStore / ControlPanel / Monitor
//! ```
//!
//! Driven adapters (snapshot storage, event sinks, clocks, chart surfaces,
//! configuration files) implement these traits. The domain types consume
//! them via generics, so nothing in the core touches the filesystem or a
//! terminal directly.
//!
//! ## Sharing notes
//!
//! - **SnapshotPort** is the only cross-process channel. Implementations are
//!   last-writer-wins; a single writer per snapshot is assumed, not enforced.
//! - **SnapshotPort::store** SHOULD replace the snapshot atomically so a
//!   concurrent reader never sees a half-written bank.

use core::fmt;
use std::io;

use crate::config::SimConfig;
use crate::error::PersistError;
use crate::monitor::HistorySnapshot;

use super::events::PinEvent;

// ───────────────────────────────────────────────────────────────
// Snapshot port (driven adapter: store ↔ durable storage)
// ───────────────────────────────────────────────────────────────

/// Durable storage for the encoded pin bank.
pub trait SnapshotPort: Send + Sync {
    /// Read the whole snapshot text. `Ok(None)` when no snapshot exists yet.
    fn load(&self) -> Result<Option<String>, PersistError>;

    /// Replace the whole snapshot text.
    fn store(&self, text: &str) -> Result<(), PersistError>;
}

impl<T: SnapshotPort + ?Sized> SnapshotPort for std::sync::Arc<T> {
    fn load(&self) -> Result<Option<String>, PersistError> {
        (**self).load()
    }

    fn store(&self, text: &str) -> Result<(), PersistError> {
        (**self).store(text)
    }
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → operator / log)
// ───────────────────────────────────────────────────────────────

/// The control panel emits [`PinEvent`]s through this port. Adapters decide
/// where they go (log, dialog box, terminal).
pub trait EventSink {
    fn emit(&mut self, event: &PinEvent);
}

// ───────────────────────────────────────────────────────────────
// Clock port (driven adapter: system time → monitor)
// ───────────────────────────────────────────────────────────────

/// Timestamp source for monitor samples.
pub trait ClockPort: Send + Sync {
    /// Current time in seconds (fractional).
    fn now_secs(&self) -> f64;
}

// ───────────────────────────────────────────────────────────────
// Chart sink port (driven adapter: monitor history → display)
// ───────────────────────────────────────────────────────────────

/// Consumer of copied-out sample history, called once per redraw.
pub trait ChartSink {
    fn draw(&mut self, history: &HistorySnapshot);
}

// ───────────────────────────────────────────────────────────────
// Configuration port (driven adapter: domain ↔ persistent config)
// ───────────────────────────────────────────────────────────────

/// Loads and persists simulator configuration.
///
/// Implementations MUST validate before persisting and reject invalid ranges
/// with [`ConfigError::ValidationFailed`] rather than clamping.
pub trait ConfigPort {
    /// Load configuration. Returns [`SimConfig::default()`] if none is stored.
    fn load(&self) -> Result<SimConfig, ConfigError>;

    /// Validate and persist configuration.
    fn save(&self, config: &SimConfig) -> Result<(), ConfigError>;
}

// ───────────────────────────────────────────────────────────────
// Error types
// ───────────────────────────────────────────────────────────────

/// Errors from [`ConfigPort`] operations.
#[derive(Debug)]
pub enum ConfigError {
    /// Stored config could not be parsed.
    Corrupted,
    /// A config field failed range validation.
    /// The `&'static str` describes which field and why.
    ValidationFailed(&'static str),
    /// Underlying file I/O failed.
    Io(io::ErrorKind),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Corrupted => write!(f, "config corrupted"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
            Self::Io(kind) => write!(f, "I/O error: {}", kind),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<ConfigError> for crate::error::Error {
    fn from(e: ConfigError) -> Self {
        match e {
            ConfigError::Corrupted => Self::Config("config corrupted"),
            ConfigError::ValidationFailed(msg) => Self::Config(msg),
            ConfigError::Io(_) => Self::Config("config file unreadable"),
        }
    }
}
