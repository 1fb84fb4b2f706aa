//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing control-panel events to the `log`
//! facade. Operator-facing problems go out at `warn`/`error` so they are
//! visible at the default level; routine changes go out at `info`.

use log::{error, info, warn};

use crate::app::events::PinEvent;
use crate::app::ports::EventSink;
use crate::pins::level_label;

/// Adapter that logs every [`PinEvent`].
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &PinEvent) {
        match event {
            PinEvent::ModeChanged { pin, mode } => {
                info!("MODE  | pin {} -> {}", pin, mode);
            }
            PinEvent::LevelChanged { pin, level } => {
                info!("LEVEL | pin {} -> {}", pin, level_label(*level));
            }
            PinEvent::InvalidOperation { pin, mode } => {
                warn!(
                    "Invalid Operation | Pin {} is not an OUTPUT pin! (mode {})",
                    pin, mode
                );
            }
            PinEvent::PersistFailed { pin, cause } => {
                error!("SAVE  | pin {} not changed: {}", pin, cause);
            }
            PinEvent::Reloaded { applied, malformed } => {
                info!("LOAD  | {} pins applied, {} malformed", applied, malformed);
            }
            PinEvent::ReloadFailed(cause) => {
                warn!("LOAD  | snapshot unreadable: {}", cause);
            }
        }
    }
}
