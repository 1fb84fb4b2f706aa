//! Outbound control-panel events.
//!
//! The [`ControlPanel`](super::panel::ControlPanel) emits these through the
//! [`EventSink`](super::ports::EventSink) port. Adapters on the other side
//! decide what to do with them: log them, raise a dialog, print a warning.

use embedded_hal::digital::PinState;

use crate::error::PersistError;
use crate::pins::PinMode;

/// Structured events emitted by the control panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinEvent {
    /// A pin's mode was changed and persisted.
    ModeChanged { pin: usize, mode: PinMode },

    /// An output pin's level was written and persisted.
    LevelChanged { pin: usize, level: PinState },

    /// Operator asked to drive a pin that is not an output.
    /// Always surfaced as a warning, never dropped.
    InvalidOperation { pin: usize, mode: PinMode },

    /// The snapshot could not be written; the pin kept its previous state.
    PersistFailed { pin: usize, cause: PersistError },

    /// The bank was re-read from the snapshot.
    Reloaded { applied: usize, malformed: usize },

    /// The snapshot could not be read; the bank kept its previous state.
    ReloadFailed(PersistError),
}

impl PinEvent {
    /// Whether an operator needs to act on this event.
    pub fn is_warning(&self) -> bool {
        matches!(
            self,
            Self::InvalidOperation { .. } | Self::PersistFailed { .. } | Self::ReloadFailed(_)
        )
    }
}
