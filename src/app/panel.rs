//! Control panel — the operator front-end for a [`PinStore`].
//!
//! [`ControlPanel`] keeps one display row per pin and applies operator
//! commands to the store. It never trusts its own rows: after every
//! operation, successful or not, the affected row is re-read from the store.
//!
//! ```text
//!  PanelCommand ──▶ ┌──────────────┐ ──▶ EventSink
//!                   │ ControlPanel │
//!      PinStore  ◀──│  rows[i]     │
//!                   └──────────────┘
//! ```

use std::sync::Arc;

use embedded_hal::digital::PinState;
use log::debug;

use crate::error::{Error, Result};
use crate::pins::{Pin, PinMode, level_bit, level_from_value, level_label};
use crate::store::PinStore;

use super::commands::PanelCommand;
use super::events::PinEvent;
use super::ports::{EventSink, SnapshotPort};

// ───────────────────────────────────────────────────────────────
// PinRow
// ───────────────────────────────────────────────────────────────

/// What the panel shows for one pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinRow {
    pub pin: usize,
    pub mode: PinMode,
    pub level: PinState,
}

impl PinRow {
    fn from_pin(pin: usize, state: Pin) -> Self {
        Self {
            pin,
            mode: state.mode,
            level: state.level,
        }
    }

    /// Button caption, e.g. `"Pin 3: OUTPUT"`.
    pub fn button_label(&self) -> String {
        format!("Pin {}: {}", self.pin, self.mode)
    }

    /// `"HIGH"` or `"LOW"`.
    pub fn level_label(&self) -> &'static str {
        level_label(self.level)
    }
}

// ───────────────────────────────────────────────────────────────
// ControlPanel
// ───────────────────────────────────────────────────────────────

/// Applies operator commands to a shared pin store.
pub struct ControlPanel<P> {
    store: Arc<PinStore<P>>,
    rows: Vec<PinRow>,
}

impl<P: SnapshotPort> ControlPanel<P> {
    /// Panel with one row per pin of `store`.
    pub fn new(store: Arc<PinStore<P>>) -> Self {
        let rows = store
            .snapshot()
            .iter()
            .enumerate()
            .map(|(i, p)| PinRow::from_pin(i, *p))
            .collect();
        Self { store, rows }
    }

    pub fn store(&self) -> &Arc<PinStore<P>> {
        &self.store
    }

    pub fn rows(&self) -> &[PinRow] {
        &self.rows
    }

    pub fn row(&self, pin: usize) -> Option<&PinRow> {
        self.rows.get(pin)
    }

    // ── Commands ──────────────────────────────────────────────

    /// Apply an operator command, reporting the outcome through `sink`.
    pub fn handle_command(&mut self, cmd: PanelCommand, sink: &mut impl EventSink) -> Result<()> {
        match cmd {
            PanelCommand::Toggle(pin) => self.toggle(pin, sink),
            PanelCommand::Write { pin, value } => self.write(pin, value, sink),
            PanelCommand::SetMode { pin, mode } => self.set_mode(pin, mode, sink),
            PanelCommand::Refresh => {
                self.refresh_all(sink);
                Ok(())
            }
        }
    }

    /// Flip an output pin. Non-output pins are rejected with
    /// [`Error::NotOutput`] and an [`PinEvent::InvalidOperation`] notice.
    pub fn toggle(&mut self, pin: usize, sink: &mut impl EventSink) -> Result<()> {
        let Some(current) = self.store.pin(pin) else {
            debug!("Panel: toggle of unknown pin {} ignored", pin);
            return Ok(());
        };
        let next = !current.level;
        self.write(pin, u32::from(level_bit(next)), sink)
    }

    /// Drive an output pin. Same rejection rules as [`toggle`](Self::toggle).
    pub fn write(&mut self, pin: usize, value: u32, sink: &mut impl EventSink) -> Result<()> {
        let result = self.store.write(pin, value);
        self.refresh_pin(pin);

        match result {
            Ok(()) => {
                if pin < self.rows.len() {
                    sink.emit(&PinEvent::LevelChanged {
                        pin,
                        level: level_from_value(value),
                    });
                }
            }
            Err(e) => self.report(pin, e, sink),
        }
        result
    }

    /// Reconfigure a pin. Every mode is allowed.
    pub fn set_mode(&mut self, pin: usize, mode: PinMode, sink: &mut impl EventSink) -> Result<()> {
        let result = self.store.set_mode(pin, mode);
        self.refresh_pin(pin);

        match result {
            Ok(()) => {
                if pin < self.rows.len() {
                    sink.emit(&PinEvent::ModeChanged { pin, mode });
                }
            }
            Err(e) => self.report(pin, e, sink),
        }
        result
    }

    // ── Refresh ───────────────────────────────────────────────

    /// Re-read one row from the store.
    pub fn refresh_pin(&mut self, pin: usize) {
        if let (Some(row), Some(state)) = (self.rows.get_mut(pin), self.store.pin(pin)) {
            *row = PinRow::from_pin(pin, state);
        }
    }

    /// Reload the snapshot and rebuild every row.
    pub fn refresh_all(&mut self, sink: &mut impl EventSink) {
        match self.store.reload() {
            Ok(report) => sink.emit(&PinEvent::Reloaded {
                applied: report.applied,
                malformed: report.malformed,
            }),
            Err(Error::Persist(cause)) => sink.emit(&PinEvent::ReloadFailed(cause)),
            Err(e) => debug!("Panel: reload failed: {}", e),
        }

        let bank = self.store.snapshot();
        for (row, state) in self.rows.iter_mut().zip(bank.iter()) {
            *row = PinRow::from_pin(row.pin, *state);
        }
    }

    // ── Internal ──────────────────────────────────────────────

    fn report(&self, pin: usize, err: Error, sink: &mut impl EventSink) {
        match err {
            Error::NotOutput { mode, .. } => {
                sink.emit(&PinEvent::InvalidOperation { pin, mode });
            }
            Error::Persist(cause) => sink.emit(&PinEvent::PersistFailed { pin, cause }),
            Error::Init(_) | Error::Config(_) => debug!("Panel: pin {}: {}", pin, err),
        }
    }
}
