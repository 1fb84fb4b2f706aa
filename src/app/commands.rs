//! Inbound commands to the control panel.
//!
//! These represent operator actions (button presses, shell lines, CLI
//! subcommands) that the [`ControlPanel`](super::panel::ControlPanel)
//! interprets and applies to the pin store.

use crate::pins::PinMode;

/// Commands that front-ends can send into the control panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelCommand {
    /// Flip an output pin between LOW and HIGH.
    Toggle(usize),

    /// Drive an output pin to a value; any nonzero value is HIGH.
    Write { pin: usize, value: u32 },

    /// Reconfigure a pin. Always allowed, for every mode.
    SetMode { pin: usize, mode: PinMode },

    /// Re-read the snapshot and redraw every row.
    Refresh,
}
