//! Application core — pin-panel logic and the port boundary.
//!
//! The control panel drives the [`PinStore`](crate::store::PinStore) on
//! behalf of an operator. All interaction with storage, clocks and displays
//! happens through the **port traits** defined in [`ports`], keeping this
//! layer testable without a real filesystem or terminal.

pub mod commands;
pub mod events;
pub mod panel;
pub mod ports;
