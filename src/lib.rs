//! Simulated GPIO pin bank.
//!
//! A fixed-size bank of digital pins whose state is persisted to a plain-text
//! snapshot after every change, so independent processes (firmware under
//! test, a control panel, a signal monitor) share one view of the pins.
//!
//! ```text
//!   SimPin / ControlPanel ──▶ PinStore ──▶ SnapshotPort ──▶ snapshot file
//!                                ▲                              │
//!                 Monitor ───────┘ reload every period ◀────────┘
//! ```
//!
//! The command-line front-ends (`pinctl`, `pinmon`) live behind the default
//! `cli` feature.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod codec;
pub mod config;
pub mod drivers;
pub mod error;
pub mod monitor;
pub mod pins;
pub mod store;

pub use config::SimConfig;
pub use error::{Error, PersistError, Result};
pub use pins::{Pin, PinBank, PinMode};
pub use store::{PinStore, ReloadReport};
