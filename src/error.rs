//! Unified error types for the pin simulator.
//!
//! A single `Error` enum that every subsystem converts into, so the control
//! panel and the monitor handle failures uniformly. All variants are `Copy`
//! so they can be handed to event sinks and logged without allocation.

use core::fmt;
use std::io;

use crate::pins::PinMode;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

/// Every fallible operation in the crate funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A value write was attempted on a pin that is not an output.
    NotOutput { pin: usize, mode: PinMode },
    /// The durable snapshot could not be read or written.
    Persist(PersistError),
    /// Worker or resource initialisation failed.
    Init(&'static str),
    /// Configuration is invalid or could not be loaded.
    Config(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotOutput { pin, .. } => write!(f, "Pin {pin} is not an OUTPUT pin!"),
            Self::Persist(e) => write!(f, "snapshot: {e}"),
            Self::Init(msg) => write!(f, "init: {msg}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// Persistence errors
// ---------------------------------------------------------------------------

/// Failure of the durable snapshot backend.
///
/// The three causes get distinct operator messages: a permission problem is
/// fixed differently from a missing directory or unmounted volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistError {
    /// The process may not read or replace the snapshot file.
    PermissionDenied,
    /// The snapshot's directory does not exist.
    PathNotFound,
    /// Any other I/O failure.
    Io(io::ErrorKind),
}

impl PersistError {
    /// Classify an I/O error.
    pub fn from_io(err: &io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::PermissionDenied => Self::PermissionDenied,
            io::ErrorKind::NotFound => Self::PathNotFound,
            kind => Self::Io(kind),
        }
    }
}

impl fmt::Display for PersistError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PermissionDenied => {
                write!(f, "permission denied on pin state file (try running with sudo)")
            }
            Self::PathNotFound => {
                write!(f, "pin state directory not found (is the build volume mounted?)")
            }
            Self::Io(kind) => write!(f, "pin state I/O error: {kind}"),
        }
    }
}

impl std::error::Error for PersistError {}

impl From<PersistError> for Error {
    fn from(e: PersistError) -> Self {
        Self::Persist(e)
    }
}

impl From<io::Error> for PersistError {
    fn from(e: io::Error) -> Self {
        Self::from_io(&e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
