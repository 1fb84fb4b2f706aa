//! `embedded-hal` digital pin backed by a simulated pin store.
//!
//! Firmware written against [`OutputPin`]/[`InputPin`] can drive the
//! simulation unchanged: every write goes through [`PinStore::write`], so it
//! is persisted and visible to the monitor and control panel.

use std::sync::Arc;

use embedded_hal::digital::{
    self, ErrorKind, ErrorType, InputPin, OutputPin, PinState, StatefulOutputPin,
};

use crate::app::ports::SnapshotPort;
use crate::error::{Error, Result};
use crate::pins::{PinMode, level_bit};
use crate::store::PinStore;

impl digital::Error for Error {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

/// Handle on one pin of a shared [`PinStore`].
///
/// Handles beyond the bank read LOW and swallow writes, matching the store.
pub struct SimPin<P> {
    store: Arc<PinStore<P>>,
    index: usize,
}

impl<P: SnapshotPort> SimPin<P> {
    pub fn new(store: Arc<PinStore<P>>, index: usize) -> Self {
        Self { store, index }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Current mode, `None` for handles beyond the bank.
    pub fn mode(&self) -> Option<PinMode> {
        self.store.mode(self.index)
    }

    pub fn set_as_output(&mut self) -> Result<()> {
        self.store.set_mode(self.index, PinMode::Output)
    }

    pub fn set_as_input(&mut self) -> Result<()> {
        self.store.set_mode(self.index, PinMode::Input)
    }

    /// Configure as output and drive `level` in one step.
    pub fn into_output(mut self, level: PinState) -> Result<Self> {
        self.set_as_output()?;
        self.store.write(self.index, level_bit(level))?;
        Ok(self)
    }

    /// Configure as input.
    pub fn into_input(mut self) -> Result<Self> {
        self.set_as_input()?;
        Ok(self)
    }
}

impl<P> ErrorType for SimPin<P> {
    type Error = Error;
}

impl<P: SnapshotPort> OutputPin for SimPin<P> {
    fn set_low(&mut self) -> Result<()> {
        self.store.write(self.index, 0u8)
    }

    fn set_high(&mut self) -> Result<()> {
        self.store.write(self.index, 1u8)
    }
}

impl<P: SnapshotPort> StatefulOutputPin for SimPin<P> {
    fn is_set_high(&mut self) -> Result<bool> {
        Ok(self.store.level(self.index) == PinState::High)
    }

    fn is_set_low(&mut self) -> Result<bool> {
        Ok(self.store.level(self.index) == PinState::Low)
    }
}

impl<P: SnapshotPort> InputPin for SimPin<P> {
    fn is_high(&mut self) -> Result<bool> {
        Ok(self.store.read(self.index) == 1)
    }

    fn is_low(&mut self) -> Result<bool> {
        Ok(self.store.read(self.index) == 0)
    }
}
