//! Pin state store — the authoritative in-memory pin bank.
//!
//! The bank is kept in sync with a durable snapshot through a
//! [`SnapshotPort`]. Every mutation writes the full bank through; every
//! [`reload`](PinStore::reload) re-reads it and overlays what it finds.
//!
//! ## Out-of-range indices
//!
//! The store is deliberately permissive about pin indices: reads outside
//! `0..pin_count` return `0`, and `set_mode`/`write` outside that range are
//! ignored without an error. Simulated firmware probing pins the board does
//! not have must keep running.
//!
//! ## Consistency
//!
//! Reloads and mutations build a complete new bank and swap it in under the
//! write lock, so concurrent readers see either the old or the new bank,
//! never a half-applied one. A mutation is swapped in only after the
//! snapshot write succeeds; on failure the in-memory bank is unchanged.

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use embedded_hal::digital::PinState;
use log::{debug, info, warn};

use crate::adapters::file_snapshot::FileSnapshot;
use crate::app::ports::SnapshotPort;
use crate::codec;
use crate::config::SimConfig;
use crate::error::{Error, Result};
use crate::pins::{Pin, PinBank, PinMode, level_bit, level_from_value};

/// Outcome of a successful [`PinStore::reload`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReloadReport {
    /// Pins replaced from the snapshot.
    pub applied: usize,
    /// Malformed records skipped within the bank's range.
    pub malformed: usize,
    /// No snapshot existed; nothing was overlaid.
    pub absent: bool,
}

/// Shared pin bank backed by a durable snapshot.
pub struct PinStore<P> {
    port: P,
    pin_count: usize,
    bank: RwLock<PinBank>,
}

impl PinStore<FileSnapshot> {
    /// Open the store described by `config` on its snapshot file.
    pub fn open(config: &SimConfig) -> Self {
        Self::new(config.pin_count, FileSnapshot::new(&config.snapshot_path))
    }
}

impl<P: SnapshotPort> PinStore<P> {
    /// Allocate `pin_count` unconfigured pins and overlay the snapshot.
    ///
    /// Never fails: a missing snapshot means "no overlay", and an unreadable
    /// one is logged and treated the same way.
    pub fn new(pin_count: usize, port: P) -> Self {
        let store = Self {
            port,
            pin_count,
            bank: RwLock::new(PinBank::new(pin_count)),
        };

        match store.reload() {
            Ok(report) if report.absent => {
                info!("PinStore: no snapshot yet, {} pins unconfigured", pin_count);
            }
            Ok(report) => {
                info!(
                    "PinStore: loaded {}/{} pins from snapshot ({} malformed)",
                    report.applied, pin_count, report.malformed
                );
            }
            Err(e) => {
                warn!("PinStore: {}, starting with unconfigured pins", e);
            }
        }
        store
    }

    /// Number of pins in the bank. Fixed for the store's lifetime.
    pub fn pin_count(&self) -> usize {
        self.pin_count
    }

    /// The snapshot backend.
    pub fn port(&self) -> &P {
        &self.port
    }

    // ── Reload ────────────────────────────────────────────────

    /// Re-read the snapshot and overlay it onto the bank.
    ///
    /// Indices beyond the snapshot's record count, or with malformed
    /// records, keep their current state. Records beyond `pin_count` are
    /// ignored. On a read error the bank is untouched.
    pub fn reload(&self) -> Result<ReloadReport> {
        let Some(text) = self.port.load()? else {
            return Ok(ReloadReport {
                absent: true,
                ..ReloadReport::default()
            });
        };

        let decoded = codec::decode(&text);
        if decoded.len() > self.pin_count {
            debug!(
                "PinStore: ignoring {} snapshot records beyond the {}-pin bank",
                decoded.len() - self.pin_count,
                self.pin_count
            );
        }
        let malformed = decoded
            .records()
            .iter()
            .take(self.pin_count)
            .filter(|r| r.is_none())
            .count();

        let applied = {
            let mut guard = self.write_bank();
            let mut next = guard.clone();
            let applied = next.overlay(decoded.records());
            *guard = next;
            applied
        };

        if malformed > 0 {
            debug!("PinStore: skipped {} malformed snapshot records", malformed);
        }
        Ok(ReloadReport {
            applied,
            malformed,
            absent: false,
        })
    }

    // ── Mutations ─────────────────────────────────────────────

    /// Configure a pin, keeping its current level, and persist the bank.
    pub fn set_mode(&self, index: usize, mode: PinMode) -> Result<()> {
        self.mutate(index, |pin| {
            pin.mode = mode;
            Ok(())
        })
    }

    /// Drive an output pin and persist the bank. Any nonzero value is HIGH.
    ///
    /// Pins that are not [`PinMode::Output`] are left unchanged and the call
    /// fails with [`Error::NotOutput`].
    pub fn write(&self, index: usize, value: impl Into<u32>) -> Result<()> {
        let level = level_from_value(value.into());
        self.mutate(index, |pin| {
            if pin.mode != PinMode::Output {
                return Err(Error::NotOutput {
                    pin: index,
                    mode: pin.mode,
                });
            }
            pin.level = level;
            Ok(())
        })
    }

    /// Apply `op` to a copy of the bank, persist it, then swap it in.
    fn mutate(&self, index: usize, op: impl FnOnce(&mut Pin) -> Result<()>) -> Result<()> {
        if index >= self.pin_count {
            debug!(
                "PinStore: ignoring pin {} (bank has {} pins)",
                index, self.pin_count
            );
            return Ok(());
        }

        let mut guard = self.write_bank();
        let mut next = guard.clone();
        if let Some(pin) = next.get_mut(index) {
            op(pin)?;
        }
        self.port.store(&codec::encode(next.as_slice()))?;
        *guard = next;
        Ok(())
    }

    // ── Queries ───────────────────────────────────────────────

    /// Level of a pin as 0/1. Out-of-range pins read 0.
    pub fn read(&self, index: usize) -> u8 {
        level_bit(self.level(index))
    }

    /// Level of a pin. Out-of-range pins read LOW.
    pub fn level(&self, index: usize) -> PinState {
        self.pin(index).map_or(PinState::Low, |p| p.level)
    }

    pub fn mode(&self, index: usize) -> Option<PinMode> {
        self.pin(index).map(|p| p.mode)
    }

    pub fn pin(&self, index: usize) -> Option<Pin> {
        self.read_bank().get(index)
    }

    /// Copy of the whole bank.
    pub fn snapshot(&self) -> PinBank {
        self.read_bank().clone()
    }

    // ── Internal ──────────────────────────────────────────────

    fn read_bank(&self) -> RwLockReadGuard<'_, PinBank> {
        self.bank.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_bank(&self) -> RwLockWriteGuard<'_, PinBank> {
        self.bank.write().unwrap_or_else(PoisonError::into_inner)
    }
}
