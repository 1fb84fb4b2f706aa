//! Polling signal monitor.
//!
//! ```text
//!            start()                     every period:
//!   Idle ─────────────▶ Polling   ┌──────────────────────────────┐
//!    ▲                    │       │ 1. store.reload()            │
//!    └────────────────────┘       │ 2. timestamp                 │
//!            stop()               │ 3. sample monitored pins     │
//!                                 │ 4. evict beyond cap          │
//!                                 └──────────────────────────────┘
//! ```
//!
//! The monitor never assumes it shares memory with the writer: each tick
//! re-reads the snapshot, so writes by another process show up at most one
//! period later.
//!
//! The history sits behind a mutex. The polling thread holds it only for the
//! append-and-evict step; renderers take either a copy
//! ([`Monitor::history`]) or a scoped read ([`Monitor::with_history`]), so a
//! chart can never observe columns of different lengths.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use log::{debug, error, info, trace, warn};

use crate::app::ports::{ClockPort, SnapshotPort};
use crate::config::SimConfig;
use crate::error::{Error, Result};
use crate::store::PinStore;

use super::history::{HistorySnapshot, SampleHistory};

/// Polling thread stack size. The loop holds no large buffers.
const WORKER_STACK_KB: usize = 64;

/// Lifecycle of a [`Monitor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorState {
    Idle,
    Polling,
}

/// State shared between the owner and the polling thread.
struct Shared<P, C> {
    store: Arc<PinStore<P>>,
    clock: C,
    history: Mutex<SampleHistory>,
    ticks: AtomicU64,
}

impl<P, C> Shared<P, C> {
    fn history(&self) -> MutexGuard<'_, SampleHistory> {
        self.history.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<P: SnapshotPort, C: ClockPort> Shared<P, C> {
    /// One polling iteration. Returns the tick number.
    fn poll_once(&self) -> u64 {
        if let Err(e) = self.store.reload() {
            warn!("Monitor: reload failed ({}), sampling last-known state", e);
        }
        // One consistent bank per tick, read outside the history lock.
        let bank = self.store.snapshot();
        let now = self.clock.now_secs();

        self.history()
            .record(now, |pin| bank.get(pin).map_or(0, |p| p.value()));

        let tick = self.ticks.fetch_add(1, Ordering::Relaxed) + 1;
        trace!("Monitor: tick {} at {:.3}s", tick, now);
        tick
    }
}

/// Handle on a running polling thread.
struct Worker {
    stop_tx: Sender<()>,
    handle: JoinHandle<()>,
}

/// Samples monitored pins from a [`PinStore`] on a fixed period.
pub struct Monitor<P, C> {
    shared: Arc<Shared<P, C>>,
    period: Duration,
    worker: Option<Worker>,
}

impl<P, C> Monitor<P, C>
where
    P: SnapshotPort + 'static,
    C: ClockPort + 'static,
{
    /// Idle monitor sampling `pins` every `period`, keeping `cap` samples.
    pub fn new(
        store: Arc<PinStore<P>>,
        clock: C,
        pins: &[usize],
        cap: usize,
        period: Duration,
    ) -> Self {
        Self {
            shared: Arc::new(Shared {
                store,
                clock,
                history: Mutex::new(SampleHistory::new(pins, cap)),
                ticks: AtomicU64::new(0),
            }),
            period,
            worker: None,
        }
    }

    /// Idle monitor using the pins, cap and period from `config`.
    pub fn from_config(store: Arc<PinStore<P>>, clock: C, config: &SimConfig) -> Self {
        Self::new(
            store,
            clock,
            &config.monitor_pins,
            config.history_cap,
            config.poll_interval(),
        )
    }

    /// Begin polling on a dedicated thread. No-op while already polling.
    ///
    /// The first sample is taken immediately.
    pub fn start(&mut self) -> Result<()> {
        if self.worker.is_some() {
            debug!("Monitor: start ignored, already polling");
            return Ok(());
        }

        let (stop_tx, stop_rx) = mpsc::channel();
        let shared = Arc::clone(&self.shared);
        let period = self.period;

        info!(
            "Spawning 'pin-monitor' (period={}ms, stack={}KB)",
            period.as_millis(),
            WORKER_STACK_KB
        );
        let handle = thread::Builder::new()
            .name("pin-monitor".into())
            .stack_size(WORKER_STACK_KB * 1024)
            .spawn(move || poll_loop(&shared, period, &stop_rx))
            .map_err(|e| {
                error!("Monitor: polling thread spawn failed: {}", e);
                Error::Init("monitor thread spawn failed")
            })?;

        self.worker = Some(Worker { stop_tx, handle });
        Ok(())
    }

    /// Run a single polling iteration on the calling thread.
    pub fn poll_once(&self) -> u64 {
        self.shared.poll_once()
    }
}

impl<P, C> Monitor<P, C> {
    /// Stop polling. No-op while idle.
    ///
    /// Blocks until the in-flight iteration, if any, has finished; no sample
    /// is appended after this returns.
    pub fn stop(&mut self) {
        let Some(Worker { stop_tx, handle }) = self.worker.take() else {
            return;
        };

        // Dropping the sender wakes the worker out of its period wait.
        drop(stop_tx);
        if handle.join().is_err() {
            error!("Monitor: polling thread panicked");
        }
        info!("Monitor: stopped after {} ticks", self.tick_count());
    }

    pub fn state(&self) -> MonitorState {
        if self.worker.is_some() {
            MonitorState::Polling
        } else {
            MonitorState::Idle
        }
    }

    pub fn is_polling(&self) -> bool {
        self.state() == MonitorState::Polling
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Polling iterations completed so far.
    pub fn tick_count(&self) -> u64 {
        self.shared.ticks.load(Ordering::Relaxed)
    }

    /// Store being sampled.
    pub fn store(&self) -> &Arc<PinStore<P>> {
        &self.shared.store
    }

    /// Copy of the current history, safe to render at leisure.
    pub fn history(&self) -> HistorySnapshot {
        self.shared.history().snapshot()
    }

    /// Exclusive read of the live history. Polling waits while `f` runs.
    pub fn with_history<R>(&self, f: impl FnOnce(&SampleHistory) -> R) -> R {
        f(&self.shared.history())
    }
}

impl<P, C> Drop for Monitor<P, C> {
    fn drop(&mut self) {
        self.stop();
    }
}

fn poll_loop<P: SnapshotPort, C: ClockPort>(
    shared: &Shared<P, C>,
    period: Duration,
    stop_rx: &Receiver<()>,
) {
    loop {
        shared.poll_once();
        match stop_rx.recv_timeout(period) {
            Err(RecvTimeoutError::Timeout) => {}
            Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
        }
    }
}
