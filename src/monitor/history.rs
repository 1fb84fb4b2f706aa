//! Bounded sample history.
//!
//! One shared timestamp column plus one value column per monitored pin.
//! Every column always has the same length, and once the cap is exceeded
//! the oldest row is evicted from every column together.

use std::collections::VecDeque;

#[derive(Debug, Clone)]
struct PinSeries {
    pin: usize,
    values: VecDeque<u8>,
}

/// Rolling window of samples for a fixed set of pins.
#[derive(Debug, Clone)]
pub struct SampleHistory {
    cap: usize,
    timestamps: VecDeque<f64>,
    series: Vec<PinSeries>,
}

impl SampleHistory {
    /// History for `pins` (duplicates dropped, order kept) holding at most
    /// `cap` rows. A zero cap is raised to one.
    pub fn new(pins: &[usize], cap: usize) -> Self {
        let cap = cap.max(1);
        let mut series: Vec<PinSeries> = Vec::with_capacity(pins.len());
        for &pin in pins {
            if series.iter().all(|s| s.pin != pin) {
                series.push(PinSeries {
                    pin,
                    values: VecDeque::with_capacity(cap + 1),
                });
            }
        }
        Self {
            cap,
            timestamps: VecDeque::with_capacity(cap + 1),
            series,
        }
    }

    pub fn cap(&self) -> usize {
        self.cap
    }

    /// Rows currently held.
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// Monitored pins, in chart order.
    pub fn pins(&self) -> impl Iterator<Item = usize> + '_ {
        self.series.iter().map(|s| s.pin)
    }

    /// Append one row: `timestamp` plus `sample(pin)` for every pin, then
    /// evict from the front until the history is back at its cap.
    pub fn record(&mut self, timestamp: f64, mut sample: impl FnMut(usize) -> u8) {
        self.timestamps.push_back(timestamp);
        for s in &mut self.series {
            s.values.push_back(sample(s.pin));
        }

        while self.timestamps.len() > self.cap {
            self.timestamps.pop_front();
            for s in &mut self.series {
                s.values.pop_front();
            }
        }
    }

    pub fn timestamps(&self) -> &VecDeque<f64> {
        &self.timestamps
    }

    pub fn values(&self, pin: usize) -> Option<&VecDeque<u8>> {
        self.series.iter().find(|s| s.pin == pin).map(|s| &s.values)
    }

    /// Owned copy for rendering outside the lock.
    pub fn snapshot(&self) -> HistorySnapshot {
        HistorySnapshot {
            timestamps: self.timestamps.iter().copied().collect(),
            series: self
                .series
                .iter()
                .map(|s| (s.pin, s.values.iter().copied().collect()))
                .collect(),
        }
    }
}

/// Point-in-time copy of a [`SampleHistory`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistorySnapshot {
    pub timestamps: Vec<f64>,
    /// `(pin, values)` in chart order; every `values` matches `timestamps`
    /// in length.
    pub series: Vec<(usize, Vec<u8>)>,
}

impl HistorySnapshot {
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    pub fn pins(&self) -> impl Iterator<Item = usize> + '_ {
        self.series.iter().map(|(pin, _)| *pin)
    }

    pub fn values(&self, pin: usize) -> Option<&[u8]> {
        self.series
            .iter()
            .find(|(p, _)| *p == pin)
            .map(|(_, v)| v.as_slice())
    }

    /// `(timestamp, value)` pairs for one pin, oldest first.
    pub fn samples(&self, pin: usize) -> Option<Vec<(f64, u8)>> {
        self.values(pin)
            .map(|v| self.timestamps.iter().copied().zip(v.iter().copied()).collect())
    }

    pub fn latest(&self, pin: usize) -> Option<u8> {
        self.values(pin).and_then(|v| v.last().copied())
    }

    /// First and last timestamp.
    pub fn span(&self) -> Option<(f64, f64)> {
        Some((*self.timestamps.first()?, *self.timestamps.last()?))
    }
}
