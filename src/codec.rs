//! Text codec for the durable pin snapshot.
//!
//! One record per pin, in index order:
//!
//! ```text
//! <mode> <value>\n      mode: 0 = unconfigured, 1 = output, 2 = input
//!                       value: 0 | 1
//! ```
//!
//! Decoding is tolerant: a line that is not exactly two in-range integers is
//! recorded as a gap at its index and decoding carries on with the next line.

use core::fmt::Write as _;

use embedded_hal::digital::PinState;

use crate::pins::{Pin, PinMode};

/// Encode pins as snapshot text.
pub fn encode(pins: &[Pin]) -> String {
    let mut out = String::with_capacity(pins.len() * 4);
    for pin in pins {
        // Writing into a String cannot fail.
        let _ = writeln!(out, "{} {}", pin.mode.code(), pin.value());
    }
    out
}

/// Decode snapshot text. Never fails; malformed lines become `None` records.
pub fn decode(text: &str) -> DecodedSnapshot {
    let records: Vec<Option<Pin>> = text.lines().map(decode_line).collect();
    DecodedSnapshot { records }
}

/// Parse a single record.
pub fn decode_line(line: &str) -> Option<Pin> {
    let mut fields = line.split_whitespace();
    let mode = fields.next()?.parse::<i64>().ok()?;
    let value = fields.next()?.parse::<i64>().ok()?;
    if fields.next().is_some() {
        return None;
    }

    let mode = PinMode::from_code(mode)?;
    let level = match value {
        0 => PinState::Low,
        1 => PinState::High,
        _ => return None,
    };
    Some(Pin::new(mode, level))
}

/// Result of decoding a snapshot: one entry per line, in index order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodedSnapshot {
    records: Vec<Option<Pin>>,
}

impl DecodedSnapshot {
    /// Snapshot with no records (absent file).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of lines seen, malformed ones included.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Well-formed record at `index`, if any.
    pub fn get(&self, index: usize) -> Option<Pin> {
        self.records.get(index).copied().flatten()
    }

    pub fn records(&self) -> &[Option<Pin>] {
        &self.records
    }

    /// Count of skipped lines.
    pub fn malformed(&self) -> usize {
        self.records.iter().filter(|r| r.is_none()).count()
    }
}
