//! Simulated pin model: modes, pins, and the fixed-size pin bank.
//!
//! Pin levels use [`embedded_hal::digital::PinState`] so the simulation
//! speaks the same vocabulary as real digital I/O drivers.

use core::fmt;
use core::str::FromStr;

use embedded_hal::digital::PinState;

// ---------------------------------------------------------------------------
// Reference sizes
// ---------------------------------------------------------------------------

/// Pin count of the reference simulator board.
pub const DEFAULT_PIN_COUNT: usize = 50;

/// Pins charted by the signal monitor unless configured otherwise.
pub const DEFAULT_MONITOR_PINS: [usize; 5] = [0, 1, 2, 3, 4];

// ---------------------------------------------------------------------------
// Pin mode
// ---------------------------------------------------------------------------

/// Per-pin configuration. The discriminants are the on-disk codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum PinMode {
    #[default]
    Unconfigured = 0,
    Output = 1,
    Input = 2,
}

impl PinMode {
    pub const ALL: [Self; 3] = [Self::Unconfigured, Self::Output, Self::Input];

    /// Snapshot code for this mode.
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Inverse of [`code`](Self::code). Unknown codes yield `None`.
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(Self::Unconfigured),
            1 => Some(Self::Output),
            2 => Some(Self::Input),
            _ => None,
        }
    }

    /// Upper-case label shown on the control panel.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Unconfigured => "UNCONFIGURED",
            Self::Output => "OUTPUT",
            Self::Input => "INPUT",
        }
    }
}

impl fmt::Display for PinMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Accepts `output`/`out`/`1`, `input`/`in`/`2`, `unconfigured`/`none`/`0`,
/// case-insensitively.
impl FromStr for PinMode {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "0" | "unconfigured" | "none" | "off" => Ok(Self::Unconfigured),
            "1" | "output" | "out" => Ok(Self::Output),
            "2" | "input" | "in" => Ok(Self::Input),
            _ => Err("mode must be one of: unconfigured, output, input"),
        }
    }
}

// ---------------------------------------------------------------------------
// Levels
// ---------------------------------------------------------------------------

/// Snapshot bit for a level.
pub const fn level_bit(level: PinState) -> u8 {
    match level {
        PinState::Low => 0,
        PinState::High => 1,
    }
}

/// Any nonzero value is high.
pub fn level_from_value(value: u32) -> PinState {
    PinState::from(value != 0)
}

/// Panel label for a level.
pub const fn level_label(level: PinState) -> &'static str {
    match level {
        PinState::Low => "LOW",
        PinState::High => "HIGH",
    }
}

// ---------------------------------------------------------------------------
// Pin
// ---------------------------------------------------------------------------

/// One simulated digital pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pin {
    pub mode: PinMode,
    pub level: PinState,
}

impl Pin {
    pub const fn new(mode: PinMode, level: PinState) -> Self {
        Self { mode, level }
    }

    /// Level as 0/1.
    pub const fn value(&self) -> u8 {
        level_bit(self.level)
    }
}

impl Default for Pin {
    fn default() -> Self {
        Self::new(PinMode::Unconfigured, PinState::Low)
    }
}

// ---------------------------------------------------------------------------
// Pin bank
// ---------------------------------------------------------------------------

/// Fixed-size, index-stable sequence of pins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PinBank {
    pins: Vec<Pin>,
}

impl PinBank {
    /// `count` pins, all `(Unconfigured, Low)`.
    pub fn new(count: usize) -> Self {
        Self {
            pins: vec![Pin::default(); count],
        }
    }

    pub fn len(&self) -> usize {
        self.pins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pins.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Pin> {
        self.pins.get(index).copied()
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Pin> {
        self.pins.get_mut(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Pin> {
        self.pins.iter()
    }

    pub fn as_slice(&self) -> &[Pin] {
        &self.pins
    }

    /// Overlay decoded records index-for-index.
    ///
    /// Only `min(records.len(), self.len())` indices are considered, and
    /// `None` records (malformed lines) leave the pin untouched. Returns the
    /// number of pins replaced.
    pub fn overlay(&mut self, records: &[Option<Pin>]) -> usize {
        let mut applied = 0;
        for (slot, record) in self.pins.iter_mut().zip(records) {
            if let Some(pin) = record {
                *slot = *pin;
                applied += 1;
            }
        }
        applied
    }
}
