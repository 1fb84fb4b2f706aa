//! Fuzz target: `PinStore` mutations interleaved with foreign snapshots
//!
//! Interprets the input as a little program of 3-byte ops against an
//! 8-pin store backed by memory. Opcode 3 replaces the snapshot with the
//! remaining bytes and reloads.
//!
//! Invariants checked:
//! - No panics
//! - The bank always has 8 pins
//! - Writes succeed exactly when the pin is an output (or out of range)
//! - Out-of-range reads are always 0
//!
//! cargo fuzz run fuzz_store_reload

#![no_main]

use libfuzzer_sys::fuzz_target;
use pinsim::adapters::memory_snapshot::MemorySnapshot;
use pinsim::{PinMode, PinStore};

const PINS: usize = 8;

fuzz_target!(|data: &[u8]| {
    let snap = MemorySnapshot::new();
    let store = PinStore::new(PINS, snap.clone());

    let mut rest = data;
    while let [op, pin, arg, tail @ ..] = rest {
        rest = tail;
        let pin = usize::from(*pin % 12);
        match op % 4 {
            0 => {
                let mode = PinMode::ALL[usize::from(*arg % 3)];
                let _ = store.set_mode(pin, mode);
            }
            1 => {
                let is_output = store.mode(pin).is_none_or(|m| m == PinMode::Output);
                assert_eq!(store.write(pin, u32::from(*arg)).is_ok(), is_output);
            }
            2 => {
                let v = store.read(pin);
                assert!(v <= 1);
                if pin >= PINS {
                    assert_eq!(v, 0);
                }
            }
            _ => {
                snap.replace(&String::from_utf8_lossy(tail));
                let _ = store.reload();
                rest = &[];
            }
        }
        assert_eq!(store.snapshot().len(), PINS);
    }
});
