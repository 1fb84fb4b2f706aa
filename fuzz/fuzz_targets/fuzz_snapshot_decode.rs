//! Fuzz target: snapshot `decode` + `PinBank::overlay`
//!
//! Feeds arbitrary bytes (lossily decoded, as the file adapter does) through
//! the snapshot decoder and overlays the result onto a bank.
//!
//! Invariants checked:
//! - No panics under any byte sequence
//! - One record per line, malformed lines included
//! - Overlay never changes the bank's length
//! - Every well-formed record re-encodes to a line that decodes to itself
//!
//! cargo fuzz run fuzz_snapshot_decode

#![no_main]

use libfuzzer_sys::fuzz_target;
use pinsim::PinBank;
use pinsim::codec::{decode, decode_line, encode};

fuzz_target!(|data: &[u8]| {
    let text = String::from_utf8_lossy(data);
    let decoded = decode(&text);
    assert_eq!(decoded.len(), text.lines().count());

    // Bank size taken from the first byte so short and long banks are hit.
    let count = data.first().map_or(0, |b| usize::from(*b % 64));
    let mut bank = PinBank::new(count);
    let applied = bank.overlay(decoded.records());
    assert_eq!(bank.len(), count);
    assert!(applied <= count.min(decoded.len()));

    for i in 0..decoded.len() {
        if let Some(pin) = decoded.get(i) {
            let line = encode(&[pin]);
            assert_eq!(decode_line(line.trim_end()), Some(pin));
        }
    }
});
