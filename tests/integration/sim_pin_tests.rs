//! Integration tests for the `embedded-hal` pin driver.
//!
//! Drives a pin the way firmware would and checks that the monitor and a
//! second store observe the result through the snapshot file.

use std::sync::Arc;
use std::time::Duration;

use embedded_hal::digital::{InputPin, OutputPin, PinState, StatefulOutputPin};
use pinsim::adapters::file_snapshot::FileSnapshot;
use pinsim::drivers::SimPin;
use pinsim::monitor::Monitor;
use pinsim::{Error, PinMode, PinStore};
use tempfile::TempDir;

use super::mock_ports::ManualClock;

/// Firmware-style blink, generic over any output pin.
fn blink<O: OutputPin>(pin: &mut O, times: usize) -> Result<(), O::Error> {
    for _ in 0..times {
        pin.set_high()?;
        pin.set_low()?;
    }
    pin.set_high()
}

#[test]
fn firmware_blink_is_visible_to_other_processes() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("fw.state");
    let store = Arc::new(PinStore::new(4, FileSnapshot::new(&path)));

    let mut led = SimPin::new(Arc::clone(&store), 1)
        .into_output(PinState::Low)
        .unwrap();
    blink(&mut led, 3).unwrap();

    let observer = PinStore::new(4, FileSnapshot::new(&path));
    assert_eq!(observer.mode(1), Some(PinMode::Output));
    assert_eq!(observer.read(1), 1);
}

#[test]
fn monitor_samples_driver_writes() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("fw.state");
    let fw_store = Arc::new(PinStore::new(4, FileSnapshot::new(&path)));
    let mon_store = Arc::new(PinStore::new(4, FileSnapshot::new(&path)));
    let clock = ManualClock::new();
    let monitor = Monitor::new(mon_store, clock.clone(), &[0], 10, Duration::from_millis(50));

    let mut pin = SimPin::new(fw_store, 0).into_output(PinState::High).unwrap();
    monitor.poll_once();
    clock.advance_ms(500);
    pin.toggle().unwrap();
    monitor.poll_once();

    assert_eq!(monitor.history().values(0), Some(&[1, 0][..]));
}

#[test]
fn input_pin_rejects_writes_but_reads() {
    let dir = TempDir::new().unwrap();
    let store = Arc::new(PinStore::new(2, FileSnapshot::new(dir.path().join("fw.state"))));
    let mut button = SimPin::new(Arc::clone(&store), 0).into_input().unwrap();

    assert_eq!(
        button.set_high(),
        Err(Error::NotOutput {
            pin: 0,
            mode: PinMode::Input
        })
    );
    assert!(button.is_low().unwrap());
    assert!(!button.is_set_high().unwrap());
}
