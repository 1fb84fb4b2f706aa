//! Integration tests for the file-backed pin store.
//!
//! Every test works on its own temporary directory, so stores with
//! different sizes and paths run side by side.

use std::fs;
use std::sync::Arc;
use std::thread;

use embedded_hal::digital::PinState;
use pinsim::adapters::file_snapshot::FileSnapshot;
use pinsim::{Error, PersistError, Pin, PinMode, PinStore, SimConfig};
use tempfile::TempDir;

fn store_in(dir: &TempDir, pins: usize) -> PinStore<FileSnapshot> {
    PinStore::new(pins, FileSnapshot::new(dir.path().join("pins.state")))
}

#[test]
fn state_survives_into_a_fresh_store() {
    let dir = TempDir::new().unwrap();
    let first = store_in(&dir, 8);
    first.set_mode(3, PinMode::Output).unwrap();
    first.write(3, 1u8).unwrap();

    let second = store_in(&dir, 8);
    assert_eq!(second.mode(3), Some(PinMode::Output));
    assert_eq!(second.read(3), 1);
}

#[test]
fn snapshot_file_uses_line_format() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir, 3);
    store.set_mode(1, PinMode::Output).unwrap();
    store.write(1, 5u32).unwrap();
    store.set_mode(2, PinMode::Input).unwrap();

    let text = fs::read_to_string(dir.path().join("pins.state")).unwrap();
    assert_eq!(text, "0 0\n1 1\n2 0\n");
}

#[test]
fn missing_snapshot_means_unconfigured_bank() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir, 50);
    assert_eq!(store.snapshot().len(), 50);
    assert!(store.snapshot().iter().all(|p| *p == Pin::default()));
    assert!(!dir.path().join("pins.state").exists());
}

#[test]
fn hand_edited_snapshot_with_garbage_is_tolerated() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("pins.state"),
        "1 1\nnot a pin\n2 1\n9 9\n1 0 extra\n",
    )
    .unwrap();

    let store = store_in(&dir, 6);
    assert_eq!(store.pin(0), Some(Pin::new(PinMode::Output, PinState::High)));
    assert_eq!(store.pin(1), Some(Pin::default()));
    assert_eq!(store.pin(2), Some(Pin::new(PinMode::Input, PinState::High)));
    assert_eq!(store.pin(3), Some(Pin::default()));
    assert_eq!(store.pin(4), Some(Pin::default()));
}

#[test]
fn second_store_sees_changes_after_reload() {
    let dir = TempDir::new().unwrap();
    let writer = store_in(&dir, 4);
    let reader = store_in(&dir, 4);

    writer.set_mode(0, PinMode::Output).unwrap();
    writer.write(0, 1u8).unwrap();
    assert_eq!(reader.read(0), 0, "no reload yet");

    let report = reader.reload().unwrap();
    assert_eq!(report.applied, 4);
    assert_eq!(reader.read(0), 1);
}

#[test]
fn stores_of_different_sizes_coexist() {
    let small_dir = TempDir::new().unwrap();
    let big_dir = TempDir::new().unwrap();
    let small = store_in(&small_dir, 2);
    let big = store_in(&big_dir, 64);

    big.set_mode(63, PinMode::Output).unwrap();
    small.set_mode(63, PinMode::Output).unwrap();

    assert_eq!(big.mode(63), Some(PinMode::Output));
    assert_eq!(small.mode(63), None);
    assert!(!small_dir.path().join("pins.state").exists());
}

#[test]
fn out_of_range_requests_leave_bank_and_file_alone() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir, 4);
    store.set_mode(0, PinMode::Output).unwrap();
    let before = fs::read_to_string(dir.path().join("pins.state")).unwrap();

    assert_eq!(store.read(4), 0);
    store.set_mode(4, PinMode::Output).unwrap();
    store.write(4, 1u8).unwrap();

    let after = fs::read_to_string(dir.path().join("pins.state")).unwrap();
    assert_eq!(before, after);
    assert_eq!(store.snapshot().len(), 4);
}

#[test]
fn missing_directory_reports_path_not_found() {
    let dir = TempDir::new().unwrap();
    let store = PinStore::new(
        2,
        FileSnapshot::new(dir.path().join("no-such-dir").join("pins.state")),
    );

    let err = store.set_mode(0, PinMode::Output).unwrap_err();
    assert_eq!(err, Error::Persist(PersistError::PathNotFound));
    assert_eq!(store.mode(0), Some(PinMode::Unconfigured));
}

#[cfg(unix)]
#[test]
fn read_only_snapshot_rejects_mutations() {
    use std::os::unix::fs::PermissionsExt;

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("pins.state");
    fs::write(&path, "0 0\n").unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o444)).unwrap();
    if fs::OpenOptions::new().write(true).open(&path).is_ok() {
        // Privileged user, file modes are not enforced.
        return;
    }

    let store = store_in(&dir, 1);
    let err = store.set_mode(0, PinMode::Output).unwrap_err();

    assert_eq!(err, Error::Persist(PersistError::PermissionDenied));
    assert_eq!(store.mode(0), Some(PinMode::Unconfigured));
    assert_eq!(fs::read_to_string(&path).unwrap(), "0 0\n");
    assert_eq!(
        fs::metadata(&path).unwrap().permissions().mode() & 0o777,
        0o444
    );
}

#[test]
fn open_uses_configured_path_and_size() {
    let dir = TempDir::new().unwrap();
    let config = SimConfig {
        pin_count: 5,
        snapshot_path: dir.path().join("cfg.state"),
        monitor_pins: vec![0],
        ..SimConfig::default()
    };
    let store = PinStore::open(&config);
    store.set_mode(4, PinMode::Input).unwrap();

    assert_eq!(store.pin_count(), 5);
    assert_eq!(
        fs::read_to_string(&config.snapshot_path).unwrap(),
        "0 0\n0 0\n0 0\n0 0\n2 0\n"
    );
}

#[test]
fn concurrent_readers_never_see_partial_banks() {
    let dir = TempDir::new().unwrap();
    let store = Arc::new(store_in(&dir, 16));
    for i in 0..16 {
        store.set_mode(i, PinMode::Output).unwrap();
    }

    let writer = {
        let store = Arc::clone(&store);
        thread::spawn(move || {
            for round in 0..50u32 {
                for i in 0..16 {
                    store.write(i, round % 2).unwrap();
                }
            }
        })
    };

    for _ in 0..200 {
        let bank = store.snapshot();
        assert_eq!(bank.len(), 16);
        assert!(bank.iter().all(|p| p.mode == PinMode::Output));
    }
    writer.join().unwrap();
}
