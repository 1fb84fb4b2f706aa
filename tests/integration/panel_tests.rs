//! Integration tests for the control panel over a real snapshot file.

use std::sync::Arc;

use embedded_hal::digital::PinState;
use pinsim::adapters::file_snapshot::FileSnapshot;
use pinsim::app::commands::PanelCommand;
use pinsim::app::events::PinEvent;
use pinsim::app::panel::ControlPanel;
use pinsim::{Error, PinMode, PinStore};
use tempfile::TempDir;

use super::mock_ports::RecordingSink;

fn make_panel(dir: &TempDir, pins: usize) -> (ControlPanel<FileSnapshot>, RecordingSink) {
    let store = Arc::new(PinStore::new(
        pins,
        FileSnapshot::new(dir.path().join("panel.state")),
    ));
    (ControlPanel::new(store), RecordingSink::new())
}

#[test]
fn every_write_path_rejects_non_output_pins() {
    let dir = TempDir::new().unwrap();
    let (mut panel, mut sink) = make_panel(&dir, 4);
    panel
        .handle_command(
            PanelCommand::SetMode {
                pin: 2,
                mode: PinMode::Input,
            },
            &mut sink,
        )
        .unwrap();

    let toggle = panel.handle_command(PanelCommand::Toggle(2), &mut sink);
    let write = panel.handle_command(PanelCommand::Write { pin: 2, value: 1 }, &mut sink);
    let direct = panel.store().write(2, 1u8);

    for result in [toggle, write, direct] {
        assert_eq!(
            result,
            Err(Error::NotOutput {
                pin: 2,
                mode: PinMode::Input
            })
        );
    }
    assert_eq!(sink.warnings().len(), 2, "panel paths notify the operator");
    assert_eq!(panel.row(2).unwrap().level, PinState::Low);
}

#[test]
fn rows_follow_the_store_not_a_cache() {
    let dir = TempDir::new().unwrap();
    let (mut panel, mut sink) = make_panel(&dir, 2);
    panel.set_mode(0, PinMode::Output, &mut sink).unwrap();

    // Another process flips the pin behind the panel's back.
    let other = PinStore::new(2, FileSnapshot::new(dir.path().join("panel.state")));
    other.write(0, 1u8).unwrap();

    // The toggle reads the store's level, which is still LOW until reload.
    panel.toggle(0, &mut sink).unwrap();
    assert_eq!(panel.row(0).unwrap().level_label(), "HIGH");

    other.reload().unwrap();
    assert_eq!(other.read(0), 1);
}

#[test]
fn refresh_rebuilds_rows_from_external_writes() {
    let dir = TempDir::new().unwrap();
    let (mut panel, mut sink) = make_panel(&dir, 3);

    let other = PinStore::new(3, FileSnapshot::new(dir.path().join("panel.state")));
    other.set_mode(1, PinMode::Output).unwrap();
    other.write(1, 1u8).unwrap();
    assert_eq!(panel.row(1).unwrap().mode, PinMode::Unconfigured);

    panel.handle_command(PanelCommand::Refresh, &mut sink).unwrap();

    let row = panel.row(1).unwrap();
    assert_eq!(row.button_label(), "Pin 1: OUTPUT");
    assert_eq!(row.level_label(), "HIGH");
    assert_eq!(
        sink.last(),
        Some(&PinEvent::Reloaded {
            applied: 3,
            malformed: 0
        })
    );
}

#[test]
fn mode_changes_keep_the_level() {
    let dir = TempDir::new().unwrap();
    let (mut panel, mut sink) = make_panel(&dir, 1);
    panel.set_mode(0, PinMode::Output, &mut sink).unwrap();
    panel.toggle(0, &mut sink).unwrap();

    panel.set_mode(0, PinMode::Input, &mut sink).unwrap();

    let row = panel.row(0).unwrap();
    assert_eq!(row.button_label(), "Pin 0: INPUT");
    assert_eq!(row.level, PinState::High);
    assert!(sink.warnings().is_empty());
}
