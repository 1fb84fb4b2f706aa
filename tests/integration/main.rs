//! Integration test driver for `tests/integration/` submodules.
//!
//! Each `mod` below maps to a file that exercises one subsystem through the
//! public API, against mock adapters or temporary snapshot files.

mod mock_ports;
mod monitor_tests;
mod panel_tests;
mod sim_pin_tests;
mod store_tests;
