//! Pin drivers over the simulated store.

pub mod sim_pin;

pub use sim_pin::SimPin;
