//! Signal monitor: time-driven sampling of a pin store into a bounded
//! history for charting.

pub mod history;
pub mod sampler;

pub use history::{HistorySnapshot, SampleHistory};
pub use sampler::{Monitor, MonitorState};
