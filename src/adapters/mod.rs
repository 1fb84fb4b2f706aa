//! Adapters — concrete implementations of the port traits.
//!
//! | Adapter           | Implements     | Connects to                   |
//! |-------------------|----------------|-------------------------------|
//! | `file_snapshot`   | SnapshotPort   | Snapshot text file            |
//! | `memory_snapshot` | SnapshotPort   | Shared in-memory text         |
//! | `json_config`     | ConfigPort     | JSON configuration file       |
//! | `log_sink`        | EventSink      | `log` facade                  |
//! | `time`            | ClockPort      | Monotonic clock               |
//! | `text_chart`      | ChartSink      | Terminal                      |
//! | `console_log`     | `log::Log`     | stderr                        |

pub mod console_log;
pub mod file_snapshot;
pub mod json_config;
pub mod log_sink;
pub mod memory_snapshot;
pub mod text_chart;
pub mod time;
