//! pinmon — live chart of simulated pin levels.
//!
//! Polls the snapshot file on a fixed period and redraws a text chart of
//! the monitored pins until interrupted (Ctrl+C / SIGTERM) or until the
//! optional duration elapses.

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use signal_hook::consts::{SIGINT, SIGTERM};

use pinsim::adapters::console_log;
use pinsim::adapters::json_config::JsonConfigFile;
use pinsim::adapters::text_chart::TextChart;
use pinsim::adapters::time::UptimeClock;
use pinsim::app::ports::{ChartSink, ConfigPort};
use pinsim::monitor::Monitor;
use pinsim::{PinStore, SimConfig};

/// Longest single sleep, so shutdown stays responsive at slow refresh rates.
const MAX_NAP: Duration = Duration::from_millis(100);

#[derive(Parser)]
#[command(name = "pinmon")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Chart simulated GPIO pin levels over time")]
struct Cli {
    /// JSON configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Pin state snapshot (overrides the configuration)
    #[arg(short, long, value_name = "FILE")]
    state_file: Option<PathBuf>,

    /// Number of pins in the bank (overrides the configuration)
    #[arg(short, long, value_name = "N")]
    pins: Option<usize>,

    /// Pins to chart, comma separated
    #[arg(short, long, value_delimiter = ',', value_name = "PINS")]
    monitor: Vec<usize>,

    /// Poll period in milliseconds
    #[arg(long, value_name = "MS")]
    interval_ms: Option<u64>,

    /// Samples kept per pin
    #[arg(long, value_name = "N")]
    cap: Option<usize>,

    /// Chart redraw period in milliseconds
    #[arg(long, value_name = "MS")]
    refresh_ms: Option<u64>,

    /// Stop after this many seconds
    #[arg(short, long, value_name = "SECS")]
    duration_secs: Option<u64>,

    /// Chart width in samples
    #[arg(short, long, default_value_t = 60)]
    width: usize,

    /// Append frames instead of redrawing the screen
    #[arg(long)]
    no_clear: bool,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    console_log::init(console_log::level_for_verbosity(cli.verbose))
        .context("logger init failed")?;

    let config = load_config(&cli)?;

    let shutdown = Arc::new(AtomicBool::new(false));
    signal_hook::flag::register(SIGINT, Arc::clone(&shutdown))
        .context("installing SIGINT handler")?;
    signal_hook::flag::register(SIGTERM, Arc::clone(&shutdown))
        .context("installing SIGTERM handler")?;

    let store = Arc::new(PinStore::open(&config));
    let mut monitor = Monitor::from_config(store, UptimeClock::new(), &config);
    let mut chart: Box<dyn ChartSink> = if cli.no_clear {
        Box::new(TextChart::new(std::io::stdout(), cli.width))
    } else {
        Box::new(TextChart::stdout(cli.width))
    };

    monitor.start()?;
    let started = Instant::now();
    let deadline = cli.duration_secs.map(Duration::from_secs);
    let refresh = config.chart_refresh();
    let mut next_draw = started;

    while !shutdown.load(Ordering::Relaxed) {
        if deadline.is_some_and(|d| started.elapsed() >= d) {
            break;
        }
        let now = Instant::now();
        if now >= next_draw {
            chart.draw(&monitor.history());
            next_draw = now + refresh;
        }
        thread::sleep(next_draw.saturating_duration_since(Instant::now()).min(MAX_NAP));
    }

    monitor.stop();
    chart.draw(&monitor.history());
    info!("pinmon: exiting after {} polls", monitor.tick_count());
    Ok(())
}

fn load_config(cli: &Cli) -> Result<SimConfig> {
    let mut config = match &cli.config {
        Some(path) => JsonConfigFile::new(path)
            .load()
            .with_context(|| format!("loading {}", path.display()))?,
        None => SimConfig::default(),
    };
    if let Some(path) = &cli.state_file {
        config.snapshot_path.clone_from(path);
    }
    if let Some(pins) = cli.pins {
        config.pin_count = pins;
        config.monitor_pins.retain(|&p| p < pins);
    }
    if !cli.monitor.is_empty() {
        config.monitor_pins.clone_from(&cli.monitor);
    }
    if let Some(ms) = cli.interval_ms {
        config.poll_interval_ms = ms;
    }
    if let Some(cap) = cli.cap {
        config.history_cap = cap;
    }
    if let Some(ms) = cli.refresh_ms {
        config.chart_refresh_ms = ms;
    }
    config.validate().context("invalid configuration")?;
    info!(
        "Charting pins {:?} of {} every {} ms",
        config.monitor_pins,
        config.snapshot_path.display(),
        config.poll_interval_ms
    );
    Ok(config)
}
