//! pinctl — inspect and drive a simulated pin bank from the command line.
//!
//! Every command opens the store on the snapshot file, applies at most one
//! change, and exits; other processes sharing the file see the change on
//! their next reload. `shell` keeps a control panel open on stdin instead.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use log::info;

use pinsim::adapters::console_log;
use pinsim::adapters::json_config::JsonConfigFile;
use pinsim::adapters::log_sink::LogEventSink;
use pinsim::app::commands::PanelCommand;
use pinsim::app::panel::ControlPanel;
use pinsim::app::ports::{ConfigPort, SnapshotPort};
use pinsim::{PinMode, PinStore, SimConfig};

const DEFAULT_CONFIG_PATH: &str = "pinsim.json";

#[derive(Parser)]
#[command(name = "pinctl")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Inspect and drive simulated GPIO pins")]
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

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print every pin with its mode and level
    Show,

    /// Print one pin's level as 0 or 1
    Read { pin: usize },

    /// Drive an output pin; any nonzero value is HIGH
    Write { pin: usize, value: u32 },

    /// Flip an output pin
    Toggle { pin: usize },

    /// Configure a pin (unconfigured, output, input)
    SetMode { pin: usize, mode: PinMode },

    /// Interactive control panel on stdin
    Shell,

    /// Write a configuration file with default values
    InitConfig {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    console_log::init(console_log::level_for_verbosity(cli.verbose))
        .context("logger init failed")?;

    if let Commands::InitConfig { force } = cli.command {
        return init_config(cli.config.unwrap_or_else(|| DEFAULT_CONFIG_PATH.into()), force);
    }

    let config = load_config(&cli)?;
    let store = Arc::new(PinStore::open(&config));
    let mut panel = ControlPanel::new(Arc::clone(&store));
    let mut sink = LogEventSink::new();

    match cli.command {
        Commands::Show => print_rows(&panel, &mut io::stdout().lock())?,
        Commands::Read { pin } => println!("{}", store.read(pin)),
        Commands::Write { pin, value } => {
            panel.handle_command(PanelCommand::Write { pin, value }, &mut sink)?;
        }
        Commands::Toggle { pin } => {
            panel.handle_command(PanelCommand::Toggle(pin), &mut sink)?;
            if let Some(row) = panel.row(pin) {
                println!("{}", row.level_label());
            }
        }
        Commands::SetMode { pin, mode } => {
            panel.handle_command(PanelCommand::SetMode { pin, mode }, &mut sink)?;
        }
        Commands::Shell => shell(&mut panel, &mut sink)?,
        Commands::InitConfig { .. } => {}
    }
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
    config.validate().context("invalid configuration")?;
    info!(
        "Using {} pins on {}",
        config.pin_count,
        config.snapshot_path.display()
    );
    Ok(config)
}

fn init_config(path: PathBuf, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }
    JsonConfigFile::new(&path)
        .save(&SimConfig::default())
        .with_context(|| format!("writing {}", path.display()))?;
    println!("wrote {}", path.display());
    Ok(())
}

fn print_rows<P: SnapshotPort>(panel: &ControlPanel<P>, out: &mut impl Write) -> io::Result<()> {
    for row in panel.rows() {
        writeln!(out, "{:<20} {}", row.button_label(), row.level_label())?;
    }
    Ok(())
}

const SHELL_HELP: &str = "\
commands:
  show                 list every pin
  toggle <pin>         flip an output pin
  write <pin> <value>  drive an output pin
  mode <pin> <mode>    set unconfigured / output / input
  refresh              reload the snapshot
  quit";

/// Line-oriented control panel. Rejected operations are reported and the
/// shell carries on.
fn shell<P: SnapshotPort>(panel: &mut ControlPanel<P>, sink: &mut LogEventSink) -> Result<()> {
    let stdin = io::stdin();
    let mut out = io::stdout().lock();
    writeln!(out, "{}", SHELL_HELP)?;

    for line in stdin.lock().lines() {
        let line = line.context("reading stdin")?;
        let words: Vec<&str> = line.split_whitespace().collect();

        let cmd = match words.as_slice() {
            [] => continue,
            ["quit" | "exit" | "q"] => break,
            ["help" | "?"] => {
                writeln!(out, "{}", SHELL_HELP)?;
                continue;
            }
            ["show" | "ls"] => {
                print_rows(panel, &mut out)?;
                continue;
            }
            ["refresh" | "r"] => PanelCommand::Refresh,
            ["toggle" | "t", pin] => match pin.parse() {
                Ok(pin) => PanelCommand::Toggle(pin),
                Err(_) => {
                    writeln!(out, "bad pin: {}", pin)?;
                    continue;
                }
            },
            ["write" | "w", pin, value] => match (pin.parse(), value.parse()) {
                (Ok(pin), Ok(value)) => PanelCommand::Write { pin, value },
                _ => {
                    writeln!(out, "usage: write <pin> <value>")?;
                    continue;
                }
            },
            ["mode" | "m", pin, mode] => match (pin.parse(), mode.parse::<PinMode>()) {
                (Ok(pin), Ok(mode)) => PanelCommand::SetMode { pin, mode },
                (_, Err(msg)) => {
                    writeln!(out, "{}", msg)?;
                    continue;
                }
                (Err(_), _) => {
                    writeln!(out, "bad pin: {}", pin)?;
                    continue;
                }
            },
            _ => {
                writeln!(out, "unknown command, try 'help'")?;
                continue;
            }
        };

        match panel.handle_command(cmd, sink) {
            Ok(()) => match cmd {
                PanelCommand::Toggle(pin)
                | PanelCommand::Write { pin, .. }
                | PanelCommand::SetMode { pin, .. } => {
                    if let Some(row) = panel.row(pin) {
                        writeln!(out, "{:<20} {}", row.button_label(), row.level_label())?;
                    }
                }
                PanelCommand::Refresh => print_rows(panel, &mut out)?,
            },
            Err(e) => writeln!(out, "error: {}", e)?,
        }
    }
    Ok(())
}
