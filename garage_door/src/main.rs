//! # Garage Door Controller Binary
//!
//! Polls the door sensors on a heartbeat and operates the opener relay.
//!
//! # Usage
//!
//! ```bash
//! # Heartbeat loop with the simulated port
//! garage_door --config garage.toml --mock
//!
//! # One-shot commands
//! garage_door --config garage.toml status
//! garage_door --config garage.toml open
//! garage_door --config garage.toml force-open
//!
//! # Verbose JSON logs
//! garage_door -c garage.toml -v --json run
//! ```

use clap::{Parser, Subcommand};
use garage_common::config::{AppConfig, ConfigError};
use garage_common::consts::DEFAULT_CONFIG_PATH;
use garage_common::door::codes::{
    contact_state_code, current_door_state_code, target_door_state_code,
};
use garage_common::door::types::StateRecord;
use garage_door::{CommandOutcome, GarageDoorController};
use garage_hal::PortRegistry;
use garage_hal::drivers::simulation;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;
use tracing::{error, info, warn, Level};
use tracing_subscriber::EnvFilter;

/// Garage door controller - reed switch state inference and relay control
#[derive(Parser, Debug)]
#[command(name = "garage_door")]
#[command(author = "RTS007")]
#[command(version)]
#[command(about = "Garage door state inference, obstruction detection and relay control")]
#[command(long_about = None)]
struct Args {
    /// Path to garage.toml. Defaults are used if the file does not exist.
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Force the simulated port
    #[arg(short, long)]
    mock: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    /// Poll on the heartbeat until Ctrl-C (default)
    Run,
    /// Poll once and print the door status
    Status,
    /// Toggle the door unless it is moving
    Open,
    /// Pulse the relay unconditionally
    ForceOpen,
    /// Pulse the relay unless the door is closed
    Close,
}

/// One status line on stdout.
#[derive(Debug, Serialize)]
struct StatusReport<'a> {
    door: &'a str,
    state: &'static str,
    current_door_state: Option<u8>,
    target_door_state: Option<u8>,
    open_contact: Option<u8>,
    close_contact: Option<u8>,
    motion_detected: Option<bool>,
    obstruction: bool,
}

impl<'a> StatusReport<'a> {
    fn new(controller: &'a GarageDoorController, record: Option<&StateRecord>) -> Self {
        let state = controller.current_door_state();
        Self {
            door: controller.name(),
            state: state.label(),
            current_door_state: current_door_state_code(state),
            target_door_state: record.map(|r| target_door_state_code(r.target)),
            open_contact: record.map(|r| contact_state_code(r.open_contact)),
            close_contact: record.map(|r| contact_state_code(r.close_contact)),
            motion_detected: record.map(|r| r.motion_detected),
            obstruction: controller.current_obstruction(),
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    if let Err(e) = run() {
        error!("Garage door controller failed: {}", e);
        std::process::exit(1);
    }
    Ok(())
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let loaded = load_config(&args);

    let default_level = loaded
        .as_ref()
        .map(|c| Level::from(c.shared.log_level))
        .unwrap_or(Level::INFO);
    setup_tracing(&args, default_level);

    info!("Garage door controller v{} starting...", env!("CARGO_PKG_VERSION"));

    let mut config = loaded?;
    if args.mock {
        config.door.mock = true;
    }
    info!("Service: {}", config.shared.service_name);
    info!("Configuration: {:?}", config.door);

    let registry = PortRegistry::with_builtin_ports();
    let port_name = if config.door.mock {
        warn!("Running controller in MOCK mode");
        simulation::PORT_NAME
    } else {
        "gpio"
    };
    let port = registry.create_port(port_name, &config.door).map_err(|e| {
        format!("{e} (available: {:?}; build with --features rpi or use --mock)", registry.list_ports())
    })?;

    let mut controller = GarageDoorController::new(&config.door, port);
    if !controller.is_initialized() {
        warn!("Controller is not initialized; commands will be ignored");
    }

    match args.command.unwrap_or(Command::Run) {
        Command::Run => heartbeat(&mut controller, &config)?,
        Command::Status => {
            let record = controller.poll();
            print_status(&controller, record.as_ref())?;
        }
        Command::Open => command(&mut controller, GarageDoorController::open)?,
        Command::ForceOpen => command(&mut controller, GarageDoorController::force_open)?,
        Command::Close => command(&mut controller, GarageDoorController::close)?,
    }

    controller.shutdown();
    info!("Garage door controller shutdown complete");
    Ok(())
}

/// Load garage.toml; a missing file falls back to defaults.
fn load_config(args: &Args) -> Result<AppConfig, ConfigError> {
    match AppConfig::load_validated(&args.config) {
        Err(ConfigError::FileNotFound) => {
            // Tracing is not up yet; the defaults are logged after setup.
            Ok(AppConfig::default())
        }
        other => other,
    }
}

/// Poll until Ctrl-C, logging each state change.
fn heartbeat(
    controller: &mut GarageDoorController,
    config: &AppConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let running = Arc::new(AtomicBool::new(true));
    let flag = Arc::clone(&running);
    ctrlc::set_handler(move || {
        info!("Received shutdown signal");
        flag.store(false, Ordering::SeqCst);
    })?;

    let interval = config.door.heartbeat_interval();
    info!("Heartbeat is enabled at {}ms", interval.as_millis());

    while running.load(Ordering::SeqCst) {
        let cycle_start = Instant::now();

        if let Some(record) = controller.poll() {
            info!(
                "Heartbeat detected: {} is {}",
                controller.name(),
                record.label
            );
            print_status(controller, Some(&record))?;
        }

        let elapsed = cycle_start.elapsed();
        if elapsed < interval {
            std::thread::sleep(interval - elapsed);
        }
    }
    Ok(())
}

/// Issue one command, wait for the pulse to finish, print the outcome.
fn command(
    controller: &mut GarageDoorController,
    action: fn(&mut GarageDoorController) -> CommandOutcome,
) -> Result<(), Box<dyn std::error::Error>> {
    let outcome = action(controller);
    controller.wait_for_pulse();
    info!("{}: {:?}", controller.name(), outcome);
    println!("{}", serde_json::to_string(&outcome)?);
    Ok(())
}

fn print_status(
    controller: &GarageDoorController,
    record: Option<&StateRecord>,
) -> Result<(), Box<dyn std::error::Error>> {
    println!(
        "{}",
        serde_json::to_string(&StatusReport::new(controller, record))?
    );
    Ok(())
}

/// Setup tracing subscriber based on CLI arguments.
fn setup_tracing(args: &Args, default_level: Level) {
    let level = if args.verbose {
        Level::DEBUG
    } else {
        default_level
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    if args.json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
