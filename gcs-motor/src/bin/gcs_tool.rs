//! Command-line tool for PI GCS motion controllers.
//!
//! Subcommands:
//! - `info`: Identification, controller family and per-axis configuration
//! - `poll`: Print poll reports as JSON
//! - `move`: Move one axis and wait for it to settle
//! - `home`: Start a reference move
//! - `stop`: Halt one axis
//! - `pivot`: Set the Hexapod pivot point
//! - `repl`: Raw GCS console
//! - `errors`: Print the GCS error table

use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use gcs_motor::config::{DriverConfig, Endpoint};
use gcs_motor::pi::error_codes::{self, ERROR_TABLE};
use gcs_motor::pi::{MotionProfile, PiMotorController, PivotCoordinate, Poller};
use tracing::info;

/// Default serial baud rate of C-863/C-867 controllers
const DEFAULT_BAUD: u32 = 115200;

/// PI GCS motion controller tool
#[derive(Parser, Debug)]
#[command(name = "gcs_tool")]
#[command(about = "Control tool for PI GCS motion controllers")]
#[command(version)]
struct Args {
    /// JSON driver configuration; --tcp/--serial override its endpoint
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Controller address, `host` or `host:port`
    #[arg(long, global = true, conflicts_with = "serial")]
    tcp: Option<String>,

    /// Serial port, e.g. /dev/ttyUSB0
    #[arg(long, global = true)]
    serial: Option<String>,

    /// Serial baud rate
    #[arg(long, global = true, default_value_t = DEFAULT_BAUD)]
    baud: u32,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show identification and axis configuration
    Info,

    /// Print poll reports
    Poll {
        /// Number of reports to print
        #[arg(short, long, default_value = "1")]
        count: usize,
    },

    /// Move an axis (position in controller units)
    Move {
        /// Axis index (0-based)
        #[arg(short, long)]
        axis: usize,

        /// Target position, or distance with --relative
        #[arg(short, long, allow_hyphen_values = true)]
        position: f64,

        /// Move by `position` instead of to it
        #[arg(short, long)]
        relative: bool,

        /// Seconds to wait for the move to finish
        #[arg(short, long, default_value = "30")]
        timeout: u64,
    },

    /// Reference an axis
    Home {
        /// Axis index (0-based)
        #[arg(short, long)]
        axis: usize,

        /// Search in the negative direction
        #[arg(long)]
        reverse: bool,
    },

    /// Halt an axis
    Stop {
        /// Axis index (0-based)
        #[arg(short, long)]
        axis: usize,
    },

    /// Set Hexapod pivot coordinates
    Pivot {
        #[arg(long, allow_hyphen_values = true)]
        x: Option<f64>,
        #[arg(long, allow_hyphen_values = true)]
        y: Option<f64>,
        #[arg(long, allow_hyphen_values = true)]
        z: Option<f64>,
    },

    /// Interactive GCS command REPL
    Repl,

    /// Print the GCS error table, or one entry
    Errors {
        /// Error code to look up
        #[arg(allow_hyphen_values = true)]
        code: Option<i32>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();

    if let Command::Errors { code } = args.command {
        return cmd_errors(code);
    }

    let config = resolve_config(&args)?;
    match args.command {
        Command::Info => cmd_info(&config),
        Command::Poll { count } => cmd_poll(&config, count),
        Command::Move {
            axis,
            position,
            relative,
            timeout,
        } => cmd_move(&config, axis, position, relative, Duration::from_secs(timeout)),
        Command::Home { axis, reverse } => cmd_home(&config, axis, !reverse),
        Command::Stop { axis } => cmd_stop(&config, axis),
        Command::Pivot { x, y, z } => cmd_pivot(&config, x, y, z),
        Command::Repl => cmd_repl(&config),
        Command::Errors { code } => cmd_errors(code),
    }
}

/// Config file first, then command-line endpoint overrides.
fn resolve_config(args: &Args) -> Result<DriverConfig> {
    let endpoint = match (&args.tcp, &args.serial) {
        (Some(address), _) => Some(Endpoint::Tcp {
            address: address.clone(),
        }),
        (None, Some(path)) => Some(Endpoint::Serial {
            path: path.clone(),
            baud_rate: args.baud,
        }),
        (None, None) => None,
    };

    match (&args.config, endpoint) {
        (Some(path), endpoint) => {
            let mut config = DriverConfig::load_from_file(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?;
            if let Some(endpoint) = endpoint {
                config.endpoint = endpoint;
            }
            Ok(config)
        }
        (None, Some(endpoint)) => Ok(DriverConfig::new(endpoint)),
        (None, None) => bail!("No controller given, use --config, --tcp or --serial"),
    }
}

fn connect(config: &DriverConfig) -> Result<PiMotorController> {
    info!("Connecting to {:?}...", config.endpoint);
    let interface = config.open_interface()?;
    let controller = PiMotorController::connect(interface, config.options())?;
    Ok(controller)
}

// ==================== Info Command ====================

fn cmd_info(config: &DriverConfig) -> Result<()> {
    let controller = connect(config)?;
    let gcs = controller.controller();

    println!("Identification: {}", gcs.identification());
    println!("Family:         {}", gcs.family());
    println!("GCS 2:          {}", gcs.is_gcs2());
    if gcs.family().is_hexapod() {
        let pivot = gcs.pivot();
        println!("Pivot:          ({}, {}, {})", pivot.x, pivot.y, pivot.z);
    }
    println!();

    for axis in controller.axes() {
        let (min, max) = axis.travel_limits();
        let ratio = axis.counts_per_unit();
        println!(
            "Axis {} ({}): position={:.6}, range=[{:.3}, {:.3}], counts/unit={}/{}, resolution={:e}",
            axis.index(),
            axis.name(),
            axis.position(),
            min,
            max,
            ratio.numerator,
            ratio.denominator,
            ratio.resolution()
        );
        println!(
            "    servo={}, homed={}, reference={}, limit switches={}, velocity={}",
            axis.servo_enabled(),
            axis.is_homed(),
            axis.has_reference(),
            axis.has_limit_switches(),
            axis.velocity()
        );
    }

    Ok(())
}

// ==================== Poll Command ====================

fn cmd_poll(config: &DriverConfig, count: usize) -> Result<()> {
    let controller = Arc::new(Mutex::new(connect(config)?));
    let (poller, reports) = Poller::spawn(controller, config.moving_period(), config.idle_period());

    for _ in 0..count {
        let report = reports
            .recv()
            .context("Poller stopped before all reports arrived")?;
        println!("{}", serde_json::to_string(&report)?);
    }

    poller.shutdown();
    Ok(())
}

// ==================== Motion Commands ====================

fn cmd_move(
    config: &DriverConfig,
    axis: usize,
    position: f64,
    relative: bool,
    timeout: Duration,
) -> Result<()> {
    let mut controller = connect(config)?;
    let counts = controller.axis(axis)?.counts_per_unit().to_counts(position);

    info!(
        "Moving axis {} {} {} ({} counts)",
        axis,
        if relative { "by" } else { "to" },
        position,
        counts
    );
    controller.move_axis(axis, counts as f64, relative, MotionProfile::default())?;

    let start = Instant::now();
    loop {
        let report = controller.poll();
        let state = &report.axes[axis];
        if state.done() {
            info!("Axis {} settled at {:.6}", axis, state.real_position);
            break;
        }
        if start.elapsed() > timeout {
            bail!("Axis {axis} still moving after {timeout:?}, last at {:.6}", state.real_position);
        }
        std::thread::sleep(config.moving_period());
    }

    Ok(())
}

fn cmd_home(config: &DriverConfig, axis: usize, forwards: bool) -> Result<()> {
    let mut controller = connect(config)?;
    controller.home(axis, 0.0, forwards)?;
    info!("Referencing started on axis {}", axis);
    Ok(())
}

fn cmd_stop(config: &DriverConfig, axis: usize) -> Result<()> {
    let mut controller = connect(config)?;
    controller.stop(axis)?;
    info!("Axis {} stopped", axis);
    Ok(())
}

fn cmd_pivot(config: &DriverConfig, x: Option<f64>, y: Option<f64>, z: Option<f64>) -> Result<()> {
    let mut controller = connect(config)?;
    if !controller.controller().family().is_hexapod() {
        bail!("{} has no pivot point", controller.controller().identification());
    }

    for (coordinate, value) in [
        (PivotCoordinate::X, x),
        (PivotCoordinate::Y, y),
        (PivotCoordinate::Z, z),
    ] {
        if let Some(value) = value {
            controller.set_pivot(coordinate, value)?;
        }
    }

    let pivot = controller.pivot();
    println!("Pivot: ({}, {}, {})", pivot.x, pivot.y, pivot.z);
    Ok(())
}

// ==================== REPL Command ====================

fn cmd_repl(config: &DriverConfig) -> Result<()> {
    let interface = config.open_interface()?;

    let response = interface.send_and_receive("*IDN?")?;
    println!("Connected: {}", response.trim());
    println!();
    println!("GCS REPL - Enter commands (queries end with '?'), 'quit' to exit");
    println!("Examples: *IDN?, SAI?, POS? 1, SVO 1 1, MOV 1 0.5");
    println!();

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut input = String::new();
        if stdin.read_line(&mut input)? == 0 {
            break; // EOF
        }

        let cmd = input.trim();
        if cmd.is_empty() {
            continue;
        }

        if cmd.eq_ignore_ascii_case("quit") || cmd.eq_ignore_ascii_case("exit") {
            println!("Bye!");
            break;
        }

        if cmd.ends_with('?') || cmd.contains("? ") {
            match interface.send_and_receive(cmd) {
                Ok(response) => {
                    for line in response.lines() {
                        println!("{line}");
                    }
                }
                Err(e) => println!("Error: {e}"),
            }
        } else {
            // commands are silent, ask the controller whether it took it
            let result = interface
                .send_only(cmd)
                .and_then(|()| interface.send_and_receive("ERR?"));
            match result {
                Ok(code) => match code.trim().parse::<i32>() {
                    Ok(0) => println!("OK"),
                    Ok(code) => println!("Error {code}: {}", error_codes::translate(code)),
                    Err(_) => println!("Unexpected ERR? reply: {}", code.trim()),
                },
                Err(e) => println!("Error: {e}"),
            }
        }
    }

    Ok(())
}

// ==================== Errors Command ====================

fn cmd_errors(code: Option<i32>) -> Result<()> {
    match code {
        Some(code) => match error_codes::lookup(code) {
            Some(entry) => println!("{:>6}  {}  {}", entry.code, entry.symbol, entry.description),
            None => println!("{:>6}  {}", code, error_codes::UNKNOWN_ERROR),
        },
        None => {
            for entry in ERROR_TABLE {
                println!("{:>6}  {}  {}", entry.code, entry.symbol, entry.description);
            }
        }
    }
    Ok(())
}
