//! Gati - dead-reckoning daemon
//!
//! Starts the yaw and odometry samplers against the configured device and
//! logs the pose until Ctrl-C (or `--duration` elapses).
//!
//! # Usage
//!
//! ```bash
//! gati
//! gati --config gati.toml
//! gati --yaw-hz 200 --odometry-hz 20 --duration 10
//! ```

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use clap::Parser;

use gati::devices::create_sources;
use gati::utils::setup_ctrl_c_handler;
use gati::{Config, Error, PoseTracker, Result};

/// Dead-reckoning pose estimator
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file path (built-in defaults if omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the gyro sampling rate (Hz)
    #[arg(long)]
    yaw_hz: Option<u32>,

    /// Override the odometry sampling rate (Hz)
    #[arg(long)]
    odometry_hz: Option<u32>,

    /// Stop after this many seconds instead of waiting for Ctrl-C
    #[arg(short, long)]
    duration: Option<f64>,
}

fn load_config(args: &Args) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(hz) = args.yaw_hz {
        config.sampling.yaw_frequency_hz = hz;
    }
    if let Some(hz) = args.odometry_hz {
        config.sampling.odometry_frequency_hz = hz;
    }
    config.validate()?;
    Ok(config)
}

/// Deadline for `--duration` seconds from now.
fn run_deadline(secs: f64) -> Result<Instant> {
    let invalid = || Error::InvalidParameter(format!("--duration must be positive, got {}", secs));
    if secs <= 0.0 {
        return Err(invalid());
    }
    let duration = Duration::try_from_secs_f64(secs).map_err(|_| invalid())?;
    Instant::now().checked_add(duration).ok_or_else(invalid)
}

fn run(args: Args) -> Result<()> {
    let config = load_config(&args)?;

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.logging.level.as_str()),
    )
    .init();

    log::info!("Gati v{} starting...", env!("CARGO_PKG_VERSION"));
    match &args.config {
        Some(path) => log::info!("Using config: {}", path.display()),
        None => log::info!("Using built-in default config"),
    }
    log::info!(
        "Device: {} ({})",
        config.device.name,
        config.device.device_type
    );

    let deadline = args.duration.map(run_deadline).transpose()?;

    let (gyro, wheels) = create_sources(&config.device)?;
    let tracker = PoseTracker::start(&config.sampling, gyro, wheels)?;

    let stop = tracker.stop_signal();
    setup_ctrl_c_handler(Arc::clone(&stop))
        .map_err(|e| Error::Other(format!("Error setting Ctrl-C handler: {}", e)))?;

    log::info!("Gati running. Press Ctrl-C to stop.");

    let report_interval = config.logging.report_interval();
    loop {
        let wait = match deadline {
            Some(deadline) => {
                let remaining = deadline.saturating_duration_since(Instant::now());
                if remaining.is_zero() {
                    log::info!("Run duration elapsed");
                    break;
                }
                remaining.min(report_interval)
            }
            None => report_interval,
        };

        if stop.wait_timeout(wait) {
            break;
        }
        if !tracker.is_running() {
            log::error!("A sampler thread exited unexpectedly");
            break;
        }

        let yaw = tracker.yaw_stats();
        let odometry = tracker.odometry_stats();
        log::info!(
            "Pose {} | yaw: {} applied, {} failed | odometry: {} applied, {} failed",
            tracker.pose(),
            yaw.applied,
            yaw.failures,
            odometry.applied,
            odometry.failures
        );
    }

    log::info!("Shutting down...");
    let report = tracker.shutdown()?;

    log::info!("Final pose: {}", report.pose);
    log::info!(
        "Yaw sampler: {} applied, {} failed, {} overruns",
        report.yaw.applied,
        report.yaw.failures,
        report.yaw.overruns
    );
    log::info!(
        "Odometry sampler: {} applied, {} failed, {} overruns",
        report.odometry.applied,
        report.odometry.failures,
        report.odometry.overruns
    );
    log::info!("Gati stopped");
    Ok(())
}

fn main() {
    let args = Args::parse();
    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
