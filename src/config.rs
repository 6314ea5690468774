//! Configuration for Gati
//!
//! Loads configuration from a TOML file. Every field has a default, so an
//! empty file (or no file at all) yields a runnable simulated setup.
//!
//! ```toml
//! [sampling]
//! yaw_frequency_hz = 100
//! odometry_frequency_hz = 50
//!
//! [device]
//! type = "mock"
//! name = "Simulated rover"
//!
//! [device.simulation]
//! linear_speed = 0.2
//! angular_speed = 0.3
//!
//! [logging]
//! level = "info"
//! report_interval_ms = 1000
//! ```

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::devices::mock::config::SimulationConfig;
use crate::error::{Error, Result};
use crate::threads::period_for;

/// Top-level application configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub sampling: SamplingConfig,
    #[serde(default)]
    pub device: DeviceConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Sampler frequencies, each defining a loop period of `1000 / hz` ms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct SamplingConfig {
    /// Gyro polling rate (Hz)
    #[serde(default = "default_yaw_frequency_hz")]
    pub yaw_frequency_hz: u32,
    /// Wheel odometry polling rate (Hz)
    #[serde(default = "default_odometry_frequency_hz")]
    pub odometry_frequency_hz: u32,
}

fn default_yaw_frequency_hz() -> u32 {
    100
}
fn default_odometry_frequency_hz() -> u32 {
    50
}

impl SamplingConfig {
    pub fn new(yaw_frequency_hz: u32, odometry_frequency_hz: u32) -> Self {
        Self {
            yaw_frequency_hz,
            odometry_frequency_hz,
        }
    }

    /// Yaw sampler loop period
    pub fn yaw_period(&self) -> Result<Duration> {
        period_for(self.yaw_frequency_hz)
    }

    /// Odometry sampler loop period
    pub fn odometry_period(&self) -> Result<Duration> {
        period_for(self.odometry_frequency_hz)
    }

    pub fn validate(&self) -> Result<()> {
        if self.yaw_frequency_hz == 0 {
            return Err(Error::InvalidParameter(
                "sampling.yaw_frequency_hz must be positive".to_string(),
            ));
        }
        if self.odometry_frequency_hz == 0 {
            return Err(Error::InvalidParameter(
                "sampling.odometry_frequency_hz must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self::new(default_yaw_frequency_hz(), default_odometry_frequency_hz())
    }
}

/// Sensor device selection
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DeviceConfig {
    /// Device type (currently only "mock")
    #[serde(rename = "type", default = "default_device_type")]
    pub device_type: String,
    /// Human-readable name for logs
    #[serde(default = "default_device_name")]
    pub name: String,
    /// Simulation parameters for the mock device
    #[serde(default)]
    pub simulation: Option<SimulationConfig>,
}

fn default_device_type() -> String {
    "mock".to_string()
}
fn default_device_name() -> String {
    "Simulated rover".to_string()
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            device_type: default_device_type(),
            name: default_device_name(),
            simulation: Some(SimulationConfig::default()),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Default log filter (trace, debug, info, warn, error); `RUST_LOG` wins
    #[serde(default = "default_log_level")]
    pub level: String,
    /// How often the binary logs the current pose (ms)
    #[serde(default = "default_report_interval_ms")]
    pub report_interval_ms: u64,
}

fn default_log_level() -> String {
    "info".to_string()
}
fn default_report_interval_ms() -> u64 {
    1000
}

impl LoggingConfig {
    pub fn report_interval(&self) -> Duration {
        Duration::from_millis(self.report_interval_ms)
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            report_interval_ms: default_report_interval_ms(),
        }
    }
}

impl Config {
    /// Load and validate configuration from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        self.sampling.validate()?;
        if self.logging.report_interval_ms == 0 {
            return Err(Error::InvalidParameter(
                "logging.report_interval_ms must be positive".to_string(),
            ));
        }
        if let Some(sim) = &self.device.simulation {
            sim.validate()?;
        }
        Ok(())
    }
}
