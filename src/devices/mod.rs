//! Sensor source implementations

pub mod mock;
pub mod scripted;

pub use scripted::ScriptedSource;

use crate::config::DeviceConfig;
use crate::core::source::{OdometrySource, YawRateSource};
use crate::error::{Error, Result};

/// Gyro and odometry sources for one device.
pub type SourcePair = (Box<dyn YawRateSource>, Box<dyn OdometrySource>);

/// Create the acquisition sources for the configured device
pub fn create_sources(config: &DeviceConfig) -> Result<SourcePair> {
    match config.device_type.as_str() {
        "mock" => {
            let simulation = config.simulation.clone().unwrap_or_default();
            mock::create_sources(&simulation)
        }
        _ => Err(Error::UnknownDevice(config.device_type.clone())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_device() {
        let config = DeviceConfig {
            device_type: "crl200s".to_string(),
            ..DeviceConfig::default()
        };
        assert!(matches!(
            create_sources(&config),
            Err(Error::UnknownDevice(t)) if t == "crl200s"
        ));
    }

    #[test]
    fn test_mock_without_simulation_section() {
        let config = DeviceConfig {
            simulation: None,
            ..DeviceConfig::default()
        };
        assert!(create_sources(&config).is_ok());
    }
}
