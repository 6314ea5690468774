//! Mock device simulation configuration
//!
//! Every parameter has a default, so `[device.simulation]` may be partial or
//! omitted entirely.
//!
//! | Parameter | Default | Unit |
//! |-----------|---------|------|
//! | linear_speed | 0.2 | m/s |
//! | angular_speed | 0.3 | rad/s (CCW positive) |
//! | wheel_base | 0.233 | m |
//! | gyro_noise_stddev | 0.0 | rad/s |
//! | gyro_bias | 0.0 | rad/s |
//! | wheel_slip_stddev | 0.0 | fraction |
//! | failure_rate | 0.0 | probability per acquisition |
//! | random_seed | 42 | 0 = random each run |

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Simulated robot and sensor parameters
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SimulationConfig {
    /// Commanded forward speed (m/s)
    #[serde(default = "default_linear_speed")]
    pub linear_speed: f64,

    /// Commanded turn rate (rad/s, CCW positive)
    #[serde(default = "default_angular_speed")]
    pub angular_speed: f64,

    /// Distance between left and right wheels (m)
    #[serde(default = "default_wheel_base")]
    pub wheel_base: f64,

    /// Gyro white noise standard deviation (rad/s)
    #[serde(default)]
    pub gyro_noise_stddev: f64,

    /// Constant gyro bias (rad/s)
    #[serde(default)]
    pub gyro_bias: f64,

    /// Multiplicative wheel slip standard deviation
    #[serde(default)]
    pub wheel_slip_stddev: f64,

    /// Probability that any single acquisition fails (0.0-1.0)
    #[serde(default)]
    pub failure_rate: f64,

    /// Noise seed; 0 draws from entropy
    #[serde(default = "default_random_seed")]
    pub random_seed: u64,
}

fn default_linear_speed() -> f64 {
    0.2
}
fn default_angular_speed() -> f64 {
    0.3
}
fn default_wheel_base() -> f64 {
    0.233
}
fn default_random_seed() -> u64 {
    42
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            linear_speed: default_linear_speed(),
            angular_speed: default_angular_speed(),
            wheel_base: default_wheel_base(),
            gyro_noise_stddev: 0.0,
            gyro_bias: 0.0,
            wheel_slip_stddev: 0.0,
            failure_rate: 0.0,
            random_seed: default_random_seed(),
        }
    }
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("linear_speed", self.linear_speed),
            ("angular_speed", self.angular_speed),
            ("wheel_base", self.wheel_base),
            ("gyro_noise_stddev", self.gyro_noise_stddev),
            ("gyro_bias", self.gyro_bias),
            ("wheel_slip_stddev", self.wheel_slip_stddev),
            ("failure_rate", self.failure_rate),
        ];
        if let Some((name, value)) = fields.iter().find(|(_, v)| !v.is_finite()) {
            return Err(Error::InvalidParameter(format!(
                "simulation.{} must be finite, got {}",
                name, value
            )));
        }
        if self.wheel_base <= 0.0 {
            return Err(Error::InvalidParameter(format!(
                "simulation.wheel_base must be positive, got {}",
                self.wheel_base
            )));
        }
        if !(0.0..=1.0).contains(&self.failure_rate) {
            return Err(Error::InvalidParameter(format!(
                "simulation.failure_rate must be within [0, 1], got {}",
                self.failure_rate
            )));
        }
        if self.gyro_noise_stddev < 0.0 || self.wheel_slip_stddev < 0.0 {
            return Err(Error::InvalidParameter(
                "simulation noise stddev must not be negative".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        assert!(SimulationConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_values() {
        let mut config = SimulationConfig::default();
        config.failure_rate = 1.5;
        assert!(config.validate().is_err());

        let mut config = SimulationConfig::default();
        config.wheel_base = 0.0;
        assert!(config.validate().is_err());

        let mut config = SimulationConfig::default();
        config.gyro_noise_stddev = -0.1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_non_finite_values() {
        let cases: [fn(&mut SimulationConfig); 6] = [
            |c| c.linear_speed = f64::NAN,
            |c| c.angular_speed = f64::INFINITY,
            |c| c.gyro_noise_stddev = f64::NAN,
            |c| c.gyro_bias = f64::NEG_INFINITY,
            |c| c.wheel_slip_stddev = f64::INFINITY,
            |c| c.failure_rate = f64::NAN,
        ];
        for corrupt in cases {
            let mut config = SimulationConfig::default();
            corrupt(&mut config);
            assert!(matches!(config.validate(), Err(Error::InvalidParameter(_))));
        }
    }

    #[test]
    fn test_nan_from_toml_rejected() {
        let config: SimulationConfig = toml::from_str("angular_speed = nan").unwrap();
        assert!(config.angular_speed.is_nan());
        assert!(config.validate().is_err());
    }
}
