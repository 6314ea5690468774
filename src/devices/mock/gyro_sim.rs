//! Gyro simulator: yaw rate of a robot turning at the commanded rate.

use std::time::Duration;

use super::SimClock;
use super::config::SimulationConfig;
use super::noise::SensorNoise;
use crate::core::source::YawRateSource;
use crate::core::types::YawSample;
use crate::error::{Error, Result};

/// Simulated Z-axis gyro (rad/s, CCW positive)
pub struct GyroSimulator {
    angular_speed: f64,
    bias: f64,
    stddev: f64,
    failure_rate: f64,
    clock: SimClock,
    noise: SensorNoise,
}

impl GyroSimulator {
    pub fn new(config: &SimulationConfig, clock: SimClock, noise: SensorNoise) -> Self {
        Self {
            angular_speed: config.angular_speed,
            bias: config.gyro_bias,
            stddev: config.gyro_noise_stddev,
            failure_rate: config.failure_rate,
            clock,
            noise,
        }
    }
}

impl YawRateSource for GyroSimulator {
    fn acquire_yaw_rate(&mut self, _timeout: Duration) -> Result<YawSample> {
        if self.noise.dropped(self.failure_rate) {
            return Err(Error::SensorUnavailable("mock gyro dropped a read".to_string()));
        }
        let rate = self.angular_speed + self.noise.gyro_error(self.bias, self.stddev);
        Ok(YawSample::new(rate, self.clock.now_ms()))
    }
}
