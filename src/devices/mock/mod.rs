//! Mock device for hardware-free runs
//!
//! Simulates a robot driving at a constant commanded linear and angular
//! speed. A gyro and a set of wheel encoders share one monotonic clock so
//! their timestamps are comparable.
//!
//! | Component | Simulation Method |
//! |-----------|-------------------|
//! | Gyro (yaw rate) | Commanded turn rate + bias + Gaussian noise |
//! | Wheel encoders | Differential drive kinematics + slip noise |
//!
//! Both sources drop reads with probability `failure_rate`, which exercises
//! the samplers' skip-and-continue path.
//!
//! Example configuration:
//!
//! ```toml
//! [device]
//! type = "mock"
//!
//! [device.simulation]
//! linear_speed = 0.2
//! angular_speed = 0.3
//! gyro_noise_stddev = 0.002
//! failure_rate = 0.05
//! random_seed = 42
//! ```

pub mod config;
mod gyro_sim;
mod noise;
mod wheel_sim;

pub use gyro_sim::GyroSimulator;
pub use noise::{GYRO_STREAM, SensorNoise, WHEEL_STREAM};
pub use wheel_sim::WheelSimulator;

use std::sync::Arc;
use std::time::Instant;

use config::SimulationConfig;

use super::SourcePair;
use crate::error::Result;

/// Monotonic millisecond clock shared by the simulated sensors.
#[derive(Debug, Clone)]
pub struct SimClock {
    start: Arc<Instant>,
}

impl SimClock {
    pub fn new() -> Self {
        Self {
            start: Arc::new(Instant::now()),
        }
    }

    /// Milliseconds since the clock was created.
    pub fn now_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
}

impl Default for SimClock {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the simulated gyro and wheel sources.
pub fn create_sources(config: &SimulationConfig) -> Result<SourcePair> {
    config.validate()?;

    let clock = SimClock::new();
    let gyro_noise = SensorNoise::new(config.random_seed, GYRO_STREAM);
    let wheel_noise = SensorNoise::new(config.random_seed, WHEEL_STREAM);

    log::info!(
        "Mock robot: linear={:.3} m/s, angular={:.3} rad/s, failure_rate={:.2}",
        config.linear_speed,
        config.angular_speed,
        config.failure_rate
    );

    Ok((
        Box::new(GyroSimulator::new(config, clock.clone(), gyro_noise)),
        Box::new(WheelSimulator::new(config, clock, wheel_noise)),
    ))
}
