//! Wheel encoder simulator for a four-wheel skid/differential base.
//!
//! Each read reports the distance every wheel travelled since the last
//! successful read. A dropped read loses nothing: the next successful read
//! covers the whole interval, as a hardware encoder counter would.

use std::time::Duration;

use super::SimClock;
use super::config::SimulationConfig;
use super::noise::SensorNoise;
use crate::core::source::OdometrySource;
use crate::core::types::{WheelDeltas, WheelSample};
use crate::error::{Error, Result};

/// Simulated wheel odometry
pub struct WheelSimulator {
    linear_speed: f64,
    angular_speed: f64,
    wheel_base: f64,
    slip_stddev: f64,
    failure_rate: f64,
    clock: SimClock,
    noise: SensorNoise,
    last_read_ms: Option<u64>,
}

impl WheelSimulator {
    pub fn new(config: &SimulationConfig, clock: SimClock, noise: SensorNoise) -> Self {
        Self {
            linear_speed: config.linear_speed,
            angular_speed: config.angular_speed,
            wheel_base: config.wheel_base,
            slip_stddev: config.wheel_slip_stddev,
            failure_rate: config.failure_rate,
            clock,
            noise,
            last_read_ms: None,
        }
    }

    /// Left and right side speeds (m/s) for the commanded motion.
    fn side_speeds(&self) -> (f64, f64) {
        let half_turn = self.angular_speed * self.wheel_base / 2.0;
        (self.linear_speed - half_turn, self.linear_speed + half_turn)
    }

    fn slipped(&mut self, distance: f64) -> f64 {
        distance * self.noise.slip_factor(self.slip_stddev)
    }

    fn deltas_over(&mut self, dt: f64) -> WheelDeltas {
        let (left, right) = self.side_speeds();
        WheelDeltas::new(
            self.slipped(left * dt),
            self.slipped(right * dt),
            self.slipped(left * dt),
            self.slipped(right * dt),
        )
    }
}

impl OdometrySource for WheelSimulator {
    fn acquire_odometry(&mut self, _timeout: Duration) -> Result<WheelSample> {
        if self.noise.dropped(self.failure_rate) {
            return Err(Error::SensorUnavailable(
                "mock encoders dropped a read".to_string(),
            ));
        }

        let now_ms = self.clock.now_ms();
        let dt = match self.last_read_ms {
            Some(last) => now_ms.saturating_sub(last) as f64 / 1000.0,
            None => 0.0,
        };
        self.last_read_ms = Some(now_ms);

        Ok(WheelSample::new(self.deltas_over(dt), now_ms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::devices::mock::noise::WHEEL_STREAM;
    use approx::assert_relative_eq;

    fn simulator(linear: f64, angular: f64) -> WheelSimulator {
        let config = SimulationConfig {
            linear_speed: linear,
            angular_speed: angular,
            wheel_base: 0.2,
            ..SimulationConfig::default()
        };
        WheelSimulator::new(&config, SimClock::new(), SensorNoise::new(3, WHEEL_STREAM))
    }

    #[test]
    fn test_first_read_is_zero() {
        let mut wheels = simulator(1.0, 0.0);
        let sample = wheels.acquire_odometry(Duration::from_millis(10)).unwrap();
        assert_eq!(sample.data, WheelDeltas::default());
    }

    #[test]
    fn test_straight_deltas() {
        let mut wheels = simulator(1.0, 0.0);
        let d = wheels.deltas_over(0.5);
        assert_relative_eq!(d.left_rear, 0.5);
        assert_relative_eq!(d.right_rear, 0.5);
        assert_relative_eq!(d.left_front, 0.5);
        assert_relative_eq!(d.right_front, 0.5);
    }

    #[test]
    fn test_turn_in_place_deltas() {
        // 1 rad/s CCW with 0.2m base: left back 0.1 m/s, right forward 0.1 m/s
        let mut wheels = simulator(0.0, 1.0);
        let d = wheels.deltas_over(1.0);
        assert_relative_eq!(d.left_rear, -0.1, epsilon = 1e-12);
        assert_relative_eq!(d.right_rear, 0.1, epsilon = 1e-12);
    }
}
