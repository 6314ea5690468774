//! Sensor error model for the simulated gyro and encoders.
//!
//! One [`SensorNoise`] per simulated sensor. Streams are derived from the
//! configured seed and a per-sensor tag, so the gyro and the encoders draw
//! independent but reproducible sequences.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};

/// Stream tag for the gyro.
pub const GYRO_STREAM: u64 = 1;
/// Stream tag for the wheel encoders.
pub const WHEEL_STREAM: u64 = 2;

/// Random read drops, gyro error and wheel slip for one sensor.
pub struct SensorNoise {
    rng: SmallRng,
}

impl SensorNoise {
    /// Seed 0 draws from entropy; any other seed is reproducible per stream.
    pub fn new(seed: u64, stream: u64) -> Self {
        let rng = match seed {
            0 => SmallRng::from_entropy(),
            seed => SmallRng::seed_from_u64(seed ^ stream.rotate_left(32)),
        };
        Self { rng }
    }

    /// Whether this read is dropped, with probability `failure_rate`.
    pub fn dropped(&mut self, failure_rate: f64) -> bool {
        if failure_rate.is_nan() || failure_rate <= 0.0 {
            return false;
        }
        self.rng.gen_bool(failure_rate.min(1.0))
    }

    /// Gyro reading error: constant bias plus white noise (rad/s).
    pub fn gyro_error(&mut self, bias: f64, stddev: f64) -> f64 {
        bias + self.zero_mean(stddev)
    }

    /// Multiplier applied to a wheel's true travel, `1 + N(0, stddev)`.
    pub fn slip_factor(&mut self, stddev: f64) -> f64 {
        1.0 + self.zero_mean(stddev)
    }

    fn zero_mean(&mut self, stddev: f64) -> f64 {
        if stddev <= 0.0 {
            return 0.0;
        }
        match Normal::new(0.0, stddev) {
            Ok(normal) => normal.sample(&mut self.rng),
            Err(_) => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_stream_repeats() {
        let mut a = SensorNoise::new(7, GYRO_STREAM);
        let mut b = SensorNoise::new(7, GYRO_STREAM);
        for _ in 0..100 {
            assert_eq!(a.gyro_error(0.0, 1.0), b.gyro_error(0.0, 1.0));
        }
    }

    #[test]
    fn test_streams_differ() {
        let mut gyro = SensorNoise::new(7, GYRO_STREAM);
        let mut wheels = SensorNoise::new(7, WHEEL_STREAM);
        let same = (0..20)
            .filter(|_| gyro.slip_factor(0.1) == wheels.slip_factor(0.1))
            .count();
        assert!(same < 20);
    }

    #[test]
    fn test_noise_free_model() {
        let mut noise = SensorNoise::new(7, GYRO_STREAM);
        assert_eq!(noise.gyro_error(0.25, 0.0), 0.25);
        assert_eq!(noise.slip_factor(0.0), 1.0);
    }

    #[test]
    fn test_drop_edges() {
        let mut noise = SensorNoise::new(7, WHEEL_STREAM);
        for _ in 0..1000 {
            assert!(!noise.dropped(0.0));
            assert!(!noise.dropped(f64::NAN));
            assert!(noise.dropped(1.0));
        }
    }

    #[test]
    fn test_drop_rate() {
        let mut noise = SensorNoise::new(7, WHEEL_STREAM);
        let trials = 10_000;
        let drops = (0..trials).filter(|_| noise.dropped(0.3)).count();
        let ratio = drops as f64 / trials as f64;
        assert!((ratio - 0.3).abs() < 0.05);
    }
}
