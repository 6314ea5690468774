//! Core data types: pose, wheel travel and timestamped sensor samples.

use serde::{Deserialize, Serialize};

/// Robot pose in the plane.
///
/// Position in meters, heading in radians. `theta` is kept reduced by
/// remainder against 2π and may be negative.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Pose {
    /// X position in meters
    pub x: f64,
    /// Y position in meters
    pub y: f64,
    /// Heading in radians
    pub theta: f64,
}

impl Pose {
    /// Create a new pose.
    #[inline]
    pub fn new(x: f64, y: f64, theta: f64) -> Self {
        Self { x, y, theta }
    }

    /// Pose at the origin with zero heading.
    #[inline]
    pub fn origin() -> Self {
        Self::default()
    }
}

impl std::fmt::Display for Pose {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "({:.4}, {:.4}, {:.4} rad / {:.1}°)",
            self.x,
            self.y,
            self.theta,
            self.theta.to_degrees()
        )
    }
}

/// Distance travelled by each wheel since the previous odometry sample (meters).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WheelDeltas {
    pub left_rear: f64,
    pub right_rear: f64,
    pub left_front: f64,
    pub right_front: f64,
}

impl WheelDeltas {
    /// Create from individual wheel travel values.
    #[inline]
    pub fn new(left_rear: f64, right_rear: f64, left_front: f64, right_front: f64) -> Self {
        Self {
            left_rear,
            right_rear,
            left_front,
            right_front,
        }
    }

    /// Values in `[left_rear, right_rear, left_front, right_front]` order.
    #[inline]
    pub fn to_array(self) -> [f64; 4] {
        [
            self.left_rear,
            self.right_rear,
            self.left_front,
            self.right_front,
        ]
    }
}

impl From<[f64; 4]> for WheelDeltas {
    /// Build from an array ordered `[left_rear, right_rear, left_front, right_front]`.
    fn from(wheels: [f64; 4]) -> Self {
        Self::new(wheels[0], wheels[1], wheels[2], wheels[3])
    }
}

/// Generic timestamp wrapper for sensor readings.
///
/// Timestamps are milliseconds on the source's monotonic clock.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Timestamped<T> {
    /// The wrapped data
    pub data: T,
    /// Acquisition time in milliseconds
    pub timestamp_ms: u64,
}

impl<T> Timestamped<T> {
    /// Create a new timestamped value.
    #[inline]
    pub fn new(data: T, timestamp_ms: u64) -> Self {
        Self { data, timestamp_ms }
    }
}

/// Gyro yaw rate in rad/s (CCW positive) with its acquisition time.
pub type YawSample = Timestamped<f64>;

/// Per-wheel travel with its acquisition time.
pub type WheelSample = Timestamped<WheelDeltas>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wheel_deltas_array_order() {
        let w = WheelDeltas::from([1.0, 2.0, 3.0, 4.0]);
        assert_eq!(w.left_rear, 1.0);
        assert_eq!(w.right_rear, 2.0);
        assert_eq!(w.left_front, 3.0);
        assert_eq!(w.right_front, 4.0);
        assert_eq!(w.to_array(), [1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_pose_origin() {
        assert_eq!(Pose::origin(), Pose::new(0.0, 0.0, 0.0));
    }
}
