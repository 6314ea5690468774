//! Dead-reckoning kinematics.
//!
//! Pure functions that turn raw sensor readings into incremental motion and
//! compose it onto a running pose. Angles are reduced with floating-point
//! remainder against 2π (same semantics as C `fmod`), so the sign of the
//! input is kept: `-π` stays `-π`.

use std::f64::consts::TAU;
use std::time::Duration;

use super::types::WheelDeltas;

/// Reduce an angle by remainder against 2π.
///
/// The result has the sign of `angle` and magnitude below 2π. This is not a
/// wrap into `[0, 2π)` or `[-π, π]`.
///
/// # Example
/// ```
/// use gati::core::math::reduce_angle;
/// use std::f64::consts::PI;
///
/// assert_eq!(reduce_angle(-PI), -PI);
/// assert!((reduce_angle(3.0 * PI) - PI).abs() < 1e-12);
/// ```
#[inline]
pub fn reduce_angle(angle: f64) -> f64 {
    angle % TAU
}

/// Distance travelled by the midpoint of the rear axle.
///
/// Only the rear pair is used. Front wheel travel is accepted but ignored.
#[inline]
pub fn delta_distance(wheels: &WheelDeltas) -> f64 {
    (wheels.left_rear + wheels.right_rear) / 2.0
}

/// Heading change produced by `yaw_rate` (rad/s) held for `elapsed`.
#[inline]
pub fn delta_heading(yaw_rate: f64, elapsed: Duration) -> f64 {
    reduce_angle(elapsed.as_secs_f64() * yaw_rate)
}

/// New heading after applying `delta` on top of `last`.
#[inline]
pub fn compose_heading(delta: f64, last: f64) -> f64 {
    reduce_angle(delta + last)
}

/// Displacement `(dx, dy)` for travelling `distance` along `heading`.
///
/// First-order straight-line step; no arc correction.
#[inline]
pub fn delta_coords(distance: f64, heading: f64) -> (f64, f64) {
    let (sin_h, cos_h) = heading.sin_cos();
    (distance * cos_h, distance * sin_h)
}

/// Absolute position after adding `delta` to `last`.
#[inline]
pub fn absolute_coords(delta: (f64, f64), last: (f64, f64)) -> (f64, f64) {
    (last.0 + delta.0, last.1 + delta.1)
}
