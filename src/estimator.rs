//! Pose estimator: the running pose and its two update operations.
//!
//! The pose, together with the last applied timestamp of each sensor stream,
//! lives behind one mutex. Every update takes the lock for the whole
//! read-compute-write sequence, so a position update always projects along a
//! heading that no concurrent heading update is halfway through writing.
//! The lock is never held across sensor acquisition or sleeping; those happen
//! in the sampler threads.
//!
//! # Elapsed time
//!
//! [`PoseEstimator::update_heading`] and [`PoseEstimator::update_position`]
//! take an elapsed duration from the caller. The sampler threads instead use
//! [`PoseEstimator::apply_yaw_sample`] and
//! [`PoseEstimator::apply_odometry_sample`], which receive raw acquisition
//! timestamps and derive elapsed time against the last timestamp applied on
//! the same stream:
//!
//! - The first sample of a stream sets the baseline and contributes zero time.
//! - A timestamp older than the baseline contributes zero time and leaves the
//!   baseline where it is.

use std::time::Duration;

use parking_lot::Mutex;

use crate::core::math::{
    absolute_coords, compose_heading, delta_coords, delta_distance, delta_heading,
};
use crate::core::types::{Pose, WheelDeltas, WheelSample, YawSample};

#[derive(Debug, Default)]
struct EstimatorState {
    pose: Pose,
    last_yaw_ms: Option<u64>,
    last_odometry_ms: Option<u64>,
}

impl EstimatorState {
    fn apply_heading(&mut self, yaw_rate: f64, elapsed: Duration) {
        let delta = delta_heading(yaw_rate, elapsed);
        self.pose.theta = compose_heading(delta, self.pose.theta);
    }

    fn apply_position(&mut self, wheels: &WheelDeltas) {
        let distance = delta_distance(wheels);
        let delta = delta_coords(distance, self.pose.theta);
        let (x, y) = absolute_coords(delta, (self.pose.x, self.pose.y));
        self.pose.x = x;
        self.pose.y = y;
    }
}

/// Elapsed time since the previous sample on one stream, advancing the baseline.
fn stream_elapsed(last_ms: &mut Option<u64>, timestamp_ms: u64, stream: &str) -> Duration {
    match *last_ms {
        None => {
            *last_ms = Some(timestamp_ms);
            Duration::ZERO
        }
        Some(prev) if timestamp_ms >= prev => {
            *last_ms = Some(timestamp_ms);
            Duration::from_millis(timestamp_ms - prev)
        }
        Some(prev) => {
            log::debug!(
                "PoseEstimator: {} timestamp went backwards ({} < {}), applying zero elapsed",
                stream,
                timestamp_ms,
                prev
            );
            Duration::ZERO
        }
    }
}

/// Dead-reckoning pose estimator shared by the sampler threads.
#[derive(Debug, Default)]
pub struct PoseEstimator {
    state: Mutex<EstimatorState>,
}

impl PoseEstimator {
    /// Create an estimator with the pose at the origin.
    pub fn new() -> Self {
        Self::default()
    }

    /// Consistent snapshot of the current pose.
    pub fn pose(&self) -> Pose {
        self.state.lock().pose
    }

    /// Integrate `yaw_rate` (rad/s) over `elapsed` into the heading.
    ///
    /// Only the heading changes.
    pub fn update_heading(&self, yaw_rate: f64, elapsed: Duration) {
        self.state.lock().apply_heading(yaw_rate, elapsed);
    }

    /// Advance x and y by the rear-axle travel along the current heading.
    ///
    /// The elapsed time is accepted for symmetry with the heading update; the
    /// displacement depends only on wheel travel. Front wheel values are
    /// ignored.
    pub fn update_position(&self, wheels: &WheelDeltas, _elapsed: Duration) {
        self.state.lock().apply_position(wheels);
    }

    /// Heading update followed by position update, as one locked step.
    ///
    /// The odometry elapsed time is unused, as in [`Self::update_position`].
    pub fn update_coords(
        &self,
        wheels: &WheelDeltas,
        _odometry_elapsed: Duration,
        yaw_rate: f64,
        yaw_elapsed: Duration,
    ) {
        let mut state = self.state.lock();
        state.apply_heading(yaw_rate, yaw_elapsed);
        state.apply_position(wheels);
    }

    /// Apply a gyro sample using its raw timestamp. Returns the elapsed time used.
    pub fn apply_yaw_sample(&self, sample: &YawSample) -> Duration {
        let mut state = self.state.lock();
        let elapsed = stream_elapsed(&mut state.last_yaw_ms, sample.timestamp_ms, "yaw");
        state.apply_heading(sample.data, elapsed);

        log::trace!(
            "yaw rate: {:.5} rad/s, timestamp: {} ms, elapsed: {} ms, theta: {:.5}",
            sample.data,
            sample.timestamp_ms,
            elapsed.as_millis(),
            state.pose.theta
        );
        elapsed
    }

    /// Apply an odometry sample using its raw timestamp. Returns the elapsed time used.
    pub fn apply_odometry_sample(&self, sample: &WheelSample) -> Duration {
        let mut state = self.state.lock();
        let elapsed = stream_elapsed(
            &mut state.last_odometry_ms,
            sample.timestamp_ms,
            "odometry",
        );
        state.apply_position(&sample.data);

        log::trace!(
            "odometry: rear {:.4} {:.4}, timestamp: {} ms, elapsed: {} ms, pos: ({:.4}, {:.4})",
            sample.data.left_rear,
            sample.data.right_rear,
            sample.timestamp_ms,
            elapsed.as_millis(),
            state.pose.x,
            state.pose.y
        );
        elapsed
    }

    /// Return to the origin and forget both stream baselines.
    pub fn reset(&self) {
        *self.state.lock() = EstimatorState::default();
        log::debug!("PoseEstimator: Reset to origin");
    }
}
