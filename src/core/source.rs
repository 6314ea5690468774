//! Acquisition traits implemented by sensor collaborators.
//!
//! A sampler thread owns one source and calls it once per cycle. An `Err`
//! return is a failed acquisition: the cycle is skipped and the loop goes on.

use std::time::Duration;

use crate::core::types::{WheelSample, YawSample};
use crate::error::Result;

/// Gyroscope yaw-rate source.
pub trait YawRateSource: Send {
    /// Acquire one yaw-rate reading.
    ///
    /// Must return within `timeout`. Sources that block on hardware report
    /// [`crate::Error::Timeout`] when the deadline passes.
    fn acquire_yaw_rate(&mut self, timeout: Duration) -> Result<YawSample>;
}

/// Four-wheel odometry source.
pub trait OdometrySource: Send {
    /// Acquire per-wheel travel since the previous reading.
    ///
    /// Must return within `timeout`, same as [`YawRateSource::acquire_yaw_rate`].
    fn acquire_odometry(&mut self, timeout: Duration) -> Result<WheelSample>;
}

impl<S: YawRateSource + ?Sized> YawRateSource for Box<S> {
    fn acquire_yaw_rate(&mut self, timeout: Duration) -> Result<YawSample> {
        (**self).acquire_yaw_rate(timeout)
    }
}

impl<S: OdometrySource + ?Sized> OdometrySource for Box<S> {
    fn acquire_odometry(&mut self, timeout: Duration) -> Result<WheelSample> {
        (**self).acquire_odometry(timeout)
    }
}
