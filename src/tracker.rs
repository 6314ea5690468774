//! Pose tracker: owns the estimator and both sampler threads.
//!
//! ```text
//! ┌──────────────┐  yaw rate   ┌───────────────┐
//! │ yaw-sampler  │────────────▶│               │
//! └──────────────┘             │ PoseEstimator │◀── pose() snapshots
//! ┌──────────────┐  wheels     │  (one mutex)  │
//! │ odom-sampler │────────────▶│               │
//! └──────────────┘             └───────────────┘
//! ```
//!
//! Both loops start together and run until the shared [`StopSignal`] fires.
//! Dropping the tracker triggers the signal and joins both threads.

use std::sync::Arc;

use crate::config::SamplingConfig;
use crate::core::source::{OdometrySource, YawRateSource};
use crate::core::types::Pose;
use crate::error::Result;
use crate::estimator::PoseEstimator;
use crate::threads::{OdometrySampler, SamplerStatsSnapshot, YawSampler};
use crate::utils::StopSignal;

/// Final sampler counters returned from [`PoseTracker::shutdown`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TrackerReport {
    pub pose: Pose,
    pub yaw: SamplerStatsSnapshot,
    pub odometry: SamplerStatsSnapshot,
}

/// Running dead-reckoning pipeline.
pub struct PoseTracker {
    estimator: Arc<PoseEstimator>,
    stop: Arc<StopSignal>,
    yaw: Option<YawSampler>,
    odometry: Option<OdometrySampler>,
}

impl PoseTracker {
    /// Start both sampling loops on a fresh estimator.
    pub fn start<Y, O>(config: &SamplingConfig, yaw_source: Y, odometry_source: O) -> Result<Self>
    where
        Y: YawRateSource + 'static,
        O: OdometrySource + 'static,
    {
        Self::start_with(
            config,
            Arc::new(PoseEstimator::new()),
            yaw_source,
            odometry_source,
        )
    }

    /// Start both sampling loops feeding an existing estimator.
    pub fn start_with<Y, O>(
        config: &SamplingConfig,
        estimator: Arc<PoseEstimator>,
        yaw_source: Y,
        odometry_source: O,
    ) -> Result<Self>
    where
        Y: YawRateSource + 'static,
        O: OdometrySource + 'static,
    {
        config.validate()?;
        let yaw_period = config.yaw_period()?;
        let odometry_period = config.odometry_period()?;
        let stop = Arc::new(StopSignal::new());

        let yaw = YawSampler::spawn(
            yaw_period,
            yaw_source,
            Arc::clone(&estimator),
            Arc::clone(&stop),
        )?;

        let odometry = match OdometrySampler::spawn(
            odometry_period,
            odometry_source,
            Arc::clone(&estimator),
            Arc::clone(&stop),
        ) {
            Ok(sampler) => sampler,
            Err(e) => {
                stop.trigger();
                if let Err(join_err) = yaw.join() {
                    log::error!("PoseTracker start aborted: {}", join_err);
                }
                return Err(e);
            }
        };

        log::info!(
            "PoseTracker started: yaw {}Hz, odometry {}Hz",
            config.yaw_frequency_hz,
            config.odometry_frequency_hz
        );

        Ok(Self {
            estimator,
            stop,
            yaw: Some(yaw),
            odometry: Some(odometry),
        })
    }

    /// Consistent snapshot of the current pose.
    pub fn pose(&self) -> Pose {
        self.estimator.pose()
    }

    /// Shared stop signal, e.g. for a Ctrl-C handler.
    pub fn stop_signal(&self) -> Arc<StopSignal> {
        Arc::clone(&self.stop)
    }

    pub fn yaw_stats(&self) -> SamplerStatsSnapshot {
        self.yaw.as_ref().map(|s| s.stats()).unwrap_or_default()
    }

    pub fn odometry_stats(&self) -> SamplerStatsSnapshot {
        self.odometry.as_ref().map(|s| s.stats()).unwrap_or_default()
    }

    /// True while both sampler threads are alive.
    ///
    /// Turns false once the stop signal has been handled or a sampler died.
    pub fn is_running(&self) -> bool {
        let alive = |finished: Option<bool>| finished == Some(false);
        alive(self.yaw.as_ref().map(|s| s.is_finished()))
            && alive(self.odometry.as_ref().map(|s| s.is_finished()))
    }

    /// Block until both loops return.
    ///
    /// The loops only return once the stop signal fires, so another thread
    /// (or a signal handler) must trigger it.
    pub fn wait(mut self) -> Result<TrackerReport> {
        self.join_all()
    }

    /// Stop both loops and wait for them.
    pub fn shutdown(mut self) -> Result<TrackerReport> {
        self.stop.trigger();
        self.join_all()
    }

    fn join_all(&mut self) -> Result<TrackerReport> {
        // Join both before reporting so a yaw panic never leaks the odometry thread
        let yaw = self.yaw.take().map(|s| s.join()).transpose();
        let odometry = self.odometry.take().map(|s| s.join()).transpose();

        let report = TrackerReport {
            pose: self.estimator.pose(),
            yaw: yaw?.unwrap_or_default(),
            odometry: odometry?.unwrap_or_default(),
        };
        log::info!("PoseTracker stopped at {}", report.pose);
        Ok(report)
    }
}

impl Drop for PoseTracker {
    fn drop(&mut self) {
        if self.yaw.is_some() || self.odometry.is_some() {
            self.stop.trigger();
            if let Err(e) = self.join_all() {
                log::error!("PoseTracker shutdown: {}", e);
            }
        }
    }
}
