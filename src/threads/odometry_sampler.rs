//! Odometry sampler thread: wheel travel -> x, y.

use std::sync::Arc;
use std::time::Duration;
use std::thread::{self, JoinHandle};

use super::{SamplerStats, SamplerStatsSnapshot, panic_message, run_sampling_loop};
use crate::core::source::OdometrySource;
use crate::error::Result;
use crate::estimator::PoseEstimator;
use crate::utils::StopSignal;

const THREAD_NAME: &str = "odometry-sampler";

/// Odometry sampler thread handle.
pub struct OdometrySampler {
    handle: JoinHandle<()>,
    stats: Arc<SamplerStats>,
}

impl OdometrySampler {
    /// Spawn the odometry sampling loop.
    ///
    /// Position updates project along whatever heading the yaw sampler last
    /// wrote; the two loops are not aligned in time.
    pub fn spawn<S>(
        period: Duration,
        mut source: S,
        estimator: Arc<PoseEstimator>,
        stop: Arc<StopSignal>,
    ) -> Result<Self>
    where
        S: OdometrySource + 'static,
    {
        let stats = Arc::new(SamplerStats::default());
        let thread_stats = Arc::clone(&stats);

        let handle = thread::Builder::new()
            .name(THREAD_NAME.into())
            .spawn(move || {
                run_sampling_loop(
                    THREAD_NAME,
                    period,
                    &stop,
                    &thread_stats,
                    |timeout| source.acquire_odometry(timeout),
                    |sample| {
                        estimator.apply_odometry_sample(&sample);
                    },
                );
            })?;

        Ok(Self { handle, stats })
    }

    pub fn stats(&self) -> SamplerStatsSnapshot {
        self.stats.snapshot()
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the thread to finish.
    pub fn join(self) -> Result<SamplerStatsSnapshot> {
        self.handle
            .join()
            .map_err(|payload| panic_message(THREAD_NAME, payload))?;
        Ok(self.stats.snapshot())
    }
}
