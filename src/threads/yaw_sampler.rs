//! Yaw sampler thread: gyro yaw rate -> heading.

use std::sync::Arc;
use std::time::Duration;
use std::thread::{self, JoinHandle};

use super::{SamplerStats, SamplerStatsSnapshot, panic_message, run_sampling_loop};
use crate::core::source::YawRateSource;
use crate::error::Result;
use crate::estimator::PoseEstimator;
use crate::utils::StopSignal;

const THREAD_NAME: &str = "yaw-sampler";

/// Yaw sampler thread handle.
pub struct YawSampler {
    handle: JoinHandle<()>,
    stats: Arc<SamplerStats>,
}

impl YawSampler {
    /// Spawn the yaw sampling loop.
    ///
    /// # Arguments
    ///
    /// - `period`: Target loop period (see
    ///   [`SamplingConfig::yaw_period`](crate::config::SamplingConfig::yaw_period)).
    /// - `source`: Gyro collaborator, owned by the thread.
    /// - `estimator`: Shared pose estimator receiving heading updates.
    /// - `stop`: Checked once per iteration; the loop returns once triggered.
    pub fn spawn<S>(
        period: Duration,
        mut source: S,
        estimator: Arc<PoseEstimator>,
        stop: Arc<StopSignal>,
    ) -> Result<Self>
    where
        S: YawRateSource + 'static,
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
                    |timeout| source.acquire_yaw_rate(timeout),
                    |sample| {
                        estimator.apply_yaw_sample(&sample);
                    },
                );
            })?;

        Ok(Self { handle, stats })
    }

    /// Current counters.
    pub fn stats(&self) -> SamplerStatsSnapshot {
        self.stats.snapshot()
    }

    /// Whether the loop has returned.
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
