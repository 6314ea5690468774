//! Sampler threads.
//!
//! Two fixed-rate polling loops feed the shared [`PoseEstimator`]:
//! - `YawSampler`: gyro yaw rate -> heading update
//! - `OdometrySampler`: wheel travel -> position update
//!
//! Both share the loop in this module:
//!
//! ```text
//! loop until stop:
//!   1. acquire one sample (bounded by the loop period)
//!   2. success -> apply to estimator; failure -> skip, count the streak
//!   3. wait out the rest of the period (woken early by stop)
//! ```
//!
//! An iteration that overruns its period starts the next one immediately.
//!
//! [`PoseEstimator`]: crate::estimator::PoseEstimator

mod odometry_sampler;
mod yaw_sampler;

pub use odometry_sampler::OdometrySampler;
pub use yaw_sampler::YawSampler;

use std::any::Any;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use serde::Serialize;

use crate::error::{Error, Result};
use crate::utils::StopSignal;

/// Failure streak length at which (and every multiple of which) a warning is logged.
const FAILURE_WARN_STREAK: u64 = 50;

/// Minimum spacing between overrun warnings from one sampler.
const OVERRUN_LOG_INTERVAL: Duration = Duration::from_secs(1);

/// Target loop period for a sampling frequency.
pub fn period_for(frequency_hz: u32) -> Result<Duration> {
    if frequency_hz == 0 {
        return Err(Error::InvalidParameter(
            "sampling frequency must be positive".to_string(),
        ));
    }
    Ok(Duration::from_secs(1) / frequency_hz)
}

/// Live counters for one sampler, updated by its thread.
#[derive(Debug, Default)]
pub struct SamplerStats {
    applied: AtomicU64,
    failures: AtomicU64,
    consecutive_failures: AtomicU64,
    overruns: AtomicU64,
}

/// Point-in-time copy of [`SamplerStats`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SamplerStatsSnapshot {
    /// Samples applied to the estimator
    pub applied: u64,
    /// Failed acquisitions in total
    pub failures: u64,
    /// Failed acquisitions since the last success
    pub consecutive_failures: u64,
    /// Iterations that took longer than the loop period
    pub overruns: u64,
}

impl SamplerStats {
    pub fn snapshot(&self) -> SamplerStatsSnapshot {
        SamplerStatsSnapshot {
            applied: self.applied.load(Ordering::Relaxed),
            failures: self.failures.load(Ordering::Relaxed),
            consecutive_failures: self.consecutive_failures.load(Ordering::Relaxed),
            overruns: self.overruns.load(Ordering::Relaxed),
        }
    }

    /// Returns the failure streak that just ended.
    fn record_applied(&self) -> u64 {
        self.applied.fetch_add(1, Ordering::Relaxed);
        self.consecutive_failures.swap(0, Ordering::Relaxed)
    }

    /// Returns the current failure streak.
    fn record_failure(&self) -> u64 {
        self.failures.fetch_add(1, Ordering::Relaxed);
        self.consecutive_failures.fetch_add(1, Ordering::Relaxed) + 1
    }

    fn record_overrun(&self) {
        self.overruns.fetch_add(1, Ordering::Relaxed);
    }
}

/// Fixed-rate acquire/apply loop shared by both samplers.
///
/// Runs until `stop` is triggered. Acquisition errors never end the loop.
fn run_sampling_loop<T, A, F>(
    name: &str,
    period: Duration,
    stop: &StopSignal,
    stats: &SamplerStats,
    mut acquire: A,
    mut apply: F,
) where
    A: FnMut(Duration) -> Result<T>,
    F: FnMut(T),
{
    log::info!(
        "{} running at {:.1}Hz ({}us interval)",
        name,
        1.0 / period.as_secs_f64(),
        period.as_micros()
    );

    let mut last_overrun_log: Option<Instant> = None;

    while !stop.is_triggered() {
        let loop_start = Instant::now();

        match acquire(period) {
            Ok(sample) => {
                apply(sample);
                let streak = stats.record_applied();
                if streak >= FAILURE_WARN_STREAK {
                    log::info!("{} recovered after {} failed acquisitions", name, streak);
                }
            }
            Err(e) => {
                let streak = stats.record_failure();
                if streak == 1 {
                    log::debug!("{} acquisition failed: {}", name, e);
                } else if streak % FAILURE_WARN_STREAK == 0 {
                    log::warn!(
                        "{} acquisition failing: {} in a row (last: {})",
                        name,
                        streak,
                        e
                    );
                }
            }
        }

        let elapsed = loop_start.elapsed();
        if elapsed < period {
            if stop.wait_timeout(period - elapsed) {
                break;
            }
        } else {
            stats.record_overrun();
            let should_log = last_overrun_log
                .map(|t| t.elapsed() >= OVERRUN_LOG_INTERVAL)
                .unwrap_or(true);
            if should_log {
                log::warn!(
                    "{} overran its period: {:?} > {:?}",
                    name,
                    elapsed,
                    period
                );
                last_overrun_log = Some(Instant::now());
            }
        }
    }

    log::info!("{} stopped", name);
}

/// Render a thread panic payload for [`Error::ThreadPanicked`].
fn panic_message(name: &str, payload: Box<dyn Any + Send>) -> Error {
    let detail = if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    };
    Error::ThreadPanicked(format!("{}: {}", name, detail))
}
