//! Gati - Dead-reckoning pose estimation for wheeled robots
//!
//! Fuses wheel odometry with gyro yaw rate by pure integration: every sample
//! advances the planar pose `(x, y, theta)` from the previous estimate.
//! There is no filtering and no calibration.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │                 tracker / main                      │  ← Orchestration
//! └─────────────────────────────────────────────────────┘
//!                          │
//! ┌─────────────────────────────────────────────────────┐
//! │                    threads/                         │  ← Sampling loops
//! │           (yaw sampler, odometry sampler)           │
//! └─────────────────────────────────────────────────────┘
//!                          │
//! ┌──────────────────────────┐ ┌────────────────────────┐
//! │       estimator          │ │       devices/         │
//! │  (pose + update ops)     │ │  (mock, scripted)      │
//! └──────────────────────────┘ └────────────────────────┘
//!                          │
//! ┌─────────────────────────────────────────────────────┐
//! │                     core/                           │  ← Foundation
//! │          (types, kinematics, source traits)         │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```no_run
//! use gati::{Config, PoseTracker, devices};
//! use std::time::Duration;
//!
//! let config = Config::default();
//! let (gyro, wheels) = devices::create_sources(&config.device)?;
//! let tracker = PoseTracker::start(&config.sampling, gyro, wheels)?;
//!
//! std::thread::sleep(Duration::from_secs(1));
//! println!("pose: {}", tracker.pose());
//! tracker.shutdown()?;
//! # Ok::<(), gati::Error>(())
//! ```
//!
//! # Known limitations
//!
//! - Only the rear wheel pair contributes to travel distance; front wheel
//!   values are accepted and ignored.
//! - Position steps are straight lines along the current heading, accurate
//!   only while the heading change per odometry period is small.

pub mod config;
pub mod core;
pub mod devices;
pub mod error;
pub mod estimator;
pub mod threads;
pub mod tracker;
pub mod utils;

// Re-export commonly used types
pub use config::{Config, SamplingConfig};
pub use core::source::{OdometrySource, YawRateSource};
pub use core::types::{Pose, Timestamped, WheelDeltas, WheelSample, YawSample};
pub use error::{Error, Result};
pub use estimator::PoseEstimator;
pub use threads::{OdometrySampler, SamplerStatsSnapshot, YawSampler};
pub use tracker::{PoseTracker, TrackerReport};
pub use utils::StopSignal;
