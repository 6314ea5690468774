//! Scripted sources that replay a fixed sequence of acquisitions.
//!
//! Each step is either a sample or `None` for a failed acquisition. Once the
//! script runs out, every further acquisition fails.

use std::collections::VecDeque;
use std::time::Duration;

use crate::core::source::{OdometrySource, YawRateSource};
use crate::core::types::{WheelSample, YawSample};
use crate::error::{Error, Result};

/// Replays a recorded or hand-written acquisition sequence.
#[derive(Debug, Clone)]
pub struct ScriptedSource<T> {
    steps: VecDeque<Option<T>>,
}

impl<T> ScriptedSource<T> {
    pub fn new(steps: impl IntoIterator<Item = Option<T>>) -> Self {
        Self {
            steps: steps.into_iter().collect(),
        }
    }

    /// Script where every acquisition succeeds.
    pub fn from_samples(samples: impl IntoIterator<Item = T>) -> Self {
        Self::new(samples.into_iter().map(Some))
    }

    pub fn remaining(&self) -> usize {
        self.steps.len()
    }

    fn next_step(&mut self, what: &str) -> Result<T> {
        match self.steps.pop_front() {
            Some(Some(sample)) => Ok(sample),
            Some(None) => Err(Error::SensorUnavailable(format!("scripted {} failure", what))),
            None => Err(Error::SensorUnavailable(format!("{} script exhausted", what))),
        }
    }
}

impl YawRateSource for ScriptedSource<YawSample> {
    fn acquire_yaw_rate(&mut self, _timeout: Duration) -> Result<YawSample> {
        self.next_step("yaw")
    }
}

impl OdometrySource for ScriptedSource<WheelSample> {
    fn acquire_odometry(&mut self, _timeout: Duration) -> Result<WheelSample> {
        self.next_step("odometry")
    }
}
