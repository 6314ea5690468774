//! Foundation layer.
//!
//! - [`types`]: Pose, wheel travel and timestamped samples
//! - [`math`]: Dead-reckoning kinematics
//! - [`source`]: Traits to implement for new sensors

pub mod math;
pub mod source;
pub mod types;
