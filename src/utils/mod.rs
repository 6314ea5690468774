//! Utility modules.

pub mod signal;

pub use signal::{StopSignal, setup_ctrl_c_handler};
