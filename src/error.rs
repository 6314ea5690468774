//! Error types for Gati

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Gati error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file could not be parsed
    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Configuration could not be serialized
    #[error("Config serialize error: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    /// Invalid configuration parameter
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Unknown device type in configuration
    #[error("Unknown device type: {0}")]
    UnknownDevice(String),

    /// Sensor could not deliver a reading this cycle
    #[error("Sensor unavailable: {0}")]
    SensorUnavailable(String),

    /// Acquisition did not complete within its deadline
    #[error("Acquisition timeout after {0:?}")]
    Timeout(std::time::Duration),

    /// A sampler thread panicked
    #[error("Thread panicked: {0}")]
    ThreadPanicked(String),

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Whether this error is a per-cycle acquisition failure that a sampler
    /// loop skips over.
    pub fn is_acquisition_failure(&self) -> bool {
        matches!(self, Error::SensorUnavailable(_) | Error::Timeout(_))
    }
}
