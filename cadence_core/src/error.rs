//! Error types for the Cadence core.
//!
//! The tick loop itself never fails; these errors surface while building a
//! workload or loading run parameters.

use thiserror::Error;

/// Result alias used across the core crate
pub type CadenceResult<T> = Result<T, CadenceError>;

#[derive(Debug, Error)]
pub enum CadenceError {
    /// Invalid run parameters
    #[error("Configuration error: {0}")]
    Config(String),

    /// A thread descriptor that cannot produce a well-formed task stream
    #[error("Invalid thread #{index}: {reason}")]
    InvalidThread { index: usize, reason: String },

    /// A scheduler was asked to run without any workload source
    #[error("Workload has no threads")]
    EmptyWorkload,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CadenceError {
    /// Shorthand for a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        CadenceError::Config(msg.into())
    }

    pub(crate) fn invalid_thread(index: usize, reason: impl Into<String>) -> Self {
        CadenceError::InvalidThread {
            index,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            CadenceError::config("frame_length must be >= 1").to_string(),
            "Configuration error: frame_length must be >= 1"
        );
        assert_eq!(
            CadenceError::invalid_thread(2, "period must be >= 1").to_string(),
            "Invalid thread #2: period must be >= 1"
        );
        assert_eq!(CadenceError::EmptyWorkload.to_string(), "Workload has no threads");
    }
}
