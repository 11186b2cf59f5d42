//! Error types for observability crate

use thiserror::Error;

/// Errors raised while setting up tracing
#[derive(Error, Debug)]
pub enum ObservabilityError {
    /// Exporter or subscriber could not be installed
    #[error("Failed to initialize observability: {0}")]
    InitFailed(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
