//! Error types for mage-net

use std::time::Duration;
use thiserror::Error;

/// Result type for mage-net operations
pub type Result<T> = std::result::Result<T, MageNetError>;

/// mage-net error types
#[derive(Debug, Error)]
pub enum MageNetError {
    /// The transport rejected an outbound request before queuing it
    #[error("Send failed: {0}")]
    Send(String),

    /// A blocked call was cancelled from outside
    #[error("Wait interrupted")]
    Interrupted,

    /// The connection closed while the call was pending, or before it started
    #[error("Connection lost")]
    ConnectionLost,

    /// No reply arrived within the configured response timeout
    #[error("No response within {0:?}")]
    Timeout(Duration),

    /// A call was made before the connection became active
    #[error("Bridge not active: no transport bound")]
    Inactive,

    /// The connection was activated twice
    #[error("Bridge already active")]
    AlreadyActive,

    /// Inbound unit could not be classified, or violated the protocol
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// A request could not be encoded
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Socket or I/O thread failure
    #[error("IO error: {0}")]
    Io(String),

    /// Invalid client configuration
    #[error("Config error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for MageNetError {
    fn from(err: serde_json::Error) -> Self {
        MageNetError::Serialization(err.to_string())
    }
}
