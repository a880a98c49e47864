//! # Bridge Error Handling
//!
//! This module defines the BridgeError enum, which represents the different
//! error types that can occur in the obis2mqtt crate.

use thiserror::Error;

/// Represents the different error types that can occur in the bridge.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// Indicates an error related to the serial port communication.
    #[error("Serial port error: {0}")]
    SerialPortError(String),

    /// Indicates an error related to the TCP socket communication.
    #[error("Socket error: {0}")]
    SocketError(String),

    /// Indicates an error talking to the MQTT broker.
    #[error("MQTT error: {0}")]
    MqttError(String),

    /// Indicates an invalid or missing configuration value.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Indicates a reading could not be serialized for publishing.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// A catch-all error for uncategorized cases.
    #[error("Other error: {0}")]
    Other(String),
}

impl From<serde_json::Error> for BridgeError {
    fn from(err: serde_json::Error) -> Self {
        BridgeError::SerializationError(err.to_string())
    }
}
