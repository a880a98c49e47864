//! # Serial Meter Link
//!
//! Handles the serial side of the bridge: opening the optical readout head's
//! serial device and reading raw telegram chunks from it.

use crate::constants::DEFAULT_BAUD_RATE;
use crate::error::BridgeError;
use crate::transport::MeterLink;
use async_trait::async_trait;
use std::time::Duration;
use tokio::io::AsyncReadExt;
use tokio_serial::SerialPortBuilderExt;

/// Configuration for the serial connection.
#[derive(Debug, Clone)]
pub struct SerialConfig {
    pub baudrate: u32,
    pub timeout: Duration,
}

impl Default for SerialConfig {
    fn default() -> Self {
        SerialConfig {
            baudrate: DEFAULT_BAUD_RATE,
            timeout: Duration::from_secs(5),
        }
    }
}

/// Represents a handle to the meter's serial line, encapsulating the
/// tokio_serial::SerialStream.
pub struct SerialLink {
    port: tokio_serial::SerialStream,
}

impl SerialLink {
    /// Opens the serial device with 8N1 framing at the configured baud rate.
    pub async fn open(path: &str, config: SerialConfig) -> Result<SerialLink, BridgeError> {
        let port = tokio_serial::new(path, config.baudrate)
            .data_bits(tokio_serial::DataBits::Eight)
            .stop_bits(tokio_serial::StopBits::One)
            .parity(tokio_serial::Parity::None)
            .timeout(config.timeout)
            .open_native_async()
            .map_err(|e| BridgeError::SerialPortError(e.to_string()))?;

        Ok(SerialLink { port })
    }
}

#[async_trait]
impl MeterLink for SerialLink {
    async fn read_chunk(&mut self, buf: &mut [u8]) -> Result<usize, BridgeError> {
        self.port
            .read(buf)
            .await
            .map_err(|e| BridgeError::SerialPortError(e.to_string()))
    }
}
