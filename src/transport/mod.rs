//! Transport links carrying the meter byte stream.
//!
//! Serial and socket links are functionally interchangeable: both produce raw
//! byte chunks and signal closure by a zero-length read. The trait seam lets
//! tests drive the pipeline with scripted links instead of hardware.

pub mod serial;
pub mod tcp;

use crate::config::{Config, Mode};
use crate::error::BridgeError;
use async_trait::async_trait;

pub use serial::{SerialConfig, SerialLink};
pub use tcp::TcpLink;

/// One connected meter byte stream.
#[async_trait]
pub trait MeterLink: Send {
    /// Reads the next chunk into `buf`. `Ok(0)` means the peer closed the
    /// link.
    async fn read_chunk(&mut self, buf: &mut [u8]) -> Result<usize, BridgeError>;
}

/// Opens the transport selected by the configuration.
pub async fn connect(config: &Config) -> Result<Box<dyn MeterLink>, BridgeError> {
    match config.mode {
        Mode::Serial => Ok(Box::new(
            SerialLink::open(&config.serial_path, SerialConfig::default()).await?,
        )),
        Mode::Socket => Ok(Box::new(
            TcpLink::connect(&config.socket_host, config.socket_port).await?,
        )),
    }
}
