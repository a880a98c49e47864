//! TCP meter link, for serial-to-ethernet converters that expose the readout
//! on a raw socket.

use crate::error::BridgeError;
use crate::transport::MeterLink;
use async_trait::async_trait;
use tokio::io::AsyncReadExt;
use tokio::net::TcpStream;

pub struct TcpLink {
    stream: TcpStream,
}

impl TcpLink {
    pub async fn connect(host: &str, port: u16) -> Result<Self, BridgeError> {
        let stream = TcpStream::connect((host, port))
            .await
            .map_err(|e| BridgeError::SocketError(e.to_string()))?;
        Ok(TcpLink { stream })
    }
}

#[async_trait]
impl MeterLink for TcpLink {
    async fn read_chunk(&mut self, buf: &mut [u8]) -> Result<usize, BridgeError> {
        self.stream
            .read(buf)
            .await
            .map_err(|e| BridgeError::SocketError(e.to_string()))
    }
}
