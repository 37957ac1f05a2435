//! TCP transport implementation
//!
//! The default transport: the game server listens on a TCP port.

use crate::frame::{FrameReader, FrameWriter};
use mage_net_core::{MageNetError, Result};
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tracing::info;

/// TCP read wrapper
pub type TcpReadWrapper = FrameReader<OwnedReadHalf>;

/// TCP write wrapper
pub type TcpWriteWrapper = FrameWriter<OwnedWriteHalf>;

/// Connect to `addr` and split the stream into framed halves
pub async fn connect(
    addr: &str,
    connect_timeout: Duration,
    max_frame_len: usize,
) -> Result<(TcpReadWrapper, TcpWriteWrapper)> {
    info!("Connecting to game server at {}", addr);

    // Connect with timeout
    let stream = tokio::time::timeout(connect_timeout, TcpStream::connect(addr))
        .await
        .map_err(|_| MageNetError::Io(format!("Connection timeout to {}", addr)))?
        .map_err(|e| MageNetError::Io(format!("Failed to connect to {}: {}", addr, e)))?;

    // Disable Nagle's algorithm for low latency
    stream
        .set_nodelay(true)
        .map_err(|e| MageNetError::Io(format!("Failed to set TCP_NODELAY: {}", e)))?;

    // Split into read/write halves
    let (read_half, write_half) = stream.into_split();

    Ok((
        FrameReader::new(read_half).with_max_len(max_frame_len),
        FrameWriter::new(write_half).with_max_len(max_frame_len),
    ))
}
