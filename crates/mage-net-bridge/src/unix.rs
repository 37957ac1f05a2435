//! Unix socket transport implementation
//!
//! Used when the server runs on the same host and exposes a socket file.

use crate::frame::{FrameReader, FrameWriter};
use mage_net_core::{MageNetError, Result};
use std::path::Path;
use std::time::Duration;
use tokio::net::UnixStream;
use tokio::net::unix::{OwnedReadHalf, OwnedWriteHalf};
use tracing::info;

/// Unix socket read wrapper
pub type UnixReadWrapper = FrameReader<OwnedReadHalf>;

/// Unix socket write wrapper
pub type UnixWriteWrapper = FrameWriter<OwnedWriteHalf>;

/// Connect to the socket at `path` and split it into framed halves
pub async fn connect(
    path: &Path,
    connect_timeout: Duration,
    max_frame_len: usize,
) -> Result<(UnixReadWrapper, UnixWriteWrapper)> {
    info!("Connecting to game server at {}", path.display());

    let stream = tokio::time::timeout(connect_timeout, UnixStream::connect(path))
        .await
        .map_err(|_| MageNetError::Io(format!("Connection timeout to {}", path.display())))?
        .map_err(|e| MageNetError::Io(format!("Failed to connect: {}", e)))?;

    let (read_half, write_half) = stream.into_split();

    Ok((
        FrameReader::new(read_half).with_max_len(max_frame_len),
        FrameWriter::new(write_half).with_max_len(max_frame_len),
    ))
}
