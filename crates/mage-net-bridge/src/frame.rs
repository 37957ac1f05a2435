//! Length-prefixed framing over any async byte stream
//!
//! Every frame is a 4-byte little-endian length followed by a JSON payload.
//! The TCP and Unix transports are thin constructors around these wrappers;
//! tests drive them over `tokio::io::duplex`.

use crate::transport::{AsyncReader, AsyncWriter};
use async_trait::async_trait;
use mage_net_core::{MageNetError, Result};
use std::io::ErrorKind;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

/// Largest frame accepted in either direction (64MB)
pub const MAX_FRAME_LEN: usize = 64 * 1024 * 1024;

/// Reads length-prefixed frames from an async byte stream
pub struct FrameReader<R> {
    inner: R,
    max_len: usize,
}

impl<R> FrameReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            max_len: MAX_FRAME_LEN,
        }
    }

    /// Capped at `u32::MAX`, the largest length the prefix can carry
    pub fn with_max_len(mut self, max_len: usize) -> Self {
        self.max_len = max_len.min(u32::MAX as usize);
        self
    }
}

#[async_trait]
impl<R: AsyncRead + Unpin + Send> AsyncReader for FrameReader<R> {
    async fn read_message(&mut self) -> Result<Vec<u8>> {
        // Read 4-byte length prefix (little-endian)
        let mut len_bytes = [0u8; 4];
        if let Err(e) = self.inner.read_exact(&mut len_bytes).await {
            // EOF between frames is an orderly close by the server
            return Err(match e.kind() {
                ErrorKind::UnexpectedEof => MageNetError::ConnectionLost,
                _ => MageNetError::Io(format!("Read length failed: {}", e)),
            });
        }
        let len = u32::from_le_bytes(len_bytes) as usize;

        if len > self.max_len {
            return Err(MageNetError::Protocol(format!(
                "Message too large: {} bytes",
                len
            )));
        }

        // Read message body
        let mut data = vec![0u8; len];
        self.inner
            .read_exact(&mut data)
            .await
            .map_err(|e| MageNetError::Io(format!("Read data failed: {}", e)))?;

        Ok(data)
    }
}

/// Writes length-prefixed frames to an async byte stream
pub struct FrameWriter<W> {
    inner: W,
    max_len: usize,
}

impl<W> FrameWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            max_len: MAX_FRAME_LEN,
        }
    }

    /// Capped at `u32::MAX`, the largest length the prefix can carry
    pub fn with_max_len(mut self, max_len: usize) -> Self {
        self.max_len = max_len.min(u32::MAX as usize);
        self
    }
}

#[async_trait]
impl<W: AsyncWrite + Unpin + Send + Sync> AsyncWriter for FrameWriter<W> {
    async fn write_message(&mut self, data: &[u8]) -> Result<()> {
        if data.len() > self.max_len {
            return Err(MageNetError::Send(format!(
                "Message too large: {} bytes",
                data.len()
            )));
        }

        // Write 4-byte length prefix (little-endian)
        let len = (data.len() as u32).to_le_bytes();
        self.inner
            .write_all(&len)
            .await
            .map_err(|e| MageNetError::Io(format!("Write length failed: {}", e)))?;

        // Write message body
        self.inner
            .write_all(data)
            .await
            .map_err(|e| MageNetError::Io(format!("Write data failed: {}", e)))?;

        // Flush to ensure data is sent
        self.inner
            .flush()
            .await
            .map_err(|e| MageNetError::Io(format!("Flush failed: {}", e)))?;

        Ok(())
    }
}
