//! Transport abstractions for the client bridge
//!
//! Provides AsyncReader/AsyncWriter traits that can be implemented
//! for different transport mechanisms (TCP, Unix sockets, in-memory pipes),
//! plus the two background tasks that own them on the I/O thread.

use crate::listener::WriteListener;
use crate::protocol::{ClientMessage, ServerMessage, deserialize, serialize};
use crate::frame::MAX_FRAME_LEN;
use async_trait::async_trait;
use mage_net_core::{MageNetError, Result};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, error, info};

/// Trait for async reading from a transport
#[async_trait]
pub trait AsyncReader: Send {
    /// Read a complete message from the transport
    /// Messages are length-prefixed: 4-byte little-endian length + JSON payload
    async fn read_message(&mut self) -> Result<Vec<u8>>;
}

/// Trait for async writing to a transport
#[async_trait]
pub trait AsyncWriter: Send + Sync {
    /// Write a complete message to the transport
    /// Messages are length-prefixed: 4-byte little-endian length + JSON payload
    async fn write_message(&mut self, data: &[u8]) -> Result<()>;
}

/// Outbound half of a live connection, as held by the bridge handle
///
/// `submit` never blocks. `Ok` means the request was queued, not that it was
/// written; the write outcome goes to the [`WriteListener`].
pub trait Transport: Send + Sync {
    fn submit(&self, request: ClientMessage) -> Result<()>;
}

/// Receiver of everything the reader task decodes
///
/// Called on the I/O thread; implementations must not block.
pub trait InboundSink: Send + Sync {
    /// One classified inbound unit, in arrival order
    fn on_unit(&self, unit: ServerMessage);

    /// A frame arrived that matches no known unit
    fn on_unclassified(&self, error: MageNetError) {
        error!("Dropping inbound frame: {}", error);
    }

    /// The connection ended; called exactly once, last
    fn on_closed(&self, reason: MageNetError);
}

/// A serialized request waiting for the writer task
#[derive(Debug)]
pub struct OutboundFrame {
    pub kind: &'static str,
    pub data: Vec<u8>,
}

/// [`Transport`] that serializes on the caller's thread and queues frames
/// for [`writer_task`]
pub struct SendQueue {
    tx: mpsc::UnboundedSender<OutboundFrame>,
    max_len: usize,
}

impl SendQueue {
    pub fn new(tx: mpsc::UnboundedSender<OutboundFrame>) -> Self {
        Self {
            tx,
            max_len: MAX_FRAME_LEN,
        }
    }

    /// Create a queue and the receiver its writer task drains
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<OutboundFrame>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(tx), rx)
    }

    pub fn with_max_len(mut self, max_len: usize) -> Self {
        self.max_len = max_len;
        self
    }
}

impl Transport for SendQueue {
    fn submit(&self, request: ClientMessage) -> Result<()> {
        let kind = request.kind();
        let data = serialize(&request)?;

        if data.len() > self.max_len {
            return Err(MageNetError::Send(format!(
                "{} too large: {} bytes",
                kind,
                data.len()
            )));
        }

        // Log outgoing message
        let json_preview: String = String::from_utf8_lossy(&data).chars().take(200).collect();
        debug!("[Client→Server] len={} json={}", data.len(), json_preview);

        self.tx
            .send(OutboundFrame { kind, data })
            .map_err(|_| MageNetError::Send("Writer task not running".into()))
    }
}

/// Background reader task that handles incoming messages
///
/// This task:
/// - Receives frames from the server via the transport
/// - Decodes each frame and hands the unit to the sink, in arrival order
/// - Reports frames that decode to no known unit and keeps reading
/// - Calls `on_closed` once when the stream ends, fails, or `shutdown` fires
pub async fn reader_task<R: AsyncReader>(
    mut reader: R,
    sink: Arc<dyn InboundSink>,
    mut shutdown: oneshot::Receiver<()>,
) {
    let reason = loop {
        tokio::select! {
            biased;

            _ = &mut shutdown => {
                debug!("Shutdown requested, reader task exiting");
                break MageNetError::ConnectionLost;
            }

            // Message from server
            msg_result = reader.read_message() => {
                match msg_result {
                    Ok(data) => {
                        // Log incoming message
                        let json_preview: String = String::from_utf8_lossy(&data).chars().take(200).collect();
                        debug!("[Server→Client] len={} json={}", data.len(), json_preview);

                        match deserialize::<ServerMessage>(&data) {
                            Ok(unit) => sink.on_unit(unit),
                            Err(e) => sink.on_unclassified(MageNetError::Protocol(format!(
                                "Unclassifiable inbound unit: {}",
                                e
                            ))),
                        }
                    }
                    Err(MageNetError::ConnectionLost) => {
                        info!("Server closed the connection");
                        break MageNetError::ConnectionLost;
                    }
                    Err(e) => {
                        error!("Reader task failed: {}", e);
                        break e;
                    }
                }
            }
        }
    };

    sink.on_closed(reason);
}

/// Background writer task that drains the send queue
///
/// Each frame's outcome is reported to the listener. The first failed write
/// stops the task, after which [`SendQueue::submit`] rejects new requests.
pub async fn writer_task<W: AsyncWriter>(
    mut writer: W,
    mut rx: mpsc::UnboundedReceiver<OutboundFrame>,
    listener: Arc<dyn WriteListener>,
) {
    while let Some(frame) = rx.recv().await {
        let result = writer.write_message(&frame.data).await;
        let failed = result.is_err();
        listener.on_write(frame.kind, &result);
        if failed {
            error!("Writer task stopping after failed {} write", frame.kind);
            break;
        }
    }
    debug!("Writer task exiting");
}
