//! Connection lifecycle: the I/O thread and its transport

use crate::config::ClientConfig;
use crate::dispatcher::MageClient;
use crate::handle::BridgeHandle;
use crate::notify::NotificationHandler;
use mage_net_bridge::{
    AsyncReader, AsyncWriter, FrameReader, FrameWriter, LoggingWriteListener, SendQueue,
    WriteListener, reader_task, tcp, writer_task,
};
use mage_net_core::{MageNetError, Result};
use std::future::Future;
use std::sync::{Arc, mpsc};
use std::thread::{self, JoinHandle};
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::sync::oneshot;
use tracing::{debug, error, info};

/// A live game-server connection
///
/// Owns one I/O thread running a current-thread tokio runtime with the reader
/// and writer tasks. Application threads talk to the server through
/// [`client`](Self::client). Dropping the connection shuts the thread down and
/// releases any call still waiting for a reply.
pub struct Connection {
    client: MageClient,
    shutdown: Option<oneshot::Sender<()>>,
    io_thread: Option<JoinHandle<()>>,
}

impl Connection {
    pub fn connect_tcp(config: ClientConfig, handler: Arc<dyn NotificationHandler>) -> Result<Self> {
        Self::connect_tcp_with_listener(config, handler, Arc::new(LoggingWriteListener))
    }

    pub fn connect_tcp_with_listener(
        config: ClientConfig,
        handler: Arc<dyn NotificationHandler>,
        listener: Arc<dyn WriteListener>,
    ) -> Result<Self> {
        let address = config.address();
        let connect_timeout = config.connect_timeout;
        let max_frame_len = config.max_frame_len;

        Self::spawn(config, handler, listener, move || async move {
            tcp::connect(&address, connect_timeout, max_frame_len).await
        })
    }

    #[cfg(unix)]
    pub fn connect_unix(
        path: impl AsRef<std::path::Path>,
        config: ClientConfig,
        handler: Arc<dyn NotificationHandler>,
    ) -> Result<Self> {
        Self::connect_unix_with_listener(path, config, handler, Arc::new(LoggingWriteListener))
    }

    #[cfg(unix)]
    pub fn connect_unix_with_listener(
        path: impl AsRef<std::path::Path>,
        config: ClientConfig,
        handler: Arc<dyn NotificationHandler>,
        listener: Arc<dyn WriteListener>,
    ) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let connect_timeout = config.connect_timeout;
        let max_frame_len = config.max_frame_len;

        Self::spawn(config, handler, listener, move || async move {
            mage_net_bridge::unix::connect(&path, connect_timeout, max_frame_len).await
        })
    }

    /// Run the protocol over an already-open byte stream
    pub fn over_stream<S>(
        stream: S,
        config: ClientConfig,
        handler: Arc<dyn NotificationHandler>,
    ) -> Result<Self>
    where
        S: AsyncRead + AsyncWrite + Send + Sync + 'static,
    {
        Self::over_stream_with_listener(stream, config, handler, Arc::new(LoggingWriteListener))
    }

    pub fn over_stream_with_listener<S>(
        stream: S,
        config: ClientConfig,
        handler: Arc<dyn NotificationHandler>,
        listener: Arc<dyn WriteListener>,
    ) -> Result<Self>
    where
        S: AsyncRead + AsyncWrite + Send + Sync + 'static,
    {
        let max_frame_len = config.max_frame_len;

        Self::spawn(config, handler, listener, move || async move {
            let (read_half, write_half) = tokio::io::split(stream);
            Ok((
                FrameReader::new(read_half).with_max_len(max_frame_len),
                FrameWriter::new(write_half).with_max_len(max_frame_len),
            ))
        })
    }

    /// Start the I/O thread and wait until the handle is active or `open` fails
    fn spawn<F, Fut, R, W>(
        config: ClientConfig,
        handler: Arc<dyn NotificationHandler>,
        listener: Arc<dyn WriteListener>,
        open: F,
    ) -> Result<Self>
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<(R, W)>>,
        R: AsyncReader + 'static,
        W: AsyncWriter + 'static,
    {
        let handle = Arc::new(BridgeHandle::new(handler));
        let (ready_tx, ready_rx) = mpsc::sync_channel::<Result<()>>(1);
        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let max_frame_len = config.max_frame_len;
        let io_handle = handle.clone();

        let io_thread = thread::Builder::new()
            .name("mage-net-io".into())
            .spawn(move || {
                let runtime = match tokio::runtime::Builder::new_current_thread()
                    .enable_all()
                    .build()
                {
                    Ok(runtime) => runtime,
                    Err(e) => {
                        let _ = ready_tx.send(Err(MageNetError::Io(format!(
                            "Failed to build runtime: {}",
                            e
                        ))));
                        return;
                    }
                };

                runtime.block_on(async move {
                    let (reader, writer) = match open().await {
                        Ok(halves) => halves,
                        Err(e) => {
                            let _ = ready_tx.send(Err(e));
                            return;
                        }
                    };

                    let (queue, rx) = SendQueue::channel();
                    if let Err(e) = io_handle.activate(Box::new(queue.with_max_len(max_frame_len))) {
                        let _ = ready_tx.send(Err(e));
                        return;
                    }
                    tokio::spawn(writer_task(writer, rx, listener));
                    let _ = ready_tx.send(Ok(()));

                    reader_task(reader, io_handle, shutdown_rx).await;
                });
                debug!("I/O thread exiting");
            })
            .map_err(|e| MageNetError::Io(format!("Failed to spawn I/O thread: {}", e)))?;

        let ready = ready_rx
            .recv()
            .unwrap_or_else(|_| Err(MageNetError::Io("I/O thread exited during connect".into())));
        if let Err(e) = ready {
            let _ = io_thread.join();
            error!("Connect failed: {}", e);
            return Err(e);
        }

        info!("Connected");
        Ok(Self {
            client: MageClient::new(handle, config.response_timeout),
            shutdown: Some(shutdown_tx),
            io_thread: Some(io_thread),
        })
    }

    /// A call surface for this connection; clones share the same slots
    pub fn client(&self) -> MageClient {
        self.client.clone()
    }

    /// Stop the I/O thread and close the handle. Idempotent.
    pub fn close(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
        if let Some(io_thread) = self.io_thread.take() {
            // Joining from a notification handler would wait on ourselves
            if io_thread.thread().id() == thread::current().id() {
                debug!("close() called on the I/O thread, not joining");
            } else if io_thread.join().is_err() {
                error!("I/O thread panicked");
            }
        }
        self.client.handle().close(&MageNetError::ConnectionLost);
    }
}

impl Drop for Connection {
    fn drop(&mut self) {
        self.close();
    }
}
