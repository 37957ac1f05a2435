//! Wire protocol and transport plumbing for the mage-net client
//!
//! This crate provides:
//! - Wire protocol for requests sent to and units received from the server
//! - Length-prefixed framing over any async byte stream
//! - Transport abstractions (AsyncReader/AsyncWriter traits)
//! - TCP and Unix socket transports
//! - Background reader and writer tasks with write-completion reporting

pub mod frame;
pub mod listener;
pub mod protocol;
pub mod tcp;
pub mod transport;
#[cfg(unix)]
pub mod unix;

pub use frame::{FrameReader, FrameWriter, MAX_FRAME_LEN};
pub use listener::{LoggingWriteListener, WriteListener};
pub use protocol::{ClientMessage, ResponseCategory, ServerMessage, deserialize, serialize};
pub use transport::{
    AsyncReader, AsyncWriter, InboundSink, OutboundFrame, SendQueue, Transport, reader_task,
    writer_task,
};
