//! Synchronous remote calls over an asynchronous game-server connection
//!
//! The server answers requests with replies that carry no request id. This
//! crate turns that stream back into blocking calls: every reply belongs to a
//! [`ResponseCategory`], each category has one [`CorrelationSlot`], and a call
//! clears its slot, sends, then waits for the next reply of its category.
//! Everything else the server pushes goes to a [`NotificationHandler`].
//!
//! ```no_run
//! use mage_net_client::{ClientConfig, Connection, IgnorePushes};
//! use std::sync::Arc;
//!
//! # fn main() -> mage_net_core::Result<()> {
//! let config = ClientConfig::from_address("127.0.0.1:17171")?;
//! let connection = Connection::connect_tcp(config, Arc::new(IgnorePushes))?;
//! for line in connection.client().server_messages()? {
//!     println!("{}", line);
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod connection;
pub mod demux;
pub mod dispatcher;
pub mod handle;
pub mod notify;
pub mod slot;

#[cfg(test)]
mod testing;

pub use config::ClientConfig;
pub use connection::Connection;
pub use demux::Deliver;
pub use dispatcher::{MageClient, SeatRequest};
pub use handle::{BridgeHandle, BridgeState, Slots};
pub use mage_net_bridge::ResponseCategory;
pub use notify::{IgnorePushes, NotificationHandler};
pub use slot::CorrelationSlot;
