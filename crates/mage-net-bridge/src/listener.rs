//! Write-completion reporting
//!
//! Every submitted frame is reported once, after the writer task has flushed
//! it or failed to. Reports are diagnostics only: a blocking call learns about
//! its outcome from its reply, never from here.

use mage_net_core::Result;
use tracing::{trace, warn};

/// Shared, stateless callback invoked for each completed write
pub trait WriteListener: Send + Sync {
    /// `kind` is the request's wire tag
    fn on_write(&self, kind: &'static str, result: &Result<()>);
}

/// Default listener: failures at warn, successes at trace
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingWriteListener;

impl WriteListener for LoggingWriteListener {
    fn on_write(&self, kind: &'static str, result: &Result<()>) {
        match result {
            Ok(()) => trace!("Write complete: {}", kind),
            Err(e) => warn!("Write failed for {}: {}", kind, e),
        }
    }
}
