//! Client connection configuration

use mage_net_bridge::MAX_FRAME_LEN;
use mage_net_core::{MageNetError, Result};
use std::time::Duration;

/// Configuration for a game-server connection
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Host to connect to (default: 127.0.0.1)
    pub host: String,
    /// Server port (default: 17171)
    pub port: u16,
    /// Connection timeout
    pub connect_timeout: Duration,
    /// Give up on a blocking call after this long. `None` waits forever.
    pub response_timeout: Option<Duration>,
    /// Largest frame sent or accepted
    pub max_frame_len: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 17171,
            connect_timeout: Duration::from_secs(30),
            response_timeout: None,
            max_frame_len: MAX_FRAME_LEN,
        }
    }
}

impl ClientConfig {
    /// Parse `host:port`, or a bare host with the default port
    pub fn from_address(address: &str) -> Result<Self> {
        let mut config = Self::default();
        match address.rsplit_once(':') {
            Some((host, port)) => {
                config.port = port
                    .parse()
                    .map_err(|_| MageNetError::Config(format!("Invalid port in {}", address)))?;
                config.host = host.to_string();
            }
            None => config.host = address.to_string(),
        }
        if config.host.is_empty() {
            return Err(MageNetError::Config(format!("Missing host in {}", address)));
        }
        Ok(config)
    }

    pub fn with_response_timeout(mut self, timeout: Duration) -> Self {
        self.response_timeout = Some(timeout);
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn with_max_frame_len(mut self, max_frame_len: usize) -> Self {
        self.max_frame_len = max_frame_len;
        self
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
