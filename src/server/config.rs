//! Server configuration.

use std::net::{SocketAddr, ToSocketAddrs};

use crate::config::ServerSection;
use crate::error::{Result, TokCalcError};

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address
    pub addr: SocketAddr,
    /// Maximum request body size (bytes)
    pub max_body_size: usize,
    /// Enable request tracing
    pub logging: bool,
    /// CORS enabled
    pub cors_enabled: bool,
    /// Leading token IDs returned when a request does not say
    pub preview_tokens: usize,
    /// Model used when a request does not name one
    pub default_model: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            max_body_size: 10 * 1024 * 1024, // 10MB
            logging: true,
            cors_enabled: true,
            preview_tokens: crate::report::DEFAULT_PREVIEW_TOKENS,
            default_model: "gpt-4o".to_string(),
        }
    }
}

impl ServerConfig {
    /// Build from the `[server]` config file section
    ///
    /// The host may be an IP literal or a name such as `localhost`; names
    /// resolve to their first address.
    pub fn from_section(section: &ServerSection) -> Result<Self> {
        let listen_addr = section.listen_addr();
        let addr = (section.host.as_str(), section.port)
            .to_socket_addrs()
            .map_err(|e| TokCalcError::Config(format!("Invalid listen address {listen_addr}: {e}")))?
            .next()
            .ok_or_else(|| {
                TokCalcError::Config(format!("Listen address {listen_addr} resolved to nothing"))
            })?;

        Ok(Self {
            addr,
            max_body_size: section.max_body_size,
            cors_enabled: section.cors,
            ..Self::default()
        })
    }

    /// Create with custom port
    pub fn with_port(mut self, port: u16) -> Self {
        self.addr.set_port(port);
        self
    }

    /// Bind to all interfaces
    pub fn bind_all(mut self) -> Self {
        self.addr = SocketAddr::from(([0, 0, 0, 0], self.addr.port()));
        self
    }

    /// Set address directly
    pub fn with_addr(mut self, addr: SocketAddr) -> Self {
        self.addr = addr;
        self
    }

    /// Set max body size
    pub fn with_max_body_size(mut self, size: usize) -> Self {
        self.max_body_size = size;
        self
    }

    /// Set the default token preview length
    pub fn with_preview_tokens(mut self, n: usize) -> Self {
        self.preview_tokens = n;
        self
    }

    /// Set the default model
    pub fn with_default_model(mut self, model: impl Into<String>) -> Self {
        self.default_model = model.into();
        self
    }

    /// Disable logging
    pub fn without_logging(mut self) -> Self {
        self.logging = false;
        self
    }

    /// Disable CORS
    pub fn without_cors(mut self) -> Self {
        self.cors_enabled = false;
        self
    }
}
