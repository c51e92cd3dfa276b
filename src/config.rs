//! Server configuration.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

/// Default listen port.
pub const DEFAULT_PORT: u16 = 8080;

/// Default cap on request body size (1 MiB).
pub const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024;

/// Runtime configuration for the HTTP server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Address to bind to.
    pub addr: SocketAddr,
    /// Largest accepted request body, in bytes.
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), DEFAULT_PORT),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

impl ServerConfig {
    /// Override the bind address.
    #[must_use]
    pub fn with_addr(mut self, addr: SocketAddr) -> Self {
        self.addr = addr;
        self
    }

    /// Override the body size cap.
    #[must_use]
    pub fn with_max_body_bytes(mut self, max_body_bytes: usize) -> Self {
        self.max_body_bytes = max_body_bytes;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_bind_localhost_8080() {
        let cfg = ServerConfig::default();
        assert_eq!(cfg.addr.to_string(), "127.0.0.1:8080");
        assert_eq!(cfg.max_body_bytes, 1024 * 1024);
    }

    #[test]
    fn builders_override_fields() {
        let addr: SocketAddr = "0.0.0.0:9000".parse().unwrap();
        let cfg = ServerConfig::default().with_addr(addr).with_max_body_bytes(512);
        assert_eq!(cfg.addr, addr);
        assert_eq!(cfg.max_body_bytes, 512);
    }
}
