use crate::conf::types::tls::TlsConfig;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind, e.g. "0.0.0.0" (all interfaces) or "127.0.0.1".
    pub host: String,

    /// TCP port to bind.
    pub port: u16,

    /// Optional number of worker threads - default is decided by Pingora.
    pub threads: Option<usize>,

    /// Optional TLS config. When present, both files must be readable at
    /// startup or the server refuses to start.
    pub tls: Option<TlsConfig>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            threads: None,
            tls: None,
        }
    }
}

impl ServerConfig {
    /// Socket address string handed to the listener, e.g. "0.0.0.0:5173".
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5173
}
