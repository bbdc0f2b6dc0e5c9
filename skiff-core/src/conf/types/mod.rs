pub mod plugin;
pub mod server;
pub mod site;
pub mod tls;

pub use plugin::*;
pub use server::*;
pub use site::*;
pub use tls::*;

use serde::Deserialize;

/// Raw shape of the config file, before resolution.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    pub server: ServerConfig,
    pub site: SiteConfig,
    #[serde(rename = "plugin")]
    pub plugins: Vec<PluginConfig>,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            site: SiteConfig::default(),
            plugins: default_plugins(),
        }
    }
}

/// The resolved dev-server configuration.
///
/// Constructed once at startup by `conf::load_config` and frozen for the
/// process lifetime.
#[derive(Debug, Clone)]
pub struct DevConfig {
    pub server: ServerConfig,
    pub site: SiteConfig,
    pub plugins: Vec<PluginConfig>,

    /// Loaded TLS material; `None` means the listener is plain HTTP.
    pub tls: Option<TlsMaterial>,
}
