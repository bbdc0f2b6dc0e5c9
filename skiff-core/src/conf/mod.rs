mod error;
mod loader;
#[cfg(test)]
mod tests;
mod tls;
pub mod types;
mod validate;

pub use error::ConfigError;
pub use loader::{TlsOverrides, load_config, load_config_with_overrides};
pub use types::DevConfig;
