use serde::Deserialize;
use std::path::PathBuf;

/// TLS key/cert pair as written in the config file.
///
/// Paths are resolved relative to the config file's directory and may be
/// overridden by `SKIFF_TLS_KEY` / `SKIFF_TLS_CERT`.
#[derive(Debug, Clone, Deserialize)]
pub struct TlsConfig {
    /// Path to the PEM-encoded private key.
    pub key: PathBuf,

    /// Path to the PEM-encoded certificate.
    pub cert: PathBuf,
}

/// TLS material after loading: resolved paths plus the raw PEM bytes.
///
/// Both files are read fully at startup; runtime code assumes the material
/// is valid.
#[derive(Debug, Clone)]
pub struct TlsMaterial {
    pub key_path: PathBuf,
    pub cert_path: PathBuf,
    pub key: Vec<u8>,
    pub cert: Vec<u8>,
}
