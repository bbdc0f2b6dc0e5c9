use crate::conf::error::ConfigError;
use crate::conf::types::{TlsConfig, TlsMaterial};
use std::fs;
use std::path::{Path, PathBuf};

const PEM_MARKER: &[u8] = b"-----BEGIN";

/// Read the key/cert pair into memory.
///
/// Relative paths are resolved against the config file's directory. Each
/// file is opened, read fully, and closed before this function returns;
/// any failure aborts startup.
pub(crate) fn load_tls_material(root: &Path, cfg: &TlsConfig) -> Result<TlsMaterial, ConfigError> {
    let key_path = resolve_path(root, &cfg.key);
    let cert_path = resolve_path(root, &cfg.cert);

    if !key_path.is_file() {
        return Err(ConfigError::MissingKeyFile { path: key_path });
    }
    if !cert_path.is_file() {
        return Err(ConfigError::MissingCertFile { path: cert_path });
    }

    let key = read_pem(&key_path)?;
    let cert = read_pem(&cert_path)?;

    Ok(TlsMaterial {
        key_path,
        cert_path,
        key,
        cert,
    })
}

pub(crate) fn resolve_path(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}

fn read_pem(path: &Path) -> Result<Vec<u8>, ConfigError> {
    let bytes = fs::read(path).map_err(|source| ConfigError::ReadTls {
        path: path.to_path_buf(),
        source,
    })?;

    if !bytes.windows(PEM_MARKER.len()).any(|w| w == PEM_MARKER) {
        return Err(ConfigError::InvalidPem {
            path: path.to_path_buf(),
        });
    }

    Ok(bytes)
}
