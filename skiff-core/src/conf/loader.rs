use crate::conf::error::ConfigError;
use crate::conf::tls::{load_tls_material, resolve_path};
use crate::conf::types::{ConfigFile, DevConfig, TlsConfig};
use crate::conf::validate::validate_config;

use std::fs;
use std::path::{Path, PathBuf};

/// Environment overrides for the TLS file paths, so configs stay free of
/// machine-specific absolute paths.
#[derive(Debug, Clone, Default)]
pub struct TlsOverrides {
    pub key: Option<PathBuf>,
    pub cert: Option<PathBuf>,
}

impl TlsOverrides {
    pub fn from_env() -> Self {
        Self {
            key: std::env::var_os("SKIFF_TLS_KEY").map(PathBuf::from),
            cert: std::env::var_os("SKIFF_TLS_CERT").map(PathBuf::from),
        }
    }
}

/// Load, validate, and freeze the dev-server configuration.
pub fn load_config(path: &Path) -> Result<DevConfig, ConfigError> {
    load_config_with_overrides(path, TlsOverrides::from_env())
}

pub fn load_config_with_overrides(
    path: &Path,
    overrides: TlsOverrides,
) -> Result<DevConfig, ConfigError> {
    //--------------------------------------------------------------------------
    // Hard fail: IO and parsing
    //--------------------------------------------------------------------------
    let raw = fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
    let mut file: ConfigFile = toml::from_str(&raw).map_err(|e| ConfigError::parse(path, e))?;

    let root = path.parent().unwrap_or_else(|| Path::new("."));

    apply_tls_overrides(&mut file.server.tls, overrides)?;

    //--------------------------------------------------------------------------
    // Semantic validation (hard fail)
    //--------------------------------------------------------------------------
    validate_config(&file, root)?;

    //--------------------------------------------------------------------------
    // TLS material (hard fail; no downgrade to plain HTTP)
    //--------------------------------------------------------------------------
    let tls = match &file.server.tls {
        Some(tls_cfg) => Some(load_tls_material(root, tls_cfg)?),
        None => None,
    };

    let mut site = file.site;
    site.root = resolve_path(root, &site.root);

    Ok(DevConfig {
        server: file.server,
        site,
        plugins: file.plugins,
        tls,
    })
}

fn apply_tls_overrides(
    tls: &mut Option<TlsConfig>,
    overrides: TlsOverrides,
) -> Result<(), ConfigError> {
    match (tls.as_mut(), overrides.key, overrides.cert) {
        (Some(cfg), key, cert) => {
            if let Some(key) = key {
                cfg.key = key;
            }
            if let Some(cert) = cert {
                cfg.cert = cert;
            }
            Ok(())
        }
        (None, Some(key), Some(cert)) => {
            *tls = Some(TlsConfig { key, cert });
            Ok(())
        }
        (None, None, None) => Ok(()),
        // One override without the other cannot form a usable pair.
        (None, _, _) => Err(ConfigError::PartialTlsOverride),
    }
}
