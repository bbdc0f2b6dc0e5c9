use crate::conf::error::ConfigError;
use crate::conf::types::ConfigFile;
use std::collections::HashSet;
use std::net::IpAddr;
use std::path::Path;

/// Semantic validation of the parsed config file.
///
/// IO and parse failures have already hard-failed by the time this runs;
/// everything here is about values that parsed fine but make no sense.
pub(crate) fn validate_config(file: &ConfigFile, root: &Path) -> Result<(), ConfigError> {
    validate_listen(&file.server.host, file.server.port)?;
    validate_site(file, root)?;
    validate_plugins(file)?;
    Ok(())
}

fn validate_listen(host: &str, port: u16) -> Result<(), ConfigError> {
    let invalid = || ConfigError::InvalidListenAddr {
        addr: format!("{host}:{port}"),
    };

    if host.is_empty() {
        return Err(invalid());
    }

    // Either a literal IP, or a hostname we can hand to the listener as-is.
    if host.parse::<IpAddr>().is_err() {
        let hostname_ok = host
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '.');
        if !hostname_ok {
            return Err(invalid());
        }
    }

    Ok(())
}

fn validate_site(file: &ConfigFile, root: &Path) -> Result<(), ConfigError> {
    if !file.site.base.starts_with('/') {
        return Err(ConfigError::InvalidBasePath {
            base: file.site.base.clone(),
        });
    }

    let site_root = crate::conf::tls::resolve_path(root, &file.site.root);
    match site_root.metadata() {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(ConfigError::InvalidSiteRoot {
            path: site_root,
            reason: "not a directory".to_string(),
        }),
        Err(e) => Err(ConfigError::InvalidSiteRoot {
            path: site_root,
            reason: e.to_string(),
        }),
    }
}

fn validate_plugins(file: &ConfigFile) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();
    for plugin in &file.plugins {
        if !seen.insert(plugin.name.as_str()) {
            return Err(ConfigError::DuplicatePlugin {
                name: plugin.name.clone(),
            });
        }
    }
    Ok(())
}
