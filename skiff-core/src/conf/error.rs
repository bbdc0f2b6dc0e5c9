use std::path::PathBuf;
use thiserror::Error;

/// Fatal configuration errors. None of these are recovered from: the server
/// refuses to start rather than running on a degraded configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    //-------------------------------------------------------------------------
    // IO
    //-------------------------------------------------------------------------
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    //-------------------------------------------------------------------------
    // Parsing
    //-------------------------------------------------------------------------
    #[error("invalid configuration file: {path}\n\n{source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    //-------------------------------------------------------------------------
    // Listener
    //-------------------------------------------------------------------------
    #[error("invalid listen address '{addr}'")]
    InvalidListenAddr { addr: String },

    //-------------------------------------------------------------------------
    // Site
    //-------------------------------------------------------------------------
    #[error("site root does not exist or is not a directory: {path} ({reason})")]
    InvalidSiteRoot { path: PathBuf, reason: String },

    #[error("site base path '{base}' must start with '/'")]
    InvalidBasePath { base: String },

    //-------------------------------------------------------------------------
    // Plugins
    //-------------------------------------------------------------------------
    #[error("duplicate plugin definition: {name}")]
    DuplicatePlugin { name: String },

    //-------------------------------------------------------------------------
    // TLS
    //-------------------------------------------------------------------------
    #[error("key file does not exist: {path}")]
    MissingKeyFile { path: PathBuf },

    #[error("cert file does not exist: {path}")]
    MissingCertFile { path: PathBuf },

    #[error("failed to read TLS material {path}: {source}")]
    ReadTls {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path} does not look like PEM (no '-----BEGIN' marker)")]
    InvalidPem { path: PathBuf },

    #[error("SKIFF_TLS_KEY and SKIFF_TLS_CERT must be set together when no [server.tls] section exists")]
    PartialTlsOverride,
}

impl ConfigError {
    pub fn read_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ReadFile {
            path: path.into(),
            source,
        }
    }

    pub fn parse(path: impl Into<PathBuf>, source: toml::de::Error) -> Self {
        Self::Parse {
            path: path.into(),
            source,
        }
    }
}
