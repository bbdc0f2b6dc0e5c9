use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Directory the site is served from, relative to the config file.
    pub root: PathBuf,

    /// Public base path the site is mounted under.
    pub base: String,

    /// Index file served for directory requests.
    pub index: String,

    pub directory_listing: bool,

    /// Upper bound on a single served file; bodies are buffered in memory.
    pub max_file_size: u64,

    pub cache: CachePolicy,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            base: "/".to_string(),
            index: "index.html".to_string(),
            directory_listing: false,
            max_file_size: 10 * 1024 * 1024, // 10 MiB
            cache: CachePolicy::default(),
        }
    }
}

/// Cache-Control policy for served files.
///
/// The default max-age of 0 renders as `no-cache`: clients revalidate on
/// every request, which is what a dev loop wants.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CachePolicy {
    pub max_age: u32, // seconds
    pub public: bool,
    pub immutable: bool,
}

impl Default for CachePolicy {
    fn default() -> Self {
        Self {
            max_age: 0,
            public: false,
            immutable: false,
        }
    }
}
