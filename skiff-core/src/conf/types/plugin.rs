use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct PluginConfig {
    pub name: String,

    pub kind: PluginKind,

    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Plugin-specific configuration blob.
    #[serde(flatten)]
    pub options: toml::Value,
}

#[derive(Debug, Clone, Copy, Deserialize, Eq, Hash, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum PluginKind {
    SpaFallback,
    RequestLogging,
}

fn default_enabled() -> bool {
    true
}

/// Plugin list used when the config file declares none: exactly one entry,
/// the SPA framework integration.
pub fn default_plugins() -> Vec<PluginConfig> {
    vec![PluginConfig {
        name: "spa".to_string(),
        kind: PluginKind::SpaFallback,
        enabled: true,
        options: toml::Value::Table(toml::map::Map::new()),
    }]
}
