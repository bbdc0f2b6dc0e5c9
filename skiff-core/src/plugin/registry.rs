use crate::conf::types::{PluginConfig, PluginKind, SiteConfig};
use crate::plugin::Plugin;
use crate::plugin::builtin::request_logging::RequestLoggingPlugin;
use crate::plugin::builtin::spa_fallback::SpaFallbackPlugin;
use anyhow::{Context, Result, anyhow};
use std::collections::HashMap;
use std::sync::Arc;

type BuiltinBuilder = fn(&toml::Value, &SiteConfig) -> Result<Arc<dyn Plugin>>;

fn build_spa_fallback(cfg: &toml::Value, site: &SiteConfig) -> Result<Arc<dyn Plugin>> {
    Ok(Arc::new(SpaFallbackPlugin::from_config(cfg, site)?))
}

fn build_request_logging(cfg: &toml::Value, _site: &SiteConfig) -> Result<Arc<dyn Plugin>> {
    Ok(Arc::new(RequestLoggingPlugin::from_config(cfg)?))
}

fn builtin_builders() -> HashMap<PluginKind, BuiltinBuilder> {
    let mut map = HashMap::new();

    map.insert(PluginKind::SpaFallback, build_spa_fallback as BuiltinBuilder);

    map.insert(
        PluginKind::RequestLogging,
        build_request_logging as BuiltinBuilder,
    );

    map
}

pub struct PluginRegistry {
    plugins: Vec<Arc<dyn Plugin>>,
}

impl Default for PluginRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl PluginRegistry {
    pub fn new() -> Self {
        Self {
            plugins: Vec::new(),
        }
    }

    pub fn load_from_config(&mut self, configs: &[PluginConfig], site: &SiteConfig) -> Result<()> {
        let builders = builtin_builders();

        for plugin_cfg in configs {
            if !plugin_cfg.enabled {
                continue;
            }

            let builder = builders
                .get(&plugin_cfg.kind)
                .ok_or_else(|| anyhow!("unknown builtin plugin '{}'", plugin_cfg.name))?;

            let plugin = builder(&plugin_cfg.options, site)
                .with_context(|| format!("failed to build plugin '{}'", plugin_cfg.name))?;

            self.plugins.push(plugin);
        }

        Ok(())
    }

    pub fn all(&self) -> &[Arc<dyn Plugin>] {
        &self.plugins
    }
}
