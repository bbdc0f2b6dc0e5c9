use crate::conf::types::SiteConfig;
use crate::ctx::RequestCtx;
use crate::plugin::{Plugin, PluginResult};
use anyhow::{Context, Result};
use http::Method;
use serde::Deserialize;

/// The framework integration for client-side routed apps.
///
/// Single-page apps handle navigation in the browser, so a request like
/// `/settings/profile` has no file on disk. This plugin rewrites
/// extension-less GET/HEAD paths to the index route, letting the app's
/// router take over once the page loads.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SpaFallbackConfig {
    /// Where navigation requests land. Defaults to the site's base path,
    /// so a site mounted on "/app" falls back to "/app".
    index_route: Option<String>,

    /// Path prefixes that must never be rewritten (e.g. "/api").
    #[serde(default)]
    exclude_prefixes: Vec<String>,
}

pub struct SpaFallbackPlugin {
    base: String,
    index_route: String,
    exclude_prefixes: Vec<String>,
}

impl SpaFallbackPlugin {
    pub fn from_config(raw: &toml::Value, site: &SiteConfig) -> Result<Self> {
        let cfg: SpaFallbackConfig = raw
            .clone()
            .try_into()
            .context("invalid spa_fallback config")?;

        Ok(Self {
            base: site.base.clone(),
            index_route: cfg.index_route.unwrap_or_else(|| site.base.clone()),
            exclude_prefixes: cfg.exclude_prefixes,
        })
    }

    fn should_rewrite(&self, method: &Method, path: &str) -> bool {
        if *method != Method::GET && *method != Method::HEAD {
            return false;
        }

        // Requests outside the mounted base are someone else's 404.
        if !self.under_base(path) {
            return false;
        }

        if path == self.index_route {
            return false;
        }

        if self
            .exclude_prefixes
            .iter()
            .any(|prefix| path.starts_with(prefix.as_str()))
        {
            return false;
        }

        // A dot in the final segment means an asset request (main.js,
        // logo.svg); those must 404 honestly instead of returning the index.
        let last_segment = path.rsplit('/').next().unwrap_or("");
        !last_segment.contains('.')
    }

    fn under_base(&self, path: &str) -> bool {
        if self.base == "/" {
            return true;
        }
        match path.strip_prefix(&self.base) {
            Some("") => true,
            Some(rest) => rest.starts_with('/'),
            None => false,
        }
    }
}

impl Plugin for SpaFallbackPlugin {
    fn on_request(&self, ctx: &mut RequestCtx) -> PluginResult {
        if self.should_rewrite(&ctx.method, &ctx.route_path) {
            tracing::debug!(
                from = %ctx.route_path,
                to = %self.index_route,
                "spa fallback rewrite"
            );
            ctx.route_path = self.index_route.clone();
        }

        PluginResult::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::{HeaderMap, Uri};

    fn plugin() -> SpaFallbackPlugin {
        SpaFallbackPlugin::from_config(
            &toml::Value::Table(toml::map::Map::new()),
            &SiteConfig::default(),
        )
        .unwrap()
    }

    fn ctx_for(method: Method, path: &'static str) -> RequestCtx {
        RequestCtx::new(method, Uri::from_static(path), HeaderMap::new())
    }

    #[test]
    fn navigation_paths_are_rewritten_to_the_index_route() {
        // Arrange
        let plugin = plugin();
        let mut ctx = ctx_for(Method::GET, "/settings/profile");

        // Act
        let result = plugin.on_request(&mut ctx);

        // Assert
        assert!(matches!(result, PluginResult::Continue));
        assert_eq!(ctx.route_path, "/");
    }

    #[test]
    fn asset_paths_are_left_alone() {
        // Arrange
        let plugin = plugin();
        let mut ctx = ctx_for(Method::GET, "/assets/main.js");

        // Act
        plugin.on_request(&mut ctx);

        // Assert
        assert_eq!(ctx.route_path, "/assets/main.js");
    }

    #[test]
    fn non_get_requests_are_left_alone() {
        // Arrange
        let plugin = plugin();
        let mut ctx = ctx_for(Method::POST, "/settings/profile");

        // Act
        plugin.on_request(&mut ctx);

        // Assert
        assert_eq!(ctx.route_path, "/settings/profile");
    }

    #[test]
    fn excluded_prefixes_are_left_alone() {
        // Arrange
        let mut opts = toml::map::Map::new();
        opts.insert(
            "exclude_prefixes".to_string(),
            toml::Value::Array(vec![toml::Value::String("/api".to_string())]),
        );
        let plugin =
            SpaFallbackPlugin::from_config(&toml::Value::Table(opts), &SiteConfig::default())
                .unwrap();

        let mut ctx = ctx_for(Method::GET, "/api/users");

        // Act
        plugin.on_request(&mut ctx);

        // Assert
        assert_eq!(ctx.route_path, "/api/users");
    }

    #[test]
    fn the_index_route_itself_is_not_rewritten() {
        // Arrange
        let plugin = plugin();
        let mut ctx = ctx_for(Method::GET, "/");

        // Act
        plugin.on_request(&mut ctx);

        // Assert
        assert_eq!(ctx.route_path, "/");
    }

    #[test]
    fn default_index_route_follows_the_site_base() {
        // Arrange
        let site = SiteConfig {
            base: "/app".to_string(),
            ..Default::default()
        };
        let plugin =
            SpaFallbackPlugin::from_config(&toml::Value::Table(toml::map::Map::new()), &site)
                .unwrap();

        let mut inside = ctx_for(Method::GET, "/app/settings/profile");
        let mut outside = ctx_for(Method::GET, "/other/page");
        let mut sibling = ctx_for(Method::GET, "/application");

        // Act
        plugin.on_request(&mut inside);
        plugin.on_request(&mut outside);
        plugin.on_request(&mut sibling);

        // Assert
        assert_eq!(inside.route_path, "/app");
        assert_eq!(outside.route_path, "/other/page");
        assert_eq!(sibling.route_path, "/application");
    }
}
