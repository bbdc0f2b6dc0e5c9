use crate::ctx::{RequestCtx, ResponseCtx};
use crate::plugin::errors::PluginError;
use crate::plugin::{Plugin, PluginResult};
use anyhow::{Context, Result};
use http::HeaderMap;
use serde::Deserialize;
use std::collections::BTreeMap;
use tracing::{debug, error, info, trace, warn};

#[derive(Debug, Deserialize, Clone, Copy)]
#[serde(rename_all = "lowercase")]
enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RequestLoggingConfig {
    #[serde(default = "default_level")]
    level: LogLevel,

    // Headers are excluded by default; dev traffic still carries cookies.
    #[serde(default)]
    include_headers: bool,

    #[serde(default)]
    redact_headers: Vec<String>,
}

fn default_level() -> LogLevel {
    LogLevel::Info
}

macro_rules! emit {
    ($level:expr, $($fields:tt)*) => {
        match $level {
            LogLevel::Trace => trace!($($fields)*),
            LogLevel::Debug => debug!($($fields)*),
            LogLevel::Info  => info!($($fields)*),
            LogLevel::Warn  => warn!($($fields)*),
            LogLevel::Error => error!($($fields)*),
        }
    };
}

/// Structured request/response logging plugin.
pub struct RequestLoggingPlugin {
    level: LogLevel,
    include_headers: bool,
    redact_headers: Vec<String>,
}

impl RequestLoggingPlugin {
    pub fn from_config(raw: &toml::Value) -> Result<Self> {
        let cfg: RequestLoggingConfig = raw
            .clone()
            .try_into()
            .context("invalid request_logging config")?;

        Ok(Self {
            level: cfg.level,
            include_headers: cfg.include_headers,
            redact_headers: cfg
                .redact_headers
                .into_iter()
                .map(|h| h.to_lowercase())
                .collect(),
        })
    }

    fn headers_json(&self, headers: &HeaderMap) -> Option<String> {
        if !self.include_headers {
            return None;
        }

        let headers = self.build_redacted_headers(headers);

        serde_json::to_string(&headers).ok()
    }

    fn build_redacted_headers(&self, headers: &HeaderMap) -> BTreeMap<String, String> {
        let mut out = BTreeMap::new();

        for (name, value) in headers.iter() {
            let name_str = name.as_str().to_lowercase();

            let redacted = self.redact_headers.contains(&name_str);

            let val = if redacted {
                "<redacted>".to_string()
            } else {
                match value.to_str() {
                    Ok(v) => v.to_string(),
                    Err(_) => "<binary>".to_string(),
                }
            };

            out.insert(name_str, val);
        }

        out
    }
}

impl Plugin for RequestLoggingPlugin {
    fn on_request(&self, ctx: &mut RequestCtx) -> PluginResult {
        emit!(
            self.level,
            event = "request",
            method = %ctx.method,
            uri = %ctx.original_uri,
            headers = self.headers_json(&ctx.headers),
        );

        PluginResult::Continue
    }

    fn on_response(&self, ctx: &mut ResponseCtx) -> PluginResult {
        emit!(
            self.level,
            event = "response",
            status = ctx.status.as_u16(),
        );

        PluginResult::Continue
    }

    fn on_error(&self, err: &PluginError) {
        emit!(
            self.level,
            event = "plugin_error",
            fatal = err.fatal,
            message = %err.message,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderValue;

    #[test]
    fn redacted_headers_are_masked() {
        // Arrange
        let mut opts = toml::map::Map::new();
        opts.insert("include_headers".to_string(), toml::Value::Boolean(true));
        opts.insert(
            "redact_headers".to_string(),
            toml::Value::Array(vec![toml::Value::String("Cookie".to_string())]),
        );
        let plugin = RequestLoggingPlugin::from_config(&toml::Value::Table(opts)).unwrap();

        let mut headers = HeaderMap::new();
        headers.insert(http::header::COOKIE, HeaderValue::from_static("secret"));
        headers.insert(http::header::ACCEPT, HeaderValue::from_static("text/html"));

        // Act
        let redacted = plugin.build_redacted_headers(&headers);

        // Assert
        assert_eq!(redacted["cookie"], "<redacted>");
        assert_eq!(redacted["accept"], "text/html");
    }

    #[test]
    fn headers_are_omitted_unless_enabled() {
        // Arrange
        let plugin =
            RequestLoggingPlugin::from_config(&toml::Value::Table(toml::map::Map::new())).unwrap();

        let mut headers = HeaderMap::new();
        headers.insert(http::header::ACCEPT, HeaderValue::from_static("text/html"));

        // Act / Assert
        assert!(plugin.headers_json(&headers).is_none());
    }
}
