use crate::conf::types::SiteConfig;
use crate::ctx::{RequestCtx, ResponseCtx};
use crate::files::{ServedFile, Validators, serve_path};
use crate::plugin::pipeline::PluginPipeline;
use crate::plugin::registry::PluginRegistry;
use crate::plugin::result::PluginResult;
use async_trait::async_trait;
use http::HeaderMap;
use pingora::prelude::*;
use pingora_http::ResponseHeader;
use std::sync::Arc;

pub struct SkiffGateway {
    pub site: Arc<SiteConfig>,
    pub plugins: Arc<PluginRegistry>,
}

#[async_trait]
impl ProxyHttp for SkiffGateway {
    type CTX = RequestCtx;

    fn new_ctx(&self) -> Self::CTX {
        // Placeholder; real initialization happens in request_filter
        RequestCtx::new(http::Method::GET, "/".parse().unwrap(), HeaderMap::new())
    }

    /// Never reached: every request is answered from disk in request_filter.
    async fn upstream_peer(
        &self,
        _session: &mut Session,
        _ctx: &mut Self::CTX,
    ) -> Result<Box<HttpPeer>> {
        Err(Error::new(Custom("skiff serves from disk; no upstream")))
    }

    /// skiff `on_request` --> Pingora `request_filter`
    ///
    /// Intent:
    /// ACCEPT --> RUN PLUGINS --> SERVE FROM DISK
    async fn request_filter(&self, session: &mut Session, ctx: &mut Self::CTX) -> Result<bool> {
        let req = session.req_header();

        *ctx = RequestCtx::new(req.method.clone(), req.uri.clone(), req.headers.clone());

        // Run on_request plugins first; they may rewrite the route path or
        // answer the request outright.
        match PluginPipeline::run_on_request(self.plugins.all(), ctx) {
            PluginResult::Continue => {}

            PluginResult::Respond(resp) => {
                session.respond_error(resp.status.as_u16()).await?;
                return Ok(true);
            }

            PluginResult::Error(err) => {
                tracing::error!("plugin error in on_request: {err}");
                session.respond_error(500).await?;
                return Ok(true);
            }
        }

        if session.is_upgrade_req() {
            // No WebSockets here; a dev server only hands out files.
            session
                .respond_error(http::StatusCode::BAD_REQUEST.as_u16())
                .await?;
            return Ok(true);
        }

        respond_with_file(session, ctx, &self.site, &self.plugins).await
    }
}

async fn respond_with_file(
    session: &mut Session,
    ctx: &RequestCtx,
    site: &SiteConfig,
    plugins: &PluginRegistry,
) -> Result<bool> {
    let validators = Validators {
        if_none_match: header_string(&ctx.headers, http::header::IF_NONE_MATCH),
        if_modified_since: header_string(&ctx.headers, http::header::IF_MODIFIED_SINCE),
    };

    let ServedFile {
        status,
        headers,
        body,
    } = serve_path(site, &ctx.route_path, &validators).await;

    // Response plugins run before anything hits the wire, so their header
    // and status edits land in the actual response.
    let mut resp_ctx = ResponseCtx::new(status, headers);
    match PluginPipeline::run_on_response(plugins.all(), &mut resp_ctx) {
        PluginResult::Continue => {}

        PluginResult::Respond(replacement) => {
            session.respond_error(replacement.status.as_u16()).await?;
            return Ok(true);
        }

        PluginResult::Error(err) => {
            tracing::error!("plugin error in on_response: {err}");
            session.respond_error(500).await?;
            return Ok(true);
        }
    }

    let mut resp = ResponseHeader::build(resp_ctx.status, None)?;
    for (name, value) in resp_ctx.headers.iter() {
        resp.insert_header(name, value)?;
    }
    session.write_response_header(Box::new(resp), false).await?;

    // HEAD answers carry the same headers and no body.
    if ctx.method == http::Method::HEAD || body.is_empty() {
        session.write_response_body(None, true).await?;
    } else {
        session.write_response_body(Some(body), true).await?;
    }

    Ok(true)
}

fn header_string(headers: &HeaderMap, name: http::header::HeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
}
