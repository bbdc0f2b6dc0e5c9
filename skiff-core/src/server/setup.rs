use crate::conf::DevConfig;
use crate::plugin::registry::PluginRegistry;
use crate::server::gateway::SkiffGateway;
use anyhow::{Error, Result};
use pingora::prelude::*;
use pingora::server::Server;
use pingora::server::configuration::ServerConf;
use std::sync::Arc;

/// Run the dev server with the given (frozen) configuration.
pub fn run(config: DevConfig) -> Result<()> {
    let server = build_server(config)?;

    // run_forever blocks the main thread as intended
    server.run_forever();
}

/// Build the Pingora server.
pub fn build_server(config: DevConfig) -> Result<Server, Error> {
    let mut server = if let Some(threads) = config.server.threads {
        tracing::debug!(threads, "creating server with overridden worker threads");
        let mut conf = ServerConf::new().expect("could not construct pingora server configuration");
        conf.threads = threads;
        Server::new_with_opt_and_conf(None, conf)
    } else {
        // Create a Pingora server with default settings.
        // "None" is required here to truly tell Pingora to use its default settings.
        Server::new(None)?
    };

    server.bootstrap();

    // Load plugins
    let mut registry = PluginRegistry::new();
    registry.load_from_config(&config.plugins, &config.site)?;
    tracing::debug!("loaded plugin count = {}", registry.all().len());

    let gateway = SkiffGateway {
        site: Arc::new(config.site.clone()),
        plugins: Arc::new(registry),
    };

    // Build the HTTP service from Pingora.
    let mut svc = http_proxy_service(&server.configuration, gateway);

    let addr = config.server.listen_addr();
    match &config.tls {
        Some(tls) => {
            // Paths were resolved and the material read at config load time,
            // so a failure here is unexpected.
            svc.add_tls(
                &addr,
                &tls.cert_path.to_string_lossy(),
                &tls.key_path.to_string_lossy(),
            )?;
            tracing::info!(%addr, root = %config.site.root.display(), "serving (https)");
        }
        None => {
            svc.add_tcp(&addr);
            tracing::info!(%addr, root = %config.site.root.display(), "serving (http)");
        }
    }

    // Register the service.
    server.add_service(svc);

    Ok(server)
}
