use anyhow::Context;
use clap::{Parser, Subcommand};
use skiff_core::conf::load_config;
use skiff_core::logging::init_logging;
use skiff_core::server;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "skiff", version, about = "skiff: local HTTPS dev server")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the site (default)
    Run {
        /// Path to the skiff config file
        #[arg(long, default_value = "skiff.toml")]
        config: PathBuf,
    },

    /// Load and validate the config without binding anything
    Check {
        #[arg(long, default_value = "skiff.toml")]
        config: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Command::Check { config }) => {
            init_logging();

            let cfg = load_and_report(&config)?;
            println!(
                "ok: {} on {} ({} plugin(s), tls {})",
                config.display(),
                cfg.server.listen_addr(),
                cfg.plugins.len(),
                if cfg.tls.is_some() { "on" } else { "off" },
            );
            Ok(())
        }

        Some(Command::Run { config }) => {
            init_logging();
            serve(&config)
        }

        None => {
            init_logging();
            serve(Path::new("skiff.toml"))
        }
    }
}

fn serve(config: &Path) -> anyhow::Result<()> {
    let cfg = load_and_report(config)?;
    tracing::info!(config = %config.display(), "config loaded");
    server::run(cfg)
}

fn load_and_report(config: &Path) -> anyhow::Result<skiff_core::conf::DevConfig> {
    load_config(config).with_context(|| format!("failed to load config {}", config.display()))
}
