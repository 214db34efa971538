//! `parley` -- translation relay server.
//!
//! - `parley serve` -- run the gateway.
//! - `parley check-config` -- load and validate configuration.
//! - `parley languages` -- list supported language codes.

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use parley::config::Config;
use parley::voice::LanguageCode;

/// Text and speech translation relay.
#[derive(Parser)]
#[command(name = "parley", about = "Text and speech translation relay", version)]
struct Cli {
    /// Enable verbose (debug-level) logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file path (defaults to the platform config directory).
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the gateway.
    Serve {
        /// Listen address (overrides config and PARLEY_HOST).
        #[arg(long)]
        host: Option<String>,

        /// Listen port, 0 for ephemeral (overrides config and PARLEY_PORT).
        #[arg(long)]
        port: Option<u16>,
    },

    /// Load the configuration, validate it and print the result.
    CheckConfig,

    /// List supported language codes and their backend locales.
    Languages,
}

fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let config = match path {
        Some(path) => Config::load(path)?,
        None => Config::load_or_default(&Config::default_path())?,
    };
    config.with_env_overrides()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "parley=debug" } else { "parley=info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .init();

    match cli.command {
        Commands::Serve { host, port } => {
            let mut config = load_config(cli.config.as_deref())?;
            if let Some(host) = host {
                config.gateway.host = host;
            }
            if let Some(port) = port {
                config.gateway.port = port;
            }
            parley::gateway::run_gateway(config).await?;
        }
        Commands::CheckConfig => {
            let config = load_config(cli.config.as_deref())?;
            config.validate()?;
            let rendered = toml::to_string_pretty(&config).context("failed to render config")?;
            println!("{rendered}");
        }
        Commands::Languages => {
            for lang in LanguageCode::all() {
                println!(
                    "{:<4}{:<22}{:<10}{}",
                    lang.as_str(),
                    lang.display_name(),
                    lang.translation_locale(),
                    lang.recognition_locale()
                );
            }
        }
    }

    Ok(())
}
