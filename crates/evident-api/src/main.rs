//! # evident-api — Binary Entry Point
//!
//! Loads the service configuration, catalogs and plans, then serves the
//! metadata API.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use evident_api::config::{LogFormat, ServiceConfig};

/// Compliance metadata service.
#[derive(Parser, Debug)]
#[command(name = "evident-api", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Path to the service configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the configured listening port.
    #[arg(long)]
    port: Option<u16>,

    /// Emit logs as JSON regardless of configuration.
    #[arg(long)]
    json_logs: bool,
}

fn init_tracing(verbose: u8, format: LogFormat) {
    // RUST_LOG wins over -v.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match verbose {
        0 => EnvFilter::new("info"),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    });

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Text => builder.init(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => ServiceConfig::load(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => ServiceConfig::default(),
    };
    if let Some(port) = cli.port {
        config.port = port;
        config.validate()?;
    }

    let format = if cli.json_logs { LogFormat::Json } else { config.log_format };
    init_tracing(cli.verbose, format);

    if cli.config.is_none() {
        tracing::warn!("no configuration file given; serving with an empty scope");
    }

    let state = evident_api::bootstrap(&config).context("bootstrapping service state")?;
    let app = evident_api::app(state);

    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    tracing::info!("evident-api listening on {addr}");

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
