//! Book API pass-through proxy.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client ──▶ /proxy/books/* ──▶ handler ──▶ UpstreamClient ──▶ upstream /api/books/*
//!     Client ◀── body or {"error": ..} ◀──────────────┘
//! ```
//!
//! Every inbound request maps to exactly one upstream call. Nothing is
//! cached, retried or transformed.

use clap::Parser;
use std::path::PathBuf;
use tokio::net::TcpListener;

use book_proxy::config::{load_config, validation::validate_config, ConfigError, ProxyConfig};
use book_proxy::http::HttpServer;
use book_proxy::lifecycle::{signals, Shutdown};
use book_proxy::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "book-proxy")]
#[command(about = "Pass-through HTTP proxy for the book management API", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override listener.bind_address.
    #[arg(long)]
    bind: Option<String>,

    /// Override upstream.base_url.
    #[arg(long)]
    upstream: Option<String>,
}

impl Cli {
    fn resolve_config(&self) -> Result<ProxyConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => ProxyConfig::default(),
        };

        if let Some(bind) = &self.bind {
            config.listener.bind_address = bind.clone();
        }
        if let Some(upstream) = &self.upstream {
            config.upstream.base_url = upstream.clone();
        }

        validate_config(&config).map_err(ConfigError::Validation)?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = cli.resolve_config()?;

    logging::init_logging(&config.observability.log_level);

    tracing::info!("book-proxy v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        upstream = %config.upstream.base_url,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        metrics::init_metrics(config.observability.metrics_address.parse()?)?;
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config)?;
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        signals::wait_for_signal().await;
        shutdown.trigger();
    });

    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
