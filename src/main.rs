// hakka-proxy - Token-caching proxy for Hakka translation and speech synthesis

use anyhow::{bail, Result};
use clap::Parser;
use hakka_proxy::cli::Args;
use hakka_proxy::config::AppConfig;
use hakka_proxy::proxy::ProxyHandler;
use hakka_proxy::server::create_router;
use hakka_proxy::utils::logging;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Phase 1: Load configuration
    let mut config = AppConfig::load_from(args.config.as_deref())?;
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    // Phase 2: Initialize logging
    logging::init(&config.logging)?;
    info!("Starting hakka-proxy v{}", env!("CARGO_PKG_VERSION"));

    // Phase 3: Check credentials (never printed, only their presence)
    let missing = config.missing_credentials();
    if args.check_config {
        if missing.is_empty() {
            println!("All backend credentials are configured.");
            return Ok(());
        }
        for key in &missing {
            println!("missing: {}", key);
        }
        bail!("{} credential setting(s) missing", missing.len());
    }
    for key in &missing {
        warn!("Credential setting {} is not configured; calls needing it will fail", key);
    }

    // Phase 4: Build proxy handler (shared HTTP client + credential cache)
    let proxy = ProxyHandler::from_config(&config)?;

    if args.diagnose {
        let report = proxy.diagnose().await;
        println!("{}", serde_json::to_string_pretty(&report)?);
        if report.status != "healthy" {
            bail!("diagnostics failed");
        }
        return Ok(());
    }

    // Phase 5: Build and start HTTP server
    let app = create_router(&config.server, proxy);
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;

    info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    // Phase 6: Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down gracefully");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            info!("Received SIGTERM signal");
        },
    }
}
