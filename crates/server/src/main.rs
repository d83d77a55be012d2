use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::io::BufReader;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use steamgames_core::{
    config::CONFIG_PATH_ENV, load_config, validate_config, CatalogProvider, Config, GameLibrary,
    HttpGet, ReqwestHttpClient, SteamAppListClient, SteamLibraryClient, Transport,
};
use steamgames_server::{api::create_router, mcp, state::AppState};

/// Application version
const VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Logs go to stderr; stdout carries the stdio protocol stream
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!(version = VERSION, "Starting steam-games");

    let config_path = std::env::var(CONFIG_PATH_ENV).ok().map(PathBuf::from);
    match &config_path {
        Some(path) => info!("Loading configuration from {:?}", path),
        None => info!("No config file set, using environment only"),
    }
    let config = load_config(config_path.as_deref()).context("Failed to load config")?;

    validate_config(&config).context("Configuration validation failed")?;

    info!(
        transport = ?config.server.transport,
        tool_prefix = %config.tools.prefix,
        cache_ttl_secs = config.search.cache_ttl_secs,
        "Configuration loaded successfully"
    );

    let state = Arc::new(build_state(config.clone())?);

    match config.server.transport {
        Transport::Stdio => serve_stdio(state).await,
        Transport::Http => serve_http(state, &config).await,
    }
}

fn build_state(config: Config) -> Result<AppState> {
    let http: Arc<dyn HttpGet> = Arc::new(
        ReqwestHttpClient::new(config.store.connect_timeout())
            .context("Failed to create HTTP client")?,
    );

    let catalog: Arc<dyn CatalogProvider> = Arc::new(SteamAppListClient::new(
        Arc::clone(&http),
        config.steam.web_api_url.clone(),
    ));
    let library: Arc<dyn GameLibrary> = Arc::new(SteamLibraryClient::new(
        Arc::clone(&http),
        config.steam.web_api_url.clone(),
        config.steam.api_key.clone(),
    ));

    Ok(AppState::new(config, catalog, http, library))
}

async fn serve_stdio(state: Arc<AppState>) -> Result<()> {
    let stdin = BufReader::new(tokio::io::stdin());
    let stdout = tokio::io::stdout();

    tokio::select! {
        result = mcp::stdio::serve(&state, stdin, stdout) => {
            result.context("stdio transport failed")?;
            info!("stdin closed, shutting down");
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    Ok(())
}

async fn serve_http(state: Arc<AppState>, config: &Config) -> Result<()> {
    let app = create_router(state);

    let addr = SocketAddr::new(config.server.host, config.server.port);
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shut down");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
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
            Ok(mut sig) => {
                sig.recv().await;
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
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
