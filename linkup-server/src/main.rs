use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::http::HeaderValue;
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use linkup_server::cli::CliArgs;
use linkup_server::config::{ServerConfig, load_network_config};
use linkup_server::{AppState, create_router};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let cli_args = CliArgs::parse();

    // Set up logging
    let filter = match cli_args.log_level {
        Some(ref level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    }
    .add_directive("surrealdb_core=warn".parse()?)
    .add_directive("surrealdb=warn".parse()?);

    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("Starting Linkup server v{}", linkup::VERSION);

    // Load configuration from CLI arguments and environment variables
    let server_config = ServerConfig::from_cli_and_env(cli_args)?;

    match &server_config.config_file {
        Some(path) => info!("Loading Linkup configuration from {}", path.display()),
        None => info!("No config file provided, using default configuration"),
    }
    let network_config = load_network_config(server_config.config_file.as_deref())?;
    info!(
        accept_mode = ?network_config.relationships.accept_mode,
        "Relationship settings loaded"
    );

    let network = linkup::init(network_config).await?;
    let app_state = Arc::new(AppState::new(network, server_config.clone()));

    let cors = if server_config.cors_origins.is_empty() {
        CorsLayer::permissive()
    } else {
        let origins = server_config
            .cors_origins
            .iter()
            .filter_map(|origin| match origin.parse::<HeaderValue>() {
                Ok(value) => Some(value),
                Err(_) => {
                    warn!("Ignoring invalid CORS origin: {}", origin);
                    None
                }
            })
            .collect::<Vec<_>>();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    };

    // Create the router with all API endpoints
    let app = create_router(app_state.clone())
        .layer(RequestBodyLimitLayer::new(server_config.max_request_size))
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    // Start the server
    let addr = SocketAddr::from(([0, 0, 0, 0], server_config.port));
    let listener = TcpListener::bind(addr).await?;

    info!("Server listening on {}", addr);
    info!("API documentation available at http://{}/docs", addr);
    if server_config.allow_signup {
        info!("User signup is enabled");
    } else {
        info!("User signup is disabled");
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shutting down");
    app_state.network.shutdown().await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
