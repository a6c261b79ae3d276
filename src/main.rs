use anyhow::Result;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

mod config;
mod error;
mod force;
mod routes;
mod views;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (for log level)
    let config = config::Config::load()?;

    // Initialize logging with a configured level
    let log_level = config.log_level.to_lowercase();
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_level));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("🚀 Force Viewer starting...");
    tracing::info!(
        "Server configured: {}:{}",
        config.server_host,
        config.server_port
    );
    tracing::info!("Salesforce login endpoint: {}", config.login_url);

    if config.credentials.is_configured() {
        tracing::info!("✅ Connected App credentials loaded");
    } else {
        tracing::warn!(
            "CONSUMER_KEY / CONSUMER_SECRET not set, all requests will be sent to /setup"
        );
    }

    // Initialize the Salesforce client
    let force = Arc::new(force::ForceClient::new(
        config.credentials.clone(),
        config.login_url.clone(),
        config.http_connect_timeout,
        config.http_request_timeout,
    )?);
    tracing::info!("✅ Salesforce client initialized");

    let app_state = routes::AppState {
        config: Arc::new(config.clone()),
        force,
    };

    // Build the application with routes and middleware
    let app = build_app(app_state);

    // Bind to configured host and port
    let addr = format!("{}:{}", config.server_host, config.server_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    // Start server with graceful shutdown
    tracing::info!("🚀 Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("👋 Server shutdown complete");

    Ok(())
}

/// Build the application with all routes and middleware
fn build_app(state: routes::AppState) -> axum::Router {
    axum::Router::new()
        .merge(routes::health_routes())
        .merge(routes::app_routes(state))
        .layer(TraceLayer::new_for_http())
}

/// Handle graceful shutdown signal
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received terminate signal, initiating graceful shutdown...");
        },
    }
}
