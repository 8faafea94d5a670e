use std::net::SocketAddr;

use axum::Router;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use massmail_backend::api;
use massmail_backend::config::{Config, Platform};
use massmail_backend::mail::Mailer;
use massmail_backend::state::AppState;
use massmail_backend::store::create_store;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    tracing::info!("Starting MassMail Backend...");

    // Load configuration
    let config = Config::from_env()?;
    tracing::info!(
        host = %config.server_host,
        port = %config.server_port,
        store = ?config.store_backend,
        mail_transport = ?config.mail_transport,
        "Configuration loaded"
    );

    for platform in [Platform::Gmail, Platform::Outlook] {
        let smtp = config.smtp(platform);
        if smtp.username.is_none() || smtp.password.is_none() {
            tracing::warn!(platform = %platform, host = %smtp.host, "SMTP credentials not configured");
        }
    }

    // Create document store
    let store = create_store(&config)?;

    // Test store connection
    match store.health_check().await {
        Ok(true) => tracing::info!("Store connection established"),
        Ok(false) => tracing::warn!("Store health check returned false"),
        Err(e) => {
            tracing::error!(error = %e, "Failed to connect to store");
            // Continue anyway, might recover later
        }
    }

    // Create application state
    let mailer = Mailer::from_config(&config);
    let state = AppState::new(config.clone(), store, mailer);

    // Build router
    let app = Router::new()
        .merge(api::create_router(state))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr: SocketAddr = config.server_addr().parse()?;
    let listener = TcpListener::bind(addr).await?;

    tracing::info!(address = %addr, "Server listening");

    // Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}

/// Handle shutdown signals
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
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
                tracing::error!(error = %e, "Failed to install signal handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, shutting down...");
        },
        _ = terminate => {
            tracing::info!("Received terminate signal, shutting down...");
        },
    }
}
