//! EmailGuard - email reputation lookups
//!
//! Accepts an email address, asks EmailRep about it, stores the normalized
//! result and serves recent lookups plus aggregate counts to a static page.
//!
//! ## Module Organization
//!
//! - `routes/`: axum handlers (thin wrappers)
//! - `services/`: Business logic (HTTP-agnostic)
//! - `adapters/`: EmailRep client and lookup store backends
//! - `state/`: Shared application state
//! - `types/`: Data structures, responses and errors
//! - `config/`: Configuration management

pub mod adapters;
pub mod config;
pub mod routes;
pub mod services;
pub mod state;
pub mod types;

use std::sync::Arc;
use std::time::Duration;

use axum::{
    http::{header::CONTENT_TYPE, Method},
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::EnvFilter;

use state::AppState;
use types::error::Result;

/// Build the router: the JSON API under `/api`, static files for everything else.
pub fn app(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    let static_files = ServeDir::new(&state.config.server.static_dir);

    Router::new()
        .route("/api/check-email", post(routes::check_email))
        .route(
            "/api/lookups",
            get(routes::list_lookups).post(routes::save_lookup),
        )
        .route("/api/stats", get(routes::lookup_stats))
        .fallback_service(static_files)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Install the tracing subscriber.
///
/// `RUST_LOG` wins; otherwise debug builds log this crate at debug level.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cfg!(debug_assertions) {
            EnvFilter::new("emailguard_lib=debug,tower_http=debug,info")
        } else {
            EnvFilter::new("info")
        }
    });

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Load configuration, open the store and serve until Ctrl+C or SIGTERM.
pub async fn run() -> Result<()> {
    init_tracing();

    info!("Starting EmailGuard ...");

    let config = config::load()?;
    let address = format!("{}:{}", config.server.host, config.server.port);

    let state = AppState::from_config(config)?;
    let router = app(state);

    info!("Binding to {address}");
    let listener = TcpListener::bind(&address).await?;
    info!("Running on http://{address}");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }

        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::warn!("Failed to install terminate handler: {}", e);
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
