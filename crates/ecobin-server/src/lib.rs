//! HTTP front for the bin status service.
//!
//! # Routes
//! - `PUT /bins/{id}/status` with `{"status":"OK"|"FULL"}`: records a status report
//! - `GET /bins/{id}`: one bin
//! - `GET /status-updates?binId=...`: report history of one bin, oldest first
//! - `GET /health`
//!
//! Every response, including unknown paths (404) and wrong methods (405), is JSON
//! and carries `Access-Control-Allow-Origin: *`. CORS preflights are the exception:
//! they are answered with headers only.
//!
//! # Configuration
//!
//! | Variable | Default |
//! |---|---|
//! | `ECOBIN_PORT` | `8080` |
//! | `ECOBIN_STORE` | `memory` (`memory` or `redis`) |
//! | `REDIS_URL` | `redis://127.0.0.1:6379` |
//! | `ECOBIN_BINS_PREFIX` | `bins` |
//! | `ECOBIN_HISTORY_PREFIX` | `status-updates` |
//! | `ECOBIN_LOG_FORMAT` | `text` (`text` or `json`) |
//! | `ECOBIN_SEED_FILE` | unset |
//! | `RUST_LOG` | `info` |
//!
//! ```sh
//! ECOBIN_SEED_FILE=bins.json cargo run -p ecobin-server
//! curl -X PUT localhost:8080/bins/abc123/status -H 'content-type: application/json' -d '{"status":"FULL"}'
//! ```
use std::{sync::Arc, time::Duration};

use axum::{
    Router,
    http::{
        HeaderValue, Method,
        header::{ACCESS_CONTROL_ALLOW_ORIGIN, CONTENT_TYPE},
    },
    routing::{get, put},
};
use ecobin_core::config::{Config, LogFormat};
use ecobin_core::observability::init_tracing;
use tokio::{net::TcpListener, signal::ctrl_c};
use tower_http::{
    cors::{Any, CorsLayer},
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};
use tracing::{error, info};

pub mod error;
pub mod routes;
pub mod seed;
pub mod state;

use routes::{
    fallback_handler, get_bin_handler, health_handler, method_not_allowed_handler,
    status_updates_handler, update_status_handler,
};
use state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::PUT, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route("/bins/{id}/status", put(update_status_handler))
        .route("/bins/{id}", get(get_bin_handler))
        .route("/status-updates", get(status_updates_handler))
        .route("/health", get(health_handler))
        .fallback(fallback_handler)
        .method_not_allowed_fallback(method_not_allowed_handler)
        .layer(TraceLayer::new_for_http())
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ))
        .layer(cors)
        .with_state(state)
}

pub async fn start_server() -> anyhow::Result<()> {
    // Tracing comes up before the rest of the config so its defaults are logged.
    let log_format = std::env::var("ECOBIN_LOG_FORMAT")
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(LogFormat::Text);
    init_tracing(log_format)?;

    let config = Config::from_env()?;

    info!("Initializing state...");
    let state = AppState::from_config(&config).await?;

    info!("Starting server...");
    let app = router(state);

    let address = format!("0.0.0.0:{}", config.port);
    info!("Binding to {address}");

    let listener = TcpListener::bind(&address).await?;
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                error!("Failed to install Ctrl+C handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut terminate) => {
                terminate.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                error!("Failed to install signal handler: {e}");
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
