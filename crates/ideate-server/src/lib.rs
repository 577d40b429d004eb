//! # ideate-server
//!
//! axum HTTP surface for Ideate.
//!
//! | route | purpose |
//! |---|---|
//! | `POST /api/submit` | validate and relay an idea to the workflow engine |
//! | `POST /api/chat` | ask the assistant about a dashboard |
//! | `GET /api/check-status` | latest record flagged or detected complete |
//! | `POST /api/flag-complete` | set the durable completion flag |
//! | `GET /api/projects` | project picker |
//! | `GET /api/dashboard` | one full record |
//! | `GET /api/export` | downloadable summary |
//! | `GET /api/records` | records created since an instant (poller) |
//! | `GET /api/completion` | completion detector for a fresh submission |
//! | `PUT /api/visualization` | store diagram editor state |
//! | `GET /api/redirect` | post-form hop to a fresh dashboard |

pub mod error;
pub mod routes;
pub mod state;

use axum::Router;
use axum::routing::{get, post, put};
use tower_http::trace::TraceLayer;

pub use error::ApiError;
pub use state::{AppState, StartupError};

async fn health() -> &'static str {
    "ok"
}

/// Build the application router with tracing attached.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(health))
        .route("/api/submit", post(routes::submit::submit))
        .route("/api/chat", post(routes::chat::chat))
        .route("/api/check-status", get(routes::status::check_status))
        .route("/api/flag-complete", post(routes::status::flag_complete))
        .route("/api/projects", get(routes::dashboard::projects))
        .route("/api/dashboard", get(routes::dashboard::dashboard))
        .route("/api/export", get(routes::dashboard::export))
        .route("/api/records", get(routes::records::records))
        .route("/api/completion", get(routes::records::completion))
        .route("/api/visualization", put(routes::visualization::save))
        .route("/api/redirect", get(routes::redirect::redirect))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind `addr` and serve until Ctrl-C.
///
/// # Errors
///
/// Returns the I/O error if the address cannot be bound or the server fails.
pub async fn serve(state: AppState, addr: &str) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(addr = %listener.local_addr()?, "ideate server listening");
    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "cannot listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
