//! HTTP surface: a single page plus static chart files.
//!
//! The server owns no mutable state. The aggregated [`ReportContext`] is
//! computed once at startup and shared behind an `Arc`; each page request
//! re-renders the three charts from it (same tables, same SVG bytes, so
//! concurrent overwrites of the fixed filenames are benign) and embeds the
//! resulting filenames in the page.

pub mod page;

use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;
use axum::extract::State;
use axum::response::Html;
use axum::routing::get;
use serde::{Deserialize, Serialize};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::charts;
use crate::domain::ReportContext;
use crate::error::AppError;

/// Server bind configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Shared request state: the precomputed tables and the chart output dir.
#[derive(Debug)]
pub struct DashboardState {
    pub context: ReportContext,
    pub static_dir: PathBuf,
}

/// Create the application router.
pub fn create_router(state: Arc<DashboardState>) -> Router {
    let static_dir = state.static_dir.clone();
    Router::new()
        .route("/", get(index))
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind and serve until the process is stopped.
pub async fn serve(config: &ServerConfig, state: Arc<DashboardState>) -> Result<(), AppError> {
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::runtime(format!("Failed to bind {addr}: {e}")))?;

    info!("Listening on http://{addr}");

    axum::serve(listener, create_router(state))
        .await
        .map_err(|e| AppError::runtime(format!("Server error: {e}")))
}

/// The single dashboard page.
///
/// Charts are re-rendered from the shared context on every request; a failed
/// render yields an empty filename and the page omits that figure.
async fn index(State(state): State<Arc<DashboardState>>) -> Html<String> {
    let volume = charts::render_volume_chart(&state.context.volume_by_type, &state.static_dir);
    let share = charts::render_share_chart(&state.context.monthly_share, &state.static_dir);
    let comparison =
        charts::render_comparison_chart(&state.context.yearly_comparison, &state.static_dir);

    Html(page::render_index(&volume, &share, &comparison))
}
