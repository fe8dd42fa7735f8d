//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments and initializes logging
//! - loads and normalizes both source datasets
//! - runs the aggregation pass and builds the immutable report context
//! - starts the HTTP server

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::cli::Cli;
use crate::error::AppError;
use crate::server::{DashboardState, ServerConfig};

/// Entry point for the `tesouro` binary.
pub async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    // `.env` may override the dataset locations without CLI flags.
    dotenvy::dotenv().ok();
    let vendas_csv = env_path("TESOURO_VENDAS_CSV").unwrap_or(cli.vendas_csv);
    let selic_csv = env_path("TESOURO_SELIC_CSV").unwrap_or(cli.selic_csv);

    info!("Loading sales from {}", vendas_csv.display());
    let sales = crate::io::load_sales(&vendas_csv)?;
    info!("Loading Selic series from {}", selic_csv.display());
    let rates = crate::io::load_rates(&selic_csv)?;
    info!(sales = sales.len(), rates = rates.len(), "datasets loaded");

    // Aggregation runs exactly once; requests only read the result.
    let context = crate::agg::build_context(&sales, &rates)?;
    info!(
        types = context.volume_by_type.len(),
        share_rows = context.monthly_share.len(),
        comparison_rows = context.yearly_comparison.len(),
        "derived tables ready"
    );

    let config = ServerConfig {
        host: cli.host,
        port: cli.port,
    };
    let state = Arc::new(DashboardState {
        context,
        static_dir: cli.static_dir,
    });

    crate::server::serve(&config, state).await
}

fn init_tracing(debug: bool) {
    let default_filter = if debug { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| default_filter.into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn env_path(name: &str) -> Option<PathBuf> {
    std::env::var_os(name).map(PathBuf::from)
}
