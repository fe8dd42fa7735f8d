//! Command-line parsing for the dashboard server.
//!
//! The goal of this module is to keep argument parsing separate from the
//! ingest/aggregation code. There are deliberately few knobs: file locations,
//! the bind address, and a debug toggle.

use std::path::PathBuf;

use clap::Parser;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "tesouro", version, about = "Tesouro Direto sales dashboard")]
pub struct Cli {
    /// Tesouro Direto sales CSV (semicolon-delimited, decimal comma).
    #[arg(long, value_name = "CSV", default_value = "data/VendasTesouroDireto.csv")]
    pub vendas_csv: PathBuf,

    /// Selic daily rate CSV (semicolon-delimited, decimal comma).
    #[arg(long, value_name = "CSV", default_value = "data/taxa_selic_apurada.csv")]
    pub selic_csv: PathBuf,

    /// Host to bind to.
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on.
    #[arg(long, default_value_t = 5000)]
    pub port: u16,

    /// Directory the SVG charts are written to (and served from).
    #[arg(long, value_name = "DIR", default_value = "static")]
    pub static_dir: PathBuf,

    /// Verbose logging (same as RUST_LOG=debug).
    #[arg(long)]
    pub debug: bool,
}
