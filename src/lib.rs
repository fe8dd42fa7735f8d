//! `tesouro-dash` library crate.
//!
//! The binary (`tesouro`) is a thin wrapper around this library so that:
//!
//! - the ingest/aggregation pipeline is testable without spawning processes
//! - chart rendering can be exercised directly against derived tables
//! - the HTTP layer stays a thin shell over precomputed, immutable data

pub mod agg;
pub mod app;
pub mod charts;
pub mod cli;
pub mod domain;
pub mod error;
pub mod io;
pub mod report;
pub mod server;
