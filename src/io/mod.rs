//! Input helpers.
//!
//! - CSV ingest + validation for the two source datasets (`ingest`)

pub mod ingest;

pub use ingest::*;
