//! Presentation helpers: locale-aware labels for the charts and the page.
//!
//! Formatting lives here so the aggregation code stays numeric-only and label
//! changes are localized.

pub mod format;

pub use format::*;
