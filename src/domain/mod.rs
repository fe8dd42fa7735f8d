//! Shared domain types.
//!
//! Source records, the derived report tables, and the immutable
//! [`ReportContext`](types::ReportContext) that the HTTP layer reads from.

pub mod types;

pub use types::*;
