//! Aggregation pipeline.
//!
//! Responsibilities:
//!
//! - filter both datasets to the fixed reporting window (`window`)
//! - derive the three report tables (`tables`)
//! - assemble the immutable [`ReportContext`] handed to the HTTP layer
//!
//! Everything here is pure computation over in-memory records; no I/O.

pub mod tables;
pub mod window;

pub use tables::*;
pub use window::*;

use crate::domain::{RateObservation, ReportContext, SaleRecord};
use crate::error::AppError;

/// Run the full aggregation pass over freshly loaded records.
///
/// This happens exactly once, at startup; every page request afterwards reads
/// the returned context without recomputation.
pub fn build_context(
    sales: &[SaleRecord],
    rates: &[RateObservation],
) -> Result<ReportContext, AppError> {
    // 1) Restrict both datasets to the reporting window.
    let window = reporting_window();
    let sales = filter_sales(sales, window);
    let rates = filter_rates(rates, window);

    if sales.is_empty() {
        return Err(AppError::empty(format!(
            "No sales rows remain inside the reporting window {} - {}.",
            window.start, window.end
        )));
    }

    // 2) Mean annual volume per instrument type.
    let volume_by_type = volume_by_type(&sales);

    // 3) Mean monthly share per instrument type, across years.
    let monthly_share = mean_monthly_share(&monthly_shares(&sales));

    // 4) Yearly volume per type, left-joined with the mean annual Selic rate.
    let yearly_comparison = yearly_comparison(&sales, &rates);

    Ok(ReportContext {
        volume_by_type,
        monthly_share,
        yearly_comparison,
    })
}
