//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - held in memory for the process lifetime after a single aggregation pass
//! - handed to the chart renderers as plain slices
//! - exported to JSON later without restructuring

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One sale row from the Tesouro Direto sales export.
///
/// Monetary fields are non-negative; ingest rejects rows that violate this.
#[derive(Debug, Clone)]
pub struct SaleRecord {
    /// Category label identifying the bond product (e.g. "Tesouro Selic").
    pub instrument_type: String,
    pub maturity_date: NaiveDate,
    pub sale_date: NaiveDate,
    /// Unit price at sale (R$).
    pub unit_price: f64,
    /// Quantity sold (fractional units are allowed).
    pub quantity: f64,
    /// Total monetary value of the sale (R$).
    pub value: f64,
}

/// One daily observation of the Selic benchmark rate.
#[derive(Debug, Clone)]
pub struct RateObservation {
    pub date: NaiveDate,
    /// Annualized rate in percent (e.g. `13.65` for 13.65% a.a.).
    pub annual_rate: f64,
}

/// Inclusive date window over which all aggregation runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl SalesWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Whether `date` falls inside the window (both ends inclusive).
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Mean annual sales volume for one instrument type.
///
/// The mean is taken across the per-year summed sales value, not across
/// individual transactions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeAnnualVolume {
    pub instrument_type: String,
    pub mean_annual_volume: f64,
}

/// Mean monthly sales share for one (instrument type, calendar month) pair.
///
/// The share of a type in a given year-month is its value over the month's
/// total, in percent; shares for the same calendar month across different
/// years are averaged together. Every type carries exactly 12 rows, one per
/// calendar month, with `0.0` where no share was ever computed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeMonthlyShare {
    pub instrument_type: String,
    /// Calendar month number, 1-12.
    pub month: u32,
    /// Mean share in percent.
    pub mean_share: f64,
}

/// One row of the yearly volume vs. benchmark-rate comparison.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YearlyComparisonRow {
    pub year: i32,
    pub instrument_type: String,
    /// Summed sales value for this (year, type) pair (R$).
    pub volume: f64,
    /// Mean annual Selic rate for the year, absent when the year has no
    /// observations inside the window.
    pub mean_rate: Option<f64>,
}

/// All derived tables, computed once at startup and read-only thereafter.
///
/// The HTTP handlers receive this behind an `Arc`; nothing mutates it, so no
/// locking is needed.
#[derive(Debug, Clone)]
pub struct ReportContext {
    pub volume_by_type: Vec<TypeAnnualVolume>,
    pub monthly_share: Vec<TypeMonthlyShare>,
    pub yearly_comparison: Vec<YearlyComparisonRow>,
}
