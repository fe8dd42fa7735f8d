//! Reporting-window filtering.

use chrono::NaiveDate;

use crate::domain::{RateObservation, SaleRecord, SalesWindow};

/// The fixed reporting window: January 2020 through January 2025, inclusive
/// on both ends.
pub fn reporting_window() -> SalesWindow {
    SalesWindow::new(
        NaiveDate::from_ymd_opt(2020, 1, 1).expect("valid window start"),
        NaiveDate::from_ymd_opt(2025, 1, 31).expect("valid window end"),
    )
}

/// Retain sales whose sale date falls inside the window. Rows outside are
/// dropped silently.
pub fn filter_sales(records: &[SaleRecord], window: SalesWindow) -> Vec<SaleRecord> {
    records
        .iter()
        .filter(|r| window.contains(r.sale_date))
        .cloned()
        .collect()
}

/// Retain rate observations whose date falls inside the window.
pub fn filter_rates(observations: &[RateObservation], window: SalesWindow) -> Vec<RateObservation> {
    observations
        .iter()
        .filter(|o| window.contains(o.date))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sale_on(date: NaiveDate) -> SaleRecord {
        SaleRecord {
            instrument_type: "Tesouro Selic".to_string(),
            maturity_date: NaiveDate::from_ymd_opt(2027, 3, 1).unwrap(),
            sale_date: date,
            unit_price: 100.0,
            quantity: 1.0,
            value: 100.0,
        }
    }

    #[test]
    fn filter_keeps_exact_window_boundaries() {
        let records = vec![
            sale_on(NaiveDate::from_ymd_opt(2019, 12, 31).unwrap()),
            sale_on(NaiveDate::from_ymd_opt(2020, 1, 1).unwrap()),
            sale_on(NaiveDate::from_ymd_opt(2022, 7, 15).unwrap()),
            sale_on(NaiveDate::from_ymd_opt(2025, 1, 31).unwrap()),
            sale_on(NaiveDate::from_ymd_opt(2025, 2, 1).unwrap()),
        ];

        let kept = filter_sales(&records, reporting_window());
        let kept_dates: Vec<NaiveDate> = kept.iter().map(|r| r.sale_date).collect();

        assert_eq!(
            kept_dates,
            vec![
                NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
                NaiveDate::from_ymd_opt(2022, 7, 15).unwrap(),
                NaiveDate::from_ymd_opt(2025, 1, 31).unwrap(),
            ]
        );
    }

    #[test]
    fn filter_rates_uses_same_window() {
        let observations = vec![
            RateObservation {
                date: NaiveDate::from_ymd_opt(2019, 12, 31).unwrap(),
                annual_rate: 4.5,
            },
            RateObservation {
                date: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
                annual_rate: 4.4,
            },
        ];

        let kept = filter_rates(&observations, reporting_window());
        assert_eq!(kept.len(), 1);
        assert!((kept[0].annual_rate - 4.4).abs() < 1e-12);
    }
}
