//! Derivation of the three report tables.
//!
//! Grouping uses `BTreeMap` throughout so table ordering is deterministic
//! (sorted by type, then month/year), which keeps chart series order and
//! legends stable across runs.

use std::collections::{BTreeMap, BTreeSet};

use chrono::Datelike;

use crate::domain::{RateObservation, SaleRecord, TypeAnnualVolume, TypeMonthlyShare, YearlyComparisonRow};

/// Share of one instrument type in one concrete year-month, in percent.
///
/// Intermediate of the monthly-share derivation; kept public so the
/// per-year-month invariant (shares sum to 100) is testable on its own.
#[derive(Debug, Clone)]
pub struct MonthlyShareObs {
    pub year: i32,
    pub month: u32,
    pub instrument_type: String,
    pub share: f64,
}

/// Mean annual sales volume per instrument type.
///
/// Sales are summed per (type, year) first; the mean is then taken across
/// those annual sums. Types or years with no rows simply do not appear.
pub fn volume_by_type(sales: &[SaleRecord]) -> Vec<TypeAnnualVolume> {
    let mut annual: BTreeMap<(String, i32), f64> = BTreeMap::new();
    for r in sales {
        *annual
            .entry((r.instrument_type.clone(), r.sale_date.year()))
            .or_insert(0.0) += r.value;
    }

    let mut per_type: BTreeMap<String, (f64, usize)> = BTreeMap::new();
    for ((instrument_type, _year), volume) in annual {
        let entry = per_type.entry(instrument_type).or_insert((0.0, 0));
        entry.0 += volume;
        entry.1 += 1;
    }

    per_type
        .into_iter()
        .map(|(instrument_type, (sum, years))| TypeAnnualVolume {
            instrument_type,
            mean_annual_volume: sum / years as f64,
        })
        .collect()
}

/// Per-year-month percentage shares of each instrument type.
///
/// A year-month whose total sales value is zero produces no observations:
/// with non-negative values that only happens when every row is zero, where
/// a percentage share is undefined.
pub fn monthly_shares(sales: &[SaleRecord]) -> Vec<MonthlyShareObs> {
    let mut month_total: BTreeMap<(i32, u32), f64> = BTreeMap::new();
    let mut type_month: BTreeMap<(i32, u32, String), f64> = BTreeMap::new();

    for r in sales {
        let key = (r.sale_date.year(), r.sale_date.month());
        *month_total.entry(key).or_insert(0.0) += r.value;
        *type_month
            .entry((key.0, key.1, r.instrument_type.clone()))
            .or_insert(0.0) += r.value;
    }

    let mut out = Vec::with_capacity(type_month.len());
    for ((year, month, instrument_type), value) in type_month {
        let total = month_total[&(year, month)];
        if total <= 0.0 {
            continue;
        }
        out.push(MonthlyShareObs {
            year,
            month,
            instrument_type,
            share: value / total * 100.0,
        });
    }
    out
}

/// Mean share per (instrument type, calendar month), averaged across years.
///
/// January 2020 and January 2024 observations both land in month 1. Every
/// type gets exactly 12 rows in calendar order; months with no observations
/// carry a `0.0` share.
pub fn mean_monthly_share(observations: &[MonthlyShareObs]) -> Vec<TypeMonthlyShare> {
    let mut acc: BTreeMap<(String, u32), (f64, usize)> = BTreeMap::new();
    let mut types: BTreeSet<String> = BTreeSet::new();

    for obs in observations {
        types.insert(obs.instrument_type.clone());
        let entry = acc
            .entry((obs.instrument_type.clone(), obs.month))
            .or_insert((0.0, 0));
        entry.0 += obs.share;
        entry.1 += 1;
    }

    let mut out = Vec::with_capacity(types.len() * 12);
    for instrument_type in types {
        for month in 1..=12 {
            let mean_share = acc
                .get(&(instrument_type.clone(), month))
                .map(|(sum, n)| sum / *n as f64)
                .unwrap_or(0.0);
            out.push(TypeMonthlyShare {
                instrument_type: instrument_type.clone(),
                month,
                mean_share,
            });
        }
    }
    out
}

/// Yearly sales volume per (year, type), left-joined with the mean annual
/// Selic rate for the year.
///
/// Years with no rate observations keep their volume rows with an absent
/// rate; the join never substitutes zero.
pub fn yearly_comparison(
    sales: &[SaleRecord],
    rates: &[RateObservation],
) -> Vec<YearlyComparisonRow> {
    let mut volume: BTreeMap<(i32, String), f64> = BTreeMap::new();
    for r in sales {
        *volume
            .entry((r.sale_date.year(), r.instrument_type.clone()))
            .or_insert(0.0) += r.value;
    }

    let mut rate_acc: BTreeMap<i32, (f64, usize)> = BTreeMap::new();
    for o in rates {
        let entry = rate_acc.entry(o.date.year()).or_insert((0.0, 0));
        entry.0 += o.annual_rate;
        entry.1 += 1;
    }

    volume
        .into_iter()
        .map(|((year, instrument_type), volume)| YearlyComparisonRow {
            year,
            instrument_type,
            volume,
            mean_rate: rate_acc.get(&year).map(|(sum, n)| sum / *n as f64),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sale(instrument_type: &str, value: f64, y: i32, m: u32, d: u32) -> SaleRecord {
        SaleRecord {
            instrument_type: instrument_type.to_string(),
            maturity_date: NaiveDate::from_ymd_opt(2030, 1, 1).unwrap(),
            sale_date: NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            unit_price: value,
            quantity: 1.0,
            value,
        }
    }

    fn rate(v: f64, y: i32, m: u32, d: u32) -> RateObservation {
        RateObservation {
            date: NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            annual_rate: v,
        }
    }

    #[test]
    fn volume_is_mean_of_annual_sums_not_transactions() {
        // 2021: 100 + 300 = 400; 2022: 200. Mean across years = 300, while
        // the mean across the three transactions would be 200.
        let sales = vec![
            sale("A", 100.0, 2021, 3, 10),
            sale("A", 300.0, 2021, 8, 20),
            sale("A", 200.0, 2022, 5, 5),
        ];

        let table = volume_by_type(&sales);
        assert_eq!(table.len(), 1);
        assert!((table[0].mean_annual_volume - 300.0).abs() < 1e-9);
    }

    #[test]
    fn volume_omits_types_with_no_rows() {
        let sales = vec![sale("A", 50.0, 2021, 1, 1)];
        let table = volume_by_type(&sales);
        assert_eq!(table.len(), 1);
        assert_eq!(table[0].instrument_type, "A");
    }

    #[test]
    fn shares_sum_to_100_per_year_month() {
        let sales = vec![
            sale("A", 25.0, 2021, 3, 1),
            sale("B", 75.0, 2021, 3, 2),
            sale("A", 40.0, 2021, 4, 1),
            sale("B", 60.0, 2021, 4, 2),
        ];

        let observations = monthly_shares(&sales);

        for (year, month) in [(2021, 3), (2021, 4)] {
            let total: f64 = observations
                .iter()
                .filter(|o| o.year == year && o.month == month)
                .map(|o| o.share)
                .sum();
            assert!((total - 100.0).abs() < 1e-9, "month {year}-{month}: {total}");
        }
    }

    #[test]
    fn zero_total_month_is_skipped() {
        let sales = vec![sale("A", 0.0, 2021, 3, 1), sale("B", 50.0, 2021, 4, 1)];
        let observations = monthly_shares(&sales);

        assert!(observations.iter().all(|o| o.month != 3));
        assert_eq!(observations.len(), 1);
        assert!((observations[0].share - 100.0).abs() < 1e-9);
    }

    #[test]
    fn mean_share_has_twelve_entries_per_type() {
        let sales = vec![
            sale("A", 25.0, 2021, 3, 1),
            sale("B", 75.0, 2021, 3, 2),
            sale("A", 10.0, 2022, 7, 1),
        ];

        let table = mean_monthly_share(&monthly_shares(&sales));

        for ty in ["A", "B"] {
            let months: Vec<u32> = table
                .iter()
                .filter(|s| s.instrument_type == ty)
                .map(|s| s.month)
                .collect();
            assert_eq!(months, (1..=12).collect::<Vec<u32>>());
        }
    }

    #[test]
    fn mean_share_averages_same_calendar_month_across_years() {
        // March 2021: A has 25%. March 2022: A has 75%. Mean = 50%.
        let sales = vec![
            sale("A", 25.0, 2021, 3, 1),
            sale("B", 75.0, 2021, 3, 2),
            sale("A", 75.0, 2022, 3, 1),
            sale("B", 25.0, 2022, 3, 2),
        ];

        let table = mean_monthly_share(&monthly_shares(&sales));
        let march_a = table
            .iter()
            .find(|s| s.instrument_type == "A" && s.month == 3)
            .unwrap();
        assert!((march_a.mean_share - 50.0).abs() < 1e-9);

        let january_a = table
            .iter()
            .find(|s| s.instrument_type == "A" && s.month == 1)
            .unwrap();
        assert!((january_a.mean_share - 0.0).abs() < 1e-12);
    }

    #[test]
    fn yearly_comparison_round_trip() {
        let sales = vec![sale("A", 100.0, 2021, 3, 15), sale("B", 300.0, 2021, 3, 20)];
        let rates = vec![rate(5.0, 2021, 6, 1)];

        let table = yearly_comparison(&sales, &rates);
        assert_eq!(table.len(), 2);

        let a = table.iter().find(|r| r.instrument_type == "A").unwrap();
        assert_eq!(a.year, 2021);
        assert!((a.volume - 100.0).abs() < 1e-9);
        assert!((a.mean_rate.unwrap() - 5.0).abs() < 1e-9);

        let b = table.iter().find(|r| r.instrument_type == "B").unwrap();
        assert!((b.volume - 300.0).abs() < 1e-9);
        assert!((b.mean_rate.unwrap() - 5.0).abs() < 1e-9);
    }

    #[test]
    fn yearly_comparison_averages_rate_observations() {
        let sales = vec![sale("A", 100.0, 2021, 3, 15)];
        let rates = vec![rate(4.0, 2021, 1, 4), rate(6.0, 2021, 9, 20)];

        let table = yearly_comparison(&sales, &rates);
        assert!((table[0].mean_rate.unwrap() - 5.0).abs() < 1e-9);
    }

    #[test]
    fn yearly_comparison_keeps_rows_for_years_without_rates() {
        let sales = vec![sale("A", 100.0, 2021, 3, 15), sale("A", 150.0, 2022, 3, 15)];
        let rates = vec![rate(5.0, 2021, 6, 1)];

        let table = yearly_comparison(&sales, &rates);
        assert_eq!(table.len(), 2);

        let y2022 = table.iter().find(|r| r.year == 2022).unwrap();
        assert!(y2022.mean_rate.is_none());
        assert!((y2022.volume - 150.0).abs() < 1e-9);
    }
}
