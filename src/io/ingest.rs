//! CSV ingest and normalization.
//!
//! This module turns the two semicolon-delimited source exports (Tesouro
//! Direto sales and the daily Selic series) into clean record vectors.
//!
//! Design goals:
//! - **Strict schema** for required columns (clear errors + exit code 2)
//! - **Fail-fast rows**: the derived tables are unusable without clean source
//!   data, so the first malformed row aborts the whole load
//! - **Deterministic behavior** (no locale lookups; the decimal-comma and
//!   `DD/MM/YYYY` conventions of the exports are handled explicitly)

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use csv::StringRecord;

use crate::domain::{RateObservation, SaleRecord};
use crate::error::AppError;

/// Column names of the Tesouro Direto sales export.
const COL_TYPE: &str = "tipo titulo";
const COL_MATURITY: &str = "vencimento do titulo";
const COL_SALE_DATE: &str = "data venda";
const COL_UNIT_PRICE: &str = "pu";
const COL_QUANTITY: &str = "quantidade";
const COL_VALUE: &str = "valor";

/// Column names of the Selic export.
const COL_RATE_DATE: &str = "data";
const COL_RATE: &str = "taxa (% a.a.)";

/// Load the sales export from a file path.
pub fn load_sales(path: &Path) -> Result<Vec<SaleRecord>, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::input(format!("Failed to open sales CSV '{}': {e}", path.display()))
    })?;
    read_sales(file)
}

/// Load the Selic export from a file path.
pub fn load_rates(path: &Path) -> Result<Vec<RateObservation>, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::input(format!("Failed to open Selic CSV '{}': {e}", path.display()))
    })?;
    read_rates(file)
}

/// Parse sales records from any reader (used directly by tests).
pub fn read_sales<R: Read>(reader: R) -> Result<Vec<SaleRecord>, AppError> {
    let mut reader = csv_reader(reader);
    let header_map = read_header_map(&mut reader)?;

    for col in [
        COL_TYPE,
        COL_MATURITY,
        COL_SALE_DATE,
        COL_UNIT_PRICE,
        COL_QUANTITY,
        COL_VALUE,
    ] {
        ensure_column(&header_map, col)?;
    }

    let mut records = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        // +2 because:
        // - records() starts at line 1 after headers
        // - CSV is 1-based line numbers
        let line = idx + 2;

        let record =
            result.map_err(|e| AppError::input(format!("CSV parse error at line {line}: {e}")))?;

        records.push(
            parse_sale_row(&record, &header_map)
                .map_err(|e| AppError::input(format!("Sales CSV line {line}: {e}")))?,
        );
    }

    Ok(records)
}

/// Parse Selic observations from any reader (used directly by tests).
pub fn read_rates<R: Read>(reader: R) -> Result<Vec<RateObservation>, AppError> {
    let mut reader = csv_reader(reader);
    let header_map = read_header_map(&mut reader)?;

    for col in [COL_RATE_DATE, COL_RATE] {
        ensure_column(&header_map, col)?;
    }

    let mut observations = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let line = idx + 2;

        let record =
            result.map_err(|e| AppError::input(format!("CSV parse error at line {line}: {e}")))?;

        observations.push(
            parse_rate_row(&record, &header_map)
                .map_err(|e| AppError::input(format!("Selic CSV line {line}: {e}")))?,
        );
    }

    Ok(observations)
}

fn csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .delimiter(b';')
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader)
}

fn read_header_map<R: Read>(reader: &mut csv::Reader<R>) -> Result<HashMap<String, usize>, AppError> {
    let headers = reader
        .headers()
        .map_err(|e| AppError::input(format!("Failed to read CSV headers: {e}")))?;
    Ok(headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(name), idx))
        .collect())
}

fn normalize_header_name(name: &str) -> String {
    // Excel and other tools sometimes emit UTF-8 CSVs with a BOM prefix on the
    // first header. If we don't strip it, schema validation will incorrectly
    // report a missing column.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_lowercase()
}

fn ensure_column(header_map: &HashMap<String, usize>, name: &str) -> Result<(), AppError> {
    if !header_map.contains_key(name) {
        return Err(AppError::input(format!("Missing required column: `{name}`")));
    }
    Ok(())
}

fn parse_sale_row(
    record: &StringRecord,
    header_map: &HashMap<String, usize>,
) -> Result<SaleRecord, String> {
    let instrument_type = get_required(record, header_map, COL_TYPE)?.to_string();
    let maturity_date = parse_date(get_required(record, header_map, COL_MATURITY)?)?;
    let sale_date = parse_date(get_required(record, header_map, COL_SALE_DATE)?)?;
    let unit_price = parse_decimal(get_required(record, header_map, COL_UNIT_PRICE)?)?;
    let quantity = parse_decimal(get_required(record, header_map, COL_QUANTITY)?)?;
    let value = parse_decimal(get_required(record, header_map, COL_VALUE)?)?;

    // Monetary fields are non-negative by contract.
    for (name, v) in [
        (COL_UNIT_PRICE, unit_price),
        (COL_QUANTITY, quantity),
        (COL_VALUE, value),
    ] {
        if v < 0.0 {
            return Err(format!("Negative `{name}` value: {v}"));
        }
    }

    Ok(SaleRecord {
        instrument_type,
        maturity_date,
        sale_date,
        unit_price,
        quantity,
        value,
    })
}

fn parse_rate_row(
    record: &StringRecord,
    header_map: &HashMap<String, usize>,
) -> Result<RateObservation, String> {
    let date = parse_date(get_required(record, header_map, COL_RATE_DATE)?)?;
    let annual_rate = parse_decimal(get_required(record, header_map, COL_RATE)?)?;

    Ok(RateObservation { date, annual_rate })
}

fn get_required<'a>(
    record: &'a StringRecord,
    header_map: &HashMap<String, usize>,
    name: &str,
) -> Result<&'a str, String> {
    let idx = header_map
        .get(name)
        .ok_or_else(|| format!("Missing required column: `{name}`"))?;
    record
        .get(*idx)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| format!("Missing required value: `{name}`"))
}

/// Parse a decimal-comma number (`"1.234,56"` is NOT expected; the exports
/// use a plain comma decimal separator with no thousands grouping).
fn parse_decimal(s: &str) -> Result<f64, String> {
    let normalized = s.replace(',', ".");
    let v = normalized
        .parse::<f64>()
        .map_err(|_| format!("Invalid decimal value '{s}'."))?;
    if !v.is_finite() {
        return Err(format!("Non-finite decimal value '{s}'."));
    }
    Ok(v)
}

/// Parse a `DD/MM/YYYY` date, matching the export convention exactly.
fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%d/%m/%Y")
        .map_err(|_| format!("Invalid date '{s}'. Expected DD/MM/YYYY."))
}
