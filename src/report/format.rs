//! Pure formatting functions for chart labels.
//!
//! All labels follow the conventions of the original dashboard: Brazilian
//! currency with comma grouping and two decimals, percentages with two
//! decimals, Portuguese month names.

/// Portuguese month names in calendar order (index 0 = Janeiro).
pub const MONTH_NAMES: [&str; 12] = [
    "Janeiro",
    "Fevereiro",
    "Março",
    "Abril",
    "Maio",
    "Junho",
    "Julho",
    "Agosto",
    "Setembro",
    "Outubro",
    "Novembro",
    "Dezembro",
];

/// Portuguese name for a 1-indexed calendar month.
///
/// Returns an empty string outside 1-12; callers only pass months taken from
/// parsed calendar dates.
pub fn month_name(month: u32) -> &'static str {
    match month {
        1..=12 => MONTH_NAMES[(month - 1) as usize],
        _ => "",
    }
}

/// Format a monetary value as `R$ 1,234,567.80` (comma grouping, two decimals).
pub fn format_currency(value: f64) -> String {
    let sign = if value.is_sign_negative() && value != 0.0 { "-" } else { "" };
    let rounded = format!("{:.2}", value.abs());
    let (int_part, frac_part) = rounded
        .split_once('.')
        .unwrap_or((rounded.as_str(), "00"));
    format!("R$ {sign}{}.{frac_part}", group_thousands(int_part))
}

/// Format a percentage value as `12.34%`.
pub fn format_percent(value: f64) -> String {
    format!("{value:.2}%")
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
