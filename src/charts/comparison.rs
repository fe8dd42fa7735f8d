//! Dual-axis line chart: yearly sales volume per type vs. mean annual Selic.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

use plotters::prelude::*;
use tracing::{debug, error};

use crate::charts::{COMPARISON_CHART_FILE, style};
use crate::domain::YearlyComparisonRow;
use crate::report::format_currency;

/// Render the volume-vs-Selic comparison chart into `out_dir`.
///
/// Volumes plot against the primary axis, the mean annual rate against an
/// independently scaled secondary axis. Years whose rate is absent are
/// skipped on the secondary series. Returns the generated filename, or an
/// empty string when rendering fails.
pub fn render_comparison_chart(table: &[YearlyComparisonRow], out_dir: &Path) -> String {
    match draw(table, out_dir) {
        Ok(()) => {
            debug!(file = COMPARISON_CHART_FILE, "chart rendered");
            COMPARISON_CHART_FILE.to_string()
        }
        Err(err) => {
            error!(file = COMPARISON_CHART_FILE, %err, "chart render failed");
            String::new()
        }
    }
}

fn draw(table: &[YearlyComparisonRow], out_dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
    fs::create_dir_all(out_dir)?;

    if table.is_empty() {
        return Err("yearly comparison table is empty".into());
    }

    let years: Vec<i32> = table.iter().map(|r| r.year).collect::<BTreeSet<_>>().into_iter().collect();
    let types: Vec<&str> = table
        .iter()
        .map(|r| r.instrument_type.as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    // Re-sum volumes across any duplicate (year, type) rows.
    let mut volume: BTreeMap<(i32, &str), f64> = BTreeMap::new();
    for r in table {
        *volume
            .entry((r.year, r.instrument_type.as_str()))
            .or_insert(0.0) += r.volume;
    }

    // One rate per year; rows for the same year carry the same mean.
    let mut rates: BTreeMap<i32, f64> = BTreeMap::new();
    for r in table {
        if let Some(rate) = r.mean_rate {
            rates.insert(r.year, rate);
        }
    }

    let vol_max = volume.values().fold(0.0, |acc: f64, v| acc.max(*v));
    if !vol_max.is_finite() || vol_max <= 0.0 {
        return Err("yearly comparison table has no positive volume".into());
    }

    // Secondary axis padded to [min x 0.9, max x 1.1]; placeholder range when
    // no year has a rate (the secondary series is empty then).
    let rate_range = match (
        rates.values().copied().fold(f64::INFINITY, f64::min),
        rates.values().copied().fold(f64::NEG_INFINITY, f64::max),
    ) {
        (lo, hi) if lo.is_finite() && hi.is_finite() => (lo * 0.9)..(hi * 1.1),
        _ => 0.0..1.0,
    };

    let x_start = years[0];
    let x_end = if years[years.len() - 1] > x_start {
        years[years.len() - 1]
    } else {
        x_start + 1
    };

    let path = out_dir.join(COMPARISON_CHART_FILE);
    let root = SVGBackend::new(&path, style::CHART_SIZE).into_drawing_area();
    root.fill(&style::BACKGROUND)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            "Comparação do Volume de Vendas por Título e Taxa Selic Média Anual (2020 - 2025)",
            (style::FONT, style::TITLE_FONT_SIZE)
                .into_font()
                .color(&style::FOREGROUND),
        )
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(110)
        .right_y_label_area_size(60)
        .build_cartesian_2d(x_start..x_end, 0f64..vol_max * 1.1)?
        .set_secondary_coord(x_start..x_end, rate_range);

    chart.plotting_area().fill(&style::PLOT_BACKGROUND)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(years.len())
        .x_label_formatter(&|year| year.to_string())
        .y_desc("Volume de Vendas (R$)")
        .y_label_formatter(&|v| format_currency(*v))
        .label_style(
            (style::FONT, style::LABEL_FONT_SIZE)
                .into_font()
                .color(&style::FOREGROUND),
        )
        .axis_style(style::FOREGROUND)
        .draw()?;

    chart
        .configure_secondary_axes()
        .y_desc("Taxa Selic (% a.a.)")
        .label_style(
            (style::FONT, style::LABEL_FONT_SIZE)
                .into_font()
                .color(&style::FOREGROUND),
        )
        .draw()?;

    for (i, instrument_type) in types.iter().enumerate() {
        let color = style::series_color(i);
        let points: Vec<(i32, f64)> = years
            .iter()
            .map(|&year| {
                (
                    year,
                    volume.get(&(year, *instrument_type)).copied().unwrap_or(0.0),
                )
            })
            .collect();

        chart
            .draw_series(LineSeries::new(points.iter().copied(), &color))?
            .label(format!("Volume ({instrument_type})"))
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 14, y)], color));

        chart.draw_series(
            points
                .iter()
                .map(|&(year, v)| Circle::new((year, v), 3, color.filled())),
        )?;
    }

    // Selic on the secondary axis; years without a rate are skipped.
    let rate_color = style::series_color(types.len());
    let rate_points: Vec<(i32, f64)> = years
        .iter()
        .filter_map(|&year| rates.get(&year).map(|rate| (year, *rate)))
        .collect();

    if !rate_points.is_empty() {
        chart
            .draw_secondary_series(LineSeries::new(rate_points.iter().copied(), &rate_color))?
            .label("Taxa Selic Média Anual")
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 14, y)], rate_color));

        chart.draw_secondary_series(
            rate_points
                .iter()
                .map(|&(year, rate)| Circle::new((year, rate), 3, rate_color.filled())),
        )?;
    }

    chart
        .configure_series_labels()
        .background_style(style::PLOT_BACKGROUND.mix(0.8))
        .border_style(style::FOREGROUND)
        .label_font(
            (style::FONT, style::LABEL_FONT_SIZE)
                .into_font()
                .color(&style::FOREGROUND),
        )
        .draw()?;

    root.present()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(year: i32, ty: &str, volume: f64, rate: Option<f64>) -> YearlyComparisonRow {
        YearlyComparisonRow {
            year,
            instrument_type: ty.to_string(),
            volume,
            mean_rate: rate,
        }
    }

    #[test]
    fn renders_svg_and_returns_filename() {
        let dir = std::env::temp_dir().join(format!("tesouro-comparison-{}", std::process::id()));
        let table = vec![
            row(2020, "Tesouro Selic", 1_000.0, Some(2.77)),
            row(2021, "Tesouro Selic", 2_000.0, Some(4.42)),
            row(2020, "Tesouro IPCA+", 500.0, Some(2.77)),
            row(2021, "Tesouro IPCA+", 800.0, Some(4.42)),
        ];

        let name = render_comparison_chart(&table, &dir);
        assert_eq!(name, COMPARISON_CHART_FILE);
        let svg = fs::read_to_string(dir.join(COMPARISON_CHART_FILE)).unwrap();
        assert!(svg.contains("<svg"));

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn tolerates_years_without_rates() {
        let dir = std::env::temp_dir().join(format!("tesouro-comparison-norate-{}", std::process::id()));
        let table = vec![
            row(2020, "Tesouro Selic", 1_000.0, Some(2.77)),
            row(2021, "Tesouro Selic", 2_000.0, None),
        ];

        // The missing-rate year is skipped on the secondary series; the chart
        // itself still renders.
        assert_eq!(render_comparison_chart(&table, &dir), COMPARISON_CHART_FILE);

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn single_year_table_renders() {
        let dir = std::env::temp_dir().join(format!("tesouro-comparison-single-{}", std::process::id()));
        let table = vec![row(2021, "Tesouro Selic", 1_000.0, Some(4.42))];

        assert_eq!(render_comparison_chart(&table, &dir), COMPARISON_CHART_FILE);

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn empty_table_yields_empty_filename() {
        let dir = std::env::temp_dir().join(format!("tesouro-comparison-empty-{}", std::process::id()));
        assert_eq!(render_comparison_chart(&[], &dir), "");
        fs::remove_dir_all(&dir).ok();
    }
}
