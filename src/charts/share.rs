//! Line chart: mean monthly share of total sales per instrument type.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use plotters::prelude::*;
use tracing::{debug, error};

use crate::charts::{SHARE_CHART_FILE, style};
use crate::domain::TypeMonthlyShare;
use crate::report::{format_percent, month_name};

/// Render the monthly-share line chart into `out_dir`.
///
/// The x axis is the fixed 12 calendar months in natural order; every series
/// carries exactly 12 points, plotting `0.00%` where a type had no share.
/// Returns the generated filename, or an empty string when rendering fails.
pub fn render_share_chart(table: &[TypeMonthlyShare], out_dir: &Path) -> String {
    match draw(table, out_dir) {
        Ok(()) => {
            debug!(file = SHARE_CHART_FILE, "chart rendered");
            SHARE_CHART_FILE.to_string()
        }
        Err(err) => {
            error!(file = SHARE_CHART_FILE, %err, "chart render failed");
            String::new()
        }
    }
}

fn draw(table: &[TypeMonthlyShare], out_dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
    fs::create_dir_all(out_dir)?;

    if table.is_empty() {
        return Err("monthly share table is empty".into());
    }

    // Series per type: month -> mean share, zero where absent.
    let mut series: BTreeMap<&str, BTreeMap<u32, f64>> = BTreeMap::new();
    for row in table {
        series
            .entry(row.instrument_type.as_str())
            .or_default()
            .insert(row.month, row.mean_share);
    }

    let y_max = table.iter().map(|r| r.mean_share).fold(0.0, f64::max);
    if !y_max.is_finite() || y_max <= 0.0 {
        return Err("monthly share table has no positive values".into());
    }

    let path = out_dir.join(SHARE_CHART_FILE);
    let root = SVGBackend::new(&path, style::CHART_SIZE).into_drawing_area();
    root.fill(&style::BACKGROUND)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            "Participação Percentual nas Vendas Totais mensais (Janeiro de 2020 - Janeiro de 2025)",
            (style::FONT, style::TITLE_FONT_SIZE)
                .into_font()
                .color(&style::FOREGROUND),
        )
        .margin(10)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(1u32..12u32, 0f64..y_max * 1.1)?;

    chart.plotting_area().fill(&style::PLOT_BACKGROUND)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(12)
        .x_label_formatter(&|m| month_name(*m).to_string())
        .y_label_formatter(&|v| format_percent(*v))
        .label_style(
            (style::FONT, style::LABEL_FONT_SIZE)
                .into_font()
                .color(&style::FOREGROUND),
        )
        .axis_style(style::FOREGROUND)
        .draw()?;

    for (i, (instrument_type, by_month)) in series.iter().enumerate() {
        let color = style::series_color(i);
        let points: Vec<(u32, f64)> = (1..=12)
            .map(|m| (m, by_month.get(&m).copied().unwrap_or(0.0)))
            .collect();

        chart
            .draw_series(LineSeries::new(points.iter().copied(), &color))?
            .label(*instrument_type)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 14, y)], color));

        chart.draw_series(
            points
                .iter()
                .map(|&(m, share)| Circle::new((m, share), 3, color.filled())),
        )?;

        // Percent label next to each point ("0.00%" where the month had no
        // computed share).
        chart.draw_series(points.iter().map(|&(m, share)| {
            Text::new(
                format_percent(share),
                (m, share),
                (style::FONT, style::POINT_LABEL_FONT_SIZE)
                    .into_font()
                    .color(&style::FOREGROUND),
            )
        }))?;
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
