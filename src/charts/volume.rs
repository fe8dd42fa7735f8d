//! Bar chart: mean annual sales volume per instrument type.

use std::fs;
use std::path::Path;

use plotters::prelude::*;
use tracing::{debug, error};

use crate::charts::{VOLUME_CHART_FILE, style};
use crate::domain::TypeAnnualVolume;
use crate::report::format_currency;

/// Render the annual-volume bar chart into `out_dir`.
///
/// Returns the generated filename, or an empty string when rendering fails.
pub fn render_volume_chart(table: &[TypeAnnualVolume], out_dir: &Path) -> String {
    match draw(table, out_dir) {
        Ok(()) => {
            debug!(file = VOLUME_CHART_FILE, "chart rendered");
            VOLUME_CHART_FILE.to_string()
        }
        Err(err) => {
            error!(file = VOLUME_CHART_FILE, %err, "chart render failed");
            String::new()
        }
    }
}

fn draw(table: &[TypeAnnualVolume], out_dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
    fs::create_dir_all(out_dir)?;

    if table.is_empty() {
        return Err("volume table is empty".into());
    }
    let y_max = table
        .iter()
        .map(|r| r.mean_annual_volume)
        .fold(0.0, f64::max);
    if !y_max.is_finite() || y_max <= 0.0 {
        return Err("volume table has no positive values".into());
    }

    let path = out_dir.join(VOLUME_CHART_FILE);
    let root = SVGBackend::new(&path, style::CHART_SIZE).into_drawing_area();
    root.fill(&style::BACKGROUND)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            "Média do Volume Anual de Vendas por Tipo",
            (style::FONT, style::TITLE_FONT_SIZE)
                .into_font()
                .color(&style::FOREGROUND),
        )
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(110)
        .build_cartesian_2d((0usize..table.len()).into_segmented(), 0f64..y_max * 1.1)?;

    chart.plotting_area().fill(&style::PLOT_BACKGROUND)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(table.len())
        .x_label_formatter(&|seg: &SegmentValue<usize>| match seg {
            SegmentValue::CenterOf(i) | SegmentValue::Exact(i) => table
                .get(*i)
                .map(|r| r.instrument_type.clone())
                .unwrap_or_default(),
            SegmentValue::Last => String::new(),
        })
        .y_label_formatter(&|v| format_currency(*v))
        .label_style(
            (style::FONT, style::LABEL_FONT_SIZE)
                .into_font()
                .color(&style::FOREGROUND),
        )
        .axis_style(style::FOREGROUND)
        .draw()?;

    for (i, row) in table.iter().enumerate() {
        let color = style::series_color(i);
        chart
            .draw_series(std::iter::once(Rectangle::new(
                [
                    (SegmentValue::Exact(i), 0.0),
                    (SegmentValue::Exact(i + 1), row.mean_annual_volume),
                ],
                color.filled(),
            )))?
            .label(row.instrument_type.clone())
            .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], color.filled()));

        // Currency label above the bar, matching the dashboard's value labels.
        chart.draw_series(std::iter::once(Text::new(
            format_currency(row.mean_annual_volume),
            (SegmentValue::CenterOf(i), row.mean_annual_volume),
            (style::FONT, style::POINT_LABEL_FONT_SIZE)
                .into_font()
                .color(&style::FOREGROUND),
        )))?;
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

    fn table() -> Vec<TypeAnnualVolume> {
        vec![
            TypeAnnualVolume {
                instrument_type: "Tesouro Prefixado".to_string(),
                mean_annual_volume: 1_500_000.0,
            },
            TypeAnnualVolume {
                instrument_type: "Tesouro Selic".to_string(),
                mean_annual_volume: 2_300_000.5,
            },
        ]
    }

    #[test]
    fn renders_svg_and_returns_filename() {
        let dir = std::env::temp_dir().join(format!("tesouro-volume-{}", std::process::id()));
        let name = render_volume_chart(&table(), &dir);

        assert_eq!(name, VOLUME_CHART_FILE);
        let svg = fs::read_to_string(dir.join(VOLUME_CHART_FILE)).unwrap();
        assert!(svg.contains("<svg"));

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn empty_table_yields_empty_filename() {
        let dir = std::env::temp_dir().join(format!("tesouro-volume-empty-{}", std::process::id()));
        assert_eq!(render_volume_chart(&[], &dir), "");
        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn unwritable_output_dir_yields_empty_filename() {
        // Point the output directory at an existing file: create_dir_all fails,
        // the failure is swallowed, and the caller sees "no chart available".
        let blocker = std::env::temp_dir().join(format!("tesouro-volume-blocker-{}", std::process::id()));
        fs::write(&blocker, b"not a directory").unwrap();

        assert_eq!(render_volume_chart(&table(), &blocker), "");

        fs::remove_file(&blocker).ok();
    }
}
