//! Fixed visual identity shared by all three charts.

use plotters::style::RGBColor;

pub const BACKGROUND: RGBColor = RGBColor(0xE8, 0xE8, 0xE8);
pub const PLOT_BACKGROUND: RGBColor = RGBColor(0xFF, 0xFF, 0xFF);
pub const FOREGROUND: RGBColor = RGBColor(0x53, 0x4A, 0x44);

/// Series palette, applied in declaration order; wraps around when a chart
/// carries more series than colors.
pub const SERIES_COLORS: [RGBColor; 10] = [
    RGBColor(0xE3, 0x42, 0x34),
    RGBColor(0x64, 0x95, 0xED),
    RGBColor(0x3C, 0xB3, 0x71),
    RGBColor(0xF1, 0x8F, 0x01),
    RGBColor(0xDA, 0x70, 0xD6),
    RGBColor(0xFF, 0xD7, 0x00),
    RGBColor(0xB0, 0xC4, 0xDE),
    RGBColor(0xFF, 0xA0, 0x7A),
    RGBColor(0x20, 0xB2, 0xAA),
    RGBColor(0x87, 0xCE, 0xFA),
];

pub fn series_color(index: usize) -> RGBColor {
    SERIES_COLORS[index % SERIES_COLORS.len()]
}

pub const FONT: &str = "sans-serif";
pub const TITLE_FONT_SIZE: u32 = 16;
pub const LABEL_FONT_SIZE: u32 = 12;
pub const POINT_LABEL_FONT_SIZE: u32 = 10;

/// Output size in pixels for every chart.
pub const CHART_SIZE: (u32, u32) = (960, 540);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn series_colors_wrap_around() {
        assert_eq!(series_color(0), SERIES_COLORS[0]);
        assert_eq!(series_color(10), SERIES_COLORS[0]);
        assert_eq!(series_color(13), SERIES_COLORS[3]);
    }
}
