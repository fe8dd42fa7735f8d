//! SVG chart rendering.
//!
//! Each chart is a pure function of its derived table plus the fixed style
//! configuration in [`style`]: same table in, same SVG out. Every render
//!
//! - ensures the output directory exists (`create_dir_all`, idempotent)
//! - draws the chart with Plotters' SVG backend
//! - writes a fixed filename and returns it
//!
//! Any failure along the way is logged and converted into an empty filename;
//! a broken chart must never take the page down with it.

pub mod comparison;
pub mod share;
pub mod style;
pub mod volume;

pub use comparison::render_comparison_chart;
pub use share::render_share_chart;
pub use volume::render_volume_chart;

/// Fixed output filenames, referenced by the page template.
pub const VOLUME_CHART_FILE: &str = "volume_anual.svg";
pub const SHARE_CHART_FILE: &str = "participacao_mensal.svg";
pub const COMPARISON_CHART_FILE: &str = "comparacao_volume_selic.svg";
