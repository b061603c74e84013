//! Presentation model shared by the HTML export and the egui viewer.
//!
//! ```text
//!   Summary ──► Chart { variant, points } ──┬──► html   (Plotly page on disk)
//!                                           └──► ui     (egui_plot window)
//! ```

pub mod html;

use serde::Serialize;

use crate::data::category::{Category, MarkerShape};
use crate::data::model::Summary;
use crate::data::stats::SCALE_MAX;

/// Marker size (px) at scaled mean 0 in the categorized chart.
pub const MIN_MARKER_SIZE: f64 = 20.0;
/// Marker size (px) at scaled mean 5 in the categorized chart.
pub const MAX_MARKER_SIZE: f64 = 80.0;

// ---------------------------------------------------------------------------
// ChartVariant
// ---------------------------------------------------------------------------

/// The three chart layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ChartVariant {
    /// Fixed green circles, scaled mean only.
    Basic,
    /// Viridis colour by scaled mean, raw mean on hover, range slider.
    Gradient,
    /// Gradient plus marker shape by category, size by scaled mean and
    /// correlation on hover.
    Categorized,
}

impl ChartVariant {
    pub fn output_file(self) -> &'static str {
        match self {
            ChartVariant::Basic => "scatter_plot.html",
            ChartVariant::Gradient | ChartVariant::Categorized => "scatter_plot_interactive.html",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            ChartVariant::Basic => "Factors Affect Student Stress",
            _ => "Factors Affecting Student Stress (Interactive)",
        }
    }

    pub fn x_title(self) -> &'static str {
        match self {
            ChartVariant::Basic => "Quantiles",
            _ => "Scaled Mean (0–5)",
        }
    }

    pub fn width(self) -> u32 {
        match self {
            ChartVariant::Basic => 900,
            _ => 950,
        }
    }

    /// Figure height for `rows` factors.
    pub fn height(self, rows: usize) -> u32 {
        let rows = rows as u32;
        match self {
            ChartVariant::Basic => (28 * rows + 160).max(600),
            _ => (30 * rows + 160).max(650),
        }
    }

    /// Whether markers are coloured along the Viridis scale.
    pub fn uses_color_scale(self) -> bool {
        !matches!(self, ChartVariant::Basic)
    }

    fn marker_size(self, scaled_mean: f64) -> f64 {
        match self {
            ChartVariant::Basic => 12.0,
            ChartVariant::Gradient => 14.0,
            ChartVariant::Categorized => {
                MIN_MARKER_SIZE + (scaled_mean / SCALE_MAX) * (MAX_MARKER_SIZE - MIN_MARKER_SIZE)
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Chart
// ---------------------------------------------------------------------------

/// One factor on the chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub name: String,
    pub scaled_mean: f64,
    pub raw_mean: f64,
    /// Correlation to the stress column; 0 when not computed.
    pub correlation: f64,
    pub category: Category,
    pub shape: MarkerShape,
    /// Plotly marker diameter in px.
    pub size: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Chart {
    pub variant: ChartVariant,
    /// Factors from bottom to top of the y axis.
    pub points: Vec<ChartPoint>,
}

impl Chart {
    pub fn from_summary(summary: &Summary, variant: ChartVariant) -> Self {
        let points = summary
            .columns
            .iter()
            .map(|col| {
                let category = Category::of(&col.name);
                let shape = match variant {
                    ChartVariant::Categorized => category.shape(),
                    _ => MarkerShape::Circle,
                };
                ChartPoint {
                    name: col.name.clone(),
                    scaled_mean: col.scaled_mean,
                    raw_mean: col.raw_mean,
                    correlation: col.correlation.unwrap_or(0.0),
                    category,
                    shape,
                    size: variant.marker_size(col.scaled_mean),
                }
            })
            .collect();
        Chart { variant, points }
    }

    pub fn height(&self) -> u32 {
        self.variant.height(self.points.len())
    }

    /// Smallest and largest scaled mean, used to stretch the colour scale.
    pub fn scaled_range(&self) -> (f64, f64) {
        self.points.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
            (lo.min(p.scaled_mean), hi.max(p.scaled_mean))
        })
    }
}
