use std::ops::RangeInclusive;

use eframe::egui::{Color32, Ui};
use egui_plot::{uniform_grid_spacer, GridInput, GridMark, Plot, PlotPoint, Points};

use crate::chart::{ChartPoint, ChartVariant};
use crate::color::{hex_to_color32, viridis_in_range, BASIC_MARKER_HEX};
use crate::data::category::MarkerShape;
use crate::data::stats::SCALE_MAX;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Factor scatter plot (central panel)
// ---------------------------------------------------------------------------

/// Render the scaled means, one row per factor.
pub fn factor_plot(ui: &mut Ui, state: &AppState) {
    let chart = match &state.chart {
        Some(c) => c,
        None => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading("Open a CSV file to view factors  (File → Open…)");
            });
            return;
        }
    };

    let names: Vec<String> = chart.points.iter().map(|p| p.name.clone()).collect();
    let hover_points = chart.points.clone();
    let variant = chart.variant;
    let (lo, hi) = chart.scaled_range();
    let fixed_color = hex_to_color32(BASIC_MARKER_HEX).unwrap_or(Color32::DARK_GREEN);

    Plot::new("factor_plot")
        .x_axis_label(variant.x_title())
        .y_axis_label("Factor")
        .include_x(0.0)
        .include_x(SCALE_MAX)
        .include_y(-0.5)
        .include_y(names.len() as f64 - 0.5)
        .y_grid_spacer(uniform_grid_spacer(|_: GridInput| [1.0, 5.0, 10.0]))
        .y_axis_formatter(move |mark: GridMark, _range: &RangeInclusive<f64>| {
            factor_label(&names, mark.value)
        })
        .label_formatter(move |name: &str, _value: &PlotPoint| {
            hover_text(&hover_points, variant, name)
        })
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for (row, p) in chart.points.iter().enumerate() {
                let color = if variant.uses_color_scale() {
                    viridis_in_range(p.scaled_mean, lo, hi)
                } else {
                    fixed_color
                };

                let points = Points::new(vec![[p.scaled_mean, row as f64]])
                    .name(&p.name)
                    .shape(plot_marker(p.shape))
                    .radius(marker_radius(p.size))
                    .color(color)
                    .filled(true);

                plot_ui.points(points);
            }
        });
}

fn plot_marker(shape: MarkerShape) -> egui_plot::MarkerShape {
    match shape {
        MarkerShape::Square => egui_plot::MarkerShape::Square,
        MarkerShape::Circle => egui_plot::MarkerShape::Circle,
        MarkerShape::TriangleUp => egui_plot::MarkerShape::Up,
        MarkerShape::Diamond => egui_plot::MarkerShape::Diamond,
    }
}

/// Plotly diameter (px) → egui radius, drawn at half size.
fn marker_radius(size: f64) -> f32 {
    (size / 4.0) as f32
}

/// Factor name for an integer grid line, blank elsewhere.
fn factor_label(names: &[String], value: f64) -> String {
    let idx = value.round();
    if (value - idx).abs() > 1e-6 || idx < 0.0 {
        return String::new();
    }
    names.get(idx as usize).cloned().unwrap_or_default()
}

fn hover_text(points: &[ChartPoint], variant: ChartVariant, name: &str) -> String {
    let Some(p) = points.iter().find(|p| p.name == name) else {
        return String::new();
    };
    match variant {
        ChartVariant::Basic => format!("factor={}\nmean (0–5)={:.2}", p.name, p.scaled_mean),
        ChartVariant::Gradient => format!(
            "{}\nScaled Mean: {:.2}/5\nRaw Mean: {:.2}",
            p.name, p.scaled_mean, p.raw_mean
        ),
        ChartVariant::Categorized => format!(
            "{}\nScaled Mean: {:.2}/5\nRaw Mean: {:.2}\nCorrelation to Stress Level: {:.2}",
            p.name, p.scaled_mean, p.raw_mean, p.correlation
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::category::Category;

    fn point(name: &str) -> ChartPoint {
        ChartPoint {
            name: name.to_string(),
            scaled_mean: 2.5,
            raw_mean: 15.0,
            correlation: 0.25,
            category: Category::School,
            shape: MarkerShape::Square,
            size: 50.0,
        }
    }

    #[test]
    fn labels_only_on_integer_rows() {
        let names = vec!["a".to_string(), "b".to_string()];
        assert_eq!(factor_label(&names, 0.0), "a");
        assert_eq!(factor_label(&names, 1.0), "b");
        assert_eq!(factor_label(&names, 0.5), "");
        assert_eq!(factor_label(&names, 2.0), "");
        assert_eq!(factor_label(&names, -1.0), "");
    }

    #[test]
    fn hover_text_per_variant() {
        let points = vec![point("study_load")];
        assert_eq!(
            hover_text(&points, ChartVariant::Basic, "study_load"),
            "factor=study_load\nmean (0–5)=2.50"
        );
        assert!(hover_text(&points, ChartVariant::Categorized, "study_load")
            .ends_with("Correlation to Stress Level: 0.25"));
        assert_eq!(hover_text(&points, ChartVariant::Gradient, "other"), "");
    }

    #[test]
    fn shapes_map_onto_plot_markers() {
        assert_eq!(plot_marker(MarkerShape::TriangleUp), egui_plot::MarkerShape::Up);
        assert_eq!(marker_radius(80.0), 20.0);
    }
}
