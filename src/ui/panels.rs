use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::chart::ChartVariant;
use crate::color::viridis_in_range;
use crate::data::category::shape_legend;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – statistics table
// ---------------------------------------------------------------------------

/// Render the per-factor statistics.
pub fn side_panel(ui: &mut Ui, state: &AppState) {
    ui.heading("Factors");
    ui.separator();

    let (Some(summary), Some(chart)) = (&state.summary, &state.chart) else {
        ui.label("No dataset loaded.");
        return;
    };

    ui.label(format!("Source: {}", summary.source.display()));
    match &summary.stress_column {
        Some(col) => match summary.column(col) {
            Some(stress) => ui.label(format!(
                "Correlation target: {col} (mean {:.2})",
                stress.raw_mean
            )),
            None => ui.label(format!("Correlation target: {col}")),
        },
        None => ui.label("No stress level column; correlations not computed."),
    };
    if chart.variant == ChartVariant::Categorized {
        ui.small(shape_legend());
    }
    ui.separator();

    let (lo, hi) = chart.scaled_range();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            egui::Grid::new("stats_grid")
                .striped(true)
                .num_columns(6)
                .show(ui, |ui: &mut Ui| {
                    for header in ["Factor", "", "n", "Raw", "Scaled", "r"] {
                        ui.strong(header);
                    }
                    ui.end_row();

                    for (stat, point) in summary.columns.iter().zip(&chart.points) {
                        ui.label(stat.name.as_str())
                            .on_hover_text(point.category.label());
                        ui.label(point.shape.glyph().to_string());
                        ui.label(stat.count.to_string());
                        ui.label(format!("{:.2}", stat.raw_mean));
                        ui.label(
                            RichText::new(format!("{:.2}", stat.scaled_mean))
                                .color(viridis_in_range(stat.scaled_mean, lo, hi)),
                        );
                        match stat.correlation {
                            Some(r) => ui.label(format!("{r:+.2}")),
                            None => ui.weak("–"),
                        };
                        ui.end_row();
                    }
                });
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui
                .add_enabled(state.chart.is_some(), egui::Button::new("Export HTML"))
                .clicked()
            {
                if let Err(e) = state.export_html() {
                    log::error!("Failed to export chart: {e:#}");
                    state.status_message = Some(format!("Error: {e:#}"));
                }
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(summary) = &state.summary {
            ui.label(format!("{} numeric factors", summary.columns.len()));
        }

        ui.separator();

        for (variant, label) in [
            (ChartVariant::Basic, "Basic"),
            (ChartVariant::Gradient, "Gradient"),
            (ChartVariant::Categorized, "Categorized"),
        ] {
            if ui.selectable_label(state.variant == variant, label).clicked() {
                state.set_variant(variant);
            }
        }

        if let Some(msg) = &state.status_message {
            let color = if msg.starts_with("Error") {
                Color32::RED
            } else {
                Color32::GRAY
            };
            ui.label(RichText::new(msg).color(color));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open survey data")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        match state.load_path(&path) {
            Ok(()) => {
                log::info!("Loaded {}", path.display());
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
