use eframe::egui;

use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct StressFactorsApp {
    pub state: AppState,
}

impl StressFactorsApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for StressFactorsApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: per-factor statistics ----
        egui::SidePanel::left("stats_panel")
            .default_width(340.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &self.state);
            });

        // ---- Central panel: scatter chart ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::factor_plot(ui, &self.state);
        });
    }
}
