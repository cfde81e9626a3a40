use eframe::egui;

use crate::state::AppState;
use crate::ui::{panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct WorldStatsApp {
    pub state: AppState,
}

impl WorldStatsApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for WorldStatsApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: selection controls ----
        egui::SidePanel::left("selection_panel")
            .default_width(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Bottom panel: table region ----
        egui::TopBottomPanel::bottom("table_region")
            .default_height(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                table::table_region(ui, &mut self.state);
            });

        // ---- Central panel: scatter comparison ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::scatter_plot(ui, &self.state.graph);
        });
    }
}
