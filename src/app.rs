use eframe::egui;

use crate::state::AppState;
use crate::ui::{charts, panels};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct LaunchDashApp {
    pub state: AppState,
}

impl LaunchDashApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for LaunchDashApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu / status bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: the two bound controls ----
        egui::SidePanel::left("control_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::control_panel(ui, &mut self.state);
            });

        // ---- Bottom panel: payload/outcome scatter ----
        egui::TopBottomPanel::bottom("scatter_panel")
            .resizable(true)
            .default_height(320.0)
            .show(ctx, |ui| {
                charts::payload_scatter(ui, &self.state.scatter, &self.state.booster_colors);
            });

        // ---- Central panel: success pie ----
        egui::CentralPanel::default().show(ctx, |ui| {
            charts::success_pie(ui, &self.state.pie, &self.state.site_colors);
        });
    }
}
