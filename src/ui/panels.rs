use eframe::egui::{self, Color32, ComboBox, RichText, Ui};

use crate::data::model::{PayloadRange, SiteSelection};
use crate::state::{AppState, PAYLOAD_DOMAIN_MAX, PAYLOAD_DOMAIN_MIN, PAYLOAD_STEP};

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / status bar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();
        ui.strong("SpaceX Launch Records Dashboard");
        ui.separator();

        ui.label(format!(
            "{} launches across {} sites",
            state.dataset.len(),
            state.dataset.sites.len()
        ));

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Left control panel – site dropdown and payload range
// ---------------------------------------------------------------------------

/// Render the two bound controls. Each value change triggers exactly one
/// recomputation through the `AppState` setters.
pub fn control_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Controls");
    ui.separator();

    // ---- Site dropdown ----
    ui.strong("Launch Site");
    let sites = state.dataset.sites.clone();
    let current = state.controls.selected_site.clone();
    ComboBox::from_id_salt("site-dropdown")
        .width(ui.available_width())
        .selected_text(current.label().to_string())
        .show_ui(ui, |ui: &mut Ui| {
            if ui
                .selectable_label(
                    current == SiteSelection::AllSites,
                    SiteSelection::ALL_LABEL,
                )
                .clicked()
            {
                state.select_site(SiteSelection::AllSites);
            }
            for site in &sites {
                let selection = SiteSelection::Site(site.clone());
                if ui.selectable_label(current == selection, site).clicked() {
                    state.select_site(selection);
                }
            }
        });

    ui.add_space(8.0);
    ui.separator();

    // ---- Payload range (fixed 0–10000 domain, 1000 kg steps) ----
    ui.strong("Payload range (kg)");
    let mut low = state.controls.payload_range.low();
    let mut high = state.controls.payload_range.high();

    let low_changed = ui
        .add(
            egui::Slider::new(&mut low, PAYLOAD_DOMAIN_MIN..=PAYLOAD_DOMAIN_MAX)
                .step_by(PAYLOAD_STEP)
                .text("Min"),
        )
        .changed();
    let high_changed = ui
        .add(
            egui::Slider::new(&mut high, PAYLOAD_DOMAIN_MIN..=PAYLOAD_DOMAIN_MAX)
                .step_by(PAYLOAD_STEP)
                .text("Max"),
        )
        .changed();

    if low_changed || high_changed {
        // Keep low <= high: the edited bound drags the other one along.
        if low_changed {
            high = high.max(low);
        } else {
            low = low.min(high);
        }
        state.set_payload_range(PayloadRange::ordered(low, high));
    }

    ui.add_space(8.0);
    ui.separator();
    ui.label(format!(
        "{} of {} launches match the current selection",
        state.scatter.points.len(),
        state.dataset.len()
    ));
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open launch records")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        match crate::data::loader::load_file(&path) {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} launch records across {} sites",
                    dataset.len(),
                    dataset.sites.len()
                );
                state.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
