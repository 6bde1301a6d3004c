use std::collections::BTreeMap;
use std::f32::consts::{FRAC_PI_2, TAU};

use eframe::egui::{Color32, CornerRadius, Sense, Shape, Stroke, Ui, Vec2};
use egui_plot::{Legend, MarkerShape, Plot, PlotPoints, Points};

use crate::color::{self, ColorMap};
use crate::data::aggregate::{PayloadScatter, SiteSuccessSummary};

// ---------------------------------------------------------------------------
// success-pie-chart
// ---------------------------------------------------------------------------

/// Render the success pie chart with its legend.
pub fn success_pie(ui: &mut Ui, summary: &SiteSuccessSummary, site_colors: &ColorMap) {
    ui.strong(summary.title.as_str());
    ui.add_space(4.0);

    let total = summary.total();
    if summary.slices.is_empty() || total <= 0.0 {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.label("No launches match the current selection.");
        });
        return;
    }

    ui.horizontal(|ui: &mut Ui| {
        // ---- Pie ----
        let side = ui
            .available_height()
            .min(ui.available_width() * 0.55)
            .max(80.0);
        let (rect, _) = ui.allocate_exact_size(Vec2::splat(side), Sense::hover());
        let painter = ui.painter_at(rect);
        let center = rect.center();
        let radius = side * 0.5 - 4.0;

        let mut start_angle = -FRAC_PI_2;
        for slice in &summary.slices {
            if slice.value <= 0.0 {
                continue; // zero-size slice, legend only
            }
            let sweep = (slice.value / total) as f32 * TAU;
            let fill = slice_color(&slice.label, site_colors);

            // Triangle fan, ~2° per segment keeps the arc smooth and every
            // polygon convex regardless of the slice angle.
            let segments = (sweep / 0.035).ceil().max(1.0) as usize;
            for seg in 0..segments {
                let a0 = start_angle + sweep * seg as f32 / segments as f32;
                let a1 = start_angle + sweep * (seg + 1) as f32 / segments as f32;
                painter.add(Shape::convex_polygon(
                    vec![
                        center,
                        center + Vec2::angled(a0) * radius,
                        center + Vec2::angled(a1) * radius,
                    ],
                    fill,
                    Stroke::NONE,
                ));
            }
            start_angle += sweep;
        }

        ui.add_space(12.0);

        // ---- Legend ----
        ui.vertical(|ui: &mut Ui| {
            for slice in &summary.slices {
                let pct = 100.0 * slice.value / total;
                ui.horizontal(|ui: &mut Ui| {
                    let (swatch, _) =
                        ui.allocate_exact_size(Vec2::splat(12.0), Sense::hover());
                    ui.painter().rect_filled(
                        swatch,
                        CornerRadius::same(2),
                        slice_color(&slice.label, site_colors),
                    );
                    ui.label(format!("{}  {} ({:.1}%)", slice.label, slice.value, pct));
                });
            }
        });
    });
}

/// Outcome slices get the fixed success/failure colors; site slices come
/// from the per-site color map.
fn slice_color(label: &str, site_colors: &ColorMap) -> Color32 {
    color::outcome_color(label).unwrap_or_else(|| site_colors.color_for(label))
}

// ---------------------------------------------------------------------------
// success-payload-scatter-chart
// ---------------------------------------------------------------------------

/// Render the payload vs. outcome scatter, colored by booster category.
/// An empty point set still draws the plot frame.
pub fn payload_scatter(ui: &mut Ui, scatter: &PayloadScatter, booster_colors: &ColorMap) {
    ui.strong(scatter.title.as_str());
    ui.add_space(4.0);

    // One series per booster category so the legend lists each once.
    let mut by_category: BTreeMap<&str, Vec<[f64; 2]>> = BTreeMap::new();
    for p in &scatter.points {
        by_category
            .entry(p.booster_category.as_str())
            .or_default()
            .push([p.payload_mass_kg, f64::from(p.outcome.class())]);
    }

    Plot::new("success-payload-scatter-chart")
        .legend(Legend::default())
        .x_axis_label("Payload Mass (kg)")
        .y_axis_label("Launch Outcome")
        .include_y(-0.25)
        .include_y(1.25)
        .show(ui, |plot_ui| {
            for (category, points) in by_category {
                plot_ui.points(
                    Points::new(PlotPoints::new(points))
                        .name(category)
                        .color(booster_colors.color_for(category))
                        .filled(true)
                        .radius(4.0)
                        .shape(MarkerShape::Circle),
                );
            }
        });
}
