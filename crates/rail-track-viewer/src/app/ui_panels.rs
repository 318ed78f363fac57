//! UI panels for the application
//!
//! This module provides the sidebar (legend, dataset summary, layer switches) and the
//! overlaid toggle button.

use crate::app::state::{AppState, SidebarTab, TilesProvider};
use egui::{Color32, RichText, Ui};
use rail_track_lib::Presentation;

/// Render the sidebar toggle button (overlaid on top-right of map)
pub fn sidebar_toggle_button(ui: &mut Ui, state: &mut AppState) {
    let button_size = egui::vec2(40.0, 40.0);
    let margin = 10.0;

    let rect = ui.max_rect();
    let button_pos = rect.right_top() + egui::vec2(-button_size.x - margin, margin);
    let button_rect = egui::Rect::from_min_size(button_pos, button_size);

    let response = ui.allocate_rect(button_rect, egui::Sense::click());

    if response.clicked() {
        state.ui_settings.sidebar_open = !state.ui_settings.sidebar_open;
    }

    let bg_color = if response.hovered() {
        ui.visuals().widgets.hovered.bg_fill
    } else {
        ui.visuals().widgets.inactive.bg_fill
    };

    ui.painter().rect_filled(button_rect, 5.0, bg_color);

    let icon = if state.ui_settings.sidebar_open {
        "✕"
    } else {
        "☰"
    };

    ui.painter().text(
        button_rect.center(),
        egui::Align2::CENTER_CENTER,
        icon,
        egui::FontId::proportional(20.0),
        ui.visuals().text_color(),
    );
}

/// Render the main sidebar
pub fn render_sidebar(ctx: &egui::Context, state: &mut AppState) {
    if !state.ui_settings.sidebar_open {
        return;
    }

    egui::SidePanel::right("main_sidebar")
        .default_width(300.0)
        .min_width(240.0)
        .max_width(450.0)
        .resizable(true)
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.selectable_value(
                    &mut state.ui_settings.active_tab,
                    SidebarTab::Tracks,
                    "🚆 Tracks",
                );
                ui.selectable_value(
                    &mut state.ui_settings.active_tab,
                    SidebarTab::Layers,
                    "🗺 Layers",
                );
            });

            ui.separator();

            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| match state.ui_settings.active_tab {
                    SidebarTab::Tracks => render_tracks_tab(ui, state),
                    SidebarTab::Layers => render_layers_tab(ui, state),
                });
        });
}

/// Render the Tracks tab
fn render_tracks_tab(ui: &mut Ui, state: &mut AppState) {
    ui.add_enabled_ui(state.has_bounds(), |ui| {
        if ui.button("🎯 Fit to Bounds").clicked() {
            state.request_fit_bounds();
        }
    });

    ui.add_space(8.0);
    ui.label(
        RichText::new(format!(
            "📄 {}",
            state
                .dataset_path
                .file_name()
                .unwrap_or_default()
                .to_string_lossy()
        ))
        .small(),
    );

    if let Some(error) = &state.load_error {
        ui.add_space(4.0);
        ui.label(RichText::new(format!("⚠ {error}")).small().color(Color32::RED));
        return;
    }

    let Some(presentation) = state.presentation.clone() else {
        return;
    };

    ui.add_space(8.0);
    render_stats_section(ui, &presentation);

    if !presentation.errors.is_empty() {
        ui.add_space(8.0);
        ui.separator();
        ui.label(
            RichText::new(format!("⚠ {} features not drawn", presentation.errors.len()))
                .strong()
                .color(Color32::RED),
        );
        egui::ScrollArea::vertical()
            .id_salt("errors_scroll")
            .max_height(100.0)
            .show(ui, |ui| {
                for failure in &presentation.errors {
                    ui.label(
                        RichText::new(format!("• #{}: {}", failure.index, failure.error))
                            .small()
                            .color(Color32::RED),
                    );
                }
            });
    }

    ui.add_space(8.0);
    ui.separator();
    render_legend(ui, &presentation);
}

fn render_stats_section(ui: &mut Ui, presentation: &Presentation) {
    egui::Grid::new("stats_grid")
        .num_columns(2)
        .spacing([12.0, 4.0])
        .show(ui, |ui| {
            ui.label("Features:");
            ui.label(presentation.collection.len().to_string());
            ui.end_row();

            ui.label("Tracks:");
            ui.label(presentation.colors.len().to_string());
            ui.end_row();

            ui.label("Points:");
            ui.label(presentation.drawn_coord_count().to_string());
            ui.end_row();

            if let Some(bounds) = &presentation.bounds {
                ui.label("Extent:");
                ui.label(
                    RichText::new(format!(
                        "{:.3}, {:.3} → {:.3}, {:.3}",
                        bounds.south(),
                        bounds.west(),
                        bounds.north(),
                        bounds.east()
                    ))
                    .small(),
                );
                ui.end_row();
            }
        });
}

/// Color swatch, identifier and name of every track in the dataset
fn render_legend(ui: &mut Ui, presentation: &Presentation) {
    ui.label(RichText::new("🎨 Legend").strong());
    ui.add_space(4.0);

    if presentation.legend.is_empty() {
        ui.label(RichText::new("No identified tracks").small().weak());
        return;
    }

    for entry in &presentation.legend {
        ui.horizontal(|ui| {
            let (rect, _) = ui.allocate_exact_size(egui::vec2(18.0, 6.0), egui::Sense::hover());
            let color = entry.color;
            ui.painter()
                .rect_filled(rect, 1.0, Color32::from_rgb(color.r, color.g, color.b));

            let name = entry.name.as_deref().unwrap_or_default();
            ui.label(RichText::new(format!("{}  {name}", entry.track_id)).small());
        });
    }
}

/// Render the Layers tab
fn render_layers_tab(ui: &mut Ui, state: &mut AppState) {
    ui.label(RichText::new("🗺 Base Layer").strong());
    ui.add_space(6.0);

    for provider in TilesProvider::all() {
        ui.radio_value(
            &mut state.ui_settings.tiles_provider,
            *provider,
            provider.name(),
        );
    }

    ui.add_space(4.0);
    ui.label(
        RichText::new(state.ui_settings.tiles_provider.attribution())
            .small()
            .italics()
            .weak(),
    );

    ui.add_space(12.0);
    ui.separator();
    ui.add_space(8.0);

    ui.label(RichText::new("🚆 Overlays").strong());
    ui.add_space(6.0);

    ui.checkbox(&mut state.ui_settings.show_tracks, "Railway Tracks");
    ui.add_enabled_ui(state.ui_settings.show_tracks, |ui| {
        ui.checkbox(&mut state.ui_settings.show_labels, "Track labels");
    });

    ui.add_space(12.0);
    ui.separator();
    ui.add_space(8.0);

    ui.label(RichText::new("ℹ About").strong());
    ui.add_space(4.0);
    ui.label(RichText::new("Rail Track Viewer").small());
    ui.label(
        RichText::new("British National Grid track data on a web map")
            .small()
            .weak(),
    );
}
