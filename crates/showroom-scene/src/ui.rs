//! Overlay UI using bevy_egui: menu, viewpoint arrows, zoom, theme and details panel

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts, EguiPrimaryContextPass};

use crate::camera::CameraRig;
use crate::types::{SceneConfig, Selection, UiLayout, ViewerState};

const ACCENT_YELLOW: egui::Color32 = egui::Color32::from_rgb(242, 201, 76);
const HOVER_GREEN: egui::Color32 = egui::Color32::from_rgb(46, 160, 90);
const ICON_SIZE: f32 = 44.0;
const EDGE_MARGIN: f32 = 16.0;

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, (update_ui_layout, handle_keyboard))
            // Runs in EguiPrimaryContextPass for proper input handling (bevy_egui 0.38+)
            .add_systems(EguiPrimaryContextPass, ui_system);
    }
}

/// Update UI layout based on window size
fn update_ui_layout(
    windows: Query<&Window>,
    mut ui_layout: ResMut<UiLayout>,
) {
    if let Ok(window) = windows.single() {
        let width = window.width();
        let height = window.height();

        // Only update if dimensions changed significantly
        if (ui_layout.screen_width - width).abs() > 1.0
            || (ui_layout.screen_height - height).abs() > 1.0
        {
            ui_layout.update_for_screen(width, height);
        }
    }
}

/// Arrow keys step through viewpoints unless a text field has focus
fn handle_keyboard(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut viewer: ResMut<ViewerState>,
    mut contexts: EguiContexts,
) {
    let typing = contexts
        .ctx_mut()
        .map(|ctx| ctx.wants_keyboard_input())
        .unwrap_or(false);
    if typing {
        return;
    }

    if keyboard.just_pressed(KeyCode::ArrowRight) {
        viewer.next_preset();
    } else if keyboard.just_pressed(KeyCode::ArrowLeft) {
        viewer.previous_preset();
    }
}

fn ui_system(
    mut contexts: EguiContexts,
    mut viewer: ResMut<ViewerState>,
    selection: Res<Selection>,
    mut rig: ResMut<CameraRig>,
    config: Res<SceneConfig>,
    ui_layout: Res<UiLayout>,
) {
    let Ok(ctx) = contexts.ctx_mut() else { return };

    let dark = viewer.theme.is_dark();
    if ctx.style().visuals.dark_mode != dark {
        ctx.set_visuals(if dark { egui::Visuals::dark() } else { egui::Visuals::light() });
    }

    // Viewpoint menu (left side)
    egui::SidePanel::left("viewpoint_panel")
        .exact_width(ui_layout.panel_width())
        .resizable(false)
        .show_animated(ctx, viewer.menu_open, |ui| {
            // Leave room for the hamburger drawn over the panel
            ui.add_space(ICON_SIZE + EDGE_MARGIN);
            ui.heading("Viewpoints");
            ui.separator();

            let current = viewer.presets.index();
            let mut chosen = None;
            for (i, preset) in config.0.presets.iter().enumerate() {
                if ui.selectable_label(current == i, &preset.name).clicked() {
                    chosen = Some(i);
                }
            }
            if let Some(i) = chosen {
                if viewer.presets.select(i) {
                    tracing::info!("Viewpoint selected: {}", config.0.presets[i].name);
                }
            }
        });

    // Details panel (right side), only with something to describe
    let details_visible = viewer.details_open && selection.0.is_some();
    egui::SidePanel::right("details_panel")
        .exact_width(ui_layout.right_panel_width())
        .resizable(false)
        .show_animated(ctx, details_visible, |ui| {
            let Some(selected) = selection.0.as_ref() else {
                return;
            };
            ui.horizontal(|ui| {
                ui.heading(&selected.name);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui
                        .button(egui::RichText::new("×").size(20.0))
                        .on_hover_text("Close description panel")
                        .clicked()
                    {
                        viewer.close_details();
                    }
                });
            });
            ui.separator();
            ui.label(&selected.description);
        });

    // Hamburger (top left)
    egui::Area::new(egui::Id::new("menu_toggle"))
        .anchor(egui::Align2::LEFT_TOP, [EDGE_MARGIN, EDGE_MARGIN])
        .show(ctx, |ui| {
            if hamburger_button(ui, viewer.menu_open).clicked() {
                viewer.toggle_menu();
            }
        });

    // Viewpoint arrows (bottom center, shifted right while the menu is open)
    let nav_shift = if viewer.menu_open { ui_layout.panel_width() / 2.0 } else { 0.0 };
    egui::Area::new(egui::Id::new("viewpoint_navigation"))
        .anchor(egui::Align2::CENTER_BOTTOM, [nav_shift, -EDGE_MARGIN])
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.add(arrow_button("←")).on_hover_text("Previous viewpoint").clicked() {
                    viewer.previous_preset();
                }
                if ui.add(arrow_button("→")).on_hover_text("Next viewpoint").clicked() {
                    viewer.next_preset();
                }
            });
        });

    // Zoom and theme controls (bottom right, clear of the details panel)
    let controls_shift = if details_visible { -ui_layout.right_panel_width() } else { 0.0 };
    egui::Area::new(egui::Id::new("view_controls"))
        .anchor(egui::Align2::RIGHT_BOTTOM, [controls_shift - EDGE_MARGIN, -EDGE_MARGIN])
        .show(ctx, |ui| {
            ui.vertical(|ui| {
                if zoom_button(ui, true, "Zoom in").clicked() && rig.zoom.zoom_in() {
                    tracing::debug!(fov = rig.zoom.degrees(), "Zoom in");
                }
                if zoom_button(ui, false, "Zoom out").clicked() && rig.zoom.zoom_out() {
                    tracing::debug!(fov = rig.zoom.degrees(), "Zoom out");
                }
                if theme_button(ui, dark).clicked() {
                    viewer.theme.toggle();
                    tracing::info!(dark = viewer.theme.is_dark(), "Theme toggled");
                }
            });
        });
}

fn arrow_button(text: &str) -> egui::Button<'static> {
    egui::Button::new(egui::RichText::new(text).size(22.0))
        .min_size(egui::vec2(ICON_SIZE, ICON_SIZE))
}

fn allocate_icon(ui: &mut egui::Ui) -> (egui::Rect, egui::Response) {
    ui.allocate_exact_size(egui::vec2(ICON_SIZE, ICON_SIZE), egui::Sense::click())
}

/// Three-bar menu button; focusable, so Enter and Space activate it
fn hamburger_button(ui: &mut egui::Ui, open: bool) -> egui::Response {
    let (rect, response) = allocate_icon(ui);
    response.widget_info(|| {
        egui::WidgetInfo::selected(egui::WidgetType::Button, ui.is_enabled(), open, "Toggle menu")
    });

    if ui.is_rect_visible(rect) {
        let visuals = ui.style().interact(&response);
        let painter = ui.painter();
        painter.rect_filled(rect, 6.0, visuals.bg_fill);
        let stroke = egui::Stroke::new(3.0, visuals.fg_stroke.color);
        let half = rect.width() * 0.28;
        for offset in [-9.0, 0.0, 9.0] {
            let y = rect.center().y + offset;
            painter.line_segment(
                [egui::pos2(rect.center().x - half, y), egui::pos2(rect.center().x + half, y)],
                stroke,
            );
        }
    }
    response.on_hover_text("Toggle menu")
}

/// Round plus/minus button: yellow symbol at rest, white on a green disc when hovered
fn zoom_button(ui: &mut egui::Ui, plus: bool, label: &str) -> egui::Response {
    let (rect, response) = allocate_icon(ui);
    let enabled = ui.is_enabled();
    response.widget_info(|| egui::WidgetInfo::labeled(egui::WidgetType::Button, enabled, label));

    if ui.is_rect_visible(rect) {
        let painter = ui.painter();
        let center = rect.center();
        let hot = response.hovered() || response.has_focus();
        let symbol_color = if hot {
            painter.circle_filled(center, rect.width() * 0.5, HOVER_GREEN);
            egui::Color32::WHITE
        } else {
            let outline = egui::Stroke::new(2.0, ACCENT_YELLOW);
            painter.circle_stroke(center, rect.width() * 0.5 - 1.5, outline);
            ACCENT_YELLOW
        };

        let arm = rect.width() * 0.22;
        let stroke = egui::Stroke::new(4.0, symbol_color);
        let across = egui::vec2(arm, 0.0);
        painter.line_segment([center - across, center + across], stroke);
        if plus {
            let down = egui::vec2(0.0, arm);
            painter.line_segment([center - down, center + down], stroke);
        }
    }
    response.on_hover_text(label)
}

/// Half-filled disc that toggles the theme
fn theme_button(ui: &mut egui::Ui, dark: bool) -> egui::Response {
    let label = if dark { "Switch to light theme" } else { "Switch to dark theme" };
    let (rect, response) = allocate_icon(ui);
    let enabled = ui.is_enabled();
    response.widget_info(|| egui::WidgetInfo::labeled(egui::WidgetType::Button, enabled, label));

    if ui.is_rect_visible(rect) {
        let painter = ui.painter();
        let center = rect.center();
        let radius = rect.width() * 0.5 - 2.0;
        let hot = response.hovered() || response.has_focus();
        let ring = if hot { HOVER_GREEN } else { ACCENT_YELLOW };
        let (lit, shade) = if dark {
            (egui::Color32::WHITE, egui::Color32::BLACK)
        } else {
            (egui::Color32::BLACK, egui::Color32::WHITE)
        };

        painter.circle_filled(center, radius, shade);
        // Left half in the opposite color
        let half: Vec<egui::Pos2> = (0..=24)
            .map(|i| {
                let angle = std::f32::consts::FRAC_PI_2 + std::f32::consts::PI * i as f32 / 24.0;
                center + radius * egui::vec2(angle.cos(), angle.sin())
            })
            .collect();
        painter.add(egui::Shape::convex_polygon(half, lit, egui::Stroke::NONE));
        painter.circle_stroke(center, radius, egui::Stroke::new(2.0, ring));
    }
    response.on_hover_text(label)
}
