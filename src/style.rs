//! Светлая тема и отступы для egui.

use eframe::{egui, epaint};

pub const RUNNING_COLOR: epaint::Color32 = epaint::Color32::from_rgb(46, 160, 67);
pub const STOPPED_COLOR: epaint::Color32 = epaint::Color32::from_rgb(207, 34, 46);
pub const PENDING_COLOR: epaint::Color32 = epaint::Color32::from_rgb(191, 135, 0);
pub const IDLE_COLOR: epaint::Color32 = epaint::Color32::from_rgb(110, 112, 124);

/// Применить тему один раз при создании окна
pub fn apply_style(ctx: &egui::Context) {
    let mut visuals = egui::Visuals::light();
    visuals.panel_fill = epaint::Color32::from_rgb(248, 248, 250);
    visuals.widgets.active.bg_fill = epaint::Color32::from_rgb(0, 122, 255);
    visuals.widgets.active.fg_stroke = epaint::Stroke::new(1.0, epaint::Color32::WHITE);
    ctx.set_visuals(visuals);

    let mut style = (*ctx.style()).clone();
    style.spacing.item_spacing = egui::vec2(8.0, 6.0);
    style.spacing.button_padding = egui::vec2(12.0, 6.0);
    ctx.set_style(style);
}
