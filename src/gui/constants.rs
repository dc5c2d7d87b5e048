//! GUI-specific constants for layout, colors and fallbacks

use eframe::egui;

/// Layout spacing
pub const PADDING: f32 = 10.0;
pub const ITEM_SPACING: f32 = 8.0;
pub const BUTTON_WIDTH: f32 = 160.0;
pub const HOTKEY_FIELD_WIDTH: f32 = 100.0;

/// Edit mode colors
pub const EDIT_BACKGROUND: egui::Color32 = egui::Color32::from_rgb(0x12, 0x12, 0x12);
pub const BUTTON_FILL: egui::Color32 = egui::Color32::from_rgb(0x2c, 0x2c, 0x2c);
pub const TEXT_COLOR: egui::Color32 = egui::Color32::WHITE;
pub const STATUS_WARNING: egui::Color32 = egui::Color32::from_rgb(200, 200, 0);

/// Work area assumed when neither the platform nor winit reports a monitor
pub const FALLBACK_SCREEN_WIDTH: u32 = 1920;
pub const FALLBACK_SCREEN_HEIGHT: u32 = 1080;
