//! Control window and overlay implemented with egui/eframe

mod app;
mod components;
mod constants;

use anyhow::{anyhow, Result};
use eframe::{egui, NativeOptions};

use crate::constants::window;
use crate::state::WindowChrome;

use app::CrosshairApp;

pub fn run() -> Result<()> {
    let chrome = WindowChrome::edit(true);
    let size = [chrome.size.width as f32, chrome.size.height as f32];

    let options = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(chrome.title)
            .with_app_id(window::APP_ID)
            .with_inner_size(size)
            .with_min_inner_size(size)
            .with_max_inner_size(size)
            .with_resizable(false)
            .with_decorations(chrome.decorated)
            .with_always_on_top()
            // Overlay mode clears to transparent, which needs an alpha-capable surface
            .with_transparent(true),
        ..Default::default()
    };

    eframe::run_native(
        window::APP_ID,
        options,
        Box::new(|cc| Ok(Box::new(CrosshairApp::new(cc)))),
    )
    .map_err(|err| anyhow!("Failed to launch crosshair window: {err}"))
}
