//! eframe application: wires the overlay controller, tray, quit hotkey and
//! platform click-through into one viewport

use eframe::{egui, CreationContext};
use tracing::{debug, error, info, warn};

use crate::constants::{dialogs, hotkey, preview, resources};
use crate::controller::{OverlayController, WindowCommand};
use crate::dialogs::{Dialogs, NativeDialogs};
use crate::events::EventBridge;
use crate::hotkeys::QuitHotkey;
use crate::platform::{self, StyleError, WindowStyle};
use crate::resources::resource_path;
use crate::tray::{spawn_tray, Tray};
use crate::types::Rect;

use super::components::controls::{self, ControlAction};
use super::components::hotkey_editor::{self, HotkeyEditorState};
use super::constants::*;

pub struct CrosshairApp {
    controller: OverlayController<NativeDialogs>,
    window_style: Box<dyn WindowStyle>,
    /// Style requests waiting for the window flags of the previous frame to land
    pending_click_through: Option<bool>,
    pending_tool_window: Option<bool>,
    texture: Option<(u64, egui::TextureHandle)>,
    pinned_checkbox: bool,
    hotkey: Option<QuitHotkey>,
    hotkey_editor: HotkeyEditorState,
    tray: Option<Tray>,
    events: EventBridge,
}

impl CrosshairApp {
    pub fn new(cc: &CreationContext<'_>) -> Self {
        info!("Initializing crosshair overlay");

        let default_image = resource_path(resources::DEFAULT_IMAGE);
        let mut controller = OverlayController::new(default_image.clone(), NativeDialogs);
        controller.load_image(&default_image);

        let quit_hotkey = match QuitHotkey::register(hotkey::DEFAULT_QUIT) {
            Ok(registered) => Some(registered),
            Err(err) => {
                error!(error = %err, "Quit hotkey unavailable, use the tray menu to exit");
                None
            }
        };
        let mut hotkey_editor = HotkeyEditorState::new(hotkey::DEFAULT_QUIT);
        hotkey_editor.show_binding(quit_hotkey.as_ref().map(QuitHotkey::combo));

        let tray = match spawn_tray(&resource_path(resources::TRAY_ICON)) {
            Ok(tray) => Some(tray),
            Err(err) => {
                error!(error = ?err, "Failed to create tray icon, continuing without it");
                None
            }
        };
        let events = match &tray {
            Some(tray) => EventBridge::install(
                &cc.egui_ctx,
                tray.ids().clone(),
                platform::native_handle(cc),
            ),
            None => EventBridge::disconnected(),
        };

        let pinned_checkbox = controller.state().pinned;
        Self {
            controller,
            window_style: platform::window_style(),
            pending_click_through: None,
            pending_tool_window: None,
            texture: None,
            pinned_checkbox,
            hotkey: quit_hotkey,
            hotkey_editor,
            tray,
            events,
        }
    }

    fn process_events(&mut self) {
        for event in self.events.pending() {
            debug!(?event, "Handling tray event");
            let visible = self.controller.toggle_visibility();
            if let Some(tray) = &self.tray {
                tray.set_show_checked(visible);
            }
        }
    }

    fn apply_click_through(&mut self, frame: &eframe::Frame, enabled: bool) {
        let result = match platform::native_handle(frame) {
            Some(handle) => self.window_style.set_click_through(handle, enabled),
            None if cfg!(target_os = "windows") => Err(StyleError::InvalidHandle),
            None => Err(StyleError::Unsupported),
        };
        debug!(
            enabled,
            overlay_wants = self.controller.state().chrome.click_through,
            ?result,
            "Click-through applied"
        );
        self.controller.record_click_through(enabled, result);
    }

    fn apply_tool_window(&mut self, frame: &eframe::Frame, enabled: bool) {
        let result = match platform::native_handle(frame) {
            Some(handle) => self.window_style.set_tool_window(handle, enabled),
            None if cfg!(target_os = "windows") => Err(StyleError::InvalidHandle),
            None => Err(StyleError::Unsupported),
        };
        match result {
            Ok(()) => debug!(enabled, "Tool window style applied"),
            Err(StyleError::Unsupported) => debug!(enabled, "Tool window style unsupported here"),
            Err(err) => warn!(error = %err, enabled, "Failed to update taskbar presence"),
        }
    }

    fn sync_texture(&mut self, ctx: &egui::Context) {
        let generation = self.controller.crosshair_generation();
        if self.texture.as_ref().is_some_and(|(current, _)| *current == generation) {
            return;
        }
        let Some(crosshair) = self.controller.crosshair() else {
            return;
        };

        let size = crosshair.size();
        let image = egui::ColorImage::from_rgba_unmultiplied(
            [size.width as usize, size.height as usize],
            crosshair.pixels.as_raw(),
        );
        debug!(path = %crosshair.path.display(), generation, "Uploading crosshair texture");
        let handle = ctx.load_texture(preview::TEXTURE_NAME, image, egui::TextureOptions::LINEAR);
        self.texture = Some((generation, handle));
    }

    fn perform(&mut self, ctx: &egui::Context, action: ControlAction) {
        match action {
            ControlAction::Reset => self.controller.reset(),
            ControlAction::Select => self.controller.select_image(),
            ControlAction::Center => self.controller.request_center(work_area(ctx)),
            ControlAction::Pin(enabled) => self.controller.toggle_pin(enabled),
        }
        self.pinned_checkbox = self.controller.state().pinned;
    }

    /// Rebind the quit hotkey from the editor field
    fn apply_hotkey(&mut self) {
        let combo = self.hotkey_editor.text().trim().to_string();
        let result = if let Some(current) = self.hotkey.as_mut() {
            current.rebind(&combo)
        } else {
            QuitHotkey::register(&combo).map(|registered| self.hotkey = Some(registered))
        };

        match result {
            Ok(()) => {
                self.hotkey_editor.reset_to(&combo);
                self.controller
                    .dialogs_mut()
                    .inform(dialogs::HOTKEY_TITLE, &format!("New hotkey set to: {combo}"));
            }
            Err(err) => {
                warn!(error = %err, "Hotkey change rejected");
                let previous = self
                    .hotkey
                    .as_ref()
                    .map(|active| active.combo().to_string());
                self.hotkey_editor.show_binding(previous.as_deref());
                self.controller
                    .dialogs_mut()
                    .warn(dialogs::ERROR_TITLE, &err.to_string());
            }
        }
    }

    fn edit_ui(&mut self, ctx: &egui::Context) -> (Option<ControlAction>, bool) {
        let texture = self.texture.as_ref().map(|(_, handle)| handle.clone());
        let padding = self
            .controller
            .crosshair()
            .map_or((0, 0), |crosshair| crosshair.padding_in(preview::SIZE));
        let mut action = None;
        let mut apply_hotkey = false;

        let panel_frame = egui::Frame::new()
            .fill(EDIT_BACKGROUND)
            .inner_margin(PADDING);
        egui::CentralPanel::default()
            .frame(panel_frame)
            .show(ctx, |ui| {
                action = controls::ui(ui, texture.as_ref(), padding, &mut self.pinned_checkbox);
                ui.add_space(ITEM_SPACING);
                apply_hotkey = hotkey_editor::ui(ui, &mut self.hotkey_editor);
                controls::status_line(ui, &self.controller.state().click_through_status);
            });

        (action, apply_hotkey)
    }

    fn overlay_ui(&self, ctx: &egui::Context) {
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                if let Some((_, texture)) = &self.texture {
                    let rect = egui::Rect::from_center_size(
                        ui.max_rect().center(),
                        texture.size_vec2(),
                    );
                    ui.painter().image(
                        texture.id(),
                        rect,
                        egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                        egui::Color32::WHITE,
                    );
                }
            });
    }

    fn flush_commands(&mut self, ctx: &egui::Context) {
        for command in self.controller.drain_commands() {
            match command {
                WindowCommand::ClickThrough(enabled) => self.pending_click_through = Some(enabled),
                WindowCommand::ToolWindow(enabled) => self.pending_tool_window = Some(enabled),
                _ => {}
            }
            for viewport_command in viewport_commands(command) {
                ctx.send_viewport_cmd(viewport_command);
            }
        }

        if self.pending_click_through.is_some() || self.pending_tool_window.is_some() {
            ctx.request_repaint();
        }
    }
}

impl eframe::App for CrosshairApp {
    fn update(&mut self, ctx: &egui::Context, frame: &mut eframe::Frame) {
        self.process_events();

        // Tool window goes first: changing it hides and re-shows the window
        if let Some(enabled) = self.pending_tool_window.take() {
            self.apply_tool_window(frame, enabled);
        }
        if let Some(enabled) = self.pending_click_through.take() {
            self.apply_click_through(frame, enabled);
        }

        self.sync_texture(ctx);

        if self.controller.state().controls_visible() {
            let (action, apply_hotkey) = self.edit_ui(ctx);
            if let Some(action) = action {
                self.perform(ctx, action);
            }
            if apply_hotkey {
                self.apply_hotkey();
            }
        } else {
            self.overlay_ui(ctx);
        }

        self.flush_commands(ctx);
    }

    fn clear_color(&self, _visuals: &egui::Visuals) -> [f32; 4] {
        if self.controller.state().chrome.translucent {
            [0.0; 4]
        } else {
            EDIT_BACKGROUND.to_normalized_gamma_f32()
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        let state = self.controller.state();
        info!(
            overlay = state.is_overlay(),
            image = %state.image_path.display(),
            "Crosshair overlay exiting"
        );
    }
}

/// Translate a controller command into egui viewport commands
pub fn viewport_commands(command: WindowCommand) -> Vec<egui::ViewportCommand> {
    use egui::ViewportCommand as Cmd;

    match command {
        WindowCommand::Title(title) => vec![Cmd::Title(title.to_string())],
        WindowCommand::Decorations(decorated) => vec![Cmd::Decorations(decorated)],
        WindowCommand::AlwaysOnTop(on_top) => vec![Cmd::WindowLevel(if on_top {
            egui::WindowLevel::AlwaysOnTop
        } else {
            egui::WindowLevel::Normal
        })],
        WindowCommand::FixedSize(size) => {
            let size = egui::vec2(size.width as f32, size.height as f32);
            vec![
                Cmd::MinInnerSize(size),
                Cmd::MaxInnerSize(size),
                Cmd::InnerSize(size),
            ]
        }
        WindowCommand::MoveTo(point) => {
            vec![Cmd::OuterPosition(egui::pos2(point.x as f32, point.y as f32))]
        }
        WindowCommand::Visible(visible) => vec![Cmd::Visible(visible)],
        WindowCommand::Focus => vec![Cmd::Focus],
        // winit keeps this flag across style rewrites; the platform layer
        // writes the Win32 bits as well and reports the outcome
        WindowCommand::ClickThrough(enabled) => vec![Cmd::MousePassthrough(enabled)],
        // Platform layer only
        WindowCommand::ToolWindow(_) => Vec::new(),
    }
}

/// Primary work area in egui points
fn work_area(ctx: &egui::Context) -> Rect {
    let pixels_per_point = ctx.native_pixels_per_point().unwrap_or(1.0);
    if let Some(physical) = platform::primary_work_area() {
        return to_points(physical, pixels_per_point);
    }

    match ctx.input(|i| i.viewport().monitor_size) {
        Some(size) => Rect::new(0, 0, size.x.round() as u32, size.y.round() as u32),
        None => {
            warn!("Monitor size unknown, assuming {FALLBACK_SCREEN_WIDTH}x{FALLBACK_SCREEN_HEIGHT}");
            Rect::new(0, 0, FALLBACK_SCREEN_WIDTH, FALLBACK_SCREEN_HEIGHT)
        }
    }
}

/// Convert a physical-pixel rectangle to points
pub fn to_points(rect: Rect, pixels_per_point: f32) -> Rect {
    if pixels_per_point <= 0.0 {
        return rect;
    }
    let scale = |value: f32| (value / pixels_per_point).round();
    Rect::new(
        scale(rect.x as f32) as i32,
        scale(rect.y as f32) as i32,
        scale(rect.width as f32) as u32,
        scale(rect.height as f32) as u32,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Point, Size};
    use egui::ViewportCommand as Cmd;

    #[test]
    fn test_click_through_sets_mouse_passthrough() {
        let commands = viewport_commands(WindowCommand::ClickThrough(true));
        assert_eq!(commands.len(), 1);
        assert!(matches!(commands[0], Cmd::MousePassthrough(true)));
        assert!(matches!(
            viewport_commands(WindowCommand::ClickThrough(false))[0],
            Cmd::MousePassthrough(false)
        ));
    }

    #[test]
    fn test_tool_window_is_platform_only() {
        assert!(viewport_commands(WindowCommand::ToolWindow(true)).is_empty());
    }

    #[test]
    fn test_fixed_size_locks_min_and_max() {
        let commands = viewport_commands(WindowCommand::FixedSize(Size::new(64, 32)));
        assert_eq!(commands.len(), 3);
        let expected = egui::vec2(64.0, 32.0);
        assert!(matches!(commands[0], Cmd::MinInnerSize(v) if v == expected));
        assert!(matches!(commands[1], Cmd::MaxInnerSize(v) if v == expected));
        assert!(matches!(commands[2], Cmd::InnerSize(v) if v == expected));
    }

    #[test]
    fn test_always_on_top_maps_to_window_level() {
        assert!(matches!(
            viewport_commands(WindowCommand::AlwaysOnTop(true))[0],
            Cmd::WindowLevel(egui::WindowLevel::AlwaysOnTop)
        ));
        assert!(matches!(
            viewport_commands(WindowCommand::AlwaysOnTop(false))[0],
            Cmd::WindowLevel(egui::WindowLevel::Normal)
        ));
    }

    #[test]
    fn test_move_to_sets_outer_position() {
        let commands = viewport_commands(WindowCommand::MoveTo(Point::new(910, 470)));
        assert!(matches!(commands[0], Cmd::OuterPosition(p) if p == egui::pos2(910.0, 470.0)));
    }

    #[test]
    fn test_to_points_scales_by_pixels_per_point() {
        let physical = Rect::new(0, 0, 2880, 1560);
        assert_eq!(to_points(physical, 1.5), Rect::new(0, 0, 1920, 1040));
    }

    #[test]
    fn test_to_points_keeps_origin_offset() {
        let physical = Rect::new(200, 100, 1000, 800);
        assert_eq!(to_points(physical, 2.0), Rect::new(100, 50, 500, 400));
    }

    #[test]
    fn test_to_points_ignores_invalid_scale() {
        let physical = Rect::new(0, 0, 1920, 1080);
        assert_eq!(to_points(physical, 0.0), physical);
    }
}
