//! Overlay controller
//!
//! Owns the `OverlayState`, the fitted crosshair and a queue of window commands.
//! The controller never calls into the GUI toolkit: each side effect is queued as a
//! `WindowCommand` and the GUI drains the queue once per frame. That keeps every
//! transition testable without a window.

use std::mem;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::constants::{dialogs, preview};
use crate::crosshair::CrosshairImage;
use crate::dialogs::{Confirmation, Dialogs, FileChoice};
use crate::platform::StyleError;
use crate::state::{ClickThroughStatus, Mode, OverlayState, WindowChrome};
use crate::types::{Point, Rect, Size};

/// Toolkit-neutral window side effect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowCommand {
    Title(&'static str),
    Decorations(bool),
    AlwaysOnTop(bool),
    FixedSize(Size),
    MoveTo(Point),
    Visible(bool),
    Focus,
    /// Applied through the platform `WindowStyle` capability once the
    /// preceding flag changes have reached the native window
    ClickThrough(bool),
    /// Hide from (or return to) the taskbar; applied like `ClickThrough`
    ToolWindow(bool),
}

pub struct OverlayController<D: Dialogs> {
    state: OverlayState,
    default_image: PathBuf,
    crosshair: Option<CrosshairImage>,
    /// Bumped on every successful load so the GUI knows to re-upload the texture
    crosshair_generation: u64,
    commands: Vec<WindowCommand>,
    dialogs: D,
}

impl<D: Dialogs> OverlayController<D> {
    pub fn new(default_image: PathBuf, dialogs: D) -> Self {
        Self {
            state: OverlayState::new(default_image.clone()),
            default_image,
            crosshair: None,
            crosshair_generation: 0,
            commands: Vec::new(),
            dialogs,
        }
    }

    pub fn state(&self) -> &OverlayState {
        &self.state
    }

    pub fn crosshair(&self) -> Option<&CrosshairImage> {
        self.crosshair.as_ref()
    }

    pub fn crosshair_generation(&self) -> u64 {
        self.crosshair_generation
    }

    pub fn dialogs_mut(&mut self) -> &mut D {
        &mut self.dialogs
    }

    /// Take every command queued since the last drain, in order
    pub fn drain_commands(&mut self) -> Vec<WindowCommand> {
        mem::take(&mut self.commands)
    }

    /// Load `path` as the displayed crosshair.
    ///
    /// Missing files are replaced by the default resource. A decode failure shows a
    /// warning and keeps both the previous crosshair and `image_path`.
    pub fn load_image(&mut self, path: &Path) -> bool {
        let path = if path.exists() {
            path.to_path_buf()
        } else {
            warn!(requested = %path.display(), default = %self.default_image.display(), "Image not found, using default");
            self.default_image.clone()
        };

        match CrosshairImage::load(&path, preview::SIZE) {
            Ok(crosshair) => {
                info!(path = %path.display(), size = ?crosshair.size(), "Crosshair loaded");
                self.state.image_path = path;
                self.crosshair = Some(crosshair);
                self.crosshair_generation += 1;
                true
            }
            Err(err) => {
                warn!(error = %err, "Failed to load crosshair");
                self.dialogs.warn(
                    dialogs::ERROR_TITLE,
                    &format!("Cannot load: {}", path.display()),
                );
                false
            }
        }
    }

    /// Ask for a PNG and load it; cancelling changes nothing
    pub fn select_image(&mut self) {
        match self.dialogs.pick_png() {
            FileChoice::Selected(path) => {
                self.load_image(&path);
            }
            FileChoice::Cancelled => debug!("Image selection cancelled"),
        }
    }

    pub fn toggle_pin(&mut self, enabled: bool) {
        self.state.pinned = enabled;
        if self.state.mode != Mode::Edit {
            debug!(enabled, "Pin recorded, overlay stays on top");
            return;
        }

        self.state.chrome.always_on_top = enabled;
        self.state.visible = true;
        self.commands.push(WindowCommand::AlwaysOnTop(enabled));
        self.commands.push(WindowCommand::Visible(true));
        info!(enabled, "Pin on top toggled");
    }

    /// Move the window to the middle of `work_area` at its current fixed size
    pub fn center(&mut self, work_area: Rect) {
        let position = work_area.center_of(self.state.chrome.size);
        debug!(?position, ?work_area, size = ?self.state.chrome.size, "Centering window");
        self.commands.push(WindowCommand::MoveTo(position));
    }

    /// "Center" button: center, then confirm. Yes enters the overlay, No resets.
    pub fn request_center(&mut self, work_area: Rect) {
        if self.state.mode == Mode::Overlay {
            debug!("Center requested while already in overlay mode");
            return;
        }

        self.center(work_area);
        match self
            .dialogs
            .confirm(dialogs::CONFIRM_TITLE, dialogs::CONFIRM_CENTER)
        {
            Confirmation::Confirmed => self.enter_overlay(work_area),
            Confirmation::Cancelled => {
                info!("Centering declined, resetting");
                self.reset();
            }
        }
    }

    pub fn enter_overlay(&mut self, work_area: Rect) {
        let chrome = WindowChrome::overlay(self.crosshair.as_ref().map(CrosshairImage::size));
        self.state.mode = Mode::Overlay;
        self.state.visible = true;

        self.commands.extend([
            WindowCommand::Decorations(chrome.decorated),
            WindowCommand::AlwaysOnTop(chrome.always_on_top),
            WindowCommand::FixedSize(chrome.size),
        ]);
        self.state.chrome = chrome;

        self.center(work_area);
        self.commands.push(WindowCommand::Visible(true));
        self.push_overlay_styles();

        info!(size = ?self.state.chrome.size, "Entered overlay mode");
    }

    /// Rebuild Edit chrome from scratch and show the controls again
    pub fn exit_overlay(&mut self) {
        let chrome = WindowChrome::edit(self.state.pinned);
        let was_overlay = self.state.mode == Mode::Overlay;
        self.state.mode = Mode::Edit;
        self.state.visible = true;

        if was_overlay {
            self.commands.push(WindowCommand::ClickThrough(false));
            self.commands.push(WindowCommand::ToolWindow(false));
            if self.state.click_through_status == ClickThroughStatus::Active {
                self.state.click_through_status = ClickThroughStatus::Inactive;
            }
        }
        self.commands.extend([
            WindowCommand::Title(chrome.title),
            WindowCommand::Decorations(chrome.decorated),
            WindowCommand::AlwaysOnTop(chrome.always_on_top),
            WindowCommand::FixedSize(chrome.size),
            WindowCommand::Visible(true),
            WindowCommand::Focus,
        ]);
        self.state.chrome = chrome;

        if was_overlay {
            info!("Left overlay mode");
        }
    }

    /// "Reset" button: default crosshair, back to Edit mode
    pub fn reset(&mut self) {
        let default_image = self.default_image.clone();
        self.load_image(&default_image);
        self.exit_overlay();
    }

    pub fn set_visible(&mut self, visible: bool) {
        if self.state.visible == visible {
            return;
        }
        self.state.visible = visible;
        self.commands.push(WindowCommand::Visible(visible));
        if visible && self.state.mode == Mode::Overlay {
            self.push_overlay_styles();
        } else if visible {
            self.commands.push(WindowCommand::Focus);
        }
        info!(visible, "Window visibility changed");
    }

    /// Showing the window or changing its flags rewrites the extended style,
    /// so the overlay's own bits are queued after them every time
    fn push_overlay_styles(&mut self) {
        self.commands.push(WindowCommand::ToolWindow(self.state.chrome.tool_window));
        self.commands.push(WindowCommand::ClickThrough(self.state.chrome.click_through));
    }

    /// Flip visibility, returning the new value
    pub fn toggle_visibility(&mut self) -> bool {
        let visible = !self.state.visible;
        self.set_visible(visible);
        visible
    }

    /// Record what the platform said about the last click-through request
    pub fn record_click_through(&mut self, enabled: bool, result: Result<(), StyleError>) {
        self.state.click_through_status = match result {
            Ok(()) if enabled => ClickThroughStatus::Active,
            Ok(()) => ClickThroughStatus::Inactive,
            Err(StyleError::Unsupported) => {
                warn!("Click-through unsupported here, overlay will capture mouse input");
                ClickThroughStatus::Unsupported
            }
            Err(err) => {
                warn!(error = %err, enabled, "Click-through request failed");
                ClickThroughStatus::Failed(err.to_string())
            }
        };
    }
}
