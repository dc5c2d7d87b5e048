//! Overlay state model
//!
//! `OverlayState` is the single piece of mutable application state. It is owned by
//! the controller and only ever touched from the UI thread.

use std::path::PathBuf;

use crate::constants::{preview, window};
use crate::types::Size;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Control window with buttons, optional always-on-top
    Edit,
    /// Frameless, translucent, click-through crosshair
    Overlay,
}

/// Window attributes the controller currently requests
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowChrome {
    pub title: &'static str,
    pub decorated: bool,
    pub always_on_top: bool,
    pub translucent: bool,
    pub size: Size,
    pub click_through: bool,
    /// No taskbar entry
    pub tool_window: bool,
}

impl WindowChrome {
    /// Edit chrome built from scratch; `pinned` decides always-on-top
    pub fn edit(pinned: bool) -> Self {
        Self {
            title: window::TITLE,
            decorated: true,
            always_on_top: pinned,
            translucent: false,
            size: Size::new(window::EDIT_WIDTH, window::EDIT_HEIGHT),
            click_through: false,
            tool_window: false,
        }
    }

    /// Overlay chrome sized to the crosshair (or the full preview square without one)
    pub fn overlay(crosshair: Option<Size>) -> Self {
        Self {
            title: window::TITLE,
            decorated: false,
            always_on_top: true,
            translucent: true,
            size: crosshair.unwrap_or(Size::square(preview::SIZE)),
            click_through: true,
            tool_window: true,
        }
    }
}

/// Outcome of the last platform click-through request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickThroughStatus {
    Inactive,
    Active,
    Unsupported,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayState {
    pub mode: Mode,
    pub image_path: PathBuf,
    pub pinned: bool,
    pub visible: bool,
    pub chrome: WindowChrome,
    pub click_through_status: ClickThroughStatus,
}

impl OverlayState {
    pub fn new(default_image: PathBuf) -> Self {
        Self {
            mode: Mode::Edit,
            image_path: default_image,
            pinned: true,
            visible: true,
            chrome: WindowChrome::edit(true),
            click_through_status: ClickThroughStatus::Inactive,
        }
    }

    /// Controls are shown exactly when editing
    pub fn controls_visible(&self) -> bool {
        self.mode == Mode::Edit
    }

    pub fn is_overlay(&self) -> bool {
        self.mode == Mode::Overlay
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let state = OverlayState::new(PathBuf::from("assets/crosshair.png"));
        assert_eq!(state.mode, Mode::Edit);
        assert!(state.pinned);
        assert!(state.visible);
        assert!(state.controls_visible());
        assert!(state.chrome.always_on_top);
        assert!(!state.chrome.click_through);
        assert!(!state.chrome.tool_window);
        assert_eq!(state.click_through_status, ClickThroughStatus::Inactive);
    }

    #[test]
    fn test_edit_chrome_follows_pin() {
        assert!(!WindowChrome::edit(false).always_on_top);
        assert!(WindowChrome::edit(true).always_on_top);
        assert_eq!(WindowChrome::edit(false).size, Size::new(400, 250));
    }

    #[test]
    fn test_overlay_chrome_without_image_uses_preview_square() {
        let chrome = WindowChrome::overlay(None);
        assert_eq!(chrome.size, Size::square(100));
        assert!(chrome.click_through);
        assert!(chrome.tool_window);
        assert!(chrome.translucent);
        assert!(!chrome.decorated);
    }
}
