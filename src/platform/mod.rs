//! Platform-specific window plumbing.
//!
//! Only Windows exposes extended style bits for click-through and taskbar presence.
//! Every other platform gets `Unsupported`, which reports the capability as missing
//! instead of failing the overlay transition.
//!
//! winit recomputes the extended style from its own flags whenever one of them
//! changes, so these bits must be written again after every such change.

#[cfg(target_os = "windows")]
mod windows;

use raw_window_handle::{HasWindowHandle, RawWindowHandle};
use thiserror::Error;
use tracing::debug;

use crate::types::Rect;

/// Native window handle value (an `HWND` on Windows)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NativeHandle(pub isize);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StyleError {
    #[error("not supported on this platform")]
    Unsupported,

    #[error("no usable native window handle")]
    InvalidHandle,

    #[error("updating the extended window style failed (os error {0})")]
    Os(u32),
}

pub trait WindowStyle {
    /// Let mouse input pass through the window
    fn set_click_through(&self, handle: NativeHandle, enabled: bool) -> Result<(), StyleError>;

    /// Tool windows get no taskbar entry
    fn set_tool_window(&self, handle: NativeHandle, enabled: bool) -> Result<(), StyleError>;
}

/// Fallback for platforms without an extended style API
#[derive(Debug, Default)]
#[cfg_attr(target_os = "windows", allow(dead_code))]
pub struct Unsupported;

impl WindowStyle for Unsupported {
    fn set_click_through(&self, _handle: NativeHandle, _enabled: bool) -> Result<(), StyleError> {
        Err(StyleError::Unsupported)
    }

    fn set_tool_window(&self, _handle: NativeHandle, _enabled: bool) -> Result<(), StyleError> {
        Err(StyleError::Unsupported)
    }
}

/// Window style implementation for the platform we were built for
pub fn window_style() -> Box<dyn WindowStyle> {
    #[cfg(target_os = "windows")]
    {
        Box::new(windows::Win32WindowStyle)
    }
    #[cfg(not(target_os = "windows"))]
    {
        Box::new(Unsupported)
    }
}

/// Extract the native handle of an eframe/winit window
pub fn native_handle(window: &impl HasWindowHandle) -> Option<NativeHandle> {
    let handle = window.window_handle().ok()?;
    match handle.as_raw() {
        RawWindowHandle::Win32(win32) => Some(NativeHandle(win32.hwnd.get())),
        other => {
            debug!(handle = ?other, "Window handle has no click-through support");
            None
        }
    }
}

/// Show a hidden window straight away, without waiting for the next frame.
///
/// Hidden windows get no paint messages on Windows, so a repaint request alone
/// would never reach `update`. Elsewhere this is a no-op.
pub fn reveal(handle: NativeHandle) {
    #[cfg(target_os = "windows")]
    windows::reveal(handle);
    #[cfg(not(target_os = "windows"))]
    debug!(?handle, "Reveal left to the event loop");
}

/// Primary screen's work area in physical pixels, when the platform can tell us
pub fn primary_work_area() -> Option<Rect> {
    #[cfg(target_os = "windows")]
    {
        windows::primary_work_area()
    }
    #[cfg(not(target_os = "windows"))]
    {
        None
    }
}

/// Set or clear click-through `bits` in an extended style value
pub fn with_style_bits(style: u32, bits: u32, enabled: bool) -> u32 {
    if enabled { style | bits } else { style & !bits }
}
