//! Win32 extended-style toggles and work-area queries

use std::ffi::c_void;
use std::mem;

use tracing::{debug, warn};
use windows::Win32::Foundation::{GetLastError, POINT, SetLastError, HWND, WIN32_ERROR};
use windows::Win32::Graphics::Gdi::{
    GetMonitorInfoW, MonitorFromPoint, MONITORINFO, MONITOR_DEFAULTTOPRIMARY,
};
use windows::Win32::UI::WindowsAndMessaging::{
    GetWindowLongW, IsWindowVisible, SetWindowLongW, ShowWindow, GWL_EXSTYLE, SW_HIDE,
    SW_SHOW, SW_SHOWNA, WS_EX_LAYERED, WS_EX_TOOLWINDOW, WS_EX_TRANSPARENT,
};

use super::{with_style_bits, NativeHandle, StyleError, WindowStyle};
use crate::types::Rect;

/// Writes extended style bits through `GWL_EXSTYLE`
#[derive(Debug, Default)]
pub struct Win32WindowStyle;

impl WindowStyle for Win32WindowStyle {
    fn set_click_through(&self, handle: NativeHandle, enabled: bool) -> Result<(), StyleError> {
        let hwnd = hwnd(handle)?;
        update_ex_style(hwnd, WS_EX_LAYERED.0 | WS_EX_TRANSPARENT.0, enabled)?;
        Ok(())
    }

    fn set_tool_window(&self, handle: NativeHandle, enabled: bool) -> Result<(), StyleError> {
        let hwnd = hwnd(handle)?;

        // The taskbar only notices the change when the window is shown again
        let visible = unsafe { IsWindowVisible(hwnd).as_bool() };
        if visible {
            unsafe {
                let _ = ShowWindow(hwnd, SW_HIDE);
            }
        }
        let result = update_ex_style(hwnd, WS_EX_TOOLWINDOW.0, enabled);
        if visible {
            unsafe {
                let _ = ShowWindow(hwnd, SW_SHOWNA);
            }
        }
        result.map(|_| ())
    }
}

fn hwnd(handle: NativeHandle) -> Result<HWND, StyleError> {
    if handle.0 == 0 {
        return Err(StyleError::InvalidHandle);
    }
    Ok(HWND(handle.0 as *mut c_void))
}

/// Set or clear `bits`, returning the resulting style
fn update_ex_style(hwnd: HWND, bits: u32, enabled: bool) -> Result<u32, StyleError> {
    // Both calls return 0 on failure, which is also a legal style value;
    // the thread's last-error code tells the two apart.
    unsafe {
        SetLastError(WIN32_ERROR(0));
        let style = GetWindowLongW(hwnd, GWL_EXSTYLE) as u32;
        let err = GetLastError();
        if err.0 != 0 {
            warn!(hwnd = ?hwnd.0, code = err.0, "GetWindowLongW failed");
            return Err(StyleError::Os(err.0));
        }

        let updated = with_style_bits(style, bits, enabled);
        if updated == style {
            debug!(hwnd = ?hwnd.0, style, bits, enabled, "Extended style already up to date");
            return Ok(style);
        }

        SetLastError(WIN32_ERROR(0));
        let previous = SetWindowLongW(hwnd, GWL_EXSTYLE, updated as i32);
        let err = GetLastError();
        if previous == 0 && err.0 != 0 {
            warn!(hwnd = ?hwnd.0, code = err.0, "SetWindowLongW failed");
            return Err(StyleError::Os(err.0));
        }

        debug!(hwnd = ?hwnd.0, from = style, to = updated, "Updated extended window style");
        Ok(updated)
    }
}

pub fn reveal(handle: NativeHandle) {
    let Ok(hwnd) = hwnd(handle) else {
        return;
    };
    unsafe {
        if !IsWindowVisible(hwnd).as_bool() {
            debug!(hwnd = handle.0, "Showing hidden window from tray callback");
            let _ = ShowWindow(hwnd, SW_SHOW);
        }
    }
}

pub fn primary_work_area() -> Option<Rect> {
    unsafe {
        let monitor = MonitorFromPoint(POINT { x: 0, y: 0 }, MONITOR_DEFAULTTOPRIMARY);
        if monitor.0.is_null() {
            return None;
        }
        let mut info = MONITORINFO {
            cbSize: mem::size_of::<MONITORINFO>() as u32,
            ..Default::default()
        };
        if !GetMonitorInfoW(monitor, &mut info).as_bool() {
            return None;
        }

        let work = info.rcWork;
        Some(Rect::new(
            work.left,
            work.top,
            (work.right - work.left).max(0) as u32,
            (work.bottom - work.top).max(0) as u32,
        ))
    }
}
