//! System tray icon with a "Show" check item and "Exit"

use std::path::Path;

use anyhow::{anyhow, Context, Result};
use tracing::{info, warn};
use tray_icon::menu::{CheckMenuItem, Menu, MenuId, MenuItem, PredefinedMenuItem};
use tray_icon::{Icon, TrayIcon, TrayIconBuilder};

use crate::constants::tray;

/// Menu item ids, needed by the event bridge to classify clicks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrayIds {
    pub show: MenuId,
    pub exit: MenuId,
}

/// Live tray. On Linux the icon and menu belong to a GTK thread, so only the ids
/// are held here and the check mark cannot be updated from the UI thread.
pub struct Tray {
    ids: TrayIds,
    #[cfg(not(target_os = "linux"))]
    show_item: CheckMenuItem,
    #[cfg(not(target_os = "linux"))]
    _icon: TrayIcon,
}

impl Tray {
    pub fn ids(&self) -> &TrayIds {
        &self.ids
    }

    /// Keep the "Show" check mark in line with the window
    pub fn set_show_checked(&self, checked: bool) {
        #[cfg(not(target_os = "linux"))]
        self.show_item.set_checked(checked);
        #[cfg(target_os = "linux")]
        tracing::debug!(checked, "Tray check mark is owned by the GTK thread");
    }
}

/// Create the tray icon. `icon_path` falls back to a drawn crosshair when unreadable.
#[cfg(not(target_os = "linux"))]
pub fn spawn_tray(icon_path: &Path) -> Result<Tray> {
    let (icon, show_item, ids) = build_tray(icon_path)?;
    Ok(Tray {
        ids,
        show_item,
        _icon: icon,
    })
}

/// Create the tray icon on a dedicated GTK thread (winit does not run a GTK loop)
#[cfg(target_os = "linux")]
pub fn spawn_tray(icon_path: &Path) -> Result<Tray> {
    use std::sync::mpsc;
    use std::time::Duration;
    use tracing::error;

    let (tx, rx) = mpsc::channel();
    let icon_path = icon_path.to_path_buf();
    std::thread::spawn(move || {
        if let Err(err) = gtk::init() {
            error!(error = ?err, "Failed to initialize GTK for tray icon");
            return;
        }

        match build_tray(&icon_path) {
            Ok((tray_icon, show_item, ids)) => {
                info!("Tray icon initialized in GTK thread");
                let _ = tx.send(ids);
                // Icon and menu must outlive this scope for the whole GTK loop
                Box::leak(Box::new((tray_icon, show_item)));
                gtk::main();
            }
            Err(err) => {
                error!(error = ?err, "Failed to create tray icon in GTK thread");
            }
        }
    });

    let ids = rx
        .recv_timeout(Duration::from_millis(500))
        .context("Tray thread did not report menu ids")?;
    Ok(Tray { ids })
}

fn build_tray(icon_path: &Path) -> Result<(TrayIcon, CheckMenuItem, TrayIds)> {
    let icon = load_tray_icon(icon_path).or_else(|err| {
        warn!(error = %err, "Using built-in tray icon");
        fallback_icon()
    })?;

    let menu = Menu::new();
    let show_item = CheckMenuItem::new(tray::SHOW_LABEL, true, true, None);
    let exit_item = MenuItem::new(tray::EXIT_LABEL, true, None);
    menu.append_items(&[&show_item, &PredefinedMenuItem::separator(), &exit_item])
        .context("Failed to build tray menu")?;

    let ids = TrayIds {
        show: show_item.id().clone(),
        exit: exit_item.id().clone(),
    };

    let tray_icon = TrayIconBuilder::new()
        .with_menu(Box::new(menu))
        .with_menu_on_left_click(false)
        .with_tooltip(tray::TOOLTIP)
        .with_icon(icon)
        .build()
        .context("Failed to build tray icon")?;

    info!("Tray icon created");
    Ok((tray_icon, show_item, ids))
}

fn load_tray_icon(path: &Path) -> Result<Icon> {
    let rgba = image::open(path)
        .with_context(|| format!("Failed to decode tray icon {}", path.display()))?
        .to_rgba8();
    let (width, height) = rgba.dimensions();
    Icon::from_rgba(rgba.into_raw(), width, height)
        .map_err(|err| anyhow!("Failed to create icon from RGBA data: {err}"))
}

fn fallback_icon() -> Result<Icon> {
    let size = tray::FALLBACK_ICON_SIZE;
    Icon::from_rgba(crosshair_pixels(size), size, size)
        .map_err(|err| anyhow!("Failed to create fallback icon: {err}"))
}

/// RGBA pixels of a simple red crosshair on a transparent square
pub fn crosshair_pixels(size: u32) -> Vec<u8> {
    let mid = size / 2;
    let gap = size / 8;
    let mut pixels = vec![0u8; (size * size * 4) as usize];

    for y in 0..size {
        for x in 0..size {
            let on_vertical = x.abs_diff(mid) <= 1 && y.abs_diff(mid) > gap;
            let on_horizontal = y.abs_diff(mid) <= 1 && x.abs_diff(mid) > gap;
            if on_vertical || on_horizontal {
                let i = ((y * size + x) * 4) as usize;
                pixels[i..i + 4].copy_from_slice(&[0xFF, 0x30, 0x30, 0xFF]);
            }
        }
    }
    pixels
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alpha_at(pixels: &[u8], size: u32, x: u32, y: u32) -> u8 {
        pixels[((y * size + x) * 4 + 3) as usize]
    }

    #[test]
    fn test_crosshair_pixels_buffer_size() {
        assert_eq!(crosshair_pixels(32).len(), 32 * 32 * 4);
    }

    #[test]
    fn test_crosshair_pixels_leaves_center_gap() {
        let pixels = crosshair_pixels(32);
        assert_eq!(alpha_at(&pixels, 32, 16, 16), 0);
        assert_eq!(alpha_at(&pixels, 32, 16, 2), 0xFF);
        assert_eq!(alpha_at(&pixels, 32, 2, 16), 0xFF);
    }

    #[test]
    fn test_crosshair_pixels_corners_transparent() {
        let pixels = crosshair_pixels(32);
        assert_eq!(alpha_at(&pixels, 32, 0, 0), 0);
        assert_eq!(alpha_at(&pixels, 32, 31, 31), 0);
    }

    #[test]
    fn test_load_tray_icon_missing_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_tray_icon(&dir.path().join("tray-icon.png")).is_err());
    }
}
