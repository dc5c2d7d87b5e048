//! Tray callbacks arrive on whatever thread the tray crate uses. Visibility toggles
//! are turned into `AppEvent`s, queued, and the UI is woken to handle them in
//! `update`. "Exit" terminates the process from the callback, like the quit hotkey,
//! because a hidden window may never run another frame.

use std::sync::mpsc::{self, Receiver, Sender};

use eframe::egui;
use tracing::{debug, info};
use tray_icon::menu::{MenuEvent, MenuId};
use tray_icon::{MouseButton, MouseButtonState, TrayIconEvent};

use crate::platform::{self, NativeHandle};
use crate::tray::TrayIds;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    /// "Show" menu item clicked; the menu already flipped its check mark
    ToggleFromMenu,
    /// Tray icon left-clicked
    ToggleFromIcon,
}

/// What a tray callback does with a classified click
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrayAction {
    Forward(AppEvent),
    Exit,
}

pub fn classify_menu_event(id: &MenuId, ids: &TrayIds) -> Option<TrayAction> {
    if *id == ids.show {
        Some(TrayAction::Forward(AppEvent::ToggleFromMenu))
    } else if *id == ids.exit {
        Some(TrayAction::Exit)
    } else {
        None
    }
}

pub fn classify_icon_event(event: &TrayIconEvent) -> Option<TrayAction> {
    match event {
        TrayIconEvent::Click {
            button: MouseButton::Left,
            button_state: MouseButtonState::Up,
            ..
        } => Some(TrayAction::Forward(AppEvent::ToggleFromIcon)),
        _ => None,
    }
}

pub struct EventBridge {
    rx: Receiver<AppEvent>,
}

impl EventBridge {
    /// Route tray menu and icon events to the UI thread. `window` lets a toggle
    /// show a hidden window before the UI thread gets to run.
    pub fn install(ctx: &egui::Context, ids: TrayIds, window: Option<NativeHandle>) -> Self {
        let (tx, rx) = mpsc::channel();

        let menu_tx = tx.clone();
        let menu_ctx = ctx.clone();
        MenuEvent::set_event_handler(Some(move |event: MenuEvent| {
            if let Some(action) = classify_menu_event(&event.id, &ids) {
                dispatch(action, &menu_tx, &menu_ctx, window);
            }
        }));

        let icon_ctx = ctx.clone();
        TrayIconEvent::set_event_handler(Some(move |event: TrayIconEvent| {
            if let Some(action) = classify_icon_event(&event) {
                dispatch(action, &tx, &icon_ctx, window);
            }
        }));

        Self { rx }
    }

    /// Bridge with no event sources (tray unavailable)
    pub fn disconnected() -> Self {
        let (_tx, rx) = mpsc::channel();
        Self { rx }
    }

    pub fn pending(&self) -> Vec<AppEvent> {
        self.rx.try_iter().collect()
    }
}

fn dispatch(
    action: TrayAction,
    tx: &Sender<AppEvent>,
    ctx: &egui::Context,
    window: Option<NativeHandle>,
) {
    match action {
        TrayAction::Exit => {
            info!("Exit requested from tray menu");
            std::process::exit(0);
        }
        TrayAction::Forward(event) => {
            if let Some(handle) = window {
                platform::reveal(handle);
            }
            forward(tx, ctx, event);
        }
    }
}

fn forward(tx: &Sender<AppEvent>, ctx: &egui::Context, event: AppEvent) {
    debug!(?event, "Forwarding tray event");
    if tx.send(event).is_ok() {
        ctx.request_repaint();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids() -> TrayIds {
        TrayIds {
            show: MenuId::new("show"),
            exit: MenuId::new("exit"),
        }
    }

    #[test]
    fn test_classify_show_item() {
        assert_eq!(
            classify_menu_event(&MenuId::new("show"), &ids()),
            Some(TrayAction::Forward(AppEvent::ToggleFromMenu))
        );
    }

    #[test]
    fn test_classify_exit_item_exits_from_callback() {
        assert_eq!(
            classify_menu_event(&MenuId::new("exit"), &ids()),
            Some(TrayAction::Exit)
        );
    }

    #[test]
    fn test_classify_unknown_item() {
        assert_eq!(classify_menu_event(&MenuId::new("other"), &ids()), None);
    }

    #[test]
    fn test_forward_queues_event() {
        let (tx, rx) = mpsc::channel();
        let bridge = EventBridge { rx };
        let ctx = egui::Context::default();

        forward(&tx, &ctx, AppEvent::ToggleFromMenu);
        forward(&tx, &ctx, AppEvent::ToggleFromIcon);
        assert_eq!(
            bridge.pending(),
            vec![AppEvent::ToggleFromMenu, AppEvent::ToggleFromIcon]
        );
        assert!(bridge.pending().is_empty());
    }

    #[test]
    fn test_dispatch_forwards_toggle_without_window() {
        let (tx, rx) = mpsc::channel();
        let bridge = EventBridge { rx };
        let ctx = egui::Context::default();

        dispatch(TrayAction::Forward(AppEvent::ToggleFromIcon), &tx, &ctx, None);
        assert_eq!(bridge.pending(), vec![AppEvent::ToggleFromIcon]);
    }
}
