use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use global_hotkey::hotkey::HotKey;
use global_hotkey::{GlobalHotKeyEvent, GlobalHotKeyManager, HotKeyState};
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Debug, Error)]
pub enum HotkeyError {
    #[error("invalid hotkey '{combo}': {reason}")]
    Parse { combo: String, reason: String },

    #[error("failed to register hotkey '{combo}': {source}")]
    Register {
        combo: String,
        #[source]
        source: global_hotkey::Error,
    },

    #[error("hotkey manager unavailable: {0}")]
    Manager(#[source] global_hotkey::Error),
}

/// Parse a combination such as `Alt+S` or `Ctrl+Shift+Q`
pub fn parse_hotkey(combo: &str) -> Result<HotKey, HotkeyError> {
    let combo = combo.trim();
    if combo.is_empty() {
        return Err(HotkeyError::Parse {
            combo: String::new(),
            reason: "empty combination".to_string(),
        });
    }

    combo.parse::<HotKey>().map_err(|e| HotkeyError::Parse {
        combo: combo.to_string(),
        reason: e.to_string(),
    })
}

/// System-wide shortcut that terminates the process.
///
/// The callback exits directly instead of going through the UI thread so the
/// shortcut still works while the window is hidden or click-through.
pub struct QuitHotkey {
    manager: GlobalHotKeyManager,
    hotkey: HotKey,
    combo: String,
    active_id: Arc<AtomicU32>,
}

impl QuitHotkey {
    /// Must run on the thread that owns the event loop (the eframe main thread)
    pub fn register(combo: &str) -> Result<Self, HotkeyError> {
        let hotkey = parse_hotkey(combo)?;
        let manager = GlobalHotKeyManager::new().map_err(HotkeyError::Manager)?;
        manager.register(hotkey).map_err(|source| HotkeyError::Register {
            combo: combo.to_string(),
            source,
        })?;

        let active_id = Arc::new(AtomicU32::new(hotkey.id()));
        let handler_id = Arc::clone(&active_id);
        GlobalHotKeyEvent::set_event_handler(Some(move |event: GlobalHotKeyEvent| {
            debug!(id = event.id, state = ?event.state, "Global hotkey event");
            if event.id == handler_id.load(Ordering::SeqCst) && event.state == HotKeyState::Pressed {
                info!("Quit hotkey pressed, exiting");
                std::process::exit(0);
            }
        }));

        info!(combo = %combo.trim(), "Quit hotkey registered");
        Ok(Self {
            manager,
            hotkey,
            combo: combo.trim().to_string(),
            active_id,
        })
    }

    pub fn combo(&self) -> &str {
        &self.combo
    }

    /// Replace the binding. The old binding stays active if the new one is rejected.
    pub fn rebind(&mut self, combo: &str) -> Result<(), HotkeyError> {
        let hotkey = parse_hotkey(combo)?;
        if hotkey.id() == self.hotkey.id() {
            debug!(combo = %combo, "Hotkey unchanged");
            return Ok(());
        }

        self.manager
            .register(hotkey)
            .map_err(|source| HotkeyError::Register {
                combo: combo.trim().to_string(),
                source,
            })?;
        self.active_id.store(hotkey.id(), Ordering::SeqCst);

        if let Err(err) = self.manager.unregister(self.hotkey) {
            // The new binding already works; a stale registration only wastes a key
            warn!(error = %err, old = %self.combo, "Failed to unregister previous hotkey");
        }

        info!(old = %self.combo, new = %combo.trim(), "Quit hotkey rebound");
        self.hotkey = hotkey;
        self.combo = combo.trim().to_string();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use global_hotkey::hotkey::{Code, Modifiers};

    #[test]
    fn test_parse_default_quit_hotkey() {
        let parsed = parse_hotkey(crate::constants::hotkey::DEFAULT_QUIT).unwrap();
        let expected = HotKey::new(Some(Modifiers::ALT), Code::KeyS);
        assert_eq!(parsed.id(), expected.id());
    }

    #[test]
    fn test_parse_is_case_insensitive_and_trims() {
        let parsed = parse_hotkey("  ctrl+shift+q ").unwrap();
        let expected = HotKey::new(Some(Modifiers::CONTROL | Modifiers::SHIFT), Code::KeyQ);
        assert_eq!(parsed.id(), expected.id());
    }

    #[test]
    fn test_parse_rejects_empty() {
        assert!(matches!(parse_hotkey("   "), Err(HotkeyError::Parse { .. })));
    }

    #[test]
    fn test_parse_rejects_unknown_key() {
        let err = parse_hotkey("Alt+NotAKey").unwrap_err();
        assert!(err.to_string().contains("Alt+NotAKey"));
    }
}
