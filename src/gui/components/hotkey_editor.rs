//! Quit-hotkey editor shown in Edit mode

use eframe::egui;
use crate::gui::constants::*;

/// Text buffer for the hotkey field
pub struct HotkeyEditorState {
    text: String,
}

impl HotkeyEditorState {
    pub fn new(current: &str) -> Self {
        Self {
            text: current.to_string(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Put the active binding back after a rejected edit
    pub fn reset_to(&mut self, current: &str) {
        self.text = current.to_string();
    }

    /// Show the registered combination, or an empty field when nothing is bound
    pub fn show_binding(&mut self, active: Option<&str>) {
        self.reset_to(active.unwrap_or_default());
    }
}

/// Renders the hotkey row and returns true when "Apply" was pressed (or Enter in the field)
pub fn ui(ui: &mut egui::Ui, state: &mut HotkeyEditorState) -> bool {
    let mut apply = false;

    ui.horizontal(|ui| {
        ui.label("Quit hotkey:");
        let response = ui.add(
            egui::TextEdit::singleline(&mut state.text)
                .desired_width(HOTKEY_FIELD_WIDTH)
                .hint_text("e.g. Alt+S"),
        );
        if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
            apply = true;
        }
        if ui.button("Apply").clicked() {
            apply = true;
        }
    });

    apply
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_to_restores_binding() {
        let mut state = HotkeyEditorState::new("Alt+S");
        state.text = "garbage".to_string();
        state.reset_to("Alt+S");
        assert_eq!(state.text(), "Alt+S");
    }

    #[test]
    fn test_show_binding_without_hotkey_leaves_field_empty() {
        let mut state = HotkeyEditorState::new("Ctrl+Q");
        state.show_binding(None);
        assert_eq!(state.text(), "");

        state.show_binding(Some("Ctrl+Shift+Q"));
        assert_eq!(state.text(), "Ctrl+Shift+Q");
    }
}
