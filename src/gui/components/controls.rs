//! Edit-mode control panel: crosshair preview on the left, buttons on the right

use eframe::egui;

use crate::constants::preview;
use crate::gui::constants::*;
use crate::state::ClickThroughStatus;

/// What the user asked for this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlAction {
    Reset,
    Select,
    Center,
    Pin(bool),
}

/// Renders the preview square and the button column. `padding` offsets the fitted
/// image inside the square; `pinned` is the checkbox model.
pub fn ui(
    ui: &mut egui::Ui,
    texture: Option<&egui::TextureHandle>,
    padding: (u32, u32),
    pinned: &mut bool,
) -> Option<ControlAction> {
    let mut action = None;

    ui.horizontal(|ui| {
        preview_square(ui, texture, padding);
        ui.add_space(PADDING);

        ui.vertical(|ui| {
            ui.spacing_mut().item_spacing.y = ITEM_SPACING;
            let button_size = egui::vec2(BUTTON_WIDTH, 0.0);

            if ui.add(styled_button("Reset").min_size(button_size)).clicked() {
                action = Some(ControlAction::Reset);
            }
            if ui.add(styled_button("Select").min_size(button_size)).clicked() {
                action = Some(ControlAction::Select);
            }
            if ui.add(styled_button("Center").min_size(button_size)).clicked() {
                action = Some(ControlAction::Center);
            }
            if ui.checkbox(pinned, "Pin on Top").changed() {
                action = Some(ControlAction::Pin(*pinned));
            }
        });
    });

    action
}

fn styled_button(text: &str) -> egui::Button<'_> {
    egui::Button::new(egui::RichText::new(text).color(TEXT_COLOR)).fill(BUTTON_FILL)
}

/// Fixed preview square with the fitted image centered in it
fn preview_square(ui: &mut egui::Ui, texture: Option<&egui::TextureHandle>, padding: (u32, u32)) {
    let side = preview::SIZE as f32;
    let (rect, _) = ui.allocate_exact_size(egui::vec2(side, side), egui::Sense::hover());

    if let Some(texture) = texture {
        let origin = rect.min + egui::vec2(padding.0 as f32, padding.1 as f32);
        let image_rect = egui::Rect::from_min_size(origin, texture.size_vec2());
        ui.painter().image(
            texture.id(),
            image_rect,
            egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
            egui::Color32::WHITE,
        );
    }
}

/// One-line note about the last click-through attempt, if it did not work
pub fn click_through_note(status: &ClickThroughStatus) -> Option<String> {
    match status {
        ClickThroughStatus::Inactive | ClickThroughStatus::Active => None,
        ClickThroughStatus::Unsupported => {
            Some("Click-through is not available on this platform".to_string())
        }
        ClickThroughStatus::Failed(reason) => Some(format!("Click-through failed: {reason}")),
    }
}

pub fn status_line(ui: &mut egui::Ui, status: &ClickThroughStatus) {
    if let Some(note) = click_through_note(status) {
        ui.colored_label(STATUS_WARNING, note);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_note_when_click_through_worked() {
        assert_eq!(click_through_note(&ClickThroughStatus::Active), None);
        assert_eq!(click_through_note(&ClickThroughStatus::Inactive), None);
    }

    #[test]
    fn test_note_for_unsupported_platform() {
        let note = click_through_note(&ClickThroughStatus::Unsupported).unwrap();
        assert!(note.contains("not available"));
    }

    #[test]
    fn test_note_carries_failure_reason() {
        let status = ClickThroughStatus::Failed("os error 5".to_string());
        assert_eq!(
            click_through_note(&status).as_deref(),
            Some("Click-through failed: os error 5")
        );
    }
}
