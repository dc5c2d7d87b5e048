//! Modal dialogs
//!
//! Dialogs block the UI thread until the user answers, so every call here returns
//! the user's choice directly. The controller only sees the `Dialogs` trait.

use std::path::PathBuf;

use rfd::{FileDialog, MessageButtons, MessageDialog, MessageDialogResult, MessageLevel};
use tracing::debug;

use crate::constants::dialogs;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Confirmed,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileChoice {
    Selected(PathBuf),
    Cancelled,
}

pub trait Dialogs {
    /// Yes/No question
    fn confirm(&mut self, title: &str, message: &str) -> Confirmation;

    /// File picker restricted to PNG images
    fn pick_png(&mut self) -> FileChoice;

    fn warn(&mut self, title: &str, message: &str);

    fn inform(&mut self, title: &str, message: &str);
}

/// Native dialogs backed by rfd
#[derive(Debug, Default)]
pub struct NativeDialogs;

impl Dialogs for NativeDialogs {
    fn confirm(&mut self, title: &str, message: &str) -> Confirmation {
        let result = MessageDialog::new()
            .set_level(MessageLevel::Info)
            .set_title(title)
            .set_description(message)
            .set_buttons(MessageButtons::YesNo)
            .show();
        debug!(?result, "Confirm dialog closed");

        match result {
            MessageDialogResult::Yes => Confirmation::Confirmed,
            _ => Confirmation::Cancelled,
        }
    }

    fn pick_png(&mut self) -> FileChoice {
        FileDialog::new()
            .set_title(dialogs::SELECT_TITLE)
            .add_filter(dialogs::PNG_FILTER_NAME, dialogs::PNG_EXTENSIONS)
            .pick_file()
            .map_or(FileChoice::Cancelled, FileChoice::Selected)
    }

    fn warn(&mut self, title: &str, message: &str) {
        MessageDialog::new()
            .set_level(MessageLevel::Warning)
            .set_title(title)
            .set_description(message)
            .set_buttons(MessageButtons::Ok)
            .show();
    }

    fn inform(&mut self, title: &str, message: &str) {
        MessageDialog::new()
            .set_level(MessageLevel::Info)
            .set_title(title)
            .set_description(message)
            .set_buttons(MessageButtons::Ok)
            .show();
    }
}

/// Dialog double answering from queues and recording what was shown
#[cfg(test)]
#[derive(Debug, Default)]
pub struct ScriptedDialogs {
    pub confirmations: std::collections::VecDeque<Confirmation>,
    pub file_choices: std::collections::VecDeque<FileChoice>,
    pub warnings: Vec<String>,
    pub infos: Vec<String>,
    pub confirm_prompts: Vec<String>,
}

#[cfg(test)]
impl Dialogs for ScriptedDialogs {
    fn confirm(&mut self, _title: &str, message: &str) -> Confirmation {
        self.confirm_prompts.push(message.to_string());
        self.confirmations
            .pop_front()
            .unwrap_or(Confirmation::Cancelled)
    }

    fn pick_png(&mut self) -> FileChoice {
        self.file_choices.pop_front().unwrap_or(FileChoice::Cancelled)
    }

    fn warn(&mut self, _title: &str, message: &str) {
        self.warnings.push(message.to_string());
    }

    fn inform(&mut self, _title: &str, message: &str) {
        self.infos.push(message.to_string());
    }
}
