pub mod controls;
pub mod hotkey_editor;
