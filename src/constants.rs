//! Application-wide constants
//!
//! Everything the overlay needs to know at compile time lives here: sizes,
//! titles, the default hotkey and the names of the bundled resources.

/// Crosshair preview constants
pub mod preview {
    /// Side length of the square the crosshair image is fitted into
    pub const SIZE: u32 = 100;

    /// Texture name used when uploading the preview to egui
    pub const TEXTURE_NAME: &str = "crosshair-preview";
}

/// Edit window constants
pub mod window {
    /// Fixed Edit window dimensions (width, height)
    pub const EDIT_WIDTH: u32 = 400;
    pub const EDIT_HEIGHT: u32 = 250;

    /// Title shown in Edit mode (and in the task switcher)
    pub const TITLE: &str = "Custom Crosshair";

    /// App id handed to eframe
    pub const APP_ID: &str = "crosshair-overlay";
}

/// Global hotkey constants
pub mod hotkey {
    /// Combination that terminates the application
    pub const DEFAULT_QUIT: &str = "Alt+S";
}

/// Bundled resource constants
pub mod resources {
    /// Directory (next to the executable, or the working directory) holding bundled files
    pub const DIR: &str = "assets";

    /// Default crosshair image
    pub const DEFAULT_IMAGE: &str = "crosshair.png";

    /// Tray icon image
    pub const TRAY_ICON: &str = "tray-icon.png";
}

/// Dialog texts
pub mod dialogs {
    pub const ERROR_TITLE: &str = "Error";
    pub const CONFIRM_TITLE: &str = "Confirm";
    pub const CONFIRM_CENTER: &str = "Center OK?";
    pub const SELECT_TITLE: &str = "Select Image";
    pub const PNG_FILTER_NAME: &str = "PNG";
    pub const PNG_EXTENSIONS: &[&str] = &["png"];
    pub const HOTKEY_TITLE: &str = "Hotkey Changed";
}

/// Tray constants
pub mod tray {
    pub const TOOLTIP: &str = "Custom Crosshair";
    pub const SHOW_LABEL: &str = "Show";
    pub const EXIT_LABEL: &str = "Exit";

    /// Side length of the in-memory fallback icon
    pub const FALLBACK_ICON_SIZE: u32 = 32;
}

/// Logging constants
pub mod logging {
    /// Environment variable selecting the log level
    pub const LEVEL_VAR: &str = "LOG_LEVEL";
}
