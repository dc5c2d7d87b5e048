//! Bundled resource lookup
//!
//! Resources live in an `assets/` directory. A packaged build ships that directory
//! next to the executable; an unpackaged run (`cargo run`) finds it in the working
//! directory instead.

use std::env;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::constants::resources;

/// Resolve a bundled resource by file name.
/// The path is returned even when the file is missing; callers surface the failure on load.
pub fn resource_path(name: &str) -> PathBuf {
    let exe_dir = env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf));
    let cwd = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    resolve(name, exe_dir.as_deref(), &cwd)
}

fn resolve(name: &str, exe_dir: Option<&Path>, cwd: &Path) -> PathBuf {
    let base = exe_dir
        .filter(|dir| dir.join(resources::DIR).is_dir())
        .unwrap_or(cwd);

    let path = base.join(resources::DIR).join(name);
    if path.exists() {
        debug!(path = %path.display(), "Resolved resource");
    } else {
        warn!(path = %path.display(), "Resource not found");
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_resolve_prefers_executable_directory() {
        let exe_dir = tempfile::tempdir().unwrap();
        let cwd = tempfile::tempdir().unwrap();
        fs::create_dir(exe_dir.path().join(resources::DIR)).unwrap();
        fs::create_dir(cwd.path().join(resources::DIR)).unwrap();

        let path = resolve("crosshair.png", Some(exe_dir.path()), cwd.path());
        assert_eq!(path, exe_dir.path().join(resources::DIR).join("crosshair.png"));
    }

    #[test]
    fn test_resolve_falls_back_to_working_directory() {
        let exe_dir = tempfile::tempdir().unwrap();
        let cwd = tempfile::tempdir().unwrap();

        // No assets/ next to the executable
        let path = resolve("crosshair.png", Some(exe_dir.path()), cwd.path());
        assert_eq!(path, cwd.path().join(resources::DIR).join("crosshair.png"));
    }

    #[test]
    fn test_resolve_without_executable_directory() {
        let cwd = tempfile::tempdir().unwrap();
        let path = resolve("tray-icon.png", None, cwd.path());
        assert_eq!(path, cwd.path().join(resources::DIR).join("tray-icon.png"));
    }

    #[test]
    fn test_resolve_returns_missing_path() {
        let cwd = tempfile::tempdir().unwrap();
        let path = resolve("missing.png", None, cwd.path());
        assert!(!path.exists());
        assert!(path.ends_with("missing.png"));
    }
}
