//! src/util/paths.rs
//! Small path helpers shared by the navigator, the projector and the config.

use directories::BaseDirs;
use std::path::{Component, Path, PathBuf};

/// Marker that makes an entry name hidden.
pub const HIDDEN_MARKER: char = '.';

/// True when `path` is a filesystem root (`/`, `C:\`, `\\server\share\`).
#[must_use]
pub fn is_root(path: &Path) -> bool {
    path.parent().is_none()
}

/// Dot-prefix rule only; platform hidden attributes are not consulted.
#[must_use]
pub fn is_hidden(name: &str) -> bool {
    name.starts_with(HIDDEN_MARKER)
}

/// Final path component as UTF-8 (lossy). Roots yield their own display form.
#[must_use]
pub fn display_name(path: &Path) -> String {
    path.file_name().map_or_else(
        || path.to_string_lossy().into_owned(),
        |n| n.to_string_lossy().into_owned(),
    )
}

/// The current user's home directory, if the platform reports one.
#[must_use]
pub fn home_dir() -> Option<PathBuf> {
    BaseDirs::new().map(|dirs| dirs.home_dir().to_path_buf())
}

/// Expand a leading `~` to the home directory. Other paths pass through.
#[must_use]
pub fn expand_home(path: &Path) -> PathBuf {
    let mut components = path.components();

    match components.next() {
        Some(Component::Normal(first)) if first == "~" => match home_dir() {
            Some(home) => home.join(components.as_path()),
            None => path.to_path_buf(),
        },
        _ => path.to_path_buf(),
    }
}

/// Where a navigator starts when nothing is configured.
#[must_use]
pub fn default_start_location() -> PathBuf {
    home_dir().unwrap_or_else(|| PathBuf::from("."))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_detection() {
        assert!(is_root(Path::new("/")));
        assert!(!is_root(Path::new("/a")));
        assert!(!is_root(Path::new("/a/b")));
    }

    #[test]
    fn test_hidden_rule_is_dot_prefix() {
        assert!(is_hidden(".git"));
        assert!(is_hidden("."));
        assert!(!is_hidden("src"));
        assert!(!is_hidden("a.b"));
    }

    #[test]
    fn test_display_name() {
        assert_eq!(display_name(Path::new("/a/docs")), "docs");
        assert_eq!(display_name(Path::new("/")), "/");
    }

    #[test]
    fn test_expand_home_only_touches_leading_tilde() {
        assert_eq!(expand_home(Path::new("/tmp/x")), PathBuf::from("/tmp/x"));
        assert_eq!(expand_home(Path::new("a/~")), PathBuf::from("a/~"));

        if let Some(home) = home_dir() {
            assert_eq!(expand_home(Path::new("~")), home);
            assert_eq!(expand_home(Path::new("~/docs")), home.join("docs"));
        }
    }
}
