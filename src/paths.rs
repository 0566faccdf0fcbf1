//! Path resolution for settings and cached listings.
//!
//! Uses env vars when set, otherwise XDG defaults.

use std::path::{Path, PathBuf};

pub const DESKTOP_FEATURED_FILE: &str = "featured-5.9.json";
pub const MOBILE_FEATURED_FILE: &str = "featured-mobile-5.9.json";

/// Resolved paths for dnav files.
#[derive(Debug, Clone)]
pub struct Paths {
    pub settings: PathBuf,
    pub cache_dir: PathBuf,
}

impl Paths {
    /// Resolve paths from environment, falling back to XDG/defaults.
    pub fn resolve() -> Self {
        let settings = resolve_path(
            "DNAV_CONFIG_PATH",
            dirs::config_dir().map(|p| p.join("dnav/settings.json")),
            "~/.config/dnav/settings.json",
        );
        let cache_dir = resolve_path(
            "DNAV_CACHE_DIR",
            dirs::cache_dir().map(|p| p.join("dnav")),
            "~/.cache/dnav/",
        );

        Self {
            settings,
            cache_dir,
        }
    }

    /// Settings file path.
    pub fn settings_path(&self) -> &Path {
        &self.settings
    }

    /// Directory holding the cached featured listing.
    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Cached featured listing, honouring a configured file name.
    pub fn featured_path(&self, configured_name: Option<&str>) -> PathBuf {
        let name = configured_name
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(String::from)
            .unwrap_or_else(|| default_featured_file_name(is_mobile()).to_string());
        self.cache_dir.join(name)
    }
}

/// Listing file name for the desktop or mobile shell.
pub fn default_featured_file_name(mobile: bool) -> &'static str {
    if mobile {
        MOBILE_FEATURED_FILE
    } else {
        DESKTOP_FEATURED_FILE
    }
}

fn is_mobile() -> bool {
    std::env::var("QT_QUICK_CONTROLS_MOBILE")
        .map(|v| matches!(v.trim(), "1" | "true"))
        .unwrap_or(false)
}

fn resolve_path(env_var: &str, xdg_default: Option<PathBuf>, fallback: &str) -> PathBuf {
    if let Ok(val) = std::env::var(env_var) {
        let trimmed = val.trim();
        if !trimmed.is_empty() {
            return expand_tilde(trimmed);
        }
    }
    xdg_default.unwrap_or_else(|| expand_tilde(fallback))
}

fn expand_tilde(path: &str) -> PathBuf {
    let expanded = shellexpand::tilde(path);
    PathBuf::from(expanded.as_ref())
}
