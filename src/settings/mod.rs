//! Border settings record, defaults, and the load-with-fallback policy.
//!
//! The on-disk form ([`StoredSettings`]) keeps colors as hex tokens so that a
//! bad token in one field can be replaced by its default without discarding
//! the rest of the file. [`Settings`] is the decoded in-memory form.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::color::Color;

mod store;

pub use store::{SettingsStore, CONFIG_FILE_NAME, CONFIG_SUBDIR, UNRESOLVED_PATH};

/// Default border color for the focused window.
pub const DEFAULT_ACTIVE_COLOR: Color = Color::opaque(0xe2, 0xe2, 0xe3);
/// Default border color for unfocused windows.
pub const DEFAULT_INACTIVE_COLOR: Color = Color::opaque(0x41, 0x45, 0x50);
/// Default border width in pixels.
pub const DEFAULT_BORDER_WIDTH: f64 = 6.0;
/// Smallest width the front end accepts.
pub const MIN_BORDER_WIDTH: f64 = 0.0;
/// Largest width the front end accepts.
pub const MAX_BORDER_WIDTH: f64 = 20.0;

/// Decoded border settings owned by the controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Settings {
    pub active_color: Color,
    pub inactive_color: Color,
    pub border_width: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            active_color: DEFAULT_ACTIVE_COLOR,
            inactive_color: DEFAULT_INACTIVE_COLOR,
            border_width: DEFAULT_BORDER_WIDTH,
        }
    }
}

impl Settings {
    /// Width rendered with one decimal digit, as passed to `borders`.
    pub fn width_label(&self) -> String {
        format!("{:.1}", self.border_width)
    }
}

/// Settings exactly as stored in `border_picker.json`.
///
/// A missing key reads as its zero value (empty token, width 0), so a
/// missing color falls back on its own in [`StoredSettings::resolve`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredSettings {
    #[serde(default)]
    pub active_color: String,
    #[serde(default)]
    pub inactive_color: String,
    #[serde(default)]
    pub border_width: f64,
}

impl From<&Settings> for StoredSettings {
    fn from(settings: &Settings) -> Self {
        Self {
            active_color: settings.active_color.to_hex(),
            inactive_color: settings.inactive_color.to_hex(),
            border_width: settings.border_width,
        }
    }
}

impl StoredSettings {
    /// Decode both colors, substituting the matching default for any token
    /// that fails to decode. Each color falls back on its own.
    pub fn resolve(&self, defaults: &Settings) -> Settings {
        let active_color = Color::from_hex(&self.active_color).unwrap_or_else(|err| {
            warn!(error = %err, "bad active_color in settings, using default");
            defaults.active_color
        });
        let inactive_color = Color::from_hex(&self.inactive_color).unwrap_or_else(|err| {
            warn!(error = %err, "bad inactive_color in settings, using default");
            defaults.inactive_color
        });
        Settings {
            active_color,
            inactive_color,
            border_width: self.border_width,
        }
    }
}

/// Load settings from `store`, never failing.
///
/// Any load error is logged and `defaults` returned as-is; a readable file
/// with a bad color keeps its other fields (see [`StoredSettings::resolve`]).
pub fn load_with_defaults(store: &SettingsStore, defaults: Settings) -> Settings {
    match store.load() {
        Ok(stored) => stored.resolve(&defaults),
        Err(err) => {
            warn!(error = %err, "could not load settings, using defaults");
            defaults
        }
    }
}
