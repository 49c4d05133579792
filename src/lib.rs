//! Border picker: choose, persist, and apply window border colors.
//!
//! The crate encodes colors as `0xAARRGGBB` tokens, keeps the user's choice in
//! `~/.config/border_picker.json`, and pushes it to the external `borders`
//! tool.
//!
//! # Quick start
//!
//! ```no_run
//! use std::sync::Arc;
//! use border_picker::borders::BorderApplier;
//! use border_picker::color::Color;
//! use border_picker::controller::SettingsController;
//! use border_picker::settings::{load_with_defaults, Settings, SettingsStore};
//!
//! # async fn example() {
//! let store = SettingsStore::from_env();
//! let settings = load_with_defaults(&store, Settings::default());
//! let mut controller = SettingsController::new(settings, store, Arc::new(BorderApplier::new()));
//! controller.set_active_color(Color::opaque(0xe2, 0xe2, 0xe3)).await;
//! # }
//! ```

pub mod borders;
pub mod color;
pub mod controller;
pub mod error;
pub mod settings;
#[cfg(test)]
pub mod testsupport;
