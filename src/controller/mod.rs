//! Owner of the live border settings.
//!
//! Every change runs one apply-then-save cycle. Failures in either step are
//! logged and swallowed: a broken `borders` install must not stop the
//! settings from being persisted, and a read-only config dir must not stop
//! the borders from updating.

use std::sync::Arc;

use tracing::warn;

use crate::borders::BorderTool;
use crate::color::Color;
use crate::settings::{Settings, SettingsStore};

mod worker;

pub use worker::{ApplyWorker, DEFAULT_DEBOUNCE};

/// What happened during one apply/save cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleReport {
    pub applied: bool,
    pub saved: bool,
}

impl CycleReport {
    const REJECTED: Self = Self {
        applied: false,
        saved: false,
    };

    pub fn is_clean(&self) -> bool {
        self.applied && self.saved
    }
}

/// Holds the current settings and pushes every change to the tool and disk.
pub struct SettingsController {
    settings: Settings,
    store: SettingsStore,
    tool: Arc<dyn BorderTool>,
}

impl SettingsController {
    pub fn new(settings: Settings, store: SettingsStore, tool: Arc<dyn BorderTool>) -> Self {
        Self {
            settings,
            store,
            tool,
        }
    }

    pub fn settings(&self) -> Settings {
        self.settings
    }

    pub fn store(&self) -> &SettingsStore {
        &self.store
    }

    pub async fn set_active_color(&mut self, color: Color) -> CycleReport {
        self.settings.active_color = color;
        self.sync().await
    }

    pub async fn set_inactive_color(&mut self, color: Color) -> CycleReport {
        self.settings.inactive_color = color;
        self.sync().await
    }

    /// Non-finite widths are rejected: nothing is applied or saved and the
    /// current width is kept.
    pub async fn set_border_width(&mut self, width: f64) -> CycleReport {
        if !width.is_finite() {
            warn!(width, "ignoring non-finite border width");
            return CycleReport::REJECTED;
        }
        self.settings.border_width = width;
        self.sync().await
    }

    /// Replace all three fields at once. Rejected like
    /// [`set_border_width`](Self::set_border_width) when the width is not finite.
    pub async fn replace(&mut self, settings: Settings) -> CycleReport {
        if !settings.border_width.is_finite() {
            warn!(width = settings.border_width, "ignoring non-finite border width");
            return CycleReport::REJECTED;
        }
        self.settings = settings;
        self.sync().await
    }

    /// Apply the current settings and write them to disk.
    pub async fn sync(&mut self) -> CycleReport {
        let applied = match self.tool.apply(&self.settings).await {
            Ok(()) => true,
            Err(err) => {
                warn!(error = %err, "error updating borders");
                false
            }
        };
        // The store does blocking fs work (including fsync).
        let store = self.store.clone();
        let settings = self.settings;
        let saved = match tokio::task::spawn_blocking(move || store.save(&settings)).await {
            Ok(Ok(())) => true,
            Ok(Err(err)) => {
                warn!(error = %err, "error saving settings");
                false
            }
            Err(err) => {
                warn!(error = %err, "settings save task failed");
                false
            }
        };
        CycleReport { applied, saved }
    }
}
