//! JSON persistence for border settings at `~/.config/border_picker.json`.
//!
//! Saves go through a sibling temp file and a rename, so a concurrent reader
//! sees either the old file or the new one.

use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::StoreError;

use super::{Settings, StoredSettings};

/// Directory under the home directory that holds the settings file.
pub const CONFIG_SUBDIR: &str = ".config";
/// Settings file name.
pub const CONFIG_FILE_NAME: &str = "border_picker.json";
/// Shown in place of the settings path when it cannot be resolved.
pub const UNRESOLVED_PATH: &str = "<unresolved>";

#[cfg(unix)]
const DIR_MODE: u32 = 0o755;
#[cfg(unix)]
const FILE_MODE: u32 = 0o644;

/// Reads and writes the settings file under a home directory.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    home: Option<PathBuf>,
}

impl SettingsStore {
    /// Store rooted at the current user's home directory.
    pub fn from_env() -> Self {
        Self {
            home: dirs::home_dir(),
        }
    }

    /// Store rooted at an explicit home directory.
    pub fn with_home(home: impl Into<PathBuf>) -> Self {
        Self {
            home: Some(home.into()),
        }
    }

    /// Store for a process whose home directory is unknown. Every operation
    /// fails with [`StoreError::PathResolution`].
    pub fn without_home() -> Self {
        Self { home: None }
    }

    /// Resolve `<home>/.config/border_picker.json`.
    pub fn path(&self) -> Result<PathBuf, StoreError> {
        let home = self.home.as_ref().ok_or(StoreError::PathResolution)?;
        Ok(home.join(CONFIG_SUBDIR).join(CONFIG_FILE_NAME))
    }

    /// Settings path for user-facing output, or `<unresolved>` when there is
    /// no home directory.
    pub fn display_path(&self) -> String {
        match self.path() {
            Ok(path) => path.display().to_string(),
            Err(_) => UNRESOLVED_PATH.to_string(),
        }
    }

    /// Read and parse the settings file. Defaults are not applied here.
    pub fn load(&self) -> Result<StoredSettings, StoreError> {
        let path = self.path()?;
        let text = std::fs::read_to_string(&path)?;
        let stored = serde_json::from_str(&text)?;
        debug!(path = %path.display(), "loaded settings");
        Ok(stored)
    }

    /// Serialize `settings` and replace the settings file.
    pub fn save(&self, settings: &Settings) -> Result<(), StoreError> {
        let path = self.path()?;
        if let Some(parent) = path.parent() {
            create_config_dir(parent)?;
        }
        let text = serde_json::to_string_pretty(&StoredSettings::from(settings))?;
        write_replace(&path, text.as_bytes())?;
        debug!(path = %path.display(), "saved settings");
        Ok(())
    }
}

fn create_config_dir(dir: &Path) -> Result<(), StoreError> {
    let mut builder = std::fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(DIR_MODE);
    }
    builder.create(dir)?;
    Ok(())
}

/// Write `bytes` to a temp file next to `path`, then rename it into place.
fn write_replace(path: &Path, bytes: &[u8]) -> Result<(), StoreError> {
    let tmp_path = temp_path_for(path);
    let mut options = std::fs::OpenOptions::new();
    options.create(true).truncate(true).write(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(FILE_MODE);
    }

    let written = options.open(&tmp_path).and_then(|mut file| {
        file.write_all(bytes)?;
        file.sync_all()
    });
    if let Err(err) = written.and_then(|()| std::fs::rename(&tmp_path, path)) {
        let _ = std::fs::remove_file(&tmp_path);
        return Err(StoreError::Io(err));
    }
    Ok(())
}

fn temp_path_for(path: &Path) -> PathBuf {
    let file_name = path
        .file_name()
        .map(|value| value.to_string_lossy().into_owned())
        .unwrap_or_else(|| CONFIG_FILE_NAME.to_string());
    path.with_file_name(format!(".{file_name}.{}.tmp", std::process::id()))
}
