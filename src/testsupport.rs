//! Shared test fixtures for store, controller, and worker test modules.

use async_trait::async_trait;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::borders::BorderTool;
use crate::error::ApplyError;
use crate::settings::Settings;

static TEST_DIR_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Temporary directory fixture with best-effort cleanup.
#[derive(Debug)]
pub struct TestTempDir {
    path: PathBuf,
}

impl TestTempDir {
    /// Create a unique temporary directory with a readable prefix.
    pub fn new(prefix: &str) -> Self {
        let suffix = TEST_DIR_COUNTER.fetch_add(1, Ordering::Relaxed);
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis();
        let dir = std::env::temp_dir().join(format!(
            "border-picker-{prefix}-{}-{millis}-{suffix}",
            std::process::id()
        ));
        fs::create_dir_all(&dir).expect("failed to create temporary fixture directory");
        Self { path: dir }
    }

    /// Root directory path for this fixture.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Build a child path under the fixture root.
    pub fn child(&self, relative: &str) -> PathBuf {
        self.path.join(relative)
    }

    /// Write UTF-8 text to a child path, creating parent directories as needed.
    pub fn write_text(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.child(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("failed to create parent directories for fixture");
        }
        fs::write(&path, content).expect("failed to write fixture file");
        path
    }
}

impl Drop for TestTempDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

/// Border tool stand-in that records every apply call.
#[derive(Debug, Default)]
pub struct RecordingTool {
    calls: Mutex<Vec<Settings>>,
    fail: bool,
    delay: Duration,
}

impl RecordingTool {
    /// Recorder whose every apply reports a tool failure.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Recorder that holds each apply open for `delay` after recording it.
    pub fn slow(delay: Duration) -> Self {
        Self {
            delay,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<Settings> {
        self.calls.lock().expect("recording lock").clone()
    }

    /// Yield to the runtime until at least `n` calls were recorded.
    pub async fn wait_for_calls(&self, n: usize) {
        for _ in 0..2000 {
            if self.calls().len() >= n {
                return;
            }
            tokio::time::sleep(Duration::from_millis(1)).await;
        }
        panic!("timed out waiting for {n} apply calls");
    }
}

#[async_trait]
impl BorderTool for RecordingTool {
    async fn apply(&self, settings: &Settings) -> Result<(), ApplyError> {
        self.calls.lock().expect("recording lock").push(*settings);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        if self.fail {
            return Err(ApplyError::ExternalTool("exit status: 1".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temp_dir_fixture_writes_and_resolves_paths() {
        let fixture = TestTempDir::new("fixture");
        let file = fixture.write_text("nested/file.txt", "hello");
        assert_eq!(fs::read_to_string(file).unwrap(), "hello");
    }

    #[tokio::test]
    async fn recording_tool_records_and_fails_on_request() {
        let ok = RecordingTool::default();
        ok.apply(&Settings::default()).await.expect("apply");
        assert_eq!(ok.calls(), vec![Settings::default()]);

        let failing = RecordingTool::failing();
        assert!(failing.apply(&Settings::default()).await.is_err());
        assert_eq!(failing.calls().len(), 1);
    }
}
