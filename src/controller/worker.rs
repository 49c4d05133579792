//! Background apply/save loop.
//!
//! The event side only records the newest desired settings; the worker task
//! wakes up, waits out the debounce window so a burst of slider events
//! collapses into one `borders` run, and syncs whatever is latest.

use std::time::Duration;

use tokio::sync::watch;
use tokio::task::{JoinError, JoinHandle};
use tracing::debug;

use crate::settings::Settings;

use super::SettingsController;

/// Default coalescing window for bursts of changes.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(150);

/// Handle to a spawned apply/save task.
pub struct ApplyWorker {
    tx: watch::Sender<Settings>,
    handle: JoinHandle<SettingsController>,
}

impl ApplyWorker {
    /// Move `controller` onto a background task.
    pub fn spawn(controller: SettingsController, debounce: Duration) -> Self {
        let (tx, rx) = watch::channel(controller.settings());
        let handle = tokio::spawn(run(controller, rx, debounce));
        Self { tx, handle }
    }

    /// Record `settings` as the newest desired state. Never blocks.
    pub fn submit(&self, settings: Settings) {
        self.tx.send_replace(settings);
    }

    /// Most recently submitted settings (may not be applied yet).
    pub fn latest(&self) -> Settings {
        *self.tx.borrow()
    }

    /// Stop accepting changes, let the last one finish, and hand back the
    /// controller.
    pub async fn shutdown(self) -> Result<SettingsController, JoinError> {
        drop(self.tx);
        self.handle.await
    }
}

async fn run(
    mut controller: SettingsController,
    mut rx: watch::Receiver<Settings>,
    debounce: Duration,
) -> SettingsController {
    // `changed` still reports a value sent just before the sender dropped.
    while rx.changed().await.is_ok() {
        if !debounce.is_zero() {
            tokio::time::sleep(debounce).await;
        }
        let latest = *rx.borrow_and_update();
        debug!(width = latest.border_width, "syncing latest submitted settings");
        controller.replace(latest).await;
    }
    controller
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::settings::SettingsStore;
    use crate::testsupport::{RecordingTool, TestTempDir};
    use std::sync::Arc;

    fn spawn_worker(tmp: &TestTempDir, tool: Arc<RecordingTool>, debounce: Duration) -> ApplyWorker {
        let controller = SettingsController::new(
            Settings::default(),
            SettingsStore::with_home(tmp.path()),
            tool,
        );
        ApplyWorker::spawn(controller, debounce)
    }

    fn with_width(width: f64) -> Settings {
        Settings {
            border_width: width,
            ..Settings::default()
        }
    }

    #[tokio::test]
    async fn burst_is_coalesced_to_latest() {
        let tmp = TestTempDir::new("worker-burst");
        let tool = Arc::new(RecordingTool::default());
        let worker = spawn_worker(&tmp, tool.clone(), Duration::from_millis(50));

        for step in 1..=10 {
            worker.submit(with_width(step as f64));
        }
        assert_eq!(worker.latest().border_width, 10.0);

        let controller = worker.shutdown().await.expect("join");
        assert_eq!(controller.settings().border_width, 10.0);

        let calls = tool.calls();
        assert_eq!(calls.len(), 1, "calls: {calls:?}");
        assert_eq!(calls[0].border_width, 10.0);

        let stored = controller.store().load().expect("load");
        assert_eq!(stored.border_width, 10.0);
    }

    #[tokio::test]
    async fn submission_right_before_shutdown_is_applied() {
        let tmp = TestTempDir::new("worker-shutdown");
        let tool = Arc::new(RecordingTool::default());
        let worker = spawn_worker(&tmp, tool.clone(), Duration::ZERO);

        let blue = Color::opaque(0, 0, 0xff);
        worker.submit(Settings {
            active_color: blue,
            ..Settings::default()
        });
        let controller = worker.shutdown().await.expect("join");

        assert_eq!(controller.settings().active_color, blue);
        assert_eq!(tool.calls().last().map(|s| s.active_color), Some(blue));
    }

    #[tokio::test]
    async fn spaced_changes_each_sync() {
        let tmp = TestTempDir::new("worker-spaced");
        let tool = Arc::new(RecordingTool::default());
        let worker = spawn_worker(&tmp, tool.clone(), Duration::ZERO);

        worker.submit(with_width(1.0));
        tool.wait_for_calls(1).await;
        worker.submit(with_width(2.0));
        tool.wait_for_calls(2).await;

        worker.shutdown().await.expect("join");
        let widths: Vec<f64> = tool.calls().iter().map(|s| s.border_width).collect();
        assert_eq!(widths, vec![1.0, 2.0]);
    }

    #[tokio::test]
    async fn resubmitting_current_settings_still_syncs() {
        let tmp = TestTempDir::new("worker-same");
        let tool = Arc::new(RecordingTool::default());
        let worker = spawn_worker(&tmp, tool.clone(), Duration::ZERO);

        worker.submit(Settings::default());
        let controller = worker.shutdown().await.expect("join");

        assert_eq!(tool.calls(), vec![Settings::default()]);
        let stored = controller.store().load().expect("settings written");
        assert_eq!(stored.resolve(&Settings::default()), Settings::default());
    }

    #[tokio::test]
    async fn change_during_running_sync_is_applied_next() {
        let tmp = TestTempDir::new("worker-in-flight");
        let tool = Arc::new(RecordingTool::slow(Duration::from_millis(50)));
        let worker = spawn_worker(&tmp, tool.clone(), Duration::ZERO);

        worker.submit(with_width(1.0));
        tool.wait_for_calls(1).await;
        // The first apply is still sleeping inside the tool.
        worker.submit(with_width(2.0));
        let controller = worker.shutdown().await.expect("join");

        let widths: Vec<f64> = tool.calls().iter().map(|s| s.border_width).collect();
        assert_eq!(widths, vec![1.0, 2.0]);
        assert_eq!(controller.settings().border_width, 2.0);
        let stored = controller.store().load().expect("load");
        assert_eq!(stored.border_width, 2.0);
    }

    #[tokio::test]
    async fn unresolvable_home_keeps_applying() {
        let tool = Arc::new(RecordingTool::default());
        let controller = SettingsController::new(
            Settings::default(),
            SettingsStore::without_home(),
            tool.clone(),
        );
        let worker = ApplyWorker::spawn(controller, Duration::ZERO);

        worker.submit(with_width(4.0));
        tool.wait_for_calls(1).await;
        worker.submit(with_width(5.0));
        let controller = worker.shutdown().await.expect("join");

        assert_eq!(controller.settings().border_width, 5.0);
        assert_eq!(tool.calls().last().map(|s| s.border_width), Some(5.0));
    }

    #[tokio::test]
    async fn shutdown_without_changes_does_nothing() {
        let tmp = TestTempDir::new("worker-idle");
        let tool = Arc::new(RecordingTool::default());
        let worker = spawn_worker(&tmp, tool.clone(), DEFAULT_DEBOUNCE);

        let controller = worker.shutdown().await.expect("join");
        assert!(tool.calls().is_empty());
        assert!(controller.store().load().is_err());
    }
}
