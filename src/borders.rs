//! Invocation of the external `borders` tool.
//!
//! The tool is resolved through `PATH` and receives three `key=value`
//! arguments. Its output is discarded; only the exit status matters.

use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, info};

use crate::color::Color;
use crate::error::ApplyError;
use crate::settings::Settings;

/// Executable name looked up on `PATH` by default.
pub const DEFAULT_BORDERS_BIN: &str = "borders";

/// Something that can push settings to the window manager.
///
/// [`BorderApplier`] is the real implementation; tests substitute recorders.
#[async_trait]
pub trait BorderTool: Send + Sync {
    /// Apply `settings`, returning once the change is complete.
    async fn apply(&self, settings: &Settings) -> Result<(), ApplyError>;
}

/// Command-line arguments for one `borders` invocation.
pub fn border_args(active: Color, inactive: Color, width: f64) -> [String; 3] {
    [
        format!("active_color={}", active.to_hex()),
        format!("inactive_color={}", inactive.to_hex()),
        format!("width={width:.1}"),
    ]
}

/// Runs the `borders` executable once per apply and waits for it to exit.
#[derive(Debug, Clone)]
pub struct BorderApplier {
    program: String,
}

impl Default for BorderApplier {
    fn default() -> Self {
        Self::new()
    }
}

impl BorderApplier {
    pub fn new() -> Self {
        Self::with_program(DEFAULT_BORDERS_BIN)
    }

    /// Use a different executable name or path.
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Run the tool with explicit colors and width.
    pub async fn apply_values(
        &self,
        active: Color,
        inactive: Color,
        width: f64,
    ) -> Result<(), ApplyError> {
        let args = border_args(active, inactive, width);
        debug!(program = %self.program, ?args, "running border tool");

        let status = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .map_err(|err| ApplyError::ExternalTool(format!("{}: {err}", self.program)))?;
        if !status.success() {
            return Err(ApplyError::ExternalTool(format!(
                "{}: {status}",
                self.program
            )));
        }

        info!("updated borders with {}", args.join(", "));
        Ok(())
    }
}

#[async_trait]
impl BorderTool for BorderApplier {
    async fn apply(&self, settings: &Settings) -> Result<(), ApplyError> {
        self.apply_values(
            settings.active_color,
            settings.inactive_color,
            settings.border_width,
        )
        .await
    }
}
