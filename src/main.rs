//! CLI entry point for border-picker.

mod cli;

use std::io::IsTerminal;
use std::sync::Arc;
use std::time::Duration;

use border_picker::borders::BorderApplier;
use border_picker::controller::{ApplyWorker, CycleReport, SettingsController};
use border_picker::error::PickerError;
use border_picker::settings::{load_with_defaults, Settings, SettingsStore};
use clap::Parser;
use cli::{Command, Event};
use crossterm::style::Stylize;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::warn;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter directive.
const LOG_ENV: &str = "BORDER_PICKER_LOG";

#[tokio::main]
async fn main() {
    let args = cli::Args::parse();
    init_logging();

    match run(args).await {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Run one command. `Ok(false)` means the command finished but the border
/// tool or the settings file reported a failure (already logged).
async fn run(args: cli::Args) -> Result<bool, PickerError> {
    let color = !args.no_color && std::io::stdout().is_terminal();
    let store = SettingsStore::from_env();
    let settings = load_with_defaults(&store, Settings::default());
    let tool = Arc::new(BorderApplier::with_program(args.borders_bin));
    let mut controller = SettingsController::new(settings, store, tool);

    let report = match args.command.unwrap_or(Command::Show) {
        Command::Show => {
            print_settings(&settings_path(controller.store()), &settings, color);
            return Ok(true);
        }
        Command::Set {
            active,
            inactive,
            width,
        } => {
            let next = Settings {
                active_color: active.unwrap_or(settings.active_color),
                inactive_color: inactive.unwrap_or(settings.inactive_color),
                border_width: width.unwrap_or(settings.border_width),
            };
            controller.replace(next).await
        }
        Command::Apply => controller.sync().await,
        Command::Reset => controller.replace(Settings::default()).await,
        Command::Interactive { debounce_ms } => {
            return run_interactive(controller, Duration::from_millis(debounce_ms), color).await;
        }
    };

    print_report(&controller.settings(), report);
    Ok(report.is_clean())
}

/// Feed stdin events to a background worker until EOF or `quit`.
async fn run_interactive(
    controller: SettingsController,
    debounce: Duration,
    color: bool,
) -> Result<bool, PickerError> {
    let path = settings_path(controller.store());
    print_settings(&path, &controller.settings(), color);
    eprintln!("{}", cli::INTERACTIVE_HELP);

    let worker = ApplyWorker::spawn(controller, debounce);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let event = match cli::parse_event(&line) {
            Ok(Some(event)) => event,
            Ok(None) => continue,
            Err(msg) => {
                eprintln!("{msg}");
                continue;
            }
        };
        let mut next = worker.latest();
        match event {
            Event::Active(c) => next.active_color = c,
            Event::Inactive(c) => next.inactive_color = c,
            Event::Width(w) => next.border_width = w,
            Event::Show => {
                print_settings(&path, &next, color);
                continue;
            }
            Event::Quit => break,
        }
        worker.submit(next);
    }

    match worker.shutdown().await {
        Ok(controller) => print_settings(&path, &controller.settings(), color),
        Err(err) => warn!(error = %err, "apply worker stopped unexpectedly"),
    }
    Ok(true)
}

/// Path to show the user. Without a home directory saves keep failing, but
/// viewing and applying still work.
fn settings_path(store: &SettingsStore) -> String {
    if let Err(err) = store.path() {
        warn!(error = %err, "settings will not be saved");
    }
    store.display_path()
}

fn print_settings(path: &str, settings: &Settings, color: bool) {
    let label = |text: &str| {
        if color {
            format!("{text:<15}").bold().to_string()
        } else {
            format!("{text:<15}")
        }
    };
    println!("{}{path}", label("config"));
    println!(
        "{}{} {}",
        label("active_color"),
        settings.active_color,
        settings.active_color.swatch(color)
    );
    println!(
        "{}{} {}",
        label("inactive_color"),
        settings.inactive_color,
        settings.inactive_color.swatch(color)
    );
    println!("{}{}", label("border_width"), settings.width_label());
}

fn print_report(settings: &Settings, report: CycleReport) {
    println!(
        "active_color={} inactive_color={} width={} (applied: {}, saved: {})",
        settings.active_color,
        settings.inactive_color,
        settings.width_label(),
        yes_no(report.applied),
        yes_no(report.saved),
    );
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}
