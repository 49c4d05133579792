//! CLI argument parsing via clap, plus the line protocol of `interactive`.

use border_picker::borders::DEFAULT_BORDERS_BIN;
use border_picker::color::Color;
use border_picker::controller::DEFAULT_DEBOUNCE;
use border_picker::settings::{MAX_BORDER_WIDTH, MIN_BORDER_WIDTH};
use clap::{ArgGroup, Parser, Subcommand};

/// Pick window border colors and width, save them, and apply them with `borders`.
#[derive(Debug, Parser)]
#[command(name = "border-picker", version)]
pub struct Args {
    /// Border tool executable, looked up on PATH.
    #[arg(long = "borders-bin", global = true, default_value = DEFAULT_BORDERS_BIN)]
    pub borders_bin: String,

    /// Disable color swatches.
    #[arg(long = "no-color", global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the saved settings (the default).
    Show,
    /// Change one or more fields, then apply and save.
    #[command(group(
        ArgGroup::new("fields")
            .required(true)
            .multiple(true)
            .args(["active", "inactive", "width"])
    ))]
    Set {
        /// Focused window border color, `0xAARRGGBB`.
        #[arg(long, value_parser = parse_color)]
        active: Option<Color>,
        /// Unfocused window border color, `0xAARRGGBB`.
        #[arg(long, value_parser = parse_color)]
        inactive: Option<Color>,
        /// Border width in pixels, 0 to 20 in steps of 0.1.
        #[arg(long, value_parser = parse_width)]
        width: Option<f64>,
    },
    /// Re-apply the saved settings.
    Apply,
    /// Apply and save the built-in defaults.
    Reset,
    /// Read change events from stdin, one per line.
    Interactive {
        /// Quiet period before a burst of changes is applied.
        #[arg(long = "debounce-ms", default_value_t = DEFAULT_DEBOUNCE.as_millis() as u64)]
        debounce_ms: u64,
    },
}

/// One line of `interactive` input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    Active(Color),
    Inactive(Color),
    Width(f64),
    Show,
    Quit,
}

pub const INTERACTIVE_HELP: &str =
    "commands: active <0xAARRGGBB>, inactive <0xAARRGGBB>, width <0-20>, show, quit";

pub fn parse_color(raw: &str) -> Result<Color, String> {
    Color::from_hex(raw.trim()).map_err(|err| err.to_string())
}

/// Parse a width and snap it to the 0.1 grid of the width slider.
pub fn parse_width(raw: &str) -> Result<f64, String> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| format!("invalid width `{}`", raw.trim()))?;
    if !(MIN_BORDER_WIDTH..=MAX_BORDER_WIDTH).contains(&value) {
        return Err(format!(
            "width must be between {MIN_BORDER_WIDTH} and {MAX_BORDER_WIDTH}, got {value}"
        ));
    }
    Ok(snap_width(value))
}

fn snap_width(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Parse one interactive line. Blank lines and `#` comments yield `None`.
pub fn parse_event(line: &str) -> Result<Option<Event>, String> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };
    let event = match (verb.to_ascii_lowercase().as_str(), rest) {
        ("active", value) if !value.is_empty() => Event::Active(parse_color(value)?),
        ("inactive", value) if !value.is_empty() => Event::Inactive(parse_color(value)?),
        ("width", value) if !value.is_empty() => Event::Width(parse_width(value)?),
        ("show", "") => Event::Show,
        ("quit" | "exit", "") => Event::Quit,
        _ => return Err(format!("unrecognized input `{line}`; {INTERACTIVE_HELP}")),
    };
    Ok(Some(event))
}
