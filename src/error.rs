//! Unified error types for the picker core.

use std::fmt;

// ---------------------------------------------------------------------------
// CodecError
// ---------------------------------------------------------------------------

/// Errors when decoding a `0xAARRGGBB` hex token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Wrong length or missing `0x` prefix.
    Format(String),
    /// The eight digits after the prefix are not valid hexadecimal.
    Parse(String),
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Format(token) => write!(f, "invalid color format: {token}"),
            Self::Parse(token) => write!(f, "invalid hex digits in color: {token}"),
        }
    }
}

impl std::error::Error for CodecError {}

// ---------------------------------------------------------------------------
// StoreError
// ---------------------------------------------------------------------------

/// Errors when loading or saving the settings file.
#[derive(Debug)]
pub enum StoreError {
    /// The user's home directory could not be determined.
    PathResolution,
    Io(std::io::Error),
    /// Malformed JSON, mismatched field types, or a failed serialization.
    Parse(serde_json::Error),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PathResolution => write!(f, "unable to resolve home directory"),
            Self::Io(e) => write!(f, "io: {e}"),
            Self::Parse(e) => write!(f, "json: {e}"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::PathResolution => None,
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e)
    }
}

// ---------------------------------------------------------------------------
// ApplyError
// ---------------------------------------------------------------------------

/// Errors from running the external border tool.
///
/// A missing executable and a non-zero exit are reported the same way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplyError {
    ExternalTool(String),
}

impl fmt::Display for ApplyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExternalTool(msg) => write!(f, "external tool failed: {msg}"),
        }
    }
}

impl std::error::Error for ApplyError {}

// ---------------------------------------------------------------------------
// PickerError
// ---------------------------------------------------------------------------

/// Top-level error type surfaced by the command-line front end.
#[derive(Debug)]
pub enum PickerError {
    Codec(CodecError),
    Store(StoreError),
    Apply(ApplyError),
    /// Terminal input/output failed.
    Io(std::io::Error),
}

impl fmt::Display for PickerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Codec(e) => write!(f, "color: {e}"),
            Self::Store(e) => write!(f, "settings: {e}"),
            Self::Apply(e) => write!(f, "borders: {e}"),
            Self::Io(e) => write!(f, "io: {e}"),
        }
    }
}

impl std::error::Error for PickerError {}

impl From<CodecError> for PickerError {
    fn from(e: CodecError) -> Self {
        Self::Codec(e)
    }
}

impl From<StoreError> for PickerError {
    fn from(e: StoreError) -> Self {
        Self::Store(e)
    }
}

impl From<ApplyError> for PickerError {
    fn from(e: ApplyError) -> Self {
        Self::Apply(e)
    }
}

impl From<std::io::Error> for PickerError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
