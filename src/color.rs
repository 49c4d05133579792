//! ARGB color value and its `0xAARRGGBB` hex token encoding.
//!
//! The token is what the settings file stores and what the `borders` tool
//! accepts on its command line, so both sides share this one codec.

use std::fmt;
use std::str::FromStr;

use crossterm::style::{self, Stylize};

use crate::error::CodecError;

/// Prefix every hex token starts with.
pub const HEX_PREFIX: &str = "0x";
/// Total token length: prefix plus two digits per channel.
pub const HEX_TOKEN_LEN: usize = 10;

/// Color with four 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub a: u8,
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self { a, r, g, b }
    }

    /// Fully opaque color from red/green/blue.
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(0xff, r, g, b)
    }

    /// Narrow 16-bit channels (as handed out by generic picker widgets) to
    /// 8 bits by keeping the high byte.
    pub fn from_rgba16(r: u16, g: u16, b: u16, a: u16) -> Self {
        Self {
            a: (a >> 8) as u8,
            r: (r >> 8) as u8,
            g: (g >> 8) as u8,
            b: (b >> 8) as u8,
        }
    }

    /// Encode as `0xAARRGGBB` with lowercase digits.
    pub fn to_hex(self) -> String {
        format!(
            "{HEX_PREFIX}{:02x}{:02x}{:02x}{:02x}",
            self.a, self.r, self.g, self.b
        )
    }

    /// Decode a `0xAARRGGBB` token.
    pub fn from_hex(token: &str) -> Result<Self, CodecError> {
        if token.len() != HEX_TOKEN_LEN || !token.starts_with(HEX_PREFIX) {
            return Err(CodecError::Format(token.to_string()));
        }
        let digits = &token[HEX_PREFIX.len()..];
        // from_str_radix tolerates a leading '+', which is not a hex digit.
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(CodecError::Parse(token.to_string()));
        }
        let value =
            u32::from_str_radix(digits, 16).map_err(|_| CodecError::Parse(token.to_string()))?;
        let [a, r, g, b] = value.to_be_bytes();
        Ok(Self { a, r, g, b })
    }

    /// Render a small true-color block for terminal previews.
    ///
    /// Alpha is ignored; terminals cannot blend.
    pub fn swatch(self, color: bool) -> String {
        if !color {
            return String::new();
        }
        "      "
            .on(style::Color::Rgb {
                r: self.r,
                g: self.g,
                b: self.b,
            })
            .to_string()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Color {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}
