use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::domain::highlight::StyleKind;

/// A 24-bit colour written as `#RRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb {
    /// Creates a colour from its channels.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl FromStr for Rgb {
    type Err = InvalidColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidColorError(s.to_string());
        let hex = s.strip_prefix('#').ok_or_else(invalid)?;
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl TryFrom<String> for Rgb {
    type Error = InvalidColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rgb> for String {
    fn from(color: Rgb) -> Self {
        color.to_string()
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// Error returned when a colour is not of the form `#RRGGBB`.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("Invalid colour '{0}': expected #RRGGBB")]
pub struct InvalidColorError(String);

/// The foreground colour used for each [`StyleKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    /// Colour of tags (blue by default).
    pub tag: Rgb,
    /// Colour of attributes (orange by default).
    pub attribute: Rgb,
    /// Colour of comments (green by default).
    pub comment: Rgb,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            tag: Rgb::new(0x5F, 0xC8, 0xFD),
            attribute: Rgb::new(0xFF, 0x8D, 0x54),
            comment: Rgb::new(0x66, 0xDF, 0x66),
        }
    }
}

impl Palette {
    /// Returns the colour for a style.
    #[must_use]
    pub const fn color(&self, kind: StyleKind) -> Rgb {
        match kind {
            StyleKind::Tag => self.tag,
            StyleKind::Attribute => self.attribute,
            StyleKind::Comment => self.comment,
        }
    }
}
