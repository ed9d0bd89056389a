//! Validated hex color values.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Color construction errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    #[error("Invalid color: {0}")]
    Invalid(String),
}

/// A color in CSS hex notation: `#rgb`, `#rgba`, `#rrggbb` or `#rrggbbaa`.
///
/// The original string is kept verbatim so boards round-trip through JSON
/// unchanged. Construction fails on anything else; there is no coercion.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color(String);

impl Color {
    /// Parse and validate a hex color string.
    pub fn new(value: impl Into<String>) -> Result<Self, ColorError> {
        let value = value.into();
        let valid = value.strip_prefix('#').is_some_and(|hex| {
            matches!(hex.len(), 3 | 4 | 6 | 8) && hex.chars().all(|c| c.is_ascii_hexdigit())
        });
        if valid {
            Ok(Self(value))
        } else {
            Err(ColorError::Invalid(value))
        }
    }

    pub fn black() -> Self {
        Self("#000000".to_string())
    }

    pub fn white() -> Self {
        Self("#ffffff".to_string())
    }

    /// The color exactly as it was written.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// RGBA components. Short forms expand each digit (`#f80` == `#ff8800`),
    /// forms without alpha are fully opaque.
    pub fn to_rgba8(&self) -> [u8; 4] {
        let hex = &self.0[1..];
        // Validated at construction: every char is an ASCII hex digit.
        let nibble = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).unwrap_or(0);
        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).unwrap_or(0);
        match hex.len() {
            3 => [nibble(0) * 17, nibble(1) * 17, nibble(2) * 17, 255],
            4 => [nibble(0) * 17, nibble(1) * 17, nibble(2) * 17, nibble(3) * 17],
            6 => [byte(0), byte(2), byte(4), 255],
            _ => [byte(0), byte(2), byte(4), byte(6)],
        }
    }

    /// Convert to a peniko color for drawing.
    pub fn to_peniko(&self) -> peniko::Color {
        let [r, g, b, a] = self.to_rgba8();
        peniko::Color::from_rgba8(r, g, b, a)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Color {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Color {
    type Error = ColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for Color {
    type Error = ColorError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.0
    }
}

impl From<&Color> for peniko::Color {
    fn from(color: &Color) -> Self {
        color.to_peniko()
    }
}
