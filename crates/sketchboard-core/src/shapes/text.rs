//! Single-line text shape.

use crate::color::Color;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Line height as a multiple of the font size.
pub const LINE_HEIGHT_FACTOR: f64 = 1.2;

/// Named font weights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightKeyword {
    Normal,
    Bold,
}

/// Font weight: either a CSS keyword or a numeric weight (100..=900).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FontWeight {
    Numeric(u16),
    Keyword(WeightKeyword),
}

impl Default for FontWeight {
    fn default() -> Self {
        FontWeight::Keyword(WeightKeyword::Normal)
    }
}

impl fmt::Display for FontWeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FontWeight::Numeric(w) => write!(f, "{w}"),
            FontWeight::Keyword(WeightKeyword::Normal) => f.write_str("normal"),
            FontWeight::Keyword(WeightKeyword::Bold) => f.write_str("bold"),
        }
    }
}

/// Horizontal alignment relative to the object position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// A single line of text. `width` is advisory: it sizes the bounding box but
/// the text is never wrapped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Text {
    pub text: String,
    pub font_family: String,
    pub font_size: f64,
    #[serde(default)]
    pub font_weight: FontWeight,
    pub color: Color,
    #[serde(default)]
    pub align: TextAlign,
    pub width: f64,
}

impl Text {
    pub fn new(text: impl Into<String>, font_size: f64, width: f64) -> Self {
        Self {
            text: text.into(),
            font_family: "sans-serif".to_string(),
            font_size,
            font_weight: FontWeight::default(),
            color: Color::white(),
            align: TextAlign::Left,
            width,
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_font(mut self, family: impl Into<String>, weight: FontWeight) -> Self {
        self.font_family = family.into();
        self.font_weight = weight;
        self
    }

    pub fn with_align(mut self, align: TextAlign) -> Self {
        self.align = align;
        self
    }

    /// Height of the single text line.
    pub fn line_height(&self) -> f64 {
        self.font_size * LINE_HEIGHT_FACTOR
    }

    /// CSS-style font shorthand: `"<weight> <size>px <family>"`.
    pub fn font(&self) -> String {
        format!("{} {}px {}", self.font_weight, self.font_size, self.font_family)
    }
}

/// Partial update of a text object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextPatch {
    pub text: Option<String>,
    pub font_family: Option<String>,
    pub font_size: Option<f64>,
    pub font_weight: Option<FontWeight>,
    pub color: Option<Color>,
    pub align: Option<TextAlign>,
    pub width: Option<f64>,
}

impl TextPatch {
    pub(crate) fn apply(&self, text: &mut Text) {
        if let Some(value) = &self.text {
            text.text = value.clone();
        }
        if let Some(family) = &self.font_family {
            text.font_family = family.clone();
        }
        if let Some(size) = self.font_size {
            text.font_size = size;
        }
        if let Some(weight) = self.font_weight {
            text.font_weight = weight;
        }
        if let Some(color) = &self.color {
            text.color = color.clone();
        }
        if let Some(align) = self.align {
            text.align = align;
        }
        if let Some(width) = self.width {
            text.width = width;
        }
    }
}
