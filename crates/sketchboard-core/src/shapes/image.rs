//! Image shape referencing an external raster resource.

use serde::{Deserialize, Serialize};

/// An image scaled into the box `(0, 0, width, height)`.
///
/// `src` is a reference the renderer's image loader understands: a file path
/// or a `data:` URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    pub width: f64,
    pub height: f64,
    pub src: String,
}

impl Image {
    pub fn new(src: impl Into<String>, width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            src: src.into(),
        }
    }

    /// Whether the source is embedded as a data URL.
    pub fn is_embedded(&self) -> bool {
        self.src.starts_with("data:")
    }
}

/// Partial update of an image.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImagePatch {
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub src: Option<String>,
}

impl ImagePatch {
    pub(crate) fn apply(&self, image: &mut Image) {
        if let Some(width) = self.width {
            image.width = width;
        }
        if let Some(height) = self.height {
            image.height = height;
        }
        if let Some(src) = &self.src {
            image.src = src.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded() {
        assert!(Image::new("data:image/png;base64,AAAA", 1.0, 1.0).is_embedded());
        assert!(!Image::new("assets/cat.png", 1.0, 1.0).is_embedded());
    }
}
