//! Editor tunables.

use crate::camera::ZoomLimits;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid zoom range: {min} to {max}")]
    InvalidZoomRange { min: f64, max: f64 },
}

/// Zoom, wheel and history settings. Missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorConfig {
    pub min_zoom: f64,
    pub max_zoom: f64,
    /// Zoom factor for a ctrl+wheel step towards the screen.
    pub wheel_zoom_in: f64,
    pub wheel_zoom_out: f64,
    /// Screen pixels panned per unit of wheel delta.
    pub wheel_pan_speed: f64,
    /// Maximum undo entries; unlimited when absent.
    pub history_limit: Option<usize>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        let limits = ZoomLimits::default();
        Self {
            min_zoom: limits.min_zoom,
            max_zoom: limits.max_zoom,
            wheel_zoom_in: 1.1,
            wheel_zoom_out: 0.9,
            wheel_pan_speed: 10.0,
            history_limit: None,
        }
    }
}

impl EditorConfig {
    pub fn zoom_limits(&self) -> ZoomLimits {
        ZoomLimits {
            min_zoom: self.min_zoom,
            max_zoom: self.max_zoom,
        }
    }

    /// Check that the zoom range is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.zoom_limits().is_valid() {
            return Err(ConfigError::InvalidZoomRange {
                min: self.min_zoom,
                max: self.max_zoom,
            });
        }
        Ok(())
    }

    /// Parse and validate a JSON config.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: EditorConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}
