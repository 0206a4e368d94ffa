use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{TimelinePosition, ZoomLevel};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Layout metrics and initial state of a timeline widget.
///
/// All lengths are in the host's logical units (CSS pixels for a browser,
/// character cells for a terminal). Missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineConfig {
    /// Zoom controls and clock strip.
    pub toolbar_height: f64,
    /// Axis header with ticks and the cursor badge.
    pub header_height: f64,
    /// Height of one camera row.
    pub row_height: f64,
    /// Width of the camera name column left of the track.
    pub label_width: f64,
    /// Advance of one character of badge text, for sizing badges.
    pub char_width: f64,
    pub font_size: f64,
    pub initial_zoom: ZoomLevel,
    pub initial_position: TimelinePosition,
    /// Live clock refresh period while idle.
    pub clock_interval_ms: u64,
    /// Zoom levels per modifier+wheel notch.
    pub wheel_zoom_step: i64,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            toolbar_height: 24.0,
            header_height: 32.0,
            row_height: 48.0,
            label_width: 160.0,
            char_width: 6.5,
            font_size: 11.0,
            initial_zoom: ZoomLevel::MIN,
            initial_position: TimelinePosition::new(6.25),
            clock_interval_ms: 1000,
            wheel_zoom_step: 1,
        }
    }
}

impl TimelineConfig {
    /// Parse and validate a JSON config document. The document must be an
    /// object; serde would otherwise accept the fields as a positional array.
    pub fn from_json(data: &[u8]) -> Result<Self, ConfigError> {
        let fields: serde_json::Map<String, serde_json::Value> = serde_json::from_slice(data)?;
        let config: Self = serde_json::from_value(serde_json::Value::Object(fields))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let metrics = [
            ("toolbar_height", self.toolbar_height),
            ("header_height", self.header_height),
            ("row_height", self.row_height),
            ("char_width", self.char_width),
            ("font_size", self.font_size),
        ];
        for (name, value) in metrics {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }
        if !(self.label_width.is_finite() && self.label_width >= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "label_width must not be negative, got {}",
                self.label_width
            )));
        }
        if self.clock_interval_ms == 0 {
            return Err(ConfigError::Invalid(
                "clock_interval_ms must be non-zero".into(),
            ));
        }
        if self.wheel_zoom_step < 1 {
            return Err(ConfigError::Invalid(format!(
                "wheel_zoom_step must be at least 1, got {}",
                self.wheel_zoom_step
            )));
        }
        Ok(())
    }

    pub fn clock_interval(&self) -> Duration {
        Duration::from_millis(self.clock_interval_ms)
    }
}
