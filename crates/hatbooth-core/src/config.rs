//! Editor tunables.
//!
//! Every constant that shapes editing or export behavior lives in
//! [`EditorConfig`]. The defaults reproduce the stock editor; hosts may
//! override any subset through serde (missing fields fall back to defaults).

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Degrees added or removed by one rotate command.
pub const DEFAULT_ROTATION_STEP_DEGREES: f64 = 15.0;
/// Multiplier applied by one scale-up command.
pub const DEFAULT_SCALE_UP_FACTOR: f64 = 1.1;
/// Multiplier applied by one scale-down command.
pub const DEFAULT_SCALE_DOWN_FACTOR: f64 = 0.9;
/// Smallest allowed overlay scale.
pub const DEFAULT_MIN_SCALE: f64 = 0.1;
/// Largest allowed overlay scale.
pub const DEFAULT_MAX_SCALE: f64 = 7.0;
/// Width of the overlay element in display pixels at scale 1.
pub const DEFAULT_OVERLAY_WIDTH: f64 = 100.0;
/// How long a status notification stays visible.
pub const DEFAULT_NOTIFICATION_WINDOW_MS: f64 = 1000.0;
/// File name offered for the exported artifact.
pub const DEFAULT_EXPORT_FILE_NAME: &str = "you-are-a-partner-now.png";

/// Errors reported by [`EditorConfig::validate`].
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Scale bounds are inverted: min ({min}) must be below max ({max})")]
    InvertedScaleBounds { min: f64, max: f64 },

    #[error("Invalid value for {field}: {value}")]
    NonPositive { field: &'static str, value: f64 },

    #[error("Export file name must not be empty")]
    EmptyFileName,
}

/// Configuration for an editing session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Rotation step in degrees
    pub rotation_step_degrees: f64,
    /// Scale multiplier for "up"
    pub scale_up_factor: f64,
    /// Scale multiplier for "down"
    pub scale_down_factor: f64,
    /// Lower scale bound (inclusive)
    pub min_scale: f64,
    /// Upper scale bound (inclusive)
    pub max_scale: f64,
    /// Nominal overlay width in display pixels
    pub overlay_display_width: f64,
    /// Notification auto-dismiss window in milliseconds
    pub notification_window_ms: f64,
    /// Download name of the exported PNG
    pub export_file_name: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            rotation_step_degrees: DEFAULT_ROTATION_STEP_DEGREES,
            scale_up_factor: DEFAULT_SCALE_UP_FACTOR,
            scale_down_factor: DEFAULT_SCALE_DOWN_FACTOR,
            min_scale: DEFAULT_MIN_SCALE,
            max_scale: DEFAULT_MAX_SCALE,
            overlay_display_width: DEFAULT_OVERLAY_WIDTH,
            notification_window_ms: DEFAULT_NOTIFICATION_WINDOW_MS,
            export_file_name: DEFAULT_EXPORT_FILE_NAME.to_string(),
        }
    }
}

impl EditorConfig {
    /// Check the configuration for values that would break the editor.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("rotation_step_degrees", self.rotation_step_degrees),
            ("scale_up_factor", self.scale_up_factor),
            ("scale_down_factor", self.scale_down_factor),
            ("min_scale", self.min_scale),
            ("max_scale", self.max_scale),
            ("overlay_display_width", self.overlay_display_width),
            ("notification_window_ms", self.notification_window_ms),
        ];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::NonPositive { field, value });
            }
        }

        if self.min_scale >= self.max_scale {
            return Err(ConfigError::InvertedScaleBounds {
                min: self.min_scale,
                max: self.max_scale,
            });
        }

        if self.export_file_name.trim().is_empty() {
            return Err(ConfigError::EmptyFileName);
        }

        Ok(())
    }
}
