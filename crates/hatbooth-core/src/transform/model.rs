//! Overlay placement state and its validated mutators.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::config::EditorConfig;
use crate::geometry::Position;

/// Rotation command direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RotateDirection {
    /// Counter-clockwise on screen (negative degrees).
    Left,
    /// Clockwise on screen (positive degrees).
    Right,
}

/// Scale command direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScaleDirection {
    Up,
    Down,
}

/// The decorative overlay variants the editor ships with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OverlayAsset {
    /// Right-facing hat (initial selection).
    #[default]
    DefaultRight,
    /// Left-facing hat.
    DefaultLeft,
    /// Seasonal hat. Flip is disabled while it is active.
    Seasonal,
}

impl OverlayAsset {
    pub const ALL: [OverlayAsset; 3] = [
        OverlayAsset::DefaultRight,
        OverlayAsset::DefaultLeft,
        OverlayAsset::Seasonal,
    ];

    #[inline]
    pub fn is_seasonal(self) -> bool {
        matches!(self, OverlayAsset::Seasonal)
    }
}

/// Placement of the overlay in display space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    /// Offset from the container center in display pixels
    pub position: Position,
    /// Accumulated rotation in degrees, never normalized
    pub rotation_degrees: f64,
    /// Uniform zoom factor
    pub scale: f64,
    /// Mirror the overlay horizontally
    pub flip_horizontal: bool,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Position::ORIGIN,
            rotation_degrees: 0.0,
            scale: 1.0,
            flip_horizontal: false,
        }
    }
}

impl Transform {
    /// Check if all values are at their defaults
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

/// Mutable placement state plus the active overlay selection.
#[derive(Debug, Clone)]
pub struct TransformModel {
    transform: Transform,
    overlay: OverlayAsset,
    rotation_step: f64,
    scale_up: f64,
    scale_down: f64,
    min_scale: f64,
    max_scale: f64,
}

impl Default for TransformModel {
    fn default() -> Self {
        Self::new(&EditorConfig::default())
    }
}

impl TransformModel {
    /// Create a model at default placement using the given tunables.
    pub fn new(config: &EditorConfig) -> Self {
        Self {
            transform: Transform::default(),
            overlay: OverlayAsset::default(),
            rotation_step: config.rotation_step_degrees,
            scale_up: config.scale_up_factor,
            scale_down: config.scale_down_factor,
            min_scale: config.min_scale,
            max_scale: config.max_scale,
        }
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn overlay(&self) -> OverlayAsset {
        self.overlay
    }

    pub fn is_seasonal(&self) -> bool {
        self.overlay.is_seasonal()
    }

    pub fn position(&self) -> Position {
        self.transform.position
    }

    pub fn rotate(&mut self, direction: RotateDirection) {
        let delta = match direction {
            RotateDirection::Left => -self.rotation_step,
            RotateDirection::Right => self.rotation_step,
        };
        self.transform.rotation_degrees += delta;
        debug!("rotation -> {}", self.transform.rotation_degrees);
    }

    /// Multiply the scale and clamp it into the configured bounds.
    pub fn scale(&mut self, direction: ScaleDirection) {
        let factor = match direction {
            ScaleDirection::Up => self.scale_up,
            ScaleDirection::Down => self.scale_down,
        };
        self.transform.scale =
            (self.transform.scale * factor).clamp(self.min_scale, self.max_scale);
        debug!("scale -> {}", self.transform.scale);
    }

    pub fn set_position(&mut self, x: f64, y: f64) {
        self.transform.position = Position::new(x, y);
    }

    /// Flip the overlay. Ignored while the seasonal overlay is active.
    pub fn toggle_flip(&mut self) {
        if self.overlay.is_seasonal() {
            debug!("flip ignored: seasonal overlay active");
            return;
        }
        self.transform.flip_horizontal = !self.transform.flip_horizontal;
    }

    /// Enter or leave seasonal mode. Leaving falls back to the right-facing hat.
    pub fn set_seasonal(&mut self, enabled: bool) {
        self.select_overlay(if enabled {
            OverlayAsset::Seasonal
        } else {
            OverlayAsset::DefaultRight
        });
    }

    /// Switch the active overlay. Selecting the seasonal hat clears any flip.
    pub fn select_overlay(&mut self, asset: OverlayAsset) {
        self.overlay = asset;
        if asset.is_seasonal() {
            self.transform.flip_horizontal = false;
        }
        debug!("overlay -> {:?}", self.overlay);
    }

    /// Restore the default placement. The overlay selection is kept.
    pub fn reset(&mut self) {
        self.transform = Transform::default();
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
