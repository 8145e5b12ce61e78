//! Shared 2-D geometry for the preview and the export.
//!
//! The preview and the export place the overlay with the same affine
//! pipeline, [`placement_matrix`]. They differ only in where the origin sits
//! and in the display-to-native [`ScaleRatio`]: identity for the preview, the
//! letterbox-corrected ratio for the export.
//!
//! # Coordinate System
//!
//! - Y grows downward (screen and raster convention)
//! - Positive rotation angles turn clockwise on screen
//! - Matrices use the canvas layout `[a, b, c, d, e, f]`, mapping
//!   `(x, y)` to `(a*x + c*y + e, b*x + d*y + f)`

use serde::{Deserialize, Serialize};

use crate::transform::Transform;

/// A point or offset in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const ORIGIN: Position = Position { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl std::ops::Sub for Position {
    type Output = Position;

    fn sub(self, rhs: Position) -> Position {
        Position::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Width and height in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Size of a raster with integer dimensions.
    pub fn from_pixels(width: u32, height: u32) -> Self {
        Self::new(width as f64, height as f64)
    }

    /// True when both sides are finite and strictly positive.
    pub fn is_positive(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    pub fn aspect(&self) -> f64 {
        self.width / self.height
    }

    pub fn center(&self) -> Position {
        Position::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Compute the size an image occupies when contain-fitted into a container.
///
/// The image keeps its aspect ratio; one axis fills the container and the
/// other leaves a letterbox margin. When the container is relatively wider
/// than the image the height is bound, otherwise the width is bound.
///
/// Ratios are formed by cross-multiplication rather than by dividing aspect
/// values, so equal-aspect inputs produce exact results.
pub fn contain_fit(image: Size, container: Size) -> Size {
    let container_wider = container.width * image.height > image.width * container.height;
    if container_wider {
        let height = container.height;
        Size::new(height * image.width / image.height, height)
    } else {
        let width = container.width;
        Size::new(width, width * image.height / image.width)
    }
}

/// Per-axis conversion factor from display pixels to native pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleRatio {
    pub x: f64,
    pub y: f64,
}

impl ScaleRatio {
    pub const IDENTITY: ScaleRatio = ScaleRatio { x: 1.0, y: 1.0 };

    /// Ratio between a native image and its letterboxed rendering inside a
    /// display container. Both axes are computed independently.
    pub fn display_to_native(native: Size, container: Size) -> Self {
        let displayed = contain_fit(native, container);
        Self {
            x: native.width / displayed.width,
            y: native.height / displayed.height,
        }
    }
}

impl Default for ScaleRatio {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// A 2-D affine transform in canvas layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Affine {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Default for Affine {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Affine {
    pub const IDENTITY: Affine = Affine {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        e: 0.0,
        f: 0.0,
    };

    pub fn translation(tx: f64, ty: f64) -> Self {
        Self {
            e: tx,
            f: ty,
            ..Self::IDENTITY
        }
    }

    /// Append a translation in the current local frame.
    pub fn translate(self, tx: f64, ty: f64) -> Self {
        Self {
            e: self.a * tx + self.c * ty + self.e,
            f: self.b * tx + self.d * ty + self.f,
            ..self
        }
    }

    /// Append a rotation (radians, clockwise on screen) in the current local frame.
    pub fn rotate(self, radians: f64) -> Self {
        let (sin, cos) = radians.sin_cos();
        Self {
            a: self.a * cos + self.c * sin,
            b: self.b * cos + self.d * sin,
            c: self.c * cos - self.a * sin,
            d: self.d * cos - self.b * sin,
            ..self
        }
    }

    /// Append a per-axis scale in the current local frame.
    pub fn scale(self, sx: f64, sy: f64) -> Self {
        Self {
            a: self.a * sx,
            b: self.b * sx,
            c: self.c * sy,
            d: self.d * sy,
            ..self
        }
    }

    pub fn apply(&self, p: Position) -> Position {
        Position::new(
            self.a * p.x + self.c * p.y + self.e,
            self.b * p.x + self.d * p.y + self.f,
        )
    }

    pub fn determinant(&self) -> f64 {
        self.a * self.d - self.b * self.c
    }

    /// Inverse transform, or `None` when the matrix is singular.
    pub fn invert(&self) -> Option<Affine> {
        let det = self.determinant();
        if det.abs() < f64::EPSILON || !det.is_finite() {
            return None;
        }
        Some(Affine {
            a: self.d / det,
            b: -self.b / det,
            c: -self.c / det,
            d: self.a / det,
            e: (self.c * self.f - self.d * self.e) / det,
            f: (self.b * self.e - self.a * self.f) / det,
        })
    }

    /// Matrix values in `[a, b, c, d, e, f]` order.
    pub fn to_array(&self) -> [f64; 6] {
        [self.a, self.b, self.c, self.d, self.e, self.f]
    }
}

/// Build the overlay placement matrix.
///
/// Composition, each step acting in the frame left by the previous one:
/// 1. translate to `origin + position * ratio`
/// 2. rotate by the transform's rotation
/// 3. mirror the X axis when flipped
/// 4. scale uniformly by the transform's scale
///
/// The overlay is then drawn centered on the local origin of the result.
pub fn placement_matrix(transform: &Transform, origin: Position, ratio: ScaleRatio) -> Affine {
    let mut m = Affine::translation(
        origin.x + transform.position.x * ratio.x,
        origin.y + transform.position.y * ratio.y,
    )
    .rotate(transform.rotation_degrees.to_radians());

    if transform.flip_horizontal {
        m = m.scale(-1.0, 1.0);
    }

    m.scale(transform.scale, transform.scale)
}


// ============================================================================
// Property-Based Tests
// ============================================================================
