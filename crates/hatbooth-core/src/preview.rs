//! Live preview transform.
//!
//! Maps the placement state to the visual transform of the overlay element
//! inside the preview container. The element is laid out at a nominal width
//! (100 display pixels by default) with its height following the overlay's
//! intrinsic aspect ratio, centered on the container, then transformed with
//! the same pipeline the export uses ([`placement_matrix`]) at identity
//! display-to-native ratio.

use crate::config::EditorConfig;
use crate::geometry::{placement_matrix, Affine, Position, ScaleRatio, Size};
use crate::transform::Transform;

/// Display-space transform of the overlay element.
#[derive(Debug, Clone, PartialEq)]
pub struct VisualTransform {
    /// Laid-out size of the overlay element before transformation
    pub element_size: Size,
    /// Placement relative to the container center
    pub placement: Transform,
}

impl VisualTransform {
    /// Matrix mapping element-local coordinates (origin at the element
    /// center) into container coordinates (origin at the top-left corner).
    pub fn matrix(&self, container: Size) -> Affine {
        placement_matrix(&self.placement, container.center(), ScaleRatio::IDENTITY)
    }

    /// Corners of the transformed element in container coordinates,
    /// clockwise from the element's own top-left.
    pub fn corners(&self, container: Size) -> [Position; 4] {
        let m = self.matrix(container);
        let hw = self.element_size.width / 2.0;
        let hh = self.element_size.height / 2.0;
        [
            m.apply(Position::new(-hw, -hh)),
            m.apply(Position::new(hw, -hh)),
            m.apply(Position::new(hw, hh)),
            m.apply(Position::new(-hw, hh)),
        ]
    }

    /// Whether a container-space point falls on the overlay element.
    pub fn hit_test(&self, container: Size, point: Position) -> bool {
        let Some(inverse) = self.matrix(container).invert() else {
            return false;
        };
        let local = inverse.apply(point);
        local.x.abs() <= self.element_size.width / 2.0
            && local.y.abs() <= self.element_size.height / 2.0
    }

    /// CSS `transform` value for an element absolutely positioned at
    /// `top: 50%; left: 50%` of the container.
    pub fn to_css(&self) -> String {
        let t = &self.placement;
        let flip = if t.flip_horizontal { -1.0 } else { 1.0 };
        format!(
            "translate(-50%, -50%) translate({}px, {}px) rotate({}deg) scale({}, {})",
            t.position.x,
            t.position.y,
            t.rotation_degrees,
            t.scale * flip,
            t.scale
        )
    }
}

/// Computes [`VisualTransform`]s for the preview.
#[derive(Debug, Clone, Copy)]
pub struct PreviewRenderer {
    overlay_width: f64,
}

impl Default for PreviewRenderer {
    fn default() -> Self {
        Self::new(&EditorConfig::default())
    }
}

impl PreviewRenderer {
    pub fn new(config: &EditorConfig) -> Self {
        Self {
            overlay_width: config.overlay_display_width,
        }
    }

    /// Lay out the overlay for the given placement.
    pub fn render(&self, transform: &Transform, overlay_intrinsic: Size) -> VisualTransform {
        VisualTransform {
            element_size: overlay_element_size(self.overlay_width, overlay_intrinsic),
            placement: *transform,
        }
    }
}

/// Size of an overlay drawn at `width`, height following the intrinsic aspect.
///
/// Degenerate intrinsic sizes fall back to a square element.
pub(crate) fn overlay_element_size(width: f64, intrinsic: Size) -> Size {
    if intrinsic.is_positive() {
        Size::new(width, width * intrinsic.height / intrinsic.width)
    } else {
        Size::new(width, width)
    }
}
