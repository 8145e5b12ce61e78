//! Native-resolution export compositor.
//!
//! The preview shows the photo contain-fitted (letterboxed) inside a
//! fixed-size container and the overlay placed in that display space. The
//! export redraws the same scene on a canvas the size of the photo itself.
//!
//! # Algorithm
//!
//! 1. Allocate a `W x H` canvas and copy the photo onto it
//! 2. Contain-fit the photo into the container to find its displayed size
//! 3. `scale_x = W / displayed_w`, `scale_y = H / displayed_h`
//! 4. Place the overlay with [`placement_matrix`] at origin `(W/2, H/2)`,
//!    converting the display offset per axis with `(scale_x, scale_y)`
//! 5. Draw the overlay `overlay_width * scale_x` wide, height from its own
//!    aspect ratio, centered on the transformed origin
//!
//! The user's zoom (`Transform::scale`) stays uniform; only the translation
//! and the nominal overlay width go through the display-to-native ratio.

mod draw;
mod job;

pub use job::{ExportJob, ExportResult, EXPORT_MIME_TYPE};

use log::debug;

use crate::config::EditorConfig;
use crate::decode::DecodedImage;
use crate::error::{EditorError, MissingKind};
use crate::geometry::{placement_matrix, Affine, ScaleRatio, Size};
use crate::preview::overlay_element_size;
use crate::transform::Transform;

/// Native-space drawing instructions for one export.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawPlan {
    /// Photo size as rendered inside the container (letterboxed)
    pub displayed: Size,
    /// Display-to-native conversion per axis
    pub ratio: ScaleRatio,
    /// Overlay placement on the native canvas (origin = overlay center)
    pub placement: Affine,
    /// Overlay size on the native canvas before the user's zoom
    pub overlay_size: Size,
}

/// Flattens a photo and an overlay into one native-resolution raster.
#[derive(Debug, Clone, Copy)]
pub struct ExportCompositor {
    overlay_width: f64,
}

impl Default for ExportCompositor {
    fn default() -> Self {
        Self::new(&EditorConfig::default())
    }
}

impl ExportCompositor {
    pub fn new(config: &EditorConfig) -> Self {
        Self {
            overlay_width: config.overlay_display_width,
        }
    }

    /// Compute where and how large the overlay is drawn on the native canvas.
    ///
    /// `transform` should already have seasonal flip suppression applied.
    pub fn plan(
        &self,
        native: Size,
        overlay_intrinsic: Size,
        transform: &Transform,
        display_rect: Size,
    ) -> DrawPlan {
        let ratio = ScaleRatio::display_to_native(native, display_rect);
        let displayed = Size::new(native.width / ratio.x, native.height / ratio.y);
        let placement = placement_matrix(transform, native.center(), ratio);
        let overlay_size =
            overlay_element_size(self.overlay_width * ratio.x, overlay_intrinsic);

        DrawPlan {
            displayed,
            ratio,
            placement,
            overlay_size,
        }
    }

    /// Flatten `base` and `overlay` into a new raster the size of `base`.
    ///
    /// # Errors
    ///
    /// `MissingInput` if the container is degenerate, `RenderContextUnavailable`
    /// if the canvas cannot be allocated.
    pub fn composite(
        &self,
        base: &DecodedImage,
        overlay: &DecodedImage,
        transform: &Transform,
        display_rect: Size,
    ) -> Result<DecodedImage, EditorError> {
        self.composite_at(
            (base.width, base.height),
            base,
            overlay,
            transform,
            display_rect,
        )
    }

    /// Like [`composite`](Self::composite) but with an explicit canvas size.
    ///
    /// The base is stretched to the canvas when its decoded size differs.
    pub fn composite_at(
        &self,
        (width, height): (u32, u32),
        base: &DecodedImage,
        overlay: &DecodedImage,
        transform: &Transform,
        display_rect: Size,
    ) -> Result<DecodedImage, EditorError> {
        if !display_rect.is_positive() {
            return Err(EditorError::MissingInput(MissingKind::Container));
        }

        let mut canvas = draw::allocate_canvas(width, height)?;
        draw::draw_base(&mut canvas, base);

        let native = Size::from_pixels(width, height);
        let overlay_intrinsic = Size::from_pixels(overlay.width, overlay.height);
        let plan = self.plan(native, overlay_intrinsic, transform, display_rect);
        debug!(
            "compositing {}x{}: ratio ({}, {}), overlay {}x{}",
            width,
            height,
            plan.ratio.x,
            plan.ratio.y,
            plan.overlay_size.width,
            plan.overlay_size.height
        );

        draw::draw_overlay(&mut canvas, overlay, &plan.placement, plan.overlay_size);
        Ok(canvas)
    }
}
