//! Raster drawing primitives for the export canvas.
//!
//! The overlay is drawn with inverse mapping: for each canvas pixel inside
//! the overlay's transformed bounding box we compute which overlay pixel
//! lands there and sample it with bilinear interpolation.
//!
//! For a placement matrix `M` (overlay-local, origin at the overlay center)
//! the source coordinate of canvas point `p` is:
//! ```text
//! local = M⁻¹ · p
//! src_x = (local.x + draw_w / 2) * src_w / draw_w
//! src_y = (local.y + draw_h / 2) * src_h / draw_h
//! ```
//!
//! Interpolation is done on premultiplied alpha so transparent texels do not
//! bleed dark fringes into the edges. Blending is Porter-Duff source-over.

use crate::decode::DecodedImage;
use crate::error::EditorError;
use crate::geometry::{Affine, Position, Size};

/// Allocate a transparent `width x height` RGBA canvas.
///
/// Allocation failure is reported instead of aborting the process, since an
/// oversized photo must not take the session down.
pub(crate) fn allocate_canvas(width: u32, height: u32) -> Result<DecodedImage, EditorError> {
    let unavailable = EditorError::RenderContextUnavailable { width, height };

    if width == 0 || height == 0 {
        return Err(unavailable);
    }

    let len = (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(DecodedImage::CHANNELS))
        .ok_or_else(|| EditorError::RenderContextUnavailable { width, height })?;

    let mut pixels = Vec::new();
    if pixels.try_reserve_exact(len).is_err() {
        return Err(unavailable);
    }
    pixels.resize(len, 0);

    Ok(DecodedImage::new(width, height, pixels))
}

/// Copy `base` onto `canvas`, stretching it to the canvas size when the two
/// differ.
pub(crate) fn draw_base(canvas: &mut DecodedImage, base: &DecodedImage) {
    if base.width == canvas.width && base.height == canvas.height {
        canvas.pixels.copy_from_slice(&base.pixels);
        return;
    }

    match base.to_rgba_image() {
        Some(rgba) => {
            let resized = image::imageops::resize(
                &rgba,
                canvas.width,
                canvas.height,
                image::imageops::FilterType::Triangle,
            );
            canvas.pixels.copy_from_slice(resized.as_raw());
        }
        None => log::warn!(
            "base buffer does not match its {}x{} dimensions, leaving canvas blank",
            base.width,
            base.height
        ),
    }
}

/// Draw `overlay` scaled to `draw_size`, centered on the local origin of
/// `placement`.
pub(crate) fn draw_overlay(
    canvas: &mut DecodedImage,
    overlay: &DecodedImage,
    placement: &Affine,
    draw_size: Size,
) {
    if overlay.is_empty() || !draw_size.is_positive() {
        return;
    }

    // Map overlay pixel coordinates straight to canvas coordinates
    let to_canvas = placement
        .translate(-draw_size.width / 2.0, -draw_size.height / 2.0)
        .scale(
            draw_size.width / overlay.width as f64,
            draw_size.height / overlay.height as f64,
        );
    let Some(to_source) = to_canvas.invert() else {
        return;
    };

    let Some((x0, y0, x1, y1)) = canvas_bounds(&to_canvas, overlay, canvas) else {
        return;
    };

    let (src_w, src_h) = (overlay.width as f64, overlay.height as f64);
    let width = canvas.width as usize;

    for y in y0..y1 {
        for x in x0..x1 {
            // Sample at the canvas pixel center
            let src = to_source.apply(Position::new(x as f64 + 0.5, y as f64 + 0.5));
            if src.x < 0.0 || src.y < 0.0 || src.x >= src_w || src.y >= src_h {
                continue;
            }

            let texel = sample_bilinear(overlay, src.x - 0.5, src.y - 0.5);
            if texel[3] <= 0.0 {
                continue;
            }

            let idx = (y as usize * width + x as usize) * DecodedImage::CHANNELS;
            blend_source_over(&mut canvas.pixels[idx..idx + 4], texel);
        }
    }
}

/// Integer pixel range `[x0, x1) x [y0, y1)` of the canvas touched by the
/// transformed overlay, or `None` when it falls entirely outside.
fn canvas_bounds(
    to_canvas: &Affine,
    overlay: &DecodedImage,
    canvas: &DecodedImage,
) -> Option<(u32, u32, u32, u32)> {
    let (w, h) = (overlay.width as f64, overlay.height as f64);
    let corners = [
        to_canvas.apply(Position::new(0.0, 0.0)),
        to_canvas.apply(Position::new(w, 0.0)),
        to_canvas.apply(Position::new(w, h)),
        to_canvas.apply(Position::new(0.0, h)),
    ];

    let min_x = corners.iter().map(|p| p.x).fold(f64::INFINITY, f64::min);
    let max_x = corners.iter().map(|p| p.x).fold(f64::NEG_INFINITY, f64::max);
    let min_y = corners.iter().map(|p| p.y).fold(f64::INFINITY, f64::min);
    let max_y = corners.iter().map(|p| p.y).fold(f64::NEG_INFINITY, f64::max);

    if !(min_x.is_finite() && max_x.is_finite() && min_y.is_finite() && max_y.is_finite()) {
        return None;
    }

    let (cw, ch) = (canvas.width as f64, canvas.height as f64);
    let x0 = min_x.floor().clamp(0.0, cw) as u32;
    let x1 = max_x.ceil().clamp(0.0, cw) as u32;
    let y0 = min_y.floor().clamp(0.0, ch) as u32;
    let y1 = max_y.ceil().clamp(0.0, ch) as u32;

    if x0 >= x1 || y0 >= y1 {
        return None;
    }
    Some((x0, y0, x1, y1))
}

/// Get a pixel as premultiplied `[r, g, b, a]` in the 0..=1 range.
#[inline]
fn premultiplied(image: &DecodedImage, px: u32, py: u32) -> [f64; 4] {
    let [r, g, b, a] = image.pixel(px, py);
    let alpha = a as f64 / 255.0;
    [
        r as f64 / 255.0 * alpha,
        g as f64 / 255.0 * alpha,
        b as f64 / 255.0 * alpha,
        alpha,
    ]
}

/// Sample with bilinear interpolation, clamping to the edge pixels.
///
/// `x` and `y` are in pixel-index space (pixel centers at integers).
/// Returns premultiplied RGBA in the 0..=1 range.
fn sample_bilinear(image: &DecodedImage, x: f64, y: f64) -> [f64; 4] {
    let max_x = (image.width - 1) as f64;
    let max_y = (image.height - 1) as f64;
    let x = x.clamp(0.0, max_x);
    let y = y.clamp(0.0, max_y);

    let x0 = x.floor() as u32;
    let y0 = y.floor() as u32;
    let x1 = (x0 + 1).min(image.width - 1);
    let y1 = (y0 + 1).min(image.height - 1);

    let fx = x - x0 as f64;
    let fy = y - y0 as f64;

    let p00 = premultiplied(image, x0, y0);
    let p10 = premultiplied(image, x1, y0);
    let p01 = premultiplied(image, x0, y1);
    let p11 = premultiplied(image, x1, y1);

    let mut result = [0.0; 4];
    for i in 0..4 {
        result[i] = p00[i] * (1.0 - fx) * (1.0 - fy)
            + p10[i] * fx * (1.0 - fy)
            + p01[i] * (1.0 - fx) * fy
            + p11[i] * fx * fy;
    }
    result
}

/// Composite a premultiplied source texel over a straight-alpha destination.
#[inline]
fn blend_source_over(dst: &mut [u8], src: [f64; 4]) {
    let da = dst[3] as f64 / 255.0;
    let sa = src[3].clamp(0.0, 1.0);
    let out_a = sa + da * (1.0 - sa);
    if out_a <= 0.0 {
        return;
    }

    for i in 0..3 {
        let dp = dst[i] as f64 / 255.0 * da;
        let out = (src[i] + dp * (1.0 - sa)) / out_a;
        dst[i] = (out * 255.0).clamp(0.0, 255.0).round() as u8;
    }
    dst[3] = (out_a * 255.0).clamp(0.0, 255.0).round() as u8;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocate_canvas_is_transparent() {
        let canvas = allocate_canvas(3, 2).unwrap();
        assert_eq!(canvas.pixels, vec![0u8; 24]);
    }

    #[test]
    fn test_allocate_zero_sized_canvas_fails() {
        assert_eq!(
            allocate_canvas(0, 10),
            Err(EditorError::RenderContextUnavailable {
                width: 0,
                height: 10
            })
        );
    }

    #[test]
    fn test_allocate_huge_canvas_fails() {
        let result = allocate_canvas(u32::MAX, u32::MAX);
        assert!(matches!(
            result,
            Err(EditorError::RenderContextUnavailable { .. })
        ));
    }

    #[test]
    fn test_draw_base_same_size_copies() {
        let base = DecodedImage::filled(4, 4, [9, 8, 7, 255]);
        let mut canvas = allocate_canvas(4, 4).unwrap();
        draw_base(&mut canvas, &base);
        assert_eq!(canvas, base);
    }

    #[test]
    fn test_draw_base_stretches_to_canvas() {
        let base = DecodedImage::filled(2, 2, [50, 60, 70, 255]);
        let mut canvas = allocate_canvas(8, 6).unwrap();
        draw_base(&mut canvas, &base);
        let [r, g, b, a] = canvas.pixel(7, 5);
        assert!((r as i32 - 50).abs() <= 1, "red was {}", r);
        assert!((g as i32 - 60).abs() <= 1, "green was {}", g);
        assert!((b as i32 - 70).abs() <= 1, "blue was {}", b);
        assert!(a >= 254);
    }

    #[test]
    fn test_blend_opaque_source_replaces() {
        let mut dst = [0u8, 0, 255, 255];
        blend_source_over(&mut dst, [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(dst, [255, 0, 0, 255]);
    }

    #[test]
    fn test_blend_half_alpha() {
        let mut dst = [0u8, 0, 255, 255];
        // Straight (255, 0, 0) at alpha 0.5, premultiplied
        blend_source_over(&mut dst, [0.5, 0.0, 0.0, 0.5]);
        assert_eq!(dst[3], 255);
        assert!((dst[0] as i32 - 128).abs() <= 1, "red was {}", dst[0]);
        assert!((dst[2] as i32 - 128).abs() <= 1, "blue was {}", dst[2]);
    }

    #[test]
    fn test_blend_over_transparent_keeps_color() {
        let mut dst = [0u8, 0, 0, 0];
        blend_source_over(&mut dst, [0.25, 0.0, 0.0, 0.25]);
        assert_eq!(dst, [255, 0, 0, 64]);
    }

    #[test]
    fn test_sample_bilinear_midpoint() {
        let mut img = DecodedImage::filled(2, 1, [0, 0, 0, 255]);
        img.pixels[4..8].copy_from_slice(&[255, 255, 255, 255]);
        let s = sample_bilinear(&img, 0.5, 0.0);
        assert!((s[0] - 0.5).abs() < 1e-9);
        assert!((s[3] - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_sample_bilinear_clamps_edges() {
        let img = DecodedImage::filled(3, 3, [255, 0, 0, 255]);
        let s = sample_bilinear(&img, -4.0, 10.0);
        assert!((s[0] - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_sample_single_pixel_image() {
        let img = DecodedImage::filled(1, 1, [0, 255, 0, 255]);
        let s = sample_bilinear(&img, 0.3, 0.7);
        assert!((s[1] - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_draw_overlay_identity_placement() {
        let mut canvas = DecodedImage::filled(20, 20, [0, 0, 0, 255]);
        let overlay = DecodedImage::filled(4, 4, [255, 255, 255, 255]);
        let placement = Affine::translation(10.0, 10.0);
        draw_overlay(&mut canvas, &overlay, &placement, Size::new(8.0, 8.0));

        assert_eq!(canvas.pixel(10, 10), [255, 255, 255, 255]);
        assert_eq!(canvas.pixel(6, 6), [255, 255, 255, 255]);
        assert_eq!(canvas.pixel(13, 13), [255, 255, 255, 255]);
        assert_eq!(canvas.pixel(5, 10), [0, 0, 0, 255]);
        assert_eq!(canvas.pixel(14, 10), [0, 0, 0, 255]);
    }

    #[test]
    fn test_draw_overlay_outside_canvas_is_noop() {
        let mut canvas = DecodedImage::filled(10, 10, [1, 2, 3, 255]);
        let before = canvas.clone();
        let overlay = DecodedImage::filled(4, 4, [255, 255, 255, 255]);
        draw_overlay(
            &mut canvas,
            &overlay,
            &Affine::translation(-500.0, -500.0),
            Size::new(8.0, 8.0),
        );
        assert_eq!(canvas, before);
    }

    #[test]
    fn test_draw_overlay_singular_placement_is_noop() {
        let mut canvas = DecodedImage::filled(10, 10, [1, 2, 3, 255]);
        let before = canvas.clone();
        let overlay = DecodedImage::filled(4, 4, [255, 255, 255, 255]);
        let placement = Affine::translation(5.0, 5.0).scale(0.0, 0.0);
        draw_overlay(&mut canvas, &overlay, &placement, Size::new(8.0, 8.0));
        assert_eq!(canvas, before);
    }

    #[test]
    fn test_transparent_overlay_leaves_canvas() {
        let mut canvas = DecodedImage::filled(10, 10, [40, 50, 60, 255]);
        let before = canvas.clone();
        let overlay = DecodedImage::filled(4, 4, [255, 255, 255, 0]);
        draw_overlay(
            &mut canvas,
            &overlay,
            &Affine::translation(5.0, 5.0),
            Size::new(10.0, 10.0),
        );
        assert_eq!(canvas, before);
    }
}
