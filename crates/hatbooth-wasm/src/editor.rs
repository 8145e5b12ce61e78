//! Editor session WASM bindings.
//!
//! [`JsEditor`] wraps the core [`Editor`] for a browser host. The host
//! forwards DOM events (file input, pointer and touch events, button clicks)
//! and reads back the preview transform and status message after each call.
//!
//! Timestamps are `performance.now()` values in milliseconds.
//!
//! # Example
//!
//! ```typescript
//! import init, { JsEditor } from '@hatbooth/wasm';
//!
//! await init();
//! const editor = new JsEditor();
//! editor.register_overlay('default-right', hatBytes);
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! editor.upload(file.type, bytes, performance.now());
//! hat.style.transform = editor.preview_css();
//!
//! const rect = container.getBoundingClientRect();
//! const result = editor.export_from_rect(rect, performance.now());
//! ```

use hatbooth_core::{
    Editor, EditorConfig, Gesture, OverlayAsset, Position, RotateDirection, ScaleDirection,
    Severity, Size,
};
use wasm_bindgen::prelude::*;

use crate::types::JsExportResult;

fn to_js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Parse an overlay name as used by the host (`default-right`,
/// `default-left`, `seasonal`).
pub(crate) fn overlay_from_name(name: &str) -> Option<OverlayAsset> {
    match name {
        "default-right" => Some(OverlayAsset::DefaultRight),
        "default-left" => Some(OverlayAsset::DefaultLeft),
        "seasonal" => Some(OverlayAsset::Seasonal),
        _ => None,
    }
}

/// Flat `[x0, y0, x1, y1, ...]` client coordinates to points. A trailing
/// unpaired value is ignored.
pub(crate) fn touches_from_flat(coords: &[f64]) -> Vec<Position> {
    coords
        .chunks_exact(2)
        .map(|pair| Position::new(pair[0], pair[1]))
        .collect()
}

/// An overlay editing session for JavaScript.
#[wasm_bindgen]
pub struct JsEditor {
    inner: Editor,
}

#[wasm_bindgen]
impl JsEditor {
    /// Create an editor. `config` is an optional plain object with any of
    /// the `EditorConfig` fields; missing fields take their defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(config: Option<JsValue>) -> Result<JsEditor, JsValue> {
        let config = match config {
            Some(value) if !value.is_undefined() && !value.is_null() => {
                serde_wasm_bindgen::from_value::<EditorConfig>(value)
                    .map_err(|e| JsValue::from_str(&format!("Invalid config: {}", e)))?
            }
            _ => EditorConfig::default(),
        };
        let inner = Editor::new(config).map_err(to_js_error)?;
        Ok(Self { inner })
    }

    /// Register the artwork for one overlay.
    pub fn register_overlay(&mut self, name: &str, bytes: &[u8]) -> Result<(), JsValue> {
        let asset = overlay_from_name(name)
            .ok_or_else(|| JsValue::from_str(&format!("Unknown overlay: {}", name)))?;
        self.inner
            .overlays_mut()
            .insert(asset, bytes)
            .map(|_| ())
            .map_err(to_js_error)
    }

    /// Upload a photo. `mime` is the file's declared type (`File.type`).
    ///
    /// On error the status message is already set; the thrown value carries
    /// the detailed reason.
    pub fn upload(&mut self, mime: &str, bytes: &[u8], now: f64) -> Result<(), JsValue> {
        self.inner
            .upload(mime, bytes, now)
            .map(|_| ())
            .map_err(to_js_error)
    }

    /// Whether a photo has been uploaded
    #[wasm_bindgen(getter)]
    pub fn has_photo(&self) -> bool {
        self.inner.photo().is_some()
    }

    /// Native width of the current photo, 0 when none
    #[wasm_bindgen(getter)]
    pub fn photo_width(&self) -> u32 {
        self.inner.photo().map_or(0, |photo| photo.width())
    }

    /// Native height of the current photo, 0 when none
    #[wasm_bindgen(getter)]
    pub fn photo_height(&self) -> u32 {
        self.inner.photo().map_or(0, |photo| photo.height())
    }

    // =========================================================================
    // Commands
    // =========================================================================

    pub fn rotate_left(&mut self) {
        self.inner.rotate(RotateDirection::Left);
    }

    pub fn rotate_right(&mut self) {
        self.inner.rotate(RotateDirection::Right);
    }

    pub fn scale_up(&mut self) {
        self.inner.scale(ScaleDirection::Up);
    }

    pub fn scale_down(&mut self) {
        self.inner.scale(ScaleDirection::Down);
    }

    pub fn toggle_flip(&mut self) {
        self.inner.toggle_flip();
    }

    pub fn set_seasonal(&mut self, enabled: bool) {
        self.inner.set_seasonal(enabled);
    }

    pub fn select_overlay(&mut self, name: &str) -> Result<(), JsValue> {
        let asset = overlay_from_name(name)
            .ok_or_else(|| JsValue::from_str(&format!("Unknown overlay: {}", name)))?;
        self.inner.select_overlay(asset);
        Ok(())
    }

    pub fn reset(&mut self) {
        self.inner.reset();
    }

    // =========================================================================
    // Pointer and touch input
    // =========================================================================
    //
    // Each handler returns true when the overlay moved and the preview
    // should be refreshed.

    pub fn pointer_down(&mut self, x: f64, y: f64) -> bool {
        self.inner.handle_gesture(Gesture::PointerDown(Position::new(x, y)))
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) -> bool {
        self.inner.handle_gesture(Gesture::PointerMove(Position::new(x, y)))
    }

    pub fn pointer_up(&mut self) -> bool {
        self.inner.handle_gesture(Gesture::PointerUp)
    }

    pub fn pointer_leave(&mut self) -> bool {
        self.inner.handle_gesture(Gesture::PointerLeave)
    }

    /// `touches` holds the active touches as flat `[x0, y0, x1, y1, ...]`.
    pub fn touch_start(&mut self, touches: &[f64]) -> bool {
        self.inner.handle_gesture(Gesture::TouchStart(touches_from_flat(touches)))
    }

    /// `touches` holds the active touches as flat `[x0, y0, x1, y1, ...]`.
    pub fn touch_move(&mut self, touches: &[f64]) -> bool {
        self.inner.handle_gesture(Gesture::TouchMove(touches_from_flat(touches)))
    }

    pub fn touch_end(&mut self) -> bool {
        self.inner.handle_gesture(Gesture::TouchEnd)
    }

    pub fn touch_cancel(&mut self) -> bool {
        self.inner.handle_gesture(Gesture::TouchCancel)
    }

    #[wasm_bindgen(getter)]
    pub fn is_dragging(&self) -> bool {
        self.inner.controller().is_dragging()
    }

    // =========================================================================
    // Preview
    // =========================================================================

    /// CSS `transform` value for the overlay element.
    pub fn preview_css(&self) -> String {
        self.inner.preview().to_css()
    }

    /// Laid-out overlay element width in CSS pixels
    #[wasm_bindgen(getter)]
    pub fn overlay_element_width(&self) -> f64 {
        self.inner.preview().element_size.width
    }

    /// Laid-out overlay element height in CSS pixels
    #[wasm_bindgen(getter)]
    pub fn overlay_element_height(&self) -> f64 {
        self.inner.preview().element_size.height
    }

    /// Affine `[a, b, c, d, e, f]` of the overlay in container coordinates,
    /// for hosts that draw the preview on a canvas.
    pub fn preview_matrix(
        &self,
        container_width: f64,
        container_height: f64,
    ) -> js_sys::Float64Array {
        let matrix = self
            .inner
            .preview()
            .matrix(Size::new(container_width, container_height));
        js_sys::Float64Array::from(&matrix.to_array()[..])
    }

    /// Current placement as a plain object.
    pub fn transform(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(self.inner.transform()).map_err(to_js_error)
    }

    /// Whether the flip control should be enabled
    #[wasm_bindgen(getter)]
    pub fn can_flip(&self) -> bool {
        !self.inner.model().is_seasonal()
    }

    // =========================================================================
    // Export
    // =========================================================================

    /// Export at native resolution. `container_width`/`container_height` are
    /// the preview container's rendered size.
    pub fn export(
        &mut self,
        container_width: f64,
        container_height: f64,
        now: f64,
    ) -> Result<JsExportResult, JsValue> {
        let display_rect = Size::new(container_width, container_height);
        self.inner
            .export(Some(display_rect), now)
            .map(JsExportResult::from)
            .map_err(to_js_error)
    }

    /// Export using the container's `getBoundingClientRect()`.
    pub fn export_from_rect(
        &mut self,
        rect: &web_sys::DomRect,
        now: f64,
    ) -> Result<JsExportResult, JsValue> {
        self.export(rect.width(), rect.height(), now)
    }

    // =========================================================================
    // Status
    // =========================================================================

    /// Visible status message at `now`, if any.
    pub fn status_message(&self, now: f64) -> Option<String> {
        self.inner.status(now).map(|status| status.message.clone())
    }

    /// Whether the visible status is an error.
    pub fn status_is_error(&self, now: f64) -> bool {
        self.inner
            .status(now)
            .is_some_and(|status| status.severity == Severity::Error)
    }

    /// When the current status should be dismissed, for `setTimeout`.
    pub fn status_deadline(&self) -> Option<f64> {
        self.inner.status_deadline()
    }

    /// Dismiss the status if its window has passed. Returns true if it was
    /// dismissed.
    pub fn tick(&mut self, now: f64) -> bool {
        self.inner.tick(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hatbooth_core::encode::encode_png;

    fn png(width: u32, height: u32, rgba: [u8; 4]) -> Vec<u8> {
        let pixels: Vec<u8> = rgba
            .iter()
            .copied()
            .cycle()
            .take((width * height * 4) as usize)
            .collect();
        encode_png(&pixels, width, height).unwrap()
    }

    fn editor() -> JsEditor {
        let mut editor = JsEditor::new(None).unwrap();
        for name in ["default-right", "default-left", "seasonal"] {
            editor
                .register_overlay(name, &png(10, 10, [255, 255, 255, 255]))
                .unwrap();
        }
        editor
    }

    #[test]
    fn test_overlay_from_name() {
        assert_eq!(
            overlay_from_name("default-right"),
            Some(OverlayAsset::DefaultRight)
        );
        assert_eq!(
            overlay_from_name("default-left"),
            Some(OverlayAsset::DefaultLeft)
        );
        assert_eq!(overlay_from_name("seasonal"), Some(OverlayAsset::Seasonal));
        assert_eq!(overlay_from_name("party-hat"), None);
    }

    #[test]
    fn test_touches_from_flat() {
        assert_eq!(
            touches_from_flat(&[1.0, 2.0, 3.0, 4.0]),
            vec![Position::new(1.0, 2.0), Position::new(3.0, 4.0)]
        );
        assert_eq!(touches_from_flat(&[5.0, 6.0, 7.0]).len(), 1);
        assert!(touches_from_flat(&[]).is_empty());
    }

    #[test]
    fn test_upload_and_export() {
        let mut editor = editor();
        editor
            .upload("image/png", &png(120, 90, [0, 0, 0, 255]), 0.0)
            .unwrap();
        assert!(editor.has_photo());
        assert_eq!((editor.photo_width(), editor.photo_height()), (120, 90));
        assert_eq!(
            editor.status_message(10.0).as_deref(),
            Some("Image loaded successfully")
        );

        let result = editor.export(400.0, 300.0, 20.0).unwrap();
        assert_eq!(result.file_name(), "you-are-a-partner-now.png");
        assert_eq!((result.width(), result.height()), (120, 90));
        assert!(!editor.status_is_error(30.0));
    }

    #[test]
    fn test_pointer_drag() {
        let mut editor = editor();
        assert!(!editor.pointer_down(10.0, 10.0));
        assert!(editor.is_dragging());
        assert!(editor.pointer_move(30.0, 25.0));
        assert!(!editor.pointer_up());
        assert!(!editor.is_dragging());
        assert_eq!(
            editor.preview_css(),
            "translate(-50%, -50%) translate(20px, 15px) rotate(0deg) scale(1, 1)"
        );
    }

    #[test]
    fn test_two_finger_touch_ignored() {
        let mut editor = editor();
        assert!(!editor.touch_start(&[0.0, 0.0, 50.0, 50.0]));
        assert!(!editor.touch_move(&[10.0, 10.0, 60.0, 60.0]));
        assert!(!editor.touch_end());
    }

    #[test]
    fn test_seasonal_disables_flip() {
        let mut editor = editor();
        assert!(editor.can_flip());
        editor.set_seasonal(true);
        assert!(!editor.can_flip());
        editor.toggle_flip();
        assert!(editor.preview_css().ends_with("scale(1, 1)"));
    }

    #[test]
    fn test_leaving_seasonal_shows_unflipped_hat() {
        let mut editor = editor();
        editor.toggle_flip();
        editor.set_seasonal(true);
        editor.set_seasonal(false);
        assert!(editor.can_flip());
        assert!(editor.preview_css().ends_with("scale(1, 1)"));
    }

    #[test]
    fn test_commands_and_reset() {
        let mut editor = editor();
        editor.rotate_right();
        editor.scale_down();
        editor.toggle_flip();
        let css = editor.preview_css();
        assert!(css.contains("rotate(15deg)"));
        assert!(css.contains("scale(-0.9, 0.9)"));

        editor.reset();
        assert_eq!(
            editor.preview_css(),
            "translate(-50%, -50%) translate(0px, 0px) rotate(0deg) scale(1, 1)"
        );
    }

    #[test]
    fn test_status_tick() {
        let mut editor = editor();
        editor
            .upload("image/png", &png(2, 2, [0, 0, 0, 255]), 500.0)
            .unwrap();
        assert_eq!(editor.status_deadline(), Some(1500.0));
        assert!(!editor.tick(1000.0));
        assert!(editor.tick(1500.0));
        assert_eq!(editor.status_message(1500.0), None);
    }
}
