//! WASM-compatible wrapper types for export results.
//!
//! This module provides JavaScript-friendly types that wrap the core Hatbooth
//! types, handling the conversion between Rust and JavaScript data
//! representations.

use hatbooth_core::ExportResult;
use wasm_bindgen::prelude::*;

/// A finished export for JavaScript.
///
/// Hand `bytes()` to a `Blob` with `mime_type` and trigger a download named
/// `file_name`.
///
/// # Memory Management
///
/// The PNG bytes are stored in WASM memory. `bytes()` copies them into a
/// JavaScript `Uint8Array`; call it once per download.
#[wasm_bindgen]
pub struct JsExportResult {
    file_name: String,
    width: u32,
    height: u32,
    bytes: Vec<u8>,
}

#[wasm_bindgen]
impl JsExportResult {
    /// Download file name
    #[wasm_bindgen(getter)]
    pub fn file_name(&self) -> String {
        self.file_name.clone()
    }

    /// MIME type of the encoded bytes
    #[wasm_bindgen(getter)]
    pub fn mime_type(&self) -> String {
        hatbooth_core::composite::EXPORT_MIME_TYPE.to_string()
    }

    /// Output width in pixels (the photo's native width)
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Output height in pixels (the photo's native height)
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Size of the encoded file in bytes
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.bytes.len()
    }

    /// Returns the PNG bytes as a Uint8Array (copied).
    pub fn bytes(&self) -> Vec<u8> {
        self.bytes.clone()
    }

    /// Explicitly free WASM memory.
    ///
    /// Optional; the finalizer releases it otherwise.
    pub fn free(self) {}
}

impl From<ExportResult> for JsExportResult {
    fn from(result: ExportResult) -> Self {
        Self {
            file_name: result.file_name,
            width: result.width,
            height: result.height,
            bytes: result.bytes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_export_result() {
        let js: JsExportResult = ExportResult {
            file_name: "out.png".to_string(),
            width: 3,
            height: 2,
            bytes: vec![1, 2, 3, 4],
        }
        .into();

        assert_eq!(js.file_name(), "out.png");
        assert_eq!(js.mime_type(), "image/png");
        assert_eq!((js.width(), js.height()), (3, 2));
        assert_eq!(js.byte_length(), 4);
        assert_eq!(js.bytes(), vec![1, 2, 3, 4]);
    }
}
