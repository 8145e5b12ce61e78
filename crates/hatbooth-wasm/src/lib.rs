//! Hatbooth WASM - WebAssembly bindings for Hatbooth
//!
//! This crate provides WASM bindings to expose the hatbooth-core editor to
//! JavaScript/TypeScript applications.
//!
//! # Module Structure
//!
//! - `editor` - The editing session (`JsEditor`): uploads, commands,
//!   pointer/touch input, preview transform, export, status
//! - `types` - WASM-compatible wrapper types for export results
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsEditor } from '@hatbooth/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const editor = new JsEditor();
//! editor.upload(file.type, new Uint8Array(await file.arrayBuffer()), performance.now());
//! ```

use wasm_bindgen::prelude::*;

mod editor;
mod types;

// Re-export public types
pub use editor::JsEditor;
pub use types::JsExportResult;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Debug).is_err() {
        // A logger is already installed; keep it
        return;
    }
    log::debug!("hatbooth-wasm {} ready", version());
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
