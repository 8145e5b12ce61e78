//! Image encoding for export.
//!
//! This module provides functionality for:
//! - Encoding the flattened export raster to PNG (lossless, with alpha)

mod png;

pub use png::{encode_png, EncodeError, PNG_SIGNATURE};
