//! Image decoding for uploads and overlay assets.
//!
//! This module provides functionality for:
//! - Probing the displayed dimensions of an upload without decoding it
//! - Decoding any supported format (PNG, JPEG, GIF, WebP, BMP) to RGBA
//! - Applying EXIF orientation so pixels match what a browser shows
//!
//! All operations are synchronous. Decoding is the step a host may defer
//! (see [`crate::composite::ExportJob`]).

mod loader;
mod types;

pub use loader::{decode_image, probe_dimensions};
pub use types::{DecodeError, DecodedImage, Orientation};

#[cfg(test)]
pub(crate) use loader::test_support;
