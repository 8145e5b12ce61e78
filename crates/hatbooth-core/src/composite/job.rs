//! One-shot export jobs.
//!
//! An export runs in two phases. [`ExportJob`] is created synchronously and
//! captures everything the export needs: encoded photo and overlay bytes,
//! the transform, and the container size at that moment. [`ExportJob::run`]
//! then decodes, composites, and encodes. Hosts may run it after yielding
//! to their event loop; editing that happens in between does not reach the
//! job, and any number of jobs may be in flight independently.

use std::sync::Arc;

use log::{info, warn};

use super::ExportCompositor;
use crate::decode::decode_image;
use crate::encode::encode_png;
use crate::error::{AssetKind, EditorError};
use crate::geometry::Size;
use crate::transform::{OverlayAsset, Transform};

/// MIME type of the exported artifact.
pub const EXPORT_MIME_TYPE: &str = "image/png";

/// The flattened, encoded export.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportResult {
    /// Download file name
    pub file_name: String,
    /// Output width (the photo's native width)
    pub width: u32,
    /// Output height (the photo's native height)
    pub height: u32,
    /// PNG bytes
    pub bytes: Vec<u8>,
}

impl ExportResult {
    pub fn mime_type(&self) -> &'static str {
        EXPORT_MIME_TYPE
    }
}

/// Snapshot of the editor taken when an export starts.
#[derive(Debug, Clone)]
pub struct ExportJob {
    pub(crate) compositor: ExportCompositor,
    pub(crate) photo: Arc<[u8]>,
    pub(crate) native: (u32, u32),
    pub(crate) overlay: Arc<[u8]>,
    pub(crate) overlay_asset: OverlayAsset,
    pub(crate) transform: Transform,
    pub(crate) display_rect: Size,
    pub(crate) file_name: String,
}

impl ExportJob {
    /// Transform captured at job creation (seasonal flip suppression applied).
    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn overlay_asset(&self) -> OverlayAsset {
        self.overlay_asset
    }

    /// Native size of the output.
    pub fn output_size(&self) -> (u32, u32) {
        self.native
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Decode both assets, composite, and encode.
    ///
    /// # Errors
    ///
    /// `AssetLoadFailure` when either asset fails to decode,
    /// `RenderContextUnavailable` when the canvas cannot be allocated,
    /// `Encode` when PNG encoding fails.
    pub fn run(&self) -> Result<ExportResult, EditorError> {
        self.run_inner().inspect_err(|e| warn!("export failed: {}", e))
    }

    fn run_inner(&self) -> Result<ExportResult, EditorError> {
        let base = decode_image(&self.photo).map_err(|source| EditorError::AssetLoadFailure {
            asset: AssetKind::Photo,
            source,
        })?;
        let overlay =
            decode_image(&self.overlay).map_err(|source| EditorError::AssetLoadFailure {
                asset: AssetKind::Overlay,
                source,
            })?;

        let canvas = self.compositor.composite_at(
            self.native,
            &base,
            &overlay,
            &self.transform,
            self.display_rect,
        )?;

        let bytes = encode_png(&canvas.pixels, canvas.width, canvas.height)?;
        info!(
            "exported {} ({}x{}, {} bytes)",
            self.file_name,
            canvas.width,
            canvas.height,
            bytes.len()
        );

        Ok(ExportResult {
            file_name: self.file_name.clone(),
            width: canvas.width,
            height: canvas.height,
            bytes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::test_support::png_solid;
    use crate::decode::DecodeError;
    use crate::encode::PNG_SIGNATURE;

    fn job(photo: Vec<u8>, overlay: Vec<u8>, native: (u32, u32)) -> ExportJob {
        ExportJob {
            compositor: ExportCompositor::default(),
            photo: photo.into(),
            native,
            overlay: overlay.into(),
            overlay_asset: OverlayAsset::DefaultRight,
            transform: Transform::default(),
            display_rect: Size::new(800.0, 600.0),
            file_name: "out.png".to_string(),
        }
    }

    #[test]
    fn test_run_produces_png_at_native_size() {
        let job = job(
            png_solid(64, 48, [0, 0, 0, 255]),
            png_solid(8, 8, [255, 0, 0, 255]),
            (64, 48),
        );
        let result = job.run().unwrap();

        assert_eq!(result.file_name, "out.png");
        assert_eq!((result.width, result.height), (64, 48));
        assert_eq!(&result.bytes[0..8], &PNG_SIGNATURE);
        assert_eq!(result.mime_type(), "image/png");

        let decoded = image::load_from_memory(&result.bytes).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (64, 48));
    }

    #[test]
    fn test_photo_decode_failure() {
        let job = job(b"not a photo".to_vec(), png_solid(8, 8, [0; 4]), (10, 10));
        assert_eq!(
            job.run(),
            Err(EditorError::AssetLoadFailure {
                asset: AssetKind::Photo,
                source: DecodeError::InvalidFormat,
            })
        );
    }

    #[test]
    fn test_overlay_decode_failure() {
        let job = job(png_solid(10, 10, [0, 0, 0, 255]), vec![0u8; 32], (10, 10));
        assert!(matches!(
            job.run(),
            Err(EditorError::AssetLoadFailure {
                asset: AssetKind::Overlay,
                ..
            })
        ));
    }

    #[test]
    fn test_job_can_be_rerun() {
        let job = job(
            png_solid(16, 16, [0, 0, 0, 255]),
            png_solid(4, 4, [0, 255, 0, 255]),
            (16, 16),
        );
        let first = job.run().unwrap();
        let second = job.run().unwrap();
        assert_eq!(first, second);
    }
}
