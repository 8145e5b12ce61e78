//! Registry of encoded overlay images.
//!
//! The host ships the overlay artwork (one image per [`OverlayAsset`]) and
//! registers the encoded bytes here. Only the dimensions are read at
//! registration; pixels are decoded by each export job.

use std::collections::HashMap;
use std::sync::Arc;

use log::debug;

use crate::decode::probe_dimensions;
use crate::error::{AssetKind, EditorError};
use crate::geometry::Size;
use crate::transform::OverlayAsset;

/// Encoded overlay image with its intrinsic size.
#[derive(Debug, Clone)]
pub struct OverlaySource {
    bytes: Arc<[u8]>,
    intrinsic: Size,
}

impl OverlaySource {
    pub fn bytes(&self) -> &Arc<[u8]> {
        &self.bytes
    }

    pub fn intrinsic_size(&self) -> Size {
        self.intrinsic
    }
}

#[derive(Debug, Clone, Default)]
pub struct OverlayLibrary {
    sources: HashMap<OverlayAsset, OverlaySource>,
}

impl OverlayLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the artwork for `asset`.
    ///
    /// # Errors
    ///
    /// `AssetLoadFailure` if the bytes are not a readable image. The
    /// previous registration, if any, is kept.
    pub fn insert(
        &mut self,
        asset: OverlayAsset,
        bytes: impl Into<Arc<[u8]>>,
    ) -> Result<Size, EditorError> {
        let bytes = bytes.into();
        let (width, height) =
            probe_dimensions(&bytes).map_err(|source| EditorError::AssetLoadFailure {
                asset: AssetKind::Overlay,
                source,
            })?;

        let intrinsic = Size::from_pixels(width, height);
        debug!("registered overlay {:?} ({}x{})", asset, width, height);
        self.sources.insert(asset, OverlaySource { bytes, intrinsic });
        Ok(intrinsic)
    }

    pub fn get(&self, asset: OverlayAsset) -> Option<&OverlaySource> {
        self.sources.get(&asset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::test_support::png_solid;

    #[test]
    fn test_insert_reads_intrinsic_size() {
        let mut library = OverlayLibrary::new();
        let size = library
            .insert(OverlayAsset::Seasonal, png_solid(30, 20, [0, 0, 0, 0]))
            .unwrap();
        assert_eq!(size, Size::new(30.0, 20.0));
        assert_eq!(
            library.get(OverlayAsset::Seasonal).unwrap().intrinsic_size(),
            size
        );
        assert!(library.get(OverlayAsset::DefaultLeft).is_none());
    }

    #[test]
    fn test_insert_rejects_garbage_and_keeps_previous() {
        let mut library = OverlayLibrary::new();
        library
            .insert(OverlayAsset::DefaultRight, png_solid(4, 4, [1, 1, 1, 255]))
            .unwrap();

        let result = library.insert(OverlayAsset::DefaultRight, b"garbage".to_vec());
        assert!(matches!(
            result,
            Err(EditorError::AssetLoadFailure {
                asset: AssetKind::Overlay,
                ..
            })
        ));
        assert_eq!(
            library
                .get(OverlayAsset::DefaultRight)
                .unwrap()
                .intrinsic_size(),
            Size::new(4.0, 4.0)
        );
    }
}
