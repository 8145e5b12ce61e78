//! Editor error kinds.
//!
//! None of these are fatal to a session: every variant maps to a transient
//! user notification and leaves the editing state as it was.

use thiserror::Error;

use crate::decode::DecodeError;
use crate::encode::EncodeError;

/// Which input failed to load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Photo,
    Overlay,
}

impl std::fmt::Display for AssetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssetKind::Photo => f.write_str("photo"),
            AssetKind::Overlay => f.write_str("overlay"),
        }
    }
}

/// Which export input was missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingKind {
    Photo,
    /// The preview container was not measured or has no area
    Container,
    /// The active overlay has no registered artwork
    OverlayArtwork,
}

impl std::fmt::Display for MissingKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MissingKind::Photo => f.write_str("no photo loaded"),
            MissingKind::Container => f.write_str("preview container has no size"),
            MissingKind::OverlayArtwork => f.write_str("overlay artwork not registered"),
        }
    }
}

/// Errors surfaced by editor operations.
#[derive(Debug, Error, PartialEq)]
pub enum EditorError {
    /// Upload declared a non-image MIME type.
    #[error("Unsupported file type: {mime}")]
    InvalidFileType { mime: String },

    /// Export started without the inputs it needs.
    #[error("Missing input: {0}")]
    MissingInput(MissingKind),

    /// The photo or overlay could not be decoded.
    #[error("Failed to load {asset}: {source}")]
    AssetLoadFailure {
        asset: AssetKind,
        #[source]
        source: DecodeError,
    },

    /// The output raster could not be allocated.
    #[error("Cannot allocate a {width}x{height} drawing surface")]
    RenderContextUnavailable { width: u32, height: u32 },

    /// The flattened raster could not be encoded.
    #[error(transparent)]
    Encode(#[from] EncodeError),
}

impl EditorError {
    /// Short message suitable for a status notification after an export
    /// attempt or a rejected upload.
    pub fn user_message(&self) -> &'static str {
        match self {
            EditorError::InvalidFileType { .. } => "Please select an image file",
            EditorError::MissingInput(MissingKind::OverlayArtwork) => {
                "Overlay image is not available"
            }
            EditorError::MissingInput(_) => "Please upload an image first",
            EditorError::AssetLoadFailure { .. }
            | EditorError::RenderContextUnavailable { .. }
            | EditorError::Encode(_) => "Error saving image",
        }
    }
}
