//! Hatbooth Core - Overlay photo editor
//!
//! This crate provides the platform-independent core of Hatbooth: placing a
//! decorative overlay on an uploaded photo with drag, rotate, scale and flip,
//! previewing it live, and exporting the flattened result at the photo's
//! native resolution.
//!
//! The entry point for hosts is [`Editor`]; the individual components are
//! public for hosts that wire them differently.

pub mod composite;
pub mod config;
pub mod decode;
pub mod editor;
pub mod encode;
pub mod error;
pub mod geometry;
pub mod interaction;
pub mod notify;
pub mod overlay;
pub mod preview;
pub mod transform;

pub use composite::{ExportCompositor, ExportJob, ExportResult};
pub use config::{ConfigError, EditorConfig};
pub use editor::{Editor, NativeImage};
pub use error::{AssetKind, EditorError, MissingKind};
pub use geometry::{Position, Size};
pub use interaction::{DragState, Gesture, InteractionController};
pub use notify::{Severity, Status, StatusNotifier};
pub use overlay::OverlayLibrary;
pub use preview::{PreviewRenderer, VisualTransform};
pub use transform::{OverlayAsset, RotateDirection, ScaleDirection, Transform, TransformModel};
