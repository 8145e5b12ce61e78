//! Editing session.
//!
//! [`Editor`] wires the components together the way a host UI uses them:
//! uploads set the photo, commands and gestures mutate the placement, the
//! preview is recomputed on demand, and exports run as snapshot jobs. Every
//! failure becomes a status notification and leaves editing state intact.

use std::sync::Arc;

use log::{info, warn};

use crate::composite::{ExportCompositor, ExportJob, ExportResult};
use crate::config::{ConfigError, EditorConfig};
use crate::decode::probe_dimensions;
use crate::error::{AssetKind, EditorError, MissingKind};
use crate::geometry::Size;
use crate::interaction::{Gesture, InteractionController};
use crate::notify::{Severity, Status, StatusNotifier};
use crate::overlay::OverlayLibrary;
use crate::preview::{PreviewRenderer, VisualTransform};
use crate::transform::{OverlayAsset, RotateDirection, ScaleDirection, Transform, TransformModel};

const MSG_LOADED: &str = "Image loaded successfully";
const MSG_LOAD_FAILED: &str = "Error loading image";
const MSG_SAVED: &str = "Image saved successfully";

/// The uploaded photo: encoded bytes plus displayed dimensions.
#[derive(Debug, Clone)]
pub struct NativeImage {
    bytes: Arc<[u8]>,
    width: u32,
    height: u32,
}

impl NativeImage {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn size(&self) -> Size {
        Size::from_pixels(self.width, self.height)
    }

}

/// One editing session.
#[derive(Debug, Clone)]
pub struct Editor {
    config: EditorConfig,
    model: TransformModel,
    controller: InteractionController,
    preview: PreviewRenderer,
    compositor: ExportCompositor,
    notifier: StatusNotifier,
    overlays: OverlayLibrary,
    photo: Option<NativeImage>,
}

impl Default for Editor {
    fn default() -> Self {
        Self::build(EditorConfig::default())
    }
}

impl Editor {
    /// Create a session with validated configuration.
    pub fn new(config: EditorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: EditorConfig) -> Self {
        Self {
            model: TransformModel::new(&config),
            controller: InteractionController::new(),
            preview: PreviewRenderer::new(&config),
            compositor: ExportCompositor::new(&config),
            notifier: StatusNotifier::new(&config),
            overlays: OverlayLibrary::new(),
            photo: None,
            config,
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn overlays(&self) -> &OverlayLibrary {
        &self.overlays
    }

    pub fn overlays_mut(&mut self) -> &mut OverlayLibrary {
        &mut self.overlays
    }

    pub fn photo(&self) -> Option<&NativeImage> {
        self.photo.as_ref()
    }

    pub fn model(&self) -> &TransformModel {
        &self.model
    }

    pub fn controller(&self) -> &InteractionController {
        &self.controller
    }

    /// The stored placement.
    pub fn transform(&self) -> &Transform {
        self.model.transform()
    }

    // ------------------------------------------------------------------
    // Upload
    // ------------------------------------------------------------------

    /// Accept an uploaded file.
    ///
    /// The declared MIME type must start with `image/`. On success the photo
    /// replaces any previous one; the placement is kept. On failure nothing
    /// but the status notification changes.
    pub fn upload(
        &mut self,
        mime: &str,
        bytes: impl Into<Arc<[u8]>>,
        now_ms: f64,
    ) -> Result<(u32, u32), EditorError> {
        let result = self.accept_upload(mime, bytes.into());
        match &result {
            Ok((width, height)) => {
                info!("photo loaded ({}x{}, {})", width, height, mime);
                self.notifier.notify(MSG_LOADED, Severity::Success, now_ms);
            }
            Err(err) => {
                warn!("upload rejected: {}", err);
                let message = match err {
                    EditorError::AssetLoadFailure { .. } => MSG_LOAD_FAILED,
                    other => other.user_message(),
                };
                self.notifier.notify(message, Severity::Error, now_ms);
            }
        }
        result
    }

    fn accept_upload(&mut self, mime: &str, bytes: Arc<[u8]>) -> Result<(u32, u32), EditorError> {
        if !mime.starts_with("image/") {
            return Err(EditorError::InvalidFileType {
                mime: mime.to_string(),
            });
        }

        let (width, height) =
            probe_dimensions(&bytes).map_err(|source| EditorError::AssetLoadFailure {
                asset: AssetKind::Photo,
                source,
            })?;

        self.photo = Some(NativeImage {
            bytes,
            width,
            height,
        });
        Ok((width, height))
    }

    // ------------------------------------------------------------------
    // Commands
    // ------------------------------------------------------------------

    pub fn rotate(&mut self, direction: RotateDirection) {
        self.model.rotate(direction);
    }

    pub fn scale(&mut self, direction: ScaleDirection) {
        self.model.scale(direction);
    }

    pub fn set_position(&mut self, x: f64, y: f64) {
        self.model.set_position(x, y);
    }

    pub fn toggle_flip(&mut self) {
        self.model.toggle_flip();
    }

    pub fn set_seasonal(&mut self, enabled: bool) {
        self.model.set_seasonal(enabled);
    }

    pub fn select_overlay(&mut self, asset: OverlayAsset) {
        self.model.select_overlay(asset);
    }

    /// Restore the default placement and end any drag in progress.
    pub fn reset(&mut self) {
        self.controller.cancel();
        self.model.reset();
    }

    /// Feed a pointer or touch gesture. Returns true when the overlay moved.
    pub fn handle_gesture(&mut self, gesture: Gesture) -> bool {
        match self.controller.handle(gesture, self.model.position()) {
            Some(position) => {
                self.model.set_position(position.x, position.y);
                true
            }
            None => false,
        }
    }

    // ------------------------------------------------------------------
    // Rendering
    // ------------------------------------------------------------------

    /// Visual transform for the live preview.
    ///
    /// Falls back to a square element while the active overlay's artwork is
    /// not registered.
    pub fn preview(&self) -> VisualTransform {
        let intrinsic = self
            .overlays
            .get(self.model.overlay())
            .map(|source| source.intrinsic_size())
            .unwrap_or_default();
        self.preview.render(self.model.transform(), intrinsic)
    }

    /// Snapshot the session into an export job.
    ///
    /// `display_rect` is the preview container's rendered size, `None` when
    /// the host could not measure it. Nothing is decoded here; missing
    /// inputs are reported before any work starts.
    pub fn begin_export(
        &mut self,
        display_rect: Option<Size>,
        now_ms: f64,
    ) -> Result<ExportJob, EditorError> {
        let job = self.snapshot(display_rect);
        if let Err(err) = &job {
            warn!("export not started: {}", err);
            self.notifier.notify(err.user_message(), Severity::Error, now_ms);
        }
        job
    }

    fn snapshot(&self, display_rect: Option<Size>) -> Result<ExportJob, EditorError> {
        let photo = self
            .photo
            .as_ref()
            .ok_or(EditorError::MissingInput(MissingKind::Photo))?;

        let display_rect = display_rect
            .filter(Size::is_positive)
            .ok_or(EditorError::MissingInput(MissingKind::Container))?;

        let asset = self.model.overlay();
        let overlay = self
            .overlays
            .get(asset)
            .ok_or(EditorError::MissingInput(MissingKind::OverlayArtwork))?;

        Ok(ExportJob {
            compositor: self.compositor,
            photo: Arc::clone(&photo.bytes),
            native: (photo.width, photo.height),
            overlay: Arc::clone(overlay.bytes()),
            overlay_asset: asset,
            transform: *self.model.transform(),
            display_rect,
            file_name: self.config.export_file_name.clone(),
        })
    }

    /// Post the outcome of a finished export job as a notification.
    pub fn report_export(&mut self, result: &Result<ExportResult, EditorError>, now_ms: f64) {
        match result {
            Ok(_) => self.notifier.notify(MSG_SAVED, Severity::Success, now_ms),
            Err(err) => {
                self.notifier.notify(err.user_message(), Severity::Error, now_ms);
            }
        }
    }

    /// Begin, run, and report an export in one call.
    pub fn export(
        &mut self,
        display_rect: Option<Size>,
        now_ms: f64,
    ) -> Result<ExportResult, EditorError> {
        let job = self.begin_export(display_rect, now_ms)?;
        let result = job.run();
        self.report_export(&result, now_ms);
        result
    }

    // ------------------------------------------------------------------
    // Notifications
    // ------------------------------------------------------------------

    pub fn status(&self, now_ms: f64) -> Option<&Status> {
        self.notifier.current(now_ms)
    }

    pub fn status_deadline(&self) -> Option<f64> {
        self.notifier.pending_deadline()
    }

    pub fn tick(&mut self, now_ms: f64) -> bool {
        self.notifier.tick(now_ms)
    }
}
