//! Overlay placement state.
//!
//! The [`TransformModel`] owns the overlay's display-space placement and the
//! active [`OverlayAsset`]. It is pure data: pointer handling lives in
//! [`crate::interaction`], rendering in [`crate::preview`] and
//! [`crate::composite`].
//!
//! # Coordinate System
//!
//! - Position is an offset in display pixels from the container center
//! - Rotation is in degrees, positive = clockwise on screen, never wrapped
//! - Scale is a uniform factor clamped to the configured bounds

mod model;

pub use model::{OverlayAsset, RotateDirection, ScaleDirection, Transform, TransformModel};
