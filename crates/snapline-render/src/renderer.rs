//! Renderer trait abstraction.

use crate::scene::GuideScene;
use kurbo::{Affine, Size, Stroke};
use snapline_core::camera::Camera;
use snapline_core::style::GuideLineStyle;
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Invalid zoom level: {0}")]
    InvalidZoom(f64),
    #[error("Render failed: {0}")]
    RenderFailed(String),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Context for a single render frame.
pub struct RenderContext<'a> {
    /// Guide lines to draw.
    pub scene: &'a GuideScene,
    /// Camera used to map canvas coordinates to the screen.
    pub camera: &'a Camera,
    /// Viewport size in physical pixels.
    pub viewport_size: Size,
    /// Device pixel ratio (for HiDPI).
    pub scale_factor: f64,
}

impl<'a> RenderContext<'a> {
    pub fn new(scene: &'a GuideScene, camera: &'a Camera, viewport_size: Size) -> Self {
        Self {
            scene,
            camera,
            viewport_size,
            scale_factor: 1.0,
        }
    }

    /// Set the scale factor for HiDPI.
    pub fn with_scale_factor(mut self, scale_factor: f64) -> Self {
        self.scale_factor = scale_factor;
        self
    }

    /// Canvas-to-screen transform including the device scale.
    pub fn transform(&self) -> Affine {
        Affine::scale(self.scale_factor) * self.camera.transform()
    }

    /// Camera zoom, rejecting values that cannot be rendered.
    ///
    /// The device scale is left out: [`RenderContext::transform`] applies it,
    /// so widths divided by this zoom come out in logical screen pixels.
    pub fn zoom(&self) -> RenderResult<f64> {
        let zoom = self.camera.zoom;
        if !zoom.is_finite() || zoom <= 0.0 {
            return Err(RenderError::InvalidZoom(zoom));
        }
        Ok(zoom)
    }
}

/// Trait for rendering backends.
pub trait GuideRenderer {
    /// Build the drawing commands for a frame.
    fn build_scene(&mut self, ctx: &RenderContext) -> RenderResult<()>;
}

/// Stroke for a guide line, in canvas units.
///
/// Width and dashes are divided by `zoom` so lines keep a constant
/// on-screen thickness.
pub fn guide_stroke(style: &GuideLineStyle, zoom: f64) -> Stroke {
    let stroke = Stroke::new(style.line_width / zoom);
    if style.is_dashed() {
        let dashes: Vec<f64> = style.dash.iter().map(|d| d / zoom).collect();
        stroke.with_dashes(0.0, dashes)
    } else {
        stroke
    }
}
