//! Viewport zoom and the pointer-delta conversion built on it.

use kurbo::{Affine, Vec2};
use serde::{Deserialize, Serialize};

/// Source of the current canvas zoom factor.
pub trait Viewport {
    /// Current zoom factor (1.0 = 100%).
    fn zoom(&self) -> f64;

    /// Convert a pointer delta in screen pixels to canvas units.
    ///
    /// Returns `None` when the zoom is not a usable divisor.
    fn screen_delta_to_canvas(&self, delta: Vec2) -> Option<Vec2> {
        let zoom = self.zoom();
        if !zoom.is_finite() || zoom <= 0.0 {
            return None;
        }
        Some(delta / zoom)
    }
}

/// Pan/zoom state of the canvas.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Camera {
    /// Current translation offset (pan)
    pub offset: Vec2,
    /// Current zoom level
    pub zoom: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            zoom: 1.0,
        }
    }
}

impl Camera {
    pub fn new() -> Self {
        Self::default()
    }

    /// World-to-screen transform.
    pub fn transform(&self) -> Affine {
        Affine::translate(self.offset) * Affine::scale(self.zoom)
    }
}

impl Viewport for Camera {
    fn zoom(&self) -> f64 {
        self.zoom
    }
}
