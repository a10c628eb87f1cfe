//! Vello-based guide line renderer.

use crate::renderer::{GuideRenderer, RenderContext, RenderResult, guide_stroke};
use crate::scene::GuidePrimitive;
use kurbo::{Affine, Circle};
use peniko::{Color, Fill};
use vello::Scene;

/// Radius of the endpoint markers in screen pixels.
const ENDPOINT_RADIUS: f64 = 2.0;

/// Paints guide lines into a [`vello::Scene`].
pub struct VelloGuideRenderer {
    scene: Scene,
    /// Zoom of the last built frame (for zoom-independent sizes).
    zoom: f64,
    /// Draw filled markers at both ends of each line.
    pub show_endpoints: bool,
}

impl Default for VelloGuideRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl VelloGuideRenderer {
    pub fn new() -> Self {
        Self {
            scene: Scene::new(),
            zoom: 1.0,
            show_endpoints: false,
        }
    }

    /// The scene built by the last frame.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn take_scene(&mut self) -> Scene {
        std::mem::take(&mut self.scene)
    }

    fn render_guide(&mut self, primitive: &GuidePrimitive, transform: Affine) {
        let style = &primitive.style;
        let stroke = guide_stroke(style, self.zoom);
        self.scene
            .stroke(&stroke, transform, style.stroke_color(), None, &primitive.segment);

        if self.show_endpoints {
            let fill = Color::from(style.fill);
            let radius = ENDPOINT_RADIUS / self.zoom;
            for point in [primitive.segment.p0, primitive.segment.p1] {
                self.scene
                    .fill(Fill::NonZero, transform, fill, None, &Circle::new(point, radius));
            }
        }
    }
}

impl GuideRenderer for VelloGuideRenderer {
    fn build_scene(&mut self, ctx: &RenderContext) -> RenderResult<()> {
        self.scene.reset();
        self.zoom = ctx.zoom()?;
        let transform = ctx.transform();
        for primitive in ctx.scene.primitives_ordered() {
            self.render_guide(primitive, transform);
        }
        log::trace!("painted {} guide lines", ctx.scene.len());
        Ok(())
    }
}
