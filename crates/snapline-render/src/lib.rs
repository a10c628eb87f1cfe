//! SnapLine Render Library
//!
//! Guide line scene and renderers for SnapLine.
//! The default implementation uses Vello for GPU-accelerated rendering.

mod renderer;
pub mod scene;

#[cfg(feature = "vello-renderer")]
mod vello_impl;

pub use renderer::{GuideRenderer, RenderContext, RenderError, RenderResult, guide_stroke};
pub use scene::{GuidePrimitive, GuideScene, PrimitiveId};

#[cfg(feature = "vello-renderer")]
pub use vello_impl::VelloGuideRenderer;
