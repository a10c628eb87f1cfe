//! In-memory scene of guide line primitives.

use kurbo::Line;
use snapline_core::candidate::LineId;
use snapline_core::guide::GuideCanvas;
use snapline_core::style::GuideLineStyle;
use std::collections::HashMap;
use std::fmt;
use uuid::Uuid;

/// Unique identifier of a primitive in a [`GuideScene`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PrimitiveId(pub Uuid);

impl PrimitiveId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for PrimitiveId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A guide line attached to the scene.
#[derive(Debug, Clone, PartialEq)]
pub struct GuidePrimitive {
    pub id: PrimitiveId,
    /// Guide line slot the primitive was created for.
    pub line_id: LineId,
    /// Endpoints in canvas coordinates.
    pub segment: Line,
    pub style: GuideLineStyle,
}

/// Scene graph holding guide line primitives in attach order.
#[derive(Debug, Clone, Default)]
pub struct GuideScene {
    primitives: HashMap<PrimitiveId, GuidePrimitive>,
    /// Attach order (back to front).
    order: Vec<PrimitiveId>,
}

impl GuideScene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: PrimitiveId) -> Option<&GuidePrimitive> {
        self.primitives.get(&id)
    }

    /// The primitive shown for a guide line slot, if any.
    pub fn find(&self, line_id: LineId) -> Option<&GuidePrimitive> {
        self.primitives_ordered().find(|p| p.line_id == line_id)
    }

    /// Primitives in attach order.
    pub fn primitives_ordered(&self) -> impl Iterator<Item = &GuidePrimitive> {
        self.order.iter().filter_map(|id| self.primitives.get(id))
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }
}

impl GuideCanvas for GuideScene {
    type Handle = PrimitiveId;

    fn append_line(
        &mut self,
        line_id: LineId,
        segment: Line,
        style: &GuideLineStyle,
    ) -> PrimitiveId {
        let id = PrimitiveId::new();
        self.order.push(id);
        self.primitives.insert(
            id,
            GuidePrimitive {
                id,
                line_id,
                segment,
                style: style.clone(),
            },
        );
        id
    }

    fn update_line(&mut self, handle: &PrimitiveId, segment: Line) {
        match self.primitives.get_mut(handle) {
            Some(primitive) => primitive.segment = segment,
            None => log::warn!("guide scene: update of detached primitive {}", handle),
        }
    }

    fn remove_line(&mut self, handle: PrimitiveId) {
        self.order.retain(|id| *id != handle);
        self.primitives.remove(&handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;
    use snapline_core::bounds::{Axis, Role};

    fn segment(x: f64) -> Line {
        Line::new(Point::new(x, 0.0), Point::new(x, 100.0))
    }

    #[test]
    fn test_append_update_remove() {
        let mut scene = GuideScene::new();
        let style = GuideLineStyle::default();
        let id = scene.append_line(LineId::new(Axis::X, Role::Center), segment(5.0), &style);

        assert_eq!(scene.len(), 1);
        assert_eq!(scene.get(id).unwrap().segment, segment(5.0));

        scene.update_line(&id, segment(9.0));
        assert_eq!(scene.get(id).unwrap().segment, segment(9.0));

        scene.remove_line(id);
        assert!(scene.is_empty());
        assert!(scene.get(id).is_none());
    }

    #[test]
    fn test_attach_order() {
        let mut scene = GuideScene::new();
        let style = GuideLineStyle::default();
        let first = scene.append_line(LineId::new(Axis::Y, Role::Max), segment(1.0), &style);
        let second = scene.append_line(LineId::new(Axis::X, Role::Min), segment(2.0), &style);

        let ids: Vec<_> = scene.primitives_ordered().map(|p| p.id).collect();
        assert_eq!(ids, vec![first, second]);
        assert_eq!(scene.find(LineId::new(Axis::X, Role::Min)).unwrap().id, second);
        assert!(scene.find(LineId::new(Axis::X, Role::Center)).is_none());
    }

    #[test]
    fn test_update_detached_is_ignored() {
        let mut scene = GuideScene::new();
        let style = GuideLineStyle::default();
        let id = scene.append_line(LineId::new(Axis::X, Role::Center), segment(5.0), &style);
        scene.remove_line(id);
        scene.update_line(&id, segment(7.0));
        assert!(scene.is_empty());
    }
}
