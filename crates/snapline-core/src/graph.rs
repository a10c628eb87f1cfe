//! Graph data and element bounds collaborators.
//!
//! The engine reads the graph through [`GraphModel`] and [`BoundsProvider`].
//! [`MemoryGraph`] is a plain in-memory implementation for hosts without
//! their own model and for tests.

use crate::bounds::Bounds;
use kurbo::{Rect, Vec2};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Identifier of a node or combo.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(pub String);

impl ElementId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ElementId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ElementId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Kind of draggable element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementType {
    Node,
    Combo,
}

impl ElementType {
    pub fn name(self) -> &'static str {
        match self {
            ElementType::Node => "node",
            ElementType::Combo => "combo",
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Rendered bounds lookup, owned by the scene graph.
pub trait BoundsProvider {
    /// Current bounds of an element, or `None` if it has none.
    fn bounds(&self, id: &ElementId) -> Option<Bounds>;
}

/// Enumeration of graph elements.
pub trait GraphModel {
    /// Ids of all nodes.
    fn node_ids(&self) -> Vec<ElementId>;

    /// Ids of all combos.
    fn combo_ids(&self) -> Vec<ElementId>;

    /// Type of an element, if it exists.
    fn element_type(&self, id: &ElementId) -> Option<ElementType>;
}

/// A node or combo stored in a [`MemoryGraph`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElementRecord {
    pub id: ElementId,
    pub element_type: ElementType,
    /// Bounds, if the element has been laid out.
    #[serde(default)]
    pub bounds: Option<Bounds>,
    /// Arbitrary payload.
    #[serde(default)]
    pub data: serde_json::Value,
}

/// In-memory graph of nodes and combos with their bounds.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemoryGraph {
    elements: HashMap<ElementId, ElementRecord>,
    /// Insertion order.
    order: Vec<ElementId>,
}

impl MemoryGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace an element.
    pub fn insert(&mut self, record: ElementRecord) {
        if !self.elements.contains_key(&record.id) {
            self.order.push(record.id.clone());
        }
        self.elements.insert(record.id.clone(), record);
    }

    /// Add a node covering `rect`.
    pub fn add_node(&mut self, id: impl Into<ElementId>, rect: Rect) {
        self.insert(ElementRecord {
            id: id.into(),
            element_type: ElementType::Node,
            bounds: Some(Bounds::from_rect(rect)),
            data: serde_json::Value::Null,
        });
    }

    /// Add a combo covering `rect`.
    pub fn add_combo(&mut self, id: impl Into<ElementId>, rect: Rect) {
        self.insert(ElementRecord {
            id: id.into(),
            element_type: ElementType::Combo,
            bounds: Some(Bounds::from_rect(rect)),
            data: serde_json::Value::Null,
        });
    }

    pub fn remove(&mut self, id: &ElementId) -> Option<ElementRecord> {
        self.order.retain(|existing| existing != id);
        self.elements.remove(id)
    }

    pub fn get(&self, id: &ElementId) -> Option<&ElementRecord> {
        self.elements.get(id)
    }

    /// Replace an element's bounds. Returns false if the element is unknown.
    pub fn set_bounds(&mut self, id: &ElementId, bounds: Option<Bounds>) -> bool {
        match self.elements.get_mut(id) {
            Some(record) => {
                record.bounds = bounds;
                true
            }
            None => false,
        }
    }

    /// Move an element by `offset` on the x/y plane.
    pub fn translate(&mut self, id: &ElementId, offset: Vec2) -> bool {
        match self.elements.get_mut(id).and_then(|record| record.bounds.as_mut()) {
            Some(bounds) => {
                bounds.translate(offset);
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Elements in insertion order.
    pub fn elements(&self) -> impl Iterator<Item = &ElementRecord> {
        self.order.iter().filter_map(|id| self.elements.get(id))
    }

    fn ids_of(&self, element_type: ElementType) -> Vec<ElementId> {
        self.elements()
            .filter(|record| record.element_type == element_type)
            .map(|record| record.id.clone())
            .collect()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl BoundsProvider for MemoryGraph {
    fn bounds(&self, id: &ElementId) -> Option<Bounds> {
        self.elements.get(id).and_then(|record| record.bounds)
    }
}

impl GraphModel for MemoryGraph {
    fn node_ids(&self) -> Vec<ElementId> {
        self.ids_of(ElementType::Node)
    }

    fn combo_ids(&self) -> Vec<ElementId> {
        self.ids_of(ElementType::Combo)
    }

    fn element_type(&self, id: &ElementId) -> Option<ElementType> {
        self.elements.get(id).map(|record| record.element_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_enumerate() {
        let mut graph = MemoryGraph::new();
        graph.add_node("b", Rect::new(0.0, 0.0, 10.0, 10.0));
        graph.add_combo("group", Rect::new(0.0, 0.0, 100.0, 100.0));
        graph.add_node("a", Rect::new(20.0, 0.0, 30.0, 10.0));

        assert_eq!(graph.len(), 3);
        assert_eq!(graph.node_ids(), vec![ElementId::from("b"), ElementId::from("a")]);
        assert_eq!(graph.combo_ids(), vec![ElementId::from("group")]);
        assert_eq!(graph.element_type(&"group".into()), Some(ElementType::Combo));
        assert_eq!(graph.element_type(&"missing".into()), None);
    }

    #[test]
    fn test_reinsert_keeps_order() {
        let mut graph = MemoryGraph::new();
        graph.add_node("a", Rect::new(0.0, 0.0, 10.0, 10.0));
        graph.add_node("b", Rect::new(0.0, 0.0, 10.0, 10.0));
        graph.add_node("a", Rect::new(50.0, 0.0, 60.0, 10.0));

        assert_eq!(graph.node_ids(), vec![ElementId::from("a"), ElementId::from("b")]);
        assert_eq!(graph.bounds(&"a".into()).unwrap().min[0], 50.0);
    }

    #[test]
    fn test_remove() {
        let mut graph = MemoryGraph::new();
        graph.add_node("a", Rect::new(0.0, 0.0, 10.0, 10.0));
        assert!(graph.remove(&"a".into()).is_some());
        assert!(graph.is_empty());
        assert!(graph.node_ids().is_empty());
        assert!(graph.bounds(&"a".into()).is_none());
    }

    #[test]
    fn test_translate_and_set_bounds() {
        let mut graph = MemoryGraph::new();
        graph.add_node("a", Rect::new(0.0, 0.0, 10.0, 10.0));
        assert!(graph.translate(&"a".into(), Vec2::new(5.0, 5.0)));
        assert_eq!(graph.bounds(&"a".into()).unwrap().center, [10.0, 10.0, 0.0]);

        assert!(graph.set_bounds(&"a".into(), None));
        assert!(!graph.translate(&"a".into(), Vec2::new(1.0, 1.0)));
        assert!(!graph.set_bounds(&"missing".into(), None));
    }

    #[test]
    fn test_json_roundtrip() {
        let mut graph = MemoryGraph::new();
        graph.add_node("a", Rect::new(0.0, 0.0, 10.0, 10.0));
        graph.add_combo("c", Rect::new(0.0, 0.0, 40.0, 40.0));

        let json = graph.to_json().unwrap();
        let restored = MemoryGraph::from_json(&json).unwrap();
        assert_eq!(restored.node_ids(), graph.node_ids());
        assert_eq!(restored.bounds(&"c".into()), graph.bounds(&"c".into()));
    }
}
