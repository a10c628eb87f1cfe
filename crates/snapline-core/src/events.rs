//! Element drag events and the pub/sub bus they are routed through.

use crate::graph::{ElementId, ElementType};
use kurbo::Vec2;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Phase of an element drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DragPhase {
    Start,
    Move,
    End,
}

impl DragPhase {
    pub const ALL: [DragPhase; 3] = [DragPhase::Start, DragPhase::Move, DragPhase::End];

    pub fn name(self) -> &'static str {
        match self {
            DragPhase::Start => "dragstart",
            DragPhase::Move => "drag",
            DragPhase::End => "dragend",
        }
    }
}

/// Name of a bus event, e.g. `node:dragstart`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EventName {
    pub element_type: ElementType,
    pub phase: DragPhase,
}

impl EventName {
    pub fn new(element_type: ElementType, phase: DragPhase) -> Self {
        Self { element_type, phase }
    }
}

impl fmt::Display for EventName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.element_type, self.phase.name())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown event name: {0}")]
pub struct UnknownEvent(pub String);

impl FromStr for EventName {
    type Err = UnknownEvent;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || UnknownEvent(s.to_string());
        let (element, phase) = s.split_once(':').ok_or_else(unknown)?;
        let element_type = match element {
            "node" => ElementType::Node,
            "combo" => ElementType::Combo,
            _ => return Err(unknown()),
        };
        let phase = DragPhase::ALL
            .into_iter()
            .find(|p| p.name() == phase)
            .ok_or_else(unknown)?;
        Ok(Self::new(element_type, phase))
    }
}

/// Drag event delivered for a node or combo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementDragEvent {
    /// The element being dragged.
    pub target: ElementId,
    pub element_type: ElementType,
    pub phase: DragPhase,
    /// Pointer movement since the previous event, in screen pixels.
    pub dx: f64,
    pub dy: f64,
}

impl ElementDragEvent {
    pub fn start(target: impl Into<ElementId>, element_type: ElementType) -> Self {
        Self {
            target: target.into(),
            element_type,
            phase: DragPhase::Start,
            dx: 0.0,
            dy: 0.0,
        }
    }

    pub fn drag(target: impl Into<ElementId>, element_type: ElementType, dx: f64, dy: f64) -> Self {
        Self {
            target: target.into(),
            element_type,
            phase: DragPhase::Move,
            dx,
            dy,
        }
    }

    pub fn end(target: impl Into<ElementId>, element_type: ElementType) -> Self {
        Self {
            target: target.into(),
            element_type,
            phase: DragPhase::End,
            dx: 0.0,
            dy: 0.0,
        }
    }

    pub fn name(&self) -> EventName {
        EventName::new(self.element_type, self.phase)
    }

    /// Pointer delta in screen pixels.
    pub fn delta(&self) -> Vec2 {
        Vec2::new(self.dx, self.dy)
    }
}

/// Identifies a subscriber on an [`EventBus`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

/// Host-side pub/sub registry mapping event names to subscribers.
///
/// The bus only records who listens to what; the host routes each event to
/// the subscribers returned by [`EventBus::listeners`].
#[derive(Debug, Clone, Default)]
pub struct EventBus {
    listeners: HashMap<EventName, Vec<ListenerId>>,
    next_id: u64,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a fresh subscriber id.
    pub fn register(&mut self) -> ListenerId {
        self.next_id += 1;
        ListenerId(self.next_id)
    }

    /// Subscribe `listener` to `name`. Subscribing twice is a no-op.
    pub fn on(&mut self, name: EventName, listener: ListenerId) {
        let entry = self.listeners.entry(name).or_default();
        if !entry.contains(&listener) {
            log::debug!("event bus: {:?} listens to {}", listener, name);
            entry.push(listener);
        }
    }

    /// Unsubscribe `listener` from `name`.
    pub fn off(&mut self, name: EventName, listener: ListenerId) {
        if let Some(entry) = self.listeners.get_mut(&name) {
            entry.retain(|l| *l != listener);
            if entry.is_empty() {
                self.listeners.remove(&name);
            }
        }
    }

    /// Remove every subscription held by `listener`.
    pub fn off_all(&mut self, listener: ListenerId) {
        self.listeners.retain(|_, entry| {
            entry.retain(|l| *l != listener);
            !entry.is_empty()
        });
    }

    /// Subscribers of `name`, in subscription order.
    pub fn listeners(&self, name: EventName) -> &[ListenerId] {
        self.listeners.get(&name).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_bound(&self, name: EventName, listener: ListenerId) -> bool {
        self.listeners(name).contains(&listener)
    }

    /// Call `handler` for each subscriber of the event's name.
    ///
    /// The bus only tracks listener ids. The host owns the id-to-plugin
    /// mapping and forwards each call to that plugin's `handle_event`.
    pub fn emit(
        &self,
        event: &ElementDragEvent,
        mut handler: impl FnMut(ListenerId, &ElementDragEvent),
    ) {
        for &listener in self.listeners(event.name()) {
            handler(listener, event);
        }
    }
}
