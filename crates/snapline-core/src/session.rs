//! Drag session lifecycle.
//!
//! A session captures a shadow copy of the dragged element's bounds at drag
//! start and moves that copy with the pointer. Alignment tests run against
//! the shadow, never the live element, so layout updates caused by the drag
//! cannot feed back into the guide computation.

use crate::bounds::Bounds;
use crate::candidate::CandidateGenerator;
use crate::graph::{BoundsProvider, ElementId, GraphModel};
use crate::selector::{CandidateSelector, SelectedCandidates};
use kurbo::Vec2;

/// State of a drag session.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum SessionState {
    /// No drag in progress.
    #[default]
    Idle,
    /// An element is being dragged.
    Dragging {
        /// The dragged element.
        target: ElementId,
        /// Shadow bounds, moved by the accumulated pointer delta.
        shadow: Bounds,
    },
}

/// Tracks one drag at a time.
#[derive(Debug, Clone, Default)]
pub struct DragSession {
    state: SessionState,
}

impl DragSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, SessionState::Dragging { .. })
    }

    /// The dragged element, if any.
    pub fn target(&self) -> Option<&ElementId> {
        match &self.state {
            SessionState::Dragging { target, .. } => Some(target),
            SessionState::Idle => None,
        }
    }

    /// Current shadow bounds, if dragging.
    pub fn shadow(&self) -> Option<&Bounds> {
        match &self.state {
            SessionState::Dragging { shadow, .. } => Some(shadow),
            SessionState::Idle => None,
        }
    }

    /// Begin dragging `target`.
    ///
    /// Returns false and stays idle if the element has no bounds. Starting
    /// while another drag is active replaces it.
    pub fn start<B>(&mut self, target: &ElementId, provider: &B) -> bool
    where
        B: BoundsProvider + ?Sized,
    {
        match provider.bounds(target) {
            Some(shadow) => {
                log::debug!("snapline: drag start on {}", target);
                self.state = SessionState::Dragging {
                    target: target.clone(),
                    shadow,
                };
                true
            }
            None => {
                log::debug!("snapline: drag start on {} ignored, no bounds", target);
                self.state = SessionState::Idle;
                false
            }
        }
    }

    /// Advance the drag by `delta` (canvas units) and select guide lines.
    ///
    /// Returns `None` when the tick is skipped: no active session, a
    /// different target, or the dragged element no longer has bounds.
    pub fn drag<G>(
        &mut self,
        target: &ElementId,
        delta: Vec2,
        graph: &G,
        generator: &CandidateGenerator,
    ) -> Option<SelectedCandidates>
    where
        G: GraphModel + BoundsProvider + ?Sized,
    {
        let SessionState::Dragging {
            target: active,
            shadow,
        } = &mut self.state
        else {
            return None;
        };
        if active != target {
            log::trace!("snapline: drag tick for {} while dragging {}", target, active);
            return None;
        }

        shadow.translate(delta);

        graph.bounds(target)?;
        Some(select_alignments(shadow, target, graph, generator))
    }

    /// Finish the drag. Returns true if a session was active for `target`.
    pub fn end(&mut self, target: &ElementId) -> bool {
        match &self.state {
            SessionState::Dragging { target: active, .. } if active == target => {
                log::debug!("snapline: drag end on {}", target);
                self.state = SessionState::Idle;
                true
            }
            _ => false,
        }
    }

    /// Drop any active session.
    pub fn reset(&mut self) {
        self.state = SessionState::Idle;
    }
}

/// Pick the best guide line per slot for `dragged` against every node but `exclude`.
///
/// Nodes are visited in ascending id order, so on a full tie the node with
/// the smallest id keeps the line. Combos are not comparison targets, and
/// nodes without bounds are skipped.
pub fn select_alignments<G>(
    dragged: &Bounds,
    exclude: &ElementId,
    graph: &G,
    generator: &CandidateGenerator,
) -> SelectedCandidates
where
    G: GraphModel + BoundsProvider + ?Sized,
{
    let mut ids = graph.node_ids();
    ids.sort();

    let mut selector = CandidateSelector::new();
    for id in ids.iter().filter(|id| *id != exclude) {
        let Some(other) = graph.bounds(id) else {
            continue;
        };
        selector.extend(generator.all_candidates(dragged, &other));
    }
    selector.into_winners()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::candidate::LineId;
    use crate::bounds::{Axis, Role};
    use crate::graph::MemoryGraph;
    use kurbo::{Point, Rect};

    fn graph_with(nodes: &[(&str, Rect)]) -> MemoryGraph {
        let mut graph = MemoryGraph::new();
        for (id, rect) in nodes {
            graph.add_node(*id, *rect);
        }
        graph
    }

    #[test]
    fn test_start_requires_bounds() {
        let mut graph = graph_with(&[("a", Rect::new(0.0, 0.0, 10.0, 10.0))]);
        graph.set_bounds(&"a".into(), None);
        let mut session = DragSession::new();

        assert!(!session.start(&"a".into(), &graph));
        assert!(!session.is_dragging());
        assert!(!session.start(&"missing".into(), &graph));
    }

    #[test]
    fn test_shadow_moves_but_element_does_not() {
        let graph = graph_with(&[("a", Rect::new(0.0, 0.0, 10.0, 10.0))]);
        let generator = CandidateGenerator::default();
        let mut session = DragSession::new();
        let a = ElementId::from("a");

        assert!(session.start(&a, &graph));
        session.drag(&a, Vec2::new(7.0, 3.0), &graph, &generator);
        session.drag(&a, Vec2::new(1.0, 1.0), &graph, &generator);

        assert_eq!(session.shadow().unwrap().center, [13.0, 9.0, 0.0]);
        assert_eq!(graph.bounds(&a).unwrap().center, [5.0, 5.0, 0.0]);
    }

    #[test]
    fn test_drag_while_idle_is_skipped() {
        let graph = graph_with(&[("a", Rect::new(0.0, 0.0, 10.0, 10.0))]);
        let mut session = DragSession::new();
        let result = session.drag(&"a".into(), Vec2::ZERO, &graph, &CandidateGenerator::default());
        assert!(result.is_none());
    }

    #[test]
    fn test_drag_for_other_target_is_skipped() {
        let graph = graph_with(&[
            ("a", Rect::new(0.0, 0.0, 10.0, 10.0)),
            ("b", Rect::new(0.0, 50.0, 10.0, 60.0)),
        ]);
        let generator = CandidateGenerator::default();
        let mut session = DragSession::new();
        session.start(&"a".into(), &graph);

        assert!(session.drag(&"b".into(), Vec2::new(1.0, 0.0), &graph, &generator).is_none());
        assert_eq!(session.shadow().unwrap().center, [5.0, 5.0, 0.0]);
    }

    #[test]
    fn test_drag_skipped_when_target_loses_bounds() {
        let mut graph = graph_with(&[
            ("a", Rect::new(0.0, 0.0, 10.0, 10.0)),
            ("b", Rect::new(0.0, 50.0, 10.0, 60.0)),
        ]);
        let generator = CandidateGenerator::default();
        let mut session = DragSession::new();
        let a = ElementId::from("a");
        session.start(&a, &graph);

        graph.remove(&a);
        assert!(session.drag(&a, Vec2::ZERO, &graph, &generator).is_none());
        assert!(session.is_dragging());
    }

    #[test]
    fn test_end_returns_to_idle() {
        let graph = graph_with(&[("a", Rect::new(0.0, 0.0, 10.0, 10.0))]);
        let mut session = DragSession::new();
        let a = ElementId::from("a");
        session.start(&a, &graph);

        assert!(!session.end(&"b".into()));
        assert!(session.end(&a));
        assert_eq!(session.state(), &SessionState::Idle);
        assert!(session.shadow().is_none());
        assert!(!session.end(&a));
    }

    #[test]
    fn test_select_skips_self_and_combos() {
        let mut graph = graph_with(&[
            ("a", Rect::new(0.0, 0.0, 10.0, 10.0)),
            ("far", Rect::new(500.0, 500.0, 510.0, 510.0)),
        ]);
        graph.add_combo("combo", Rect::new(0.0, 40.0, 10.0, 50.0));
        let generator = CandidateGenerator::default();
        let a = ElementId::from("a");
        let dragged = graph.bounds(&a).unwrap();

        let winners = select_alignments(&dragged, &a, &graph, &generator);
        assert!(winners.is_empty());
    }

    #[test]
    fn test_select_skips_nodes_without_bounds() {
        let mut graph = graph_with(&[
            ("a", Rect::new(0.0, 0.0, 10.0, 10.0)),
            ("b", Rect::new(0.0, 50.0, 10.0, 60.0)),
            ("c", Rect::new(2.0, 80.0, 12.0, 90.0)),
        ]);
        graph.set_bounds(&"b".into(), None);
        let a = ElementId::from("a");
        let dragged = graph.bounds(&a).unwrap();

        let winners = select_alignments(&dragged, &a, &graph, &CandidateGenerator::default());
        let line = winners.get(&LineId::new(Axis::X, Role::Center)).unwrap();
        assert_eq!(line.segment.p1, Point::new(7.0, 85.0));
    }

    #[test]
    fn test_full_tie_goes_to_smallest_id() {
        // "n2" inserted first but "n1" sorts first; both are mirror images of
        // each other around the dragged node.
        let graph = graph_with(&[
            ("a", Rect::new(0.0, 0.0, 10.0, 10.0)),
            ("n2", Rect::new(0.0, 40.0, 10.0, 50.0)),
            ("n1", Rect::new(0.0, -40.0, 10.0, -30.0)),
        ]);
        let a = ElementId::from("a");
        let dragged = graph.bounds(&a).unwrap();

        let winners = select_alignments(&dragged, &a, &graph, &CandidateGenerator::default());
        let line = winners.get(&LineId::new(Axis::X, Role::Center)).unwrap();
        assert_eq!(line.other_point, [5.0, -35.0, 0.0]);
    }
}
