//! Guide line reconciliation against a rendering canvas.

use crate::candidate::LineId;
use crate::selector::SelectedCandidates;
use crate::style::GuideLineStyle;
use kurbo::Line;
use std::collections::BTreeMap;

/// Scene-graph side of the guide lines.
///
/// The canvas owns the rendered primitives; the engine only keeps handles.
pub trait GuideCanvas {
    /// Handle to a line primitive living on the canvas.
    type Handle;

    /// Create a line primitive and attach it to the canvas.
    fn append_line(&mut self, id: LineId, segment: Line, style: &GuideLineStyle) -> Self::Handle;

    /// Move the endpoints of an existing primitive.
    fn update_line(&mut self, handle: &Self::Handle, segment: Line);

    /// Detach a primitive from the canvas.
    fn remove_line(&mut self, handle: Self::Handle);
}

/// What a reconciliation pass did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileStats {
    pub created: usize,
    pub updated: usize,
    pub unchanged: usize,
    pub removed: usize,
}

impl ReconcileStats {
    /// Check if the canvas was touched at all.
    pub fn changed(&self) -> bool {
        self.created + self.updated + self.removed > 0
    }
}

#[derive(Debug, Clone)]
struct LiveLine<H> {
    handle: H,
    segment: Line,
}

/// Guide lines currently shown on the canvas, keyed by line id.
#[derive(Debug, Clone)]
pub struct GuideLines<H> {
    lines: BTreeMap<LineId, LiveLine<H>>,
}

impl<H> Default for GuideLines<H> {
    fn default() -> Self {
        Self {
            lines: BTreeMap::new(),
        }
    }
}

impl<H> GuideLines<H> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn contains(&self, id: &LineId) -> bool {
        self.lines.contains_key(id)
    }

    /// Segment last pushed to the canvas for a line.
    pub fn segment(&self, id: &LineId) -> Option<Line> {
        self.lines.get(id).map(|line| line.segment)
    }

    pub fn handle(&self, id: &LineId) -> Option<&H> {
        self.lines.get(id).map(|line| &line.handle)
    }

    /// Live line ids in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = LineId> + '_ {
        self.lines.keys().copied()
    }

    /// Bring the canvas in line with this tick's winners.
    ///
    /// Existing lines are moved, new ones are created with `style`, and
    /// lines without a winner are detached from the canvas.
    pub fn reconcile<C>(
        &mut self,
        canvas: &mut C,
        selected: &SelectedCandidates,
        style: &GuideLineStyle,
    ) -> ReconcileStats
    where
        C: GuideCanvas<Handle = H>,
    {
        let mut stats = ReconcileStats::default();

        for (id, candidate) in selected {
            let segment = candidate.segment;
            match self.lines.get_mut(id) {
                Some(live) if live.segment == segment => stats.unchanged += 1,
                Some(live) => {
                    canvas.update_line(&live.handle, segment);
                    live.segment = segment;
                    stats.updated += 1;
                }
                None => {
                    let handle = canvas.append_line(*id, segment, style);
                    self.lines.insert(*id, LiveLine { handle, segment });
                    stats.created += 1;
                }
            }
        }

        let stale: Vec<LineId> = self
            .lines
            .keys()
            .filter(|id| !selected.contains_key(id))
            .copied()
            .collect();
        for id in stale {
            if let Some(live) = self.lines.remove(&id) {
                canvas.remove_line(live.handle);
                stats.removed += 1;
            }
        }

        stats
    }

    /// Detach every live line. Returns how many were removed.
    pub fn clear<C>(&mut self, canvas: &mut C) -> usize
    where
        C: GuideCanvas<Handle = H>,
    {
        let count = self.lines.len();
        for (_, live) in std::mem::take(&mut self.lines) {
            canvas.remove_line(live.handle);
        }
        count
    }
}

#[cfg(test)]
pub(crate) mod test_canvas {
    use super::*;
    use std::collections::HashMap;

    /// Canvas that records primitives in memory.
    #[derive(Debug, Default)]
    pub struct RecordingCanvas {
        next: u32,
        pub attached: HashMap<u32, (LineId, Line)>,
        pub appends: usize,
        pub updates: usize,
        pub removals: usize,
    }

    impl RecordingCanvas {
        pub fn segment_of(&self, id: LineId) -> Option<Line> {
            self.attached
                .values()
                .find(|(line_id, _)| *line_id == id)
                .map(|(_, segment)| *segment)
        }
    }

    impl GuideCanvas for RecordingCanvas {
        type Handle = u32;

        fn append_line(&mut self, id: LineId, segment: Line, _style: &GuideLineStyle) -> u32 {
            self.next += 1;
            self.attached.insert(self.next, (id, segment));
            self.appends += 1;
            self.next
        }

        fn update_line(&mut self, handle: &u32, segment: Line) {
            if let Some(entry) = self.attached.get_mut(handle) {
                entry.1 = segment;
            }
            self.updates += 1;
        }

        fn remove_line(&mut self, handle: u32) {
            self.attached.remove(&handle);
            self.removals += 1;
        }
    }
}
