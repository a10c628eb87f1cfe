//! Best-candidate selection per guide line slot.

use crate::candidate::{AlignCandidate, LineId};
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

/// Winning candidate per line id for one drag tick.
pub type SelectedCandidates = BTreeMap<LineId, AlignCandidate>;

/// Streaming reduction that keeps the closest candidate for every line id.
///
/// Memory is bounded by the number of distinct line ids, not by the number
/// of elements offered.
#[derive(Debug, Clone, Default)]
pub struct CandidateSelector {
    winners: SelectedCandidates,
}

impl CandidateSelector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Offer a candidate. Returns true if it became the winner for its id.
    ///
    /// Smaller distance on the tested axis wins. On an exact tie the smaller
    /// cross-axis sum wins, and on a full tie the earlier candidate stays.
    pub fn offer(&mut self, candidate: AlignCandidate) -> bool {
        match self.winners.entry(candidate.id) {
            Entry::Vacant(slot) => {
                slot.insert(candidate);
                true
            }
            Entry::Occupied(mut slot) => {
                if beats(&candidate, slot.get()) {
                    slot.insert(candidate);
                    true
                } else {
                    false
                }
            }
        }
    }

    pub fn len(&self) -> usize {
        self.winners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.winners.is_empty()
    }

    pub fn get(&self, id: &LineId) -> Option<&AlignCandidate> {
        self.winners.get(id)
    }

    pub fn into_winners(self) -> SelectedCandidates {
        self.winners
    }
}

impl Extend<AlignCandidate> for CandidateSelector {
    fn extend<I: IntoIterator<Item = AlignCandidate>>(&mut self, iter: I) {
        for candidate in iter {
            self.offer(candidate);
        }
    }
}

fn beats(challenger: &AlignCandidate, current: &AlignCandidate) -> bool {
    let challenger_distance = challenger.distance();
    let current_distance = current.distance();
    if challenger_distance < current_distance {
        true
    } else if challenger_distance > current_distance {
        false
    } else {
        challenger.cross_distance() < current.cross_distance()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bounds::{Axis, Role};
    use crate::candidate::guide_segment;

    fn candidate(axis: Axis, role: Role, delta: [f64; 3]) -> AlignCandidate {
        let dragged = [0.0, 0.0, 0.0];
        let other = [-delta[0], -delta[1], -delta[2]];
        AlignCandidate {
            id: LineId::new(axis, role),
            axis,
            pair: (role, role),
            dragged_point: dragged,
            other_point: other,
            segment: guide_segment(axis, dragged, other),
            delta,
        }
    }

    #[test]
    fn test_first_candidate_installed() {
        let mut selector = CandidateSelector::new();
        assert!(selector.offer(candidate(Axis::X, Role::Center, [3.0, 0.0, 0.0])));
        assert_eq!(selector.len(), 1);
    }

    #[test]
    fn test_closer_candidate_wins() {
        let mut selector = CandidateSelector::new();
        selector.offer(candidate(Axis::X, Role::Center, [3.0, 0.0, 0.0]));
        assert!(selector.offer(candidate(Axis::X, Role::Center, [-1.0, 0.0, 0.0])));
        assert!(!selector.offer(candidate(Axis::X, Role::Center, [2.0, 0.0, 0.0])));

        let winner = selector.get(&LineId::new(Axis::X, Role::Center)).unwrap();
        assert!((winner.delta[0] + 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_tie_broken_by_cross_axis_sum() {
        let mut selector = CandidateSelector::new();
        selector.offer(candidate(Axis::X, Role::Center, [2.0, 80.0, 0.0]));
        assert!(selector.offer(candidate(Axis::X, Role::Center, [-2.0, 30.0, 0.0])));
        assert!(!selector.offer(candidate(Axis::X, Role::Center, [2.0, -50.0, 0.0])));

        let winner = selector.get(&LineId::new(Axis::X, Role::Center)).unwrap();
        assert!((winner.delta[1] - 30.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_full_tie_keeps_first() {
        let mut selector = CandidateSelector::new();
        let first = candidate(Axis::Y, Role::Min, [0.0, 1.0, 0.0]);
        let mut second = candidate(Axis::Y, Role::Min, [0.0, -1.0, 0.0]);
        second.pair = (Role::Min, Role::Max);

        selector.offer(first.clone());
        assert!(!selector.offer(second));
        assert_eq!(selector.get(&first.id), Some(&first));
    }

    #[test]
    fn test_ids_kept_separate() {
        let mut selector = CandidateSelector::new();
        selector.extend([
            candidate(Axis::X, Role::Center, [1.0, 0.0, 0.0]),
            candidate(Axis::X, Role::Min, [1.0, 0.0, 0.0]),
            candidate(Axis::Y, Role::Center, [0.0, 4.0, 0.0]),
            candidate(Axis::X, Role::Center, [0.5, 0.0, 0.0]),
        ]);

        let winners = selector.into_winners();
        let ids: Vec<_> = winners.keys().map(|id| id.to_string()).collect();
        assert_eq!(ids, vec!["x-min", "x-center", "y-center"]);
    }
}
