//! Alignment candidate generation.
//!
//! A candidate describes one potential guide line: a reference point of the
//! dragged element lining up with a reference point of another element on
//! a single axis, within tolerance.

use crate::bounds::{Axis, Bounds, Point3, Role};
use kurbo::{Line, Point};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default per-axis tolerance in canvas units.
pub const DEFAULT_TOLERANCE: f64 = 5.0;

/// Identity of a guide line slot: the tested axis plus the dragged element's role.
///
/// Every candidate that would render as "the same line" shares a `LineId`,
/// whichever element produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LineId {
    pub axis: Axis,
    pub role: Role,
}

impl LineId {
    pub fn new(axis: Axis, role: Role) -> Self {
        Self { axis, role }
    }
}

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.axis, self.role)
    }
}

/// Maximum absolute difference per axis at which two values count as aligned.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tolerance(pub [f64; 3]);

impl Default for Tolerance {
    fn default() -> Self {
        Self::uniform(DEFAULT_TOLERANCE)
    }
}

impl Tolerance {
    /// Same tolerance on every axis.
    pub fn uniform(value: f64) -> Self {
        Self([value; 3])
    }

    pub fn get(&self, axis: Axis) -> f64 {
        self.0[axis.index()]
    }

    /// Check that every component is finite and non-negative.
    pub fn is_valid(&self) -> bool {
        self.0.iter().all(|v| v.is_finite() && *v >= 0.0)
    }
}

/// A `(role of dragged, role of other)` pair to test.
pub type RolePair = (Role, Role);

/// Role pairs tested on each axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlignModes {
    pub x: Vec<RolePair>,
    pub y: Vec<RolePair>,
    pub z: Vec<RolePair>,
}

impl Default for AlignModes {
    fn default() -> Self {
        let planar = vec![
            (Role::Center, Role::Center),
            (Role::Min, Role::Max),
            (Role::Max, Role::Min),
        ];
        Self {
            x: planar.clone(),
            y: planar,
            z: Vec::new(),
        }
    }
}

impl AlignModes {
    /// Role pairs for an axis, in test order.
    pub fn pairs(&self, axis: Axis) -> &[RolePair] {
        match axis {
            Axis::X => &self.x,
            Axis::Y => &self.y,
            Axis::Z => &self.z,
        }
    }
}

/// One potential guide line between the dragged element and another element.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignCandidate {
    /// Line slot this candidate would occupy.
    pub id: LineId,
    /// Axis the alignment was tested on.
    pub axis: Axis,
    /// Roles compared (dragged, other).
    pub pair: RolePair,
    /// Reference point of the dragged element.
    pub dragged_point: Point3,
    /// Reference point of the other element.
    pub other_point: Point3,
    /// Guide line to render, from the dragged anchor to the other anchor.
    pub segment: Line,
    /// `dragged_point - other_point` on every axis.
    pub delta: Point3,
}

impl AlignCandidate {
    /// Absolute difference on the tested axis.
    pub fn distance(&self) -> f64 {
        self.delta[self.axis.index()].abs()
    }

    /// Sum of absolute differences on the two untested axes.
    pub fn cross_distance(&self) -> f64 {
        self.axis
            .others()
            .iter()
            .map(|axis| self.delta[axis.index()].abs())
            .sum()
    }
}

/// Build the guide segment for an alignment on `axis`.
///
/// The start keeps the dragged point but takes the other point's coordinate
/// on the tested axis, so X alignments draw vertical lines and Y alignments
/// draw horizontal ones.
pub fn guide_segment(axis: Axis, dragged: Point3, other: Point3) -> Line {
    let end = Point::new(other[0], other[1]);
    let start = match axis {
        Axis::X => Point::new(other[0], dragged[1]),
        Axis::Y => Point::new(dragged[0], other[1]),
        Axis::Z => Point::new(dragged[0], dragged[1]),
    };
    Line::new(start, end)
}

/// Produces alignment candidates for pairs of bounds.
#[derive(Debug, Clone, Default)]
pub struct CandidateGenerator {
    pub tolerance: Tolerance,
    pub modes: AlignModes,
}

impl CandidateGenerator {
    pub fn new(tolerance: Tolerance, modes: AlignModes) -> Self {
        Self { tolerance, modes }
    }

    /// Candidates for one axis, in role-pair order. Yields zero or more.
    pub fn candidates<'a>(
        &'a self,
        dragged: &'a Bounds,
        other: &'a Bounds,
        axis: Axis,
    ) -> impl Iterator<Item = AlignCandidate> + 'a {
        let tolerance = self.tolerance.get(axis);
        self.modes
            .pairs(axis)
            .iter()
            .filter_map(move |&pair| test_pair(dragged, other, axis, pair, tolerance))
    }

    /// Candidates for every axis, x first.
    pub fn all_candidates<'a>(
        &'a self,
        dragged: &'a Bounds,
        other: &'a Bounds,
    ) -> impl Iterator<Item = AlignCandidate> + 'a {
        Axis::ALL
            .into_iter()
            .flat_map(move |axis| self.candidates(dragged, other, axis))
    }
}

fn test_pair(
    dragged: &Bounds,
    other: &Bounds,
    axis: Axis,
    (dragged_role, other_role): RolePair,
    tolerance: f64,
) -> Option<AlignCandidate> {
    let dragged_point = dragged.point(dragged_role);
    let other_point = other.point(other_role);
    let diff = dragged_point[axis.index()] - other_point[axis.index()];
    if diff.abs() > tolerance || diff.is_nan() {
        return None;
    }

    let delta = [
        dragged_point[0] - other_point[0],
        dragged_point[1] - other_point[1],
        dragged_point[2] - other_point[2],
    ];

    Some(AlignCandidate {
        id: LineId::new(axis, dragged_role),
        axis,
        pair: (dragged_role, other_role),
        dragged_point,
        other_point,
        segment: guide_segment(axis, dragged_point, other_point),
        delta,
    })
}
