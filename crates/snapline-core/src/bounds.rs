//! Axis-aligned bounds snapshots with named reference points.

use kurbo::{Rect, Vec2};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A point in canvas space (x, y, z).
pub type Point3 = [f64; 3];

/// Canvas axis, ordered x < y < z.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// All axes in order.
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Component index of this axis in a [`Point3`].
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    /// The two axes other than this one.
    pub fn others(self) -> [Axis; 2] {
        match self {
            Axis::X => [Axis::Y, Axis::Z],
            Axis::Y => [Axis::X, Axis::Z],
            Axis::Z => [Axis::X, Axis::Y],
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which reference point of a bounds volume takes part in an alignment test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Min,
    Center,
    Max,
}

impl Role {
    pub fn name(self) -> &'static str {
        match self {
            Role::Min => "min",
            Role::Center => "center",
            Role::Max => "max",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Axis-aligned bounding volume of an element.
///
/// Holds the `min`, `center` and `max` points so alignment tests can read any
/// role directly. Values are plain copies: translating a snapshot never
/// affects the element it was taken from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: Point3,
    pub center: Point3,
    pub max: Point3,
}

impl Bounds {
    /// Create bounds from two corners, deriving the center.
    pub fn new(min: Point3, max: Point3) -> Self {
        let center = [
            (min[0] + max[0]) / 2.0,
            (min[1] + max[1]) / 2.0,
            (min[2] + max[2]) / 2.0,
        ];
        Self { min, center, max }
    }

    /// Create bounds from explicit points.
    pub fn from_points(min: Point3, center: Point3, max: Point3) -> Self {
        Self { min, center, max }
    }

    /// Flat bounds (z = 0) covering a 2D rectangle.
    pub fn from_rect(rect: Rect) -> Self {
        let rect = rect.abs();
        Self::new([rect.x0, rect.y0, 0.0], [rect.x1, rect.y1, 0.0])
    }

    /// The reference point for a role.
    pub fn point(&self, role: Role) -> Point3 {
        match role {
            Role::Min => self.min,
            Role::Center => self.center,
            Role::Max => self.max,
        }
    }

    /// A single coordinate of the reference point for a role.
    pub fn value(&self, role: Role, axis: Axis) -> f64 {
        self.point(role)[axis.index()]
    }

    /// Shift the x/y components of all three points. Z is left untouched.
    pub fn translate(&mut self, offset: Vec2) {
        for point in [&mut self.min, &mut self.center, &mut self.max] {
            point[0] += offset.x;
            point[1] += offset.y;
        }
    }

    /// Copy translated by `offset`.
    pub fn translated(mut self, offset: Vec2) -> Self {
        self.translate(offset);
        self
    }

    /// Check `min <= center <= max` on every axis.
    pub fn is_valid(&self) -> bool {
        (0..3).all(|i| self.min[i] <= self.center[i] && self.center[i] <= self.max[i])
    }

    /// The x/y footprint as a rectangle.
    pub fn to_rect(&self) -> Rect {
        Rect::new(self.min[0], self.min[1], self.max[0], self.max[1])
    }
}
