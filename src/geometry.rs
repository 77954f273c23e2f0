//! Types for dealing with the geometry of a cube and the 2D net it unfolds
//! into.
//!
//! The 3D side of things models a cube with side length 2 centered at the
//! origin, so that every corner sits at (±1, ±1, ±1). Its 12 edges each carry a
//! representative corner point and a unit vector giving the edge's forward
//! sense; rotating the cube rotates both. Which physical edge an `Edge` is
//! never changes - that's what its id records - but its point and vector do,
//! and matching edges up after a sequence of rotations is always done on the
//! current point + vector, never the id.

use std::fmt::{self, Display, Formatter};

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// A facing direction on the net.
///
/// The discriminants are fixed: a clockwise turn increments the direction by 1
/// mod 4, which the rest of the crate relies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}
use Direction::*;

impl Direction {
    /// All four directions, in discriminant order.
    pub const VALUES: [Direction; 4] = [Up, Right, Down, Left];

    /// Returns `self` rotated by a given number of clockwise turns.
    #[inline]
    pub fn turned(self, turns: i8) -> Self {
        match i8::wrapping_add(self as i8, turns) & 0b11 {
            0 => Up,
            1 => Right,
            2 => Down,
            3 => Left,
            _ => unreachable!(),
        }
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Up => "up",
            Right => "right",
            Down => "down",
            Left => "left",
        })
    }
}

/// A position in 2D space, with y growing downwards like the rows of the
/// input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub x: u8,
    pub y: u8,
}

impl Pos {
    pub fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }

    /// Returns this position moved 1 unit in the given direction, if it fits
    /// within the given size.
    pub fn moved_in(self, direction: Direction, size: Size) -> Option<Self> {
        match direction {
            Up if self.y > 0 => Some(Pos::new(self.x, self.y - 1)),
            Right if self.x < size.width - 1 => Some(Pos::new(self.x + 1, self.y)),
            Down if self.y < size.height - 1 => Some(Pos::new(self.x, self.y + 1)),
            Left if self.x > 0 => Some(Pos::new(self.x - 1, self.y)),
            // One of our bounds checks failed.
            _ => None,
        }
    }
}

impl Display for Pos {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A size in 2D space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Size {
    pub width: u8,
    pub height: u8,
}

impl Size {
    pub fn new(width: u8, height: u8) -> Self {
        Self { width, height }
    }
}

/// One of the three principal axes of 3D space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// An integer vector (or point) in 3D space.
///
/// Everything in this crate lives on the unit cube, so the components only
/// ever take the values -1, 0 and 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: i8,
    pub y: i8,
    pub z: i8,
}

impl Vec3 {
    pub const fn new(x: i8, y: i8, z: i8) -> Self {
        Self { x, y, z }
    }

    /// Returns this vector rotated 90° around the given axis.
    ///
    /// Each arm is the closed form of multiplying by the standard rotation
    /// matrix for that axis; four applications get back to the original
    /// vector.
    pub fn rotated(self, axis: Axis) -> Self {
        match axis {
            Axis::X => Vec3::new(self.x, -self.z, self.y),
            Axis::Y => Vec3::new(self.z, self.y, -self.x),
            Axis::Z => Vec3::new(-self.y, self.x, self.z),
        }
    }

    /// Returns this vector rotated 90° around the given axis `turns` times.
    pub fn rotated_by(self, axis: Axis, turns: u8) -> Self {
        (0..turns % 4).fold(self, |vector, _| vector.rotated(axis))
    }
}

/// One of the 12 physical edges of the cube.
///
/// The id is assigned once when the cube is built and then never changes;
/// rotations only move the point and vector around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub id: u8,
    /// The corner the edge is read from, in the cube's current orientation.
    pub point: Vec3,
    /// The edge's forward sense, in the cube's current orientation.
    pub vector: Vec3,
}

impl Edge {
    const fn new(id: u8, point: Vec3, vector: Vec3) -> Self {
        Self { id, point, vector }
    }

    /// Whether this edge currently occupies the given geometric slot.
    ///
    /// Deliberately ignores the id: this is how an edge is recognised as "the
    /// edge currently sitting in this spot on top of the cube" after
    /// rotations.
    pub fn matches(&self, point: Vec3, vector: Vec3) -> bool {
        self.point == point && self.vector == vector
    }

    /// Rotates the edge as if the whole cube were tipped over to reveal the
    /// face in the given direction (looking at the cube from above).
    fn rotate(&mut self, direction: Direction) {
        // Tipping up/down pivots around the x axis, left/right around the y
        // axis; 3 turns is a single 90° rotation the other way around.
        let (axis, turns) = match direction {
            Up => (Axis::X, 1),
            Down => (Axis::X, 3),
            Right => (Axis::Y, 3),
            Left => (Axis::Y, 1),
        };
        self.point = self.point.rotated_by(axis, turns);
        self.vector = self.vector.rotated_by(axis, turns);
    }
}

/// The (point, vector) patterns of the 4 top edges, in up/right/down/left
/// order. Each side has two patterns because the edge occupying it may
/// currently be read from either of its endpoints.
const TOP_PATTERNS: [[(Vec3, Vec3); 2]; 4] = [
    // up
    [
        (Vec3::new(-1, 1, 1), Vec3::new(1, 0, 0)),
        (Vec3::new(1, 1, 1), Vec3::new(-1, 0, 0)),
    ],
    // right
    [
        (Vec3::new(1, 1, 1), Vec3::new(0, -1, 0)),
        (Vec3::new(1, -1, 1), Vec3::new(0, 1, 0)),
    ],
    // down
    [
        (Vec3::new(1, -1, 1), Vec3::new(-1, 0, 0)),
        (Vec3::new(-1, -1, 1), Vec3::new(1, 0, 0)),
    ],
    // left
    [
        (Vec3::new(-1, -1, 1), Vec3::new(0, 1, 0)),
        (Vec3::new(-1, 1, 1), Vec3::new(0, -1, 0)),
    ],
];

/// A cube, represented as its 12 edges.
///
/// In the initial orientation, edges 1-4 are the top ring going clockwise when
/// seen from above, starting from the far edge; 5-8 are the vertical edges
/// under the top ring's corners, pointing downwards; and 9-12 are the bottom
/// ring, again clockwise from above.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cube {
    edges: [Edge; 12],
}

impl Cube {
    pub fn new() -> Self {
        Self {
            edges: [
                // Top edges.
                Edge::new(1, Vec3::new(-1, 1, 1), Vec3::new(1, 0, 0)),
                Edge::new(2, Vec3::new(1, 1, 1), Vec3::new(0, -1, 0)),
                Edge::new(3, Vec3::new(1, -1, 1), Vec3::new(-1, 0, 0)),
                Edge::new(4, Vec3::new(-1, -1, 1), Vec3::new(0, 1, 0)),
                // Vertical edges.
                Edge::new(5, Vec3::new(-1, 1, 1), Vec3::new(0, 0, -1)),
                Edge::new(6, Vec3::new(1, 1, 1), Vec3::new(0, 0, -1)),
                Edge::new(7, Vec3::new(1, -1, 1), Vec3::new(0, 0, -1)),
                Edge::new(8, Vec3::new(-1, -1, 1), Vec3::new(0, 0, -1)),
                // Bottom edges.
                Edge::new(9, Vec3::new(-1, 1, -1), Vec3::new(1, 0, 0)),
                Edge::new(10, Vec3::new(1, 1, -1), Vec3::new(0, -1, 0)),
                Edge::new(11, Vec3::new(1, -1, -1), Vec3::new(-1, 0, 0)),
                Edge::new(12, Vec3::new(-1, -1, -1), Vec3::new(0, 1, 0)),
            ],
        }
    }

    pub fn edges(&self) -> &[Edge; 12] {
        &self.edges
    }

    /// Rotates the whole cube to reveal the face in the given direction.
    pub fn rotate(&mut self, direction: Direction) {
        for edge in &mut self.edges {
            edge.rotate(direction);
        }
    }

    /// Returns the 4 edges currently on top of the cube, in up/right/down/left
    /// order as seen on the net.
    ///
    /// The lookup is purely geometric, so it works after any sequence of
    /// rotations. An edge failing to turn up for one of the slots means the
    /// cube's geometry has been corrupted, which is a bug rather than an input
    /// problem.
    pub fn top_edges(&self) -> anyhow::Result<[Edge; 4]> {
        let mut found = [None; 4];
        for (slot, patterns) in found.iter_mut().zip(&TOP_PATTERNS) {
            *slot = self
                .edges
                .iter()
                .find(|edge| {
                    patterns
                        .iter()
                        .any(|&(point, vector)| edge.matches(point, vector))
                })
                .copied();
        }
        match found {
            [Some(up), Some(right), Some(down), Some(left)] => Ok([up, right, down, left]),
            _ => {
                let missing = Direction::VALUES[found.iter().position(Option::is_none).unwrap()];
                None.with_context(|| format!("no edge matches the top {missing} pattern"))
            }
        }
    }
}

impl Default for Cube {
    fn default() -> Self {
        Self::new()
    }
}
