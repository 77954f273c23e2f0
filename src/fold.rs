//! Folding the net into a cube and deriving the wraparound jump tables.
//!
//! The interesting part lives here: discovery walks the occupied face-cells of
//! the net, physically folding a model cube along the way, so that every face
//! ends up knowing which of the cube's 12 edges its four sides are. Two faces
//! naming the same edge are glued together once the cube is folded, and
//! pairing up the tiles along their shared edge gives the jump table the
//! walker uses to cross the gaps in the flat map.

use anyhow::{bail, ensure};
use itertools::Itertools;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::{Board, Cube, Direction, Edge, Pos, Tile};

use Direction::*;

/// A face of the net: a face-cell together with the cube edges its four sides
/// landed on when the net was folded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Face {
    /// Where the face sits on the net, in face-cell coordinates.
    pub cell: Pos,
    /// The side length of the face in tiles.
    pub size: u8,
    /// The cube edges along the face's sides, indexed by `Direction`.
    pub edges: [Edge; 4],
}

impl Face {
    /// Returns which side of this face carries the cube edge with the given
    /// id, if any.
    pub fn side_of(&self, id: u8) -> Option<Direction> {
        let index = self.edges.iter().position(|edge| edge.id == id)?;
        Some(Direction::VALUES[index])
    }

    /// Returns the tile coordinates (local to this face) running along the
    /// given side, ordered by the side's edge vector.
    ///
    /// The ordering is what lines corresponding tiles up between the two
    /// faces sharing an edge: both faces list the edge's tiles in the
    /// direction the edge points, so position i on one side folds onto
    /// position i on the other.
    pub fn boundary(&self, side: Direction) -> Vec<Pos> {
        let last = self.size - 1;
        match side {
            Up | Down => {
                let y = if side == Up { 0 } else { last };
                let mut coords: Vec<Pos> = (0..self.size).map(|x| Pos::new(x, y)).collect();
                if self.edges[side as usize].vector.x < 0 {
                    coords.reverse();
                }
                coords
            }
            Left | Right => {
                let x = if side == Left { 0 } else { last };
                let mut coords: Vec<Pos> = (0..self.size).map(|y| Pos::new(x, y)).collect();
                // The 3D y axis points towards the top of the net, so a
                // positive y component means the edge runs against the
                // downwards tile order.
                if self.edges[side as usize].vector.y > 0 {
                    coords.reverse();
                }
                coords
            }
        }
    }

    /// Whether this face touches `other` on the net.
    pub fn is_adjacent(&self, other: &Face) -> bool {
        let dx = i16::from(self.cell.x).abs_diff(i16::from(other.cell.x));
        let dy = i16::from(self.cell.y).abs_diff(i16::from(other.cell.y));
        dx + dy == 1
    }

    /// Converts a tile coordinate local to this face into a map coordinate.
    pub fn to_global(&self, local: Pos) -> Pos {
        Pos::new(
            self.cell.x * self.size + local.x,
            self.cell.y * self.size + local.y,
        )
    }
}

/// A single wraparound rule: land on `pos` and turn clockwise `turn` times.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Jump {
    pub pos: Pos,
    pub turn: i8,
}

/// The wraparound rules, keyed by the tile being left and the facing the
/// walker leaves it with.
///
/// Only boundary tiles have entries; everywhere else ordinary adjacent
/// movement applies.
pub type JumpTable = FxHashMap<(Pos, Direction), Jump>;

/// Folds the net and returns the face for every occupied face-cell.
///
/// Fails if the net doesn't have exactly 6 connected faces.
pub fn discover_faces(board: &Board) -> anyhow::Result<FxHashMap<Pos, Face>> {
    let mut faces = FxHashMap::default();
    visit(board, &mut faces, Cube::new(), board.start_cell()?)?;

    let grid = board.face_grid();
    for y in 0..grid.height {
        for x in 0..grid.width {
            let cell = Pos::new(x, y);
            if board.face_occupied(cell) && !faces.contains_key(&cell) {
                bail!("face cell {cell} is not connected to the starting face");
            }
        }
    }
    ensure!(
        faces.len() == 6,
        "expected 6 faces on the net, found {}",
        faces.len()
    );

    Ok(faces)
}

/// Records the face at `cell` from the cube's current orientation, then folds
/// onwards into every undiscovered neighbouring face.
fn visit(
    board: &Board,
    faces: &mut FxHashMap<Pos, Face>,
    cube: Cube,
    cell: Pos,
) -> anyhow::Result<()> {
    faces.insert(
        cell,
        Face {
            cell,
            size: board.face_size(),
            edges: cube.top_edges()?,
        },
    );

    for direction in Direction::VALUES {
        let Some(neighbour) = cell.moved_in(direction, board.face_grid()) else {
            continue;
        };
        if board.face_occupied(neighbour) && !faces.contains_key(&neighbour) {
            // Each branch folds its own copy of the cube; sharing one would
            // let a sibling branch see this branch's rotations.
            let mut cube = cube.clone();
            cube.rotate(direction);
            visit(board, faces, cube, neighbour)?;
        }
    }
    Ok(())
}

/// Builds the jump table for walking on the folded-up cube.
///
/// Every one of the 12 cube edges is shared by exactly two discovered faces.
/// Edges whose two faces already touch on the net need no rule; for the rest,
/// the tiles along the edge are paired up in edge-vector order and each pair
/// gets a rule in both directions. Crossing such an edge turns the walker by
/// the angle between the two sides: entering through a side means arriving
/// facing its inward normal, i.e. the side's direction plus a half turn.
pub fn cube_jumps(board: &Board) -> anyhow::Result<JumpTable> {
    let faces = discover_faces(board)?;

    let mut jumps = JumpTable::default();
    for id in 1..=12 {
        let owners: Vec<(&Face, Direction)> = faces
            .values()
            .filter_map(|face| face.side_of(id).map(|side| (face, side)))
            .collect();
        let &[(a, side_a), (b, side_b)] = owners.as_slice() else {
            bail!(
                "cube edge {id} is shared by {} faces instead of 2; the net does not fold into a cube",
                owners.len()
            );
        };

        let vector_a = a.edges[side_a as usize].vector;
        let vector_b = b.edges[side_b as usize].vector;
        if vector_a == vector_b && a.is_adjacent(b) {
            // The two faces already sit next to each other on the map, so
            // plain movement carries across this edge.
            continue;
        }

        let turn_a = (side_b as i8 + 2 - side_a as i8).rem_euclid(4);
        let turn_b = (side_a as i8 + 2 - side_b as i8).rem_euclid(4);
        for (local_a, local_b) in a.boundary(side_a).into_iter().zip_eq(b.boundary(side_b)) {
            jumps.insert(
                (a.to_global(local_a), side_a),
                Jump {
                    pos: b.to_global(local_b),
                    turn: turn_a,
                },
            );
            jumps.insert(
                (b.to_global(local_b), side_b),
                Jump {
                    pos: a.to_global(local_a),
                    turn: turn_b,
                },
            );
        }
    }

    Ok(jumps)
}

/// Builds the jump table for walking on the flat map: leaving the map (or the
/// strip of tiles in the current row or column) wraps around to its other
/// end, with no turning.
pub fn flat_jumps(board: &Board) -> JumpTable {
    let mut jumps = JumpTable::default();

    for y in 0..board.height() {
        let bounds = (0..board.width())
            .filter(|&x| board[Pos::new(x, y)] != Tile::Empty)
            .minmax()
            .into_option();
        if let Some((left, right)) = bounds {
            jumps.insert(
                (Pos::new(left, y), Left),
                Jump {
                    pos: Pos::new(right, y),
                    turn: 0,
                },
            );
            jumps.insert(
                (Pos::new(right, y), Right),
                Jump {
                    pos: Pos::new(left, y),
                    turn: 0,
                },
            );
        }
    }

    for x in 0..board.width() {
        let bounds = (0..board.height())
            .filter(|&y| board[Pos::new(x, y)] != Tile::Empty)
            .minmax()
            .into_option();
        if let Some((top, bottom)) = bounds {
            jumps.insert(
                (Pos::new(x, top), Up),
                Jump {
                    pos: Pos::new(x, bottom),
                    turn: 0,
                },
            );
            jumps.insert(
                (Pos::new(x, bottom), Down),
                Jump {
                    pos: Pos::new(x, top),
                    turn: 0,
                },
            );
        }
    }

    jumps
}

#[cfg(test)]
mod tests {
    use crate::{cube_jumps, discover_faces, flat_jumps, Board, Direction, Jump, Pos};
    use Direction::*;

    /// The 6-face net of the sample map, without its walls: a cross-like
    /// layout with size-4 faces at face-cells (2, 0), (0, 1), (1, 1), (2, 1),
    /// (2, 2) and (3, 2).
    fn cross_board() -> Board {
        let mut map = String::new();
        for y in 0..12 {
            let line = match y {
                0..=3 => "        ....",
                4..=7 => "............",
                _ => "        ........",
            };
            map.push_str(line);
            map.push('\n');
        }
        Board::parse(&map).unwrap()
    }

    #[test]
    fn face_coverage() {
        let board = cross_board();
        let faces = discover_faces(&board).unwrap();
        assert_eq!(faces.len(), 6);
        for id in 1..=12 {
            let owners = faces
                .values()
                .filter(|face| face.side_of(id).is_some())
                .count();
            assert_eq!(owners, 2, "edge {id} should be on exactly 2 faces");
        }
    }

    #[test]
    fn jump_symmetry() {
        let board = cross_board();
        let jumps = cube_jumps(&board).unwrap();
        assert!(!jumps.is_empty());
        for (&(pos, facing), jump) in &jumps {
            // Crossing the edge leaves you facing the inward normal of the
            // side you entered through; stepping backwards through that side
            // must lead back to where you came from, turned around.
            let arrived = facing.turned(jump.turn);
            let back = arrived.turned(2);
            let reverse = jumps
                .get(&(jump.pos, back))
                .unwrap_or_else(|| panic!("no reverse rule for {pos} facing {facing}"));
            assert_eq!(reverse.pos, pos);
            assert_eq!(back.turned(reverse.turn), facing.turned(2));
        }
    }

    #[test]
    fn contiguous_edges_skipped() {
        let board = cross_board();
        let jumps = cube_jumps(&board).unwrap();
        // Faces (2, 0) and (2, 1) touch on the net, so no rules exist for
        // stepping between them.
        for x in 8..12 {
            assert!(!jumps.contains_key(&(Pos::new(x, 3), Down)));
            assert!(!jumps.contains_key(&(Pos::new(x, 4), Up)));
        }
    }

    #[test]
    fn cross_net_jump() {
        let board = cross_board();
        let jumps = cube_jumps(&board).unwrap();
        // The top edge of face (0, 1) folds onto the top edge of face (2, 0),
        // reversed: leaving the map upwards from the face's top-left corner
        // lands on the top-right corner of the starting face, heading down
        // into it.
        let jump = jumps[&(Pos::new(0, 4), Up)];
        assert_eq!(jump, Jump { pos: Pos::new(11, 0), turn: 2 });
        assert_eq!(Up.turned(jump.turn), Down);
    }

    #[test]
    fn flat_wraparound() {
        let board = cross_board();
        let jumps = flat_jumps(&board);
        // Rows in the second face band span the full width.
        assert_eq!(
            jumps[&(Pos::new(0, 4), Left)],
            Jump { pos: Pos::new(11, 4), turn: 0 }
        );
        assert_eq!(
            jumps[&(Pos::new(11, 4), Right)],
            Jump { pos: Pos::new(0, 4), turn: 0 }
        );
        // Columns under the top face run from the very top to the very
        // bottom of the map.
        assert_eq!(
            jumps[&(Pos::new(8, 0), Up)],
            Jump { pos: Pos::new(8, 11), turn: 0 }
        );
        // Columns off to the left only exist in the second band.
        assert_eq!(
            jumps[&(Pos::new(0, 7), Down)],
            Jump { pos: Pos::new(0, 4), turn: 0 }
        );
    }

    #[test]
    fn overlapping_net_rejected() {
        // A column of four faces with two more hanging off the left of the
        // second row. Folding wraps face (0, 1) onto the same cube face as
        // (2, 3), so some edges end up claimed by three faces and the net
        // does not close into a cube.
        let mut map = String::new();
        for band in 0..4 {
            let line = if band == 1 { "............" } else { "        ...." };
            for _ in 0..4 {
                map.push_str(line);
                map.push('\n');
            }
        }
        let board = Board::parse(&map).unwrap();
        assert_eq!(discover_faces(&board).unwrap().len(), 6);
        assert!(cube_jumps(&board).is_err());
    }

    #[test]
    fn disconnected_net() {
        // Two faces in the top-left corner, two parked in the bottom-right;
        // the two groups never touch.
        let mut map = String::new();
        for y in 0..12 {
            let line = match y {
                0..=3 => "........        ",
                4..=7 => "                ",
                _ => "        ........",
            };
            map.push_str(line);
            map.push('\n');
        }
        let board = Board::parse(&map).unwrap();
        assert_eq!(board.face_size(), 4);
        assert!(discover_faces(&board).is_err());
    }

    #[test]
    fn too_few_faces() {
        let board = Board::parse("....\n....\n....\n....\n").unwrap();
        assert!(discover_faces(&board).is_err());
    }
}
