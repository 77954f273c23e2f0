//! A crate which folds the 2D map of a cube net into a cube and walks paths
//! across its surface.
//!
//! The map and the path to follow come in as one blob of puzzle notes
//! (`Notes`). The map can be read two ways: as a flat board whose rows and
//! columns wrap around at their ends, or as the unfolded net of a cube whose
//! surface the path is really walked on. Both readings are compiled down to
//! the same thing - a table of wraparound jumps - which a single `Walker`
//! then consumes; the cube reading is the interesting one, built by folding a
//! model cube over the net to find out which edges get glued together.

mod board;
mod fold;
mod geometry;
mod utils;
mod walk;

pub use board::*;
pub use fold::*;
pub use geometry::*;
pub use walk::*;

/// Walks the path over the flat reading of the map and returns the final
/// password.
pub fn flat_password(notes: &Notes) -> anyhow::Result<u32> {
    let jumps = flat_jumps(&notes.board);
    let mut walker = Walker::new(&notes.board, &jumps)?;
    walker.follow(&notes.path)?;
    Ok(walker.password())
}

/// Walks the path over the surface of the folded-up cube and returns the
/// final password.
pub fn cube_password(notes: &Notes) -> anyhow::Result<u32> {
    let jumps = cube_jumps(&notes.board)?;
    let mut walker = Walker::new(&notes.board, &jumps)?;
    walker.follow(&notes.path)?;
    Ok(walker.password())
}

#[cfg(test)]
mod tests {
    use crate::{cube_jumps, cube_password, flat_password, Direction, Notes, Pos};

    const SAMPLE: &str = concat!(
        "        ...#\n",
        "        .#..\n",
        "        #...\n",
        "        ....\n",
        "...#.......#\n",
        "........#...\n",
        "..#....#....\n",
        "..........#.\n",
        "        ...#....\n",
        "        .....#..\n",
        "        .#......\n",
        "        ......#.\n",
        "\n",
        "10R5L5R10L4R5L5\n",
    );

    #[test]
    fn sample_flat() {
        let notes: Notes = SAMPLE.parse().unwrap();
        assert_eq!(flat_password(&notes).unwrap(), 6032);
    }

    #[test]
    fn sample_cube() {
        let notes: Notes = SAMPLE.parse().unwrap();
        assert_eq!(cube_password(&notes).unwrap(), 5031);
    }

    #[test]
    fn sample_cube_edges() {
        let notes: Notes = SAMPLE.parse().unwrap();
        let jumps = cube_jumps(&notes.board).unwrap();
        // The top edges of faces (2, 0) and (0, 1) get glued together,
        // reversed: going up off the leftmost face lands on the top row of
        // the starting face heading down.
        let jump = jumps[&(Pos::new(3, 4), Direction::Up)];
        assert_eq!(jump.pos, Pos::new(8, 0));
        assert_eq!(Direction::Up.turned(jump.turn), Direction::Down);
        // 5 faces of the net touch a neighbour, so 5 of the 12 edges need no
        // rules; the other 7 contribute 2 rules per tile of the edge.
        assert_eq!(jumps.len(), 7 * 2 * 4);
    }
}
