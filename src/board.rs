//! The tile map the path is walked on, and parsing of the puzzle notes.

use std::fmt::{self, Display, Formatter, Write};
use std::ops::Index;
use std::str::FromStr;

use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};

use crate::utils::gcd;
use crate::walk::{parse_path, Instruction};
use crate::{Pos, Size};

/// A single spot on the map.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tile {
    /// Not part of the map at all; walking here is only possible through a bug
    /// in the wraparound rules.
    #[default]
    Empty,
    /// An open tile you can walk on.
    Open,
    /// A wall blocking movement.
    Wall,
}

/// The map of tiles, stored as a dense row-major grid padded out to a
/// rectangle with empty tiles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    width: u8,
    height: u8,
    tiles: Vec<Tile>,
}

impl Board {
    /// Parses a board from the map section of the input.
    ///
    /// Lines shorter than the longest one are padded with empty tiles, the
    /// same as the trailing spaces the input leaves out.
    pub fn parse(map: &str) -> anyhow::Result<Self> {
        let lines: Vec<&str> = map.lines().collect();
        let width = lines.iter().map(|line| line.len()).max().unwrap_or(0);
        if width == 0 {
            bail!("the map contains no tiles");
        }
        let width: u8 = width.try_into().context("the map is too wide")?;
        let height: u8 = lines.len().try_into().context("the map is too tall")?;

        let mut tiles = vec![Tile::Empty; usize::from(width) * usize::from(height)];
        for (y, line) in lines.iter().enumerate() {
            for (x, c) in line.chars().enumerate() {
                tiles[y * usize::from(width) + x] = match c {
                    ' ' => Tile::Empty,
                    '.' => Tile::Open,
                    '#' => Tile::Wall,
                    _ => bail!("unexpected character {c:?} in the map"),
                };
            }
        }

        Ok(Self {
            width,
            height,
            tiles,
        })
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// The side length of the net's faces, inferred from the map's dimensions.
    pub fn face_size(&self) -> u8 {
        gcd(self.width, self.height)
    }

    /// The size of the map in whole faces.
    pub fn face_grid(&self) -> Size {
        let size = self.face_size();
        Size::new(self.width / size, self.height / size)
    }

    /// Whether the given face-cell of the net holds a face.
    ///
    /// Faces are either fully present or fully absent, so checking the corner
    /// tile is enough.
    pub fn face_occupied(&self, cell: Pos) -> bool {
        let size = self.face_size();
        self[Pos::new(cell.x * size, cell.y * size)] != Tile::Empty
    }

    /// Returns the face-cell discovery starts from: the leftmost occupied cell
    /// of the topmost occupied row of faces.
    pub fn start_cell(&self) -> anyhow::Result<Pos> {
        let grid = self.face_grid();
        for y in 0..grid.height {
            for x in 0..grid.width {
                if self.face_occupied(Pos::new(x, y)) {
                    return Ok(Pos::new(x, y));
                }
            }
        }
        bail!("the map contains no faces")
    }

    /// Returns the walker's starting position: the leftmost open tile of the
    /// top row.
    pub fn start(&self) -> anyhow::Result<Pos> {
        (0..self.width)
            .map(|x| Pos::new(x, 0))
            .find(|&pos| self[pos] == Tile::Open)
            .context("the top row of the map has no open tile")
    }
}

impl Index<Pos> for Board {
    type Output = Tile;

    fn index(&self, pos: Pos) -> &Self::Output {
        let x: usize = pos.x.into();
        let y: usize = pos.y.into();
        let width: usize = self.width.into();
        &self.tiles[y * width + x]
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for y in 0..self.height {
            if y != 0 {
                f.write_char('\n')?;
            }
            for x in 0..self.width {
                f.write_char(match self[Pos::new(x, y)] {
                    Tile::Empty => ' ',
                    Tile::Open => '.',
                    Tile::Wall => '#',
                })?;
            }
        }
        Ok(())
    }
}

/// A full set of puzzle notes: the map and the path to follow across it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notes {
    pub board: Board,
    pub path: Vec<Instruction>,
}

impl FromStr for Notes {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (map, path) = s
            .split_once("\n\n")
            .context("missing blank line between the map and the path")?;
        Ok(Self {
            board: Board::parse(map)?,
            path: parse_path(path.trim())?,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::{Notes, Pos, Size, Tile};

    const SAMPLE_MAP: &str = concat!(
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
    fn parse_sample() {
        let notes: Notes = SAMPLE_MAP.parse().unwrap();
        let board = &notes.board;
        assert_eq!(board.size(), Size::new(16, 12));
        assert_eq!(board.face_size(), 4);
        assert_eq!(board.face_grid(), Size::new(4, 3));
        assert_eq!(board.start().unwrap(), Pos::new(8, 0));
        assert_eq!(board.start_cell().unwrap(), Pos::new(2, 0));
        assert_eq!(board[Pos::new(0, 0)], Tile::Empty);
        assert_eq!(board[Pos::new(11, 0)], Tile::Wall);
        assert_eq!(board[Pos::new(8, 0)], Tile::Open);
        assert_eq!(notes.path.len(), 7);

        // Rendering pads the short rows out to the full width.
        let rendered = board.to_string();
        assert_eq!(rendered.lines().next().unwrap(), "        ...#    ");
        assert_eq!(rendered.lines().count(), 12);
    }

    #[test]
    fn bad_input() {
        assert!("".parse::<Notes>().is_err());
        assert!("..\n..\n\nxyz".parse::<Notes>().is_err());
        assert!("..!\n\n1".parse::<Notes>().is_err());
    }
}
