//! The path description and the walker that follows it across the map.

use std::fmt::{self, Display, Formatter, Write};

use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};

use crate::{Board, Direction, JumpTable, Pos, Tile};

/// A turn on the spot, made after an instruction's steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Turn {
    Left,
    Right,
}

impl Turn {
    /// The number of clockwise quarter-turns this turn applies.
    pub fn turns(self) -> i8 {
        match self {
            Turn::Left => -1,
            Turn::Right => 1,
        }
    }
}

/// One instruction of the path: walk `steps` tiles, then optionally turn.
///
/// Only the last instruction of a path may go without a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instruction {
    pub steps: u16,
    pub turn: Option<Turn>,
}

/// Parses a path description like `10R5L5R10L4R5L5`.
pub fn parse_path(s: &str) -> anyhow::Result<Vec<Instruction>> {
    let mut path = Vec::new();
    let mut steps: Option<u16> = None;
    for c in s.chars() {
        if let Some(digit) = c.to_digit(10) {
            steps = Some(
                steps
                    .unwrap_or(0)
                    .checked_mul(10)
                    .and_then(|steps| steps.checked_add(digit as u16))
                    .context("step count in the path is too large")?,
            );
        } else {
            let turn = match c {
                'L' => Turn::Left,
                'R' => Turn::Right,
                _ => bail!("unexpected character {c:?} in the path"),
            };
            let steps = steps
                .take()
                .context("turn in the path without a preceding step count")?;
            path.push(Instruction {
                steps,
                turn: Some(turn),
            });
        }
    }
    if let Some(steps) = steps {
        path.push(Instruction { steps, turn: None });
    }
    Ok(path)
}

/// A walker moving across the board, wrapping around through a jump table.
///
/// The same walker handles both the flat and the folded interpretation of the
/// map; the only difference between the two is the jump table it's given.
pub struct Walker<'a> {
    board: &'a Board,
    jumps: &'a JumpTable,
    pos: Pos,
    facing: Direction,
    /// The facing we last had on each tile we visited, for rendering the
    /// route.
    trail: Vec<Option<Direction>>,
}

impl<'a> Walker<'a> {
    /// Creates a walker on the starting tile of the board, facing right.
    pub fn new(board: &'a Board, jumps: &'a JumpTable) -> anyhow::Result<Self> {
        let mut walker = Self {
            board,
            jumps,
            pos: board.start()?,
            facing: Direction::Right,
            trail: vec![None; usize::from(board.width()) * usize::from(board.height())],
        };
        walker.mark();
        Ok(walker)
    }

    pub fn pos(&self) -> Pos {
        self.pos
    }

    pub fn facing(&self) -> Direction {
        self.facing
    }

    fn mark(&mut self) {
        let index =
            usize::from(self.pos.y) * usize::from(self.board.width()) + usize::from(self.pos.x);
        self.trail[index] = Some(self.facing);
    }

    /// Returns the tile one step ahead and the turn crossing to it applies,
    /// resolving wraparounds through the jump table.
    fn next_position(&self) -> anyhow::Result<(Pos, i8)> {
        if let Some(jump) = self.jumps.get(&(self.pos, self.facing)) {
            Ok((jump.pos, jump.turn))
        } else {
            let pos = self
                .pos
                .moved_in(self.facing, self.board.size())
                .with_context(|| {
                    format!(
                        "walked off the map at {} facing {} with no wraparound rule",
                        self.pos, self.facing
                    )
                })?;
            Ok((pos, 0))
        }
    }

    /// Follows the whole path. Steps that would run into a wall are dropped,
    /// ending that instruction's movement early.
    pub fn follow(&mut self, path: &[Instruction]) -> anyhow::Result<()> {
        for instruction in path {
            for _ in 0..instruction.steps {
                let (next, turn) = self.next_position()?;
                match self.board[next] {
                    // Blocked; the facing stays as it was, even if the blocked
                    // step would have crossed a turning edge.
                    Tile::Wall => break,
                    Tile::Open => {}
                    Tile::Empty => bail!(
                        "wraparound rule from {} facing {} leads to the empty tile {next}",
                        self.pos,
                        self.facing
                    ),
                }
                self.pos = next;
                self.facing = self.facing.turned(turn);
                self.mark();
            }
            if let Some(turn) = instruction.turn {
                self.facing = self.facing.turned(turn.turns());
                self.mark();
            }
        }
        Ok(())
    }

    /// The final password: row and column are 1-based, and the facing is
    /// counted with right as 0 going clockwise.
    pub fn password(&self) -> u32 {
        1000 * (u32::from(self.pos.y) + 1)
            + 4 * (u32::from(self.pos.x) + 1)
            + u32::from((self.facing as u8 + 3) % 4)
    }
}

/// Renders the map with the walked route marked on it.
impl Display for Walker<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for y in 0..self.board.height() {
            if y != 0 {
                f.write_char('\n')?;
            }
            for x in 0..self.board.width() {
                let index = usize::from(y) * usize::from(self.board.width()) + usize::from(x);
                let c = match self.trail[index] {
                    Some(Direction::Up) => '^',
                    Some(Direction::Right) => '>',
                    Some(Direction::Down) => 'v',
                    Some(Direction::Left) => '<',
                    None => match self.board[Pos::new(x, y)] {
                        Tile::Empty => ' ',
                        Tile::Open => '.',
                        Tile::Wall => '#',
                    },
                };
                f.write_char(c)?;
            }
        }
        Ok(())
    }
}
