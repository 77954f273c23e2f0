//! Dumps the cube jump table for a puzzle input as JSON.

use std::{fs, io, path::PathBuf};

use anyhow::Context;
use clap::Parser;
use cube_walker::{cube_jumps, Direction, Notes, Pos};
use serde::Serialize;

#[derive(Parser)]
struct Args {
    path: PathBuf,
}

#[derive(Serialize)]
struct JumpEntry {
    from: Pos,
    facing: Direction,
    to: Pos,
    turn: i8,
}

fn main() -> anyhow::Result<()> {
    let Args { path } = Args::parse();
    let input =
        fs::read_to_string(&path).with_context(|| format!("failed to read {}", path.display()))?;
    let notes: Notes = input.parse()?;

    let jumps = cube_jumps(&notes.board)?;
    // Sort the entries so the output is deterministic.
    let mut entries: Vec<JumpEntry> = jumps
        .iter()
        .map(|(&(from, facing), jump)| JumpEntry {
            from,
            facing,
            to: jump.pos,
            turn: jump.turn,
        })
        .collect();
    entries.sort_unstable_by_key(|entry| (entry.from.y, entry.from.x, entry.facing as u8));
    serde_json::to_writer(io::stdout(), &entries)?;

    Ok(())
}
