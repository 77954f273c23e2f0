use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use cube_walker::{cube_jumps, flat_jumps, Notes, Walker};

#[derive(Parser)]
struct Options {
    /// Path to the puzzle notes: the tile map, a blank line, then the path.
    input: PathBuf,
    /// Print the map with the walked route marked on it.
    #[arg(long)]
    trace: bool,
}

fn main() -> anyhow::Result<()> {
    let options = Options::parse();
    let input = fs::read_to_string(&options.input)
        .with_context(|| format!("failed to read {}", options.input.display()))?;
    let notes: Notes = input.parse()?;

    let jumps = flat_jumps(&notes.board);
    let mut walker = Walker::new(&notes.board, &jumps)?;
    walker.follow(&notes.path)?;
    if options.trace {
        println!("{walker}\n");
    }
    println!("Flat password: {}", walker.password());

    let jumps = cube_jumps(&notes.board)?;
    let mut walker = Walker::new(&notes.board, &jumps)?;
    walker.follow(&notes.path)?;
    if options.trace {
        println!("{walker}\n");
    }
    println!("Cube password: {}", walker.password());

    Ok(())
}
