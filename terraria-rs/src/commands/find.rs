//! `find`: tiles matching match-language expressions

use anyhow::{Context, Result};
use clap::Args;
use log::info;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use terraria_wld::World;

use super::{load_world, tile_label};
use crate::query::Match;

#[derive(Args)]
pub struct FindArgs {
    /// World file path, file name, title or id
    pub world: String,

    /// Match expression, `block;u;v;wall` (repeatable)
    #[arg(short = 'e', long = "expr", required = true)]
    pub exprs: Vec<Match>,

    /// Write matches as CSV (Tile,X,Y)
    #[arg(long, conflicts_with = "density")]
    pub csv: bool,

    /// Write a per-row CSV matrix of match counts, one column per expression
    #[arg(long)]
    pub density: bool,

    /// Output file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn execute(args: FindArgs, dir: Option<&Path>) -> Result<()> {
    let loaded = load_world(&args.world, dir)?;
    let world = &loaded.world;

    let writer: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path)
                .with_context(|| format!("Failed to create file: {}", path.display()))?,
        )),
        None => Box::new(io::stdout().lock()),
    };

    if args.density {
        write_density(world, &args.exprs, writer)?;
        return Ok(());
    }

    let matches = find_matches(world, &args.exprs);
    info!("{} matching tiles", matches.len());

    if args.csv {
        let mut csv = csv::Writer::from_writer(writer);
        csv.write_record(["Tile", "X", "Y"])?;
        for (id, x, y) in &matches {
            csv.write_record([id.to_string(), x.to_string(), y.to_string()])?;
        }
        csv.flush()?;
    } else {
        let mut writer = writer;
        for (id, x, y) in &matches {
            writeln!(writer, "{} ({x}, {y})", tile_label(*id))?;
        }
        writer.flush()?;
    }

    Ok(())
}

/// Block id and position of every cell matching any expression.
pub fn find_matches(world: &World, exprs: &[Match]) -> Vec<(u16, u32, u32)> {
    world
        .tiles()
        .filter(|(_, _, tile)| exprs.iter().any(|expr| expr.matches(tile)))
        .filter_map(|(x, y, tile)| tile.block_id().map(|id| (id, x, y)))
        .collect()
}

/// Match counts per world row, one column per expression.
pub fn density(world: &World, exprs: &[Match]) -> Vec<Vec<usize>> {
    let mut rows = vec![vec![0; exprs.len()]; world.height() as usize];
    for (_, y, tile) in world.tiles() {
        for (column, expr) in exprs.iter().enumerate() {
            if expr.matches(tile) {
                rows[y as usize][column] += 1;
            }
        }
    }
    rows
}

fn write_density(world: &World, exprs: &[Match], writer: Box<dyn Write>) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);

    let mut header = vec!["Row".to_string()];
    header.extend(exprs.iter().map(ToString::to_string));
    csv.write_record(&header)?;

    for (y, counts) in density(world, exprs).into_iter().enumerate() {
        let mut record = vec![y.to_string()];
        record.extend(counts.iter().map(ToString::to_string));
        csv.write_record(&record)?;
    }
    csv.flush()?;
    Ok(())
}
