//! `table`: the tile grid, row by row

use anyhow::{Context, Result};
use clap::{ArgGroup, Args};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use terraria_wld::{Tile, World};

use super::load_world;

/// What each cell of the dump shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellFormat {
    /// Block id
    Ids,
    /// Frame coordinates
    Uv,
    /// Packed 64-bit summary
    Packed,
}

#[derive(Args)]
#[command(group(ArgGroup::new("format").args(["ids", "uv", "packed"])))]
pub struct TableArgs {
    /// World file path, file name, title or id
    pub world: String,

    /// Show block ids (default)
    #[arg(long)]
    pub ids: bool,

    /// Show frame coordinates as u:v
    #[arg(long)]
    pub uv: bool,

    /// Show the packed 64-bit tile summary in hex
    #[arg(long)]
    pub packed: bool,

    /// Output file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl TableArgs {
    fn format(&self) -> CellFormat {
        if self.uv {
            CellFormat::Uv
        } else if self.packed {
            CellFormat::Packed
        } else {
            CellFormat::Ids
        }
    }
}

pub fn execute(args: TableArgs, dir: Option<&Path>) -> Result<()> {
    let loaded = load_world(&args.world, dir)?;
    let format = args.format();

    let mut writer: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path)
                .with_context(|| format!("Failed to create file: {}", path.display()))?,
        )),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    write_table(&loaded.world, format, &mut writer)?;
    writer.flush()?;
    Ok(())
}

/// Write one line per world row, cells separated by spaces.
pub fn write_table(world: &World, format: CellFormat, writer: &mut dyn Write) -> io::Result<()> {
    for y in 0..world.height() {
        let cells: Vec<String> = (0..world.width())
            .map(|x| world.tile_at(x, y).map_or_else(String::new, |tile| format_cell(tile, format)))
            .collect();
        writeln!(writer, "{}", cells.join(" "))?;
    }
    Ok(())
}

fn format_cell(tile: &Tile, format: CellFormat) -> String {
    match format {
        CellFormat::Ids => tile
            .block_id()
            .map_or_else(|| "-".to_string(), |id| id.to_string()),
        CellFormat::Uv => tile
            .block
            .and_then(|block| block.frame)
            .map_or_else(|| "-".to_string(), |frame| format!("{}:{}", frame.u, frame.v)),
        CellFormat::Packed => format!("{:016x}", tile.packed()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use terraria_wld::{Block, FramedTiles};

    #[test]
    fn test_write_table() {
        let mut world = World::new(3, 2, FramedTiles::from_ids(314, [21])).unwrap();
        world.set_tile(0, 0, Tile::default().with_block(Block::new(1))).unwrap();
        world.set_tile(2, 1, Tile::default().with_block(Block::framed(21, 18, 0))).unwrap();

        let mut ids = Vec::new();
        write_table(&world, CellFormat::Ids, &mut ids).unwrap();
        assert_eq!(String::from_utf8(ids).unwrap(), "1 - -\n- - 21\n");

        let mut uv = Vec::new();
        write_table(&world, CellFormat::Uv, &mut uv).unwrap();
        assert_eq!(String::from_utf8(uv).unwrap(), "- - -\n- - 18:0\n");
    }
}
