//! `render`: PNG map of a world

use anyhow::{Context, Result, bail};
use clap::Args;
use image::ImageFormat;
use log::debug;
use std::io::Read;
use std::path::{Path, PathBuf};
use terraria_wld::{Color, MapPalette, render_map};

use super::load_world;
use crate::utils::create_spinner;

#[derive(Args)]
pub struct RenderArgs {
    /// World file path, file name, title or id
    pub world: String,

    /// Output PNG file
    #[arg(short, long)]
    pub output: PathBuf,

    /// CSV file of color overrides with columns kind,id,r,g,b (kind is tile or wall)
    #[arg(short, long)]
    pub colors: Option<PathBuf>,
}

pub fn execute(args: RenderArgs, dir: Option<&Path>) -> Result<()> {
    let loaded = load_world(&args.world, dir)?;

    let mut palette = default_palette();
    if let Some(path) = &args.colors {
        let file = std::fs::File::open(path)
            .with_context(|| format!("Failed to open file: {}", path.display()))?;
        let overrides = load_colors(file, &mut palette)
            .with_context(|| format!("Failed to read colors from {}", path.display()))?;
        debug!("Loaded {overrides} color overrides");
    }

    let spinner = create_spinner("Rendering map");
    let image = render_map(&loaded.world, &palette);
    spinner.finish_and_clear();

    image
        .save_with_format(&args.output, ImageFormat::Png)
        .with_context(|| format!("Failed to write image: {}", args.output.display()))?;

    println!(
        "✓ Rendered {}x{} map to {}",
        image.width(),
        image.height(),
        args.output.display()
    );
    Ok(())
}

/// The built-in block and wall colors.
pub fn default_palette() -> MapPalette {
    let mut palette = MapPalette::new();
    for &(id, [r, g, b]) in terraria_ids::colors::TILE_COLORS {
        palette.set_tile_color(id, Color::new(r, g, b));
    }
    for &(id, [r, g, b]) in terraria_ids::colors::WALL_COLORS {
        palette.set_wall_color(id, Color::new(r, g, b));
    }
    palette
}

/// Apply `kind,id,r,g,b` rows to `palette`, returning how many were read.
pub fn load_colors(reader: impl Read, palette: &mut MapPalette) -> Result<usize> {
    let mut csv = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut count = 0;
    for (line, record) in csv.records().enumerate() {
        let record = record?;
        let row = line + 2;
        let field = |index: usize| {
            record
                .get(index)
                .with_context(|| format!("row {row} has {} columns, expected 5", record.len()))
        };
        let channel = |index: usize| -> Result<u8> {
            let value = field(index)?;
            value
                .parse()
                .with_context(|| format!("row {row}: '{value}' is not a color channel"))
        };
        let color = Color::new(channel(2)?, channel(3)?, channel(4)?);
        let id = field(1)?;

        match field(0)? {
            "tile" => palette.set_tile_color(
                id.parse()
                    .with_context(|| format!("row {row}: '{id}' is not a tile id"))?,
                color,
            ),
            "wall" => palette.set_wall_color(
                id.parse()
                    .with_context(|| format!("row {row}: '{id}' is not a wall id"))?,
                color,
            ),
            other => bail!("row {row}: unknown kind '{other}', expected tile or wall"),
        }
        count += 1;
    }
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_load_colors() {
        let mut palette = default_palette();
        let data = "kind,id,r,g,b\ntile, 1, 10, 20, 30\nwall,4,1,2,3\n";
        assert_eq!(load_colors(data.as_bytes(), &mut palette).unwrap(), 2);
        assert_eq!(palette.tile_color(1), Color::new(10, 20, 30));
        assert_eq!(palette.wall_color(4), Color::new(1, 2, 3));
    }

    #[test]
    fn test_load_colors_rejects_bad_rows() {
        let mut palette = MapPalette::new();
        assert!(load_colors("kind,id,r,g,b\nliquid,1,0,0,0\n".as_bytes(), &mut palette).is_err());
        assert!(load_colors("kind,id,r,g,b\ntile,1,300,0,0\n".as_bytes(), &mut palette).is_err());
    }

    #[test]
    fn test_default_palette_uses_known_colors() {
        let palette = default_palette();
        assert_eq!(palette.tile_color(0), Color::new(151, 107, 75));
    }
}
