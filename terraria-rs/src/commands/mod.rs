//! Subcommand implementations

pub mod contents;
pub mod counts;
pub mod find;
pub mod info;
pub mod kills;
pub mod list;
pub mod objects;
pub mod render;
pub mod rewrite;
pub mod table;
pub mod validate;

use anyhow::{Context, Result};
use log::info;
use std::fs;
use std::path::{Path, PathBuf};
use terraria_wld::{CodecOptions, World, WorldFile};

use crate::discovery::{decode_error, resolve};
use crate::utils::create_spinner;

/// A decoded world and where it came from.
pub struct LoadedWorld {
    /// Resolved file path
    pub path: PathBuf,
    /// File size in bytes
    pub size: u64,
    /// Decoded world
    pub world: World,
}

/// Resolve `arg` and decode the world it names.
pub fn load_world(arg: &str, dir: Option<&Path>) -> Result<LoadedWorld> {
    load_world_with(arg, dir, CodecOptions::default())
}

/// [`load_world`] with custom codec options.
pub fn load_world_with(arg: &str, dir: Option<&Path>, options: CodecOptions) -> Result<LoadedWorld> {
    let path = resolve(arg, dir)?;
    let bytes =
        fs::read(&path).with_context(|| format!("Failed to open file: {}", path.display()))?;
    let size = bytes.len() as u64;

    let spinner = create_spinner(&format!("Decoding {}", path.display()));
    let decoded = WorldFile::with_options(options).decode(bytes);
    spinner.finish_and_clear();

    let world = decoded.map_err(|err| decode_error(&path, err))?;
    info!(
        "Decoded '{}' ({}x{}, version {})",
        world.title(),
        world.width(),
        world.height(),
        world.version()
    );

    Ok(LoadedWorld { path, size, world })
}

/// Name of block `id`, or the id itself.
pub(crate) fn tile_label(id: u16) -> String {
    terraria_ids::tile_name(id).map_or_else(|| format!("Tile #{id}"), str::to_string)
}

/// Name of wall `id`, or the id itself.
pub(crate) fn wall_label(id: u8) -> String {
    terraria_ids::wall_name(id).map_or_else(|| format!("Wall #{id}"), str::to_string)
}

/// Name of item `id`, or the id itself.
pub(crate) fn item_label(id: i32) -> String {
    terraria_ids::item_name(id).map_or_else(|| format!("Item #{id}"), str::to_string)
}

/// Parse a block id given as a number or a tile name.
pub(crate) fn parse_tile_id(value: &str) -> Result<u16, String> {
    value
        .parse()
        .ok()
        .or_else(|| terraria_ids::tile_id(value))
        .ok_or_else(|| format!("unknown tile '{value}'"))
}
