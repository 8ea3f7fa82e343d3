//! `info`: header, section table and metadata of a world

use anyhow::Result;
use clap::Args;
use console::style;
use std::path::Path;
use terraria_wld::{FieldValue, World};

use super::{LoadedWorld, load_world, tile_label};
use crate::utils::{add_table_row, create_table, format_bytes, format_creation_time};

#[derive(Args)]
pub struct InfoArgs {
    /// World file path, file name, title or id
    pub world: String,

    /// Show the section table with offsets and sizes
    #[arg(short, long)]
    pub pointers: bool,

    /// Dump every metadata field
    #[arg(short, long)]
    pub flags: bool,

    /// Print header and metadata as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn execute(args: InfoArgs, dir: Option<&Path>) -> Result<()> {
    let loaded = load_world(&args.world, dir)?;

    if args.json {
        return print_json(&loaded);
    }

    print_summary(&loaded);
    if args.pointers {
        println!();
        print_pointers(&loaded);
    }
    if args.flags {
        println!();
        print_flags(&loaded.world);
    }

    Ok(())
}

fn print_summary(loaded: &LoadedWorld) {
    let world = &loaded.world;
    let metadata = &world.metadata;

    println!("{}", style("World Information").bold().cyan());
    println!("{}", style("=================").cyan());
    println!();

    println!("{}: {}", style("File").bold(), loaded.path.display());
    println!("{}: {}", style("Size").bold(), format_bytes(loaded.size));
    println!("{}: {}", style("Title").bold(), world.title());
    println!("{}: {}", style("Id").bold(), metadata.world_id);
    println!("{}: {}", style("Version").bold(), world.version());
    println!("{}: {}", style("Revision").bold(), world.header.revision);
    println!(
        "{}: {} x {} tiles",
        style("Dimensions").bold(),
        world.width(),
        world.height()
    );

    let (spawn_x, spawn_y) = world.spawn();
    println!("{}: ({spawn_x}, {spawn_y})", style("Spawn").bold());
    println!("{}: {}", style("Evil").bold(), world.evil());
    println!(
        "{}: {}",
        style("Mode").bold(),
        if metadata.expert_mode {
            "Expert"
        } else {
            "Normal"
        }
    );
    println!(
        "{}: {}",
        style("Created").bold(),
        format_creation_time(metadata.creation_time)
    );

    let layers = world.layers();
    println!(
        "{}: surface {:.0}, rock {:.0}, lava {:.0}, underworld {:.0}",
        style("Layers").bold(),
        layers.surface,
        layers.rock,
        layers.lava,
        layers.underworld
    );

    println!();
    println!("{}", style("Contents:").bold());
    println!("  Chests: {} ({} slots each)", world.chests.len(), world.chest_slots);
    println!("  Signs: {}", world.signs.len());
    println!("  Town NPCs: {}", world.npcs.len());
    if world.version().has_tile_entities() {
        println!("  Mobs: {}", world.mobs.len());
        println!("  Tile entities: {}", world.tile_entities.len());
    }
}

fn print_pointers(loaded: &LoadedWorld) {
    let sections = &loaded.world.header.sections;
    let file_len = loaded.size as usize;

    println!("{}", style("Sections:").bold());
    let mut table = create_table(&["Section", "Offset", "Size"]);
    for (section, offset) in sections.sections() {
        let size = sections
            .range(section, file_len)
            .map_or_else(|| "?".to_string(), |range| format_bytes(range.len() as u64));
        add_table_row(
            &mut table,
            vec![section.to_string(), format!("{offset:#010x}"), size],
        );
    }
    table.printstd();
    if !sections.unused().is_empty() {
        println!("  {} unused pointer(s) after the footer", sections.unused().len());
    }
}

fn print_flags(world: &World) {
    println!("{}", style("Metadata fields:").bold());
    let mut table = create_table(&["Field", "Value"]);
    for (name, value) in world.metadata.fields(world.version()) {
        add_table_row(&mut table, vec![name.to_string(), describe_field(name, &value)]);
    }
    if !world.metadata.unknown.is_empty() {
        add_table_row(
            &mut table,
            vec![
                "Unknown".to_string(),
                format!("{} trailing bytes", world.metadata.unknown.len()),
            ],
        );
    }
    table.printstd();
}

/// Render a field value, naming ore tiers and decoding the creation time.
fn describe_field(name: &str, value: &FieldValue) -> String {
    match (name, value) {
        ("CreationTime", FieldValue::UInt(ticks)) => {
            format!("{ticks} ({})", format_creation_time(*ticks))
        }
        (name, FieldValue::UInt(id)) if name.starts_with("OreTier") => {
            ore_tier(i64::try_from(*id).ok())
        }
        (name, FieldValue::Int(id)) if name.starts_with("OreTier") => ore_tier(Some(*id)),
        _ => value.to_string(),
    }
}

fn ore_tier(id: Option<i64>) -> String {
    match id.and_then(|id| u16::try_from(id).ok()) {
        Some(tile) => format!("{tile} ({})", tile_label(tile)),
        None => id.map_or_else(|| "?".to_string(), |id| id.to_string()),
    }
}

#[cfg(feature = "serde")]
fn print_json(loaded: &LoadedWorld) -> Result<()> {
    use terraria_wld::{FileHeader, WorldMetadata};

    #[derive(serde::Serialize)]
    struct InfoReport<'a> {
        file: String,
        size: u64,
        header: &'a FileHeader,
        metadata: &'a WorldMetadata,
        chests: usize,
        signs: usize,
        npcs: usize,
        mobs: usize,
        tile_entities: usize,
    }

    let world = &loaded.world;
    let report = InfoReport {
        file: loaded.path.display().to_string(),
        size: loaded.size,
        header: &world.header,
        metadata: &world.metadata,
        chests: world.chests.len(),
        signs: world.signs.len(),
        npcs: world.npcs.len(),
        mobs: world.mobs.len(),
        tile_entities: world.tile_entities.len(),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

#[cfg(not(feature = "serde"))]
fn print_json(_loaded: &LoadedWorld) -> Result<()> {
    anyhow::bail!("JSON output requires the 'serde' feature")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_describe_field() {
        assert_eq!(describe_field("OreTier1", &FieldValue::Int(107)), "107 (Cobalt)");
        assert_eq!(describe_field("OreTier2", &FieldValue::Int(-1)), "-1");
        assert_eq!(describe_field("SpawnX", &FieldValue::UInt(4)), "4");
        assert_eq!(describe_field("CreationTime", &FieldValue::UInt(0)), "0 (N/A)");
    }
}
