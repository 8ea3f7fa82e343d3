//! Validation of an in-memory world before it is written.

use crate::error::{Error, Result};
use crate::world::{World, check_tile};

/// Validates a world against every invariant the file format relies on.
///
/// [`WorldFile::encode`](crate::WorldFile::encode) calls this first, so an
/// invalid world never produces bytes.
pub fn validate_world(world: &World) -> Result<()> {
    validate_version(world)?;
    validate_grid(world)?;
    validate_chests(world)?;
    validate_counts(world)?;
    validate_version_specific(world)?;
    Ok(())
}

fn validate_version(world: &World) -> Result<()> {
    let version = world.version();
    if !version.is_supported() {
        return Err(Error::UnsupportedVersion(version.number()));
    }
    if world.header.sections.len() != version.sections().len() {
        return Err(Error::InvalidSectionTable(format!(
            "section table has {} entries, version {version} has {} sections",
            world.header.sections.len(),
            version.sections().len()
        )));
    }
    Ok(())
}

/// Grid size and per-tile frame consistency.
fn validate_grid(world: &World) -> Result<()> {
    let (width, height) = (world.width(), world.height());
    if width == 0 || height == 0 || width > i32::MAX as u32 || height > i32::MAX as u32 {
        return Err(Error::invalid_record(format!(
            "world dimensions {width}x{height} are out of range"
        )));
    }

    let expected = width as usize * height as usize;
    if world.tile_grid().len() != expected {
        return Err(Error::invalid_record(format!(
            "tile grid holds {} cells, expected {width}x{height} = {expected}",
            world.tile_grid().len()
        )));
    }

    for (x, y, tile) in world.tiles() {
        check_tile(world.framed(), x, y, tile)?;
    }
    Ok(())
}

fn validate_chests(world: &World) -> Result<()> {
    for chest in &world.chests {
        if chest.items.len() != usize::from(world.chest_slots) {
            return Err(Error::invalid_record(format!(
                "chest at ({}, {}) has {} slots, expected {}",
                chest.x,
                chest.y,
                chest.items.len(),
                world.chest_slots
            )));
        }
        if let Some(item) = chest.stacks().find(|item| item.stack <= 0) {
            return Err(Error::invalid_record(format!(
                "chest at ({}, {}) holds item {} with stack {}",
                chest.x, chest.y, item.id, item.stack
            )));
        }
    }
    Ok(())
}

/// Record counts must fit the width of their count fields.
fn validate_counts(world: &World) -> Result<()> {
    if world.chests.len() > usize::from(u16::MAX) {
        return Err(Error::invalid_record(format!(
            "{} chests exceed the u16 count",
            world.chests.len()
        )));
    }
    if world.signs.len() > i16::MAX as usize {
        return Err(Error::invalid_record(format!(
            "{} signs exceed the i16 count",
            world.signs.len()
        )));
    }
    if world.tile_entities.len() > i32::MAX as usize {
        return Err(Error::invalid_record(format!(
            "{} tile entities exceed the i32 count",
            world.tile_entities.len()
        )));
    }
    if world.metadata.killed_mobs.len() > usize::from(u16::MAX) {
        return Err(Error::invalid_record(format!(
            "{} kill counters exceed the u16 count",
            world.metadata.killed_mobs.len()
        )));
    }
    Ok(())
}

/// Lists a version cannot store must be empty.
fn validate_version_specific(world: &World) -> Result<()> {
    let version = world.version();
    if !version.has_tile_entities() {
        if !world.tile_entities.is_empty() {
            return Err(Error::invalid_record(format!(
                "version {version} cannot store {} tile entities",
                world.tile_entities.len()
            )));
        }
        if !world.mobs.is_empty() {
            return Err(Error::invalid_record(format!(
                "version {version} cannot store {} mobs",
                world.mobs.len()
            )));
        }
    }

    let lost = world.metadata.fields_lost_by(version);
    if !lost.is_empty() {
        return Err(Error::invalid_record(format!(
            "version {version} cannot store metadata fields: {}",
            lost.join(", ")
        )));
    }
    Ok(())
}
