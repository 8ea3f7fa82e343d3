//! In-memory world model.

use std::collections::BTreeMap;

use crate::chest::{Chest, DEFAULT_CHEST_SLOTS};
use crate::entity::TileEntity;
use crate::error::{Error, Result};
use crate::framed::FramedTiles;
use crate::header::FileHeader;
use crate::metadata::{EvilBiome, WorldMetadata};
use crate::npc::{Mob, Npc};
use crate::sign::Sign;
use crate::tile::Tile;
use crate::version::FormatVersion;

/// Cells this close to an edge are outside the playable area.
pub const WORLD_BORDER: u32 = 40;

/// A rectangle of tiles, used to select structures by position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    /// Left column
    pub x: i32,
    /// Top row
    pub y: i32,
    /// Width in tiles
    pub width: u32,
    /// Height in tiles
    pub height: u32,
}

impl Region {
    /// Create a region.
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Whether the tile at (`x`, `y`) lies inside the region.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        let (x, y) = (i64::from(x), i64::from(y));
        let (left, top) = (i64::from(self.x), i64::from(self.y));
        x >= left
            && y >= top
            && x < left + i64::from(self.width)
            && y < top + i64::from(self.height)
    }
}

/// Depths of the world's horizontal layers, in rows from the top.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layers {
    /// Where space ends
    pub space: f64,
    /// Surface level
    pub surface: f64,
    /// Where the cavern background starts
    pub rock: f64,
    /// Where caves become common
    pub caves: f64,
    /// Where lava starts pooling
    pub lava: f64,
    /// Top of the underworld
    pub underworld: f64,
}

/// A decoded world: header, metadata, tile grid and structure lists.
///
/// The tile grid is stored column-major and can only be changed through
/// [`World::set_tile`], which keeps every cell consistent with the
/// framed-tile set. Structures refer to the grid by coordinates only.
///
/// The section table in [`World::header`] records where sections were
/// found by the last decode. It takes no part in equality, since encoding
/// recomputes it.
///
/// # Examples
///
/// ```
/// use terraria_wld::{Block, FramedTiles, Tile, World};
///
/// let mut world = World::new(10, 5, FramedTiles::from_ids(314, [21])).unwrap();
/// world.set_tile(3, 4, Tile::default().with_block(Block::new(1))).unwrap();
///
/// assert_eq!(world.tile_at(3, 4).and_then(Tile::block_id), Some(1));
/// assert!(world.tile_at(10, 0).is_none());
///
/// // A framed block needs frame coordinates
/// assert!(world.set_tile(0, 0, Tile::default().with_block(Block::new(21))).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct World {
    /// Version, revision, section table and framed-tile set
    pub header: FileHeader,
    /// Title and scalar fields
    pub metadata: WorldMetadata,
    tiles: Vec<Tile>,
    /// Slots every chest has
    pub chest_slots: u16,
    /// Chests
    pub chests: Vec<Chest>,
    /// Signs
    pub signs: Vec<Sign>,
    /// Town NPCs
    pub npcs: Vec<Npc>,
    /// Mobs (version 140 and later)
    pub mobs: Vec<Mob>,
    /// Tile entities (version 140 and later)
    pub tile_entities: Vec<TileEntity>,
}

impl PartialEq for World {
    fn eq(&self, other: &Self) -> bool {
        self.header.version == other.header.version
            && self.header.revision == other.header.revision
            && self.header.favorite_bits == other.header.favorite_bits
            && self.header.framed == other.header.framed
            && self.metadata == other.metadata
            && self.tiles == other.tiles
            && self.chest_slots == other.chest_slots
            && self.chests == other.chests
            && self.signs == other.signs
            && self.npcs == other.npcs
            && self.mobs == other.mobs
            && self.tile_entities == other.tile_entities
    }
}

impl World {
    /// A blank world of air tiles for the newest supported version.
    ///
    /// Both dimensions must be non-zero and fit the format's signed 32-bit
    /// fields.
    pub fn new(width: u32, height: u32, framed: FramedTiles) -> Result<Self> {
        let max = i32::MAX as u32;
        if width == 0 || height == 0 || width > max || height > max {
            return Err(Error::invalid_record(format!(
                "world dimensions {width}x{height} are out of range"
            )));
        }
        let cells = (width as usize).checked_mul(height as usize).ok_or_else(|| {
            Error::invalid_record(format!("world of {width}x{height} tiles is too large"))
        })?;

        Ok(Self {
            header: FileHeader::new(FormatVersion::LATEST, framed),
            metadata: WorldMetadata::for_new_world("World", width, height),
            tiles: vec![Tile::AIR; cells],
            chest_slots: DEFAULT_CHEST_SLOTS,
            chests: Vec::new(),
            signs: Vec::new(),
            npcs: Vec::new(),
            mobs: Vec::new(),
            tile_entities: Vec::new(),
        })
    }

    pub(crate) fn from_parts(header: FileHeader, metadata: WorldMetadata, tiles: Vec<Tile>) -> Self {
        Self {
            header,
            metadata,
            tiles,
            chest_slots: DEFAULT_CHEST_SLOTS,
            chests: Vec::new(),
            signs: Vec::new(),
            npcs: Vec::new(),
            mobs: Vec::new(),
            tile_entities: Vec::new(),
        }
    }

    /// Format version the world is read from and written as.
    pub fn version(&self) -> FormatVersion {
        self.header.version
    }

    /// Change the version the world is written as.
    ///
    /// The section layout follows the new version. Data the version cannot
    /// hold is not dropped here; [`validate_world`](crate::validate_world)
    /// rejects it at encode time.
    pub fn set_version(&mut self, version: FormatVersion) -> Result<()> {
        let version = FormatVersion::from_version_number(version.number())?;
        self.header.version = version;
        self.header.sections =
            crate::section::SectionTable::new(version).with_unused(self.header.sections.unused());
        Ok(())
    }

    /// World title.
    pub fn title(&self) -> &str {
        &self.metadata.title
    }

    /// Width in tiles.
    pub fn width(&self) -> u32 {
        self.metadata.width()
    }

    /// Height in tiles.
    pub fn height(&self) -> u32 {
        self.metadata.height()
    }

    /// Block IDs that carry frame coordinates.
    pub fn framed(&self) -> &FramedTiles {
        &self.header.framed
    }

    fn index(&self, x: u32, y: u32) -> Option<usize> {
        (x < self.width() && y < self.height())
            .then(|| x as usize * self.height() as usize + y as usize)
    }

    /// The tile at column `x`, row `y`.
    pub fn tile_at(&self, x: u32, y: u32) -> Option<&Tile> {
        self.index(x, y).and_then(|index| self.tiles.get(index))
    }

    /// Replace the tile at column `x`, row `y`.
    ///
    /// Fails with [`Error::InvalidTileState`] if the cell is outside the
    /// grid or the tile's frame coordinates disagree with the framed-tile set.
    pub fn set_tile(&mut self, x: u32, y: u32, tile: Tile) -> Result<()> {
        let index = self.index(x, y).ok_or_else(|| {
            Error::invalid_tile(
                x,
                y,
                format!("outside the {}x{} grid", self.width(), self.height()),
            )
        })?;
        check_tile(&self.header.framed, x, y, &tile)?;
        let cell = self.tiles.get_mut(index).ok_or_else(|| {
            Error::invalid_tile(x, y, "grid is smaller than the world dimensions")
        })?;
        *cell = tile;
        Ok(())
    }

    /// The grid in column-major order.
    pub fn tile_grid(&self) -> &[Tile] {
        &self.tiles
    }

    /// Every cell with its coordinates, column by column.
    pub fn tiles(&self) -> impl Iterator<Item = (u32, u32, &Tile)> {
        let height = self.height().max(1) as usize;
        self.tiles
            .iter()
            .enumerate()
            .map(move |(index, tile)| ((index / height) as u32, (index % height) as u32, tile))
    }

    /// Number of cells holding each block ID.
    pub fn tile_counts(&self) -> BTreeMap<u16, usize> {
        let mut counts = BTreeMap::new();
        for id in self.tiles.iter().filter_map(Tile::block_id) {
            *counts.entry(id).or_default() += 1;
        }
        counts
    }

    /// Number of cells holding each wall ID.
    pub fn wall_counts(&self) -> BTreeMap<u8, usize> {
        let mut counts = BTreeMap::new();
        for id in self.tiles.iter().filter_map(Tile::wall_id) {
            *counts.entry(id).or_default() += 1;
        }
        counts
    }

    /// Chests whose position lies inside `region`.
    pub fn chests_near(&self, region: Region) -> impl Iterator<Item = &Chest> {
        self.chests
            .iter()
            .filter(move |chest| region.contains(chest.x, chest.y))
    }

    /// The chest anchored at (`x`, `y`).
    pub fn chest_at(&self, x: i32, y: i32) -> Option<&Chest> {
        self.chests.iter().find(|chest| chest.x == x && chest.y == y)
    }

    /// Every sign, in file order.
    pub fn all_signs(&self) -> &[Sign] {
        &self.signs
    }

    /// The sign anchored at (`x`, `y`).
    pub fn sign_at(&self, x: i32, y: i32) -> Option<&Sign> {
        self.signs.iter().find(|sign| sign.x == x && sign.y == y)
    }

    /// The tile entity anchored at (`x`, `y`).
    pub fn tile_entity_at(&self, x: i16, y: i16) -> Option<&TileEntity> {
        self.tile_entities
            .iter()
            .find(|entity| entity.x == x && entity.y == y)
    }

    /// Surface and cavern layer depths, in rows.
    pub fn levels(&self) -> (f64, f64) {
        self.metadata.levels()
    }

    /// Every layer depth, derived from the surface and rock levels.
    pub fn layers(&self) -> Layers {
        let (surface, rock) = self.levels();
        let width = f64::from(self.width());
        let underworld = f64::from(self.height()) - 204.0;
        Layers {
            space: surface / 5.0 + width * width / 1_764_000.0 + 65.0,
            surface,
            rock,
            caves: rock + 540.0 / 16.0 + 3.0,
            lava: ((rock + underworld) / 2.0).floor() + 3.0,
            underworld,
        }
    }

    /// The world's evil biome.
    pub fn evil(&self) -> EvilBiome {
        self.metadata.evil()
    }

    /// Spawn point in tile coordinates.
    pub fn spawn(&self) -> (u32, u32) {
        self.metadata.spawn()
    }

    /// Whether (`x`, `y`) lies inside the playable area.
    pub fn is_playable(&self, x: u32, y: u32) -> bool {
        x >= WORLD_BORDER
            && y >= WORLD_BORDER
            && x < self.width().saturating_sub(WORLD_BORDER)
            && y < self.height().saturating_sub(WORLD_BORDER)
    }
}

/// Check that `tile` carries frame coordinates exactly when its block is framed.
pub(crate) fn check_tile(framed: &FramedTiles, x: u32, y: u32, tile: &Tile) -> Result<()> {
    if let Some(block) = tile.block {
        match (framed.contains(block.id), block.frame) {
            (true, None) => {
                return Err(Error::invalid_tile(
                    x,
                    y,
                    format!("block {} is framed but has no frame coordinates", block.id),
                ));
            }
            (false, Some(_)) => {
                return Err(Error::invalid_tile(
                    x,
                    y,
                    format!("block {} is not framed but has frame coordinates", block.id),
                ));
            }
            _ => {}
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chest::ItemStack;
    use crate::error::ErrorKind;
    use crate::tile::{Block, Wall};
    use pretty_assertions::assert_eq;

    fn world() -> World {
        World::new(100, 80, FramedTiles::from_ids(314, [21])).unwrap()
    }

    #[test]
    fn test_new_world_is_air() {
        let world = world();
        assert_eq!(world.tile_grid().len(), 8000);
        assert!(world.tiles().all(|(_, _, tile)| tile.is_empty()));
        assert_eq!(world.version(), FormatVersion::LATEST);
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        assert!(World::new(0, 10, FramedTiles::default()).is_err());
        assert!(World::new(10, 0, FramedTiles::default()).is_err());
    }

    #[test]
    fn test_grid_is_column_major() {
        let mut world = world();
        world
            .set_tile(2, 5, Tile::default().with_wall(Wall::new(4)))
            .unwrap();
        assert_eq!(world.tile_grid()[2 * 80 + 5].wall_id(), Some(4));

        let (x, y, _) = world.tiles().find(|(_, _, t)| !t.is_empty()).unwrap();
        assert_eq!((x, y), (2, 5));
    }

    #[test]
    fn test_set_tile_checks_frames() {
        let mut world = world();
        let err = world
            .set_tile(1, 1, Tile::default().with_block(Block::new(21)))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidTileState);

        let err = world
            .set_tile(1, 1, Tile::default().with_block(Block::framed(1, 0, 0)))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidTileState);

        world
            .set_tile(1, 1, Tile::default().with_block(Block::framed(21, 18, 0)))
            .unwrap();
    }

    #[test]
    fn test_set_tile_out_of_bounds() {
        let mut world = world();
        let err = world.set_tile(100, 0, Tile::AIR).unwrap_err();
        assert!(matches!(err, Error::InvalidTileState { x: 100, y: 0, .. }));
    }

    #[test]
    fn test_counts() {
        let mut world = world();
        let stone = Tile::default().with_block(Block::new(1)).with_wall(Wall::new(2));
        world.set_tile(0, 0, stone).unwrap();
        world.set_tile(0, 1, stone).unwrap();

        assert_eq!(world.tile_counts().get(&1), Some(&2));
        assert_eq!(world.wall_counts().into_iter().collect::<Vec<_>>(), vec![(2, 2)]);
    }

    #[test]
    fn test_structure_lookup() {
        let mut world = world();
        let mut chest = Chest::new(10, 10, DEFAULT_CHEST_SLOTS);
        chest.items[0] = Some(ItemStack::new(73, 10));
        world.chests.push(chest);
        world.chests.push(Chest::new(50, 50, DEFAULT_CHEST_SLOTS));
        world.signs.push(Sign::new(3, 4, "hi"));

        let near: Vec<_> = world.chests_near(Region::new(0, 0, 20, 20)).collect();
        assert_eq!(near.len(), 1);
        assert!(world.chest_at(50, 50).is_some_and(Chest::is_empty));
        assert_eq!(world.sign_at(3, 4).map(|s| s.text.as_str()), Some("hi"));
        assert!(world.sign_at(4, 3).is_none());
    }

    #[test]
    fn test_layers() {
        let mut world = World::new(4200, 1200, FramedTiles::default()).unwrap();
        world.metadata.ground_level = 300.0;
        world.metadata.rock_level = 400.0;

        let layers = world.layers();
        assert_eq!(layers.underworld, 996.0);
        assert_eq!(layers.space, 60.0 + 10.0 + 65.0);
        assert_eq!(layers.lava, 701.0);
    }

    #[test]
    fn test_playable_area() {
        let world = World::new(100, 100, FramedTiles::default()).unwrap();
        assert!(!world.is_playable(39, 40));
        assert!(world.is_playable(40, 40));
        assert!(world.is_playable(59, 59));
        assert!(!world.is_playable(60, 40));
        assert!(!world.is_playable(40, 60));
    }

    #[test]
    fn test_equality_ignores_section_offsets() {
        let left = world();
        let mut right = world();
        right
            .header
            .sections
            .set_offset(crate::section::Section::Tiles, 1234)
            .unwrap();
        assert_eq!(left, right);
    }
}
