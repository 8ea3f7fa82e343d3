//! Map rendering (feature `render`).
//!
//! One pixel per tile. A cell shows its block if it has one, otherwise its
//! liquid (when more than an eighth full), otherwise its wall, otherwise a
//! depth gradient: sky above the surface, dirt down to the cavern layer,
//! rock down to the underworld.

use std::collections::HashMap;

use image::{Rgb, RgbImage};
use log::debug;

use crate::stream::Color;
use crate::tile::{LiquidKind, Tile};
use crate::world::World;

/// Liquid below this level does not show on the map.
const LIQUID_THRESHOLD: u8 = 32;

const SKY: (Color, Color) = (Color::new(50, 40, 255), Color::new(145, 185, 255));
const DIRT: (Color, Color) = (Color::new(88, 61, 46), Color::new(37, 78, 123));
const ROCK: (Color, Color) = (Color::new(74, 67, 60), Color::new(53, 70, 97));

/// Colors used by [`render_map`].
///
/// Tile and wall colors are lookup data supplied by the caller. IDs
/// without an entry get a fixed color derived from the ID.
#[derive(Debug, Clone)]
pub struct MapPalette {
    tiles: HashMap<u16, Color>,
    walls: HashMap<u8, Color>,
    water: Color,
    lava: Color,
    honey: Color,
}

impl Default for MapPalette {
    fn default() -> Self {
        Self {
            tiles: HashMap::new(),
            walls: HashMap::new(),
            water: Color::new(9, 61, 191),
            lava: Color::new(253, 32, 3),
            honey: Color::new(254, 194, 20),
        }
    }
}

impl MapPalette {
    /// A palette with only the liquid colors set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the color of block `id`.
    pub fn set_tile_color(&mut self, id: u16, color: Color) {
        self.tiles.insert(id, color);
    }

    /// Set the color of wall `id`.
    pub fn set_wall_color(&mut self, id: u8, color: Color) {
        self.walls.insert(id, color);
    }

    /// Set the color of a liquid.
    pub fn set_liquid_color(&mut self, kind: LiquidKind, color: Color) {
        match kind {
            LiquidKind::Water => self.water = color,
            LiquidKind::Lava => self.lava = color,
            LiquidKind::Honey => self.honey = color,
        }
    }

    /// Color of block `id`.
    pub fn tile_color(&self, id: u16) -> Color {
        self.tiles
            .get(&id)
            .copied()
            .unwrap_or_else(|| fallback(u32::from(id)))
    }

    /// Color of wall `id`.
    pub fn wall_color(&self, id: u8) -> Color {
        self.walls
            .get(&id)
            .copied()
            .unwrap_or_else(|| fallback(u32::from(id) | 0x1_0000))
    }

    /// Color of a liquid.
    pub fn liquid_color(&self, kind: LiquidKind) -> Color {
        match kind {
            LiquidKind::Water => self.water,
            LiquidKind::Lava => self.lava,
            LiquidKind::Honey => self.honey,
        }
    }
}

fn fallback(key: u32) -> Color {
    let hash = key.wrapping_add(1).wrapping_mul(2_654_435_761);
    let [r, g, b, _] = hash.to_be_bytes();
    Color::new(r, g, b)
}

fn gradient((top, bottom): (Color, Color), depth: f64, from: f64, to: f64) -> Color {
    let span = (to - from).max(1.0);
    let t = ((depth - from) / span).clamp(0.0, 1.0);
    top.lerp(bottom, (t * 255.0) as u8)
}

fn background(world: &World, y: u32) -> Color {
    let layers = world.layers();
    let depth = f64::from(y);
    if depth < layers.surface {
        gradient(SKY, depth, 0.0, layers.surface)
    } else if depth < layers.rock {
        gradient(DIRT, depth, layers.surface, layers.rock)
    } else if depth < layers.underworld {
        gradient(ROCK, depth, layers.rock, layers.underworld)
    } else {
        ROCK.1
    }
}

/// Map color of `tile` at row `y` of `world`.
pub fn map_color(world: &World, palette: &MapPalette, tile: &Tile, y: u32) -> Color {
    if let Some(block) = tile.block {
        return palette.tile_color(block.id);
    }
    if let Some(liquid) = tile.liquid.filter(|liquid| liquid.amount > LIQUID_THRESHOLD) {
        return palette.liquid_color(liquid.kind);
    }
    if let Some(wall) = tile.wall.filter(|wall| wall.id != 0) {
        return palette.wall_color(wall.id);
    }
    background(world, y)
}

/// Render `world` as an image with one pixel per tile.
pub fn render_map(world: &World, palette: &MapPalette) -> RgbImage {
    let mut image = RgbImage::new(world.width(), world.height());
    for (x, y, tile) in world.tiles() {
        let Color { r, g, b } = map_color(world, palette, tile, y);
        image.put_pixel(x, y, Rgb([r, g, b]));
    }
    debug!("rendered {}x{} map", image.width(), image.height());
    image
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framed::FramedTiles;
    use crate::tile::{Block, Liquid, Wall};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_color_priority() {
        let mut world = World::new(4, 300, FramedTiles::default()).unwrap();
        let mut palette = MapPalette::new();
        palette.set_tile_color(1, Color::new(128, 128, 128));
        palette.set_wall_color(2, Color::new(10, 10, 10));

        let everything = Tile::default()
            .with_block(Block::new(1))
            .with_wall(Wall::new(2))
            .with_liquid(Liquid::new(LiquidKind::Water, 255));
        world.set_tile(0, 0, everything).unwrap();
        world
            .set_tile(1, 0, Tile::default().with_liquid(Liquid::new(LiquidKind::Lava, 255)))
            .unwrap();
        world
            .set_tile(2, 0, Tile::default().with_liquid(Liquid::new(LiquidKind::Lava, 10)).with_wall(Wall::new(2)))
            .unwrap();

        let image = render_map(&world, &palette);
        assert_eq!(image.dimensions(), (4, 300));
        assert_eq!(image.get_pixel(0, 0), &Rgb([128, 128, 128]));
        assert_eq!(image.get_pixel(1, 0), &Rgb([253, 32, 3]));
        assert_eq!(image.get_pixel(2, 0), &Rgb([10, 10, 10]));
        assert_eq!(image.get_pixel(3, 0), &Rgb([50, 40, 255]));
        assert_eq!(image.get_pixel(3, 299), &Rgb([53, 70, 97]));
    }

    #[test]
    fn test_fallback_is_stable() {
        let palette = MapPalette::new();
        assert_eq!(palette.tile_color(400), palette.tile_color(400));
        assert_ne!(palette.tile_color(400), palette.tile_color(401));
    }
}
