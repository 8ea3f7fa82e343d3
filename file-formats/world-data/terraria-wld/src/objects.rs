//! Multi-cell objects derived from frame coordinates.
//!
//! The format has no link between the cells of a piece of furniture; each
//! cell only knows where it sits inside the object's sprite. Two adjacent
//! cells with the same block ID belong to one object when their frames are
//! exactly one sprite cell ([`FRAME_STEP`] pixels) apart in the direction
//! of the neighbor.

use crate::tile::{FRAME_STEP, Frame, Tile};
use crate::world::World;

const NEIGHBORS: [(i64, i64); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// A group of framed cells forming one object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FramedObject {
    /// Block ID
    pub id: u16,
    /// Left column
    pub x: u32,
    /// Top row
    pub y: u32,
    /// Width in cells
    pub width: u32,
    /// Height in cells
    pub height: u32,
}

impl FramedObject {
    /// Number of cells the bounding box covers.
    pub fn area(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    /// Whether the bounding box covers (`x`, `y`).
    pub fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.x && y >= self.y && x - self.x < self.width && y - self.y < self.height
    }
}

fn framed_cell(world: &World, x: u32, y: u32) -> Option<(u16, Frame)> {
    let block = world.tile_at(x, y)?.block?;
    Some((block.id, block.frame?))
}

fn step(from: Frame, to: Frame, dx: i64, dy: i64) -> bool {
    let step = i64::from(FRAME_STEP);
    i64::from(to.u) - i64::from(from.u) == dx * step
        && i64::from(to.v) - i64::from(from.v) == dy * step
}

fn flood(world: &World, x: u32, y: u32, visited: &mut [bool]) -> Option<FramedObject> {
    let height = world.height() as usize;
    let (id, _) = framed_cell(world, x, y)?;
    let mut stack = vec![(x, y)];
    visited[x as usize * height + y as usize] = true;
    let (mut left, mut top, mut right, mut bottom) = (x, y, x, y);

    while let Some((cx, cy)) = stack.pop() {
        left = left.min(cx);
        top = top.min(cy);
        right = right.max(cx);
        bottom = bottom.max(cy);
        let Some((_, frame)) = framed_cell(world, cx, cy) else {
            continue;
        };

        for (dx, dy) in NEIGHBORS {
            let (Ok(nx), Ok(ny)) = (
                u32::try_from(i64::from(cx) + dx),
                u32::try_from(i64::from(cy) + dy),
            ) else {
                continue;
            };
            let Some((next_id, next_frame)) = framed_cell(world, nx, ny) else {
                continue;
            };
            let index = nx as usize * height + ny as usize;
            if next_id == id && !visited[index] && step(frame, next_frame, dx, dy) {
                visited[index] = true;
                stack.push((nx, ny));
            }
        }
    }

    Some(FramedObject {
        id,
        x: left,
        y: top,
        width: right - left + 1,
        height: bottom - top + 1,
    })
}

/// Visited flags when the grid matches the world's dimensions.
fn visited_grid(world: &World) -> Option<Vec<bool>> {
    let cells = world.width() as usize * world.height() as usize;
    (world.tile_grid().len() == cells).then(|| vec![false; cells])
}

/// Every framed object in the world, ordered by column then row of its
/// top-left cell.
///
/// A world whose grid disagrees with its metadata dimensions has no objects.
pub fn group_framed_objects(world: &World) -> Vec<FramedObject> {
    let Some(mut visited) = visited_grid(world) else {
        return Vec::new();
    };
    let height = world.height() as usize;
    let mut objects = Vec::new();

    for (x, y, tile) in world.tiles() {
        if visited[x as usize * height + y as usize] || !has_frame(tile) {
            continue;
        }
        if let Some(object) = flood(world, x, y, &mut visited) {
            objects.push(object);
        }
    }

    objects.sort_by_key(|object| (object.x, object.y));
    objects
}

fn has_frame(tile: &Tile) -> bool {
    tile.block.is_some_and(|block| block.frame.is_some())
}

/// The framed object covering (`x`, `y`), if that cell is framed.
pub fn object_at(world: &World, x: u32, y: u32) -> Option<FramedObject> {
    let mut visited = visited_grid(world)?;
    flood(world, x, y, &mut visited)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framed::FramedTiles;
    use crate::tile::Block;
    use pretty_assertions::assert_eq;

    fn place(world: &mut World, id: u16, x: u32, y: u32, width: u16, height: u16) {
        for dx in 0..width {
            for dy in 0..height {
                let block = Block::framed(id, dx * FRAME_STEP, dy * FRAME_STEP);
                world
                    .set_tile(x + u32::from(dx), y + u32::from(dy), Tile::default().with_block(block))
                    .unwrap();
            }
        }
    }

    #[test]
    fn test_groups_adjacent_objects_separately() {
        let mut world = World::new(20, 20, FramedTiles::from_ids(314, [21, 14])).unwrap();
        place(&mut world, 21, 2, 3, 2, 2);
        place(&mut world, 21, 4, 3, 2, 2);
        place(&mut world, 14, 10, 10, 3, 2);
        world
            .set_tile(0, 0, Tile::default().with_block(Block::new(1)))
            .unwrap();

        let objects = group_framed_objects(&world);
        assert_eq!(
            objects,
            vec![
                FramedObject { id: 21, x: 2, y: 3, width: 2, height: 2 },
                FramedObject { id: 21, x: 4, y: 3, width: 2, height: 2 },
                FramedObject { id: 14, x: 10, y: 10, width: 3, height: 2 },
            ]
        );
    }

    #[test]
    fn test_object_at() {
        let mut world = World::new(10, 10, FramedTiles::from_ids(314, [21])).unwrap();
        place(&mut world, 21, 5, 5, 2, 2);

        let chest = object_at(&world, 6, 6).unwrap();
        assert_eq!((chest.x, chest.y, chest.area()), (5, 5, 4));
        assert!(chest.contains(6, 5));
        assert_eq!(object_at(&world, 0, 0), None);
    }

    #[test]
    fn test_resized_metadata_does_not_panic() {
        let mut world = World::new(10, 10, FramedTiles::from_ids(314, [21])).unwrap();
        place(&mut world, 21, 5, 5, 2, 2);
        world.metadata.tiles_high = 12;

        assert!(group_framed_objects(&world).is_empty());
        assert_eq!(object_at(&world, 5, 5), None);

        world.metadata.tiles_high = 5;
        assert!(group_framed_objects(&world).is_empty());
    }
}
