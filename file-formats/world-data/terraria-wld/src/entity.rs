//! Tile entities (version 140 and later).
//!
//! Every entity starts with a kind byte that decides how many payload
//! bytes follow. Unknown kinds cannot be skipped and abort decoding.

use log::trace;

use crate::error::{Error, Result};
use crate::stream::BinaryStream;

const KIND_TARGET_DUMMY: u8 = 0;
const KIND_ITEM_FRAME: u8 = 1;

/// Kind-specific entity state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TileEntityKind {
    /// Training dummy, linked to the NPC slot it spawns
    TargetDummy {
        /// NPC slot, `-1` when none is spawned
        npc: i16,
    },
    /// Item frame holding one item stack
    ItemFrame {
        /// Item ID
        item: i16,
        /// Prefix ID
        prefix: u8,
        /// Stack size
        stack: i16,
    },
}

impl TileEntityKind {
    /// The kind byte written to the file.
    pub fn kind_byte(&self) -> u8 {
        match self {
            Self::TargetDummy { .. } => KIND_TARGET_DUMMY,
            Self::ItemFrame { .. } => KIND_ITEM_FRAME,
        }
    }

    /// Human-readable kind name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::TargetDummy { .. } => "Target Dummy",
            Self::ItemFrame { .. } => "Item Frame",
        }
    }
}

/// A tile entity anchored at a grid position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TileEntity {
    /// Entity ID, unique within the world
    pub id: i32,
    /// Tile column
    pub x: i16,
    /// Tile row
    pub y: i16,
    /// Kind and payload
    pub kind: TileEntityKind,
}

pub(crate) fn read_tile_entities(stream: &mut BinaryStream) -> Result<Vec<TileEntity>> {
    let position = stream.position();
    let count = stream.read_i32()?;
    let count = usize::try_from(count).map_err(|_| {
        Error::invalid_record(format!("negative tile entity count {count} at offset {position}"))
    })?;

    let mut entities = Vec::with_capacity(count.min(stream.remaining()));
    for _ in 0..count {
        let position = stream.position();
        let kind = stream.read_u8()?;
        let id = stream.read_i32()?;
        let x = stream.read_i16()?;
        let y = stream.read_i16()?;
        let kind = match kind {
            KIND_TARGET_DUMMY => TileEntityKind::TargetDummy {
                npc: stream.read_i16()?,
            },
            KIND_ITEM_FRAME => TileEntityKind::ItemFrame {
                item: stream.read_i16()?,
                prefix: stream.read_u8()?,
                stack: stream.read_i16()?,
            },
            other => return Err(Error::UnknownTileEntity { kind: other, position }),
        };
        trace!("tile entity {id} ({}) at ({x}, {y})", kind.name());
        entities.push(TileEntity { id, x, y, kind });
    }
    Ok(entities)
}

pub(crate) fn write_tile_entities(stream: &mut BinaryStream, entities: &[TileEntity]) -> Result<()> {
    let count = i32::try_from(entities.len()).map_err(|_| {
        Error::invalid_record(format!("{} tile entities exceed the i32 count", entities.len()))
    })?;
    stream.write_i32(count)?;
    for entity in entities {
        stream.write_u8(entity.kind.kind_byte())?;
        stream.write_i32(entity.id)?;
        stream.write_i16(entity.x)?;
        stream.write_i16(entity.y)?;
        match entity.kind {
            TileEntityKind::TargetDummy { npc } => stream.write_i16(npc)?,
            TileEntityKind::ItemFrame {
                item,
                prefix,
                stack,
            } => {
                stream.write_i16(item)?;
                stream.write_u8(prefix)?;
                stream.write_i16(stack)?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_round_trip_both_kinds() {
        let entities = vec![
            TileEntity {
                id: 0,
                x: 120,
                y: 300,
                kind: TileEntityKind::TargetDummy { npc: -1 },
            },
            TileEntity {
                id: 1,
                x: 121,
                y: 301,
                kind: TileEntityKind::ItemFrame {
                    item: 29,
                    prefix: 0,
                    stack: 1,
                },
            },
        ];

        let mut stream = BinaryStream::new();
        write_tile_entities(&mut stream, &entities).unwrap();
        assert_eq!(stream.len(), 4 + (9 + 2) + (9 + 5));

        stream.seek(0).unwrap();
        assert_eq!(read_tile_entities(&mut stream).unwrap(), entities);
    }

    #[test]
    fn test_unknown_kind_reports_its_offset() {
        let mut stream = BinaryStream::new();
        stream.write_i32(1).unwrap();
        stream.write_u8(7).unwrap();
        stream.write_i32(0).unwrap();
        stream.write_i16(0).unwrap();
        stream.write_i16(0).unwrap();
        stream.seek(0).unwrap();

        let err = read_tile_entities(&mut stream).unwrap_err();
        assert!(matches!(err, Error::UnknownTileEntity { kind: 7, position: 4 }));
        assert_eq!(err.kind(), ErrorKind::CorruptRecord);
    }
}
