//! Chest records.

use log::trace;

use crate::error::{Error, Result};
use crate::stream::BinaryStream;

/// Slots per chest written by current game versions.
pub const DEFAULT_CHEST_SLOTS: u16 = 40;

/// A stack of items in one chest slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemStack {
    /// Item ID
    pub id: i32,
    /// Number of items, always positive
    pub stack: i16,
    /// Prefix (modifier) ID, `0` for none
    pub prefix: u8,
}

impl ItemStack {
    /// A stack without prefix.
    pub const fn new(id: i32, stack: i16) -> Self {
        Self {
            id,
            stack,
            prefix: 0,
        }
    }
}

/// A chest placed in the world.
///
/// The position is the chest's top-left tile; the chest does not own the
/// tiles it sits on.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Chest {
    /// Tile column
    pub x: i32,
    /// Tile row
    pub y: i32,
    /// Player-given name, empty if unnamed
    pub name: String,
    /// One entry per slot; `None` is an empty slot
    pub items: Vec<Option<ItemStack>>,
}

impl Chest {
    /// An unnamed chest with `slots` empty slots.
    pub fn new(x: i32, y: i32, slots: u16) -> Self {
        Self {
            x,
            y,
            name: String::new(),
            items: vec![None; usize::from(slots)],
        }
    }

    /// Occupied slots.
    pub fn stacks(&self) -> impl Iterator<Item = &ItemStack> {
        self.items.iter().flatten()
    }

    /// Whether every slot is empty.
    pub fn is_empty(&self) -> bool {
        self.items.iter().all(Option::is_none)
    }
}

pub(crate) fn read_chests(stream: &mut BinaryStream) -> Result<(u16, Vec<Chest>)> {
    let count = stream.read_u16()?;
    let slots = stream.read_u16()?;
    trace!("{count} chests with {slots} slots each");

    let mut chests = Vec::with_capacity(usize::from(count));
    for _ in 0..count {
        let x = stream.read_i32()?;
        let y = stream.read_i32()?;
        let name = stream.read_string()?;
        let mut items = Vec::with_capacity(usize::from(slots));
        for _ in 0..slots {
            let stack = stream.read_i16()?;
            if stack > 0 {
                let id = stream.read_i32()?;
                let prefix = stream.read_u8()?;
                items.push(Some(ItemStack { id, stack, prefix }));
            } else {
                items.push(None);
            }
        }
        chests.push(Chest { x, y, name, items });
    }
    Ok((slots, chests))
}

pub(crate) fn write_chests(stream: &mut BinaryStream, slots: u16, chests: &[Chest]) -> Result<()> {
    let count = u16::try_from(chests.len())
        .map_err(|_| Error::invalid_record(format!("{} chests exceed the u16 count", chests.len())))?;
    stream.write_u16(count)?;
    stream.write_u16(slots)?;
    for chest in chests {
        if chest.items.len() != usize::from(slots) {
            return Err(Error::invalid_record(format!(
                "chest at ({}, {}) has {} slots, expected {slots}",
                chest.x,
                chest.y,
                chest.items.len()
            )));
        }
        stream.write_i32(chest.x)?;
        stream.write_i32(chest.y)?;
        stream.write_string(&chest.name)?;
        for item in &chest.items {
            match item {
                Some(item) => {
                    stream.write_i16(item.stack)?;
                    stream.write_i32(item.id)?;
                    stream.write_u8(item.prefix)?;
                }
                None => stream.write_i16(0)?,
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_round_trip() {
        let mut chest = Chest::new(100, 200, 3);
        chest.name = "Loot".to_string();
        chest.items[1] = Some(ItemStack {
            id: 73,
            stack: 5,
            prefix: 81,
        });

        let mut stream = BinaryStream::new();
        write_chests(&mut stream, 3, std::slice::from_ref(&chest)).unwrap();
        // count, slots, x, y, name, 2 empty slots, 1 full slot
        assert_eq!(stream.len(), 2 + 2 + 4 + 4 + 5 + 2 * 2 + (2 + 4 + 1));

        stream.seek(0).unwrap();
        let (slots, chests) = read_chests(&mut stream).unwrap();
        assert_eq!(slots, 3);
        assert_eq!(chests, vec![chest]);
    }

    #[test]
    fn test_slot_count_mismatch() {
        let chest = Chest::new(0, 0, 2);
        let mut stream = BinaryStream::new();
        let err = write_chests(&mut stream, 40, &[chest]).unwrap_err();
        assert!(err.to_string().contains("expected 40"));
    }

    #[test]
    fn test_non_positive_stack_is_empty_slot() {
        let mut stream = BinaryStream::new();
        stream.write_u16(1).unwrap();
        stream.write_u16(1).unwrap();
        stream.write_i32(1).unwrap();
        stream.write_i32(2).unwrap();
        stream.write_string("").unwrap();
        stream.write_i16(-3).unwrap();
        stream.seek(0).unwrap();

        let (_, chests) = read_chests(&mut stream).unwrap();
        assert!(chests[0].is_empty());
        assert_eq!(stream.remaining(), 0);
    }
}
