//! The framed-tile ID set.
//!
//! Framed tiles are pieces of multi-cell objects (furniture, trees, pots)
//! whose frame coordinates locate the cell inside its sprite. The set is
//! versioned lookup data: every world file stores it in its header, and
//! new worlds get it from the caller.

use crate::error::Result;
use crate::stream::BinaryStream;

/// Which block IDs store frame coordinates.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FramedTiles {
    flags: Vec<bool>,
}

impl FramedTiles {
    /// Build a set covering block IDs `0..tile_count` with `ids` marked framed.
    ///
    /// IDs at or beyond `tile_count` extend the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use terraria_wld::FramedTiles;
    ///
    /// let framed = FramedTiles::from_ids(314, [3, 4, 5, 21]);
    /// assert!(framed.contains(21));
    /// assert!(!framed.contains(1));
    /// assert_eq!(framed.tile_count(), 314);
    /// ```
    pub fn from_ids(tile_count: u16, ids: impl IntoIterator<Item = u16>) -> Self {
        let mut framed = Self {
            flags: vec![false; usize::from(tile_count)],
        };
        for id in ids {
            framed.insert(id);
        }
        framed
    }

    /// Build a set from a raw per-ID flag vector.
    pub fn from_flags(flags: Vec<bool>) -> Self {
        Self { flags }
    }

    /// Whether `id` stores frame coordinates.
    pub fn contains(&self, id: u16) -> bool {
        self.flags.get(usize::from(id)).copied().unwrap_or(false)
    }

    /// Mark `id` as framed, growing the set if needed.
    pub fn insert(&mut self, id: u16) {
        let index = usize::from(id);
        if index >= self.flags.len() {
            self.flags.resize(index + 1, false);
        }
        self.flags[index] = true;
    }

    /// Number of block IDs the set describes.
    pub fn tile_count(&self) -> usize {
        self.flags.len()
    }

    /// Framed IDs in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = u16> + '_ {
        self.flags
            .iter()
            .enumerate()
            .filter(|(_, framed)| **framed)
            .map(|(id, _)| id as u16)
    }

    pub(crate) fn read(stream: &mut BinaryStream) -> Result<Self> {
        Ok(Self {
            flags: stream.read_bit_array()?,
        })
    }

    pub(crate) fn write(&self, stream: &mut BinaryStream) -> Result<()> {
        stream.write_bit_array(&self.flags)
    }
}
