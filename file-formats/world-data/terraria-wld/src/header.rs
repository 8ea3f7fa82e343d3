//! File header: version, magic, revision, section table and framed-tile set.

use log::debug;

use crate::error::{Error, Result};
use crate::framed::FramedTiles;
use crate::section::SectionTable;
use crate::stream::BinaryStream;
use crate::version::FormatVersion;

/// `"relogic"` packed little-endian into the low 56 bits of the magic.
pub const RELOGIC_MAGIC: u64 = 27_981_915_666_277_746;
/// File type stored in the top byte of the magic for world files.
pub const FILETYPE_WORLD: u8 = 1;
/// Full magic value every world file starts with after the version.
pub const WORLD_MAGIC: u64 = RELOGIC_MAGIC | ((FILETYPE_WORLD as u64) << 56);

/// Decoded world file header.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FileHeader {
    /// Format version
    pub version: FormatVersion,
    /// Number of times the file has been saved
    pub revision: u32,
    /// Favorite and other per-file bits
    pub favorite_bits: u64,
    /// Section offsets as recorded in the file
    pub sections: SectionTable,
    /// Block IDs that carry frame coordinates in this file
    pub framed: FramedTiles,
}

impl FileHeader {
    /// A header for `version` with a zeroed section table.
    pub fn new(version: FormatVersion, framed: FramedTiles) -> Self {
        Self {
            version,
            revision: 0,
            favorite_bits: 0,
            sections: SectionTable::new(version),
            framed,
        }
    }

    /// Read the header from the start of `stream`.
    ///
    /// The magic is checked before the version, so a file that is not a
    /// world at all reports [`Error::InvalidMagic`].
    pub fn read(stream: &mut BinaryStream) -> Result<Self> {
        let raw_version = stream.read_u32()?;
        let magic = stream.read_u64()?;
        if magic != WORLD_MAGIC {
            return Err(Error::InvalidMagic {
                expected: WORLD_MAGIC,
                found: magic,
            });
        }
        let version = FormatVersion::from_version_number(raw_version)?;
        let revision = stream.read_u32()?;
        let favorite_bits = stream.read_u64()?;
        let sections = SectionTable::read(stream, version)?;
        let framed = FramedTiles::read(stream)?;

        debug!(
            "header: version {version}, revision {revision}, {} sections, {} framed tile ids",
            sections.len(),
            framed.tile_count()
        );

        Ok(Self {
            version,
            revision,
            favorite_bits,
            sections,
            framed,
        })
    }

    /// Write the header; returns the stream position of the first section offset.
    pub(crate) fn write(&self, stream: &mut BinaryStream) -> Result<usize> {
        stream.write_u32(self.version.number())?;
        stream.write_u64(WORLD_MAGIC)?;
        stream.write_u32(self.revision)?;
        stream.write_u64(self.favorite_bits)?;
        let table_at = stream.position() + 2;
        self.sections.write(stream)?;
        self.framed.write(stream)?;
        Ok(table_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_magic_spells_relogic() {
        assert_eq!(&RELOGIC_MAGIC.to_le_bytes()[..7], b"relogic");
        assert_eq!(WORLD_MAGIC >> 56, 1);
    }

    #[test]
    fn test_round_trip() {
        let mut header = FileHeader::new(FormatVersion(140), FramedTiles::from_ids(20, [3, 5]));
        header.revision = 12;
        header.favorite_bits = 1;

        let mut stream = BinaryStream::new();
        let table_at = header.write(&mut stream).unwrap();
        assert_eq!(table_at, 4 + 8 + 4 + 8 + 2);

        stream.seek(0).unwrap();
        assert_eq!(FileHeader::read(&mut stream).unwrap(), header);
    }

    #[test]
    fn test_wrong_magic() {
        let mut stream = BinaryStream::new();
        stream.write_u32(147).unwrap();
        stream.write_u64(RELOGIC_MAGIC | (3 << 56)).unwrap();
        stream.seek(0).unwrap();

        let err = FileHeader::read(&mut stream).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedVersion);
        assert!(matches!(err, Error::InvalidMagic { .. }));
    }

    #[test]
    fn test_version_out_of_range() {
        let mut stream = BinaryStream::new();
        stream.write_u32(71).unwrap();
        stream.write_u64(WORLD_MAGIC).unwrap();
        stream.seek(0).unwrap();

        let err = FileHeader::read(&mut stream).unwrap_err();
        assert!(matches!(err, Error::UnsupportedVersion(71)));
    }
}
