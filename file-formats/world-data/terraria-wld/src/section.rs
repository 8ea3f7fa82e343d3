//! Sections and the section offset table.
//!
//! The offset table is the format's only integrity check. The decoder never
//! seeks to a section; it reads sections back to back and requires the
//! cursor to land exactly on each recorded offset.

use std::fmt;
use std::ops::Range;

use crate::error::{Error, Result};
use crate::stream::BinaryStream;
use crate::version::FormatVersion;

/// A labeled byte range of a world file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Section {
    /// World title and the version-gated scalar fields
    Metadata,
    /// Run-length encoded tile grid
    Tiles,
    /// Chest records
    Chests,
    /// Sign records
    Signs,
    /// Town NPCs and, from version 140, mobs
    Npcs,
    /// Tile entities (version 140 and later)
    TileEntities,
    /// Title and world id repeated as a trailer
    Footer,
}

impl Section {
    /// Lowercase display name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Metadata => "metadata",
            Self::Tiles => "tiles",
            Self::Chests => "chests",
            Self::Signs => "signs",
            Self::Npcs => "npcs",
            Self::TileEntities => "tile entities",
            Self::Footer => "footer",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Byte offsets at which each section of a file begins.
///
/// A file may declare more pointers than its version has sections. The
/// surplus entries are kept as they are so they survive a re-encode, but
/// they take no part in decoding or validation.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SectionTable {
    layout: Vec<Section>,
    offsets: Vec<u32>,
    unused: Vec<u32>,
}

impl SectionTable {
    /// A zeroed table with the section layout of `version`.
    pub fn new(version: FormatVersion) -> Self {
        let layout = version.sections().to_vec();
        let offsets = vec![0; layout.len()];
        Self {
            layout,
            offsets,
            unused: Vec::new(),
        }
    }

    /// This table with `unused` appended as surplus pointers.
    pub fn with_unused(mut self, unused: &[u32]) -> Self {
        self.unused = unused.to_vec();
        self
    }

    /// Number of sections.
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// Raw offsets in file order.
    pub fn offsets(&self) -> &[u32] {
        &self.offsets
    }

    /// Pointers declared past the version's last section.
    pub fn unused(&self) -> &[u32] {
        &self.unused
    }

    /// Number of pointers the table declares on disk.
    pub fn declared_len(&self) -> usize {
        self.offsets.len() + self.unused.len()
    }

    /// Offset of `section`, if the layout contains it.
    pub fn offset(&self, section: Section) -> Option<u32> {
        self.index_of(section).map(|index| self.offsets[index])
    }

    /// Iterate `(section, offset)` pairs in file order.
    pub fn sections(&self) -> impl Iterator<Item = (Section, u32)> + '_ {
        self.layout.iter().copied().zip(self.offsets.iter().copied())
    }

    /// Byte range of `section` within a file of `file_len` bytes.
    ///
    /// A section ends where the next one starts; the last one ends at the
    /// end of the file.
    pub fn range(&self, section: Section, file_len: usize) -> Option<Range<usize>> {
        let index = self.index_of(section)?;
        let start = self.offsets[index] as usize;
        let end = self
            .offsets
            .get(index + 1)
            .map_or(file_len, |&next| next as usize);
        (start <= end).then_some(start..end)
    }

    /// Position of `section` in the layout.
    pub fn index_of(&self, section: Section) -> Option<usize> {
        self.layout.iter().position(|&s| s == section)
    }

    pub(crate) fn set_offset(&mut self, section: Section, offset: u32) -> Result<()> {
        let index = self.index_of(section).ok_or_else(|| {
            Error::InvalidSectionTable(format!("layout has no {section} section"))
        })?;
        self.offsets[index] = offset;
        Ok(())
    }

    /// Check that offsets are non-decreasing and inside a file of `file_len` bytes.
    pub fn validate(&self, file_len: usize) -> Result<()> {
        for (index, (section, offset)) in self.sections().enumerate() {
            if offset as usize > file_len {
                return Err(Error::InvalidSectionTable(format!(
                    "{section} offset {offset} is beyond end of file ({file_len} bytes)"
                )));
            }
            if index > 0 && offset < self.offsets[index - 1] {
                return Err(Error::InvalidSectionTable(format!(
                    "{section} offset {offset} precedes the previous section at {}",
                    self.offsets[index - 1]
                )));
            }
        }
        Ok(())
    }

    pub(crate) fn read(stream: &mut BinaryStream, version: FormatVersion) -> Result<Self> {
        let count = usize::from(stream.read_u16()?);
        let mut table = Self::new(version);
        if count < table.len() {
            return Err(Error::InvalidSectionTable(format!(
                "version {version} needs {} sections, file declares {count}",
                table.len()
            )));
        }
        for offset in &mut table.offsets {
            *offset = stream.read_u32()?;
        }
        for _ in table.len()..count {
            table.unused.push(stream.read_u32()?);
        }
        Ok(table)
    }

    pub(crate) fn write(&self, stream: &mut BinaryStream) -> Result<()> {
        let count = u16::try_from(self.declared_len()).map_err(|_| {
            Error::InvalidSectionTable(format!("{} section pointers", self.declared_len()))
        })?;
        stream.write_u16(count)?;
        for &offset in self.offsets.iter().chain(&self.unused) {
            stream.write_u32(offset)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use pretty_assertions::assert_eq;

    fn table(offsets: &[u32]) -> SectionTable {
        let mut table = SectionTable::new(FormatVersion(147));
        table.offsets.copy_from_slice(offsets);
        table
    }

    #[test]
    fn test_ranges_follow_next_offset() {
        let table = table(&[100, 200, 260, 270, 290, 300, 310]);

        assert_eq!(table.range(Section::Metadata, 330), Some(100..200));
        assert_eq!(table.range(Section::TileEntities, 330), Some(300..310));
        assert_eq!(table.range(Section::Footer, 330), Some(310..330));
    }

    #[test]
    fn test_legacy_layout_has_no_tile_entities() {
        let table = SectionTable::new(FormatVersion(120));
        assert_eq!(table.len(), 6);
        assert_eq!(table.offset(Section::TileEntities), None);
        assert_eq!(table.index_of(Section::Footer), Some(5));
    }

    #[test]
    fn test_validate_rejects_decreasing_offsets() {
        let err = table(&[100, 90, 260, 270, 290, 300, 310])
            .validate(400)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OffsetMismatch);
    }

    #[test]
    fn test_validate_rejects_offsets_past_end() {
        let err = table(&[100, 200, 260, 270, 290, 300, 310])
            .validate(305)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OffsetMismatch);
    }

    #[test]
    fn test_read_rejects_short_section_count() {
        let mut stream = BinaryStream::new();
        stream.write_u16(6).unwrap();
        for _ in 0..6 {
            stream.write_u32(0).unwrap();
        }
        stream.seek(0).unwrap();

        let err = SectionTable::read(&mut stream, FormatVersion(147)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OffsetMismatch);
    }

    #[test]
    fn test_read_keeps_surplus_pointers() {
        let offsets = [100, 200, 260, 270, 290, 300, 310];
        let mut stream = BinaryStream::new();
        stream.write_u16(10).unwrap();
        for offset in offsets.into_iter().chain([0, 0, 0]) {
            stream.write_u32(offset).unwrap();
        }
        let written = stream.len();
        stream.seek(0).unwrap();

        let table = SectionTable::read(&mut stream, FormatVersion(147)).unwrap();
        assert_eq!(table.len(), 7);
        assert_eq!(table.declared_len(), 10);
        assert_eq!(table.offsets(), &offsets[..]);
        assert_eq!(table.unused(), &[0, 0, 0]);
        assert_eq!(table.range(Section::Footer, 330), Some(310..330));
        table.validate(330).unwrap();

        let mut out = BinaryStream::new();
        table.write(&mut out).unwrap();
        assert_eq!(out.len(), written);
    }
}
