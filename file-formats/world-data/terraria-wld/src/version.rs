//! World format versions and the features they gate.

use std::fmt;

use crate::error::{Error, Result};
use crate::section::Section;

/// Oldest format version this crate reads.
pub const COMPATIBLE_VERSION: u32 = 102;
/// First version with the 1.3 metadata block, mobs and tile entities.
pub const VERSION_140: u32 = 140;
/// First version with expert mode, creation time and slime rain.
pub const VERSION_147: u32 = 147;
/// Newest format version this crate reads and writes.
pub const LATEST_VERSION: u32 = VERSION_147;

const SECTIONS_LEGACY: &[Section] = &[
    Section::Metadata,
    Section::Tiles,
    Section::Chests,
    Section::Signs,
    Section::Npcs,
    Section::Footer,
];

const SECTIONS_140: &[Section] = &[
    Section::Metadata,
    Section::Tiles,
    Section::Chests,
    Section::Signs,
    Section::Npcs,
    Section::TileEntities,
    Section::Footer,
];

/// A world file format version number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FormatVersion(pub u32);

impl FormatVersion {
    /// The newest supported version.
    pub const LATEST: Self = Self(LATEST_VERSION);

    /// Validate a raw version number read from a file header.
    ///
    /// # Examples
    ///
    /// ```
    /// use terraria_wld::FormatVersion;
    ///
    /// assert!(FormatVersion::from_version_number(146).is_ok());
    /// assert!(FormatVersion::from_version_number(39).is_err());
    /// ```
    pub fn from_version_number(number: u32) -> Result<Self> {
        let version = Self(number);
        if version.is_supported() {
            Ok(version)
        } else {
            Err(Error::UnsupportedVersion(number))
        }
    }

    /// The raw version number.
    pub fn number(self) -> u32 {
        self.0
    }

    /// Whether this crate can read and write this version.
    pub fn is_supported(self) -> bool {
        (COMPATIBLE_VERSION..=LATEST_VERSION).contains(&self.0)
    }

    /// Whether the file carries the tile entity section and the mob list.
    pub fn has_tile_entities(self) -> bool {
        self.0 >= VERSION_140
    }

    /// Whether a metadata field introduced in `since` is present.
    pub fn includes(self, since: u32) -> bool {
        self.0 >= since
    }

    /// Sections of this version, in file order.
    pub fn sections(self) -> &'static [Section] {
        if self.has_tile_entities() {
            SECTIONS_140
        } else {
            SECTIONS_LEGACY
        }
    }
}

impl Default for FormatVersion {
    fn default() -> Self {
        Self::LATEST
    }
}

impl fmt::Display for FormatVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_supported_range() {
        assert!(!FormatVersion(101).is_supported());
        assert!(FormatVersion(102).is_supported());
        assert!(FormatVersion(147).is_supported());
        assert!(!FormatVersion(148).is_supported());
    }

    #[test]
    fn test_section_layout_by_version() {
        assert_eq!(FormatVersion(139).sections().len(), 6);
        assert_eq!(FormatVersion(140).sections().len(), 7);
        assert_eq!(FormatVersion(139).sections().last(), Some(&Section::Footer));
        assert!(!FormatVersion(139).sections().contains(&Section::TileEntities));
    }

    #[test]
    fn test_from_version_number_error() {
        let err = FormatVersion::from_version_number(230).unwrap_err();
        assert_eq!(err.to_string(), "unsupported world format version 230");
    }
}
