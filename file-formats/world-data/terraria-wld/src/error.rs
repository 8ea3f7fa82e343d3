//! Error types for world-file decoding, encoding and editing.
//!
//! Decoding follows a fail-fast strategy: the first fault aborts the whole
//! call and no partial [`World`](crate::World) is returned. Every variant
//! carries a locator (byte position, section or tile index) so callers can
//! report where the file went wrong.
//!
//! Errors raised while a section body is being read are wrapped in
//! [`Error::Section`]. Use [`Error::kind`] to classify an error without
//! unwrapping that layer, and [`Error::section`] to find the offending
//! section.
//!
//! # Examples
//!
//! ```
//! use terraria_wld::{BinaryStream, ErrorKind};
//!
//! let mut stream = BinaryStream::from_bytes(vec![0x01, 0x02]);
//! let err = stream.read_u32().unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::OutOfBounds);
//! assert_eq!(stream.position(), 0);
//! ```

use std::fmt;

use thiserror::Error;

use crate::section::Section;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reading, writing or editing a world.
#[derive(Error, Debug)]
pub enum Error {
    /// A read or seek would go past the end of the buffer.
    #[error("out of bounds: {needed} byte(s) requested at offset {position}, buffer holds {len}")]
    OutOfBounds {
        /// Cursor position at the time of the request.
        position: usize,
        /// Number of bytes the operation required.
        needed: usize,
        /// Total buffer length.
        len: usize,
    },

    /// A variable-length integer prefix is malformed or too large.
    #[error("malformed length prefix at offset {position}: {reason}")]
    MalformedLength {
        /// Offset of the first prefix byte.
        position: usize,
        /// What was wrong with it.
        reason: &'static str,
    },

    /// The file magic does not identify a world file.
    #[error("invalid magic value: expected {expected:#018x}, found {found:#018x}")]
    InvalidMagic {
        /// Expected magic value.
        expected: u64,
        /// Magic value found in the file.
        found: u64,
    },

    /// The declared format version is outside the supported range.
    #[error("unsupported world format version {0}")]
    UnsupportedVersion(u32),

    /// The stream position at a section start disagrees with the offset table.
    #[error("offset mismatch at start of {section} section: table says {expected}, stream is at {actual}")]
    OffsetMismatch {
        /// Section being entered.
        section: Section,
        /// Offset recorded in the section table.
        expected: u32,
        /// Actual stream position.
        actual: usize,
    },

    /// The section table itself is inconsistent.
    #[error("invalid section table: {0}")]
    InvalidSectionTable(String),

    /// The tile stream contains an impossible flag or run-length combination.
    #[error("corrupt tile stream at tile {index}: {reason}")]
    CorruptTileStream {
        /// Column-major index of the offending tile.
        index: usize,
        /// Description of the fault.
        reason: String,
    },

    /// A tile edit would break a tile invariant.
    #[error("invalid tile state at ({x}, {y}): {reason}")]
    InvalidTileState {
        /// Column of the cell.
        x: u32,
        /// Row of the cell.
        y: u32,
        /// Which invariant failed.
        reason: String,
    },

    /// A length-prefixed string is not valid UTF-8.
    #[error("invalid UTF-8 text at offset {position}")]
    InvalidText {
        /// Offset of the string bytes.
        position: usize,
    },

    /// A tile entity has a kind this crate does not know how to size.
    #[error("unknown tile entity kind {kind} at offset {position}")]
    UnknownTileEntity {
        /// Kind byte read from the stream.
        kind: u8,
        /// Offset of the kind byte.
        position: usize,
    },

    /// A structural record is inconsistent.
    #[error("invalid record: {0}")]
    InvalidRecord(String),

    /// An error raised while a particular section was being processed.
    #[error("{section} section: {source}")]
    Section {
        /// Section that failed.
        section: Section,
        /// Underlying error.
        #[source]
        source: Box<Error>,
    },
}

/// Coarse classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Stream read or seek past the buffer end.
    OutOfBounds,
    /// Bad variable-length integer.
    MalformedLength,
    /// Magic or version check failed.
    UnsupportedVersion,
    /// Section boundary self-check failed.
    OffsetMismatch,
    /// Invalid flag or run-length combination, or a run overrun.
    CorruptTileStream,
    /// A mutation would violate tile invariants.
    InvalidTileState,
    /// A chest, sign, NPC, entity or footer record is inconsistent.
    CorruptRecord,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::OutOfBounds => "OutOfBounds",
            Self::MalformedLength => "MalformedLength",
            Self::UnsupportedVersion => "UnsupportedVersion",
            Self::OffsetMismatch => "OffsetMismatch",
            Self::CorruptTileStream => "CorruptTileStream",
            Self::InvalidTileState => "InvalidTileState",
            Self::CorruptRecord => "CorruptRecord",
        };
        f.write_str(name)
    }
}

impl Error {
    /// Classify this error, looking through [`Error::Section`] wrappers.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::OutOfBounds { .. } => ErrorKind::OutOfBounds,
            Self::MalformedLength { .. } => ErrorKind::MalformedLength,
            Self::InvalidMagic { .. } | Self::UnsupportedVersion(_) => {
                ErrorKind::UnsupportedVersion
            }
            Self::OffsetMismatch { .. } | Self::InvalidSectionTable(_) => {
                ErrorKind::OffsetMismatch
            }
            Self::CorruptTileStream { .. } => ErrorKind::CorruptTileStream,
            Self::InvalidTileState { .. } => ErrorKind::InvalidTileState,
            Self::InvalidText { .. } | Self::UnknownTileEntity { .. } | Self::InvalidRecord(_) => {
                ErrorKind::CorruptRecord
            }
            Self::Section { source, .. } => source.kind(),
        }
    }

    /// The section in which this error was raised, if known.
    pub fn section(&self) -> Option<Section> {
        match self {
            Self::Section { section, .. } => Some(*section),
            Self::OffsetMismatch { section, .. } => Some(*section),
            _ => None,
        }
    }

    /// Tile index for [`ErrorKind::CorruptTileStream`] errors.
    pub fn tile_index(&self) -> Option<usize> {
        match self {
            Self::CorruptTileStream { index, .. } => Some(*index),
            Self::Section { source, .. } => source.tile_index(),
            _ => None,
        }
    }

    /// Wrap this error with the section it was raised in.
    ///
    /// Errors that already carry a section are returned unchanged.
    pub(crate) fn in_section(self, section: Section) -> Self {
        match self {
            Self::Section { .. } | Self::OffsetMismatch { .. } => self,
            other => Self::Section {
                section,
                source: Box::new(other),
            },
        }
    }

    pub(crate) fn corrupt_tile(index: usize, reason: impl Into<String>) -> Self {
        Self::CorruptTileStream {
            index,
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_tile(x: u32, y: u32, reason: impl Into<String>) -> Self {
        Self::InvalidTileState {
            x,
            y,
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_record(message: impl Into<String>) -> Self {
        Self::InvalidRecord(message.into())
    }
}
