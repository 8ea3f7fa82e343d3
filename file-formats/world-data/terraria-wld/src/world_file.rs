//! Top-level decode and encode entry points.
//!
//! Decoding is driven by [`WorldReader`], a small state machine that reads
//! the header and then one section at a time, checking each section start
//! against the offset table. Encoding writes the header with a zeroed
//! offset table, emits every section in order and backpatches each offset
//! once the section's start position is known.

use log::{debug, warn};

use crate::chest::{read_chests, write_chests};
use crate::codec::{MAX_RUN_LENGTH, TileCodec};
use crate::entity::{read_tile_entities, write_tile_entities};
use crate::error::{Error, ErrorKind, Result};
use crate::header::FileHeader;
use crate::metadata::WorldMetadata;
use crate::npc::{read_npcs, write_npcs};
use crate::section::{Section, SectionTable};
use crate::sign::{read_signs, write_signs};
use crate::stream::BinaryStream;
use crate::validation::validate_world;
use crate::version::FormatVersion;
use crate::world::World;

/// Codec settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecOptions {
    /// Treat a footer that disagrees with the metadata as an error instead
    /// of a warning
    pub strict_footer: bool,
    /// Largest repeat count the tile encoder emits (at least 1)
    pub max_run_length: u16,
}

impl Default for CodecOptions {
    fn default() -> Self {
        Self {
            strict_footer: false,
            max_run_length: MAX_RUN_LENGTH,
        }
    }
}

/// Where a [`WorldReader`] is in the decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeState {
    /// Nothing read yet
    Start,
    /// Header and offset table read
    HeaderRead,
    /// Sections before `next` have been read
    SectionsInProgress {
        /// Index of the next section in the offset table
        next: usize,
    },
    /// Every section read
    Complete,
    /// Decoding stopped; terminal
    Failed {
        /// Index of the offending section, `None` for the header
        section: Option<usize>,
        /// What went wrong
        kind: ErrorKind,
    },
}

/// Header and metadata of a world, read without touching the tiles.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldSummary {
    /// Format version
    pub version: FormatVersion,
    /// Save counter
    pub revision: u32,
    /// World title
    pub title: String,
    /// World id
    pub world_id: u32,
    /// Width in tiles
    pub width: u32,
    /// Height in tiles
    pub height: u32,
    /// Section offsets
    pub sections: SectionTable,
    /// File size in bytes
    pub file_len: usize,
}

/// Incremental world decoder.
///
/// # Examples
///
/// ```
/// use terraria_wld::{DecodeState, FramedTiles, World, WorldFile, WorldReader};
///
/// let world = World::new(4, 4, FramedTiles::default()).unwrap();
/// let bytes = WorldFile::new().encode(&world).unwrap();
///
/// let mut reader = WorldReader::new(bytes);
/// assert_eq!(reader.state(), DecodeState::Start);
/// reader.read_header().unwrap();
/// assert_eq!(reader.state(), DecodeState::HeaderRead);
/// reader.read_next_section().unwrap();
/// assert_eq!(reader.state(), DecodeState::SectionsInProgress { next: 1 });
///
/// let decoded = reader.finish().unwrap();
/// assert_eq!(decoded, world);
/// ```
#[derive(Debug)]
pub struct WorldReader {
    stream: BinaryStream,
    options: CodecOptions,
    state: DecodeState,
    table: SectionTable,
    header: Option<FileHeader>,
    metadata: Option<WorldMetadata>,
    world: Option<World>,
}

impl WorldReader {
    /// Reader over `bytes` with default options.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self::with_options(bytes, CodecOptions::default())
    }

    /// Reader over `bytes` with custom options.
    pub fn with_options(bytes: impl Into<Vec<u8>>, options: CodecOptions) -> Self {
        Self {
            stream: BinaryStream::from_bytes(bytes),
            options,
            state: DecodeState::Start,
            table: SectionTable::new(FormatVersion::LATEST),
            header: None,
            metadata: None,
            world: None,
        }
    }

    /// Current decode state.
    pub fn state(&self) -> DecodeState {
        self.state
    }

    /// The offset table, once the header has been read.
    pub fn sections(&self) -> Option<&SectionTable> {
        match self.state {
            DecodeState::Start | DecodeState::Failed { section: None, .. } => None,
            _ => Some(&self.table),
        }
    }

    /// Read the header and offset table.
    pub fn read_header(&mut self) -> Result<&FileHeader> {
        if self.state != DecodeState::Start {
            return Err(self.misuse("header has already been read"));
        }

        let header = match Self::decode_header(&mut self.stream) {
            Ok(header) => header,
            Err(err) => {
                self.fail(None, &err);
                return Err(err);
            }
        };
        self.table = header.sections.clone();
        self.state = DecodeState::HeaderRead;
        debug!("decode state: header read, {} sections", self.table.len());
        let header = self.header.insert(header);
        Ok(&*header)
    }

    fn decode_header(stream: &mut BinaryStream) -> Result<FileHeader> {
        let header = FileHeader::read(stream)?;
        header.sections.validate(stream.len())?;
        Ok(header)
    }

    /// Read the next section; returns it, or `None` once every section is read.
    pub fn read_next_section(&mut self) -> Result<Option<Section>> {
        let index = match self.state {
            DecodeState::Start => {
                self.read_header()?;
                0
            }
            DecodeState::HeaderRead => 0,
            DecodeState::SectionsInProgress { next } => next,
            DecodeState::Complete => return Ok(None),
            DecodeState::Failed { .. } => return Err(self.misuse("decoding has already failed")),
        };

        let Some((section, expected)) = self.table.sections().nth(index) else {
            self.state = DecodeState::Complete;
            return Ok(None);
        };

        match self.read_section(section, expected) {
            Ok(()) => {
                self.state = if index + 1 == self.table.len() {
                    DecodeState::Complete
                } else {
                    DecodeState::SectionsInProgress { next: index + 1 }
                };
                debug!("decode state: {:?}", self.state);
                Ok(Some(section))
            }
            Err(err) => {
                let err = err.in_section(section);
                self.fail(Some(index), &err);
                Err(err)
            }
        }
    }

    /// Read every remaining section and return the world.
    pub fn finish(mut self) -> Result<World> {
        while self.read_next_section()?.is_some() {}

        if self.stream.remaining() > 0 {
            warn!(
                "{} trailing bytes after the footer",
                self.stream.remaining()
            );
        }
        self.world
            .take()
            .ok_or_else(|| Error::invalid_record("file has no tile section"))
    }

    fn fail(&mut self, section: Option<usize>, err: &Error) {
        self.state = DecodeState::Failed {
            section,
            kind: err.kind(),
        };
        debug!("decode state: failed in section {section:?}: {err}");
    }

    fn misuse(&self, message: &str) -> Error {
        Error::invalid_record(format!("{message} (reader is in state {:?})", self.state))
    }

    fn read_section(&mut self, section: Section, expected: u32) -> Result<()> {
        let actual = self.stream.position();
        if actual != expected as usize {
            return Err(Error::OffsetMismatch {
                section,
                expected,
                actual,
            });
        }
        debug!("reading {section} section at offset {actual}");

        if section == Section::Metadata {
            let version = self.table_version()?;
            let mut metadata = WorldMetadata::read(&mut self.stream, version)?;
            if let Some(tiles_at) = self.table.offset(Section::Tiles) {
                let extra = (tiles_at as usize).saturating_sub(self.stream.position());
                if extra > 0 {
                    debug!("keeping {extra} unknown metadata bytes");
                    metadata.unknown = self.stream.read_bytes(extra)?;
                }
            }
            self.metadata = Some(metadata);
            return Ok(());
        }
        if section == Section::Tiles {
            let header = self.header.take().ok_or_else(|| Error::invalid_record("header missing"))?;
            let metadata = self
                .metadata
                .take()
                .ok_or_else(|| Error::invalid_record("tiles precede metadata"))?;
            let tiles = TileCodec::new(metadata.width(), metadata.height(), &header.framed)
                .decode(&mut self.stream)?;
            self.world = Some(World::from_parts(header, metadata, tiles));
            return Ok(());
        }

        let Some(world) = self.world.as_mut() else {
            return Err(Error::invalid_record(format!("{section} section precedes tiles")));
        };
        let stream = &mut self.stream;
        match section {
            Section::Metadata | Section::Tiles => {}
            Section::Chests => {
                let (slots, chests) = read_chests(stream)?;
                world.chest_slots = slots;
                world.chests = chests;
            }
            Section::Signs => world.signs = read_signs(stream)?,
            Section::Npcs => {
                let (npcs, mobs) = read_npcs(stream, world.version())?;
                world.npcs = npcs;
                world.mobs = mobs;
            }
            Section::TileEntities => world.tile_entities = read_tile_entities(stream)?,
            Section::Footer => {
                let loaded = stream.read_bool()?;
                let title = stream.read_string()?;
                let world_id = stream.read_i32()?;
                check_footer(self.options, world, loaded, &title, world_id)?;
            }
        }
        Ok(())
    }

    fn table_version(&self) -> Result<FormatVersion> {
        self.header
            .as_ref()
            .map(|header| header.version)
            .ok_or_else(|| Error::invalid_record("header missing"))
    }

    fn summary(&self) -> Result<WorldSummary> {
        let header = self
            .header
            .as_ref()
            .ok_or_else(|| Error::invalid_record("header missing"))?;
        let metadata = self
            .metadata
            .as_ref()
            .ok_or_else(|| Error::invalid_record("metadata missing"))?;
        Ok(WorldSummary {
            version: header.version,
            revision: header.revision,
            title: metadata.title.clone(),
            world_id: metadata.world_id,
            width: metadata.width(),
            height: metadata.height(),
            sections: self.table.clone(),
            file_len: self.stream.len(),
        })
    }
}

fn check_footer(
    options: CodecOptions,
    world: &World,
    loaded: bool,
    title: &str,
    world_id: i32,
) -> Result<()> {
    let mut problems = Vec::new();
    if !loaded {
        problems.push("footer is not marked as loaded".to_string());
    }
    if title != world.title() {
        problems.push(format!(
            "footer title {title:?} differs from world title {:?}",
            world.title()
        ));
    }
    if world_id as u32 != world.metadata.world_id {
        problems.push(format!(
            "footer world id {world_id} differs from world id {}",
            world.metadata.world_id
        ));
    }

    if problems.is_empty() {
        return Ok(());
    }
    let message = problems.join("; ");
    if options.strict_footer {
        Err(Error::invalid_record(message))
    } else {
        warn!("{message}");
        Ok(())
    }
}

/// World file reader and writer.
///
/// # Examples
///
/// ```
/// use terraria_wld::{Block, FramedTiles, Tile, World, WorldFile};
///
/// let mut world = World::new(8, 6, FramedTiles::default()).unwrap();
/// world.metadata.title = "Example".to_string();
/// world.set_tile(2, 3, Tile::default().with_block(Block::new(1))).unwrap();
///
/// let codec = WorldFile::new();
/// let bytes = codec.encode(&world).unwrap();
/// let decoded = codec.decode(bytes.as_slice()).unwrap();
/// assert_eq!(decoded, world);
/// ```
#[derive(Debug, Clone, Default)]
pub struct WorldFile {
    options: CodecOptions,
}

impl WorldFile {
    /// A codec with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// A codec with custom options.
    pub fn with_options(options: CodecOptions) -> Self {
        Self { options }
    }

    /// The codec's options.
    pub fn options(&self) -> CodecOptions {
        self.options
    }

    /// Decode a complete world.
    pub fn decode(&self, bytes: impl Into<Vec<u8>>) -> Result<World> {
        WorldReader::with_options(bytes, self.options).finish()
    }

    /// Decode only the header and metadata section.
    pub fn read_summary(&self, bytes: impl Into<Vec<u8>>) -> Result<WorldSummary> {
        let mut reader = WorldReader::with_options(bytes, self.options);
        reader.read_header()?;
        reader.read_next_section()?;
        reader.summary()
    }

    /// Encode `world`, recomputing the section offset table.
    ///
    /// The world is validated first; an invalid world produces no bytes.
    pub fn encode(&self, world: &World) -> Result<Vec<u8>> {
        validate_world(world)?;

        let version = world.version();
        let mut header = world.header.clone();
        header.sections = SectionTable::new(version).with_unused(world.header.sections.unused());

        let mut stream = BinaryStream::new();
        let table_at = header.write(&mut stream)?;
        for (index, &section) in version.sections().iter().enumerate() {
            let offset = u32::try_from(stream.position()).map_err(|_| {
                Error::InvalidSectionTable(format!(
                    "{section} section starts beyond the 4 GiB offset range"
                ))
            })?;
            stream.patch_u32(table_at + index * 4, offset)?;
            debug!("writing {section} section at offset {offset}");
            self.write_section(&mut stream, world, section)
                .map_err(|err| err.in_section(section))?;
        }

        debug!("encoded world {:?}: {} bytes", world.title(), stream.len());
        Ok(stream.into_inner())
    }

    fn write_section(&self, stream: &mut BinaryStream, world: &World, section: Section) -> Result<()> {
        let version = world.version();
        match section {
            Section::Metadata => world.metadata.write(stream, version),
            Section::Tiles => TileCodec::new(world.width(), world.height(), world.framed())
                .with_max_run(self.options.max_run_length)
                .encode(stream, world.tile_grid()),
            Section::Chests => write_chests(stream, world.chest_slots, &world.chests),
            Section::Signs => write_signs(stream, &world.signs),
            Section::Npcs => write_npcs(stream, version, &world.npcs, &world.mobs),
            Section::TileEntities => write_tile_entities(stream, &world.tile_entities),
            Section::Footer => {
                stream.write_bool(true)?;
                stream.write_string(world.title())?;
                stream.write_i32(world.metadata.world_id as i32)
            }
        }
    }
}
