//! Reader and writer for Terraria `.wld` world-save files.
//!
//! A world file is a small header followed by a fixed sequence of
//! sections: metadata, the run-length compressed tile grid, chests, signs,
//! NPCs, tile entities (format 140 and later) and a footer. The header
//! records where every section starts, and decoding checks each of those
//! offsets against the actual stream position.
//!
//! Supported format versions are 102 through 147.
//!
//! # Examples
//!
//! ```
//! use terraria_wld::{Block, FramedTiles, Sign, Tile, World, WorldFile};
//!
//! // Build a small world
//! let mut world = World::new(32, 16, FramedTiles::from_ids(314, [21])).unwrap();
//! world.metadata.title = "Tiny".to_string();
//! for x in 0..32 {
//!     world.set_tile(x, 15, Tile::default().with_block(Block::new(0))).unwrap();
//! }
//! world.signs.push(Sign::new(4, 14, "Hello"));
//!
//! // Write it and read it back
//! let codec = WorldFile::new();
//! let bytes = codec.encode(&world).unwrap();
//! let decoded = codec.decode(bytes.as_slice()).unwrap();
//!
//! assert_eq!(decoded, world);
//! assert_eq!(decoded.tile_counts().get(&0), Some(&32));
//! ```
//!
//! Only the header and metadata are needed to list worlds:
//!
//! ```
//! # use terraria_wld::{FramedTiles, World, WorldFile};
//! # let world = World::new(8, 8, FramedTiles::default()).unwrap();
//! # let bytes = WorldFile::new().encode(&world).unwrap();
//! let summary = WorldFile::new().read_summary(bytes).unwrap();
//! assert_eq!((summary.width, summary.height), (8, 8));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod chest;
pub mod codec;
pub mod entity;
pub mod error;
pub mod framed;
pub mod header;
pub mod metadata;
pub mod npc;
pub mod objects;
#[cfg(feature = "render")]
#[cfg_attr(docsrs, doc(cfg(feature = "render")))]
pub mod render;
pub mod section;
pub mod sign;
pub mod stream;
pub mod tile;
pub mod validation;
pub mod version;
pub mod world;
pub mod world_file;

pub use chest::{Chest, DEFAULT_CHEST_SLOTS, ItemStack};
pub use codec::{MAX_RUN_LENGTH, TileCodec, TileRun};
pub use entity::{TileEntity, TileEntityKind};
pub use error::{Error, ErrorKind, Result};
pub use framed::FramedTiles;
pub use header::{FileHeader, WORLD_MAGIC};
pub use metadata::{EvilBiome, FieldInfo, FieldValue, METADATA_FIELDS, WorldMetadata};
pub use npc::{Mob, Npc};
pub use objects::{FramedObject, group_framed_objects, object_at};
#[cfg(feature = "render")]
pub use render::{MapPalette, map_color, render_map};
pub use section::{Section, SectionTable};
pub use sign::Sign;
pub use stream::{BinaryStream, Color};
pub use tile::{Block, BrickShape, FRAME_STEP, Frame, Liquid, LiquidKind, Tile, Wall, Wiring};
pub use validation::validate_world;
pub use version::{FormatVersion, LATEST_VERSION};
pub use world::{Layers, Region, World};
pub use world_file::{CodecOptions, DecodeState, WorldFile, WorldReader, WorldSummary};
