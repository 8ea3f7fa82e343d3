//! Run-length and flag-bit codec for the tile section.
//!
//! Tiles are stored column by column (all rows of column 0, then column 1,
//! and so on). Each stored tile starts with one to three header bytes, each
//! flagging whether the next one follows, then the block, wall and liquid
//! payloads, and finally an optional repeat count saying how many of the
//! following cells are identical copies. Runs follow the column-major index
//! and may continue into the next column.
//!
//! ```text
//! header 1   0x01 header 2 follows   0x02 block      0x04 wall
//!            0x18 liquid kind        0x20 u16 id     0xC0 run mode
//! header 2   0x01 header 3 follows   0x02 red wire   0x04 green wire
//!            0x08 blue wire          0x70 brick shape
//! header 3   0x02 actuator           0x04 inactive   0x08 block paint
//!            0x10 wall paint         0x20 yellow wire
//! ```
//!
//! The encoder collapses every maximal run of identical tiles, capped at
//! the configured run length. It produces the same grid as the game's
//! writer, not necessarily the same bytes.

use bitflags::bitflags;
use log::{debug, trace};

use crate::error::{Error, Result};
use crate::framed::FramedTiles;
use crate::stream::BinaryStream;
use crate::tile::{Block, BrickShape, Frame, Liquid, LiquidKind, Tile, Wall, Wiring};

/// Largest repeat count the game's reader accepts (it reads a signed 16-bit value).
pub const MAX_RUN_LENGTH: u16 = i16::MAX as u16;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct Header1: u8 {
        const MORE = 0x01;
        const ACTIVE = 0x02;
        const WALL = 0x04;
        const LIQUID = 0x18;
        const WIDE_ID = 0x20;
        const RUN_BYTE = 0x40;
        const RUN_WORD = 0x80;
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct Header2: u8 {
        const MORE = 0x01;
        const RED = 0x02;
        const GREEN = 0x04;
        const BLUE = 0x08;
        const SHAPE = 0x70;
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct Header3: u8 {
        const ACTUATOR = 0x02;
        const INACTIVE = 0x04;
        const BLOCK_PAINT = 0x08;
        const WALL_PAINT = 0x10;
        const YELLOW = 0x20;
    }
}

/// A decoded tile plus the number of following cells that repeat it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileRun {
    /// The stored tile
    pub tile: Tile,
    /// How many further cells are copies of `tile`
    pub repeat: u16,
}

impl TileRun {
    /// Number of grid cells this run covers.
    pub fn cells(&self) -> usize {
        usize::from(self.repeat) + 1
    }
}

/// Tile section encoder and decoder for one grid shape.
///
/// # Examples
///
/// ```
/// use terraria_wld::{BinaryStream, FramedTiles, Tile, TileCodec};
///
/// let framed = FramedTiles::default();
/// let codec = TileCodec::new(2, 2, &framed);
///
/// let mut stream = BinaryStream::new();
/// codec.encode(&mut stream, &[Tile::AIR; 4]).unwrap();
/// assert_eq!(stream.as_bytes(), &[0x40, 0x03]);
///
/// stream.seek(0).unwrap();
/// assert_eq!(codec.decode(&mut stream).unwrap(), vec![Tile::AIR; 4]);
/// ```
#[derive(Debug, Clone)]
pub struct TileCodec<'a> {
    width: u32,
    height: u32,
    framed: &'a FramedTiles,
    max_run: u16,
}

impl<'a> TileCodec<'a> {
    /// Codec for a `width` x `height` grid using `framed` to decide which
    /// blocks carry frame coordinates.
    pub fn new(width: u32, height: u32, framed: &'a FramedTiles) -> Self {
        Self {
            width,
            height,
            framed,
            max_run: MAX_RUN_LENGTH,
        }
    }

    /// Cap the repeat count the encoder emits. Values below 1 are raised to 1.
    pub fn with_max_run(mut self, max_run: u16) -> Self {
        self.max_run = max_run.max(1);
        self
    }

    /// Number of cells in the grid.
    pub fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Decode a full grid, in column-major order, from `stream`.
    pub fn decode(&self, stream: &mut BinaryStream) -> Result<Vec<Tile>> {
        let total = self.cell_count();
        let start = stream.position();
        // Every stored run takes at least one byte and covers at most 65536 cells.
        if total > stream.remaining().saturating_mul(usize::from(u16::MAX) + 1) {
            return Err(Error::corrupt_tile(
                0,
                format!(
                    "{total} cell grid cannot fit in the {} remaining bytes",
                    stream.remaining()
                ),
            ));
        }
        let mut tiles = Vec::with_capacity(total);
        let mut runs = 0usize;

        while tiles.len() < total {
            let index = tiles.len();
            let run = self.read_run(stream, index)?;
            if index + run.cells() > total {
                return Err(Error::corrupt_tile(
                    index,
                    format!(
                        "run of {} cells overruns the {} cell grid",
                        run.cells(),
                        total
                    ),
                ));
            }
            tiles.extend(std::iter::repeat_n(run.tile, run.cells()));
            runs += 1;
        }

        debug!(
            "decoded {} tiles from {} runs ({} bytes)",
            total,
            runs,
            stream.position() - start
        );
        Ok(tiles)
    }

    /// Read one stored tile and its repeat count.
    ///
    /// `index` is the column-major grid index the tile lands on; it is
    /// only used to locate errors.
    pub fn read_run(&self, stream: &mut BinaryStream, index: usize) -> Result<TileRun> {
        let first = stream.read_u8()?;
        let h1 = Header1::from_bits_retain(first);
        let h2 = if h1.contains(Header1::MORE) {
            let byte = stream.read_u8()?;
            Header2::from_bits(byte).ok_or_else(|| {
                Error::corrupt_tile(index, format!("unknown bits in header 2 ({byte:#04x})"))
            })?
        } else {
            Header2::empty()
        };
        let h3 = if h2.contains(Header2::MORE) {
            let byte = stream.read_u8()?;
            Header3::from_bits(byte).ok_or_else(|| {
                Error::corrupt_tile(index, format!("unknown bits in header 3 ({byte:#04x})"))
            })?
        } else {
            Header3::empty()
        };

        let shape_bits = (h2.bits() & Header2::SHAPE.bits()) >> 4;
        let block = if h1.contains(Header1::ACTIVE) {
            let id = if h1.contains(Header1::WIDE_ID) {
                stream.read_u16()?
            } else {
                u16::from(stream.read_u8()?)
            };
            let frame = if self.framed.contains(id) {
                let u = stream.read_u16()?;
                let v = stream.read_u16()?;
                Some(Frame::new(u, v))
            } else {
                None
            };
            let paint = if h3.contains(Header3::BLOCK_PAINT) {
                stream.read_u8()?
            } else {
                0
            };
            let shape = BrickShape::from_bits(shape_bits).ok_or_else(|| {
                Error::corrupt_tile(index, format!("unknown brick shape {shape_bits}"))
            })?;
            Some(Block {
                id,
                frame,
                paint,
                shape,
                inactive: h3.contains(Header3::INACTIVE),
            })
        } else {
            let orphan = if h1.contains(Header1::WIDE_ID) {
                Some("16-bit block id flag")
            } else if h3.contains(Header3::BLOCK_PAINT) {
                Some("block paint")
            } else if h3.contains(Header3::INACTIVE) {
                Some("inactive flag")
            } else if shape_bits != 0 {
                Some("brick shape")
            } else {
                None
            };
            if let Some(what) = orphan {
                return Err(Error::corrupt_tile(index, format!("{what} without a block")));
            }
            None
        };

        let wall = if h1.contains(Header1::WALL) {
            let id = stream.read_u8()?;
            let paint = if h3.contains(Header3::WALL_PAINT) {
                stream.read_u8()?
            } else {
                0
            };
            Some(Wall { id, paint })
        } else if h3.contains(Header3::WALL_PAINT) {
            return Err(Error::corrupt_tile(index, "wall paint without a wall"));
        } else {
            None
        };

        let liquid_bits = (h1.bits() & Header1::LIQUID.bits()) >> 3;
        let liquid = match LiquidKind::from_bits(liquid_bits) {
            Some(kind) => Some(Liquid::new(kind, stream.read_u8()?)),
            None => None,
        };

        let mut wiring = Wiring::empty();
        wiring.set(Wiring::RED, h2.contains(Header2::RED));
        wiring.set(Wiring::GREEN, h2.contains(Header2::GREEN));
        wiring.set(Wiring::BLUE, h2.contains(Header2::BLUE));
        wiring.set(Wiring::YELLOW, h3.contains(Header3::YELLOW));
        wiring.set(Wiring::ACTUATOR, h3.contains(Header3::ACTUATOR));

        let repeat = match first >> 6 {
            0 => 0,
            1 => u16::from(stream.read_u8()?),
            2 => stream.read_u16()?,
            _ => return Err(Error::corrupt_tile(index, "both run-length mode bits set")),
        };

        let tile = Tile {
            block,
            wall,
            liquid,
            wiring,
        };
        trace!("tile {index}: {tile:?} x{}", usize::from(repeat) + 1);
        Ok(TileRun { tile, repeat })
    }

    /// Encode `tiles` (column-major, exactly one grid) into `stream`.
    pub fn encode(&self, stream: &mut BinaryStream, tiles: &[Tile]) -> Result<()> {
        if tiles.len() != self.cell_count() {
            return Err(Error::invalid_record(format!(
                "tile grid holds {} cells, expected {}x{}",
                tiles.len(),
                self.width,
                self.height
            )));
        }

        let start = stream.position();
        let mut index = 0;
        let mut runs = 0usize;
        while index < tiles.len() {
            let tile = &tiles[index];
            let repeat = tiles[index + 1..]
                .iter()
                .take(usize::from(self.max_run))
                .take_while(|next| *next == tile)
                .count();
            self.write_run(
                stream,
                &TileRun {
                    tile: *tile,
                    repeat: repeat as u16,
                },
                index,
            )?;
            index += repeat + 1;
            runs += 1;
        }

        debug!(
            "encoded {} tiles as {} runs ({} bytes)",
            tiles.len(),
            runs,
            stream.position() - start
        );
        Ok(())
    }

    /// Write one stored tile and its repeat count.
    pub fn write_run(&self, stream: &mut BinaryStream, run: &TileRun, index: usize) -> Result<()> {
        let tile = &run.tile;
        let mut h1 = Header1::empty();
        let mut h2 = Header2::empty();
        let mut h3 = Header3::empty();

        if let Some(block) = tile.block {
            self.check_frame(&block, index)?;
            h1 |= Header1::ACTIVE;
            if block.id > u16::from(u8::MAX) {
                h1 |= Header1::WIDE_ID;
            }
            if block.paint != 0 {
                h3 |= Header3::BLOCK_PAINT;
            }
            if block.inactive {
                h3 |= Header3::INACTIVE;
            }
            h2 |= Header2::from_bits_retain(block.shape.bits() << 4);
        }
        if let Some(wall) = tile.wall {
            h1 |= Header1::WALL;
            if wall.paint != 0 {
                h3 |= Header3::WALL_PAINT;
            }
        }
        if let Some(liquid) = tile.liquid {
            h1 |= Header1::from_bits_retain(liquid.kind.bits() << 3);
        }
        h2.set(Header2::RED, tile.wiring.contains(Wiring::RED));
        h2.set(Header2::GREEN, tile.wiring.contains(Wiring::GREEN));
        h2.set(Header2::BLUE, tile.wiring.contains(Wiring::BLUE));
        h3.set(Header3::YELLOW, tile.wiring.contains(Wiring::YELLOW));
        h3.set(Header3::ACTUATOR, tile.wiring.contains(Wiring::ACTUATOR));

        match run.repeat {
            0 => {}
            1..=255 => h1 |= Header1::RUN_BYTE,
            _ => h1 |= Header1::RUN_WORD,
        }
        if !h3.is_empty() {
            h2 |= Header2::MORE;
        }
        if !h2.is_empty() {
            h1 |= Header1::MORE;
        }

        stream.write_u8(h1.bits())?;
        if h1.contains(Header1::MORE) {
            stream.write_u8(h2.bits())?;
        }
        if h2.contains(Header2::MORE) {
            stream.write_u8(h3.bits())?;
        }

        if let Some(block) = tile.block {
            if h1.contains(Header1::WIDE_ID) {
                stream.write_u16(block.id)?;
            } else {
                stream.write_u8(block.id as u8)?;
            }
            if let Some(frame) = block.frame {
                stream.write_u16(frame.u)?;
                stream.write_u16(frame.v)?;
            }
            if block.paint != 0 {
                stream.write_u8(block.paint)?;
            }
        }
        if let Some(wall) = tile.wall {
            stream.write_u8(wall.id)?;
            if wall.paint != 0 {
                stream.write_u8(wall.paint)?;
            }
        }
        if let Some(liquid) = tile.liquid {
            stream.write_u8(liquid.amount)?;
        }
        match run.repeat {
            0 => {}
            1..=255 => stream.write_u8(run.repeat as u8)?,
            _ => stream.write_u16(run.repeat)?,
        }
        Ok(())
    }

    fn check_frame(&self, block: &Block, index: usize) -> Result<()> {
        let framed = self.framed.contains(block.id);
        if framed == block.frame.is_some() {
            return Ok(());
        }
        let (x, y) = self.coordinates(index);
        let reason = if framed {
            format!("block {} is framed but has no frame coordinates", block.id)
        } else {
            format!("block {} is not framed but has frame coordinates", block.id)
        };
        Err(Error::invalid_tile(x, y, reason))
    }

    fn coordinates(&self, index: usize) -> (u32, u32) {
        let height = self.height.max(1) as usize;
        ((index / height) as u32, (index % height) as u32)
    }
}
