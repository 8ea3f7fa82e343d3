//! Tile grid cell types.

use bitflags::bitflags;

/// Pixel size of one tile inside a sprite sheet; frame coordinates step by this.
pub const FRAME_STEP: u16 = 18;

bitflags! {
    /// Wires and actuator placed on a tile.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Wiring: u8 {
        /// Red wire
        const RED      = 0x01;
        /// Green wire
        const GREEN    = 0x02;
        /// Blue wire
        const BLUE     = 0x04;
        /// Yellow wire
        const YELLOW   = 0x08;
        /// Actuator
        const ACTUATOR = 0x10;
    }
}

/// Shape of a solid block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BrickShape {
    /// Full block
    #[default]
    Full,
    /// Half-height block
    HalfBrick,
    /// Slope descending to the left
    SlopeDownLeft,
    /// Slope descending to the right
    SlopeDownRight,
    /// Slope rising to the left
    SlopeUpLeft,
    /// Slope rising to the right
    SlopeUpRight,
}

impl BrickShape {
    /// Decode the 3-bit brick style field.
    pub fn from_bits(bits: u8) -> Option<Self> {
        match bits {
            0 => Some(Self::Full),
            1 => Some(Self::HalfBrick),
            2 => Some(Self::SlopeDownLeft),
            3 => Some(Self::SlopeDownRight),
            4 => Some(Self::SlopeUpLeft),
            5 => Some(Self::SlopeUpRight),
            _ => None,
        }
    }

    /// Encode as the 3-bit brick style field.
    pub fn bits(self) -> u8 {
        match self {
            Self::Full => 0,
            Self::HalfBrick => 1,
            Self::SlopeDownLeft => 2,
            Self::SlopeDownRight => 3,
            Self::SlopeUpLeft => 4,
            Self::SlopeUpRight => 5,
        }
    }
}

/// Liquid type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LiquidKind {
    /// Water
    Water,
    /// Lava
    Lava,
    /// Honey
    Honey,
}

impl LiquidKind {
    /// Decode the 2-bit liquid field; `0` means no liquid.
    pub fn from_bits(bits: u8) -> Option<Self> {
        match bits {
            1 => Some(Self::Water),
            2 => Some(Self::Lava),
            3 => Some(Self::Honey),
            _ => None,
        }
    }

    /// Encode as the 2-bit liquid field.
    pub fn bits(self) -> u8 {
        match self {
            Self::Water => 1,
            Self::Lava => 2,
            Self::Honey => 3,
        }
    }
}

/// Position of a cell inside its object's sprite, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Frame {
    /// Horizontal offset
    pub u: u16,
    /// Vertical offset
    pub v: u16,
}

impl Frame {
    /// Create a frame.
    pub const fn new(u: u16, v: u16) -> Self {
        Self { u, v }
    }
}

/// A foreground block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Block {
    /// Block ID
    pub id: u16,
    /// Frame coordinates; present iff the ID is framed
    pub frame: Option<Frame>,
    /// Paint color, `0` for none
    pub paint: u8,
    /// Brick shape
    pub shape: BrickShape,
    /// Switched off by an actuator
    pub inactive: bool,
}

impl Block {
    /// An unpainted full block without frame coordinates.
    pub const fn new(id: u16) -> Self {
        Self {
            id,
            frame: None,
            paint: 0,
            shape: BrickShape::Full,
            inactive: false,
        }
    }

    /// A block that is one cell of a framed object.
    pub const fn framed(id: u16, u: u16, v: u16) -> Self {
        Self {
            frame: Some(Frame::new(u, v)),
            ..Self::new(id)
        }
    }

    /// Same block with a paint color.
    pub const fn painted(mut self, paint: u8) -> Self {
        self.paint = paint;
        self
    }

    /// Same block with a brick shape.
    pub const fn shaped(mut self, shape: BrickShape) -> Self {
        self.shape = shape;
        self
    }
}

/// A background wall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Wall {
    /// Wall ID
    pub id: u8,
    /// Paint color, `0` for none
    pub paint: u8,
}

impl Wall {
    /// An unpainted wall.
    pub const fn new(id: u8) -> Self {
        Self { id, paint: 0 }
    }
}

/// Liquid filling a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Liquid {
    /// Liquid type
    pub kind: LiquidKind,
    /// Fill level, 255 is a full cell
    pub amount: u8,
}

impl Liquid {
    /// Create a liquid.
    pub const fn new(kind: LiquidKind, amount: u8) -> Self {
        Self { kind, amount }
    }
}

/// One grid cell.
///
/// Equality compares every attribute, frame coordinates included.
///
/// # Examples
///
/// ```
/// use terraria_wld::{Block, LiquidKind, Liquid, Tile, Wall, Wiring};
///
/// let tile = Tile::default()
///     .with_block(Block::new(1))
///     .with_wall(Wall::new(2))
///     .with_wiring(Wiring::RED);
/// assert!(!tile.is_empty());
/// assert_eq!(tile.block.map(|b| b.id), Some(1));
///
/// let pool = Tile::default().with_liquid(Liquid::new(LiquidKind::Water, 255));
/// assert_ne!(tile, pool);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Tile {
    /// Foreground block
    pub block: Option<Block>,
    /// Background wall
    pub wall: Option<Wall>,
    /// Liquid
    pub liquid: Option<Liquid>,
    /// Wires and actuator
    pub wiring: Wiring,
}

impl Tile {
    /// An empty cell: no block, wall, liquid or wiring.
    pub const AIR: Self = Self {
        block: None,
        wall: None,
        liquid: None,
        wiring: Wiring::empty(),
    };

    /// Same tile with `block`.
    pub const fn with_block(mut self, block: Block) -> Self {
        self.block = Some(block);
        self
    }

    /// Same tile with `wall`.
    pub const fn with_wall(mut self, wall: Wall) -> Self {
        self.wall = Some(wall);
        self
    }

    /// Same tile with `liquid`.
    pub const fn with_liquid(mut self, liquid: Liquid) -> Self {
        self.liquid = Some(liquid);
        self
    }

    /// Same tile with `wiring` added.
    pub const fn with_wiring(mut self, wiring: Wiring) -> Self {
        self.wiring = self.wiring.union(wiring);
        self
    }

    /// Whether the cell holds nothing at all.
    pub fn is_empty(&self) -> bool {
        *self == Self::AIR
    }

    /// Block ID, if a block is present.
    pub fn block_id(&self) -> Option<u16> {
        self.block.map(|block| block.id)
    }

    /// Wall ID, if a wall is present.
    pub fn wall_id(&self) -> Option<u8> {
        self.wall.map(|wall| wall.id)
    }

    /// 64-bit summary of the cell.
    ///
    /// From the high end: block ID (16 bits), frame u (16), frame v (16),
    /// wall (8), then a flag byte with active, red, green, blue, liquid,
    /// shaped, actuator and inactive from bit 7 down to bit 0. Missing
    /// frame coordinates pack as `0xFFFF`.
    pub fn packed(&self) -> u64 {
        let (id, u, v) = match self.block {
            Some(Block {
                id,
                frame: Some(frame),
                ..
            }) => (id, frame.u, frame.v),
            Some(block) => (block.id, u16::MAX, u16::MAX),
            None => (0, u16::MAX, u16::MAX),
        };
        let wall = self.wall.map_or(0, |wall| wall.id);

        let mut flags = 0u8;
        if let Some(block) = self.block {
            flags |= 0x80;
            if block.shape != BrickShape::Full {
                flags |= 0x04;
            }
            if block.inactive {
                flags |= 0x01;
            }
        }
        if self.wiring.contains(Wiring::RED) {
            flags |= 0x40;
        }
        if self.wiring.contains(Wiring::GREEN) {
            flags |= 0x20;
        }
        if self.wiring.contains(Wiring::BLUE) {
            flags |= 0x10;
        }
        if self.liquid.is_some() {
            flags |= 0x08;
        }
        if self.wiring.contains(Wiring::ACTUATOR) {
            flags |= 0x02;
        }

        (u64::from(id) << 48)
            | (u64::from(u) << 32)
            | (u64::from(v) << 16)
            | (u64::from(wall) << 8)
            | u64::from(flags)
    }
}
