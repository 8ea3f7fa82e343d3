//! ID tables for Terraria world tools.
//!
//! Block, wall, item and prefix names, the set of block IDs that store
//! frame coordinates, and default map colors. The tables match world
//! format version 147; they are data, not logic, and the world codec
//! takes the framed set from each file's header rather than from here.
//!
//! # Examples
//!
//! ```
//! use terraria_ids::{is_framed, tile_id, tile_name};
//!
//! assert_eq!(tile_name(21), Some("Containers"));
//! assert_eq!(tile_id("exposed gems"), Some(178));
//! assert!(is_framed(21));
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod colors;
pub mod items;
pub mod tiles;
pub mod walls;

pub use colors::{tile_color, wall_color};
pub use items::{item_name, prefix_name};
pub use tiles::{FRAMED_TILES, GEM_TILES, TILE_COUNT, is_framed, tile_id, tile_name};
pub use walls::{wall_id, wall_name};

/// Lowercase `name` with spaces and underscores removed.
pub(crate) fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, ' ' | '_'))
        .flat_map(char::to_lowercase)
        .collect()
}
