//! World metadata section.
//!
//! The section is the world title followed by a long list of scalar fields.
//! Newer format versions append fields or insert them in the middle, so the
//! layout is kept as a single table: each field names the version that
//! introduced it, and reading or writing walks the table in file order,
//! skipping fields the file's version does not have. Skipped fields keep
//! their default values.

use std::fmt;

use crate::error::Result;
use crate::stream::BinaryStream;
use crate::version::{COMPATIBLE_VERSION as V102, FormatVersion, VERSION_140 as V140, VERSION_147 as V147};

/// One entry of the metadata field table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldInfo {
    /// Field name as used by the game
    pub name: &'static str,
    /// First format version that stores the field
    pub since: u32,
    /// Rust type the field decodes to
    pub kind: &'static str,
}

/// A metadata value, for generic listing.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Boolean flag
    Bool(bool),
    /// Signed integer
    Int(i64),
    /// Unsigned integer
    UInt(u64),
    /// Floating point number
    Float(f64),
    /// List of names
    Names(Vec<String>),
    /// List of counters
    Counts(Vec<u32>),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(value) => write!(f, "{value}"),
            Self::Int(value) => write!(f, "{value}"),
            Self::UInt(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
            Self::Names(names) => write!(f, "[{}]", names.join(", ")),
            Self::Counts(counts) => {
                let nonzero = counts.iter().filter(|&&count| count > 0).count();
                write!(f, "{} entries, {nonzero} non-zero", counts.len())
            }
        }
    }
}

trait FieldCodec: Sized {
    fn read_field(stream: &mut BinaryStream) -> Result<Self>;
    fn write_field(&self, stream: &mut BinaryStream) -> Result<()>;
    fn to_value(&self) -> FieldValue;
}

macro_rules! scalar_codec {
    ($ty:ty, $read:ident, $write:ident, $variant:ident, $wide:ty) => {
        impl FieldCodec for $ty {
            fn read_field(stream: &mut BinaryStream) -> Result<Self> {
                stream.$read()
            }

            fn write_field(&self, stream: &mut BinaryStream) -> Result<()> {
                stream.$write(*self)
            }

            fn to_value(&self) -> FieldValue {
                FieldValue::$variant(<$wide>::from(*self))
            }
        }
    };
}

scalar_codec!(bool, read_bool, write_bool, Bool, bool);
scalar_codec!(i8, read_i8, write_i8, Int, i64);
scalar_codec!(u16, read_u16, write_u16, UInt, u64);
scalar_codec!(u32, read_u32, write_u32, UInt, u64);
scalar_codec!(u64, read_u64, write_u64, UInt, u64);
scalar_codec!(f32, read_f32, write_f32, Float, f64);
scalar_codec!(f64, read_f64, write_f64, Float, f64);

/// Angler names: `u32` count, then strings.
impl FieldCodec for Vec<String> {
    fn read_field(stream: &mut BinaryStream) -> Result<Self> {
        let count = stream.read_u32()? as usize;
        let mut names = Vec::with_capacity(count.min(stream.remaining()));
        for _ in 0..count {
            names.push(stream.read_string()?);
        }
        Ok(names)
    }

    fn write_field(&self, stream: &mut BinaryStream) -> Result<()> {
        stream.write_u32(self.len() as u32)?;
        for name in self {
            stream.write_string(name)?;
        }
        Ok(())
    }

    fn to_value(&self) -> FieldValue {
        FieldValue::Names(self.clone())
    }
}

/// Kill counters: `u16` count, then `u32` values.
impl FieldCodec for Vec<u32> {
    fn read_field(stream: &mut BinaryStream) -> Result<Self> {
        let count = usize::from(stream.read_u16()?);
        let mut counts = Vec::with_capacity(count);
        for _ in 0..count {
            counts.push(stream.read_u32()?);
        }
        Ok(counts)
    }

    fn write_field(&self, stream: &mut BinaryStream) -> Result<()> {
        stream.write_u16(self.len() as u16)?;
        for &count in self {
            stream.write_u32(count)?;
        }
        Ok(())
    }

    fn to_value(&self) -> FieldValue {
        FieldValue::Counts(self.clone())
    }
}

macro_rules! world_metadata {
    ($($field:ident: $ty:ty = $name:literal since $since:expr;)*) => {
        /// Title and version-gated scalar fields of a world.
        #[derive(Debug, Clone, PartialEq, Default)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub struct WorldMetadata {
            /// World name shown in game
            pub title: String,
            $(
                #[doc = $name]
                pub $field: $ty,
            )*
            /// Bytes between the last known field and the tile section, kept verbatim
            pub unknown: Vec<u8>,
        }

        /// The metadata field table, in file order.
        pub const METADATA_FIELDS: &[FieldInfo] = &[
            $(FieldInfo { name: $name, since: $since, kind: stringify!($ty) },)*
        ];

        impl WorldMetadata {
            /// Read the section body for `version`.
            pub(crate) fn read(stream: &mut BinaryStream, version: FormatVersion) -> Result<Self> {
                let mut metadata = Self {
                    title: stream.read_string()?,
                    ..Self::default()
                };
                $(
                    if version.includes($since) {
                        metadata.$field = <$ty as FieldCodec>::read_field(stream)?;
                    }
                )*
                Ok(metadata)
            }

            /// Write the section body for `version`.
            pub(crate) fn write(&self, stream: &mut BinaryStream, version: FormatVersion) -> Result<()> {
                stream.write_string(&self.title)?;
                $(
                    if version.includes($since) {
                        FieldCodec::write_field(&self.$field, stream)?;
                    }
                )*
                stream.write_bytes(&self.unknown)
            }

            /// Name and value of every field stored by `version`, in file order.
            pub fn fields(&self, version: FormatVersion) -> Vec<(&'static str, FieldValue)> {
                let mut fields = Vec::with_capacity(METADATA_FIELDS.len());
                $(
                    if version.includes($since) {
                        fields.push(($name, FieldCodec::to_value(&self.$field)));
                    }
                )*
                fields
            }

            /// Names of fields that `version` lacks but hold non-default values.
            pub fn fields_lost_by(&self, version: FormatVersion) -> Vec<&'static str> {
                let defaults = Self::default();
                let mut lost = Vec::new();
                $(
                    if !version.includes($since) && self.$field != defaults.$field {
                        lost.push($name);
                    }
                )*
                lost
            }
        }
    };
}

world_metadata! {
    world_id: u32 = "WorldId" since V102;
    left_world: u32 = "LeftWorld" since V102;
    right_world: u32 = "RightWorld" since V102;
    top_world: u32 = "TopWorld" since V102;
    bottom_world: u32 = "BottomWorld" since V102;
    tiles_high: u32 = "TilesHigh" since V102;
    tiles_wide: u32 = "TilesWide" since V102;
    expert_mode: bool = "ExpertMode" since V147;
    creation_time: u64 = "CreationTime" since V147;
    moon_type: i8 = "MoonType" since V102;
    tree_x0: u32 = "TreeX0" since V102;
    tree_x1: u32 = "TreeX1" since V102;
    tree_x2: u32 = "TreeX2" since V102;
    tree_style0: u32 = "TreeStyle0" since V102;
    tree_style1: u32 = "TreeStyle1" since V102;
    tree_style2: u32 = "TreeStyle2" since V102;
    tree_style3: u32 = "TreeStyle3" since V102;
    cave_back_x0: u32 = "CaveBackX0" since V102;
    cave_back_x1: u32 = "CaveBackX1" since V102;
    cave_back_x2: u32 = "CaveBackX2" since V102;
    cave_back_style0: u32 = "CaveBackStyle0" since V102;
    cave_back_style1: u32 = "CaveBackStyle1" since V102;
    cave_back_style2: u32 = "CaveBackStyle2" since V102;
    cave_back_style3: u32 = "CaveBackStyle3" since V102;
    ice_back_style: u32 = "IceBackStyle" since V102;
    jungle_back_style: u32 = "JungleBackStyle" since V102;
    hell_back_style: u32 = "HellBackStyle" since V102;
    spawn_x: u32 = "SpawnX" since V102;
    spawn_y: u32 = "SpawnY" since V102;
    ground_level: f64 = "GroundLevel" since V102;
    rock_level: f64 = "RockLevel" since V102;
    time: f64 = "Time" since V102;
    day_time: bool = "DayTime" since V102;
    moon_phase: u32 = "MoonPhase" since V102;
    blood_moon: bool = "BloodMoon" since V102;
    is_eclipse: bool = "IsEclipse" since V102;
    dungeon_x: u32 = "DungeonX" since V102;
    dungeon_y: u32 = "DungeonY" since V102;
    is_crimson: bool = "IsCrimson" since V102;
    downed_boss1: bool = "DownedBoss1" since V102;
    downed_boss2: bool = "DownedBoss2" since V102;
    downed_boss3: bool = "DownedBoss3" since V102;
    downed_queen_bee: bool = "DownedQueenBee" since V102;
    downed_mech_boss1: bool = "DownedMechBoss1" since V102;
    downed_mech_boss2: bool = "DownedMechBoss2" since V102;
    downed_mech_boss3: bool = "DownedMechBoss3" since V102;
    downed_mech_boss_any: bool = "DownedMechBossAny" since V102;
    downed_plant_boss: bool = "DownedPlantBoss" since V102;
    downed_golem_boss: bool = "DownedGolemBoss" since V102;
    downed_slime_king: bool = "DownedSlimeKingBoss" since V147;
    saved_goblin: bool = "SavedGoblin" since V102;
    saved_wizard: bool = "SavedWizard" since V102;
    saved_mech: bool = "SavedMech" since V102;
    downed_goblins: bool = "DownedGoblins" since V102;
    downed_clown: bool = "DownedClown" since V102;
    downed_frost: bool = "DownedFrost" since V102;
    downed_pirates: bool = "DownedPirates" since V102;
    shadow_orb_smashed: bool = "ShadowOrbSmashed" since V102;
    spawn_meteor: bool = "SpawnMeteor" since V102;
    shadow_orb_count: i8 = "ShadowOrbCount" since V102;
    altar_count: u32 = "AltarCount" since V102;
    hard_mode: bool = "HardMode" since V102;
    invasion_delay: u32 = "InvasionDelay" since V102;
    invasion_size: u32 = "InvasionSize" since V102;
    invasion_type: u32 = "InvasionType" since V102;
    invasion_x: f64 = "InvasionX" since V102;
    slime_rain_time: f64 = "SlimeRainTime" since V147;
    sundial_cooldown: i8 = "SundialCooldown" since V147;
    temp_raining: bool = "TempRaining" since V102;
    temp_rain_time: u32 = "TempRainTime" since V102;
    temp_max_rain: f32 = "TempMaxRain" since V102;
    ore_tier1: u32 = "OreTier1" since V102;
    ore_tier2: u32 = "OreTier2" since V102;
    ore_tier3: u32 = "OreTier3" since V102;
    bg_tree: i8 = "BGTree" since V102;
    bg_corruption: i8 = "BGCorruption" since V102;
    bg_jungle: i8 = "BGJungle" since V102;
    bg_snow: i8 = "BGSnow" since V102;
    bg_hallow: i8 = "BGHallow" since V102;
    bg_crimson: i8 = "BGCrimson" since V102;
    bg_desert: i8 = "BGDesert" since V102;
    bg_ocean: i8 = "BGOcean" since V102;
    cloud_bg_active: u32 = "CloudBGActive" since V102;
    num_clouds: u16 = "NumClouds" since V102;
    wind_speed_set: f32 = "WindSpeedSet" since V102;
    anglers: Vec<String> = "Anglers" since 95;
    saved_angler: bool = "SavedAngler" since 99;
    angler_quest: u32 = "AnglerQuest" since 101;
    saved_stylist: bool = "SavedStylist" since 104;
    saved_tax_collector: bool = "SavedTaxCollector" since V140;
    invasion_size_start: u32 = "InvasionSizeStart" since V140;
    cultist_delay: u32 = "CultistDelay" since V140;
    killed_mobs: Vec<u32> = "KilledMobs" since V140;
    fast_forward_time: bool = "FastForwardTime" since V140;
    downed_fishron: bool = "DownedFishron" since V140;
    downed_martians: bool = "DownedMartians" since V140;
    downed_lunatic_cultist: bool = "DownedLunaticCultist" since V140;
    downed_moonlord: bool = "DownedMoonlord" since V140;
    downed_halloween_king: bool = "DownedHalloweenKing" since V140;
    downed_halloween_tree: bool = "DownedHalloweenTree" since V140;
    downed_christmas_queen: bool = "DownedChristmasQueen" since V140;
    downed_santa: bool = "DownedSanta" since V140;
    downed_christmas_tree: bool = "DownedChristmasTree" since V140;
    downed_celestial_solar: bool = "DownedCelestialSolar" since V140;
    downed_celestial_vortex: bool = "DownedCelestialVortex" since V140;
    downed_celestial_nebula: bool = "DownedCelestialNebula" since V140;
    downed_celestial_stardust: bool = "DownedCelestialStardust" since V140;
    celestial_solar_active: bool = "CelestialSolarActive" since V140;
    celestial_vortex_active: bool = "CelestialVortexActive" since V140;
    celestial_nebula_active: bool = "CelestialNebulaActive" since V140;
    celestial_stardust_active: bool = "CelestialStardustActive" since V140;
    apocalypse: bool = "Apocalypse" since V140;
}

/// Which evil biome a world generated with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvilBiome {
    /// Corruption
    Corruption,
    /// Crimson
    Crimson,
}

impl fmt::Display for EvilBiome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Corruption => f.write_str("Corruption"),
            Self::Crimson => f.write_str("Crimson"),
        }
    }
}

impl WorldMetadata {
    /// Metadata for a freshly created `width` x `height` world.
    pub fn for_new_world(title: impl Into<String>, width: u32, height: u32) -> Self {
        let ground = f64::from(height) * 0.3;
        Self {
            title: title.into(),
            right_world: width.saturating_mul(16),
            bottom_world: height.saturating_mul(16),
            tiles_wide: width,
            tiles_high: height,
            spawn_x: width / 2,
            spawn_y: ground as u32,
            ground_level: ground,
            rock_level: f64::from(height) * 0.4,
            time: 13_500.0,
            day_time: true,
            ..Self::default()
        }
    }

    /// Width in tiles.
    pub fn width(&self) -> u32 {
        self.tiles_wide
    }

    /// Height in tiles.
    pub fn height(&self) -> u32 {
        self.tiles_high
    }

    /// Spawn point in tile coordinates.
    pub fn spawn(&self) -> (u32, u32) {
        (self.spawn_x, self.spawn_y)
    }

    /// The world's evil biome.
    pub fn evil(&self) -> EvilBiome {
        if self.is_crimson {
            EvilBiome::Crimson
        } else {
            EvilBiome::Corruption
        }
    }

    /// Surface and cavern layer depths, in rows.
    pub fn levels(&self) -> (f64, f64) {
        (self.ground_level, self.rock_level)
    }
}

/// Fields of the table present in `version`.
pub fn fields_for_version(version: FormatVersion) -> impl Iterator<Item = &'static FieldInfo> {
    METADATA_FIELDS
        .iter()
        .filter(move |field| version.includes(field.since))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> WorldMetadata {
        WorldMetadata {
            world_id: 1_234_567,
            expert_mode: true,
            creation_time: 0x08D2_0000_0000_0000,
            is_crimson: true,
            anglers: vec!["Angler".to_string()],
            killed_mobs: vec![0, 12, 50],
            apocalypse: true,
            ..WorldMetadata::for_new_world("Sample", 4200, 1200)
        }
    }

    #[test]
    fn test_table_order_starts_with_ids_and_bounds() {
        let names: Vec<_> = METADATA_FIELDS.iter().take(7).map(|f| f.name).collect();
        assert_eq!(
            names,
            vec![
                "WorldId",
                "LeftWorld",
                "RightWorld",
                "TopWorld",
                "BottomWorld",
                "TilesHigh",
                "TilesWide"
            ]
        );
    }

    #[test]
    fn test_newer_versions_only_add_fields() {
        let old = fields_for_version(FormatVersion(102)).count();
        let mid = fields_for_version(FormatVersion(140)).count();
        let new = fields_for_version(FormatVersion(147)).count();
        assert!(old < mid && mid < new);
        assert_eq!(new, METADATA_FIELDS.len());
    }

    #[test]
    fn test_round_trip_latest() {
        let metadata = sample();
        let mut stream = BinaryStream::new();
        metadata.write(&mut stream, FormatVersion(147)).unwrap();

        stream.seek(0).unwrap();
        let decoded = WorldMetadata::read(&mut stream, FormatVersion(147)).unwrap();
        assert_eq!(decoded, metadata);
        assert_eq!(stream.remaining(), 0);
    }

    #[test]
    fn test_older_version_skips_newer_fields() {
        let metadata = sample();
        let mut latest = BinaryStream::new();
        metadata.write(&mut latest, FormatVersion(147)).unwrap();
        let mut legacy = BinaryStream::new();
        metadata.write(&mut legacy, FormatVersion(120)).unwrap();
        assert!(legacy.len() < latest.len());

        legacy.seek(0).unwrap();
        let decoded = WorldMetadata::read(&mut legacy, FormatVersion(120)).unwrap();
        assert!(!decoded.expert_mode);
        assert!(decoded.killed_mobs.is_empty());
        assert_eq!(decoded.world_id, metadata.world_id);
        assert_eq!(decoded.anglers, metadata.anglers);
    }

    #[test]
    fn test_fields_lost_by_older_version() {
        let lost = sample().fields_lost_by(FormatVersion(120));
        assert_eq!(
            lost,
            vec!["ExpertMode", "CreationTime", "KilledMobs", "Apocalypse"]
        );
        assert!(sample().fields_lost_by(FormatVersion(147)).is_empty());
    }

    #[test]
    fn test_unknown_bytes_are_written_last() {
        let mut metadata = sample();
        let mut plain = BinaryStream::new();
        metadata.write(&mut plain, FormatVersion(147)).unwrap();

        metadata.unknown = vec![0xAB, 0xCD];
        let mut extended = BinaryStream::new();
        metadata.write(&mut extended, FormatVersion(147)).unwrap();

        assert_eq!(extended.len(), plain.len() + 2);
        assert_eq!(&extended.as_bytes()[plain.len()..], &[0xAB, 0xCD]);
    }

    #[test]
    fn test_field_listing() {
        let fields = sample().fields(FormatVersion(147));
        assert_eq!(fields[0], ("WorldId", FieldValue::UInt(1_234_567)));
        let crimson = fields.iter().find(|(name, _)| *name == "IsCrimson").unwrap();
        assert_eq!(crimson.1.to_string(), "true");
        assert_eq!(sample().evil(), EvilBiome::Crimson);
    }

    #[test]
    fn test_new_world_dimensions() {
        let metadata = WorldMetadata::for_new_world("Tiny", 100, 50);
        assert_eq!((metadata.width(), metadata.height()), (100, 50));
        assert_eq!(metadata.spawn(), (50, 15));
    }
}
