//! Block (tile) IDs.

/// Number of block IDs known to format version 147.
pub const TILE_COUNT: u16 = 314;

/// Block names indexed by ID.
pub const TILE_NAMES: [&str; TILE_COUNT as usize] = [
    "Dirt", "Stone", "Grass", "Plants", "Torches", "Trees", "Iron", "Copper", "Gold", "Silver",
    "ClosedDoor", "OpenDoor", "Heart", "Bottles", "Tables", "Chairs", "Anvils", "Furnaces",
    "WorkBenches", "Platforms", "Saplings", "Containers", "Demonite", "CorruptGrass",
    "CorruptPlants", "Ebonstone", "DemonAltar", "Sunflower", "Pots", "PiggyBank", "WoodBlock",
    "ShadowOrbs", "CorruptThorns", "Candles", "Chandeliers", "Jackolanterns", "Presents",
    "Meteorite", "GrayBrick", "RedBrick", "ClayBlock", "BlueDungeonBrick", "HangingLanterns",
    "GreenDungeonBrick", "PinkDungeonBrick", "GoldBrick", "SilverBrick", "CopperBrick", "Spikes",
    "WaterCandle", "Books", "Cobweb", "Vines", "Sand", "Glass", "Signs", "Obsidian", "Ash",
    "Hellstone", "Mud", "JungleGrass", "JunglePlants", "JungleVines", "Sapphire", "Ruby",
    "Emerald", "Topaz", "Amethyst", "Diamond", "JungleThorns", "MushroomGrass", "MushroomPlants",
    "MushroomTrees", "Plants2", "JunglePlants2", "ObsidianBrick", "HellstoneBrick", "Hellforge",
    "ClayPot", "Beds", "Cactus", "Coral", "ImmatureHerbs", "MatureHerbs", "BloomingHerbs",
    "Tombstones", "Loom", "Pianos", "Dressers", "Benches", "Bathtubs", "Banners", "Lampposts",
    "Lamps", "Kegs", "ChineseLanterns", "CookingPots", "Safes", "SkullLanterns", "TrashCan",
    "Candelabras", "Bookcases", "Thrones", "Bowls", "GrandfatherClocks", "Statues", "Sawmill",
    "Cobalt", "Mythril", "HallowedGrass", "HallowedPlants", "Adamantite", "Ebonsand",
    "HallowedPlants2", "TinkerersWorkbench", "HallowedVines", "Pearlsand", "Pearlstone",
    "PearlstoneBrick", "IridescentBrick", "Mudstone", "CobaltBrick", "MythrilBrick", "Silt",
    "WoodenBeam", "CrystalBall", "DiscoBall", "MagicalIceBlock", "Mannequin", "Crystals",
    "ActiveStoneBlock", "InactiveStoneBlock", "Lever", "AdamantiteForge", "MythrilAnvil",
    "PressurePlates", "Switches", "Traps", "Boulder", "MusicBoxes", "DemoniteBrick", "Explosives",
    "InletPump", "OutletPump", "Timers", "CandyCaneBlock", "GreenCandyCaneBlock", "SnowBlock",
    "SnowBrick", "HolidayLights", "AdamantiteBeam", "SandstoneBrick", "EbonstoneBrick",
    "RedStucco", "YellowStucco", "GreenStucco", "GrayStucco", "Ebonwood", "RichMahogany",
    "Pearlwood", "RainbowBrick", "IceBlock", "BreakableIce", "CorruptIce", "HallowedIce",
    "Stalactite", "Tin", "Lead", "Tungsten", "Platinum", "PineTree", "ChristmasTree", "Sinks",
    "PlatinumCandelabra", "PlatinumCandle", "TinBrick", "TungstenBrick", "PlatinumBrick",
    "ExposedGems", "GreenMoss", "BrownMoss", "RedMoss", "BlueMoss", "PurpleMoss", "LongMoss",
    "SmallPiles", "LargePiles", "LargePiles2", "CactusBlock", "Cloud", "MushroomBlock",
    "LivingWood", "LeafBlock", "SlimeBlock", "BoneBlock", "FleshBlock", "RainCloud",
    "FrozenSlimeBlock", "Asphalt", "FleshGrass", "FleshIce", "FleshWeeds", "Sunplate",
    "Crimstone", "Crimtane", "CrimsonVines", "IceBrick", "WaterFountain", "Shadewood", "Cannon",
    "LandMine", "Chlorophyte", "SnowballLauncher", "Rope", "Chain", "Campfire", "Firework",
    "Blendomatic", "MeatGrinder", "Extractinator", "Solidifier", "Palladium", "Orichalcum",
    "Titanium", "Slush", "Hive", "LihzahrdBrick", "DyePlants", "DyeVat", "HoneyBlock",
    "CrispyHoneyBlock", "Larva", "WoodenSpikes", "PlantDetritus", "Crimsand", "Teleporter",
    "LifeFruit", "LihzahrdAltar", "PlanteraBulb", "MetalBars", "Painting3X3", "Painting4X3",
    "Painting6X4", "ImbuingStation", "BubbleMachine", "Painting2X3", "Painting3X2", "Autohammer",
    "PalladiumColumn", "BubblegumBlock", "Titanstone", "PumpkinBlock", "HayBlock", "SpookyWood",
    "Pumpkins", "AmethystGemsparkOff", "TopazGemsparkOff", "SapphireGemsparkOff",
    "EmeraldGemsparkOff", "RubyGemsparkOff", "DiamondGemsparkOff", "AmberGemsparkOff",
    "AmethystGemspark", "TopazGemspark", "SapphireGemspark", "EmeraldGemspark", "RubyGemspark",
    "DiamondGemspark", "AmberGemspark", "Womannequin", "FireflyinaBottle",
    "LightningBuginaBottle", "Cog", "StoneSlab", "SandStoneSlab", "BunnyCage", "SquirrelCage",
    "MallardDuckCage", "DuckCage", "BirdCage", "BlueJay", "CardinalCage", "FishBowl",
    "HeavyWorkBench", "CopperPlating", "SnailCage", "GlowingSnailCage", "AmmoBox",
    "MonarchButterflyJar", "PurpleEmperorButterflyJar", "RedAdmiralButterflyJar",
    "UlyssesButterflyJar", "SulphurButterflyJar", "TreeNymphButterflyJar",
    "ZebraSwallowtailButterflyJar", "JuliaButterflyJar", "ScorpionCage", "BlackScorpionCage",
    "FrogCage", "MouseCage", "BoneWelder", "FleshCloningVat", "GlassKiln", "LihzahrdFurnace",
    "LivingLoom", "SkyMill", "IceMachine", "SteampunkBoiler", "HoneyDispenser", "PenguinCage",
    "WormCage", "DynastyWood", "RedDynastyShingles", "BlueDynastyShingles",
];

/// Block IDs whose cells store frame coordinates.
pub const FRAMED_TILES: &[u16] = &[
    3, 4, 5, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 24, 26, 27, 28, 29, 31, 33, 34, 35,
    36, 42, 49, 50, 55, 61, 71, 72, 73, 74, 77, 78, 79, 81, 82, 83, 84, 85, 86, 87, 88, 89, 90,
    91, 92, 93, 94, 95, 96, 97, 98, 99, 100, 101, 102, 103, 104, 105, 106, 110, 113, 114, 125,
    126, 128, 129, 132, 133, 134, 135, 136, 137, 138, 139, 141, 142, 143, 144, 149, 165, 171,
    172, 173, 174, 178, 184, 185, 186, 187, 201, 207, 209, 210, 212, 215, 216, 217, 218, 219,
    220, 227, 228, 231, 233, 235, 236, 237, 238, 239, 240, 241, 242, 243, 244, 245, 246, 247,
    254, 269, 270, 271, 275, 276, 277, 278, 279, 280, 281, 282, 283, 285, 286, 287, 288, 289,
    290, 291, 292, 293, 294, 295, 296, 297, 298, 299, 300, 301, 302, 303, 304, 305, 306, 307,
    308, 309, 310,
];

/// Gem ore blocks plus exposed gems.
pub const GEM_TILES: &[u16] = &[63, 64, 65, 66, 67, 68, 178];

/// Name of block `id`.
pub fn tile_name(id: u16) -> Option<&'static str> {
    TILE_NAMES.get(usize::from(id)).copied()
}

/// Block ID for `name`, ignoring case, spaces and underscores.
pub fn tile_id(name: &str) -> Option<u16> {
    let wanted = crate::normalize(name);
    TILE_NAMES
        .iter()
        .position(|candidate| crate::normalize(candidate) == wanted)
        .map(|id| id as u16)
}

/// Whether block `id` stores frame coordinates.
pub fn is_framed(id: u16) -> bool {
    FRAMED_TILES.binary_search(&id).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    #[test_case("Dirt", 0)]
    #[test_case("containers", 21)]
    #[test_case("Exposed Gems", 178)]
    #[test_case("blue_dynasty_shingles", 313)]
    fn test_tile_id(name: &str, id: u16) {
        assert_eq!(tile_id(name), Some(id));
    }

    #[test]
    fn test_unknown_names_and_ids() {
        assert_eq!(tile_id("Adamantium"), None);
        assert_eq!(tile_name(TILE_COUNT), None);
    }

    #[test]
    fn test_framed_table_is_sorted_and_in_range() {
        assert!(FRAMED_TILES.windows(2).all(|pair| pair[0] < pair[1]));
        assert!(FRAMED_TILES.iter().all(|&id| id < TILE_COUNT));
        assert!(is_framed(21));
        assert!(!is_framed(1));
    }
}
