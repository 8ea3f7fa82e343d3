//! Wall IDs.

/// Wall names indexed by ID; ID 0 means no wall.
pub const WALL_NAMES: &[&str] = &[
    "None", "Stone", "DirtUnsafe", "EbonstoneUnsafe", "Wood", "GrayBrick", "RedBrick",
    "BlueDungeonUnsafe", "GreenDungeonUnsafe", "PinkDungeonUnsafe", "GoldBrick", "SilverBrick",
    "CopperBrick", "HellstoneBrickUnsafe", "ObsidianBrickUnsafe", "MudUnsafe", "Dirt",
    "BlueDungeon", "GreenDungeon", "PinkDungeon", "ObsidianBrick", "Glass", "PearlstoneBrick",
    "IridescentBrick", "MudstoneBrick", "CobaltBrick", "MythrilBrick", "Planked",
    "PearlstoneBrickUnsafe", "CandyCane", "GreenCandyCane", "SnowBrick", "AdamantiteBeam",
    "DemoniteBrick", "SandstoneBrick", "EbonstoneBrick", "RedStucco", "YellowStucco",
    "GreenStucco", "Gray", "SnowWallUnsafe", "Ebonwood", "RichMaogany", "Pearlwood",
    "RainbowBrick", "TinBrick", "TungstenBrick", "PlatinumBrick", "AmethystUnsafe", "TopazUnsafe",
    "SapphireUnsafe", "EmeraldUnsafe", "RubyUnsafe", "DiamondUnsafe", "CaveUnsafe",
    "Cave2Unsafe", "Cave3Unsafe", "Cave4Unsafe", "Cave5Unsafe", "Cave6Unsafe", "LivingLeaf",
    "Cave7Unsafe", "SpiderUnsafe", "GrassUnsafe", "JungleUnsafe", "FlowerUnsafe", "Grass",
    "Jungle", "Flower", "CorruptGrassUnsafe", "HallowedGrassUnsafe", "IceUnsafe", "Cactus",
    "Cloud", "Mushroom", "Bone", "Slime", "Flesh", "LivingWood", "ObsidianBackUnsafe",
    "MushroomUnsafe", "CrimsonGrassUnsafe", "DiscWall", "CrimstoneUnsafe", "IceBrick",
    "Shadewood", "HiveUnsafe", "LihzahrdBrickUnsafe", "PurpleStainedGlass", "YellowStainedGlass",
    "BlueStainedGlass", "GreenStainedGlass", "RedStainedGlass", "RainbowStainedGlass",
];

/// Name of wall `id`.
pub fn wall_name(id: u8) -> Option<&'static str> {
    WALL_NAMES.get(usize::from(id)).copied()
}

/// Wall ID for `name`, ignoring case, spaces and underscores.
pub fn wall_id(name: &str) -> Option<u8> {
    let wanted = crate::normalize(name);
    WALL_NAMES
        .iter()
        .position(|candidate| crate::normalize(candidate) == wanted)
        .map(|id| id as u8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_wall_lookup() {
        assert_eq!(wall_name(27), Some("Planked"));
        assert_eq!(wall_id("lihzahrd brick unsafe"), Some(87));
        assert_eq!(wall_name(250), None);
    }
}
