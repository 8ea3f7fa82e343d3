//! Item and prefix IDs.
//!
//! The item table only covers the first, most common items; callers fall
//! back to the numeric ID for the rest.

/// Item names for IDs `1..`, indexed by `id - 1`.
pub const ITEM_NAMES: &[&str] = &[
    "Iron Pickaxe", "Dirt Block", "Stone Block", "Iron Broadsword", "Mushroom",
    "Iron Shortsword", "Iron Hammer", "Torch", "Wood", "Iron Axe", "Iron Ore", "Copper Ore",
    "Gold Ore", "Silver Ore", "Copper Watch", "Silver Watch", "Gold Watch", "Depth Meter",
    "Gold Bar", "Copper Bar", "Silver Bar", "Iron Bar", "Gel", "Wooden Sword", "Wooden Door",
    "Stone Wall", "Acorn", "Lesser Healing Potion", "Life Crystal", "Dirt Wall", "Bottle",
    "Wooden Table", "Furnace", "Wooden Chair", "Iron Anvil", "Work Bench", "Goggles", "Lens",
    "Wooden Bow", "Wooden Arrow", "Flaming Arrow", "Shuriken", "Suspicious Looking Eye",
    "Demon Bow", "War Axe of the Night", "Light's Bane", "Unholy Arrow", "Chest",
    "Band of Regeneration", "Magic Mirror", "Jester's Arrow", "Angel Statue", "Cloud in a Bottle",
    "Hermes Boots", "Enchanted Boomerang", "Demonite Ore", "Demonite Bar", "Heart",
    "Corrupt Seeds", "Vile Mushroom", "Ebonstone Block", "Grass Seeds", "Sunflower", "Vilethorn",
    "Starfury", "Purification Powder", "Vile Powder", "Rotten Chunk", "Worm Tooth", "Worm Food",
    "Copper Coin", "Silver Coin", "Gold Coin", "Platinum Coin", "Fallen Star",
];

/// Prefix names for IDs `1..`, indexed by `id - 1`.
pub const PREFIX_NAMES: &[&str] = &[
    "Large", "Massive", "Dangerous", "Savage", "Sharp", "Pointy", "Tiny", "Terrible", "Small",
    "Dull", "Unhappy", "Bulky", "Shameful", "Heavy", "Light", "Sighted", "Rapid", "Hasty",
    "Intimidating", "Deadly", "Staunch", "Awful", "Lethargic", "Awkward", "Powerful", "Mystic",
    "Adept", "Masterful", "Inept", "Ignorant", "Deranged", "Intense", "Taboo", "Celestial",
    "Furious", "Keen", "Superior", "Forceful", "Broken", "Damaged", "Shoddy", "Quick", "Deadly",
    "Agile", "Nimble", "Murderous", "Slow", "Sluggish", "Lazy", "Annoying", "Nasty", "Manic",
    "Hurtful", "Strong", "Unpleasant", "Weak", "Ruthless", "Frenzying", "Godly", "Demonic",
    "Zealous", "Hard", "Guarding", "Armored", "Warding", "Arcane", "Precise", "Lucky", "Jagged",
    "Spiked", "Angry", "Menacing", "Brisk", "Fleeting", "Hasty", "Quick", "Wild", "Rash",
    "Intrepid", "Violent", "Legendary", "Unreal", "Mythical",
];

/// Name of item `id`, if it is in the table.
pub fn item_name(id: i32) -> Option<&'static str> {
    let index = usize::try_from(id).ok()?.checked_sub(1)?;
    ITEM_NAMES.get(index).copied()
}

/// Name of prefix `id`; prefix 0 means none.
pub fn prefix_name(id: u8) -> Option<&'static str> {
    PREFIX_NAMES.get(usize::from(id).checked_sub(1)?).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    #[test_case(1, Some("Iron Pickaxe"))]
    #[test_case(73, Some("Gold Coin"))]
    #[test_case(0, None)]
    #[test_case(-4, None)]
    #[test_case(3507, None)]
    fn test_item_name(id: i32, expected: Option<&str>) {
        assert_eq!(item_name(id), expected);
    }

    #[test]
    fn test_prefix_name() {
        assert_eq!(prefix_name(0), None);
        assert_eq!(prefix_name(81), Some("Legendary"));
        assert_eq!(prefix_name(83), Some("Mythical"));
        assert_eq!(prefix_name(84), None);
    }
}
