//! `contents`: chests, signs, NPCs and tile entities

use anyhow::Result;
use clap::Args;
use console::style;
use std::path::Path;
use terraria_wld::{Chest, ItemStack, Region, TileEntityKind, World};

use super::{item_label, load_world};

#[derive(Args)]
pub struct ContentsArgs {
    /// World file path, file name, title or id
    pub world: String,

    /// List chests and their items
    #[arg(long)]
    pub chests: bool,

    /// List signs
    #[arg(long)]
    pub signs: bool,

    /// List town NPCs and mobs
    #[arg(long)]
    pub npcs: bool,

    /// List tile entities
    #[arg(long)]
    pub entities: bool,

    /// Only show structures inside x,y,width,height
    #[arg(short, long, value_parser = parse_region)]
    pub region: Option<Region>,
}

impl ContentsArgs {
    /// No selection means everything.
    fn all(&self) -> bool {
        !(self.chests || self.signs || self.npcs || self.entities)
    }
}

pub fn execute(args: ContentsArgs, dir: Option<&Path>) -> Result<()> {
    let loaded = load_world(&args.world, dir)?;
    let world = &loaded.world;
    let region = args
        .region
        .unwrap_or_else(|| Region::new(0, 0, world.width(), world.height()));

    if args.all() || args.chests {
        print_chests(world, region);
    }
    if args.all() || args.signs {
        print_signs(world, region);
    }
    if args.all() || args.npcs {
        print_npcs(world, region);
    }
    if args.all() || args.entities {
        print_entities(world, region);
    }

    Ok(())
}

fn print_chests(world: &World, region: Region) {
    println!("{}", style("Chests").bold().cyan());
    let mut shown = 0;
    for chest in world.chests_near(region) {
        shown += 1;
        println!("{}", describe_chest(chest));
        for stack in chest.stacks() {
            println!("    {}", describe_stack(stack));
        }
    }
    println!("{shown} chest(s)");
    println!();
}

fn print_signs(world: &World, region: Region) {
    println!("{}", style("Signs").bold().cyan());
    let signs: Vec<_> = world
        .all_signs()
        .iter()
        .filter(|sign| region.contains(sign.x, sign.y))
        .collect();
    for sign in &signs {
        println!("  ({}, {}): {}", sign.x, sign.y, sign.text.replace('\n', " / "));
    }
    println!("{} sign(s)", signs.len());
    println!();
}

fn print_npcs(world: &World, region: Region) {
    println!("{}", style("NPCs").bold().cyan());
    for npc in world
        .npcs
        .iter()
        .filter(|npc| region.contains(pixel_to_tile(npc.position.0), pixel_to_tile(npc.position.1)))
    {
        let home = if npc.homeless {
            "homeless".to_string()
        } else {
            format!("home ({}, {})", npc.home.0, npc.home.1)
        };
        println!(
            "  {} the {} at ({}, {}), {home}",
            npc.display_name,
            npc.name,
            pixel_to_tile(npc.position.0),
            pixel_to_tile(npc.position.1)
        );
    }
    for mob in world
        .mobs
        .iter()
        .filter(|mob| region.contains(pixel_to_tile(mob.position.0), pixel_to_tile(mob.position.1)))
    {
        println!(
            "  {} at ({}, {})",
            mob.name,
            pixel_to_tile(mob.position.0),
            pixel_to_tile(mob.position.1)
        );
    }
    println!();
}

fn print_entities(world: &World, region: Region) {
    println!("{}", style("Tile entities").bold().cyan());
    for entity in world
        .tile_entities
        .iter()
        .filter(|entity| region.contains(i32::from(entity.x), i32::from(entity.y)))
    {
        let detail = match entity.kind {
            TileEntityKind::TargetDummy { npc } => format!("npc slot {npc}"),
            TileEntityKind::ItemFrame {
                item,
                prefix,
                stack,
            } => describe_stack(&ItemStack {
                id: i32::from(item),
                stack,
                prefix,
            }),
        };
        println!(
            "  #{} {} at ({}, {}): {detail}",
            entity.id,
            entity.kind.name(),
            entity.x,
            entity.y
        );
    }
    println!();
}

fn describe_chest(chest: &Chest) -> String {
    let name = if chest.name.is_empty() {
        String::new()
    } else {
        format!(" \"{}\"", chest.name)
    };
    let used = chest.stacks().count();
    format!(
        "  Chest at ({}, {}){name}: {used}/{} slots used",
        chest.x,
        chest.y,
        chest.items.len()
    )
}

fn describe_stack(stack: &ItemStack) -> String {
    let prefix = terraria_ids::prefix_name(stack.prefix)
        .map(|name| format!("{name} "))
        .unwrap_or_default();
    format!("{} x {prefix}{}", stack.stack, item_label(stack.id))
}

/// World pixels to tile coordinates.
fn pixel_to_tile(pixels: f32) -> i32 {
    (pixels / 16.0).floor() as i32
}

/// Parse `x,y,width,height`.
fn parse_region(value: &str) -> Result<Region, String> {
    let parts: Vec<&str> = value.split(',').map(str::trim).collect();
    let &[x, y, width, height] = parts.as_slice() else {
        return Err(format!("expected x,y,width,height, got '{value}'"));
    };
    let number = |part: &str| {
        part.parse::<i64>()
            .map_err(|_| format!("'{part}' is not a number"))
    };

    let x = i32::try_from(number(x)?).map_err(|err| err.to_string())?;
    let y = i32::try_from(number(y)?).map_err(|err| err.to_string())?;
    let width = u32::try_from(number(width)?).map_err(|err| err.to_string())?;
    let height = u32::try_from(number(height)?).map_err(|err| err.to_string())?;
    Ok(Region::new(x, y, width, height))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_region() {
        assert_eq!(parse_region("10, 20,30,40"), Ok(Region::new(10, 20, 30, 40)));
        assert!(parse_region("1,2,3").is_err());
        assert!(parse_region("1,2,-3,4").is_err());
        assert!(parse_region("a,2,3,4").is_err());
    }

    #[test]
    fn test_describe_stack() {
        let mut stack = ItemStack::new(73, 15);
        assert_eq!(describe_stack(&stack), "15 x Gold Coin");
        stack.prefix = 81;
        assert_eq!(describe_stack(&stack), "15 x Legendary Gold Coin");
        assert_eq!(describe_stack(&ItemStack::new(4000, 1)), "1 x Item #4000");
    }

    #[test]
    fn test_describe_chest() {
        let mut chest = Chest::new(5, 6, 40);
        chest.name = "Loot".to_string();
        chest.items[0] = Some(ItemStack::new(8, 99));
        assert_eq!(describe_chest(&chest), "  Chest at (5, 6) \"Loot\": 1/40 slots used");
    }

    #[test]
    fn test_pixel_to_tile() {
        assert_eq!(pixel_to_tile(160.0), 10);
        assert_eq!(pixel_to_tile(-1.0), -1);
    }
}
