//! `counts`: block and wall histograms

use anyhow::Result;
use clap::Args;
use console::style;
use std::collections::BTreeMap;
use std::path::Path;
use terraria_ids::GEM_TILES;

use super::{load_world, tile_label, wall_label};
use crate::utils::{add_table_row, create_table, format_share};

#[derive(Args)]
pub struct CountsArgs {
    /// World file path, file name, title or id
    pub world: String,

    /// Count walls instead of blocks
    #[arg(short, long, conflicts_with = "gems")]
    pub walls: bool,

    /// Only count gem ores and exposed gems
    #[arg(short, long)]
    pub gems: bool,
}

pub fn execute(args: CountsArgs, dir: Option<&Path>) -> Result<()> {
    let loaded = load_world(&args.world, dir)?;
    let world = &loaded.world;

    let rows: Vec<(String, usize)> = if args.walls {
        world
            .wall_counts()
            .into_iter()
            .map(|(id, count)| (format!("{id} {}", wall_label(id)), count))
            .collect()
    } else {
        let mut counts = world.tile_counts();
        if args.gems {
            counts = gem_counts(counts);
        }
        counts
            .into_iter()
            .map(|(id, count)| (format!("{id} {}", tile_label(id)), count))
            .collect()
    };

    let total: usize = rows.iter().map(|(_, count)| count).sum();
    let title = match (args.walls, args.gems) {
        (true, _) => "Wall counts",
        (false, true) => "Gem counts",
        (false, false) => "Block counts",
    };
    println!("{}", style(title).bold().cyan());

    let mut sorted = rows;
    sorted.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    let mut table = create_table(&["Name", "Count"]);
    for (label, count) in sorted {
        add_table_row(&mut table, vec![label, format_share(count, total)]);
    }
    table.printstd();
    println!("Total: {total}");

    Ok(())
}

/// Keep only the gem tile ids, listing absent gems with a zero count.
fn gem_counts(counts: BTreeMap<u16, usize>) -> BTreeMap<u16, usize> {
    GEM_TILES
        .iter()
        .map(|&id| (id, counts.get(&id).copied().unwrap_or(0)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_gem_counts() {
        let counts = BTreeMap::from([(1, 500), (63, 4), (178, 2)]);
        let gems = gem_counts(counts);
        assert_eq!(gems.len(), GEM_TILES.len());
        assert_eq!(gems[&63], 4);
        assert_eq!(gems[&64], 0);
        assert_eq!(gems[&178], 2);
        assert!(!gems.contains_key(&1));
    }
}
