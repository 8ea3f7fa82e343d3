//! `kills`: banner kill counts

use anyhow::Result;
use clap::{Args, ValueEnum};
use console::style;
use std::path::Path;

use super::load_world;
use crate::utils::{add_table_row, create_table};

/// Kills needed for one banner.
const KILLS_PER_BANNER: u32 = 50;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum KillSort {
    /// By banner index
    Banner,
    /// Highest count first
    Count,
}

#[derive(Args)]
pub struct KillsArgs {
    /// World file path, file name, title or id
    pub world: String,

    /// Only show counters below this value
    #[arg(short, long)]
    pub below: Option<u32>,

    /// Sort order
    #[arg(short, long, value_enum, default_value = "banner")]
    pub sort: KillSort,
}

pub fn execute(args: KillsArgs, dir: Option<&Path>) -> Result<()> {
    let loaded = load_world(&args.world, dir)?;
    let counts = &loaded.world.metadata.killed_mobs;

    if counts.is_empty() {
        println!("No kill counters recorded (format version {})", loaded.world.version());
        return Ok(());
    }

    let rows = select_kills(counts, args.below, args.sort);

    println!("{}", style("Banner kill counts").bold().cyan());
    let mut table = create_table(&["Banner", "Kills", "Banners earned"]);
    for (banner, kills) in &rows {
        add_table_row(
            &mut table,
            vec![
                banner.to_string(),
                kills.to_string(),
                (kills / KILLS_PER_BANNER).to_string(),
            ],
        );
    }
    table.printstd();
    println!("{} of {} counters shown", rows.len(), counts.len());

    Ok(())
}

/// Non-zero counters, filtered by `below` and sorted.
fn select_kills(counts: &[u32], below: Option<u32>, sort: KillSort) -> Vec<(usize, u32)> {
    let mut rows: Vec<(usize, u32)> = counts
        .iter()
        .copied()
        .enumerate()
        .filter(|&(_, kills)| kills > 0)
        .filter(|&(_, kills)| below.is_none_or(|limit| kills < limit))
        .collect();

    if sort == KillSort::Count {
        rows.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_select_kills() {
        let counts = [0, 12, 75, 3, 0, 75];
        assert_eq!(
            select_kills(&counts, None, KillSort::Banner),
            vec![(1, 12), (2, 75), (3, 3), (5, 75)]
        );
        assert_eq!(
            select_kills(&counts, None, KillSort::Count),
            vec![(2, 75), (5, 75), (1, 12), (3, 3)]
        );
        assert_eq!(
            select_kills(&counts, Some(50), KillSort::Banner),
            vec![(1, 12), (3, 3)]
        );
    }
}
