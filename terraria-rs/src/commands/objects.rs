//! `objects`: multi-tile objects derived from frame coordinates

use anyhow::Result;
use clap::Args;
use console::style;
use std::path::Path;
use terraria_wld::group_framed_objects;

use super::{load_world, parse_tile_id, tile_label};
use crate::utils::{add_table_row, create_table};

#[derive(Args)]
pub struct ObjectsArgs {
    /// World file path, file name, title or id
    pub world: String,

    /// Only list objects of this block (id or name)
    #[arg(long, value_parser = parse_tile_id)]
    pub id: Option<u16>,
}

pub fn execute(args: ObjectsArgs, dir: Option<&Path>) -> Result<()> {
    let loaded = load_world(&args.world, dir)?;

    let objects: Vec<_> = group_framed_objects(&loaded.world)
        .into_iter()
        .filter(|object| args.id.is_none_or(|id| object.id == id))
        .collect();

    println!("{}", style("Framed objects").bold().cyan());
    let mut table = create_table(&["Block", "X", "Y", "Size"]);
    for object in &objects {
        add_table_row(
            &mut table,
            vec![
                format!("{} {}", object.id, tile_label(object.id)),
                object.x.to_string(),
                object.y.to_string(),
                format!("{}x{}", object.width, object.height),
            ],
        );
    }
    table.printstd();
    println!("{} object(s)", objects.len());

    Ok(())
}
