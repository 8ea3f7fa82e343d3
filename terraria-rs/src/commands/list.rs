//! `list`: worlds in the discovery directory

use anyhow::Result;
use console::style;
use std::path::Path;

use crate::discovery::{discover, worlds_dir};
use crate::utils::{add_table_row, create_table, format_bytes};

pub fn execute(dir: Option<&Path>) -> Result<()> {
    let dir = worlds_dir(dir)?;
    let entries = discover(&dir)?;

    if entries.is_empty() {
        println!("No worlds found in {}", dir.display());
        return Ok(());
    }

    println!(
        "{} {}",
        style("Worlds in").bold(),
        style(dir.display()).cyan()
    );

    let mut table = create_table(&["File", "Title", "Id", "Size", "Dimensions", "Version"]);
    for entry in &entries {
        let file = entry
            .path
            .file_name()
            .map_or_else(String::new, |name| name.to_string_lossy().into_owned());
        let summary = &entry.summary;
        add_table_row(
            &mut table,
            vec![
                file,
                summary.title.clone(),
                summary.world_id.to_string(),
                format_bytes(summary.file_len as u64),
                format!("{}x{}", summary.width, summary.height),
                summary.version.to_string(),
            ],
        );
    }
    table.printstd();

    Ok(())
}
