//! `validate`: full decode plus invariant checks

use anyhow::{Context, Result};
use clap::Args;
use std::path::Path;
use terraria_wld::{CodecOptions, validate_world};

use super::load_world_with;
use crate::utils::format_bytes;

#[derive(Args)]
pub struct ValidateArgs {
    /// World file path, file name, title or id
    pub world: String,

    /// Fail when the footer disagrees with the metadata
    #[arg(short, long)]
    pub strict: bool,
}

pub fn execute(args: ValidateArgs, dir: Option<&Path>) -> Result<()> {
    let options = CodecOptions {
        strict_footer: args.strict,
        ..CodecOptions::default()
    };
    let loaded = load_world_with(&args.world, dir, options)?;
    let world = &loaded.world;

    validate_world(world)
        .with_context(|| format!("World {} failed validation", loaded.path.display()))?;

    println!(
        "✓ {} is valid: '{}', version {}, {}x{} tiles, {}",
        loaded.path.display(),
        world.title(),
        world.version(),
        world.width(),
        world.height(),
        format_bytes(loaded.size)
    );
    Ok(())
}
