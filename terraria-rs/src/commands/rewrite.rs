//! `rewrite`: decode then encode a world

use anyhow::{Context, Result};
use clap::Args;
use log::info;
use std::fs;
use std::path::{Path, PathBuf};
use terraria_wld::{CodecOptions, FormatVersion, MAX_RUN_LENGTH, WorldFile};

use super::load_world;
use crate::utils::format_bytes;

#[derive(Args)]
pub struct RewriteArgs {
    /// World file path, file name, title or id
    pub world: String,

    /// Output world file
    #[arg(short, long)]
    pub output: PathBuf,

    /// Write as this format version (102 to 147)
    #[arg(long = "format-version")]
    pub format_version: Option<u32>,

    /// Longest tile run the encoder emits
    #[arg(long, default_value_t = MAX_RUN_LENGTH, value_parser = clap::value_parser!(u16).range(1..))]
    pub max_run: u16,
}

pub fn execute(args: RewriteArgs, dir: Option<&Path>) -> Result<()> {
    let mut loaded = load_world(&args.world, dir)?;

    if let Some(number) = args.format_version {
        let from = loaded.world.version();
        loaded
            .world
            .set_version(FormatVersion(number))
            .with_context(|| format!("Cannot write format version {number}"))?;
        info!("Converting from version {from} to {number}");
    }

    let codec = WorldFile::with_options(CodecOptions {
        max_run_length: args.max_run,
        ..CodecOptions::default()
    });
    let bytes = codec
        .encode(&loaded.world)
        .map_err(|err| {
            let kind = err.kind();
            anyhow::Error::new(err).context(format!("Failed to encode world ({kind})"))
        })?;

    fs::write(&args.output, &bytes)
        .with_context(|| format!("Failed to write file: {}", args.output.display()))?;

    println!(
        "✓ Rewrote {} ({}) to {} ({})",
        loaded.path.display(),
        format_bytes(loaded.size),
        args.output.display(),
        format_bytes(bytes.len() as u64)
    );
    Ok(())
}
