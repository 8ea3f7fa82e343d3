//! Locating world files on disk.
//!
//! A world argument is resolved in this order: an existing file path,
//! `<dir>/<arg>.wld`, a world whose title equals the argument, and a world
//! whose id equals the argument. `dir` is `--dir`, `$TERRARIA_WORLDS`, or
//! the platform's Terraria worlds directory.

use anyhow::{Context, Result, bail};
use log::{debug, warn};
use std::fs;
use std::path::{Path, PathBuf};
use terraria_wld::{WorldFile, WorldSummary};

/// File extension of world saves.
pub const WORLD_EXTENSION: &str = "wld";

/// A world file found on disk.
#[derive(Debug, Clone)]
pub struct WorldEntry {
    /// Path of the file
    pub path: PathBuf,
    /// Header and metadata summary
    pub summary: WorldSummary,
}

/// The directory the game saves worlds to, if the platform has one.
pub fn default_worlds_dir() -> Option<PathBuf> {
    #[cfg(windows)]
    {
        directories::UserDirs::new().and_then(|dirs| {
            dirs.document_dir()
                .map(|documents| documents.join("My Games").join("Terraria").join("Worlds"))
        })
    }
    #[cfg(not(windows))]
    {
        directories::BaseDirs::new().map(|dirs| dirs.data_dir().join("Terraria").join("Worlds"))
    }
}

/// The discovery directory: `dir` if given, else the platform default.
pub fn worlds_dir(dir: Option<&Path>) -> Result<PathBuf> {
    match dir {
        Some(dir) => Ok(dir.to_path_buf()),
        None => default_worlds_dir()
            .context("Could not determine the Terraria worlds directory, pass --dir"),
    }
}

/// Read the summary of every world file in `dir`, sorted by path.
///
/// Files that fail to decode are skipped with a warning.
pub fn discover(dir: &Path) -> Result<Vec<WorldEntry>> {
    let dir_str = dir
        .to_str()
        .with_context(|| format!("Directory path is not valid UTF-8: {}", dir.display()))?;
    let pattern = format!(
        "{}/*.{WORLD_EXTENSION}",
        glob::Pattern::escape(dir_str.trim_end_matches('/'))
    );

    let paths: Vec<PathBuf> = glob::glob(&pattern)
        .with_context(|| format!("Invalid search pattern: {pattern}"))?
        .filter_map(|entry| match entry {
            Ok(path) => Some(path),
            Err(err) => {
                warn!("Skipping unreadable entry: {err}");
                None
            }
        })
        .collect();
    debug!("Found {} world files in {}", paths.len(), dir.display());

    let mut entries = read_entries(paths);
    entries.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(entries)
}

#[cfg(feature = "parallel")]
fn read_entries(paths: Vec<PathBuf>) -> Vec<WorldEntry> {
    use rayon::prelude::*;
    paths.into_par_iter().filter_map(read_entry).collect()
}

#[cfg(not(feature = "parallel"))]
fn read_entries(paths: Vec<PathBuf>) -> Vec<WorldEntry> {
    paths.into_iter().filter_map(read_entry).collect()
}

fn read_entry(path: PathBuf) -> Option<WorldEntry> {
    match read_summary(&path) {
        Ok(summary) => Some(WorldEntry { path, summary }),
        Err(err) => {
            warn!("Skipping {}: {err:#}", path.display());
            None
        }
    }
}

/// Read the header and metadata of the world at `path`.
pub fn read_summary(path: &Path) -> Result<WorldSummary> {
    let bytes =
        fs::read(path).with_context(|| format!("Failed to open file: {}", path.display()))?;
    WorldFile::new()
        .read_summary(bytes)
        .map_err(|err| decode_error(path, err))
}

/// Wrap a codec error with the file name and the error kind.
pub fn decode_error(path: &Path, error: terraria_wld::Error) -> anyhow::Error {
    let kind = error.kind();
    anyhow::Error::new(error).context(format!("Failed to decode {} ({kind})", path.display()))
}

/// Resolve a world argument to a file path.
pub fn resolve(arg: &str, dir: Option<&Path>) -> Result<PathBuf> {
    let direct = PathBuf::from(arg);
    if direct.is_file() {
        return Ok(direct);
    }

    let dir = worlds_dir(dir)?;
    let named = dir.join(format!("{arg}.{WORLD_EXTENSION}"));
    if named.is_file() {
        return Ok(named);
    }

    let entries = discover(&dir)?;
    if let Some(entry) = entries.iter().find(|entry| entry.summary.title == arg) {
        debug!("Resolved '{arg}' by title to {}", entry.path.display());
        return Ok(entry.path.clone());
    }
    if let Ok(id) = arg.parse::<u32>()
        && let Some(entry) = entries.iter().find(|entry| entry.summary.world_id == id)
    {
        debug!("Resolved '{arg}' by id to {}", entry.path.display());
        return Ok(entry.path.clone());
    }

    bail!("No world matching '{arg}' in {}", dir.display())
}
