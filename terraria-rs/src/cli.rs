//! Root CLI structure for terraria-rs

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::commands::{
    contents::ContentsArgs, counts::CountsArgs, find::FindArgs, info::InfoArgs, kills::KillsArgs,
    objects::ObjectsArgs, render::RenderArgs, rewrite::RewriteArgs, table::TableArgs,
    validate::ValidateArgs,
};

#[derive(Parser)]
#[command(name = "terraria-rs")]
#[command(about = "Command-line tools for Terraria world files", long_about = None)]
#[command(version)]
#[command(author)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Directory searched for worlds by name or id
    #[arg(long, global = true, env = "TERRARIA_WORLDS")]
    pub dir: Option<PathBuf>,

    /// Verbosity level (can be repeated for more detail)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the worlds found in the worlds directory
    List,

    /// Show header, section table and metadata of a world
    Info(InfoArgs),

    /// Show banner kill counts
    Kills(KillsArgs),

    /// Count blocks or walls
    Counts(CountsArgs),

    /// Find tiles matching an expression
    Find(FindArgs),

    /// Dump the tile grid row by row
    Table(TableArgs),

    /// List chests, signs, NPCs and tile entities
    Contents(ContentsArgs),

    /// List multi-tile objects
    Objects(ObjectsArgs),

    /// Render a PNG map of a world
    Render(RenderArgs),

    /// Decode a world and check every invariant
    Validate(ValidateArgs),

    /// Decode a world and encode it again
    Rewrite(RewriteArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}
