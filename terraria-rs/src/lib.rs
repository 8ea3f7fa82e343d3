//! Terraria-RS library
//!
//! The pieces of the `terraria-rs` command-line tool: argument parsing,
//! world discovery, the tile match language and the subcommands.

pub mod cli;
pub mod commands;
pub mod discovery;
pub mod query;
pub mod utils;
