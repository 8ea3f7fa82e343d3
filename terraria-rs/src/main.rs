//! Main entry point for the terraria-rs CLI

use anyhow::Result;
use clap::CommandFactory;
use clap::Parser;
use clap_complete::{Generator, generate};
use std::io;

use terraria_rs::cli::{Cli, Commands};
use terraria_rs::commands;

fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize logger; RUST_LOG still overrides the flags
    let level = match cli.verbose {
        0 if cli.quiet => log::LevelFilter::Error,
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_env(env_logger::Env::default())
        .init();

    let dir = cli.dir.as_deref();

    // Execute command
    match cli.command {
        Commands::List => commands::list::execute(dir),
        Commands::Info(args) => commands::info::execute(args, dir),
        Commands::Kills(args) => commands::kills::execute(args, dir),
        Commands::Counts(args) => commands::counts::execute(args, dir),
        Commands::Find(args) => commands::find::execute(args, dir),
        Commands::Table(args) => commands::table::execute(args, dir),
        Commands::Contents(args) => commands::contents::execute(args, dir),
        Commands::Objects(args) => commands::objects::execute(args, dir),
        Commands::Render(args) => commands::render::execute(args, dir),
        Commands::Validate(args) => commands::validate::execute(args, dir),
        Commands::Rewrite(args) => commands::rewrite::execute(args, dir),
        Commands::Completions { shell } => {
            print_completions(shell, &mut Cli::command());
            Ok(())
        }
    }
}

fn print_completions<G: Generator>(generator: G, cmd: &mut clap::Command) {
    generate(
        generator,
        cmd,
        cmd.get_name().to_string(),
        &mut io::stdout(),
    );
}
