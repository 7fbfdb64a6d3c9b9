//! PaceForge CLI - interval training audio generation.

use std::process::ExitCode;

use clap::Parser;
use colored::Colorize;

use paceforge_cli::cli_args::{CacheCommands, Cli, Commands};
use paceforge_cli::commands;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Generate {
            training,
            out,
            no_preamble,
            on_voice_error,
            cache_dir,
            no_cache,
            espeak,
        } => commands::generate::run(
            &training,
            &out,
            no_preamble,
            &on_voice_error,
            cache_dir.as_deref(),
            no_cache,
            espeak.as_deref(),
        ),
        Commands::Intervals { training } => commands::intervals::run(&training),
        Commands::Cache { command } => match command {
            CacheCommands::Info { cache_dir } => commands::cache::info(cache_dir.as_deref()),
            CacheCommands::Clear { cache_dir } => commands::cache::clear(cache_dir.as_deref()),
        },
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {:#}", "ERROR".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}
