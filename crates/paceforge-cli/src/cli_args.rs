//! CLI argument definitions.
//!
//! All `#[derive(Parser)]` and `#[derive(Subcommand)]` types live here,
//! keeping `main.rs` focused on dispatch logic.

use clap::{Args, Parser, Subcommand};

/// PaceForge - Interval Training Audio Generator
#[derive(Parser)]
#[command(name = "paceforge")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Training parameters shared by the `generate` and `intervals` commands.
#[derive(Args, Debug)]
pub struct TrainingArgs {
    /// Initial speed in km/h
    #[arg(long, default_value_t = 8.0)]
    pub initial_speed: f64,

    /// Interval distance in meters
    #[arg(long, default_value_t = 50)]
    pub distance: u32,

    /// Target stage duration in seconds
    #[arg(long, default_value_t = 60)]
    pub stage_duration: u32,

    /// Tolerance around the stage duration in seconds
    #[arg(long, default_value_t = 5)]
    pub stage_threshold: u32,

    /// Speed increase per stage in km/h
    #[arg(long, default_value_t = 0.5)]
    pub increment: f64,

    /// Maximum speed in km/h
    #[arg(long, default_value_t = 20.0)]
    pub max_speed: f64,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a training audio track as a WAV file
    Generate {
        #[command(flatten)]
        training: TrainingArgs,

        /// Output WAV file path
        #[arg(short, long, default_value = "training.wav")]
        out: String,

        /// Skip the spoken preamble and countdown
        #[arg(long)]
        no_preamble: bool,

        /// What to do when voice synthesis fails
        #[arg(long, default_value = "abort", value_parser = ["abort", "silence"])]
        on_voice_error: String,

        /// Fragment cache directory (default: platform cache dir)
        #[arg(long)]
        cache_dir: Option<String>,

        /// Disable the fragment cache entirely
        #[arg(long, conflicts_with = "cache_dir")]
        no_cache: bool,

        /// Path to the espeak binary (default: found on PATH)
        #[arg(long)]
        espeak: Option<String>,
    },

    /// Print the interval plan without generating audio
    Intervals {
        #[command(flatten)]
        training: TrainingArgs,
    },

    /// Manage the fragment cache
    Cache {
        #[command(subcommand)]
        command: CacheCommands,
    },
}

#[derive(Subcommand)]
pub enum CacheCommands {
    /// Show cache location, entry count, and size
    Info {
        /// Fragment cache directory (default: platform cache dir)
        #[arg(long)]
        cache_dir: Option<String>,
    },

    /// Remove all cached fragments
    Clear {
        /// Fragment cache directory (default: platform cache dir)
        #[arg(long)]
        cache_dir: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_generate_with_defaults() {
        let cli = Cli::try_parse_from(["paceforge", "generate"]).unwrap();
        match cli.command {
            Commands::Generate {
                training,
                out,
                no_preamble,
                no_cache,
                ..
            } => {
                assert_eq!(training.initial_speed, 8.0);
                assert_eq!(training.distance, 50);
                assert_eq!(out, "training.wav");
                assert!(!no_preamble);
                assert!(!no_cache);
            }
            _ => panic!("expected generate command"),
        }
    }

    #[test]
    fn test_cli_parses_generate_with_options() {
        let cli = Cli::try_parse_from([
            "paceforge",
            "generate",
            "--initial-speed",
            "9.5",
            "--max-speed",
            "12.0",
            "--out",
            "run.wav",
            "--no-preamble",
            "--no-cache",
        ])
        .unwrap();
        match cli.command {
            Commands::Generate {
                training,
                out,
                no_preamble,
                no_cache,
                ..
            } => {
                assert_eq!(training.initial_speed, 9.5);
                assert_eq!(training.max_speed, 12.0);
                assert_eq!(out, "run.wav");
                assert!(no_preamble);
                assert!(no_cache);
            }
            _ => panic!("expected generate command"),
        }
    }

    #[test]
    fn test_cli_rejects_unknown_voice_error_policy() {
        let result =
            Cli::try_parse_from(["paceforge", "generate", "--on-voice-error", "retry"]);
        assert!(result.is_err());

        let cli =
            Cli::try_parse_from(["paceforge", "generate", "--on-voice-error", "silence"]).unwrap();
        match cli.command {
            Commands::Generate { on_voice_error, .. } => assert_eq!(on_voice_error, "silence"),
            _ => panic!("expected generate command"),
        }
    }

    #[test]
    fn test_cli_rejects_no_cache_with_cache_dir() {
        let result = Cli::try_parse_from([
            "paceforge",
            "generate",
            "--no-cache",
            "--cache-dir",
            "/tmp/cache",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_parses_intervals() {
        let cli =
            Cli::try_parse_from(["paceforge", "intervals", "--stage-duration", "90"]).unwrap();
        match cli.command {
            Commands::Intervals { training } => {
                assert_eq!(training.stage_duration, 90);
                assert_eq!(training.stage_threshold, 5);
            }
            _ => panic!("expected intervals command"),
        }
    }

    #[test]
    fn test_cli_parses_cache_clear() {
        let cli = Cli::try_parse_from(["paceforge", "cache", "clear"]).unwrap();
        match cli.command {
            Commands::Cache { command } => match command {
                CacheCommands::Clear { cache_dir } => assert!(cache_dir.is_none()),
                _ => panic!("expected clear subcommand"),
            },
            _ => panic!("expected cache command"),
        }
    }
}
