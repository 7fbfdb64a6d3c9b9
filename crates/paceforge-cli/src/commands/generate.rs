//! Generate command implementation
//!
//! Builds the interval plan, assembles the training track, and writes it to
//! a WAV file.

use anyhow::{Context, Result};
use colored::Colorize;
use std::process::ExitCode;
use std::time::Instant;

use paceforge_audio::wav::{pcm_hash, write_wav_file};
use paceforge_audio::{Assembler, FragmentCache, VoiceErrorPolicy, SAMPLE_RATE};
use paceforge_spec::{generate_intervals, TrainingConfig};

use crate::cli_args::TrainingArgs;
use crate::resolve_cache_dir;
use crate::table;
use crate::voice::EspeakVoice;

pub fn run(
    training: &TrainingArgs,
    out: &str,
    no_preamble: bool,
    on_voice_error: &str,
    cache_dir: Option<&str>,
    no_cache: bool,
    espeak: Option<&str>,
) -> Result<ExitCode> {
    let start = Instant::now();

    let config = TrainingConfig::new(
        training.initial_speed,
        training.distance,
        training.stage_duration,
        training.stage_threshold,
        training.increment,
        training.max_speed,
    )?;
    let intervals = generate_intervals(&config);

    println!(
        "{} {:.1} km/h to {:.1} km/h, {} m intervals",
        "Generating:".cyan().bold(),
        config.initial_speed_kmh,
        config.max_speed_kmh,
        config.interval_distance_m
    );
    table::print_summary(&intervals);

    let voice = match espeak {
        Some(program) => EspeakVoice::with_program(program),
        None => EspeakVoice::discover()?,
    };

    let mut assembler = Assembler::new(SAMPLE_RATE);
    if no_preamble {
        assembler = assembler.without_preamble();
    }
    if on_voice_error == "silence" {
        assembler = assembler.on_voice_error(VoiceErrorPolicy::Silence);
    }
    if !no_cache {
        let root = resolve_cache_dir(cache_dir)?;
        println!("{} {}", "Cache:".dimmed(), root.display());
        assembler = assembler.with_cache(FragmentCache::new(root, SAMPLE_RATE));
    }

    let result = assembler
        .assemble(&intervals, &voice)
        .context("failed to assemble the training track")?;

    for warning in &result.warnings {
        println!("  {} {}", "!".yellow(), warning);
    }

    write_wav_file(&result.buffer, out)
        .with_context(|| format!("failed to write WAV file: {}", out))?;

    println!(
        "  {} {} ({:.1} s of audio, {} cached / {} synthesized, hash {})",
        "SUCCESS".green().bold(),
        out,
        result.buffer.duration_seconds(),
        result.cache_hits,
        result.synthesized,
        &pcm_hash(&result.buffer)[..16]
    );
    println!("  {} {:.2?}", "Elapsed:".dimmed(), start.elapsed());

    Ok(ExitCode::SUCCESS)
}
