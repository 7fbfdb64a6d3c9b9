//! Cache management commands

use anyhow::Result;
use colored::Colorize;
use std::process::ExitCode;

use paceforge_audio::{FragmentCache, SAMPLE_RATE};

use crate::resolve_cache_dir;

/// Remove all cache entries
pub fn clear(cache_dir: Option<&str>) -> Result<ExitCode> {
    let root = resolve_cache_dir(cache_dir)?;
    let cache = FragmentCache::new(root, SAMPLE_RATE);

    println!("{}", "Clearing fragment cache...".cyan().bold());

    let count = cache.clear()?;

    if count == 0 {
        println!("  {}", "Cache is already empty".dimmed());
    } else {
        println!(
            "  {} Removed {} cache {}",
            "SUCCESS".green().bold(),
            count,
            if count == 1 { "entry" } else { "entries" }
        );
    }

    Ok(ExitCode::SUCCESS)
}

/// Show cache information
pub fn info(cache_dir: Option<&str>) -> Result<ExitCode> {
    let root = resolve_cache_dir(cache_dir)?;
    let cache = FragmentCache::new(root, SAMPLE_RATE);

    println!("{}", "Cache Information".cyan().bold());

    let info = cache.info()?;

    println!("  {}: {}", "Cache directory".dimmed(), info.root.display());
    println!("  {}: {}", "Entry count".dimmed(), info.entry_count);

    let size_mb = info.total_size_bytes as f64 / (1024.0 * 1024.0);
    if size_mb >= 1.0 {
        println!("  {}: {:.2} MB", "Total size".dimmed(), size_mb);
    } else {
        let size_kb = info.total_size_bytes as f64 / 1024.0;
        println!("  {}: {:.2} KB", "Total size".dimmed(), size_kb);
    }

    Ok(ExitCode::SUCCESS)
}
