//! PaceForge CLI library.
//!
//! Command implementations for generating interval training audio tracks,
//! inspecting interval plans, and managing the fragment cache.

pub mod cli_args;
pub mod commands;
pub mod table;
pub mod voice;

use std::path::PathBuf;

use anyhow::{Context, Result};

/// Resolves the cache root: an explicit `--cache-dir` wins, otherwise the
/// platform cache directory under a `paceforge` subdirectory.
pub fn resolve_cache_dir(explicit: Option<&str>) -> Result<PathBuf> {
    if let Some(dir) = explicit {
        return Ok(PathBuf::from(dir));
    }
    let base = dirs::cache_dir().context("could not determine the platform cache directory")?;
    Ok(base.join("paceforge").join("fragments"))
}
