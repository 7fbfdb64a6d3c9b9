//! Content-addressed on-disk fragment cache.
//!
//! Every synthesized fragment is stored under the BLAKE3 key of its
//! generation parameters, so repeated runs with identical parameters skip the
//! expensive synthesis (notably text-to-speech renders). One directory per
//! entry:
//!
//! ```text
//! <root>/<key-hex>.cache/
//!     fragment.pcm     raw little-endian i16 samples
//!     manifest.json    descriptor, sample rate, length, creation time
//! ```
//!
//! Failure policy: a read failure or a corrupt entry degrades to a cache
//! miss — the caller falls back to synthesis — and is never fatal to a run.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use paceforge_spec::{fragment_key, Fragment};

use crate::buffer::SampleBuffer;

const MANIFEST_FILE: &str = "manifest.json";
const PCM_FILE: &str = "fragment.pcm";

/// Errors crossing the cache boundary. Callers treat every variant as a miss;
/// nothing here aborts a run.
#[derive(Debug, Error)]
pub enum CacheError {
    /// I/O failure reading or writing an entry.
    #[error("cache I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Manifest could not be serialized or parsed.
    #[error("cache manifest error: {0}")]
    Manifest(#[from] serde_json::Error),

    /// Entry content contradicts its manifest.
    #[error("corrupt cache entry {key}: {message}")]
    Corrupt {
        /// Cache key of the offending entry.
        key: String,
        /// What was wrong.
        message: String,
    },
}

/// Manifest stored alongside each cached fragment.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CacheManifest {
    /// The fragment descriptor this entry was generated from.
    fragment: Fragment,
    /// Sample rate the fragment was synthesized at.
    sample_rate: u32,
    /// Number of samples in `fragment.pcm`.
    num_samples: usize,
    /// Seconds since the Unix epoch when the entry was created.
    created_at: u64,
}

/// Content-addressed store for synthesized fragments.
///
/// Owned by the timeline assembler for the duration of one run; single
/// process, sequential access. The sample rate is fixed at construction and
/// folded into every key, so a rate change can never serve stale samples.
#[derive(Debug)]
pub struct FragmentCache {
    root: PathBuf,
    sample_rate: u32,
}

impl FragmentCache {
    /// Creates a cache over the given root directory. The directory is
    /// created lazily on the first store.
    pub fn new(root: impl Into<PathBuf>, sample_rate: u32) -> Self {
        Self {
            root: root.into(),
            sample_rate,
        }
    }

    /// The cache root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the entry directory for a fragment.
    pub fn entry_path(&self, fragment: &Fragment) -> PathBuf {
        let key = fragment_key(fragment, self.sample_rate);
        self.root.join(format!("{}.cache", key))
    }

    /// Looks up a fragment, degrading any failure to a miss.
    pub fn get(&self, fragment: &Fragment) -> Option<SampleBuffer> {
        self.try_get(fragment).unwrap_or(None)
    }

    /// Looks up a fragment, surfacing read failures so the caller can report
    /// them before falling back to synthesis.
    pub fn try_get(&self, fragment: &Fragment) -> Result<Option<SampleBuffer>, CacheError> {
        let entry_path = self.entry_path(fragment);
        let manifest_path = entry_path.join(MANIFEST_FILE);

        if !manifest_path.exists() {
            return Ok(None);
        }

        let key = fragment_key(fragment, self.sample_rate);
        let manifest_json = fs::read_to_string(&manifest_path)?;
        let manifest: CacheManifest = serde_json::from_str(&manifest_json)?;

        if manifest.sample_rate != self.sample_rate {
            return Err(CacheError::Corrupt {
                key,
                message: format!(
                    "manifest sample rate {} does not match cache rate {}",
                    manifest.sample_rate, self.sample_rate
                ),
            });
        }

        let pcm = fs::read(entry_path.join(PCM_FILE))?;
        let buffer = SampleBuffer::from_pcm_bytes(&pcm, self.sample_rate).ok_or_else(|| {
            CacheError::Corrupt {
                key: key.clone(),
                message: "PCM payload has odd byte length".to_string(),
            }
        })?;

        if buffer.len() != manifest.num_samples {
            return Err(CacheError::Corrupt {
                key,
                message: format!(
                    "PCM payload holds {} samples, manifest says {}",
                    buffer.len(),
                    manifest.num_samples
                ),
            });
        }

        Ok(Some(buffer))
    }

    /// Persists a fragment's samples under its key.
    ///
    /// Overwriting an existing entry is permitted: synthesis is deterministic,
    /// so the content is identical by construction.
    pub fn put(&self, fragment: &Fragment, buffer: &SampleBuffer) -> Result<(), CacheError> {
        let entry_path = self.entry_path(fragment);
        fs::create_dir_all(&entry_path)?;

        fs::write(entry_path.join(PCM_FILE), buffer.to_pcm_bytes())?;

        let manifest = CacheManifest {
            fragment: fragment.clone(),
            sample_rate: self.sample_rate,
            num_samples: buffer.len(),
            created_at: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0),
        };
        let manifest_json = serde_json::to_string_pretty(&manifest)?;
        fs::write(entry_path.join(MANIFEST_FILE), manifest_json)?;

        Ok(())
    }

    /// Removes all entries under the root. Returns the number removed.
    pub fn clear(&self) -> Result<u64, CacheError> {
        if !self.root.exists() {
            return Ok(0);
        }

        let mut count = 0u64;
        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            if path.is_dir() && path.extension().and_then(|s| s.to_str()) == Some("cache") {
                fs::remove_dir_all(&path)?;
                count += 1;
            }
        }
        Ok(count)
    }

    /// Reports entry count and total size on disk.
    pub fn info(&self) -> Result<CacheInfo, CacheError> {
        if !self.root.exists() {
            return Ok(CacheInfo {
                root: self.root.clone(),
                entry_count: 0,
                total_size_bytes: 0,
            });
        }

        let mut entry_count = 0u64;
        let mut total_size_bytes = 0u64;
        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            if path.is_dir() && path.extension().and_then(|s| s.to_str()) == Some("cache") {
                entry_count += 1;
                total_size_bytes += dir_size(&path)?;
            }
        }

        Ok(CacheInfo {
            root: self.root.clone(),
            entry_count,
            total_size_bytes,
        })
    }
}

/// Total size of a directory, recursive.
fn dir_size(path: &Path) -> Result<u64, CacheError> {
    let mut total = 0u64;
    for entry in walkdir::WalkDir::new(path) {
        let entry = entry.map_err(|e| {
            CacheError::Io(e.into_io_error().unwrap_or_else(|| {
                std::io::Error::new(std::io::ErrorKind::Other, "walkdir loop")
            }))
        })?;
        if entry.file_type().is_file() {
            total += entry.metadata().map(|m| m.len()).unwrap_or(0);
        }
    }
    Ok(total)
}

/// Cache statistics.
#[derive(Debug, Clone)]
pub struct CacheInfo {
    /// Cache root directory.
    pub root: PathBuf,
    /// Number of entries.
    pub entry_count: u64,
    /// Total size in bytes.
    pub total_size_bytes: u64,
}
