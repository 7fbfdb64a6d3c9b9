//! Paceforge Audio Backend
//!
//! This crate turns an interval progression into one continuous mono 16-bit
//! PCM track: timing beeps at every interval boundary, a triple beep where the
//! speed changes, and spoken announcements ahead of each change.
//!
//! # Determinism
//!
//! All synthesis is deterministic: given the same fragment descriptor and
//! sample rate, the output samples are byte-identical across runs. That is
//! what makes the content-addressed fragment cache a valid substitute for
//! recomputation — the only non-deterministic collaborator is the voice
//! adapter, and its renders are cached by the text they speak.
//!
//! # Example
//!
//! ```ignore
//! use paceforge_audio::{Assembler, FragmentCache, wav};
//! use paceforge_spec::{generate_intervals, TrainingConfig};
//!
//! let config = TrainingConfig::new(8.0, 50, 60, 5, 0.5, 20.0)?;
//! let intervals = generate_intervals(&config);
//! let cache = FragmentCache::new("/tmp/paceforge-cache", 44100);
//!
//! let assembler = Assembler::new(44100).with_cache(cache);
//! let result = assembler.assemble(&intervals, &voice)?;
//! wav::write_wav_file(&result.buffer, "training.wav")?;
//! ```
//!
//! # Crate Structure
//!
//! - [`buffer`] - Sample buffer type and PCM byte conversion
//! - [`synth`] - Silence and sine-beep fragment synthesis
//! - [`resample`] - Exact-length linear-interpolation resampler
//! - [`cache`] - Content-addressed on-disk fragment cache
//! - [`voice`] - Voice adapter boundary (text-to-speech trait)
//! - [`timeline`] - Timeline assembler
//! - [`wav`] - Deterministic WAV file writer

pub mod buffer;
pub mod cache;
pub mod error;
pub mod resample;
pub mod synth;
pub mod timeline;
pub mod voice;
pub mod wav;

// Re-export main types at crate root
pub use buffer::SampleBuffer;
pub use cache::{CacheError, CacheInfo, FragmentCache};
pub use error::{AudioError, AudioResult};
pub use timeline::{AssembleResult, Assembler, Preamble};
pub use voice::{VoiceClip, VoiceErrorPolicy, VoiceSynthesizer};

/// Target sample rate of every assembled track, in Hz.
pub const SAMPLE_RATE: u32 = 44100;
