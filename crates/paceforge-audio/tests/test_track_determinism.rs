//! End-to-end determinism: the same intervals must yield byte-identical
//! tracks across runs, with and without a warm fragment cache.

use paceforge_audio::wav::{pcm_hash, write_wav_to_vec};
use paceforge_audio::{
    AssembleResult, Assembler, AudioResult, FragmentCache, VoiceClip, VoiceSynthesizer,
    SAMPLE_RATE,
};
use paceforge_spec::{generate_intervals, TrainingConfig};

/// Deterministic stand-in for the external TTS engine. Renders each text as
/// a low-rate ramp so the assembler must resample it.
struct RampVoice;

impl VoiceSynthesizer for RampVoice {
    fn synthesize(&self, text: &str) -> AudioResult<VoiceClip> {
        let len = 4000 + 200 * text.len();
        let samples = (0..len).map(|i| (i % 700) as i16).collect();
        Ok(VoiceClip {
            samples,
            sample_rate: 22050,
        })
    }
}

fn config() -> TrainingConfig {
    TrainingConfig::new(8.0, 50, 60, 5, 0.5, 10.0).unwrap()
}

fn assemble_with(cache: Option<FragmentCache>) -> AssembleResult {
    let intervals = generate_intervals(&config());
    let mut assembler = Assembler::new(SAMPLE_RATE);
    if let Some(cache) = cache {
        assembler = assembler.with_cache(cache);
    }
    assembler.assemble(&intervals, &RampVoice).unwrap()
}

#[test]
fn test_two_runs_are_byte_identical() {
    let first = assemble_with(None);
    let second = assemble_with(None);
    assert_eq!(pcm_hash(&first.buffer), pcm_hash(&second.buffer));
    assert_eq!(write_wav_to_vec(&first.buffer), write_wav_to_vec(&second.buffer));
}

#[test]
fn test_warm_cache_reproduces_the_cold_track() {
    let dir = tempfile::tempdir().unwrap();
    let cache = || FragmentCache::new(dir.path(), SAMPLE_RATE);

    let cold = assemble_with(Some(cache()));
    assert!(cold.synthesized > 0);

    // Every fragment is on disk now; the warm run synthesizes nothing.
    let warm = assemble_with(Some(cache()));
    assert_eq!(warm.synthesized, 0);
    assert!(warm.cache_hits > 0);
    assert_eq!(pcm_hash(&cold.buffer), pcm_hash(&warm.buffer));
    assert!(cold.warnings.is_empty());
    assert!(warm.warnings.is_empty());
}

#[test]
fn test_cached_and_uncached_tracks_match() {
    let dir = tempfile::tempdir().unwrap();
    let cached = assemble_with(Some(FragmentCache::new(dir.path(), SAMPLE_RATE)));
    let plain = assemble_with(None);
    assert_eq!(pcm_hash(&cached.buffer), pcm_hash(&plain.buffer));
}
