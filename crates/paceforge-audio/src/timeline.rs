//! Timeline assembler.
//!
//! Walks the ordered interval sequence once and concatenates fragments into
//! one continuous buffer: an optional spoken preamble with countdown and
//! start beep, silence spanning each interval, an upcoming-speed announcement
//! ahead of every speed change, and a beep at every interval boundary (triple
//! where the speed changes).
//!
//! All offsets are computed from interval durations through a single rounding
//! rule ([`synth::samples_for`]), so cumulative drift never exceeds one
//! sample per boundary. The end of the preamble is the zero reference for
//! every interval offset.

use paceforge_spec::{validate_intervals, Fragment, Interval};

use crate::buffer::SampleBuffer;
use crate::cache::FragmentCache;
use crate::error::{AudioError, AudioResult};
use crate::resample::resample;
use crate::synth;
use crate::voice::{VoiceErrorPolicy, VoiceSynthesizer, VOICE_FALLBACK_SILENCE_S};

/// Seconds before a speed change by which the announcement must end.
pub const LEAD_TIME_S: f64 = 10.0;
/// Duration of the boundary beep in seconds.
pub const BEEP_DURATION_S: f64 = 0.5;
/// Beep frequency in Hz (A3, warm and deep).
pub const BEEP_FREQUENCY_HZ: f64 = 220.0;
/// Duration of each beep in the speed-change triple, in seconds.
pub const CHANGE_BEEP_DURATION_S: f64 = 0.2;
/// Gap between the speed-change beeps, in seconds.
pub const CHANGE_BEEP_GAP_S: f64 = 0.1;
/// Pause between countdown numbers in seconds.
pub const COUNTDOWN_PAUSE_S: f64 = 1.0;

/// The spoken introduction placed before the interval track. Its final beep
/// marks the zero reference all interval offsets are measured from.
#[derive(Debug, Clone)]
pub struct Preamble {
    /// Opening announcement.
    pub announcement: String,
    /// Countdown starting number; counts down to 1 with pauses in between.
    pub countdown_from: u32,
}

impl Default for Preamble {
    fn default() -> Self {
        Self {
            announcement: "Starting... test in 5 seconds".to_string(),
            countdown_from: 4,
        }
    }
}

/// Result of one assembly run.
#[derive(Debug)]
pub struct AssembleResult {
    /// The finished track.
    pub buffer: SampleBuffer,
    /// Non-fatal incidents: cache failures degraded to misses, skipped
    /// announcements, substituted silence.
    pub warnings: Vec<String>,
    /// Fragments served from the cache.
    pub cache_hits: u32,
    /// Fragments synthesized this run.
    pub synthesized: u32,
}

/// Assembles interval sequences into PCM tracks.
///
/// Owns the fragment cache for the duration of a run; there is no process
/// wide cache state.
#[derive(Debug)]
pub struct Assembler {
    sample_rate: u32,
    cache: Option<FragmentCache>,
    preamble: Option<Preamble>,
    voice_error_policy: VoiceErrorPolicy,
}

impl Assembler {
    /// Creates an assembler at the given target rate, with the default
    /// preamble and no cache.
    pub fn new(sample_rate: u32) -> Self {
        Self {
            sample_rate,
            cache: None,
            preamble: Some(Preamble::default()),
            voice_error_policy: VoiceErrorPolicy::default(),
        }
    }

    /// Attaches a fragment cache. Beep and voice fragments will be served
    /// from and stored into it.
    pub fn with_cache(mut self, cache: FragmentCache) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Replaces the default preamble.
    pub fn with_preamble(mut self, preamble: Preamble) -> Self {
        self.preamble = Some(preamble);
        self
    }

    /// Produces the bare interval track with no preamble; the zero reference
    /// is then offset 0.
    pub fn without_preamble(mut self) -> Self {
        self.preamble = None;
        self
    }

    /// Sets the policy applied when voice synthesis fails.
    pub fn on_voice_error(mut self, policy: VoiceErrorPolicy) -> Self {
        self.voice_error_policy = policy;
        self
    }

    /// Assembles the full track for an interval sequence.
    ///
    /// # Errors
    /// Fails on an invalid interval sequence, on invalid synthesis
    /// parameters, and on voice failures under [`VoiceErrorPolicy::Abort`].
    /// Cache failures never abort; they surface in the result's warnings.
    pub fn assemble(
        &self,
        intervals: &[Interval],
        voice: &dyn VoiceSynthesizer,
    ) -> AudioResult<AssembleResult> {
        validate_intervals(intervals)?;

        let mut run = Run {
            assembler: self,
            voice,
            out: SampleBuffer::empty(self.sample_rate),
            warnings: Vec::new(),
            cache_hits: 0,
            synthesized: 0,
        };

        if let Some(preamble) = &self.preamble {
            run.assemble_preamble(preamble)?;
        }

        run.assemble_intervals(intervals)?;

        Ok(AssembleResult {
            buffer: run.out,
            warnings: run.warnings,
            cache_hits: run.cache_hits,
            synthesized: run.synthesized,
        })
    }
}

/// Mutable state of one assembly run.
struct Run<'a> {
    assembler: &'a Assembler,
    voice: &'a dyn VoiceSynthesizer,
    out: SampleBuffer,
    warnings: Vec<String>,
    cache_hits: u32,
    synthesized: u32,
}

impl Run<'_> {
    fn rate(&self) -> u32 {
        self.assembler.sample_rate
    }

    /// Opening announcement, countdown with pauses, then the start beep whose
    /// end is the zero reference.
    fn assemble_preamble(&mut self, preamble: &Preamble) -> AudioResult<()> {
        let announcement = self.materialize(&Fragment::voice(preamble.announcement.clone()))?;
        self.out.extend_from(&announcement.samples);

        let pause_samples = synth::samples_for(COUNTDOWN_PAUSE_S, self.rate());
        for number in (1..=preamble.countdown_from).rev() {
            self.out.extend_silence(pause_samples);
            let spoken = self.materialize(&Fragment::voice(number.to_string()))?;
            self.out.extend_from(&spoken.samples);
        }
        self.out.extend_silence(pause_samples);

        let start_beep =
            self.materialize(&Fragment::beep(1, BEEP_DURATION_S, BEEP_FREQUENCY_HZ, 0.0))?;
        self.out.extend_from(&start_beep.samples);
        Ok(())
    }

    fn assemble_intervals(&mut self, intervals: &[Interval]) -> AudioResult<()> {
        let start_offset = self.out.len();
        let lead_samples = synth::samples_for(LEAD_TIME_S, self.rate());
        let mut expected_len = start_offset;

        for (i, interval) in intervals.iter().enumerate() {
            let end_samples = start_offset + synth::samples_for(interval.total_end_s, self.rate());

            // Announce the upcoming speed so the phrase ends exactly at the
            // lead-time boundary before the change.
            if interval.stage_change_at_end && i + 1 < intervals.len() {
                let text = announcement_text(intervals[i + 1].speed_kmh);
                let spoken = self.materialize(&Fragment::voice(text.clone()))?;
                let announce_end = end_samples.saturating_sub(lead_samples);

                if announce_end >= spoken.len()
                    && announce_end - spoken.len() >= self.out.len().max(start_offset)
                {
                    self.pad_to(announce_end - spoken.len());
                    self.out.extend_from(&spoken.samples);
                } else {
                    self.warnings.push(format!(
                        "skipped announcement \"{}\": no room before the change at {:.1}s",
                        text, interval.total_end_s
                    ));
                }
            }

            // Boundary beep: triple where the speed changes.
            let beep = if interval.stage_change_at_end {
                Fragment::beep(3, CHANGE_BEEP_DURATION_S, BEEP_FREQUENCY_HZ, CHANGE_BEEP_GAP_S)
            } else {
                Fragment::beep(1, BEEP_DURATION_S, BEEP_FREQUENCY_HZ, 0.0)
            };
            let beep = self.materialize(&beep)?;

            self.pad_to(end_samples);
            self.out.extend_from(&beep.samples);
            expected_len = end_samples + beep.len();
        }

        // The final buffer must cover every slot exactly; absorb any
        // discrepancy in the last fragment, never by shifting fragments.
        if self.out.len() < expected_len {
            self.out.extend_silence(expected_len - self.out.len());
        } else {
            self.out.samples.truncate(expected_len);
        }
        Ok(())
    }

    /// Pads with silence up to an absolute offset. Never moves backwards.
    fn pad_to(&mut self, offset: usize) {
        if offset > self.out.len() {
            let gap = offset - self.out.len();
            self.out.extend_silence(gap);
        }
    }

    /// Resolves a fragment to samples: cache lookup, then synthesis, then
    /// store. Cache failures degrade to a miss with a warning. Only genuine
    /// renders are stored; the silence substituted for a failed voice render
    /// never reaches the cache, so a later run with a working engine
    /// re-synthesizes the phrase.
    fn materialize(&mut self, fragment: &Fragment) -> AudioResult<SampleBuffer> {
        if let Some(cache) = &self.assembler.cache {
            match cache.try_get(fragment) {
                Ok(Some(buffer)) => {
                    self.cache_hits += 1;
                    return Ok(buffer);
                }
                Ok(None) => {}
                Err(e) => self
                    .warnings
                    .push(format!("cache read failed for {}: {}", fragment.kind(), e)),
            }
        }

        let Synthesized { buffer, cacheable } = self.synthesize(fragment)?;
        self.synthesized += 1;

        if cacheable {
            if let Some(cache) = &self.assembler.cache {
                if let Err(e) = cache.put(fragment, &buffer) {
                    self.warnings
                        .push(format!("cache store failed for {}: {}", fragment.kind(), e));
                }
            }
        }

        Ok(buffer)
    }

    fn synthesize(&mut self, fragment: &Fragment) -> AudioResult<Synthesized> {
        match fragment {
            // Silence is cheaper to regenerate than to read back from disk.
            Fragment::Silence { duration_s } => {
                Ok(Synthesized::uncached(synth::silence(*duration_s, self.rate())?))
            }
            Fragment::Beep {
                count,
                duration_s,
                frequency_hz,
                gap_s,
            } => Ok(Synthesized::cached(synth::beep_sequence(
                *count,
                *duration_s,
                *frequency_hz,
                *gap_s,
                self.rate(),
            )?)),
            Fragment::Voice { text } => self.synthesize_voice(text),
        }
    }

    fn synthesize_voice(&mut self, text: &str) -> AudioResult<Synthesized> {
        match self.voice.synthesize(text) {
            Ok(clip) => {
                let buffer = SampleBuffer::new(clip.samples, clip.sample_rate);
                if buffer.is_empty() {
                    return Err(AudioError::voice(text, "engine produced no samples"));
                }
                Ok(Synthesized::cached(resample(&buffer, self.rate())?))
            }
            Err(e) => match self.assembler.voice_error_policy {
                VoiceErrorPolicy::Abort => Err(e),
                VoiceErrorPolicy::Silence => {
                    self.warnings.push(format!(
                        "voice synthesis failed for \"{}\", substituting {:.1}s of silence: {}",
                        text, VOICE_FALLBACK_SILENCE_S, e
                    ));
                    // A substitute is not the phrase; it must never be stored
                    // under the phrase's key.
                    Ok(Synthesized::uncached(synth::silence(
                        VOICE_FALLBACK_SILENCE_S,
                        self.rate(),
                    )?))
                }
            },
        }
    }
}

/// A freshly synthesized fragment and whether it may be persisted. Beeps and
/// genuine voice renders are cacheable; silence and failure substitutes are
/// not.
struct Synthesized {
    buffer: SampleBuffer,
    cacheable: bool,
}

impl Synthesized {
    fn cached(buffer: SampleBuffer) -> Self {
        Self {
            buffer,
            cacheable: true,
        }
    }

    fn uncached(buffer: SampleBuffer) -> Self {
        Self {
            buffer,
            cacheable: false,
        }
    }
}

/// The phrase announcing an upcoming speed.
fn announcement_text(speed_kmh: f64) -> String {
    format!("Next speed... {:.1}... kilometers per hour", speed_kmh)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::voice::VoiceClip;

    const RATE: u32 = 44100;

    /// Deterministic stand-in for the external TTS engine: a short constant
    /// tone whose length depends only on the text.
    struct StubVoice {
        sample_rate: u32,
    }

    impl VoiceSynthesizer for StubVoice {
        fn synthesize(&self, text: &str) -> AudioResult<VoiceClip> {
            let len = 2000 + 100 * text.len();
            Ok(VoiceClip {
                samples: vec![500; len],
                sample_rate: self.sample_rate,
            })
        }
    }

    struct FailingVoice;

    impl VoiceSynthesizer for FailingVoice {
        fn synthesize(&self, text: &str) -> AudioResult<VoiceClip> {
            Err(AudioError::voice(text, "engine unavailable"))
        }
    }

    fn interval(speed_kmh: f64, start_s: f64, end_s: f64, change: bool) -> Interval {
        Interval {
            distance_m: 50,
            speed_kmh,
            speed_ms: speed_kmh / 3.6,
            duration_s: end_s - start_s,
            total_start_s: start_s,
            total_end_s: end_s,
            total_distance_start_m: 0,
            total_distance_end_m: 50,
            stage_time_start_s: 0.0,
            stage_time_end_s: end_s - start_s,
            stage_change_at_end: change,
        }
    }

    fn stub() -> StubVoice {
        StubVoice { sample_rate: RATE }
    }

    #[test]
    fn test_single_interval_track_length() {
        let intervals = vec![interval(8.0, 0.0, 22.5, false)];
        let result = Assembler::new(RATE)
            .without_preamble()
            .assemble(&intervals, &stub())
            .unwrap();

        let expected =
            synth::samples_for(22.5, RATE) + synth::samples_for(BEEP_DURATION_S, RATE);
        assert_eq!(result.buffer.len(), expected);
    }

    #[test]
    fn test_track_length_with_speed_changes() {
        // 5 intervals, 2 speed changes; final boundary has a triple beep.
        let intervals = vec![
            interval(8.0, 0.0, 22.5, false),
            interval(8.0, 22.5, 45.0, true),
            interval(8.5, 45.0, 66.2, false),
            interval(8.5, 66.2, 87.4, false),
            interval(8.5, 87.4, 108.6, true),
        ];
        let result = Assembler::new(RATE)
            .without_preamble()
            .assemble(&intervals, &stub())
            .unwrap();

        let triple_len = 3 * synth::samples_for(CHANGE_BEEP_DURATION_S, RATE)
            + 2 * synth::samples_for(CHANGE_BEEP_GAP_S, RATE);
        let expected = synth::samples_for(108.6, RATE) + triple_len;
        assert_eq!(result.buffer.len(), expected);
    }

    #[test]
    fn test_boundary_beep_lands_on_the_boundary() {
        let intervals = vec![
            interval(8.0, 0.0, 22.5, false),
            interval(8.0, 22.5, 45.0, false),
        ];
        let result = Assembler::new(RATE)
            .without_preamble()
            .assemble(&intervals, &stub())
            .unwrap();

        // First boundary: beep starts exactly at round(22.5 * rate).
        let boundary = synth::samples_for(22.5, RATE);
        assert_eq!(result.buffer.samples[boundary - 1], 0);
        // The beep's attack ramps from zero; sample past the 20ms attack.
        let past_attack = boundary + synth::samples_for(0.03, RATE);
        assert_ne!(result.buffer.samples[past_attack], 0);

        let expected =
            synth::samples_for(45.0, RATE) + synth::samples_for(BEEP_DURATION_S, RATE);
        assert_eq!(result.buffer.len(), expected);
    }

    #[test]
    fn test_announcement_ends_at_lead_boundary() {
        // Two 22.5s intervals at 8 km/h, speed change to 8.5 at 45s.
        let intervals = vec![
            interval(8.0, 0.0, 22.5, false),
            interval(8.0, 22.5, 45.0, true),
            interval(8.5, 45.0, 66.2, false),
        ];
        let result = Assembler::new(RATE)
            .without_preamble()
            .assemble(&intervals, &stub())
            .unwrap();
        assert!(result.warnings.is_empty());

        let announce_end = synth::samples_for(45.0, RATE) - synth::samples_for(LEAD_TIME_S, RATE);
        // The stub renders a constant 500; the phrase must stop exactly at
        // the lead boundary and silence follows until the 45s triple beep.
        assert_eq!(result.buffer.samples[announce_end - 1], 500);
        assert_eq!(result.buffer.samples[announce_end], 0);
    }

    #[test]
    fn test_announcement_skipped_when_it_does_not_fit() {
        // The change happens 11s in; a 10s lead leaves no room for the phrase.
        let intervals = vec![
            interval(8.0, 0.0, 11.0, true),
            interval(8.5, 11.0, 32.2, false),
        ];
        let result = Assembler::new(RATE)
            .without_preamble()
            .assemble(&intervals, &stub())
            .unwrap();
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].contains("skipped announcement"));
    }

    #[test]
    fn test_preamble_shifts_the_zero_reference() {
        let intervals = vec![interval(8.0, 0.0, 22.5, false)];
        let bare = Assembler::new(RATE)
            .without_preamble()
            .assemble(&intervals, &stub())
            .unwrap();
        let full = Assembler::new(RATE).assemble(&intervals, &stub()).unwrap();
        assert!(full.buffer.len() > bare.buffer.len());

        // The interval track is identical, just offset by the preamble.
        let offset = full.buffer.len() - bare.buffer.len();
        assert_eq!(&full.buffer.samples[offset..], &bare.buffer.samples[..]);
    }

    #[test]
    fn test_voice_failure_aborts_by_default() {
        let intervals = vec![
            interval(8.0, 0.0, 22.5, false),
            interval(8.0, 22.5, 45.0, true),
            interval(8.5, 45.0, 66.2, false),
        ];
        let result = Assembler::new(RATE)
            .without_preamble()
            .assemble(&intervals, &FailingVoice);
        assert!(matches!(result, Err(AudioError::Voice { .. })));
    }

    #[test]
    fn test_voice_failure_substitutes_silence_when_configured() {
        let intervals = vec![
            interval(8.0, 0.0, 22.5, false),
            interval(8.0, 22.5, 45.0, true),
            interval(8.5, 45.0, 66.2, false),
        ];
        let result = Assembler::new(RATE)
            .without_preamble()
            .on_voice_error(VoiceErrorPolicy::Silence)
            .assemble(&intervals, &FailingVoice)
            .unwrap();
        assert!(result
            .warnings
            .iter()
            .any(|w| w.contains("substituting")));

        // Track length is unaffected by the substitution.
        let expected = synth::samples_for(66.2, RATE) + synth::samples_for(BEEP_DURATION_S, RATE);
        assert_eq!(result.buffer.len(), expected);
    }

    #[test]
    fn test_substituted_silence_is_not_cached() {
        let dir = tempfile::tempdir().unwrap();
        let cache = || FragmentCache::new(dir.path(), RATE);
        let intervals = vec![
            interval(8.0, 0.0, 22.5, false),
            interval(8.0, 22.5, 45.0, true),
            interval(8.5, 45.0, 66.2, false),
        ];

        // First run: engine down, silence substituted under the lenient
        // policy.
        let failed = Assembler::new(RATE)
            .without_preamble()
            .on_voice_error(VoiceErrorPolicy::Silence)
            .with_cache(cache())
            .assemble(&intervals, &FailingVoice)
            .unwrap();
        assert!(failed.warnings.iter().any(|w| w.contains("substituting")));

        // Second run over the same cache with a healthy engine: the phrase
        // must be re-synthesized, not served as the substituted silence.
        let healthy = Assembler::new(RATE)
            .without_preamble()
            .with_cache(cache())
            .assemble(&intervals, &stub())
            .unwrap();

        let announce_end =
            synth::samples_for(45.0, RATE) - synth::samples_for(LEAD_TIME_S, RATE);
        assert_eq!(healthy.buffer.samples[announce_end - 1], 500);
    }

    #[test]
    fn test_voice_is_resampled_to_target_rate() {
        let intervals = vec![
            interval(8.0, 0.0, 22.5, false),
            interval(8.0, 22.5, 45.0, true),
            interval(8.5, 45.0, 66.2, false),
        ];
        let low_rate = StubVoice { sample_rate: 22050 };
        let result = Assembler::new(RATE)
            .without_preamble()
            .assemble(&intervals, &low_rate)
            .unwrap();
        assert_eq!(result.buffer.sample_rate, RATE);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_rejects_empty_interval_sequence() {
        let result = Assembler::new(RATE).assemble(&[], &stub());
        assert!(matches!(result, Err(AudioError::Intervals(_))));
    }
}
