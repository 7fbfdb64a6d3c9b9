//! Silence and sine-beep fragment synthesis.
//!
//! All functions here are pure and fully deterministic given their inputs;
//! that determinism is what makes cache keys valid substitutes for
//! recomputation.

use crate::buffer::SampleBuffer;
use crate::error::{AudioError, AudioResult};

/// Peak amplitude target for beep synthesis, ~30% of full scale. Leaves
/// headroom for the added harmonics; the mathematical peak stays at 15300.
pub const BEEP_AMPLITUDE: f64 = 10000.0;

/// Attack ramp length in seconds.
const ATTACK_S: f64 = 0.02;
/// Release ramp length in seconds.
const RELEASE_S: f64 = 0.05;

/// Harmonic overtones of the beep tone: (frequency multiple, relative level).
const HARMONICS: [(f64, f64); 3] = [(2.0, 0.3), (3.0, 0.15), (5.0, 0.08)];

/// Converts a duration to a sample count with the single global rounding
/// rule (round half away from zero). Every duration-to-samples conversion in
/// the crate goes through here so cumulative offsets never drift.
pub fn samples_for(duration_s: f64, sample_rate: u32) -> usize {
    (duration_s * sample_rate as f64).round() as usize
}

/// Generates silence.
///
/// # Errors
/// `InvalidDuration` for a negative duration.
pub fn silence(duration_s: f64, sample_rate: u32) -> AudioResult<SampleBuffer> {
    if duration_s < 0.0 {
        return Err(AudioError::InvalidDuration {
            duration: duration_s,
        });
    }
    Ok(SampleBuffer::new(
        vec![0; samples_for(duration_s, sample_rate)],
        sample_rate,
    ))
}

/// Generates a single beep: a sine fundamental with reduced 2nd/3rd/5th
/// harmonics for warmth, shaped by a linear attack/release envelope.
///
/// Every sample is rounded to nearest and clamped into the i16 range;
/// overflow never wraps.
///
/// # Errors
/// `InvalidDuration` / `InvalidFrequency` on non-positive inputs.
pub fn sine_beep(duration_s: f64, frequency_hz: f64, sample_rate: u32) -> AudioResult<SampleBuffer> {
    if duration_s <= 0.0 {
        return Err(AudioError::InvalidDuration {
            duration: duration_s,
        });
    }
    if frequency_hz <= 0.0 {
        return Err(AudioError::InvalidFrequency { freq: frequency_hz });
    }

    let num_samples = samples_for(duration_s, sample_rate);
    let attack_samples = (ATTACK_S * sample_rate as f64) as usize;
    let release_samples = (RELEASE_S * sample_rate as f64) as usize;

    let mut samples = Vec::with_capacity(num_samples);
    for i in 0..num_samples {
        let t = i as f64 / sample_rate as f64;

        let mut tone = (std::f64::consts::TAU * frequency_hz * t).sin();
        for &(multiple, level) in &HARMONICS {
            tone += level * (std::f64::consts::TAU * frequency_hz * multiple * t).sin();
        }

        let envelope = if i < attack_samples {
            i as f64 / attack_samples as f64
        } else if num_samples - i < release_samples {
            (num_samples - i) as f64 / release_samples as f64
        } else {
            1.0
        };

        samples.push(clamp_sample(BEEP_AMPLITUDE * tone * envelope));
    }

    Ok(SampleBuffer::new(samples, sample_rate))
}

/// Generates `count` beeps separated by `gap_s` of silence, no trailing gap.
///
/// `count = 1` marks an ordinary interval boundary; `count = 3` marks a
/// speed change.
pub fn beep_sequence(
    count: u32,
    duration_s: f64,
    frequency_hz: f64,
    gap_s: f64,
    sample_rate: u32,
) -> AudioResult<SampleBuffer> {
    let beep = sine_beep(duration_s, frequency_hz, sample_rate)?;
    let gap_samples = samples_for(gap_s.max(0.0), sample_rate);

    let mut out = SampleBuffer::empty(sample_rate);
    for i in 0..count {
        if i > 0 {
            out.extend_silence(gap_samples);
        }
        out.extend_from(&beep.samples);
    }
    Ok(out)
}

/// Rounds to nearest and clamps into the i16 range.
fn clamp_sample(value: f64) -> i16 {
    value.round().clamp(i16::MIN as f64, i16::MAX as f64) as i16
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_silence_length_and_content() {
        let buf = silence(1.5, 44100).unwrap();
        assert_eq!(buf.len(), 66150);
        assert!(buf.samples.iter().all(|&s| s == 0));
    }

    #[test]
    fn test_silence_rejects_negative_duration() {
        assert!(matches!(
            silence(-0.1, 44100),
            Err(AudioError::InvalidDuration { .. })
        ));
    }

    #[test]
    fn test_beep_length_is_rounded_duration() {
        // round(0.123 * 44100) = round(5424.3) = 5424
        let buf = sine_beep(0.123, 220.0, 44100).unwrap();
        assert_eq!(buf.len(), samples_for(0.123, 44100));
        assert_eq!(buf.len(), 5424);
    }

    #[test]
    fn test_beep_samples_within_range_and_nonzero() {
        let buf = sine_beep(0.5, 220.0, 44100).unwrap();
        assert!(buf.samples.iter().any(|&s| s != 0));
        // i16 storage already bounds the values; check the envelope keeps the
        // peak under the harmonic-sum ceiling.
        let peak = buf.samples.iter().map(|&s| (s as i32).abs()).max().unwrap();
        assert!(peak <= 15300 + 1);
    }

    #[test]
    fn test_beep_rejects_bad_params() {
        assert!(matches!(
            sine_beep(0.0, 220.0, 44100),
            Err(AudioError::InvalidDuration { .. })
        ));
        assert!(matches!(
            sine_beep(0.5, 0.0, 44100),
            Err(AudioError::InvalidFrequency { .. })
        ));
        assert!(matches!(
            sine_beep(0.5, -440.0, 44100),
            Err(AudioError::InvalidFrequency { .. })
        ));
    }

    #[test]
    fn test_beep_is_deterministic() {
        let a = sine_beep(0.2, 220.0, 44100).unwrap();
        let b = sine_beep(0.2, 220.0, 44100).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_beep_sequence_lengths() {
        let rate = 44100;
        let single = beep_sequence(1, 0.2, 220.0, 0.1, rate).unwrap();
        assert_eq!(single.len(), samples_for(0.2, rate));

        // Triple: 3 beeps + 2 gaps, no trailing gap.
        let triple = beep_sequence(3, 0.2, 220.0, 0.1, rate).unwrap();
        assert_eq!(
            triple.len(),
            3 * samples_for(0.2, rate) + 2 * samples_for(0.1, rate)
        );
    }

    #[test]
    fn test_beep_sequence_gap_is_silent() {
        let rate = 44100;
        let triple = beep_sequence(3, 0.2, 220.0, 0.1, rate).unwrap();
        let beep_len = samples_for(0.2, rate);
        let gap_len = samples_for(0.1, rate);
        let gap = &triple.samples[beep_len..beep_len + gap_len];
        assert!(gap.iter().all(|&s| s == 0));
    }

    #[test]
    fn test_clamp_never_wraps() {
        assert_eq!(clamp_sample(1e9), i16::MAX);
        assert_eq!(clamp_sample(-1e9), i16::MIN);
        assert_eq!(clamp_sample(0.4), 0);
    }
}
