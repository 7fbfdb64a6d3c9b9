//! Voice synthesis through the espeak text-to-speech engine.
//!
//! Runs espeak as a subprocess, has it write a temporary WAV file, and
//! parses the result into raw samples. Stereo output is downmixed to mono;
//! the assembler resamples to the target rate afterwards.

use std::path::PathBuf;
use std::process::{Command, Stdio};

use paceforge_audio::{AudioError, AudioResult, VoiceClip, VoiceSynthesizer};

/// Environment variable overriding the espeak binary location.
const ESPEAK_PATH_ENV: &str = "PACEFORGE_ESPEAK";

/// Speaking rate in words per minute.
const WORDS_PER_MINUTE: u32 = 150;

/// Voice synthesizer backed by a local espeak installation.
#[derive(Debug, Clone)]
pub struct EspeakVoice {
    program: PathBuf,
}

impl EspeakVoice {
    /// Locates espeak: the `PACEFORGE_ESPEAK` environment variable first,
    /// then `espeak-ng` and `espeak` on PATH.
    pub fn discover() -> anyhow::Result<Self> {
        if let Ok(path) = std::env::var(ESPEAK_PATH_ENV) {
            let path = PathBuf::from(path);
            if path.exists() {
                return Ok(Self { program: path });
            }
            anyhow::bail!("{} points at {}, which does not exist", ESPEAK_PATH_ENV, path.display());
        }

        for name in ["espeak-ng", "espeak"] {
            if let Ok(path) = which::which(name) {
                return Ok(Self { program: path });
            }
        }

        anyhow::bail!("espeak not found on PATH; install espeak-ng or set {}", ESPEAK_PATH_ENV)
    }

    /// Uses an explicit espeak binary.
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl VoiceSynthesizer for EspeakVoice {
    fn synthesize(&self, text: &str) -> AudioResult<VoiceClip> {
        let wav_file = tempfile::Builder::new()
            .prefix("paceforge_voice_")
            .suffix(".wav")
            .tempfile()?;

        let output = Command::new(&self.program)
            .arg("-s")
            .arg(WORDS_PER_MINUTE.to_string())
            .arg("-w")
            .arg(wav_file.path())
            .arg(text)
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| {
                AudioError::voice(text, format!("failed to run {}: {}", self.program.display(), e))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(AudioError::voice(
                text,
                format!(
                    "{} exited with {}: {}",
                    self.program.display(),
                    output.status,
                    stderr.trim()
                ),
            ));
        }

        read_wav_clip(wav_file.path(), text)
    }
}

/// Reads a 16-bit PCM WAV file into a mono clip.
fn read_wav_clip(path: &std::path::Path, text: &str) -> AudioResult<VoiceClip> {
    let mut reader = hound::WavReader::open(path)
        .map_err(|e| AudioError::voice(text, format!("unreadable WAV output: {}", e)))?;
    let spec = reader.spec();

    if spec.sample_format != hound::SampleFormat::Int || spec.bits_per_sample != 16 {
        return Err(AudioError::voice(
            text,
            format!(
                "expected 16-bit integer PCM, got {}-bit {:?}",
                spec.bits_per_sample, spec.sample_format
            ),
        ));
    }

    let samples: Vec<i16> = reader
        .samples::<i16>()
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| AudioError::voice(text, format!("corrupt WAV output: {}", e)))?;

    let samples = downmix(samples, spec.channels)
        .ok_or_else(|| AudioError::voice(text, format!("unsupported channel count {}", spec.channels)))?;

    Ok(VoiceClip {
        samples,
        sample_rate: spec.sample_rate,
    })
}

/// Downmixes interleaved samples to mono. Only mono and stereo inputs are
/// supported. A malformed stereo stream with a dangling sample keeps that
/// sample as-is.
fn downmix(samples: Vec<i16>, channels: u16) -> Option<Vec<i16>> {
    match channels {
        1 => Some(samples),
        2 => {
            let mut mono: Vec<i16> = samples
                .chunks_exact(2)
                .map(|pair| ((pair[0] as i32 + pair[1] as i32) / 2) as i16)
                .collect();
            if samples.len() % 2 != 0 {
                mono.push(samples[samples.len() - 1]);
            }
            Some(mono)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_downmix_mono_is_identity() {
        let samples = vec![1, -2, 3];
        assert_eq!(downmix(samples.clone(), 1).unwrap(), samples);
    }

    #[test]
    fn test_downmix_stereo_averages_pairs() {
        let samples = vec![100, 200, -100, 100, i16::MAX, i16::MAX];
        assert_eq!(downmix(samples, 2).unwrap(), vec![150, 0, i16::MAX]);
    }

    #[test]
    fn test_downmix_stereo_keeps_dangling_sample() {
        let samples = vec![100, 200, 7];
        assert_eq!(downmix(samples, 2).unwrap(), vec![150, 7]);
    }

    #[test]
    fn test_downmix_rejects_multichannel() {
        assert!(downmix(vec![0; 6], 3).is_none());
    }

    #[test]
    fn test_synthesize_reports_missing_binary() {
        let voice = EspeakVoice::with_program("/nonexistent/espeak");
        let err = voice.synthesize("hello").unwrap_err();
        assert!(matches!(err, AudioError::Voice { .. }));
    }
}
