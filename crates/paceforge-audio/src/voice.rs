//! Voice adapter boundary.
//!
//! Text-to-speech is the only non-deterministic, slow, fallible collaborator
//! in the pipeline. The assembler talks to it through [`VoiceSynthesizer`]
//! and never caches failures.

use crate::error::AudioResult;

/// A rendered phrase, tagged with the engine's native sample rate. The
/// assembler resamples it to the target rate before placing it.
#[derive(Debug, Clone, PartialEq)]
pub struct VoiceClip {
    /// Mono PCM samples at the native rate.
    pub samples: Vec<i16>,
    /// Native sample rate in Hz.
    pub sample_rate: u32,
}

/// The narrow interface to an external text-to-speech capability.
pub trait VoiceSynthesizer {
    /// Renders `text` to a mono clip at the engine's native rate.
    ///
    /// # Errors
    /// [`crate::AudioError::Voice`] when the engine is unavailable or rejects
    /// the text.
    fn synthesize(&self, text: &str) -> AudioResult<VoiceClip>;
}

/// What the assembler does when voice synthesis fails.
///
/// The default is [`Abort`](VoiceErrorPolicy::Abort): silently substituting
/// a fragment would change the training semantics without a trace. The
/// [`Silence`](VoiceErrorPolicy::Silence) policy substitutes a fixed span of
/// silence and records a warning instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VoiceErrorPolicy {
    /// Abort the whole run with an error naming the offending text.
    #[default]
    Abort,
    /// Substitute silence for the failed phrase and record a warning.
    Silence,
}

/// Duration of the silence substituted under
/// [`VoiceErrorPolicy::Silence`], in seconds.
pub const VOICE_FALLBACK_SILENCE_S: f64 = 2.0;
