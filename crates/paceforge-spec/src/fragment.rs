//! Fragment descriptors and cache key derivation.
//!
//! A fragment is one synthesized audio unit placed on the output timeline:
//! silence, a burst of beeps, or a spoken phrase. The descriptor carries
//! everything needed both to synthesize the fragment and to derive its
//! content-addressed cache key.

use serde::{Deserialize, Serialize};

/// A tagged fragment descriptor. Immutable value type; the set of kinds is
/// closed and exhaustively matched at synthesis time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Fragment {
    /// Zero samples spanning a duration.
    Silence {
        /// Duration in seconds.
        duration_s: f64,
    },
    /// `count` sine beeps separated by `gap_s` of silence, no trailing gap.
    Beep {
        /// Number of beeps.
        count: u32,
        /// Duration of each beep in seconds.
        duration_s: f64,
        /// Beep frequency in Hz.
        frequency_hz: f64,
        /// Gap between beeps in seconds.
        gap_s: f64,
    },
    /// A spoken phrase rendered by the voice adapter.
    Voice {
        /// Text to speak.
        text: String,
    },
}

impl Fragment {
    /// Creates a silence fragment.
    pub fn silence(duration_s: f64) -> Self {
        Self::Silence { duration_s }
    }

    /// Creates a beep-sequence fragment.
    pub fn beep(count: u32, duration_s: f64, frequency_hz: f64, gap_s: f64) -> Self {
        Self::Beep {
            count,
            duration_s,
            frequency_hz,
            gap_s,
        }
    }

    /// Creates a voice fragment.
    pub fn voice(text: impl Into<String>) -> Self {
        Self::Voice { text: text.into() }
    }

    /// Short kind tag used in cache keys and log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            Fragment::Silence { .. } => "silence",
            Fragment::Beep { .. } => "beep",
            Fragment::Voice { .. } => "voice",
        }
    }

    /// Canonical parameter string for this descriptor.
    ///
    /// Float fields use Rust's shortest round-trip `Display`, which is
    /// deterministic, so value-equal descriptors always canonicalize equally.
    fn canonical(&self, sample_rate: u32) -> String {
        match self {
            Fragment::Silence { duration_s } => {
                format!("silence:duration={},rate={}", duration_s, sample_rate)
            }
            Fragment::Beep {
                count,
                duration_s,
                frequency_hz,
                gap_s,
            } => format!(
                "beep:count={},duration={},freq={},gap={},rate={}",
                count, duration_s, frequency_hz, gap_s, sample_rate
            ),
            Fragment::Voice { text } => format!("voice:text={},rate={}", text, sample_rate),
        }
    }
}

/// Computes the content-addressed cache key of a fragment.
///
/// The key is:
/// ```text
/// key = hex(BLAKE3(canonical(fragment) || sample_rate))
/// ```
///
/// The global sample rate is part of the key so a rate change can never serve
/// stale samples. Returns a 64-character lowercase hexadecimal string.
pub fn fragment_key(fragment: &Fragment, sample_rate: u32) -> String {
    let canonical = fragment.canonical(sample_rate);
    blake3::hash(canonical.as_bytes()).to_hex().to_string()
}
