//! Error types for the audio backend.

use thiserror::Error;

/// Result type for audio operations.
pub type AudioResult<T> = Result<T, AudioError>;

/// Errors that can occur during synthesis and assembly.
///
/// Invalid-parameter errors are always caller bugs and propagate to the
/// assembler unchanged; cache failures never surface here (the cache degrades
/// to a miss instead). Voice errors follow the configured policy.
#[derive(Debug, Error)]
pub enum AudioError {
    /// Invalid fragment duration.
    #[error("invalid duration: {duration} seconds")]
    InvalidDuration {
        /// The invalid duration.
        duration: f64,
    },

    /// Invalid beep frequency.
    #[error("invalid frequency: {freq} Hz")]
    InvalidFrequency {
        /// The invalid frequency.
        freq: f64,
    },

    /// Malformed resampler input.
    #[error("invalid resampler input: {message}")]
    InvalidInput {
        /// Error message.
        message: String,
    },

    /// The interval sequence was rejected before assembly.
    #[error("invalid interval sequence: {0}")]
    Intervals(#[from] paceforge_spec::ConfigError),

    /// The voice adapter failed to render a phrase.
    #[error("voice synthesis failed for \"{text}\": {message}")]
    Voice {
        /// The text that failed to render.
        text: String,
        /// Error message from the adapter.
        message: String,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AudioError {
    /// Creates an invalid-input error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Creates a voice synthesis error.
    pub fn voice(text: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Voice {
            text: text.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_voice_error_names_the_text() {
        let err = AudioError::voice("Next speed... 8.5", "engine unavailable");
        assert!(err.to_string().contains("Next speed... 8.5"));
        assert!(err.to_string().contains("engine unavailable"));
    }
}
