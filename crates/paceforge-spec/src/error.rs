//! Error types for configuration and interval sequence validation.

use thiserror::Error;

/// Errors produced while validating a training configuration or the interval
/// sequence derived from it.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// A configuration value that must be positive was zero or negative.
    #[error("{name} must be positive, got {value}")]
    NonPositive {
        /// Parameter name.
        name: &'static str,
        /// The offending value.
        value: f64,
    },

    /// The maximum speed is below the initial speed.
    #[error("max_speed_kmh ({max_speed}) must be >= initial_speed_kmh ({initial_speed})")]
    MaxSpeedBelowInitial {
        /// Configured maximum speed in km/h.
        max_speed: f64,
        /// Configured initial speed in km/h.
        initial_speed: f64,
    },

    /// The interval sequence handed to the assembler is empty.
    #[error("interval sequence is empty")]
    EmptyIntervals,

    /// Interval speeds must never decrease over the run.
    #[error("interval {index} decreases speed: {speed} km/h after {previous} km/h")]
    DecreasingSpeed {
        /// Index of the offending interval.
        index: usize,
        /// Speed of the offending interval in km/h.
        speed: f64,
        /// Speed of the preceding interval in km/h.
        previous: f64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_field() {
        let err = ConfigError::NonPositive {
            name: "interval_distance_m",
            value: -3.0,
        };
        assert!(err.to_string().contains("interval_distance_m"));
        assert!(err.to_string().contains("-3"));
    }
}
